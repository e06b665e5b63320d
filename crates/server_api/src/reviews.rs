use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex, MutexGuard},
};

use chrono::{NaiveDate, Utc};
use shared::{
    domain::{RatingSummary, Review, MAX_RATING, MIN_RATING},
    protocol::ReviewDraft,
};
use tracing::debug;

pub const REVIEW_DATE_FORMAT: &str = "%B %-d, %Y";

/// Average rating (one decimal), per-star counts and total for `reviews`.
pub fn aggregate(reviews: &[Review]) -> RatingSummary {
    if reviews.is_empty() {
        return RatingSummary::empty();
    }

    let mut per_star: BTreeMap<u8, usize> = (MIN_RATING..=MAX_RATING).map(|s| (s, 0)).collect();
    let mut sum = 0u64;
    for review in reviews {
        sum += u64::from(review.rating);
        if let Some(count) = per_star.get_mut(&review.rating) {
            *count += 1;
        }
    }

    let mean = sum as f64 / reviews.len() as f64;
    RatingSummary {
        average: one_decimal(mean),
        per_star,
        total: reviews.len(),
    }
}

/// Rounds to one decimal from the exact binary value, halves going up.
/// `1.15` is stored just below the half and becomes `1.1`; `1.25` is an
/// exact half and becomes `1.3`.
fn one_decimal(value: f64) -> f64 {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return (value * 10.0).ceil() / 10.0;
    }
    format!("{value:.1}").parse().unwrap_or(value)
}

/// The draft's rating if it is a whole star count in range.
fn star_rating(draft: &ReviewDraft) -> Option<u8> {
    let rating = u8::try_from(draft.rating?).ok()?;
    (MIN_RATING..=MAX_RATING).contains(&rating).then_some(rating)
}

/// Whether a form submission may be posted: a name, a 1-5 rating and some text.
pub fn is_submittable(draft: &ReviewDraft) -> bool {
    !draft.name.is_empty() && star_rating(draft).is_some() && !draft.content.is_empty()
}

pub fn format_review_date(date: NaiveDate) -> String {
    date.format(REVIEW_DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReviewKey {
    pub section: String,
    pub preset: String,
}

impl ReviewKey {
    pub fn new(section: impl Into<String>, preset: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            preset: preset.into(),
        }
    }
}

/// In-memory reviews per preset. A preset's list starts from `seed` the first
/// time it is looked at and only grows afterwards.
#[derive(Debug, Clone)]
pub struct ReviewBoard {
    lists: Arc<Mutex<HashMap<ReviewKey, Vec<Review>>>>,
    seed: Arc<Vec<Review>>,
}

impl ReviewBoard {
    pub fn new(seed: Vec<Review>) -> Self {
        Self {
            lists: Arc::default(),
            seed: Arc::new(seed),
        }
    }

    pub fn reviews(&self, key: &ReviewKey) -> Vec<Review> {
        let mut lists = self.lock();
        lists
            .entry(key.clone())
            .or_insert_with(|| self.seed.to_vec())
            .clone()
    }

    /// Posts `draft` dated `today`, newest first. Returns `None` and leaves
    /// the list alone when the draft is incomplete.
    pub fn submit(&self, key: &ReviewKey, draft: ReviewDraft, today: NaiveDate) -> Option<Review> {
        let mut lists = self.lock();
        let list = lists
            .entry(key.clone())
            .or_insert_with(|| self.seed.to_vec());

        let rating = match star_rating(&draft) {
            Some(rating) if is_submittable(&draft) => rating,
            _ => {
                debug!(
                    section = %key.section,
                    preset = %key.preset,
                    rating = ?draft.rating,
                    "dropping incomplete review submission"
                );
                return None;
            }
        };

        let review = Review {
            name: draft.name,
            date: format_review_date(today),
            rating,
            content: draft.content,
        };
        list.insert(0, review.clone());
        Some(review)
    }

    pub fn submit_today(&self, key: &ReviewKey, draft: ReviewDraft) -> Option<Review> {
        self.submit(key, draft, Utc::now().date_naive())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ReviewKey, Vec<Review>>> {
        self.lists
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
#[path = "tests/reviews_tests.rs"]
mod tests;
