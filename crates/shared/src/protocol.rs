use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{CartItem, HeroPage, Preset, RatingSummary, Review, SortKey},
    error::ApiError,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetCard {
    pub slug: String,
    pub link: String,
    pub preset: Preset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionView {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub sort: SortKey,
    pub presets: Vec<PresetCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetDetail {
    pub section_slug: String,
    pub section_title: String,
    pub card: PresetCard,
    pub summary: RatingSummary,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsView {
    pub summary: RatingSummary,
    pub reviews: Vec<Review>,
}

/// Review form contents, as typed. `rating` is `None` when no star was
/// picked and may be out of range; `ReviewBoard::submit` decides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub accepted: bool,
    pub summary: RatingSummary,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub section: String,
    pub preset: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub count: usize,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroView {
    pub page: HeroPage,
    pub index: usize,
    pub image: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JumpRequest {
    pub index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingReceipt {
    pub submission_id: Uuid,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    pub filename: String,
    pub size_bytes: usize,
    pub status: String,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StoreEvent {
    CartUpdated {
        count: usize,
    },
    ReviewAdded {
        section: String,
        preset: String,
        summary: RatingSummary,
    },
    GradingReceived {
        submission_id: Uuid,
    },
    Error(ApiError),
}
