use std::sync::Arc;

use catalog::{parse_price, preset_link, preset_slug, sample_reviews, section_slug, Catalog};
use shared::{
    domain::{CartItem, Preset, Section, SortKey},
    error::ApiError,
    protocol::{
        CartView, GradingReceipt, PresetCard, PresetDetail, ReviewDraft, ReviewSubmission,
        ReviewsView, SectionView, StoreEvent,
    },
};
use tokio::sync::broadcast;
use tracing::{info, warn};

pub mod cart;
pub mod grading;
pub mod reviews;
pub mod rotator;

pub use cart::{CartChange, CartStore};
pub use grading::GradingUpload;
pub use reviews::{aggregate, ReviewBoard, ReviewKey};
pub use rotator::{RotatorError, SlideRotator};

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 8 * 1024 * 1024;
const EVENT_CAPACITY: usize = 256;

/// State shared by every request of a storefront session.
#[derive(Clone)]
pub struct ApiContext {
    pub catalog: Arc<Catalog>,
    pub cart: CartStore,
    pub reviews: ReviewBoard,
    pub max_upload_bytes: usize,
    /// Store-wide push events. The cart sends its own `CartUpdated`.
    pub events: broadcast::Sender<StoreEvent>,
}

impl ApiContext {
    pub fn new(catalog: Catalog) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            catalog: Arc::new(catalog),
            cart: CartStore::with_events(events.clone()),
            events,
            reviews: ReviewBoard::new(sample_reviews()),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

pub fn list_sections(ctx: &ApiContext, sort: SortKey) -> Vec<SectionView> {
    ctx.catalog
        .sorted_sections(sort)
        .into_iter()
        .map(|section| SectionView {
            slug: section_slug(&section.title),
            presets: section
                .presets
                .into_iter()
                .map(|preset| card(&section.title, preset))
                .collect(),
            title: section.title,
            description: section.description,
            sort,
        })
        .collect()
}

pub fn preset_detail(
    ctx: &ApiContext,
    section_slug: &str,
    preset_slug: &str,
) -> Result<PresetDetail, ApiError> {
    let (section, preset) = find_preset(ctx, section_slug, preset_slug)?;
    let reviews = ctx
        .reviews
        .reviews(&ReviewKey::new(section_slug, preset_slug));
    Ok(PresetDetail {
        section_slug: section_slug.to_string(),
        section_title: section.title.clone(),
        card: card(&section.title, preset.clone()),
        summary: aggregate(&reviews),
        reviews,
    })
}

pub fn list_reviews(
    ctx: &ApiContext,
    section_slug: &str,
    preset_slug: &str,
) -> Result<ReviewsView, ApiError> {
    find_preset(ctx, section_slug, preset_slug)?;
    let reviews = ctx
        .reviews
        .reviews(&ReviewKey::new(section_slug, preset_slug));
    Ok(ReviewsView {
        summary: aggregate(&reviews),
        reviews,
    })
}

/// Posts a review. Incomplete drafts are not an error: the current list comes
/// back unchanged with `accepted: false`.
pub fn submit_review(
    ctx: &ApiContext,
    section_slug: &str,
    preset_slug: &str,
    draft: ReviewDraft,
) -> Result<ReviewSubmission, ApiError> {
    find_preset(ctx, section_slug, preset_slug)?;
    let key = ReviewKey::new(section_slug, preset_slug);
    let accepted = ctx.reviews.submit_today(&key, draft).is_some();
    let reviews = ctx.reviews.reviews(&key);
    if accepted {
        info!(section = section_slug, preset = preset_slug, "review posted");
    }
    Ok(ReviewSubmission {
        accepted,
        summary: aggregate(&reviews),
        reviews,
    })
}

/// Turns a catalog preset into a cart line: explicit id or `"{section}-{name}"`,
/// and the display price parsed into a number.
pub fn cart_item_for(section: &Section, preset: &Preset) -> Result<CartItem, ApiError> {
    let price = parse_price(&preset.price).ok_or_else(|| {
        ApiError::validation(format!(
            "price '{}' of preset '{}' is not a number",
            preset.price, preset.name
        ))
    })?;
    Ok(CartItem {
        id: preset
            .id
            .clone()
            .unwrap_or_else(|| format!("{}-{}", section.title, preset.name)),
        name: preset.name.clone(),
        image: preset.image.clone(),
        price,
        section: section.title.clone(),
    })
}

pub fn add_to_cart(
    ctx: &ApiContext,
    section_slug: &str,
    preset_slug: &str,
) -> Result<CartView, ApiError> {
    let (section, preset) = find_preset(ctx, section_slug, preset_slug)?;
    let item = cart_item_for(section, preset)
        .inspect_err(|e| warn!(error = %e, "cart add rejected"))?;
    ctx.cart.add(item);
    Ok(cart_view(ctx))
}

pub fn remove_from_cart(ctx: &ApiContext, id: &str) -> CartView {
    ctx.cart.remove(id);
    cart_view(ctx)
}

pub fn clear_cart(ctx: &ApiContext) -> CartView {
    let cleared = ctx.cart.clear();
    info!(cleared, "cart cleared");
    cart_view(ctx)
}

pub fn cart_view(ctx: &ApiContext) -> CartView {
    let items = ctx.cart.items();
    CartView {
        count: items.len(),
        total: items.iter().map(|line| line.price).sum(),
        items,
    }
}

pub fn submit_grading(
    ctx: &ApiContext,
    upload: &GradingUpload<'_>,
) -> Result<GradingReceipt, ApiError> {
    let receipt = grading::accept_upload(upload, ctx.max_upload_bytes)
        .inspect_err(|e| warn!(error = %e, "grading upload rejected"))?;
    info!(
        submission_id = %receipt.submission_id,
        email = %receipt.email,
        size_bytes = receipt.size_bytes,
        "grading upload received; image is not processed"
    );
    Ok(receipt)
}

fn find_preset<'a>(
    ctx: &'a ApiContext,
    section_slug: &str,
    preset_slug: &str,
) -> Result<(&'a Section, &'a Preset), ApiError> {
    ctx.catalog
        .preset_by_slugs(section_slug, preset_slug)
        .ok_or_else(|| ApiError::not_found("preset not found"))
}

fn card(section_title: &str, preset: Preset) -> PresetCard {
    PresetCard {
        slug: preset_slug(&preset.name),
        link: preset_link(section_title, &preset.name),
        preset,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
