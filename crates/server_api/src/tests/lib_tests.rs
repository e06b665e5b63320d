use super::*;
use shared::error::ErrorCode;

fn ctx() -> ApiContext {
    ApiContext::new(Catalog::builtin())
}

fn custom_ctx(raw: &str) -> ApiContext {
    ApiContext::new(Catalog::from_json_str(raw).expect("catalog"))
}

#[test]
fn sections_come_back_sorted_with_links() {
    let sections = list_sections(&ctx(), SortKey::PriceAsc);
    assert_eq!(sections.len(), 5);

    let teal = sections
        .iter()
        .find(|s| s.slug == "teal-orange")
        .expect("teal section");
    assert_eq!(teal.sort, SortKey::PriceAsc);
    let names: Vec<_> = teal.presets.iter().map(|c| c.preset.name.as_str()).collect();
    assert_eq!(names, ["Vlog Pop", "Coastline", "Action Grade"]);
    assert_eq!(teal.presets[0].link, "/presets/teal-orange/vlog-pop");
}

#[test]
fn adding_a_preset_normalizes_price_and_id() {
    let ctx = custom_ctx(
        r#"[{"title":"Mono","description":"","presets":[
            {"name":"Silver","price":"$12.99","description":"","image":"/s.jpg"},
            {"name":"Coal","price":"$5","description":"","image":"/c.jpg","id":"coal-1"}
        ]}]"#,
    );

    let view = add_to_cart(&ctx, "mono", "silver").expect("added");
    assert_eq!(view.count, 1);
    assert_eq!(view.items[0].price, 12.99);
    assert_eq!(view.items[0].id, "Mono-Silver");
    assert_eq!(view.items[0].section, "Mono");

    let view = add_to_cart(&ctx, "mono", "coal").expect("added");
    assert_eq!(view.items[1].id, "coal-1");
    assert!((view.total - 17.99).abs() < 1e-9);
}

#[test]
fn adding_twice_keeps_one_line() {
    let ctx = ctx();
    add_to_cart(&ctx, "cinematic", "arthouse").expect("added");
    let view = add_to_cart(&ctx, "cinematic", "arthouse").expect("added again");
    assert_eq!(view.count, 1);
}

#[test]
fn add_then_remove_empties_the_cart() {
    let ctx = ctx();
    let view = add_to_cart(&ctx, "cinematic", "arthouse").expect("added");
    let id = view.items[0].id.clone();
    let view = remove_from_cart(&ctx, &id);
    assert_eq!(view.count, 0);
    assert_eq!(remove_from_cart(&ctx, &id).count, 0);
}

#[test]
fn unpriced_presets_cannot_be_added() {
    let ctx = custom_ctx(
        r#"[{"title":"Mono","description":"","presets":[
            {"name":"Gift","price":"Free","description":"","image":"/g.jpg"}
        ]}]"#,
    );
    let err = add_to_cart(&ctx, "mono", "gift").expect_err("not a number");
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(cart_view(&ctx).count, 0);
}

#[test]
fn unknown_presets_are_not_found() {
    let ctx = ctx();
    let err = add_to_cart(&ctx, "cinematic", "missing").expect_err("missing");
    assert_eq!(err.code, ErrorCode::NotFound);
    assert!(preset_detail(&ctx, "nope", "arthouse").is_err());
    assert!(list_reviews(&ctx, "nope", "arthouse").is_err());
}

#[test]
fn detail_includes_seeded_reviews_and_summary() {
    let detail = preset_detail(&ctx(), "cinematic", "arthouse").expect("detail");
    assert_eq!(detail.section_title, "Cinematic");
    assert_eq!(detail.card.preset.name, "Arthouse");
    assert_eq!(detail.reviews.len(), 3);
    assert_eq!(detail.summary.total, 3);
    assert_eq!(detail.summary.average, 4.7);
}

#[test]
fn review_submission_updates_summary() {
    let ctx = ctx();
    let outcome = submit_review(
        &ctx,
        "cinematic",
        "arthouse",
        ReviewDraft {
            name: "Ana".into(),
            rating: Some(1),
            content: "Not for me".into(),
        },
    )
    .expect("submitted");
    assert!(outcome.accepted);
    assert_eq!(outcome.reviews.len(), 4);
    assert_eq!(outcome.reviews[0].name, "Ana");
    assert_eq!(outcome.summary.per_star[&1], 1);
    assert_eq!(outcome.summary.average, 3.8);
}

#[test]
fn review_without_name_is_rejected_quietly() {
    let ctx = ctx();
    let outcome = submit_review(
        &ctx,
        "cinematic",
        "arthouse",
        ReviewDraft {
            name: String::new(),
            rating: Some(5),
            content: "Great".into(),
        },
    )
    .expect("no error");
    assert!(!outcome.accepted);
    assert_eq!(outcome.reviews.len(), 3);
}

#[test]
fn grading_uses_the_context_limit() {
    let mut ctx = ctx();
    ctx.max_upload_bytes = 4;
    let upload = GradingUpload {
        email: Some("creator@example.com"),
        image: b"12345",
        ..Default::default()
    };
    let err = submit_grading(&ctx, &upload).expect_err("too large");
    assert_eq!(err.code, ErrorCode::PayloadTooLarge);
}
