use super::*;
use std::io::Write;

fn preset(name: &str, price: &str) -> Preset {
    Preset {
        name: name.to_string(),
        price: price.to_string(),
        description: format!("{name} look"),
        image: format!("/assets/{name}.jpg"),
        id: None,
    }
}

fn section(title: &str, presets: Vec<Preset>) -> Section {
    Section {
        title: title.to_string(),
        description: String::new(),
        presets,
    }
}

#[test]
fn builtin_catalog_passes_slug_validation() {
    let builtin = Catalog::builtin();
    let validated = Catalog::from_sections(builtin.sections().to_vec()).expect("valid catalog");
    assert_eq!(validated.sections().len(), 5);
    assert!(validated.preset_count() >= 15);
}

#[test]
fn slugs_collapse_runs_of_other_characters() {
    assert_eq!(section_slug("Teal & Orange"), "teal-orange");
    assert_eq!(section_slug("Vintage / Retro"), "vintage-retro");
    assert_eq!(section_slug("Top 10 Looks"), "top-looks");
    assert_eq!(preset_slug("Polaroid 79"), "polaroid-79");
    assert_eq!(preset_slug("Tri-X Mono"), "tri-x-mono");
    assert_eq!(preset_link("Film Look / Analog", "Portra Glow"), "/presets/film-look-analog/portra-glow");
}

#[test]
fn finds_presets_by_slug() {
    let catalog = Catalog::builtin();
    let (section, preset) = catalog
        .preset_by_slugs("teal-orange", "vlog-pop")
        .expect("preset exists");
    assert_eq!(section.title, "Teal & Orange");
    assert_eq!(preset.name, "Vlog Pop");

    assert!(catalog.preset_by_slugs("teal-orange", "missing").is_none());
    assert!(catalog.section_by_slug("nope").is_none());
}

#[test]
fn rejects_sections_sharing_a_slug() {
    let err = Catalog::from_sections(vec![
        section("Dark & Moody", vec![preset("One", "$1")]),
        section("Dark Moody", vec![preset("Two", "$2")]),
    ])
    .expect_err("duplicate slug");
    assert!(matches!(err, CatalogError::DuplicateSectionSlug { ref slug, .. } if slug == "dark-moody"));
}

#[test]
fn rejects_presets_sharing_a_slug_within_a_section() {
    let err = Catalog::from_sections(vec![section(
        "Cinematic",
        vec![preset("Night Run", "$1"), preset("night-run", "$2")],
    )])
    .expect_err("duplicate preset slug");
    match err {
        CatalogError::DuplicatePresetSlug { first, second, .. } => {
            assert_eq!(first, "Night Run");
            assert_eq!(second, "night-run");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn same_preset_slug_is_fine_across_sections() {
    let catalog = Catalog::from_sections(vec![
        section("Cinematic", vec![preset("Night", "$1")]),
        section("Analog", vec![preset("Night", "$2")]),
    ])
    .expect("valid");
    let (_, preset) = catalog.preset_by_slugs("analog", "night").expect("found");
    assert_eq!(preset.price, "$2");
}

#[test]
fn rejects_titles_without_slug_characters() {
    let err = Catalog::from_sections(vec![section("2024", vec![])]).expect_err("empty slug");
    assert!(matches!(err, CatalogError::EmptySectionSlug { .. }));

    let err = Catalog::from_sections(vec![section("Mono", vec![preset("★★★", "$1")])])
        .expect_err("empty preset slug");
    assert!(matches!(err, CatalogError::EmptyPresetSlug { .. }));
}

#[test]
fn sorted_sections_keep_section_order() {
    let catalog = Catalog::builtin();
    let sorted = catalog.sorted_sections(SortKey::PriceDesc);
    let titles: Vec<_> = sorted.iter().map(|s| s.title.as_str()).collect();
    let original: Vec<_> = catalog.sections().iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, original);

    let cinematic = &sorted[0];
    assert_eq!(cinematic.presets[0].name, "Anamorphic Night");
    assert_eq!(catalog.sections()[0].presets[0].name, "Blockbuster");
}

#[test]
fn loads_catalog_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"[{{"title":"Mono","description":"Black and white","presets":[
            {{"name":"Silver","price":"$7.00","description":"Bright greys","image":"/a.jpg","id":"mono-silver"}},
            {{"name":"Coal","price":"$5.00","description":"Heavy blacks","image":"/b.jpg"}}
        ]}}]"#
    )
    .expect("write");

    let catalog = Catalog::load(Some(file.path())).expect("load");
    assert_eq!(catalog.sections().len(), 1);
    let (_, silver) = catalog.preset_by_slugs("mono", "silver").expect("silver");
    assert_eq!(silver.id.as_deref(), Some("mono-silver"));
    let (_, coal) = catalog.preset_by_slugs("mono", "coal").expect("coal");
    assert!(coal.id.is_none());
}

#[test]
fn missing_file_reports_its_path() {
    let err = Catalog::from_json_path("/definitely/not/here.json").expect_err("missing");
    match err {
        CatalogError::Io { path, .. } => assert_eq!(path, PathBuf::from("/definitely/not/here.json")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_json_is_an_error() {
    let err = Catalog::from_json_str("{not json").expect_err("bad json");
    assert!(matches!(err, CatalogError::Json(_)));
}
