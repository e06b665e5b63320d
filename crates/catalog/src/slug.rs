//! URL segments for sections and presets.
//!
//! Section slugs keep only `a-z`; preset slugs also keep digits. Every run of
//! other characters collapses into a single `-`, so `"Teal & Orange"` becomes
//! `teal-orange`. Leading and trailing dashes are kept as produced.

pub fn section_slug(title: &str) -> String {
    slugify(title, |c| c.is_ascii_lowercase())
}

pub fn preset_slug(name: &str) -> String {
    slugify(name, |c| c.is_ascii_lowercase() || c.is_ascii_digit())
}

pub fn preset_link(section_title: &str, preset_name: &str) -> String {
    format!(
        "/presets/{}/{}",
        section_slug(section_title),
        preset_slug(preset_name)
    )
}

fn slugify(raw: &str, keep: impl Fn(char) -> bool) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut in_run = false;
    for c in raw.chars().flat_map(char::to_lowercase) {
        if keep(c) {
            slug.push(c);
            in_run = false;
        } else if !in_run {
            slug.push('-');
            in_run = true;
        }
    }
    slug
}

/// True when the slug carries at least one kept character.
pub(crate) fn is_meaningful(slug: &str) -> bool {
    slug.chars().any(|c| c != '-')
}
