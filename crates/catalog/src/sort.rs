use std::cmp::Ordering;

use shared::domain::{Preset, SortKey};

/// Reads a display price the way the storefront does: drop everything but
/// digits and dots, then take the longest `digits[.digits]` prefix.
/// `None` stands for "not a number".
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in cleaned.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        } else {
            seen_digit = true;
        }
        end = i + 1;
    }

    if !seen_digit {
        return None;
    }
    cleaned[..end].parse().ok()
}

/// Returns a sorted copy of `presets`; the input order is left untouched.
///
/// Sorting is stable for every key. Presets whose price is not a number sort
/// after all priced presets in both price directions.
pub fn sort_presets(presets: &[Preset], key: SortKey) -> Vec<Preset> {
    let mut sorted = presets.to_vec();
    match key {
        SortKey::NameAsc => sorted.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::NameDesc => sorted.sort_by(|a, b| compare_names(&b.name, &a.name)),
        SortKey::PriceAsc | SortKey::PriceDesc => {
            let descending = key == SortKey::PriceDesc;
            // Parse once per preset instead of once per comparison.
            let mut keyed: Vec<(Option<f64>, Preset)> = sorted
                .into_iter()
                .map(|preset| (parse_price(&preset.price), preset))
                .collect();
            keyed.sort_by(|(a, _), (b, _)| compare_prices(*a, *b, descending));
            sorted = keyed.into_iter().map(|(_, preset)| preset).collect();
        }
    }
    sorted
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn compare_prices(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = a.total_cmp(&b);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod tests;
