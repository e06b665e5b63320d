use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A catalog entry. Prices stay in their display form (`"$12.00"`) and are
/// only turned into numbers when sorting or adding to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub price: String,
    pub description: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub description: String,
    pub presets: Vec<Preset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub image: String,
    pub price: f64,
    pub section: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub name: String,
    pub date: String,
    pub rating: u8,
    pub content: String,
}

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub per_star: BTreeMap<u8, usize>,
    pub total: usize,
}

impl RatingSummary {
    pub fn empty() -> Self {
        Self {
            average: 0.0,
            per_star: (MIN_RATING..=MAX_RATING).map(|star| (star, 0)).collect(),
            total: 0,
        }
    }

    /// Whole stars to light up for the average.
    pub fn rounded_stars(&self) -> u8 {
        self.average.round().clamp(0.0, f64::from(MAX_RATING)) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::NameAsc => "Name (A-Z)",
            SortKey::NameDesc => "Name (Z-A)",
            SortKey::PriceAsc => "Price (Low to High)",
            SortKey::PriceDesc => "Price (High to Low)",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key '{0}'")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

/// Pages that carry a hero slideshow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroPage {
    Home,
    Presets,
}

impl HeroPage {
    pub const ALL: [HeroPage; 2] = [HeroPage::Home, HeroPage::Presets];

    pub fn as_str(self) -> &'static str {
        match self {
            HeroPage::Home => "home",
            HeroPage::Presets => "presets",
        }
    }
}

impl FromStr for HeroPage {
    type Err = UnknownHeroPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeroPage::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| UnknownHeroPage(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no slideshow on page '{0}'")]
pub struct UnknownHeroPage(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingStyle {
    pub title: String,
    pub icon: String,
    pub image: String,
    pub description: String,
    pub ideal_for: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub location: String,
}
