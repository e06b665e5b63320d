use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use shared::domain::{Preset, Section, SortKey};
use thiserror::Error;
use tracing::info;

mod data;
pub mod slug;
pub mod sort;

pub use data::{contact_info, grading_styles, hero_images, sample_reviews};
pub use slug::{preset_link, preset_slug, section_slug};
pub use sort::{parse_price, sort_presets};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("section title '{title}' has no letters to build a slug from")]
    EmptySectionSlug { title: String },
    #[error("preset '{name}' in section '{section}' has no letters or digits to build a slug from")]
    EmptyPresetSlug { section: String, name: String },
    #[error("sections '{first}' and '{second}' share the slug '{slug}'")]
    DuplicateSectionSlug {
        slug: String,
        first: String,
        second: String,
    },
    #[error("presets '{first}' and '{second}' in section '{section}' share the slug '{slug}'")]
    DuplicatePresetSlug {
        section: String,
        slug: String,
        first: String,
        second: String,
    },
}

/// The read-only preset catalog. Built once, then only read.
#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<Section>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            sections: data::builtin_sections(),
        }
    }

    /// Builds a catalog after checking that every slug resolves to exactly
    /// one section or preset.
    pub fn from_sections(sections: Vec<Section>) -> Result<Self, CatalogError> {
        let mut section_slugs: Vec<(String, &str)> = Vec::with_capacity(sections.len());
        for section in &sections {
            let slug = section_slug(&section.title);
            if !slug::is_meaningful(&slug) {
                return Err(CatalogError::EmptySectionSlug {
                    title: section.title.clone(),
                });
            }
            if let Some((_, first)) = section_slugs.iter().find(|(s, _)| *s == slug) {
                return Err(CatalogError::DuplicateSectionSlug {
                    slug,
                    first: first.to_string(),
                    second: section.title.clone(),
                });
            }
            section_slugs.push((slug, &section.title));
            validate_preset_slugs(section)?;
        }

        Ok(Self { sections })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let sections: Vec<Section> = serde_json::from_str(raw)?;
        Self::from_sections(sections)
    }

    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            sections = catalog.sections.len(),
            presets = catalog.preset_count(),
            "loaded catalog file"
        );
        Ok(catalog)
    }

    /// Loads `path` when given, the built-in catalog otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_json_path(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn preset_count(&self) -> usize {
        self.sections.iter().map(|s| s.presets.len()).sum()
    }

    pub fn section_by_slug(&self, slug: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section_slug(&section.title) == slug)
    }

    pub fn preset_by_slugs(&self, section: &str, preset: &str) -> Option<(&Section, &Preset)> {
        let section = self.section_by_slug(section)?;
        let preset = section
            .presets
            .iter()
            .find(|candidate| preset_slug(&candidate.name) == preset)?;
        Some((section, preset))
    }

    /// Every section with its presets ordered by `key`.
    pub fn sorted_sections(&self, key: SortKey) -> Vec<Section> {
        self.sections
            .iter()
            .map(|section| Section {
                title: section.title.clone(),
                description: section.description.clone(),
                presets: sort_presets(&section.presets, key),
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_preset_slugs(section: &Section) -> Result<(), CatalogError> {
    let mut seen: HashSet<String> = HashSet::with_capacity(section.presets.len());
    for preset in &section.presets {
        let slug = preset_slug(&preset.name);
        if !slug::is_meaningful(&slug) {
            return Err(CatalogError::EmptyPresetSlug {
                section: section.title.clone(),
                name: preset.name.clone(),
            });
        }
        if !seen.insert(slug.clone()) {
            let first = section
                .presets
                .iter()
                .find(|p| preset_slug(&p.name) == slug)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            return Err(CatalogError::DuplicatePresetSlug {
                section: section.title.clone(),
                slug,
                first,
                second: preset.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
