//! URL slug derived from a category name.

use serde::{Deserialize, Serialize};

use mercato_core::ValueObject;

/// Deterministic slug: lowercase, spaces to hyphens, `&` to `and`, quotes
/// stripped. No collision resolution; uniqueness per (tenant, slug) is a
/// persistence-layer constraint surfaced as a commit-time conflict.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn from_name(name: &str) -> Self {
        let slug = name
            .to_lowercase()
            .replace(' ', "-")
            .replace('&', "and")
            .replace(['\'', '"'], "");
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Slug {}

impl core::fmt::Display for Slug {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
