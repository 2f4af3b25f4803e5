//! Catalog loading with project overrides layered on top of the source.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mode::SelectionMode;

use super::provider::CatalogSource;
use super::types::{Catalog, CatalogDocument, InfluenceValue};

/// Per-project adjustments to a catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOverrides {
    /// Replacement default influence by criterion key
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub default_influence: BTreeMap<String, InfluenceValue>,

    /// Criterion keys removed from the catalog
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled: Vec<String>,
}

impl CatalogOverrides {
    pub fn is_empty(&self) -> bool {
        self.default_influence.is_empty() && self.disabled.is_empty()
    }
}

/// Load a catalog in two layers:
/// 1. The configured source (built-in, file or URL)
/// 2. Project overrides
pub fn load_catalog(
    source: &CatalogSource,
    mode: SelectionMode,
    overrides: &CatalogOverrides,
) -> Result<Catalog> {
    let document = source.provider(mode).fetch()?;
    let document = apply_overrides(document, overrides);
    let catalog = Catalog::from_document(document)?;

    tracing::debug!(
        "Loaded {} catalog '{}' from {} ({} categories)",
        mode,
        catalog.name(),
        source,
        catalog.len()
    );
    Ok(catalog)
}

/// Apply overrides to a raw document. Keys the document does not know are
/// reported and skipped.
pub fn apply_overrides(mut document: CatalogDocument, overrides: &CatalogOverrides) -> CatalogDocument {
    if overrides.is_empty() {
        return document;
    }

    for (key, value) in &overrides.default_influence {
        if let Some(category) = document
            .categories
            .iter_mut()
            .find(|c| &c.criterion_key == key)
        {
            category.default_influence = value.clone();
        } else {
            tracing::warn!("Default influence override for unknown category: {}", key);
        }
    }

    for key in &overrides.disabled {
        if !document.categories.iter().any(|c| &c.criterion_key == key) {
            tracing::warn!("Cannot disable unknown category: {}", key);
        }
    }
    document
        .categories
        .retain(|c| !overrides.disabled.contains(&c.criterion_key));

    document
}
