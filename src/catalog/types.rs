//! Catalog types and construction-time validation.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SitingError};

/// Upper bound of the influence domain
pub const MAX_INFLUENCE: f64 = 100.0;

/// Lower bound of the influence domain
pub const MIN_INFLUENCE: f64 = 0.0;

/// Influence value as written in a catalog document.
///
/// Catalogs carry decimal strings (`"2.93"`); bare numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfluenceValue {
    Number(f64),
    Text(String),
}

impl InfluenceValue {
    /// Parsed value, `None` when the text is not a finite decimal
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            InfluenceValue::Number(n) => *n,
            InfluenceValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for InfluenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfluenceValue::Number(n) => write!(f, "{}", n),
            InfluenceValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for InfluenceValue {
    fn from(value: f64) -> Self {
        InfluenceValue::Number(value)
    }
}

impl From<&str> for InfluenceValue {
    fn from(value: &str) -> Self {
        InfluenceValue::Text(value.to_string())
    }
}

/// A selectable criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u32,

    /// Display name
    pub name: String,

    /// Key of the analysis raster this criterion maps to
    #[serde(alias = "RasterName")]
    pub criterion_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Influence seeded when the category is selected
    pub default_influence: InfluenceValue,
}

/// Serialized form of a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub name: String,

    pub categories: Vec<Category>,
}

/// Immutable, validated list of categories for one analysis mode
#[derive(Debug, Clone)]
pub struct Catalog {
    name: String,
    categories: Vec<Category>,
    defaults: Vec<f64>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Validate and build a catalog.
    ///
    /// Ids and criterion keys must be unique, and every default influence must
    /// parse to a decimal within the influence domain.
    pub fn new(name: impl Into<String>, categories: Vec<Category>) -> Result<Self> {
        let name = name.into();
        let mut index = HashMap::with_capacity(categories.len());
        let mut ids = HashMap::with_capacity(categories.len());
        let mut defaults = Vec::with_capacity(categories.len());

        for (position, category) in categories.iter().enumerate() {
            if category.criterion_key.trim().is_empty() {
                return Err(SitingError::InvalidCatalog(format!(
                    "category {} has an empty criterion key",
                    category.id
                )));
            }
            if let Some(previous) = ids.insert(category.id, position) {
                return Err(SitingError::InvalidCatalog(format!(
                    "duplicate id {} (positions {} and {})",
                    category.id, previous, position
                )));
            }
            if index.insert(category.criterion_key.clone(), position).is_some() {
                return Err(SitingError::InvalidCatalog(format!(
                    "duplicate criterion key {}",
                    category.criterion_key
                )));
            }

            let value = category.default_influence.parse().ok_or_else(|| {
                SitingError::InvalidCatalog(format!(
                    "default influence '{}' of {} is not a decimal",
                    category.default_influence, category.criterion_key
                ))
            })?;
            if !(MIN_INFLUENCE..=MAX_INFLUENCE).contains(&value) {
                return Err(SitingError::InvalidCatalog(format!(
                    "default influence {} of {} is outside [{}, {}]",
                    value, category.criterion_key, MIN_INFLUENCE, MAX_INFLUENCE
                )));
            }
            defaults.push(value);
        }

        Ok(Self {
            name,
            categories,
            defaults,
            index,
        })
    }

    pub fn from_document(document: CatalogDocument) -> Result<Self> {
        Self::new(document.name, document.categories)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            name: self.name.clone(),
            categories: self.categories.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Categories in declaration order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.categories.iter().map(|c| c.criterion_key.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Declaration position of a criterion key
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn get(&self, key: &str) -> Option<&Category> {
        self.position(key).map(|i| &self.categories[i])
    }

    pub fn default_influence(&self, key: &str) -> Option<f64> {
        self.position(key).map(|i| self.defaults[i])
    }

    /// Default influence by declaration position
    pub(crate) fn default_at(&self, position: usize) -> f64 {
        self.defaults[position]
    }

    pub(crate) fn key_at(&self, position: usize) -> &str {
        &self.categories[position].criterion_key
    }
}
