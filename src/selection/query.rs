//! Read accessors over a selection store, used at render and submit time.

use serde::{Deserialize, Serialize};

use super::store::{SelectionEntry, SelectionStore};

/// A selected criterion and the influence it carries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedCriterion<'a> {
    pub criterion_key: &'a str,
    pub influence: f64,
}

/// A selected criterion with its normalized weight, as sent for analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedCriterion {
    pub criterion_key: String,
    pub influence: f64,
    pub weight: f64,
}

impl From<&SelectionEntry> for WeightedCriterion {
    fn from(entry: &SelectionEntry) -> Self {
        Self {
            criterion_key: entry.criterion_key.clone(),
            influence: entry.influence,
            weight: entry.weight,
        }
    }
}

/// Iterator over the selection in catalog order.
///
/// Cheap to clone, so a caller can walk it more than once.
#[derive(Debug, Clone)]
pub struct Selected<'a> {
    inner: std::slice::Iter<'a, SelectionEntry>,
}

impl<'a> Iterator for Selected<'a> {
    type Item = SelectedCriterion<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| SelectedCriterion {
            criterion_key: &entry.criterion_key,
            influence: entry.influence,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Selected<'_> {}

impl SelectionStore {
    /// Influence of a selected category, else its catalog default.
    /// Unknown keys read as 0.
    pub fn influence(&self, key: &str) -> f64 {
        match self.lookup(key) {
            Some(entry) => entry.influence,
            None => self.catalog().default_influence(key).unwrap_or(0.0),
        }
    }

    /// Weight of a selected category, else 0
    pub fn weight(&self, key: &str) -> f64 {
        self.lookup(key).map(|entry| entry.weight).unwrap_or(0.0)
    }

    pub fn selected(&self) -> Selected<'_> {
        Selected {
            inner: self.entries().iter(),
        }
    }

    pub fn weighted(&self) -> Vec<WeightedCriterion> {
        self.entries().iter().map(WeightedCriterion::from).collect()
    }

    /// Sum of the current weights; 0 when nothing is selected
    pub fn total_weight(&self) -> f64 {
        self.entries().iter().map(|entry| entry.weight).sum()
    }
}
