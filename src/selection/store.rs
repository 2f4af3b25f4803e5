//! The selection store: which categories are selected and at what influence.

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{Catalog, MAX_INFLUENCE, MIN_INFLUENCE};
use crate::config::Strictness;
use crate::error::{Result, SitingError};

use super::normalizer::{normalize, WeightRounding};

/// Behavior knobs for a store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Permissive ignores unknown criterion keys, strict reports them
    pub unknown_keys: Strictness,
    pub rounding: WeightRounding,
}

/// Outcome of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Selected,
    Deselected,
    /// Key not in the catalog; nothing changed
    Ignored,
}

/// One selected category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEntry {
    pub criterion_key: String,
    pub influence: f64,
    /// Derived from every influence in the store
    pub weight: f64,
    #[serde(skip)]
    slot: usize,
}

/// Clamp an influence into `[0, 100]`. `NaN` has no meaningful clamp and
/// yields `None`.
pub fn clamp_influence(value: f64) -> Option<f64> {
    (!value.is_nan()).then(|| value.clamp(MIN_INFLUENCE, MAX_INFLUENCE))
}

/// Selected categories and their influences for one catalog.
///
/// Entries are kept in catalog declaration order regardless of the order
/// they were selected in, and weights are recomputed over the whole set
/// after every mutation.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    catalog: Arc<Catalog>,
    policy: SelectionPolicy,
    entries: Vec<SelectionEntry>,
}

impl SelectionStore {
    pub fn new(catalog: Arc<Catalog>, policy: SelectionPolicy) -> Self {
        Self {
            catalog,
            policy,
            entries: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Current entries in catalog order
    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    /// Select the category, seeded with its catalog default, or deselect it if
    /// already selected. Re-selecting always starts from the default; a custom
    /// influence set before deselection is not remembered.
    pub fn toggle(&mut self, key: &str) -> Result<Toggled> {
        let Some(slot) = self.catalog.position(key) else {
            self.unknown_key(key, "toggle")?;
            return Ok(Toggled::Ignored);
        };

        let outcome = match self.find(slot) {
            Ok(index) => {
                self.entries.remove(index);
                Toggled::Deselected
            }
            Err(index) => {
                let entry = self.entry(slot, self.catalog.default_at(slot));
                self.entries.insert(index, entry);
                Toggled::Selected
            }
        };

        tracing::debug!("{} {:?} in '{}'", key, outcome, self.catalog.name());
        self.recompute();
        Ok(outcome)
    }

    /// Set a category's influence, clamped to `[0, 100]`.
    ///
    /// Selects the category if it was not selected. `NaN` is ignored.
    pub fn set_influence(&mut self, key: &str, value: f64) -> Result<()> {
        let Some(slot) = self.catalog.position(key) else {
            return self.unknown_key(key, "set influence");
        };
        let Some(influence) = clamp_influence(value) else {
            tracing::warn!("Ignoring NaN influence for {}", key);
            return Ok(());
        };

        match self.find(slot) {
            Ok(index) => self.entries[index].influence = influence,
            Err(index) => {
                tracing::debug!("{} implicitly selected by influence change", key);
                let entry = self.entry(slot, influence);
                self.entries.insert(index, entry);
            }
        }

        self.recompute();
        Ok(())
    }

    /// Replace the selection with every catalog category at its default
    pub fn select_all(&mut self) {
        self.entries = (0..self.catalog.len())
            .map(|slot| self.entry(slot, self.catalog.default_at(slot)))
            .collect();
        self.recompute();
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.catalog
            .position(key)
            .is_some_and(|slot| self.find(slot).is_ok())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(super) fn lookup(&self, key: &str) -> Option<&SelectionEntry> {
        let slot = self.catalog.position(key)?;
        self.find(slot).ok().map(|index| &self.entries[index])
    }

    fn find(&self, slot: usize) -> std::result::Result<usize, usize> {
        self.entries.binary_search_by_key(&slot, |e| e.slot)
    }

    fn entry(&self, slot: usize, influence: f64) -> SelectionEntry {
        SelectionEntry {
            criterion_key: self.catalog.key_at(slot).to_string(),
            influence,
            weight: 0.0,
            slot,
        }
    }

    fn unknown_key(&self, key: &str, operation: &str) -> Result<()> {
        match self.policy.unknown_keys {
            Strictness::Permissive => {
                tracing::warn!(
                    "Cannot {} for unknown category {} in '{}'",
                    operation,
                    key,
                    self.catalog.name()
                );
                Ok(())
            }
            Strictness::Strict => Err(SitingError::UnknownCategory(key.to_string())),
        }
    }

    fn recompute(&mut self) {
        let pairs: Vec<(&str, f64)> = self
            .entries
            .iter()
            .map(|e| (e.criterion_key.as_str(), e.influence))
            .collect();
        let weights: Vec<f64> = normalize(&pairs, self.policy.rounding)
            .into_iter()
            .map(|(_, _, weight)| weight)
            .collect();
        for (entry, weight) in self.entries.iter_mut().zip(weights) {
            entry.weight = weight;
        }
    }
}
