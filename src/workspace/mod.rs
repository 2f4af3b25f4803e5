//! Application-level selection state for both analysis modes.
//!
//! The workspace owns one store per mode. The stores never share state, and
//! switching mode wipes both so a half-built selection cannot leak across.

use std::sync::Arc;

use crate::catalog::{load_catalog, Catalog};
use crate::config::Config;
use crate::error::Result;
use crate::mode::SelectionMode;
use crate::selection::{SelectionPolicy, SelectionStore};
use crate::submission::SubmissionPayload;

#[derive(Debug, Clone)]
pub struct Workspace {
    mode: SelectionMode,
    region: SelectionStore,
    drain: SelectionStore,
    processing: bool,
}

impl Workspace {
    /// Start in region mode with nothing selected
    pub fn new(region: Arc<Catalog>, drain: Arc<Catalog>, policy: SelectionPolicy) -> Self {
        Self {
            mode: SelectionMode::default(),
            region: SelectionStore::new(region, policy),
            drain: SelectionStore::new(drain, policy),
            processing: false,
        }
    }

    /// Resolve both catalogs as configured and build an empty workspace
    pub fn from_config(config: &Config) -> Result<Self> {
        let region = load_catalog(
            config.catalog_source(SelectionMode::Region),
            SelectionMode::Region,
            config.catalog_overrides(SelectionMode::Region),
        )?;
        let drain = load_catalog(
            config.catalog_source(SelectionMode::Drain),
            SelectionMode::Drain,
            config.catalog_overrides(SelectionMode::Drain),
        )?;

        Ok(Self::new(
            Arc::new(region),
            Arc::new(drain),
            config.selection_policy(),
        ))
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Activate another mode, clearing both selections first.
    ///
    /// Returns false if `mode` was already active; nothing is cleared then.
    pub fn switch_mode(&mut self, mode: SelectionMode) -> bool {
        if mode == self.mode {
            return false;
        }

        self.reset();
        self.mode = mode;
        tracing::info!("Switched to {} mode, all selections reset", mode.label());
        true
    }

    pub fn active(&self) -> &SelectionStore {
        self.store(self.mode)
    }

    pub fn active_mut(&mut self) -> &mut SelectionStore {
        self.store_mut(self.mode)
    }

    pub fn store(&self, mode: SelectionMode) -> &SelectionStore {
        match mode {
            SelectionMode::Region => &self.region,
            SelectionMode::Drain => &self.drain,
        }
    }

    pub fn store_mut(&mut self, mode: SelectionMode) -> &mut SelectionStore {
        match mode {
            SelectionMode::Region => &mut self.region,
            SelectionMode::Drain => &mut self.drain,
        }
    }

    /// True once a submission has been handed off and until the next reset
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Snapshot the active selection for analysis
    pub fn submit(&mut self) -> Result<SubmissionPayload> {
        let payload = SubmissionPayload::from_store(self.mode, self.active())?;
        self.processing = true;
        tracing::info!(
            "Submitting {} criteria for {} analysis ({})",
            payload.criteria.len(),
            self.mode,
            payload.request_id
        );
        Ok(payload)
    }

    /// Clear both selections and the processing flag
    pub fn reset(&mut self) {
        self.region.clear_all();
        self.drain.clear_all();
        self.processing = false;
    }
}
