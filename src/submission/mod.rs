//! The weighted criteria list handed to the analysis service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SitingError};
use crate::mode::SelectionMode;
use crate::selection::{SelectionStore, WeightedCriterion};

/// Snapshot of a selection ready to send downstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub request_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub mode: SelectionMode,
    /// Catalog the criterion keys belong to
    pub catalog: String,
    /// Selected criteria in catalog order
    pub criteria: Vec<WeightedCriterion>,
}

impl SubmissionPayload {
    /// Snapshot a store. An empty selection cannot be submitted.
    pub fn from_store(mode: SelectionMode, store: &SelectionStore) -> Result<Self> {
        if store.is_empty() {
            return Err(SitingError::EmptySelection);
        }

        Ok(Self {
            request_id: Uuid::new_v4(),
            created_at: Utc::now(),
            mode,
            catalog: store.catalog().name().to_string(),
            criteria: store.weighted(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn total_weight(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight).sum()
    }
}
