//! Category selection, influence weighting and read accessors.
//!
//! A [`SelectionStore`] is built per catalog. Toggling a category or moving
//! its influence recomputes every weight as `influence / total`, with an
//! equal split when all influences are zero.

pub mod normalizer;
pub mod query;
pub mod store;

pub use normalizer::{compute_weights, normalize, RoundingMode, WeightRounding};
pub use query::{Selected, SelectedCriterion, WeightedCriterion};
pub use store::{clamp_influence, SelectionEntry, SelectionPolicy, SelectionStore, Toggled};
