#![forbid(unsafe_code)]

//! # STP Siting
//!
//! Criterion selection and influence weighting for wastewater treatment
//! plant siting and priority analysis.
//!
//! ## Features
//!
//! - **Catalogs**: Built-in region and drain criteria, or load from file/URL
//! - **Selection**: Toggle criteria, adjust influences clamped to `[0, 100]`
//! - **Weighting**: `influence / total`, equal split when every influence is zero
//! - **Isolation**: Independent stores per analysis mode
//!
//! ## Example
//!
//! ```rust,no_run
//! use siting::{Config, SelectionMode, Workspace};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut workspace = Workspace::from_config(&Config::default())?;
//!     workspace.switch_mode(SelectionMode::Drain);
//!
//!     let store = workspace.active_mut();
//!     store.select_all();
//!     store.set_influence("STP_Drain_Flow_Rate_Raster", 10.0)?;
//!
//!     let payload = workspace.submit()?;
//!     println!("{}", payload.to_json()?);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod mode;
pub mod selection;
pub mod submission;
pub mod workspace;

// Re-exports
pub use catalog::{
    load_catalog, BuiltinCatalog, Catalog, CatalogOverrides, CatalogProvider, CatalogSource,
    Category, FileCatalog, HttpCatalog,
};
pub use config::{Config, Strictness};
pub use error::{Result, SitingError};
pub use mode::SelectionMode;
pub use selection::{
    compute_weights, RoundingMode, SelectedCriterion, SelectionPolicy, SelectionStore, Toggled,
    WeightRounding, WeightedCriterion,
};
pub use submission::SubmissionPayload;
pub use workspace::Workspace;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
