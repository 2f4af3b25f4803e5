//! Category catalogs: the static list of criteria a user can select.

pub mod loader;
pub mod provider;
pub mod types;

pub use loader::{apply_overrides, load_catalog, CatalogOverrides};
pub use provider::{BuiltinCatalog, CatalogProvider, CatalogSource, FileCatalog, HttpCatalog};
pub use types::{Catalog, CatalogDocument, Category, InfluenceValue, MAX_INFLUENCE, MIN_INFLUENCE};
