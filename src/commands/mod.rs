//! CLI command implementations.
//!
//! Each command is in its own submodule and exposes an options struct plus
//! an `execute_*` entry point.

pub mod catalog;
pub mod init;
pub mod validate;
pub mod weigh;

pub use catalog::{execute_catalog, CatalogOptions};
pub use init::{execute_init, InitOptions};
pub use validate::{execute_validate, ValidateOptions};
pub use weigh::{build_selection, execute_weigh, parse_assignment, WeighOptions};
