//! `siting validate`: check a catalog file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::catalog::{CatalogProvider, FileCatalog};

/// Options for the validate command
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    /// Catalog file to validate (JSON or YAML)
    pub file: PathBuf,
}

/// Execute the validate command
pub fn execute_validate(options: ValidateOptions) -> Result<()> {
    let catalog = FileCatalog::new(&options.file)
        .load()
        .with_context(|| format!("{} is not a valid catalog", options.file.display()))?;

    println!(
        "{} Catalog '{}' is valid",
        style("✓").green(),
        catalog.name()
    );
    println!("  Categories: {}", catalog.len());

    Ok(())
}
