//! `siting catalog`: list the criteria available in a mode.

use anyhow::{Context, Result};
use console::style;

use crate::catalog::{load_catalog, Catalog};
use crate::config::Config;
use crate::mode::SelectionMode;

/// Options for the catalog command
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub mode: SelectionMode,
    /// Print the catalog document as JSON
    pub json: bool,
}

/// Execute the catalog command
pub fn execute_catalog(options: CatalogOptions, config: &Config) -> Result<()> {
    let catalog = load_catalog(
        config.catalog_source(options.mode),
        options.mode,
        config.catalog_overrides(options.mode),
    )
    .with_context(|| format!("Failed to load {} catalog", options.mode))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&catalog.to_document())?);
        return Ok(());
    }

    print_catalog(&catalog, options.mode);
    Ok(())
}

fn print_catalog(catalog: &Catalog, mode: SelectionMode) {
    println!(
        "{} categories ({}):\n",
        style(mode.label()).bold(),
        catalog.len()
    );

    for category in catalog.categories() {
        let default = catalog
            .default_influence(&category.criterion_key)
            .unwrap_or_default();
        println!(
            "  {:>2}. {:45} {:>6.2}  {}",
            category.id,
            category.name,
            default,
            style(&category.criterion_key).dim()
        );
    }
}
