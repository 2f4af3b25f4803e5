//! `siting weigh`: apply selection operations and show the resulting weights.
//!
//! Operations run in a fixed order: select-all, then toggles, then
//! influence assignments, each group in the order given.

use anyhow::{anyhow, Context, Result};
use console::style;

use crate::config::Config;
use crate::mode::SelectionMode;
use crate::selection::SelectionStore;
use crate::workspace::Workspace;

/// Options for the weigh command
#[derive(Debug, Clone, Default)]
pub struct WeighOptions {
    pub mode: SelectionMode,
    /// Start from every category at its default influence
    pub all: bool,
    /// Criterion keys to toggle
    pub toggles: Vec<String>,
    /// `KEY=VALUE` influence assignments
    pub sets: Vec<String>,
    /// Print the submission payload as JSON
    pub json: bool,
}

/// Execute the weigh command
pub fn execute_weigh(options: WeighOptions, config: &Config) -> Result<()> {
    let mut workspace = build_selection(&options, config)?;

    if options.json {
        let payload = workspace.submit()?;
        println!("{}", payload.to_json()?);
        return Ok(());
    }

    print_weights(workspace.active(), options.mode);
    Ok(())
}

/// Build a workspace and replay the requested operations on it
pub fn build_selection(options: &WeighOptions, config: &Config) -> Result<Workspace> {
    let assignments = options
        .sets
        .iter()
        .map(|s| parse_assignment(s))
        .collect::<Result<Vec<_>>>()?;

    let mut workspace = Workspace::from_config(config).context("Failed to load catalogs")?;
    workspace.switch_mode(options.mode);
    let store = workspace.active_mut();

    if options.all {
        store.select_all();
    }
    for key in &options.toggles {
        store.toggle(key)?;
    }
    for (key, value) in assignments {
        store.set_influence(&key, value)?;
    }

    Ok(workspace)
}

/// Parse `KEY=VALUE` into a key and a finite influence
pub fn parse_assignment(text: &str) -> Result<(String, f64)> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected KEY=VALUE, got '{}'", text))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow!("Missing criterion key in '{}'", text));
    }

    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid influence '{}' for {}", value.trim(), key))?;
    if !value.is_finite() {
        return Err(anyhow!("Influence for {} must be a finite number", key));
    }

    Ok((key.to_string(), value))
}

fn print_weights(store: &SelectionStore, mode: SelectionMode) {
    if store.is_empty() {
        println!(
            "{} No {} categories selected",
            style("!").yellow(),
            mode
        );
        return;
    }

    println!("{} influences:\n", style(mode.label()).bold());
    let catalog = store.catalog();
    for criterion in store.selected() {
        let name = catalog
            .get(criterion.criterion_key)
            .map(|c| c.name.as_str())
            .unwrap_or(criterion.criterion_key);
        let weight = store.weight(criterion.criterion_key);
        println!(
            "  {:45} {:>7.2}  {:>7.2}%  {}",
            name,
            criterion.influence,
            weight * 100.0,
            bar(weight)
        );
    }

    println!(
        "\n  {:45} {:>7}  {:>7.2}%",
        style("Total").bold(),
        "",
        store.total_weight() * 100.0
    );
}

fn bar(weight: f64) -> String {
    let width = (weight * 30.0).round() as usize;
    style("█".repeat(width)).cyan().to_string()
}
