//! `siting init`: write a project config file.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::catalog::CatalogSource;
use crate::config::{Config, Strictness};
use crate::selection::normalizer::{MAX_DECIMALS, MIN_DECIMALS};
use crate::selection::RoundingMode;

/// Options for the init command
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Config file to write
    pub config: PathBuf,
    /// Force overwrite existing config
    pub force: bool,
    /// Treat unknown criterion keys as errors
    pub strict: bool,
    /// Weight decimal places
    pub decimals: Option<u32>,
    /// Fold the rounding remainder into the heaviest weight
    pub absorb_remainder: bool,
    /// Region catalog source (builtin, path or URL)
    pub region_catalog: Option<String>,
    /// Drain catalog source (builtin, path or URL)
    pub drain_catalog: Option<String>,
    /// Skip interactive prompts
    pub yes: bool,
}

/// Execute the init command
pub fn execute_init(options: InitOptions) -> Result<()> {
    if options.config.exists() && !options.force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            options.config.display()
        );
    }

    let mut config = Config::default();

    let interactive = !options.yes
        && !options.strict
        && !options.absorb_remainder
        && options.decimals.is_none()
        && options.region_catalog.is_none()
        && options.drain_catalog.is_none();

    if interactive {
        run_interactive_init(&mut config)?;
    } else {
        apply_cli_options(&mut config, &options);
    }
    config.validate()?;

    config
        .save(&options.config)
        .with_context(|| format!("Failed to write {}", options.config.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        options.config.display()
    );

    println!("\n{}", style("Next steps:").bold());
    println!(
        "  1. Run {} to review the available criteria",
        style("siting catalog").cyan()
    );
    println!(
        "  2. Run {} to preview weights",
        style("siting weigh --all").cyan()
    );

    Ok(())
}

fn run_interactive_init(config: &mut Config) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("{} Project Setup\n", style("→").cyan());

    let strict = Confirm::with_theme(&theme)
        .with_prompt("Reject unknown criterion keys instead of ignoring them?")
        .default(false)
        .interact()?;
    config.error_handling.strictness = if strict {
        Strictness::Strict
    } else {
        Strictness::Permissive
    };

    config.weights.decimals = Input::<u32>::with_theme(&theme)
        .with_prompt(format!(
            "Weight decimal places ({}-{})",
            MIN_DECIMALS, MAX_DECIMALS
        ))
        .default(config.weights.decimals)
        .interact_text()?;

    let rounding_modes = [
        "Round each weight (sum may drift slightly)",
        "Absorb remainder (sum is exactly 1)",
    ];
    let choice = Select::with_theme(&theme)
        .with_prompt("Rounding policy")
        .items(&rounding_modes)
        .default(0)
        .interact()?;
    config.weights.mode = match choice {
        1 => RoundingMode::AbsorbRemainder,
        _ => RoundingMode::Round,
    };

    let custom_catalogs = Confirm::with_theme(&theme)
        .with_prompt("Load catalogs from a file or URL instead of the built-in ones?")
        .default(false)
        .interact()?;

    if custom_catalogs {
        let region: String = Input::with_theme(&theme)
            .with_prompt("Region catalog")
            .default("builtin".to_string())
            .interact_text()?;
        let drain: String = Input::with_theme(&theme)
            .with_prompt("Drain catalog")
            .default("builtin".to_string())
            .interact_text()?;
        config.catalogs.region = CatalogSource::from(region);
        config.catalogs.drain = CatalogSource::from(drain);
    }

    Ok(())
}

fn apply_cli_options(config: &mut Config, options: &InitOptions) {
    if options.strict {
        config.error_handling.strictness = Strictness::Strict;
    }
    if let Some(decimals) = options.decimals {
        config.weights.decimals = decimals;
    }
    if options.absorb_remainder {
        config.weights.mode = RoundingMode::AbsorbRemainder;
    }
    if let Some(ref source) = options.region_catalog {
        config.catalogs.region = CatalogSource::from(source.clone());
    }
    if let Some(ref source) = options.drain_catalog {
        config.catalogs.drain = CatalogSource::from(source.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_cli_options() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("siting.json");
        let options = InitOptions {
            config: path.clone(),
            strict: true,
            decimals: Some(6),
            drain_catalog: Some("drain.yaml".to_string()),
            yes: true,
            ..Default::default()
        };

        execute_init(options).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.error_handling.strictness, Strictness::Strict);
        assert_eq!(config.weights.decimals, 6);
        assert_eq!(
            config.catalogs.drain,
            CatalogSource::File(PathBuf::from("drain.yaml"))
        );
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("siting.json");
        std::fs::write(&path, "{}").unwrap();

        let options = InitOptions {
            config: path,
            yes: true,
            ..Default::default()
        };
        assert!(execute_init(options).is_err());
    }

    #[test]
    fn test_init_rejects_coarse_precision() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("siting.json");
        let options = InitOptions {
            config: path.clone(),
            decimals: Some(0),
            yes: true,
            ..Default::default()
        };

        assert!(execute_init(options).is_err());
        assert!(!path.exists());
    }
}
