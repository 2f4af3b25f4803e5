#![forbid(unsafe_code)]
//! STP Siting Command Line Interface

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use siting::commands::{
    execute_catalog, execute_init, execute_validate, execute_weigh, CatalogOptions, InitOptions,
    ValidateOptions, WeighOptions,
};
use siting::config::CONFIG_FILE;
use siting::{Config, SelectionMode};

#[derive(Parser)]
#[command(name = "siting")]
#[command(about = "Criterion selection and influence weighting for STP siting analysis")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = CONFIG_FILE, env = "SITING_CONFIG")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,

        /// Treat unknown criterion keys as errors
        #[arg(long)]
        strict: bool,

        /// Weight decimal places (4-12)
        #[arg(long, value_parser = clap::value_parser!(u32).range(4..=12))]
        decimals: Option<u32>,

        /// Fold the rounding remainder into the heaviest weight
        #[arg(long)]
        absorb_remainder: bool,

        /// Region catalog source (builtin, file path or URL)
        #[arg(long)]
        region_catalog: Option<String>,

        /// Drain catalog source (builtin, file path or URL)
        #[arg(long)]
        drain_catalog: Option<String>,

        /// Skip interactive prompts (use defaults + CLI args)
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List the categories of a mode
    Catalog {
        /// Analysis mode
        #[arg(short, long, value_enum, default_value = "region")]
        mode: ModeArg,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Select categories, set influences and show the weights
    Weigh {
        /// Analysis mode
        #[arg(short, long, value_enum, default_value = "region")]
        mode: ModeArg,

        /// Select every category at its default influence first
        #[arg(long)]
        all: bool,

        /// Toggle a category (can specify multiple)
        #[arg(short, long = "toggle", value_name = "KEY")]
        toggles: Vec<String>,

        /// Set an influence, selecting the category if needed (can specify multiple)
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        sets: Vec<String>,

        /// Print the submission payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a catalog file
    Validate {
        /// Catalog file (JSON or YAML)
        file: PathBuf,
    },
}

/// Analysis mode argument
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
enum ModeArg {
    #[default]
    Region,
    Drain,
}

impl From<ModeArg> for SelectionMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Region => SelectionMode::Region,
            ModeArg::Drain => SelectionMode::Drain,
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("siting=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    Config::load_or_default(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init {
            force,
            strict,
            decimals,
            absorb_remainder,
            region_catalog,
            drain_catalog,
            yes,
        } => {
            let options = InitOptions {
                config: cli.config,
                force,
                strict,
                decimals,
                absorb_remainder,
                region_catalog,
                drain_catalog,
                yes,
            };
            execute_init(options)
        }

        Commands::Catalog { mode, json } => {
            let options = CatalogOptions {
                mode: mode.into(),
                json,
            };
            load_config(&cli.config).and_then(|config| execute_catalog(options, &config))
        }

        Commands::Weigh {
            mode,
            all,
            toggles,
            sets,
            json,
        } => {
            let options = WeighOptions {
                mode: mode.into(),
                all,
                toggles,
                sets,
                json,
            };
            load_config(&cli.config).and_then(|config| execute_weigh(options, &config))
        }

        Commands::Validate { file } => execute_validate(ValidateOptions { file }),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("✗").red(), e);
        std::process::exit(1);
    }

    Ok(())
}
