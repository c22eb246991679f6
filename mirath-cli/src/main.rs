//! mirath: command-line front end for the inheritance share engine
//!
//! Loads a case file (or builds a roster from head counts), runs the
//! engine and prints the distribution as a table, JSON or YAML.
//! Logs go to stderr; stdout carries only the report.

mod case;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};

use mirath::{EngineConfig, HeirCountArg, HeirCounts, Locale, RosterBuilder, ShareEngine};

use case::CaseFile;
use render::Format;

#[derive(Parser)]
#[command(name = "mirath")]
#[command(about = "Islamic inheritance (faraid) share calculator")]
struct Cli {
    /// Engine configuration file (YAML)
    #[arg(short, long, global = true, env = "MIRATH_CONFIG")]
    config: Option<PathBuf>,

    /// Label language (overrides config file)
    #[arg(short, long, global = true, value_parser = parse_locale)]
    locale: Option<Locale>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute shares for a case file
    Compute {
        /// Case file (YAML, or JSON with a .json extension)
        case_file: PathBuf,
    },

    /// Compute shares from head counts
    Quick {
        /// Net estate
        #[arg(short, long)]
        estate: Decimal,

        /// Heir as REL or REL=COUNT, repeatable (e.g. --heir wife --heir son=2)
        #[arg(long = "heir", required = true)]
        heirs: Vec<HeirCountArg>,
    },

    /// List accepted relationship codes
    Relationships,
}

fn parse_locale(value: &str) -> Result<Locale, String> {
    match value.to_lowercase().as_str() {
        "arabic" | "ar" => Ok(Locale::Arabic),
        "english" | "en" => Ok(Locale::English),
        other => Err(format!("unknown locale '{}' (expected arabic or english)", other)),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            EngineConfig::from_yaml(&content)?
        }
        None => {
            debug!("No config file given, using defaults");
            EngineConfig::default()
        }
    };

    // Apply CLI overrides
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mirath=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let locale = config.locale;

    let output = match &cli.command {
        Commands::Compute { case_file } => {
            info!("Case file: {}", case_file.display());
            let case = CaseFile::load(case_file)?;
            let net_estate = case.net_estate()?;
            let heirs = case.roster(locale)?;

            let engine = ShareEngine::with_config(config)?;
            let dist = engine.compute(net_estate, &heirs)?;
            render::render(&dist, &heirs, case.reference.as_deref(), cli.format, locale)?
        }

        Commands::Quick { estate, heirs } => {
            let counts: HeirCounts = heirs
                .iter()
                .map(|arg| (arg.relationship, arg.count))
                .collect();
            let roster = RosterBuilder::new(locale).add_counts(&counts).build();

            let engine = ShareEngine::with_config(config)?;
            let dist = engine.compute(*estate, &roster)?;
            render::render(&dist, &roster, None, cli.format, locale)?
        }

        Commands::Relationships => render::format_relationships(),
    };

    print!("{}", output);
    Ok(())
}
