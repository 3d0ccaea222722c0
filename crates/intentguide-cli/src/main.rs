mod config;
mod service;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crate::config::{Config, OutputFormat};
use crate::service::GuideService;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;

/// Route App Intents questions to the reference documents that answer them.
#[derive(Parser)]
#[command(name = "intentguide", version, about)]
struct Cli {
    /// Extra config file layered over the global and local ones
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (overrides the configured one)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List routing topics
    Topics,
    /// List reference documents
    Docs,
    /// Show the documents to read for a topic, most relevant first
    Lookup {
        /// Topic identifier, e.g. first-intent
        topic: String,
    },
    /// Print a reference document from the corpus
    Show {
        /// Document identifier, e.g. intent-fundamentals
        doc: String,
    },
    /// Print a checklist (app-intent or app-entity)
    Checklist {
        /// Checklist identifier
        kind: String,
    },
    /// Print the routing table as an LLM system prompt
    Prompt,
    /// Check the routing table and the corpus on disk
    Verify,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    intentguide_logging::init_logging(&config.logging.level)?;
    for warning in config.warnings.drain(..) {
        warn!("{}", warning);
    }

    let service = GuideService::new(config);
    service.run(
        &cli.command,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}
