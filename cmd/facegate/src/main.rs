//! facegate - Sybil-resistant face registration gate.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use facegate_embedding::validate;
use facegate_extract::{Extractor, HttpExtractor};
use facegate_registry::list_entries;

use crate::config::Config;

/// Sybil-resistant face registration against an append-only registry.
#[derive(Parser, Debug)]
#[command(name = "facegate")]
#[command(about = "Sybil-resistant face registration against an append-only registry")]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Statistically validate an embedding file
    Validate {
        /// Embedding JSON file (array of floats)
        file: PathBuf,
    },
    /// Check a candidate embedding against all registered faces
    Check {
        /// Embedding JSON file (array of floats)
        file: PathBuf,
        /// Caller identity (wallet address)
        #[arg(short, long)]
        identity: String,
    },
    /// Register an identity with a face embedding
    Register {
        /// Embedding JSON file (array of floats)
        file: PathBuf,
        /// Identity to bind (wallet address)
        #[arg(short, long)]
        identity: String,
        /// Public key material bound with the entry
        #[arg(long, default_value = "")]
        public_key: String,
    },
    /// Extract an embedding from a face image via the configured extractor
    Extract {
        /// Image file
        file: PathBuf,
    },
    /// List registry entries
    Entries,
}

fn read_embedding(path: &PathBuf) -> Result<Vec<f32>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read embedding {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse embedding {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    match args.command {
        Command::Validate { file } => {
            let embedding = read_embedding(&file)?;
            if embedding.len() != cfg.dimension {
                bail!(
                    "embedding has {} entries, configured dimension is {}",
                    embedding.len(),
                    cfg.dimension
                );
            }
            let verdict = validate(&embedding);
            if verdict.is_valid {
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!(
                    "invalid: {}",
                    verdict.reason.unwrap_or_else(|| "unknown".into())
                );
                Ok(ExitCode::FAILURE)
            }
        }

        Command::Check { file, identity } => {
            let embedding = read_embedding(&file)?;
            let verifier = cfg.build_verifier()?;
            let report = verifier.check_uniqueness(&embedding, &identity, None).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(if report.is_unique() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Command::Register {
            file,
            identity,
            public_key,
        } => {
            let embedding = read_embedding(&file)?;
            let verifier = cfg.build_verifier()?;
            let outcome = verifier.register(&identity, &embedding, &public_key).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(match outcome {
                facegate_verify::RegistrationOutcome::Committed { .. } => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }

        Command::Extract { file } => {
            let section = cfg
                .extractor
                .as_ref()
                .context("extractor is not configured")?;
            let image = std::fs::read(&file)
                .with_context(|| format!("read image {}", file.display()))?;
            let extractor =
                HttpExtractor::new(&section.endpoint, &section.api_key, cfg.dimension);
            let embedding = extractor.extract(&image).await?;
            println!("{}", serde_json::to_string(&embedding)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Entries => {
            let registry = cfg.build_registry();
            let enumeration = list_entries(&registry).await?;
            for entry in &enumeration.entries {
                println!("{}", serde_json::to_string(entry)?);
            }
            if enumeration.skipped > 0 {
                tracing::warn!(skipped = enumeration.skipped, "some entries were unreadable");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
