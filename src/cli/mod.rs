//! Command-line interface for verhul.
//!
//! Provides commands for anonymizing text, inspecting detections, and
//! showing the resolved configuration.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::core::Anonymizer;

/// verhul - Dutch PII detection and anonymization
#[derive(Parser, Debug)]
#[command(name = "verhul")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (falls back to VERHUL_CONFIG, then .verhul/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize text and print the rewritten result
    Anonymize {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Detect PII and print the resolved spans without rewriting
    Detect {
        /// Input file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print detections as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;

        match self.command {
            Commands::Anonymize { input } => {
                let engine = Anonymizer::from_config(&config)?;
                let text = read_input(input.as_deref())?;
                let result = engine.anonymize(&text).await;
                println!("{}", result.text);
            }

            Commands::Detect { input, json } => {
                let engine = Anonymizer::from_config(&config)?;
                let text = read_input(input.as_deref())?;
                let analysis = engine.analyze(&text).await;

                if json {
                    println!("{}", serde_json::to_string_pretty(&analysis.spans)?);
                } else {
                    for span in &analysis.spans {
                        println!(
                            "{}\t{}..{}\t{:.2}\t{}",
                            span.kind,
                            span.start,
                            span.end,
                            span.score,
                            &analysis.text[span.start..span.end]
                        );
                    }
                }
            }

            Commands::Config => {
                println!("{config:#?}");
            }
        }

        Ok(())
    }
}

/// Read input from a file or stdin.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file: {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read from stdin")?;
            Ok(buffer)
        }
    }
}
