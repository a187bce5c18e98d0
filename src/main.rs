use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use promptrank::analysis::TextAnalyzer;
use promptrank::config::{Config, OutputFormat};
use promptrank::input;
use promptrank::models::ScoringReport;
use promptrank::output;
use promptrank::scoring::ScoringEngine;

/// promptrank: rank AI responses to the same prompt with reproducible text metrics.
///
/// Scores each response for BM25 relevance, ROUGE overlap, cross-response
/// TF-IDF similarity and speed, then blends them into a composite score.
#[derive(Parser)]
#[command(name = "promptrank", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one or more request files ({prompt, responses[]} JSON)
    Score {
        /// Request files to score
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Include the pairwise similarity matrix
        #[arg(long)]
        matrix: bool,

        /// Number of files to score in parallel (default: PROMPTRANK_CONCURRENCY or 4)
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Analyze a single text (use "-" to read stdin)
    Analyze {
        text: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the TF-IDF cosine similarity of two texts
    Similarity { first: String, second: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Structured logging to stderr so JSON on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("promptrank=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Score {
            files,
            json,
            matrix,
            concurrency,
        } => {
            let concurrency = concurrency.unwrap_or(config.concurrency).max(1);
            let json = json || config.output_format == OutputFormat::Json;
            let engine = Arc::new(ScoringEngine::new(TextAnalyzer::with_keyword_limit(
                config.keyword_limit,
            )));

            info!(files = files.len(), concurrency, "Scoring request files");

            let results = score_files(engine, files, matrix, concurrency).await;

            let mut succeeded = 0;
            let mut reports = Vec::new();
            for (path, result) in results {
                match result {
                    Ok(report) => {
                        succeeded += 1;
                        reports.push(report);
                    }
                    Err(e) => {
                        warn!(file = %path.display(), error = %e, "Failed to score request file");
                        eprintln!("{} {}: {:#}", "Skipped".yellow(), path.display(), e);
                    }
                }
            }

            if succeeded == 0 {
                anyhow::bail!("No request file could be scored");
            }

            if json {
                let rendered = if reports.len() == 1 {
                    output::render_json(&reports[0])?
                } else {
                    serde_json::to_string_pretty(&reports)?
                };
                println!("{rendered}");
            } else {
                for report in &reports {
                    output::terminal::display_report(report);
                }
            }
        }

        Commands::Analyze { text, json } => {
            let text = if text == "-" {
                std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
            } else {
                text
            };

            let analyzer = TextAnalyzer::with_keyword_limit(config.keyword_limit);
            let analysis = analyzer.analyze(&text);

            if json || config.output_format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                output::terminal::display_analysis(&analysis);
            }
        }

        Commands::Similarity { first, second } => {
            let analyzer = TextAnalyzer::with_keyword_limit(config.keyword_limit);
            let similarity = analyzer.similarity(&first, &second);
            println!("{similarity:.4}");
        }
    }

    Ok(())
}

/// Score request files in parallel on the blocking pool, returning results in input order.
///
/// Each file is an independent scoring call; the engine is shared read-only.
async fn score_files(
    engine: Arc<ScoringEngine>,
    files: Vec<PathBuf>,
    include_matrix: bool,
    concurrency: usize,
) -> Vec<(PathBuf, Result<ScoringReport>)> {
    let mut results: Vec<(usize, PathBuf, Result<ScoringReport>)> =
        stream::iter(files.into_iter().enumerate().map(|(index, path)| {
            let engine = Arc::clone(&engine);
            async move {
                let task_path = path.clone();
                let result = tokio::task::spawn_blocking(move || -> Result<ScoringReport> {
                    let request = input::load_request(&task_path)?;
                    Ok(engine.evaluate(&request, include_matrix))
                })
                .await
                .map_err(anyhow::Error::from)
                .and_then(|r| r);
                (index, path, result)
            }
        }))
        .buffer_unordered(concurrency)
        .collect()
        .await;

    results.sort_by_key(|(index, ..)| *index);
    results
        .into_iter()
        .map(|(_, path, result)| (path, result))
        .collect()
}
