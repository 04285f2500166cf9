//! ftkit - command-line inference over trained fastText models.
//!
//! # Usage
//!
//! ```bash
//! # Validate a model header
//! ftkit check model.bin
//!
//! # Classify lines from a file (or stdin with -)
//! ftkit --model model.bin predict test.txt -k 3
//! echo "the quick fox" | ftkit --model model.bin predict-prob - -k 2 -t 0.5
//!
//! # Precision/recall at k
//! ftkit --model model.bin test valid.txt -k 1
//!
//! # Vectors
//! echo "fox" | ftkit --model model.bin print-word-vectors
//! ftkit --model model.bin print-ngrams fox --json
//! ```

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Inference over trained fastText models.
#[derive(Parser)]
#[command(name = "ftkit", version, about)]
struct Cli {
    /// Model file (default: $FTKIT_MODEL, then model.bin in the data directory)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether a file is a loadable fastText model
    Check {
        /// File to check (default: the resolved model)
        path: Option<PathBuf>,
    },
    /// Predict the most likely labels for each input line
    Predict {
        /// Input file, or - for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Number of labels per line
        #[arg(short, default_value = "1")]
        k: i32,
        /// Minimum probability
        #[arg(short, long, default_value = "0.0")]
        threshold: f32,
    },
    /// Like predict, with probabilities
    PredictProb {
        #[arg(default_value = "-")]
        input: String,
        #[arg(short, default_value = "1")]
        k: i32,
        #[arg(short, long, default_value = "0.0")]
        threshold: f32,
    },
    /// Precision and recall at k over a labeled file
    Test {
        input: PathBuf,
        #[arg(short, default_value = "1")]
        k: usize,
    },
    /// Vector of every word read from stdin
    PrintWordVectors,
    /// Vector of every line read from stdin
    PrintSentenceVectors,
    /// Character n-grams of a word and their vectors
    PrintNgrams { word: String },
    /// Print model internals
    Dump {
        #[arg(value_enum)]
        what: DumpTarget,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DumpTarget {
    Args,
    Dict,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let output = match &cli.command {
        Command::Check { path } => {
            let path = match path {
                Some(path) => path.clone(),
                None => config::model_path(cli.model.as_deref())?,
            };
            let valid = ftkit_core::FastTextApi::check_model(&path);
            let text = output::format_check(&path.display().to_string(), valid, cli.json);
            println!("{}", text);
            if !valid {
                std::process::exit(1);
            }
            return Ok(());
        }
        Command::Predict {
            input,
            k,
            threshold,
        }
        | Command::PredictProb {
            input,
            k,
            threshold,
        } => {
            let api = load(&cli)?;
            let results = commands::predict(&api, commands::open_input(input)?, *k, *threshold)?;
            let with_prob = matches!(cli.command, Command::PredictProb { .. });
            output::format_predictions(&results, with_prob, cli.json)
        }
        Command::Test { input, k } => {
            let api = load(&cli)?;
            let metrics = api.test(input, *k)?;
            output::format_metrics(&metrics, cli.json)
        }
        Command::PrintWordVectors => {
            let api = load(&cli)?;
            let rows = commands::word_vectors(&api, commands::open_input("-")?)?;
            output::format_vectors(&rows, cli.json)
        }
        Command::PrintSentenceVectors => {
            let api = load(&cli)?;
            let rows = commands::sentence_vectors(&api, commands::open_input("-")?)?;
            output::format_sentence_vectors(&rows, cli.json)
        }
        Command::PrintNgrams { word } => {
            let api = load(&cli)?;
            let rows = commands::ngrams(&api, word)?;
            output::format_vectors(&rows, cli.json)
        }
        Command::Dump { what } => {
            let api = load(&cli)?;
            match what {
                DumpTarget::Args => output::format_args(&*api.args()?, cli.json),
                DumpTarget::Dict => output::format_dictionary(&commands::dictionary(&api)?, cli.json),
            }
        }
    };

    println!("{}", output);
    Ok(())
}

fn load(cli: &Cli) -> Result<ftkit_core::FastTextApi> {
    let path = config::model_path(cli.model.as_deref())?;
    commands::load_model(&path)
}
