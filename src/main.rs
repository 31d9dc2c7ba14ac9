//! flashcard-csv CLI - flashcard export converter

use clap::{Parser, Subcommand};
use flashcard_csv::{OutputMode, Pipeline};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

/// Convert flashcard exports into two-column CSV.
///
/// Every output line holds exactly two double-quoted fields, term and
/// definition, with interior quotes doubled.
#[derive(Parser, Debug)]
#[command(name = "flashcard-csv")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log per-file diagnostics to stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rewrite Quizlet tab-separated .csv exports in place
    Quizlet {
        /// A .csv file or a directory of .csv files
        target: PathBuf,
    },
    /// Convert TERM=DEFINITION .txt files to CSV
    Txt {
        /// A .txt file or a directory of .txt files
        target: PathBuf,

        /// Directory for per-file CSV outputs (default: next to each source)
        #[arg(short = 'o', long)]
        output_dir: Option<PathBuf>,

        /// Write all cards into this single CSV file
        #[arg(long)]
        combined: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(args.verbose);

    let (pipeline, target) = build_pipeline(args.command);

    match pipeline.run(&target) {
        Ok(reports) => {
            for report in &reports {
                println!("{report}");
            }
            let failures = reports.iter().filter(|r| r.outcome.is_failure()).count();
            if failures > 0 {
                tracing::debug!("{failures} of {} reports failed", reports.len());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("✖ {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_pipeline(command: Command) -> (Pipeline, PathBuf) {
    match command {
        Command::Quizlet { target } => (Pipeline::tab_source(), target),
        Command::Txt {
            target,
            output_dir,
            combined,
        } => {
            let mut pipeline = Pipeline::equals_source();

            match (combined, output_dir) {
                (Some(combined), output_dir) => {
                    if output_dir.is_some() {
                        tracing::warn!("--combined ignores --output-dir (writing one file)");
                    }
                    pipeline.output_mode(OutputMode::Combined(combined));
                }
                (None, Some(dir)) => {
                    pipeline.output_mode(OutputMode::Directory(dir));
                }
                (None, None) => {}
            }

            (pipeline, target)
        }
    }
}
