//! # webwords CLI (`ww`)
//!
//! Highlights the vocabulary of a text page by learning status and keeps
//! the statuses in a Fieldbook sheet.
//!
//! ## Usage
//!
//! ```bash
//! ww --config ./config/ww.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `ww check` | Show Fieldbook settings and whether credentials resolve |
//! | `ww scan <file>` | Highlight a page as HTML |
//! | `ww words` | List words stored in the sheet |
//! | `ww mark <word> <status>` | Set a word's status and save it |
//! | `ww completions <shell>` | Print a shell completion script |

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use webwords::progress::ProgressMode;
use webwords::scan::ScanOptions;
use webwords::{check, config, scan, words};
use webwords_core::LearningStatus;

/// webwords — highlight vocabulary by learning status, synced with Fieldbook.
#[derive(Parser)]
#[command(
    name = "ww",
    about = "webwords — highlight vocabulary by learning status, synced with Fieldbook",
    version,
    long_about = "webwords splits a page into words, groups repeated words into one dictionary \
    entry, and tags every occurrence as known, unknown, or unverified. Statuses are read from \
    and written to a Fieldbook sheet."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/ww.toml")]
    config: PathBuf,

    /// Progress output on stderr. Defaults to `human` on a terminal, `off` otherwise.
    #[arg(long, global = true, value_enum)]
    progress: Option<ProgressMode>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Show Fieldbook settings and credential status.
    Check,

    /// Highlight a text page.
    ///
    /// Pulls statuses from Fieldbook, tags every word occurrence, and
    /// writes a standalone HTML page.
    Scan {
        /// Plain-text page to scan.
        file: PathBuf,

        /// Write HTML to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Do not contact Fieldbook; every word starts unverified.
        #[arg(long, conflicts_with = "push")]
        offline: bool,

        /// Save the status of each word on this page to Fieldbook afterwards.
        #[arg(long)]
        push: bool,
    },

    /// List words stored in the Fieldbook sheet.
    Words {
        /// Only show words with this status.
        #[arg(long)]
        status: Option<LearningStatus>,
    },

    /// Set a word's learning status and save it to Fieldbook.
    Mark {
        /// The word (normalized before lookup).
        word: String,

        /// `known`, `unknown`, or `unverified`.
        status: LearningStatus,
    },

    /// Print a shell completion script.
    Completions {
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Commands that don't require config
    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "ww", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;
    let reporter = cli
        .progress
        .unwrap_or_else(ProgressMode::default_for_tty)
        .reporter();

    match cli.command {
        Commands::Check => {
            check::run_check(&cfg)?;
        }
        Commands::Scan {
            file,
            out,
            offline,
            push,
        } => {
            let opts = ScanOptions { out, offline, push };
            scan::run_scan(&cfg, &file, &opts, reporter.as_ref()).await?;
        }
        Commands::Words { status } => {
            words::run_words(&cfg, status, reporter.as_ref()).await?;
        }
        Commands::Mark { word, status } => {
            words::run_mark(&cfg, &word, status, reporter.as_ref()).await?;
        }
        Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
