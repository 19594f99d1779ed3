//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// vidnotes - Key points and reports from video transcripts
#[derive(Parser, Debug)]
#[command(name = "vidnotes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract key points from a transcript or subtitle file
    Extract {
        /// Transcript file (txt, srt, vtt, json3), or - for stdin
        input: PathBuf,

        /// Use the local heuristic even when an LLM key is configured
        #[arg(long)]
        no_llm: bool,

        /// Print the points as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Build a report with video info, key points and the transcript
    Report {
        /// Transcript file (txt, srt, vtt, json3), or - for stdin
        input: PathBuf,

        /// Report title (defaults to the video title or the file name)
        #[arg(short, long)]
        title: Option<String>,

        /// Video metadata as JSON
        #[arg(short, long)]
        info: Option<PathBuf>,

        /// Output format (txt, json, md)
        #[arg(short, long, default_value = "md")]
        format: String,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save into the configured output directory, named after the title
        #[arg(short, long, conflicts_with = "output")]
        save: bool,

        /// Use the local heuristic even when an LLM key is configured
        #[arg(long)]
        no_llm: bool,
    },

    /// Print the video id found in a YouTube or Bilibili URL
    VideoId {
        /// Video URL
        url: String,

        /// Print the canonical watch URL instead of the bare id
        #[arg(long)]
        canonical: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
