//! vidnotes - Key points and reports from video transcripts
//!
//! Entry point for the vidnotes CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vidnotes::cli::{Cli, Commands};
use vidnotes::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    tracing::debug!(version = vidnotes::VERSION, "starting");

    match cli.command {
        Commands::Completions { shell } => {
            vidnotes::cli::commands::print_completions(shell);
        }
        Commands::VideoId { url, canonical } => {
            vidnotes::cli::commands::show_video_id(&url, canonical)?;
        }
        Commands::Extract {
            input,
            no_llm,
            json,
        } => {
            let settings = load_settings()?;
            vidnotes::cli::commands::extract_points(&settings, &input, no_llm, json).await?;
        }
        Commands::Report {
            input,
            title,
            info,
            format,
            output,
            save,
            no_llm,
        } => {
            let settings = load_settings()?;
            let options = vidnotes::cli::commands::ReportOptions {
                title,
                info,
                format,
                output,
                save,
                no_llm,
            };
            vidnotes::cli::commands::build_report(&settings, &input, options).await?;
        }
        Commands::Config(config_cmd) => {
            let settings = load_settings()?;
            vidnotes::cli::commands::config_command(&settings, config_cmd)?;
        }
    }

    Ok(())
}

/// Settings for runtime commands. API keys may live in a local .env file.
fn load_settings() -> Result<Settings> {
    let _ = dotenvy::dotenv();
    Settings::load()
}
