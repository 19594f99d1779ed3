//! CLI command implementations

use anyhow::{Context, Result};
use chrono::Local;
use clap::CommandFactory;
use clap_complete::Shell;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, ConfigCommand};
use crate::config::Settings;
use crate::keypoints::{Extraction, KeyPointExtractor};
use crate::report::{ExportFormat, Report, VideoInfo};
use crate::transcript::{extract_video_id, read_transcript};

/// Print key points for a transcript file
pub async fn extract_points(settings: &Settings, input: &Path, no_llm: bool, json: bool) -> Result<()> {
    let transcript = load_transcript(input)?;
    let extraction = run_extraction(settings, &transcript, no_llm).await;

    if json {
        println!("{}", serde_json::to_string_pretty(extraction.points())?);
        return Ok(());
    }

    for (i, point) in extraction.points().iter().enumerate() {
        println!("{}. {}", i + 1, point);
    }

    Ok(())
}

/// Options of the `report` command
#[derive(Debug, Default)]
pub struct ReportOptions {
    pub title: Option<String>,
    pub info: Option<PathBuf>,
    pub format: String,
    pub output: Option<PathBuf>,
    pub save: bool,
    pub no_llm: bool,
}

/// Build a report and write it to a file or stdout
pub async fn build_report(settings: &Settings, input: &Path, options: ReportOptions) -> Result<()> {
    let format: ExportFormat = options.format.parse()?;
    let transcript = load_transcript(input)?;

    let video = match &options.info {
        Some(path) => Some(
            VideoInfo::from_json_file(path)
                .with_context(|| format!("Failed to read video info: {}", path.display()))?,
        ),
        None => None,
    };

    let title = options
        .title
        .or_else(|| {
            video
                .as_ref()
                .map(|v| v.title.clone())
                .filter(|t| !t.trim().is_empty())
        })
        .unwrap_or_else(|| default_title(input));

    let extraction = run_extraction(settings, &transcript, options.no_llm).await;

    let report = Report {
        title: &title,
        video: video.as_ref(),
        key_points: extraction.points(),
        degraded: extraction.is_degraded(),
        generated_at: Local::now(),
        transcript: &transcript,
    };
    let content = report.render(format)?;

    let output = if options.save {
        Some(
            settings
                .general
                .output_dir
                .join(format!("{}.{}", file_safe(&title), format.extension())),
        )
    } else {
        options.output
    };

    if let Some(path) = output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        println!("Exported to: {}", path.display());
    } else {
        print!("{}", content);
    }

    Ok(())
}

/// Print the id found in a video URL, or its canonical watch URL
pub fn show_video_id(url: &str, canonical: bool) -> Result<()> {
    let id = extract_video_id(url).with_context(|| format!("No video id found in: {}", url))?;
    if canonical {
        println!("{}", id.url());
    } else {
        println!("{}", id);
    }
    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            println!("{}", settings.to_redacted_toml()?);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Write a completion script for `shell` to stdout
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}

// Helper functions

fn load_transcript(input: &Path) -> Result<String> {
    read_transcript(input).with_context(|| format!("Failed to load transcript: {}", input.display()))
}

async fn run_extraction(settings: &Settings, transcript: &str, no_llm: bool) -> Extraction {
    let use_llm = !no_llm && settings.llm.has_api_key();
    let extractor = if use_llm {
        KeyPointExtractor::from_settings(settings)
    } else {
        KeyPointExtractor::heuristic_from_settings(settings)
    };
    tracing::debug!(use_llm, provider = extractor.has_provider(), "extracting key points");
    extractor.extract(transcript, use_llm).await
}

fn default_title(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| s != "-")
        .unwrap_or_else(|| "Transcript".to_string())
}

/// Replace characters that are not allowed in file names.
fn file_safe(title: &str) -> String {
    let name: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if name.is_empty() {
        "report".to_string()
    } else {
        name
    }
}
