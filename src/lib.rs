//! vidnotes - key points and reports from video transcripts
//!
//! Extracts short key points from YouTube/Bilibili transcripts with a
//! rule-based heuristic, optionally asking an LLM first.

pub mod cli;
pub mod config;
pub mod keypoints;
pub mod llm;
pub mod report;
pub mod transcript;

use thiserror::Error;

/// Main error type for vidnotes
#[derive(Error, Debug)]
pub enum VidnotesError {
    #[error("Transcript error: {0}")]
    Transcript(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VidnotesError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "vidnotes";
