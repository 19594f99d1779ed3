//! Report rendering: video metadata, key points and transcript

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::keypoints::char_len;
use crate::{Result, VidnotesError};

const DESCRIPTION_PREVIEW_CHARS: usize = 500;

/// Metadata about the source video, as produced by a platform fetcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoInfo {
    pub video_id: String,
    pub title: String,
    pub url: String,
    pub channel: String,
    pub published: String,
    pub view_count: u64,
    pub like_count: u64,
    /// Duration in seconds
    pub duration: u64,
    pub description: String,
}

impl VideoInfo {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = VidnotesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Txt),
            "json" => Ok(Self::Json),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(VidnotesError::UnsupportedFormat(format!(
                "{}. Supported: txt, json, md",
                s
            ))),
        }
    }
}

/// Everything that goes into one exported document.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub title: &'a str,
    pub video: Option<&'a VideoInfo>,
    pub key_points: &'a [String],
    /// Whether the key points came from the heuristic after an LLM failure
    pub degraded: bool,
    pub generated_at: DateTime<Local>,
    pub transcript: &'a str,
}

impl Report<'_> {
    pub fn render(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Txt => Ok(self.to_txt()),
            ExportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ExportFormat::Markdown => Ok(self.to_markdown()),
        }
    }

    fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n", self.title);

        if let Some(video) = self.video {
            out.push_str("## Video\n\n");
            for (label, value) in video_fields(video) {
                out.push_str(&format!("- **{}**: {}\n", label, value));
            }
            out.push('\n');

            if !video.description.trim().is_empty() {
                out.push_str("## Description\n\n");
                out.push_str(&preview(&video.description));
                out.push_str("\n\n");
            }
        }

        out.push_str("## Key Points\n\n");
        out.push_str("_Extracted automatically from the transcript; for reference only._\n\n");
        for (i, point) in self.key_points.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, point));
        }
        out.push('\n');

        out.push_str("## Transcript\n\n");
        out.push_str(&format!(
            "_Generated {}_\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        for line in self.transcript.lines().filter(|l| !l.trim().is_empty()) {
            out.push_str(line.trim());
            out.push_str("\n\n");
        }

        out
    }

    fn to_txt(&self) -> String {
        let mut out = format!("Title: {}\n", self.title);
        if let Some(video) = self.video {
            for (label, value) in video_fields(video) {
                out.push_str(&format!("{}: {}\n", label, value));
            }
        }
        out.push_str(&format!(
            "Generated: {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str("\nKey points:\n");
        for (i, point) in self.key_points.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, point));
        }
        out.push_str("\n---\n\n");
        out.push_str(self.transcript.trim());
        out.push('\n');
        out
    }
}

fn video_fields(video: &VideoInfo) -> Vec<(&'static str, String)> {
    let or_unknown = |s: &str| {
        if s.trim().is_empty() {
            "unknown".to_string()
        } else {
            s.to_string()
        }
    };

    vec![
        ("Published", or_unknown(&video.published)),
        ("Link", or_unknown(&video.url)),
        ("Channel", or_unknown(&video.channel)),
        ("Views", group_thousands(video.view_count)),
        ("Likes", group_thousands(video.like_count)),
        ("Duration", format!("{} min", video.duration / 60)),
    ]
}

fn preview(description: &str) -> String {
    if char_len(description) > DESCRIPTION_PREVIEW_CHARS {
        let cut: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        description.to_string()
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
