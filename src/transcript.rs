//! Transcript input: subtitle payloads to plain text, video ids from URLs

use std::fmt;
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::{Result, VidnotesError};

static YOUTUBE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:youtube\.com/watch\?(?:[^#]*&)?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/|youtube\.com/shorts/)([A-Za-z0-9_-]{11})",
    )
    .expect("valid regex")
});
static BILIBILI_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(BV[0-9A-Za-z]{10})\b").expect("valid regex"));
static INLINE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    YouTube,
    Bilibili,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId {
    pub platform: Platform,
    pub id: String,
}

impl VideoId {
    /// Canonical watch URL.
    pub fn url(&self) -> String {
        match self.platform {
            Platform::YouTube => format!("https://www.youtube.com/watch?v={}", self.id),
            Platform::Bilibili => format!("https://www.bilibili.com/video/{}", self.id),
        }
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Find a YouTube or Bilibili video id in a URL.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    if let Some(caps) = YOUTUBE_ID.captures(url) {
        return Some(VideoId {
            platform: Platform::YouTube,
            id: caps[1].to_string(),
        });
    }

    BILIBILI_ID.captures(url).map(|caps| VideoId {
        platform: Platform::Bilibili,
        id: caps[1].to_string(),
    })
}

#[derive(Deserialize)]
struct Json3 {
    events: Vec<Json3Event>,
}

#[derive(Deserialize)]
struct Json3Event {
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Plain text from a subtitle payload: YouTube json3, SRT, WebVTT, or
/// text that is already plain.
pub fn subtitle_to_text(raw: &str) -> String {
    if let Ok(json3) = serde_json::from_str::<Json3>(raw) {
        return json3
            .events
            .iter()
            .flat_map(|event| event.segs.iter())
            .map(|seg| seg.utf8.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
    }

    let mut lines: Vec<String> = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || is_cue_metadata(line) {
            continue;
        }

        let text = INLINE_TAG.replace_all(line, "");
        let text = text.trim();
        // Rolling auto-captions repeat the previous line.
        if text.is_empty() || lines.last().map(String::as_str) == Some(text) {
            continue;
        }
        lines.push(text.to_string());
    }

    lines.join("\n")
}

fn is_cue_metadata(line: &str) -> bool {
    line.contains("-->")
        || line.chars().all(|c| c.is_ascii_digit())
        || line.starts_with("WEBVTT")
        || line.starts_with("Kind:")
        || line.starts_with("Language:")
        || line.starts_with("NOTE")
}

/// Read a transcript file (`-` for stdin) and normalize it to plain text.
pub fn read_transcript(path: &Path) -> Result<String> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };

    let text = subtitle_to_text(&raw);
    if text.trim().is_empty() {
        return Err(VidnotesError::Transcript(format!(
            "{} contains no transcript text",
            path.display()
        )));
    }
    Ok(text)
}
