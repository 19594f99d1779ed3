//! Turn a model's numbered-list answer into key points

use once_cell::sync::Lazy;
use regex::Regex;

use crate::keypoints::{char_len, shorten, MAX_POINTS};

static THINK_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid regex"));
static NUMBERING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+[.、)\]】\s]+").expect("valid regex"));
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-•*]\s*").expect("valid regex"));

const MIN_POINT_CHARS: usize = 11;

/// Keep list items longer than 10 chars, numbering stripped, shortened to
/// at most 45 chars, at most eight.
pub fn parse_key_points(content: &str) -> Vec<String> {
    let content = THINK_BLOCK.replace_all(content, "");

    content
        .lines()
        .map(str::trim)
        .filter(|line| {
            line.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '•' | '*'))
        })
        .map(|line| {
            let line = NUMBERING.replace(line, "");
            BULLET.replace(&line, "").trim().to_string()
        })
        .filter(|point| char_len(point) >= MIN_POINT_CHARS)
        .map(|point| shorten(&point))
        .take(MAX_POINTS)
        .collect()
}
