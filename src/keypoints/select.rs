//! Theme bucketing, candidate selection and final cleanup

use std::collections::HashSet;

use tracing::debug;

use super::score::ScoredSentence;
use super::segment::{char_len, take_chars};
use super::tables::{ExtractorConfig, Theme};

pub const MAX_POINTS: usize = 8;
const THEME_PHASE_LIMIT: usize = 6;
const PER_THEME: usize = 3;
const MIN_BUCKET_CHARS: usize = 15;
const MIN_CANDIDATE_CHARS: usize = 12;
const MIN_FINAL_CHARS: usize = 9;
const FINGERPRINT_CHARS: usize = 20;
const MAX_POINT_CHARS: usize = 45;
const HARD_CUT_CHARS: usize = 42;
const CLAUSE_MARKS: [char; 3] = ['。', '；', ','];

/// Sentences that mention a theme, grouped per theme in declared order.
pub fn bucket_by_theme<'a>(themes: &'a [Theme], sentences: &'a [String]) -> Vec<(&'a Theme, Vec<&'a str>)> {
    themes
        .iter()
        .map(|theme| {
            let mut bucket: Vec<&str> = Vec::new();
            for sentence in sentences {
                if char_len(sentence) > MIN_BUCKET_CHARS
                    && theme.matches(sentence)
                    && !bucket.contains(&sentence.as_str())
                {
                    bucket.push(sentence);
                }
            }
            (theme, bucket)
        })
        .collect()
}

/// First 20 chars; the approximate identity used for deduplication.
pub fn fingerprint(point: &str) -> &str {
    take_chars(point, FINGERPRINT_CHARS)
}

/// Shorten to at most 45 chars, preferring a clause boundary between
/// offsets 20 and 41.
pub fn shorten(point: &str) -> String {
    if char_len(point) <= MAX_POINT_CHARS {
        return point.to_string();
    }

    let chars: Vec<char> = point.chars().collect();
    for mark in CLAUSE_MARKS {
        let found = chars[FINGERPRINT_CHARS..]
            .iter()
            .position(|&c| c == mark)
            .map(|offset| offset + FINGERPRINT_CHARS);
        if let Some(idx) = found {
            if idx < HARD_CUT_CHARS {
                return chars[..=idx].iter().collect();
            }
        }
    }

    format!("{}...", take_chars(point, HARD_CUT_CHARS))
}

/// Accumulates key points while enforcing the fingerprint and size rules.
struct Selection<'c> {
    config: &'c ExtractorConfig,
    points: Vec<String>,
    seen: HashSet<String>,
}

impl<'c> Selection<'c> {
    fn new(config: &'c ExtractorConfig) -> Self {
        Self {
            config,
            points: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    /// Strip filler, enforce the length floor and dedupe, then shorten and keep.
    fn offer(&mut self, sentence: &str) -> bool {
        let mut cleaned = sentence.trim();
        if let Some(filler) = self.config.leading_filler(cleaned) {
            cleaned = cleaned[filler.len()..].trim();
        }

        if char_len(cleaned) < MIN_CANDIDATE_CHARS {
            return false;
        }

        let key = fingerprint(cleaned).to_string();
        if self.seen.contains(&key) {
            return false;
        }

        self.points.push(shorten(cleaned));
        self.seen.insert(key);
        true
    }
}

/// Pick up to eight points: theme buckets first for diversity, then the
/// best-scoring sentences.
pub fn select_points(
    buckets: &[(&Theme, Vec<&str>)],
    ranked: &[ScoredSentence<'_>],
    config: &ExtractorConfig,
) -> Vec<String> {
    let mut selection = Selection::new(config);

    'themes: for (theme, bucket) in buckets {
        for sentence in bucket.iter().take(PER_THEME) {
            if selection.len() >= THEME_PHASE_LIMIT {
                break 'themes;
            }
            if selection.offer(sentence) {
                debug!(theme = %theme.name, "theme point selected");
            }
        }
    }
    let from_themes = selection.len();

    for candidate in ranked {
        if selection.len() >= MAX_POINTS {
            break;
        }
        selection.offer(candidate.text);
    }

    debug!(
        from_themes,
        from_scores = selection.len() - from_themes,
        "selection finished"
    );

    selection.points
}

/// Drop opening discourse phrases, then points that became too short or
/// collide with an earlier fingerprint.
pub fn finalize(points: Vec<String>, config: &ExtractorConfig) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut finished = Vec::new();

    for point in points.into_iter().take(MAX_POINTS) {
        let cleaned = strip_lead_phrase(&point, &config.lead_phrases);
        if char_len(cleaned) < MIN_FINAL_CHARS {
            continue;
        }
        if !seen.insert(fingerprint(cleaned).to_string()) {
            continue;
        }
        finished.push(cleaned.to_string());
    }

    finished
}

fn strip_lead_phrase<'p>(point: &'p str, phrases: &[String]) -> &'p str {
    let point = point.trim();
    match phrases.iter().find_map(|p| point.strip_prefix(p.as_str())) {
        Some(rest) => rest
            .trim_start_matches(|c: char| c == ',' || c == '，' || c.is_whitespace())
            .trim(),
        None => point,
    }
}
