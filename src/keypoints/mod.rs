//! Key-point extraction
//!
//! The heuristic path splits a transcript into sentences, buckets them by
//! theme, scores them and picks at most eight short points. The
//! [`KeyPointExtractor`] adds an LLM path on top that falls back to the
//! heuristic whenever the model cannot deliver.

mod extractor;
mod score;
mod segment;
mod select;
mod tables;

pub use extractor::{DegradeReason, Extraction, KeyPointExtractor};
pub use score::{rank_sentences, score_sentence, ScoredSentence};
pub use segment::{char_len, split_sentences};
pub use select::{bucket_by_theme, fingerprint, shorten, MAX_POINTS};
pub use tables::{default_themes, ExtractorConfig, ScoringWeights, Theme};

use tracing::debug;

/// Returned for transcripts below [`MIN_TRANSCRIPT_CHARS`].
pub const TOO_SHORT: &str = "content too short to extract key points";
/// Returned when nothing survives selection.
pub const NO_KEY_POINTS: &str = "no key points could be extracted";
pub const MIN_TRANSCRIPT_CHARS: usize = 50;

/// Whether a point is one of the placeholder strings rather than content.
pub fn is_sentinel(point: &str) -> bool {
    point == TOO_SHORT || point == NO_KEY_POINTS
}

/// Rule-based extraction. Pure: identical input gives identical output.
pub fn extract_key_points(text: &str, config: &ExtractorConfig) -> Vec<String> {
    if char_len(text) < MIN_TRANSCRIPT_CHARS {
        return vec![TOO_SHORT.to_string()];
    }

    let sentences = split_sentences(text);
    let buckets = bucket_by_theme(&config.themes, &sentences);
    let ranked = rank_sentences(&sentences, config);
    debug!(
        sentences = sentences.len(),
        candidates = ranked.len(),
        "transcript segmented"
    );

    let points = select::finalize(select::select_points(&buckets, &ranked, config), config);
    if points.is_empty() {
        return vec![NO_KEY_POINTS.to_string()];
    }
    points
}
