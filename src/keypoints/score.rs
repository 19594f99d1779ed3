//! Additive sentence scoring

use std::cmp::Reverse;

use super::segment::char_len;
use super::tables::ExtractorConfig;

/// A sentence that made it into the candidate pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSentence<'a> {
    pub text: &'a str,
    pub index: usize,
    pub score: i32,
}

/// Score one sentence at position `index` out of `total`.
pub fn score_sentence(sentence: &str, index: usize, total: usize, config: &ExtractorConfig) -> i32 {
    let w = &config.weights;
    let length = char_len(sentence);
    let mut score = 0;

    if (w.min_good_length..=w.max_good_length).contains(&length) {
        score += w.length_bonus;
    }
    if length > w.overlong_length {
        score -= w.overlong_penalty;
    }

    score += w.marker_bonus * config.marker_hits(sentence) as i32;

    if config.leading_filler(sentence).is_some() {
        score -= w.filler_penalty;
    }

    if index < w.lead_sentences {
        score += w.lead_bonus;
    }
    if index as f64 > total as f64 * w.tail_fraction {
        score += w.tail_bonus;
    }

    score
}

/// Score every sentence, keep the positive ones and order them best first.
/// Equal scores keep their transcript order.
pub fn rank_sentences<'a>(sentences: &'a [String], config: &ExtractorConfig) -> Vec<ScoredSentence<'a>> {
    let total = sentences.len();
    let mut ranked: Vec<ScoredSentence<'a>> = sentences
        .iter()
        .enumerate()
        .map(|(index, text)| ScoredSentence {
            text,
            index,
            score: score_sentence(text, index, total, config),
        })
        .filter(|s| s.score > 0)
        .collect();

    ranked.sort_by_key(|s| Reverse(s.score));
    ranked
}
