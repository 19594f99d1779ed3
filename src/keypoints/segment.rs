//! Sentence segmentation

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static TERMINATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[。！？!?\n]+").expect("valid regex"));

/// Fragments shorter than this are noise.
const MIN_SENTENCE_CHARS: usize = 6;
/// Sentences longer than this are broken up on commas.
const RUN_ON_CHARS: usize = 60;
/// Comma-split pieces must be longer than this to survive.
const MIN_CLAUSE_CHARS: usize = 12;

/// Split a transcript into ordered, summary-sized sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let collapsed = collapse_whitespace(text);
    let mut sentences = Vec::new();

    for raw in TERMINATORS.split(&collapsed) {
        let sentence = raw.trim();
        if sentence.is_empty() || char_len(sentence) < MIN_SENTENCE_CHARS {
            continue;
        }

        if char_len(sentence) > RUN_ON_CHARS && sentence.contains(['，', ',']) {
            sentences.extend(
                sentence
                    .split(['，', ','])
                    .map(str::trim)
                    .filter(|part| char_len(part) > MIN_CLAUSE_CHARS)
                    .map(str::to_string),
            );
        } else {
            sentences.push(sentence.to_string());
        }
    }

    sentences
}

/// Collapse whitespace runs to one space, or to one line break when the run
/// contains a line break.
fn collapse_whitespace(text: &str) -> String {
    WHITESPACE
        .replace_all(text, |caps: &regex::Captures| {
            if caps[0].contains('\n') {
                "\n"
            } else {
                " "
            }
        })
        .into_owned()
}

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `n` chars of `s`.
pub fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_chinese_and_ascii_terminators() {
        let sentences = split_sentences("今天我们来聊一聊经济。未来会怎么样呢？Is this the end? 好");
        assert_eq!(
            sentences,
            vec!["今天我们来聊一聊经济", "未来会怎么样呢", "Is this the end"]
        );
    }

    #[test]
    fn line_breaks_survive_whitespace_collapse() {
        let sentences = split_sentences("first caption line here\n\n   second caption   line here");
        assert_eq!(
            sentences,
            vec!["first caption line here", "second caption line here"]
        );
    }

    #[test]
    fn run_on_sentences_split_on_commas() {
        let long = format!(
            "{}，{}，短句",
            "美国和中国之间的贸易谈判已经断断续续地持续了很长很长的一段时间",
            "双方在关税和科技出口管制问题上仍然存在非常明显的分歧和争议"
        );
        assert!(char_len(&long) > 60);

        let sentences = split_sentences(&long);
        assert_eq!(
            sentences,
            vec![
                "美国和中国之间的贸易谈判已经断断续续地持续了很长很长的一段时间",
                "双方在关税和科技出口管制问题上仍然存在非常明显的分歧和争议",
            ]
        );
    }

    #[test]
    fn take_chars_counts_chars_not_bytes() {
        assert_eq!(take_chars("中美关系很重要", 4), "中美关系");
        assert_eq!(take_chars("abc", 10), "abc");
    }
}
