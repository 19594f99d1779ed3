//! Static tables and tunables for the heuristic extractor

use serde::{Deserialize, Serialize};

/// A topical label with the keywords that pull sentences into its bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub keywords: Vec<String>,
}

impl Theme {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn matches(&self, sentence: &str) -> bool {
        self.keywords.iter().any(|kw| sentence.contains(kw.as_str()))
    }
}

/// Scoring constants. These were tuned by hand against real transcripts
/// and are exposed so they can be adjusted from the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Inclusive length band (in chars) that earns `length_bonus`
    pub min_good_length: usize,
    pub max_good_length: usize,
    pub length_bonus: i32,

    /// Sentences longer than this lose `overlong_penalty`
    pub overlong_length: usize,
    pub overlong_penalty: i32,

    /// Added once per distinct high-value marker present
    pub marker_bonus: i32,

    /// Subtracted when the sentence opens with a filler token
    pub filler_penalty: i32,

    /// The first `lead_sentences` sentences earn `lead_bonus`
    pub lead_sentences: usize,
    pub lead_bonus: i32,

    /// Sentences past this fraction of the transcript earn `tail_bonus`
    pub tail_fraction: f64,
    pub tail_bonus: i32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            min_good_length: 15,
            max_good_length: 70,
            length_bonus: 2,
            overlong_length: 100,
            overlong_penalty: 1,
            marker_bonus: 2,
            filler_penalty: 2,
            lead_sentences: 5,
            lead_bonus: 2,
            tail_fraction: 0.8,
            tail_bonus: 2,
        }
    }
}

/// Read-only configuration shared by every extraction call.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub themes: Vec<Theme>,
    pub markers: Vec<String>,
    pub fillers: Vec<String>,
    pub lead_phrases: Vec<String>,
    pub weights: ScoringWeights,
}

impl ExtractorConfig {
    pub fn new(themes: Vec<Theme>, weights: ScoringWeights) -> Self {
        let themes = if themes.is_empty() {
            default_themes()
        } else {
            themes
        };

        Self {
            themes,
            markers: to_owned(HIGH_VALUE_MARKERS),
            fillers: to_owned(FILLERS),
            lead_phrases: to_owned(LEAD_PHRASES),
            weights,
        }
    }

    /// The filler token `sentence` opens with, if any.
    pub fn leading_filler(&self, sentence: &str) -> Option<&str> {
        self.fillers
            .iter()
            .map(String::as_str)
            .find(|f| sentence.starts_with(f))
    }

    /// Number of distinct high-value markers present in `sentence`.
    pub fn marker_hits(&self, sentence: &str) -> usize {
        self.markers
            .iter()
            .filter(|m| sentence.contains(m.as_str()))
            .count()
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::new(Vec::new(), ScoringWeights::default())
    }
}

const HIGH_VALUE_MARKERS: &[&str] = &[
    "关键", "重要", "核心", "主要", "原因", "因为", "结论", "所以", "因此", "认为", "预测", "估计",
    "分析", "显示", "表明", "趋势", "未来", "必须", "key", "important", "core", "reason",
    "conclusion", "therefore", "predict", "trend", "must",
];

const FILLERS: &[&str] = &[
    "嗯", "啊", "这个", "那个", "好吧", "是的", "um ", "uh ", "Um ", "Uh ", "you know, ",
];

const LEAD_PHRASES: &[&str] = &[
    "嗯", "啊", "这个", "那个", "那么", "就是", "其实", "好吧", "well,", "Well,", "so,", "So,",
    "actually,", "Actually,",
];

pub fn default_themes() -> Vec<Theme> {
    vec![
        Theme::new(
            "Sino-US relations",
            &["中美", "中美关系", "中国大陆", "美国", "特朗普", "中国"],
        ),
        Theme::new(
            "Taiwan",
            &["台湾", "台海", "对台军售", "军售", "一中", "一个中国"],
        ),
        Theme::new(
            "Trump-Xi summit",
            &["川习会", "习近平", "特朗普", "北京", "会面", "访问", "峰会"],
        ),
        Theme::new("Putin/Russia", &["普京", "俄罗斯", "俄罗", "普丁"]),
        Theme::new(
            "Economy/trade",
            &["稀土", "大豆", "石油", "天然气", "贸易", "关税", "经济", "购买"],
        ),
        Theme::new(
            "International affairs",
            &["伊朗", "印度", "日本", "选举", "战争", "和谈"],
        ),
    ]
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_theme_override_keeps_builtin_table() {
        let config = ExtractorConfig::new(Vec::new(), ScoringWeights::default());
        assert_eq!(config.themes, default_themes());
        assert_eq!(config.themes[0].name, "Sino-US relations");
    }

    #[test]
    fn leading_filler_takes_first_listed_match() {
        let config = ExtractorConfig::default();
        assert_eq!(config.leading_filler("这个问题很复杂"), Some("这个"));
        assert_eq!(config.leading_filler("问题很复杂"), None);
    }

    #[test]
    fn marker_hits_counts_distinct_markers() {
        let config = ExtractorConfig::default();
        assert_eq!(config.marker_hits("这是关键，也很重要，关键在于未来"), 3);
    }
}
