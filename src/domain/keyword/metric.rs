use serde::{Deserialize, Serialize};

/// Suffixes appended to the seed when no keyword service is configured
pub const SYNTHETIC_SUFFIXES: [&str; 10] = [
    "how to",
    "tutorial",
    "for beginners",
    "best",
    "comparison",
    "2024",
    "getting started",
    "tips",
    "mistakes to avoid",
    "benefits",
];

/// Search metrics for one keyword phrase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMetric {
    pub keyword: String,
    pub search_volume: u64,
    /// Competition in `[0, 1]`
    pub competition: f64,
    pub cpc: f64,
}

impl KeywordMetric {
    pub fn new(keyword: impl Into<String>, search_volume: u64, competition: f64, cpc: f64) -> Self {
        Self {
            keyword: keyword.into(),
            search_volume,
            competition: competition.clamp(0.0, 1.0),
            cpc,
        }
    }
}

/// Deterministic stand-in metrics derived from the seed alone
pub fn synthetic_metrics(seed: &str) -> Vec<KeywordMetric> {
    SYNTHETIC_SUFFIXES
        .iter()
        .enumerate()
        .map(|(i, suffix)| {
            let i = i as u64;
            let competition = ((0.30 + 0.05 * i as f64) * 100.0).round() / 100.0;
            KeywordMetric::new(
                format!("{} {}", seed, suffix),
                1000 + 100 * i,
                competition,
                (50 + 10 * i) as f64,
            )
        })
        .collect()
}

/// Maximum number of seeds taken from a generated keyword list
pub const MAX_SEED_KEYWORDS: usize = 3;

/// Pick lookup seeds from a generated keyword list
///
/// Only list-like lines (numbered `1.`-`3.`, `-` or `・` bullets) are
/// considered. The keyword is whatever follows the last `:` or, without one,
/// the last `.`.
pub fn seed_keywords(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| ["1.", "2.", "3.", "-", "・"].iter().any(|m| line.contains(m)))
        .filter_map(|line| {
            let tail = match line.rsplit_once(':') {
                Some((_, tail)) => tail,
                None => line.rsplit('.').next().unwrap_or(line),
            };
            let keyword = tail.replace(['-', '・'], "");
            let keyword = keyword.trim();
            (keyword.chars().count() > 1).then(|| keyword.to_string())
        })
        .take(MAX_SEED_KEYWORDS)
        .collect()
}

/// Render metrics as a plain-text table for prompt injection
pub fn render_table(metrics: &[KeywordMetric]) -> String {
    if metrics.is_empty() {
        return "(no keyword data)".to_string();
    }

    let mut out = String::from("keyword | monthly searches | competition | cpc\n");
    for m in metrics {
        out.push_str(&format!(
            "{} | {} | {:.2} | {:.0}\n",
            m.keyword, m.search_volume, m.competition, m.cpc
        ));
    }
    out.truncate(out.trim_end().len());
    out
}
