use crate::config::PipelineConfig;
use aj_core::Article;
use sha2::{Digest, Sha256};

/// Lowercase, trim, and collapse internal whitespace to single spaces.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn char_prefix(text: &str, len: usize) -> String {
    text.chars().take(len).collect()
}

/// Heuristic near-duplicate detection over normalized titles and
/// summaries. Known tradeoffs, accepted rather than fixed: a genuinely new
/// article sharing its first characters with an older one is rejected
/// (false positive), and a duplicate rephrased from the first word on
/// passes (false negative). The prefix lengths bound that behavior and are
/// tunable through [`PipelineConfig`].
pub struct DuplicateGuard {
    title_prefix_len: usize,
    summary_prefix_len: usize,
}

impl DuplicateGuard {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            title_prefix_len: config.title_prefix_len,
            summary_prefix_len: config.summary_prefix_len,
        }
    }

    /// Exact match, or either normalized string contains the other's
    /// leading `prefix_len` characters. Empty strings never overlap.
    pub fn overlaps(a: &str, b: &str, prefix_len: usize) -> bool {
        if a.is_empty() || b.is_empty() {
            return false;
        }
        if a == b {
            return true;
        }
        b.contains(&char_prefix(a, prefix_len)) || a.contains(&char_prefix(b, prefix_len))
    }

    /// True when any window member overlaps the candidate on title or
    /// summary. Short-circuits on the first match.
    pub fn is_duplicate(&self, title: &str, summary: &str, window: &[Article]) -> bool {
        let candidate_title = normalize(title);
        let candidate_summary = normalize(summary);

        window.iter().any(|article| {
            Self::overlaps(
                &candidate_title,
                &normalize(&article.title),
                self.title_prefix_len,
            ) || Self::overlaps(
                &candidate_summary,
                &normalize(&article.summary),
                self.summary_prefix_len,
            )
        })
    }

    /// Stable hex digest over the normalized title and summary; compared
    /// against the last published candidate to catch scheduler
    /// double-fires before the recent window refreshes.
    pub fn content_hash(title: &str, summary: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(normalize(title).as_bytes());
        hasher.update(b"\n");
        hasher.update(normalize(summary).as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
