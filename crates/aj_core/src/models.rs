use crate::types::{Article, GeneratedArticle, TrendSignal};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Name of the underlying model, for logs.
    fn name(&self) -> &str;

    /// Generate a structured article for a topic. May fail on quota or
    /// network errors; callers are expected to hold a fallback.
    async fn generate_article(&self, topic: &str, category: &str) -> Result<GeneratedArticle>;

    /// Rank topics by relevance across recent articles, descending.
    async fn analyze_trends(&self, articles: &[Article]) -> Result<Vec<TrendSignal>>;
}
