use crate::types::{Analytics, AnalyticsUpdate, Article, NewArticle, StatField, Trend};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// Most recent articles, newest first.
    async fn get_recent_articles(&self, limit: usize) -> Result<Vec<Article>>;

    /// Fetch a single article by id.
    async fn get_article(&self, id: &str) -> Result<Option<Article>>;

    /// Persist a new article, assigning id, timestamps and zeroed counters.
    async fn create_article(&self, article: NewArticle) -> Result<Article>;

    /// Increment one engagement counter on an article.
    async fn update_article_stats(&self, id: &str, field: StatField) -> Result<()>;

    /// Stored trending topics, most active first.
    async fn get_trends(&self) -> Result<Vec<Trend>>;

    /// Current analytics snapshot, if one exists.
    async fn get_analytics(&self) -> Result<Option<Analytics>>;

    /// Apply a partial analytics update and return the new snapshot.
    async fn update_analytics(&self, update: AnalyticsUpdate) -> Result<Analytics>;
}
