use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted article. Ids, counters and timestamps are assigned by the
/// storage backend at creation; only the engagement counters change after
/// that, via [`crate::ArticleStorage::update_article_stats`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub is_ai_generated: bool,
    pub image_url: Option<String>,
    pub views: u32,
    pub comments: u32,
    pub shares: u32,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new article.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub is_ai_generated: bool,
    pub image_url: Option<String>,
}

/// Structured output of the generative-text provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedArticle {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
}

/// A stored trending-topic row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub id: String,
    pub topic: String,
    pub posts: u32,
    pub change_percent: i32,
    pub updated_at: DateTime<Utc>,
}

/// A ranked topic signal produced by trend analysis over recent articles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSignal {
    pub topic: String,
    pub relevance: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub id: String,
    pub daily_reads: u32,
    pub ai_articles: u32,
    pub active_users: u32,
    pub top_category: Option<String>,
    pub top_category_percent: u32,
    pub date: DateTime<Utc>,
}

/// Partial analytics patch; unset fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsUpdate {
    pub daily_reads: Option<u32>,
    pub ai_articles: Option<u32>,
    pub active_users: Option<u32>,
    pub top_category: Option<String>,
    pub top_category_percent: Option<u32>,
}

/// A headline returned by the external news provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
}

/// A single image-search hit.
#[derive(Debug, Clone)]
pub struct ImageResult {
    pub url: String,
    pub alt_text: Option<String>,
}

/// Engagement counter selector for [`crate::ArticleStorage::update_article_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    Views,
    Comments,
    Shares,
}
