use aj_core::{
    Analytics, AnalyticsUpdate, Article, ArticleStorage, Error, NewArticle, Result, StatField,
    Trend,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

struct MemoryStore {
    articles: Vec<Article>,
    trends: Vec<Trend>,
    analytics: Analytics,
}

impl MemoryStore {
    fn new() -> Self {
        Self {
            articles: Vec::new(),
            trends: Vec::new(),
            analytics: Analytics {
                id: Uuid::new_v4().to_string(),
                daily_reads: 0,
                ai_articles: 0,
                active_users: 0,
                top_category: None,
                top_category_percent: 0,
                date: Utc::now(),
            },
        }
    }

    fn get_recent_articles(&self, limit: usize) -> Vec<Article> {
        let mut articles = self.articles.clone();
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        articles.into_iter().take(limit).collect()
    }

    fn create_article(&mut self, article: NewArticle) -> Article {
        let now = Utc::now();
        let article = Article {
            id: Uuid::new_v4().to_string(),
            title: article.title,
            summary: article.summary,
            content: article.content,
            category: article.category,
            tags: article.tags,
            is_ai_generated: article.is_ai_generated,
            image_url: article.image_url,
            views: 0,
            comments: 0,
            shares: 0,
            published_at: now,
            created_at: now,
        };
        self.articles.push(article.clone());
        article
    }

    fn create_trend(&mut self, topic: &str, posts: u32, change_percent: i32) {
        self.trends.push(Trend {
            id: Uuid::new_v4().to_string(),
            topic: topic.to_string(),
            posts,
            change_percent,
            updated_at: Utc::now(),
        });
    }
}

/// In-process storage backend. State lives behind a tokio `RwLock` and is
/// lost on restart; every insert assigns the id, timestamps and zeroed
/// engagement counters.
pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(MemoryStore::new())),
        }
    }

    /// A backend pre-populated with sample trends, the way the platform
    /// boots in demos and tests.
    pub async fn with_seed_data() -> Self {
        let storage = Self::new();
        {
            let mut store = storage.store.write().await;
            store.create_trend("#AI_Uzbekistan", 1200, 15);
            store.create_trend("#Blockchain", 890, 8);
            store.create_trend("#ITpark", 654, -2);
            store.create_trend("#Startup", 432, 12);
        }
        storage
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleStorage for MemoryStorage {
    async fn get_recent_articles(&self, limit: usize) -> Result<Vec<Article>> {
        let store = self.store.read().await;
        Ok(store.get_recent_articles(limit))
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        let store = self.store.read().await;
        Ok(store.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn create_article(&self, article: NewArticle) -> Result<Article> {
        let mut store = self.store.write().await;
        Ok(store.create_article(article))
    }

    async fn update_article_stats(&self, id: &str, field: StatField) -> Result<()> {
        let mut store = self.store.write().await;
        let article = store
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::Storage(format!("No article with id {}", id)))?;
        match field {
            StatField::Views => article.views += 1,
            StatField::Comments => article.comments += 1,
            StatField::Shares => article.shares += 1,
        }
        Ok(())
    }

    async fn get_trends(&self) -> Result<Vec<Trend>> {
        let store = self.store.read().await;
        let mut trends = store.trends.clone();
        trends.sort_by(|a, b| b.posts.cmp(&a.posts));
        Ok(trends)
    }

    async fn get_analytics(&self) -> Result<Option<Analytics>> {
        let store = self.store.read().await;
        Ok(Some(store.analytics.clone()))
    }

    async fn update_analytics(&self, update: AnalyticsUpdate) -> Result<Analytics> {
        let mut store = self.store.write().await;
        if let Some(daily_reads) = update.daily_reads {
            store.analytics.daily_reads = daily_reads;
        }
        if let Some(ai_articles) = update.ai_articles {
            store.analytics.ai_articles = ai_articles;
        }
        if let Some(active_users) = update.active_users {
            store.analytics.active_users = active_users;
        }
        if let Some(top_category) = update.top_category {
            store.analytics.top_category = Some(top_category);
        }
        if let Some(top_category_percent) = update.top_category_percent {
            store.analytics.top_category_percent = top_category_percent;
        }
        Ok(store.analytics.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_article(title: &str) -> NewArticle {
        NewArticle {
            title: title.to_string(),
            summary: "Qisqacha mazmun".to_string(),
            content: "To'liq matn".to_string(),
            category: "Texnologiya".to_string(),
            tags: vec!["test".to_string()],
            is_ai_generated: true,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_timestamps_and_zeroed_counters() {
        let storage = MemoryStorage::new();
        let article = storage.create_article(sample_article("Birinchi")).await.unwrap();

        assert!(!article.id.is_empty());
        assert_eq!(article.views, 0);
        assert_eq!(article.comments, 0);
        assert_eq!(article.shares, 0);
        assert_eq!(article.published_at, article.created_at);

        let fetched = storage.get_article(&article.id).await.unwrap();
        assert_eq!(fetched.unwrap().title, "Birinchi");
    }

    #[tokio::test]
    async fn recent_articles_are_newest_first() {
        let storage = MemoryStorage::new();
        for title in ["Birinchi", "Ikkinchi", "Uchinchi"] {
            storage.create_article(sample_article(title)).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let recent = storage.get_recent_articles(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].title, "Uchinchi");
        assert_eq!(recent[1].title, "Ikkinchi");
    }

    #[tokio::test]
    async fn stats_update_increments_single_counter() {
        let storage = MemoryStorage::new();
        let article = storage.create_article(sample_article("Statistika")).await.unwrap();

        storage.update_article_stats(&article.id, StatField::Views).await.unwrap();
        storage.update_article_stats(&article.id, StatField::Views).await.unwrap();
        storage.update_article_stats(&article.id, StatField::Shares).await.unwrap();

        let fetched = storage.get_article(&article.id).await.unwrap().unwrap();
        assert_eq!(fetched.views, 2);
        assert_eq!(fetched.comments, 0);
        assert_eq!(fetched.shares, 1);

        let missing = storage.update_article_stats("yo'q", StatField::Views).await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn analytics_patch_is_partial() {
        let storage = MemoryStorage::new();
        let before = storage.get_analytics().await.unwrap().unwrap();
        assert_eq!(before.ai_articles, 0);

        let after = storage
            .update_analytics(AnalyticsUpdate {
                ai_articles: Some(5),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(after.ai_articles, 5);
        assert_eq!(after.daily_reads, before.daily_reads);
        assert_eq!(after.id, before.id);
    }

    #[tokio::test]
    async fn seeded_trends_are_sorted_by_posts() {
        let storage = MemoryStorage::with_seed_data().await;
        let trends = storage.get_trends().await.unwrap();
        assert_eq!(trends.len(), 4);
        assert_eq!(trends[0].topic, "#AI_Uzbekistan");
        assert!(trends.windows(2).all(|w| w[0].posts >= w[1].posts));
    }
}
