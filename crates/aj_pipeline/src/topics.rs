use crate::config::PipelineConfig;
use crate::dedup::{normalize, DuplicateGuard};
use aj_core::{ArticleStorage, HeadlineProvider, Result, TextGenerator};
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicSource {
    ExternalHeadline,
    TrendDerived,
    FallbackPool,
}

#[derive(Debug, Clone)]
pub struct TopicChoice {
    pub topic: String,
    pub category: String,
    pub source: TopicSource,
}

/// Chooses the next topic to write about: fresh external headlines first,
/// then trend analysis over our own recent articles, then a rotating
/// fallback pool. The first two steps absorb their own failures; the pool
/// draw cannot fail.
pub struct TopicSelector {
    headlines: Arc<dyn HeadlineProvider>,
    generator: Arc<dyn TextGenerator>,
    storage: Arc<dyn ArticleStorage>,
    pool: Vec<String>,
    used: Mutex<HashSet<String>>,
    dedup_window: usize,
    trend_window: usize,
    title_prefix_len: usize,
    default_category: String,
    headline_category: String,
    headline_region: String,
}

impl TopicSelector {
    pub fn new(
        headlines: Arc<dyn HeadlineProvider>,
        generator: Arc<dyn TextGenerator>,
        storage: Arc<dyn ArticleStorage>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            headlines,
            generator,
            storage,
            pool: config.fallback_topics.clone(),
            used: Mutex::new(HashSet::new()),
            dedup_window: config.dedup_window,
            trend_window: config.trend_window,
            title_prefix_len: config.title_prefix_len,
            default_category: config.default_category.clone(),
            headline_category: config.headline_category.clone(),
            headline_region: config.headline_region.clone(),
        }
    }

    pub async fn select_topic(&self) -> TopicChoice {
        match self.from_headlines().await {
            Ok(Some(topic)) => {
                info!(topic = %topic, "📰 Using an external headline as the topic");
                return TopicChoice {
                    topic,
                    category: self.default_category.clone(),
                    source: TopicSource::ExternalHeadline,
                };
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Headline lookup failed, falling through"),
        }

        match self.from_trends().await {
            Ok(Some(topic)) => {
                info!(topic = %topic, "📈 Using a trend-derived topic");
                return TopicChoice {
                    topic,
                    category: self.default_category.clone(),
                    source: TopicSource::TrendDerived,
                };
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Trend analysis failed, falling through"),
        }

        let topic = self.draw_fallback().await;
        info!(topic = %topic, "🎲 Using a fallback-pool topic");
        TopicChoice {
            topic,
            category: self.default_category.clone(),
            source: TopicSource::FallbackPool,
        }
    }

    /// First trending headline whose title does not overlap anything in
    /// the recent window.
    async fn from_headlines(&self) -> Result<Option<String>> {
        let headlines = self
            .headlines
            .fetch_trending(Some(&self.headline_category), &self.headline_region)
            .await?;
        if headlines.is_empty() {
            return Ok(None);
        }

        let recent = self.storage.get_recent_articles(self.dedup_window).await?;
        let recent_titles: Vec<String> = recent.iter().map(|a| normalize(&a.title)).collect();

        Ok(headlines
            .into_iter()
            .map(|h| h.title)
            .find(|title| {
                let candidate = normalize(title);
                !recent_titles
                    .iter()
                    .any(|known| DuplicateGuard::overlaps(&candidate, known, self.title_prefix_len))
            }))
    }

    /// Top-ranked topic from trend analysis over our recent articles,
    /// with any leading hash marker stripped.
    async fn from_trends(&self) -> Result<Option<String>> {
        let articles = self.storage.get_recent_articles(self.trend_window).await?;
        if articles.is_empty() {
            return Ok(None);
        }

        let trends = self.generator.analyze_trends(&articles).await?;
        Ok(trends
            .first()
            .map(|t| t.topic.trim_start_matches('#').to_string())
            .filter(|topic| !topic.is_empty()))
    }

    /// Uniform draw among pool entries not yet used this cycle; the used
    /// set clears once the whole pool has been consumed, so every entry
    /// appears exactly once per cycle.
    pub async fn draw_fallback(&self) -> String {
        if self.pool.is_empty() {
            return self.default_category.clone();
        }

        let mut used = self.used.lock().await;
        if used.len() >= self.pool.len() {
            used.clear();
        }

        let available: Vec<&String> = self.pool.iter().filter(|t| !used.contains(*t)).collect();
        let pick = available[rand::thread_rng().gen_range(0..available.len())].clone();
        used.insert(pick.clone());
        pick
    }
}
