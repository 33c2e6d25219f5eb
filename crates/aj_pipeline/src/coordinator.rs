use crate::config::PipelineConfig;
use crate::content::ContentGenerator;
use crate::dedup::DuplicateGuard;
use crate::images::ImageResolver;
use crate::publisher::Publisher;
use crate::topics::{TopicSelector, TopicSource};
use aj_core::{
    AnalyticsUpdate, ArticleStorage, HeadlineProvider, ImageProvider, MessagingApi, NewArticle,
    Result, TextGenerator,
};
use chrono::Utc;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Outcome of a single pipeline tick. Errors never escape: a failed run
/// reports itself here after being logged and (when warranted) notified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { article_id: String, published: bool },
    SkippedInFlight,
    SkippedDuplicate,
    Failed,
}

struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Owns the per-process run state and orchestrates one generation run at a
/// time. The in-flight flag, last-posted hash and the selector's used-topic
/// set are all process-local: restarts reset them, and running two
/// instances of the service reintroduces duplicate-posting risk that the
/// duplicate guard only partially covers.
pub struct Coordinator {
    storage: Arc<dyn ArticleStorage>,
    topics: TopicSelector,
    content: ContentGenerator,
    images: ImageResolver,
    publisher: Publisher,
    messaging: Arc<dyn MessagingApi>,
    guard: DuplicateGuard,
    config: PipelineConfig,
    in_flight: AtomicBool,
    last_posted_hash: Mutex<Option<String>>,
}

impl Coordinator {
    pub fn new(
        storage: Arc<dyn ArticleStorage>,
        generator: Arc<dyn TextGenerator>,
        images: Arc<dyn ImageProvider>,
        headlines: Arc<dyn HeadlineProvider>,
        messaging: Arc<dyn MessagingApi>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            topics: TopicSelector::new(headlines, generator.clone(), storage.clone(), &config),
            content: ContentGenerator::new(generator),
            images: ImageResolver::new(images),
            publisher: Publisher::new(
                messaging.clone(),
                config.site_url.clone(),
                config.chat_id.clone(),
            ),
            guard: DuplicateGuard::new(&config),
            storage,
            messaging,
            config,
            in_flight: AtomicBool::new(false),
            last_posted_hash: Mutex::new(None),
        }
    }

    /// Execute one pipeline tick. Skipped outright when a run is already
    /// in flight; there is no queueing or replay of skipped ticks.
    pub async fn run_once(&self) -> RunOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            info!("⏭️ A run is already in flight, skipping this tick");
            return RunOutcome::SkippedInFlight;
        }
        let _guard = FlightGuard(&self.in_flight);

        info!("🚀 Starting automated content generation");
        match self.execute().await {
            Ok(outcome) => outcome,
            Err(e) => {
                if e.is_quota() {
                    warn!("⚠️ Provider quota exhausted; the template fallback absorbs this");
                } else {
                    error!(error = %e, "❌ Content generation run failed");
                    let message = format!(
                        "🚨 *Kritik xatolik*\n\nVaqt: {}\nXatolik: {}",
                        Utc::now().format("%Y-%m-%d %H:%M:%S"),
                        e
                    );
                    if let Err(notify_err) =
                        self.messaging.send_message(&self.config.chat_id, &message).await
                    {
                        warn!(error = %notify_err, "Failed to send failure notification");
                    }
                }
                RunOutcome::Failed
            }
        }
    }

    async fn execute(&self) -> Result<RunOutcome> {
        let recent = self
            .storage
            .get_recent_articles(self.config.dedup_window)
            .await?;

        let choice = self.topics.select_topic().await;

        info!(topic = %choice.topic, "📝 Generating article");
        let generated = self.content.generate(&choice.topic, &choice.category).await;

        info!(topic = %choice.topic, "🖼️ Resolving article image");
        let image_url = self.images.resolve(&choice.topic).await;

        if self
            .guard
            .is_duplicate(&generated.title, &generated.summary, &recent)
        {
            info!(title = %generated.title, "⏭️ Duplicate article detected, skipping");
            return Ok(RunOutcome::SkippedDuplicate);
        }

        let hash = DuplicateGuard::content_hash(&generated.title, &generated.summary);
        if self.last_posted_hash.lock().await.as_deref() == Some(hash.as_str()) {
            info!("⏭️ Same content hash as the last post, skipping to prevent a duplicate send");
            return Ok(RunOutcome::SkippedDuplicate);
        }

        let article = self
            .storage
            .create_article(NewArticle {
                title: generated.title,
                summary: generated.summary,
                content: generated.content,
                category: generated.category,
                tags: generated.tags,
                is_ai_generated: true,
                image_url,
            })
            .await?;
        info!(title = %article.title, id = %article.id, "💾 Article saved");

        let mut published = false;
        let externally_sourced = choice.source == TopicSource::ExternalHeadline;
        if !externally_sourced || self.config.publish_external_headlines {
            published = self.publisher.publish(&article).await;
            if published {
                *self.last_posted_hash.lock().await = Some(hash);
                info!(title = %article.title, "✅ Posted to the channel");
            } else {
                warn!(title = %article.title, "⚠️ Article saved but channel posting failed");
            }
        } else {
            info!("ℹ️ Article saved; channel posting for externally sourced topics is disabled");
        }

        // Analytics are advisory; a failure here never fails the run.
        if let Err(e) = self.bump_analytics().await {
            warn!(error = %e, "Analytics update failed");
        }

        Ok(RunOutcome::Completed {
            article_id: article.id,
            published,
        })
    }

    async fn bump_analytics(&self) -> Result<()> {
        if let Some(analytics) = self.storage.get_analytics().await? {
            let reads_boost = rand::thread_rng().gen_range(20..70);
            self.storage
                .update_analytics(AnalyticsUpdate {
                    ai_articles: Some(analytics.ai_articles + 1),
                    daily_reads: Some(analytics.daily_reads + reads_boost),
                    ..Default::default()
                })
                .await?;
        }
        Ok(())
    }
}
