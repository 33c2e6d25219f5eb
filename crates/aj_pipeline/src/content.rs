use aj_core::{GeneratedArticle, TextGenerator};
use aj_inference::template_article;
use std::sync::Arc;
use tracing::{info, warn};

/// Wraps the primary generator so a run always gets publishable content.
/// The template fallback is a normal outcome, not an error state: quota
/// exhaustion on the hosted model is expected and self-healing.
pub struct ContentGenerator {
    primary: Arc<dyn TextGenerator>,
}

impl ContentGenerator {
    pub fn new(primary: Arc<dyn TextGenerator>) -> Self {
        Self { primary }
    }

    pub async fn generate(&self, topic: &str, category: &str) -> GeneratedArticle {
        match self.primary.generate_article(topic, category).await {
            Ok(article) => ensure_complete(article, topic, category),
            Err(e) => {
                if e.is_quota() {
                    info!(topic = %topic, "⚠️ Model quota exhausted, using the article template");
                } else {
                    warn!(topic = %topic, error = %e, "⚠️ Generation failed, using the article template");
                }
                template_article(topic, category)
            }
        }
    }
}

/// Backstop for providers that return a partially filled structure: every
/// required field gets a deterministic topic-derived placeholder.
fn ensure_complete(
    mut article: GeneratedArticle,
    topic: &str,
    category: &str,
) -> GeneratedArticle {
    if article.title.trim().is_empty() {
        article.title = format!("{} haqida yangilik", topic);
    }
    if article.summary.trim().is_empty() {
        article.summary = "Yangilik haqida qisqacha ma'lumot".to_string();
    }
    if article.content.trim().is_empty() {
        article.content = "Maqola matni mavjud emas".to_string();
    }
    if article.category.trim().is_empty() {
        article.category = category.to_string();
    }
    if article.tags.is_empty() {
        article.tags = vec![topic.to_string()];
    }
    article
}
