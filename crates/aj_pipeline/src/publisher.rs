use aj_core::{Article, MessagingApi};
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, warn};

/// Posts accepted articles to the channel. Prefers an image-attached post,
/// probing the image URL first; any failure on the photo path degrades to
/// a text-only post of the same caption. Never returns an error — the
/// caller only learns success or failure.
pub struct Publisher {
    messaging: Arc<dyn MessagingApi>,
    http: Client,
    site_url: String,
    chat: String,
}

impl Publisher {
    pub fn new(messaging: Arc<dyn MessagingApi>, site_url: String, chat: String) -> Self {
        Self {
            messaging,
            http: Client::new(),
            site_url,
            chat,
        }
    }

    fn caption(&self, article: &Article) -> String {
        format!(
            "*{}*\n\n{}\n\n[📖 Batafsil o'qish]({}/article/{})\n\n#AqlliJurnalist #Yangilik #AI",
            article.title, article.summary, self.site_url, article.id
        )
    }

    async fn image_reachable(&self, url: &str) -> bool {
        match self.http.head(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(url = %url, error = %e, "Image probe failed");
                false
            }
        }
    }

    pub async fn publish(&self, article: &Article) -> bool {
        let caption = self.caption(article);

        if let Some(image_url) = &article.image_url {
            if self.image_reachable(image_url).await {
                match self.messaging.send_photo(&self.chat, image_url, &caption).await {
                    Ok(()) => {
                        info!(title = %article.title, "📱 Posted with image");
                        return true;
                    }
                    Err(e) => {
                        warn!(error = %e, "Photo post failed, falling back to text");
                    }
                }
            }
        }

        match self.messaging.send_message(&self.chat, &caption).await {
            Ok(()) => {
                info!(title = %article.title, "📱 Posted as text");
                true
            }
            Err(e) => {
                warn!(error = %e, "Channel post failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aj_core::{Error, Result};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMessaging {
        photos: Mutex<Vec<String>>,
        messages: Mutex<Vec<String>>,
        fail_photo: bool,
        fail_message: bool,
    }

    #[async_trait]
    impl MessagingApi for RecordingMessaging {
        async fn send_photo(&self, _chat: &str, photo_url: &str, _caption: &str) -> Result<()> {
            if self.fail_photo {
                return Err(Error::Provider("photo rejected".to_string()));
            }
            self.photos.lock().unwrap().push(photo_url.to_string());
            Ok(())
        }

        async fn send_message(&self, _chat: &str, text: &str) -> Result<()> {
            if self.fail_message {
                return Err(Error::Provider("message rejected".to_string()));
            }
            self.messages.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn article(image_url: Option<&str>) -> Article {
        Article {
            id: "abc-123".to_string(),
            title: "Kvant kompyuterlari".to_string(),
            summary: "Qisqacha mazmun".to_string(),
            content: "Matn".to_string(),
            category: "Texnologiya".to_string(),
            tags: vec![],
            is_ai_generated: true,
            image_url: image_url.map(String::from),
            views: 0,
            comments: 0,
            shares: 0,
            published_at: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn caption_links_to_the_article() {
        let messaging = Arc::new(RecordingMessaging::default());
        let publisher = Publisher::new(
            messaging.clone(),
            "https://aqlli-jurnalist.uz".to_string(),
            "@kanal".to_string(),
        );

        assert!(publisher.publish(&article(None)).await);
        let messages = messaging.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("*Kvant kompyuterlari*"));
        assert!(messages[0].contains("https://aqlli-jurnalist.uz/article/abc-123"));
        assert!(messages[0].contains("#AqlliJurnalist"));
    }

    #[tokio::test]
    async fn unreachable_image_degrades_to_text() {
        // Nothing listens on this port; the probe fails and the publisher
        // must still succeed with a text-only post.
        let messaging = Arc::new(RecordingMessaging::default());
        let publisher = Publisher::new(
            messaging.clone(),
            "https://aqlli-jurnalist.uz".to_string(),
            "@kanal".to_string(),
        );

        let ok = publisher
            .publish(&article(Some("http://127.0.0.1:9/none.jpg")))
            .await;
        assert!(ok);
        assert!(messaging.photos.lock().unwrap().is_empty());
        assert_eq!(messaging.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn total_messaging_failure_returns_false() {
        let messaging = Arc::new(RecordingMessaging {
            fail_photo: true,
            fail_message: true,
            ..Default::default()
        });
        let publisher = Publisher::new(
            messaging,
            "https://aqlli-jurnalist.uz".to_string(),
            "@kanal".to_string(),
        );

        assert!(!publisher.publish(&article(None)).await);
    }
}
