use crate::types::{Headline, ImageResult};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Search for images matching a free-text query.
    async fn search(&self, query: &str) -> Result<Vec<ImageResult>>;
}

#[async_trait]
pub trait HeadlineProvider: Send + Sync {
    /// Current top headlines for an optional category and a region code.
    /// Implementations absorb their own transport failures and return an
    /// empty list rather than erroring.
    async fn fetch_trending(&self, category: Option<&str>, region: &str) -> Result<Vec<Headline>>;
}

#[async_trait]
pub trait MessagingApi: Send + Sync {
    /// Post a photo with a caption to a chat or channel.
    async fn send_photo(&self, chat: &str, photo_url: &str, caption: &str) -> Result<()>;

    /// Post a plain text message to a chat or channel.
    async fn send_message(&self, chat: &str, text: &str) -> Result<()>;
}
