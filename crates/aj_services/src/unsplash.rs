use aj_core::{Error, ImageProvider, ImageResult, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

const DEFAULT_BASE_URL: &str = "https://api.unsplash.com";

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Deserialize)]
struct Photo {
    urls: PhotoUrls,
    alt_description: Option<String>,
}

#[derive(Deserialize)]
struct PhotoUrls {
    regular: String,
}

pub struct UnsplashClient {
    client: Arc<Client>,
    access_key: Option<String>,
    base_url: String,
}

impl UnsplashClient {
    pub fn new(access_key: Option<String>, base_url: Option<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            access_key: access_key.filter(|k| !k.is_empty()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("UNSPLASH_ACCESS_KEY").ok(), None)
    }
}

impl fmt::Debug for UnsplashClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnsplashClient")
            .field("access_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl ImageProvider for UnsplashClient {
    async fn search(&self, query: &str) -> Result<Vec<ImageResult>> {
        let access_key = self
            .access_key
            .as_deref()
            .ok_or_else(|| Error::Config("Unsplash access key not configured".to_string()))?;

        let response = self
            .client
            .get(format!("{}/search/photos", self.base_url))
            .query(&[
                ("query", query),
                ("per_page", "5"),
                ("orientation", "landscape"),
            ])
            .header("Authorization", format!("Client-ID {}", access_key))
            .header("Accept-Version", "v1")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Provider(format!("Unsplash API error {}", status)));
        }

        let parsed = response.json::<SearchResponse>().await?;
        Ok(parsed
            .results
            .into_iter()
            .map(|photo| ImageResult {
                url: photo.urls.regular,
                alt_text: photo.alt_description.filter(|s| !s.is_empty()),
            })
            .collect())
    }
}
