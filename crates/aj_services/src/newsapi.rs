use aj_core::{Headline, HeadlineProvider, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

#[derive(Deserialize)]
struct TopHeadlinesResponse {
    #[serde(default)]
    articles: Vec<ApiArticle>,
}

#[derive(Deserialize)]
struct ApiArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    source: Option<ApiSource>,
}

#[derive(Deserialize)]
struct ApiSource {
    name: Option<String>,
}

pub struct NewsApiClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl NewsApiClient {
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key: api_key.unwrap_or_default(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("NEWS_API_KEY").ok(), None)
    }

    async fn fetch(&self, category: Option<&str>, region: &str) -> Result<Vec<Headline>> {
        let mut query = vec![
            ("country", region.to_string()),
            ("apiKey", self.api_key.clone()),
        ];
        if let Some(category) = category {
            query.push(("category", category.to_string()));
        }

        let response = self
            .client
            .get(format!("{}/top-headlines", self.base_url))
            .query(&query)
            .send()
            .await?
            .error_for_status()?;

        let parsed = response.json::<TopHeadlinesResponse>().await?;
        Ok(parsed
            .articles
            .into_iter()
            .filter_map(|article| {
                let title = article.title.filter(|t| !t.is_empty())?;
                Some(Headline {
                    title,
                    description: article.description,
                    url: article.url,
                    source: article.source.and_then(|s| s.name),
                })
            })
            .collect())
    }
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl HeadlineProvider for NewsApiClient {
    /// Transport and API failures never escape this boundary; the caller
    /// sees an empty list and falls through to its next topic source.
    async fn fetch_trending(&self, category: Option<&str>, region: &str) -> Result<Vec<Headline>> {
        match self.fetch(category, region).await {
            Ok(headlines) => Ok(headlines),
            Err(e) => {
                warn!(error = %e, "Failed to fetch trending headlines");
                Ok(Vec::new())
            }
        }
    }
}
