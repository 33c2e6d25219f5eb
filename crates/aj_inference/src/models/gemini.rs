use aj_core::{Article, Error, GeneratedArticle, Result, TextGenerator, TrendSignal};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-1.5-flash";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<TextPart>,
}

impl Content {
    fn text(text: String) -> Self {
        Self {
            parts: vec![TextPart { text }],
        }
    }
}

#[derive(Serialize)]
struct TextPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ArticlePayload {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct TrendsPayload {
    #[serde(default)]
    trends: Vec<TrendSignal>,
}

pub struct GeminiModel {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl GeminiModel {
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_key: api_key.unwrap_or_default(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    async fn generate_json(&self, system_instruction: String, prompt: String) -> Result<String> {
        let request = GenerateRequest {
            system_instruction: Content::text(system_instruction),
            contents: vec![Content::text(prompt)],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent?key={}",
                self.base_url, MODEL, self.api_key
            ))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let parsed = response.json::<GenerateResponse>().await?;
        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| Error::Inference("Empty Gemini response".to_string()))?;
        debug!(chars = text.len(), "Gemini returned structured payload");
        Ok(text)
    }
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TextGenerator for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate_article(&self, topic: &str, category: &str) -> Result<GeneratedArticle> {
        let system = format!(
            "Siz professional jurnalistsiz. O'zbek tilida yangilik maqolalari yozasiz. \
             Javobni JSON formatida bering: {{\"title\": \"maqola sarlavhasi\", \
             \"summary\": \"qisqa mazmun (150 so'zdan kam)\", \
             \"content\": \"to'liq maqola matni (500+ so'z)\", \
             \"category\": \"{}\", \"tags\": [\"teglar\", \"ro'yxati\"]}}",
            category
        );
        let prompt = format!(
            "O'zbek tilida \"{}\" mavzusida yangilik maqolasi yozing. \
             Maqola zamonaviy, ma'lumotli va qiziqarli bo'lishi kerak. \
             JSON formatida javob bering.",
            topic
        );

        let text = self.generate_json(system, prompt).await?;
        let payload: ArticlePayload = serde_json::from_str(&text)?;

        // Missing fields get topic-derived placeholders so downstream code
        // never sees an empty required field.
        Ok(GeneratedArticle {
            title: payload
                .title
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| format!("{} haqida yangilik", topic)),
            summary: payload
                .summary
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Yangilik haqida qisqacha ma'lumot".to_string()),
            content: payload
                .content
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Maqola matni mavjud emas".to_string()),
            category: payload
                .category
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| category.to_string()),
            tags: payload
                .tags
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| vec![topic.to_string()]),
        })
    }

    async fn analyze_trends(&self, articles: &[Article]) -> Result<Vec<TrendSignal>> {
        let articles_text = articles
            .iter()
            .map(|a| format!("{} {}", a.title, a.summary))
            .collect::<Vec<_>>()
            .join("\n");

        let system = "Berilgan maqolalar asosida eng muhim trendlarni aniqlang. \
                      JSON formatida javob bering: {\"trends\": [{\"topic\": \"trend nomi\", \
                      \"relevance\": 1_dan_100_gacha_ball}]}"
            .to_string();
        let prompt = format!("Bu maqolalarni tahlil qiling:\n{}", articles_text);

        let text = self.generate_json(system, prompt).await?;
        let payload: TrendsPayload = serde_json::from_str(&text)?;
        let mut trends = payload.trends;
        trends.sort_by(|a, b| b.relevance.cmp(&a.relevance));
        Ok(trends)
    }
}
