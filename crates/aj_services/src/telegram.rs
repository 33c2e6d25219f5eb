use aj_core::{Error, MessagingApi, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

#[derive(Serialize)]
struct SendPhoto<'a> {
    chat_id: &'a str,
    photo: &'a str,
    caption: &'a str,
    parse_mode: &'a str,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

pub struct TelegramClient {
    client: Arc<Client>,
    bot_token: Option<String>,
    base_url: String,
}

impl TelegramClient {
    pub fn new(bot_token: Option<String>, base_url: Option<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            bot_token: bot_token.filter(|t| !t.is_empty()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("TELEGRAM_BOT_TOKEN").ok(), None)
    }

    fn endpoint(&self, method: &str) -> Result<String> {
        let token = self
            .bot_token
            .as_deref()
            .ok_or_else(|| Error::Config("Telegram bot token not configured".to_string()))?;
        Ok(format!("{}/bot{}/{}", self.base_url, token, method))
    }

    async fn post<T: Serialize>(&self, method: &str, body: &T) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint(method)?)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "Telegram API error {}: {}",
                status, body
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("bot_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl MessagingApi for TelegramClient {
    async fn send_photo(&self, chat: &str, photo_url: &str, caption: &str) -> Result<()> {
        self.post(
            "sendPhoto",
            &SendPhoto {
                chat_id: chat,
                photo: photo_url,
                caption,
                parse_mode: "Markdown",
            },
        )
        .await
    }

    async fn send_message(&self, chat: &str, text: &str) -> Result<()> {
        self.post(
            "sendMessage",
            &SendMessage {
                chat_id: chat,
                text,
                parse_mode: "Markdown",
            },
        )
        .await
    }
}
