use aj_core::{Error, Result, TextGenerator};
use std::sync::Arc;

pub mod gemini;
pub mod template;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub base_url: Option<String>,
}

/// Build a generator from configuration. `gemini` (the default) talks to
/// the hosted API; `template` is fully offline.
pub fn create_model(config: Config) -> Result<Arc<dyn TextGenerator>> {
    match config.model_name.as_deref().unwrap_or("gemini") {
        "gemini" => Ok(Arc::new(gemini::GeminiModel::new(
            config.api_key,
            config.base_url,
        ))),
        "template" => Ok(Arc::new(template::TemplateModel)),
        other => Err(Error::Config(format!("Unknown model: {}", other))),
    }
}
