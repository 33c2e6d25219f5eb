pub mod models;

pub use models::{create_model, Config};
pub use models::gemini::GeminiModel;
pub use models::template::{template_article, TemplateModel};

pub mod prelude {
    pub use super::models::create_model;
    pub use super::Config;
    pub use aj_core::{Error, GeneratedArticle, Result, TextGenerator, TrendSignal};
}
