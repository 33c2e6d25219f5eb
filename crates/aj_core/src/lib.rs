pub mod error;
pub mod models;
pub mod providers;
pub mod storage;
pub mod types;

pub use error::Error;
pub use models::TextGenerator;
pub use providers::{HeadlineProvider, ImageProvider, MessagingApi};
pub use storage::ArticleStorage;
pub use types::{
    Analytics, AnalyticsUpdate, Article, GeneratedArticle, Headline, ImageResult, NewArticle,
    StatField, Trend, TrendSignal,
};

pub type Result<T> = std::result::Result<T, Error>;
