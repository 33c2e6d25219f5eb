pub mod newsapi;
pub mod telegram;
pub mod unsplash;

pub use newsapi::NewsApiClient;
pub use telegram::TelegramClient;
pub use unsplash::UnsplashClient;
