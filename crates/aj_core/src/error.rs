use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// True for rate-limit/quota conditions the generation fallback absorbs.
    /// These are expected and self-healing, so the coordinator logs them
    /// without raising an external alert.
    pub fn is_quota(&self) -> bool {
        let message = self.to_string().to_lowercase();
        message.contains("quota") || message.contains("429") || message.contains("rate limit")
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_errors_are_classified() {
        assert!(Error::Inference("API quota exceeded".to_string()).is_quota());
        assert!(Error::Inference("status 429 Too Many Requests".to_string()).is_quota());
        assert!(!Error::Inference("connection refused".to_string()).is_quota());
        assert!(!Error::Storage("disk full".to_string()).is_quota());
    }
}
