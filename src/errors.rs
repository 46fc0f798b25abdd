use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Failed to parse Telegram update: {0}")]
    ParseError(String),

    #[error("Failed to access Telegram API: {0}")]
    TelegramError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("News source responded with status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration problems detected once, when the handler is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        RelayError::HttpError(error.to_string())
    }
}

impl From<teloxide::RequestError> for RelayError {
    fn from(error: teloxide::RequestError) -> Self {
        RelayError::TelegramError(error.to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(error: serde_json::Error) -> Self {
        RelayError::ParseError(error.to_string())
    }
}
