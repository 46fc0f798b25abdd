use std::env;
use std::time::Duration;

use crate::core::models::{Category, Destination};
use crate::errors::ConfigError;

/// Headline source used by the broadcast Lambda when none is configured.
pub const DEFAULT_BROADCAST_NEWS_API_URL: &str = "https://inshortsapi.vercel.app/news";

const DEFAULT_NEWS_API_TIMEOUT_SECS: u64 = 10;

/// Time reserved on top of the news fetch for the Telegram sends that follow it.
pub const ACK_SEND_MARGIN: Duration = Duration::from_secs(5);

/// Configuration of the webhook (command) Lambda.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub telegram_bot_token: String,
    /// Base URL of the headline source; `None` makes `/news` answer with a
    /// configuration error instead of fetching.
    pub news_api_url: Option<String>,
    pub webhook_secret: Option<String>,
    /// Always longer than `news_api_timeout`, so `/news` finishes (headline or
    /// error message) before the Lambda answers and freezes.
    pub ack_timeout: Duration,
    pub news_api_timeout: Duration,
}

/// Configuration of the scheduled broadcast Lambda.
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    pub telegram_bot_token: String,
    pub channel: Destination,
    pub news_api_url: String,
    pub category: Category,
    pub news_api_timeout: Duration,
}

impl WebhookConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let news_api_timeout = Duration::from_secs(parse_u64(
            &lookup,
            "NEWS_API_TIMEOUT_SECS",
            DEFAULT_NEWS_API_TIMEOUT_SECS,
        )?);

        let ack_timeout = match optional(&lookup, "WEBHOOK_ACK_TIMEOUT_MS") {
            Some(_) => Duration::from_millis(parse_u64(&lookup, "WEBHOOK_ACK_TIMEOUT_MS", 0)?),
            None => news_api_timeout + ACK_SEND_MARGIN,
        };
        if ack_timeout <= news_api_timeout {
            return Err(ConfigError::Invalid {
                var: "WEBHOOK_ACK_TIMEOUT_MS",
                reason: format!(
                    "{} ms must exceed NEWS_API_TIMEOUT_SECS ({} ms)",
                    ack_timeout.as_millis(),
                    news_api_timeout.as_millis()
                ),
            });
        }

        Ok(Self {
            telegram_bot_token: required(&lookup, "TELEGRAM_BOT_TOKEN")?,
            news_api_url: optional(&lookup, "NEWS_API_URL"),
            webhook_secret: optional(&lookup, "TELEGRAM_WEBHOOK_SECRET"),
            ack_timeout,
            news_api_timeout,
        })
    }
}

impl BroadcastConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let telegram_bot_token = required(&lookup, "TELEGRAM_BOT_TOKEN")?;
        let channel = required(&lookup, "TELEGRAM_CHANNEL_ID")?
            .parse::<Destination>()
            .map_err(|reason| ConfigError::Invalid {
                var: "TELEGRAM_CHANNEL_ID",
                reason,
            })?;
        let category = match optional(&lookup, "BROADCAST_CATEGORY") {
            Some(raw) => raw.parse::<Category>().map_err(|e| ConfigError::Invalid {
                var: "BROADCAST_CATEGORY",
                reason: format!("{e}; expected one of: {}", Category::valid_list()),
            })?,
            None => Category::All,
        };

        Ok(Self {
            telegram_bot_token,
            channel,
            news_api_url: optional(&lookup, "BROADCAST_NEWS_API_URL")
                .unwrap_or_else(|| DEFAULT_BROADCAST_NEWS_API_URL.to_string()),
            category,
            news_api_timeout: Duration::from_secs(parse_u64(
                &lookup,
                "NEWS_API_TIMEOUT_SECS",
                DEFAULT_NEWS_API_TIMEOUT_SECS,
            )?),
        })
    }
}

fn optional<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, var).ok_or(ConfigError::Missing(var))
}

fn parse_u64<F>(lookup: &F, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match optional(lookup, var) {
        Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
