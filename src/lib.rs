/// newsrelay - relays Inshorts-style news headlines into Telegram.
///
/// This crate implements a two-Lambda architecture:
/// 1. A webhook Lambda that receives Telegram updates and answers `/start` and
///    `/news [category]` commands in the same invocation
/// 2. A broadcast Lambda, triggered on a schedule, that posts the latest
///    headline to a fixed channel
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for serverless execution
/// - teloxide for Telegram Bot API calls
/// - reqwest for fetching headlines
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use newsrelay::core::models::{Category, Destination};
/// use newsrelay::news::NewsClient;
/// use newsrelay::telegram::{MessageClient, TelegramClient, TextMode};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     newsrelay::setup_logging();
///
///     let telegram = Arc::new(TelegramClient::new("dummy_token"));
///     let news = NewsClient::new("https://inshortsapi.vercel.app/news");
///
///     if let Some(headline) = news.latest(Category::Technology).await? {
///         let text = newsrelay::telegram::format_headline(&headline);
///         telegram
///             .send_text(&Destination::Channel("@my_channel".into()), &text, TextMode::Html, true)
///             .await?;
///     }
///
///     Ok(())
/// }
/// ```
// Module declarations
pub mod api;
pub mod broadcast;
pub mod core;
pub mod errors;
pub mod news;
pub mod telegram;

pub use errors::{ConfigError, RelayError};

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Installs a tracing-subscriber JSON formatter suitable for `CloudWatch` Logs.
/// The level comes from `RUST_LOG` and defaults to `info`. Calling it more than
/// once is harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// newsrelay::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
