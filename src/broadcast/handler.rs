use std::sync::Arc;

use chrono::Utc;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use super::NOTHING_TO_POST_MESSAGE;
use crate::api::{helpers, parsing};
use crate::core::config::BroadcastConfig;
use crate::core::models::{Category, Destination};
use crate::errors::{ConfigError, RelayError};
use crate::news::NewsClient;
use crate::telegram::{MessageClient, TextMode, format_headline};

/// What one broadcast run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastOutcome {
    /// A headline was sent; carries its title when the source had one.
    Posted { title: Option<String> },
    NothingToPost,
}

/// Fetches the latest headline and pushes it to the configured channel.
pub struct Broadcaster {
    client: Arc<dyn MessageClient>,
    news: NewsClient,
    channel: Destination,
    category: Category,
}

impl Broadcaster {
    #[must_use]
    pub fn new(config: &BroadcastConfig, client: Arc<dyn MessageClient>) -> Self {
        Self {
            client,
            news: NewsClient::with_timeout(config.news_api_url.clone(), config.news_api_timeout),
            channel: config.channel.clone(),
            category: config.category,
        }
    }

    /// Runs the fetch → format → send pipeline once. No retries, no dedup.
    ///
    /// # Errors
    ///
    /// `RelayError::UpstreamStatus` for a non-2xx source answer; any transport,
    /// decoding or Telegram failure otherwise.
    pub async fn broadcast(&self) -> Result<BroadcastOutcome, RelayError> {
        let response = self.news.fetch(self.category).await?;

        let Some(headline) = response.first() else {
            info!(category = %self.category, "Source returned no headlines");
            return Ok(BroadcastOutcome::NothingToPost);
        };

        let text = format_headline(headline);
        self.client
            .send_text(&self.channel, &text, TextMode::Html, true)
            .await?;

        info!(channel = %self.channel, "Headline posted");
        Ok(BroadcastOutcome::Posted {
            title: headline.title.clone(),
        })
    }
}

/// Handles one scheduler trigger and always produces an HTTP response value.
pub async fn handle_request(
    broadcaster: Result<&Broadcaster, &ConfigError>,
    payload: &Value,
) -> Value {
    let correlation_id = Uuid::new_v4().to_string();
    let span = info_span!("broadcast", %correlation_id);

    async move {
        let method = parsing::request_method(payload);
        let is_trigger = match method {
            Some(m) => m.eq_ignore_ascii_case("POST"),
            None => parsing::is_scheduled_event(payload),
        };
        if !is_trigger {
            info!(method = method.unwrap_or(""), "Rejected non-POST trigger");
            return helpers::method_not_allowed();
        }

        let broadcaster = match broadcaster {
            Ok(b) => b,
            Err(e) => {
                error!("Config error: {}", e);
                return helpers::err_response(500, "Broadcast is not configured");
            }
        };

        match broadcaster.broadcast().await {
            Ok(BroadcastOutcome::Posted { title }) => helpers::ok_json(&json!({
                "ok": true,
                "message": "News posted successfully",
                "title": title
            })),
            Ok(BroadcastOutcome::NothingToPost) => helpers::ok_message(NOTHING_TO_POST_MESSAGE),
            Err(RelayError::UpstreamStatus { status, body }) => {
                error!(
                    timestamp = %Utc::now().to_rfc3339(),
                    status,
                    "News source failed, relaying status"
                );
                helpers::upstream_error(status, &body)
            }
            Err(e) => {
                error!(
                    timestamp = %Utc::now().to_rfc3339(),
                    "Broadcast failed: {}", e
                );
                helpers::err_response(500, "Failed to post news")
            }
        }
    }
    .instrument(span)
    .await
}

/// Lambda entrypoint shape: wraps [`handle_request`] for `lambda_runtime`.
///
/// # Errors
///
/// Never fails; every problem is turned into an HTTP response.
pub async fn function_handler(
    broadcaster: Result<&Broadcaster, &ConfigError>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(handle_request(broadcaster, &event.payload).await)
}
