//! Webhook Lambda handler - thin router in front of the command dispatcher.
//!
//! This module handles:
//! - Method and configuration checks
//! - Webhook secret verification
//! - Update decoding and dispatch under an acknowledgement budget

use std::sync::Arc;
use std::time::Duration;

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use super::commands::Dispatcher;
use super::{helpers, parsing, signature};
use crate::core::config::WebhookConfig;
use crate::errors::{ConfigError, RelayError};
use crate::news::NewsClient;
use crate::telegram::{MessageClient, Update};

/// Everything the webhook needs per invocation, built once per process.
pub struct WebhookService {
    dispatcher: Arc<Dispatcher>,
    webhook_secret: Option<String>,
    ack_timeout: Duration,
}

impl WebhookService {
    #[must_use]
    pub fn new(config: &WebhookConfig, client: Arc<dyn MessageClient>) -> Self {
        let news = config
            .news_api_url
            .as_ref()
            .map(|url| NewsClient::with_timeout(url.clone(), config.news_api_timeout));
        Self {
            dispatcher: Arc::new(Dispatcher::new(client, news)),
            webhook_secret: config.webhook_secret.clone(),
            ack_timeout: config.ack_timeout,
        }
    }

    /// Dispatches `update` on a spawned task and waits up to the ack budget.
    ///
    /// A task still running when the budget elapses keeps going and counts as
    /// initiated; only a failure observed within the budget is reported.
    async fn dispatch_with_timeout(&self, update: Update) -> Result<(), RelayError> {
        let dispatcher = Arc::clone(&self.dispatcher);
        let handle = tokio::spawn(
            async move { dispatcher.dispatch(&update).await }.in_current_span(),
        );

        match tokio::time::timeout(self.ack_timeout, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => Err(RelayError::TelegramError(format!(
                "Dispatch task failed: {join_err}"
            ))),
            Err(_) => {
                error!(
                    "Dispatch still running after {:?}; acknowledging, the reply may be lost",
                    self.ack_timeout
                );
                Ok(())
            }
        }
    }
}

/// Handles one webhook request and always produces an HTTP response value.
pub async fn handle_request(
    service: Result<&WebhookService, &ConfigError>,
    payload: &Value,
) -> Value {
    let correlation_id = Uuid::new_v4().to_string();
    let span = info_span!("webhook", %correlation_id);

    async move {
        let method = parsing::request_method(payload).unwrap_or("");
        info!(method, "Webhook received request");

        if !method.eq_ignore_ascii_case("POST") {
            return helpers::method_not_allowed();
        }

        let service = match service {
            Ok(service) => service,
            Err(e) => {
                error!("Config error: {}", e);
                return helpers::err_response(500, "Bot is not configured");
            }
        };

        if let Some(secret) = service.webhook_secret.as_deref() {
            let received = parsing::get_header_value(payload, signature::SECRET_TOKEN_HEADER);
            if !signature::verify_secret_token(received, secret) {
                return helpers::err_response(401, "Invalid secret token");
            }
        }

        let update = match parsing::extract_body(payload)
            .and_then(|body| serde_json::from_str::<Update>(&body).map_err(RelayError::from))
        {
            Ok(update) => update,
            Err(e) => {
                error!("Failed to read update: {}", e);
                return helpers::err_response(500, "Failed to process update");
            }
        };

        info!(update_id = update.update_id, "Dispatching update");
        match service.dispatch_with_timeout(update).await {
            Ok(()) => helpers::ok_ack(),
            Err(e) => {
                error!("Error processing update: {}", e);
                helpers::err_response(500, "Failed to process update")
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
    service: Result<&WebhookService, &ConfigError>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(handle_request(service, &event.payload).await)
}
