// Lambda entry point for the Telegram webhook function

use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use newsrelay::api::{WebhookService, function_handler};
use newsrelay::core::config::WebhookConfig;
use newsrelay::telegram::TelegramClient;
use serde_json::Value;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    newsrelay::setup_logging();

    // A missing variable must not crash the function: each request answers 500.
    let service = WebhookConfig::from_env()
        .map(|config| {
            let client = Arc::new(TelegramClient::new(&config.telegram_bot_token));
            WebhookService::new(&config, client)
        })
        .inspect_err(|e| error!("Webhook configuration error: {}", e));
    let service = service.as_ref();

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(service, event).await
    }))
    .await
}
