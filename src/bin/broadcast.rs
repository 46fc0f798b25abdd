// Lambda entry point for the scheduled broadcast function

use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use newsrelay::broadcast::{Broadcaster, function_handler};
use newsrelay::core::config::BroadcastConfig;
use newsrelay::telegram::TelegramClient;
use serde_json::Value;
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    newsrelay::setup_logging();

    let broadcaster = BroadcastConfig::from_env()
        .map(|config| {
            let client = Arc::new(TelegramClient::new(&config.telegram_bot_token));
            Broadcaster::new(&config, client)
        })
        .inspect_err(|e| error!("Broadcast configuration error: {}", e));
    let broadcaster = broadcaster.as_ref();

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(broadcaster, event).await
    }))
    .await
}
