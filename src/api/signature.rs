use tracing::error;

/// Header Telegram sets on webhook calls when `setWebhook` received a `secret_token`.
pub const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Compares the received secret token with the configured one.
///
/// Runs in time independent of where the strings first differ.
pub fn verify_secret_token(received: Option<&str>, expected: &str) -> bool {
    let Some(received) = received else {
        error!("Missing {} header", SECRET_TOKEN_HEADER);
        return false;
    };

    let matches = received.len() == expected.len()
        && received
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0;

    if !matches {
        error!("Webhook secret token verification failed");
    }
    matches
}
