//! Telegram message client
//!
//! [`MessageClient`] is the seam both Lambdas send through; [`TelegramClient`]
//! implements it with teloxide. Tests substitute a recording implementation.

use async_trait::async_trait;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatId, LinkPreviewOptions, ParseMode, Recipient};
use tracing::debug;

use crate::core::models::Destination;
use crate::errors::RelayError;

/// How Telegram should interpret the message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    Plain,
    Html,
}

#[async_trait]
pub trait MessageClient: Send + Sync {
    /// Sends `text` to `destination`.
    async fn send_text(
        &self,
        destination: &Destination,
        text: &str,
        mode: TextMode,
        disable_link_preview: bool,
    ) -> Result<(), RelayError>;

    /// Plain text with link previews left on.
    async fn send_plain(&self, destination: &Destination, text: &str) -> Result<(), RelayError> {
        self.send_text(destination, text, TextMode::Plain, false)
            .await
    }
}

/// Teloxide-backed [`MessageClient`].
pub struct TelegramClient {
    bot: teloxide::Bot,
}

impl TelegramClient {
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self {
            bot: teloxide::Bot::new(token),
        }
    }
}

fn recipient(destination: &Destination) -> Recipient {
    match destination {
        Destination::Chat(id) => Recipient::Id(ChatId(*id)),
        Destination::Channel(name) => Recipient::ChannelUsername(name.clone()),
    }
}

#[async_trait]
impl MessageClient for TelegramClient {
    async fn send_text(
        &self,
        destination: &Destination,
        text: &str,
        mode: TextMode,
        disable_link_preview: bool,
    ) -> Result<(), RelayError> {
        let mut request = self.bot.send_message(recipient(destination), text);
        if mode == TextMode::Html {
            request = request.parse_mode(ParseMode::Html);
        }
        if disable_link_preview {
            request = request.link_preview_options(LinkPreviewOptions {
                is_disabled: true,
                url: None,
                prefer_small_media: false,
                prefer_large_media: false,
                show_above_text: false,
            });
        }

        let sent = request.await?;
        debug!(chat = %destination, message_id = %sent.id, "Telegram message sent");
        Ok(())
    }
}
