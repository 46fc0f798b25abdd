//! Chat command matchers and the dispatcher that runs them.
//!
//! Each matcher looks at an incoming message and either handles it (replying
//! through the [`MessageClient`]) or passes. The first matcher that handles a
//! message wins.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::core::models::{Category, Destination};
use crate::errors::RelayError;
use crate::news::NewsClient;
use crate::telegram::{IncomingMessage, MessageClient, TextMode, Update, format_headline};

// ============================================================================
// User-facing messages
// ============================================================================

pub const UNKNOWN_INPUT_MESSAGE: &str =
    "🤔 Sorry, I didn't understand that. Send /start to see what I can do.";
pub const NOT_CONFIGURED_MESSAGE: &str =
    "⚠️ The news service is not configured. Please contact the bot administrator.";
pub const FETCH_FAILED_MESSAGE: &str = "❌ Failed to fetch news. Please try again later.";
pub const GENERIC_ERROR_MESSAGE: &str =
    "❌ Something went wrong while getting the news. Please try again later.";

#[must_use]
pub fn welcome_message() -> String {
    format!(
        "👋 Welcome to the News Bot!\n\n\
         Commands:\n\
         /news - latest headline from all categories\n\
         /news <category> - latest headline from one category\n\n\
         Categories: {}",
        Category::valid_list()
    )
}

#[must_use]
pub fn fetching_message(category: &str) -> String {
    format!("🔍 Fetching the latest {category} news...")
}

#[must_use]
pub fn invalid_category_message(category: &str) -> String {
    format!(
        "❌ Invalid category \"{category}\".\nValid categories: {}",
        Category::valid_list()
    )
}

#[must_use]
pub fn no_news_message(category: &str) -> String {
    format!("😔 No news found for category: {category}")
}

// ============================================================================
// Matchers
// ============================================================================

/// Shared collaborators handed to every matcher.
pub struct CommandContext {
    pub client: Arc<dyn MessageClient>,
    /// `None` when the headline-source URL is not configured.
    pub news: Option<NewsClient>,
}

#[async_trait]
pub trait CommandMatcher: Send + Sync {
    /// Handles `message` if it is meant for this matcher; returns whether it did.
    async fn try_handle(
        &self,
        ctx: &CommandContext,
        message: &IncomingMessage,
    ) -> Result<bool, RelayError>;
}

/// `/start`: fixed welcome and help text.
pub struct StartCommand;

#[async_trait]
impl CommandMatcher for StartCommand {
    async fn try_handle(
        &self,
        ctx: &CommandContext,
        message: &IncomingMessage,
    ) -> Result<bool, RelayError> {
        if message.command().is_none_or(|c| c.name != "start") {
            return Ok(false);
        }
        let chat = Destination::Chat(message.chat.id);
        ctx.client.send_plain(&chat, &welcome_message()).await?;
        Ok(true)
    }
}

/// `/news [category]`: fetches and sends the latest headline.
pub struct NewsCommand;

#[async_trait]
impl CommandMatcher for NewsCommand {
    async fn try_handle(
        &self,
        ctx: &CommandContext,
        message: &IncomingMessage,
    ) -> Result<bool, RelayError> {
        let Some(command) = message.command().filter(|c| c.name == "news") else {
            return Ok(false);
        };
        let chat = Destination::Chat(message.chat.id);
        let category = Category::normalize_argument(command.args);

        if let Err(e) = send_latest_headline(ctx, &chat, &category).await {
            error!(chat = %chat, category = %category, "News command failed: {}", e);
            if let Err(send_err) = ctx.client.send_plain(&chat, GENERIC_ERROR_MESSAGE).await {
                error!("Failed to report news error to chat {}: {}", chat, send_err);
            }
        }
        Ok(true)
    }
}

/// Replies to any non-command text; unknown commands are left unanswered.
pub struct FallbackReply;

#[async_trait]
impl CommandMatcher for FallbackReply {
    async fn try_handle(
        &self,
        ctx: &CommandContext,
        message: &IncomingMessage,
    ) -> Result<bool, RelayError> {
        if message.text().is_none() {
            return Ok(false);
        }
        if message.is_command() {
            info!(chat_id = message.chat.id, "Ignoring unknown command");
            return Ok(false);
        }
        let chat = Destination::Chat(message.chat.id);
        ctx.client.send_plain(&chat, UNKNOWN_INPUT_MESSAGE).await?;
        Ok(true)
    }
}

/// Steps of `/news` after the category argument was normalized.
async fn send_latest_headline(
    ctx: &CommandContext,
    chat: &Destination,
    category: &str,
) -> Result<(), RelayError> {
    ctx.client
        .send_plain(chat, &fetching_message(category))
        .await?;

    let Ok(parsed) = category.parse::<Category>() else {
        info!(category, "Rejected unknown category");
        ctx.client
            .send_plain(chat, &invalid_category_message(category))
            .await?;
        return Ok(());
    };

    let Some(news) = ctx.news.as_ref() else {
        warn!("NEWS_API_URL is not configured");
        ctx.client.send_plain(chat, NOT_CONFIGURED_MESSAGE).await?;
        return Ok(());
    };

    let response = match news.fetch(parsed).await {
        Ok(response) => response,
        Err(RelayError::UpstreamStatus { status, body }) => {
            error!(status, body = %body, "News source returned an error");
            ctx.client.send_plain(chat, FETCH_FAILED_MESSAGE).await?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let Some(headline) = response.first() else {
        ctx.client
            .send_plain(chat, &no_news_message(category))
            .await?;
        return Ok(());
    };

    ctx.client
        .send_text(chat, &format_headline(headline), TextMode::Html, true)
        .await
}

// ============================================================================
// Dispatcher
// ============================================================================

pub struct Dispatcher {
    ctx: CommandContext,
    matchers: Vec<Box<dyn CommandMatcher>>,
}

impl Dispatcher {
    /// Dispatcher with the standard matchers: `/start`, `/news`, fallback.
    #[must_use]
    pub fn new(client: Arc<dyn MessageClient>, news: Option<NewsClient>) -> Self {
        Self {
            ctx: CommandContext { client, news },
            matchers: vec![
                Box::new(StartCommand),
                Box::new(NewsCommand),
                Box::new(FallbackReply),
            ],
        }
    }

    /// Runs the first matcher that accepts the update's message.
    ///
    /// # Errors
    ///
    /// Propagates send failures from `/start` and the fallback reply; `/news`
    /// reports its own failures to the chat instead.
    pub async fn dispatch(&self, update: &Update) -> Result<(), RelayError> {
        let Some(message) = update.message.as_ref() else {
            info!(update_id = update.update_id, "Update has no message, ignoring");
            return Ok(());
        };

        for matcher in &self.matchers {
            if matcher.try_handle(&self.ctx, message).await? {
                return Ok(());
            }
        }
        Ok(())
    }
}
