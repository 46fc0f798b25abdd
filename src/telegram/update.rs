//! Minimal view of a Telegram webhook update.
//!
//! Only the chat id and the message text are needed to answer commands, so
//! everything else in the update is ignored during deserialization.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    #[serde(default)]
    pub message_id: i64,
    pub chat: ChatRef,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ChatRef {
    pub id: i64,
}

/// A `/command[@bot] [args]` split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotCommand<'a> {
    pub name: &'a str,
    pub args: Option<&'a str>,
}

impl IncomingMessage {
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// True when the text is a slash command (matched or not).
    #[must_use]
    pub fn is_command(&self) -> bool {
        self.text().is_some_and(|t| t.starts_with('/'))
    }

    #[must_use]
    pub fn command(&self) -> Option<BotCommand<'_>> {
        self.text().and_then(parse_command)
    }
}

/// Splits a slash command into name and trailing arguments.
///
/// `/news@MyBot  sports ` yields name `news` and args `sports `; arguments are
/// returned untrimmed at the end so callers decide how to normalize them.
#[must_use]
pub fn parse_command(text: &str) -> Option<BotCommand<'_>> {
    static COMMAND_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?s)^/([A-Za-z0-9_]+)(?:@[A-Za-z0-9_]+)?(?:\s+(.*))?$")
            .expect("static regex compile")
    });

    let caps = COMMAND_RE.captures(text)?;
    let name = caps.get(1)?.as_str();
    let args = caps
        .get(2)
        .map(|m| m.as_str())
        .filter(|a| !a.trim().is_empty());
    Some(BotCommand { name, args })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_command() {
        assert_eq!(
            parse_command("/start"),
            Some(BotCommand {
                name: "start",
                args: None
            })
        );
    }

    #[test]
    fn parses_command_with_bot_suffix_and_args() {
        assert_eq!(
            parse_command("/news@HeadlineBot  Sports "),
            Some(BotCommand {
                name: "news",
                args: Some("Sports ")
            })
        );
    }

    #[test]
    fn glued_suffix_is_not_the_same_command() {
        let cmd = parse_command("/newsroom").unwrap();
        assert_eq!(cmd.name, "newsroom");
        assert!(parse_command("/news-today").is_none());
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert!(parse_command("hello /news").is_none());
        assert!(parse_command("").is_none());
    }

    #[test]
    fn update_without_message_deserializes() {
        let update: Update =
            serde_json::from_str(r#"{"update_id": 7, "edited_message": {"text": "x"}}"#).unwrap();
        assert_eq!(update.update_id, 7);
        assert!(update.message.is_none());
    }

    #[test]
    fn message_without_text_is_not_a_command() {
        let update: Update = serde_json::from_str(
            r#"{"update_id": 1, "message": {"message_id": 3, "chat": {"id": 99, "type": "private"}, "photo": []}}"#,
        )
        .unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 99);
        assert!(!message.is_command());
        assert!(message.command().is_none());
    }
}
