//! All Telegram-specific functionality

pub mod client;
pub mod formatter;
pub mod update;

// Re-export main types for convenience
pub use client::{MessageClient, TelegramClient, TextMode};
pub use formatter::format_headline;
pub use update::{IncomingMessage, Update};
