//! Turns a [`Headline`] into a Telegram HTML message.
//!
//! The output is deterministic and every piece has a fixed upper bound, which
//! keeps the visible text well under Telegram's 4096-character limit without a
//! final length check.

use teloxide::utils::html::{bold, escape, italic};

use crate::core::models::Headline;

/// Telegram's limit on the visible length of one message.
pub const TELEGRAM_MAX_LENGTH: usize = 4096;

pub const MAX_CONTENT_CHARS: usize = 1000;
pub const MAX_TITLE_CHARS: usize = 300;
pub const MAX_AUTHOR_CHARS: usize = 100;
pub const MAX_LINK_CHARS: usize = 2048;

pub const TITLE_PLACEHOLDER: &str = "No Title";
pub const CONTENT_PLACEHOLDER: &str = "No content available.";
pub const AUTHOR_PLACEHOLDER: &str = "Unknown";
pub const LINK_PLACEHOLDER: &str = "Read More: link unavailable";
pub const SOURCE_NAME: &str = "Inshorts";
pub const ELLIPSIS: &str = "...";

/// Formats one headline as Telegram HTML.
///
/// ```
/// use newsrelay::core::models::Headline;
/// use newsrelay::telegram::format_headline;
///
/// let text = format_headline(&Headline {
///     title: Some("Rust 2024\nreleased".into()),
///     ..Headline::default()
/// });
/// assert!(text.starts_with("<b>Rust 2024 released</b>"));
/// ```
#[must_use]
pub fn format_headline(headline: &Headline) -> String {
    let title = present(headline.title.as_deref())
        .map(|t| truncate_chars(&collapse_line_breaks(t), MAX_TITLE_CHARS))
        .unwrap_or_else(|| TITLE_PLACEHOLDER.to_string());

    let body = match headline.content.as_deref() {
        Some(content) if !content.trim().is_empty() => format_body(content),
        _ => CONTENT_PLACEHOLDER.to_string(),
    };

    let link = present(headline.read_more_url.as_deref())
        .filter(|u| u.chars().count() <= MAX_LINK_CHARS)
        .map_or_else(
            || LINK_PLACEHOLDER.to_string(),
            |url| format!("<a href=\"{}\">Read More</a>", escape_attribute(url)),
        );

    let author = present(headline.author.as_deref())
        .map(|a| truncate_chars(a, MAX_AUTHOR_CHARS))
        .unwrap_or_else(|| AUTHOR_PLACEHOLDER.to_string());

    let attribution = format!("Source: {SOURCE_NAME} | Author: {}", escape(&author));

    format!(
        "{}\n\n{}\n\n{}\n\n{}",
        bold(&escape(&title)),
        escape(&body),
        link,
        italic(&attribution)
    )
}

/// Collapses line breaks, keeps the first [`MAX_CONTENT_CHARS`] characters of
/// the untrimmed text and marks a cut with [`ELLIPSIS`].
fn format_body(content: &str) -> String {
    let collapsed = replace_line_breaks(content);
    let truncated = collapsed.chars().count() > MAX_CONTENT_CHARS;
    let kept: String = collapsed.chars().take(MAX_CONTENT_CHARS).collect();
    let kept = kept.trim();
    if truncated {
        format!("{kept}{ELLIPSIS}")
    } else {
        kept.to_string()
    }
}

/// Trimmed value, or `None` when absent or blank.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn replace_line_breaks(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

fn collapse_line_breaks(text: &str) -> String {
    replace_line_breaks(text).trim().to_string()
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max).collect();
    format!("{}{ELLIPSIS}", kept.trim_end())
}

fn escape_attribute(url: &str) -> String {
    escape(url).replace('"', "&quot;")
}
