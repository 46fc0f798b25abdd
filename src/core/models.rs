use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// One article as served by the headline source.
///
/// Every field may be missing or `null`; the formatter substitutes placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Headline {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, rename = "readMoreUrl")]
    pub read_more_url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Top-level body of a headline-source response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub data: Option<Vec<Headline>>,
}

impl NewsResponse {
    /// The first headline, if the source returned any.
    #[must_use]
    pub fn first(&self) -> Option<&Headline> {
        self.data.as_deref().and_then(<[Headline]>::first)
    }
}

/// News categories accepted by the headline source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    All,
    National,
    Business,
    Sports,
    World,
    Politics,
    Technology,
    Startup,
    Entertainment,
    Miscellaneous,
    Hatke,
    Science,
    Automobile,
}

impl Category {
    pub const ALL: [Category; 13] = [
        Category::All,
        Category::National,
        Category::Business,
        Category::Sports,
        Category::World,
        Category::Politics,
        Category::Technology,
        Category::Startup,
        Category::Entertainment,
        Category::Miscellaneous,
        Category::Hatke,
        Category::Science,
        Category::Automobile,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::National => "national",
            Category::Business => "business",
            Category::Sports => "sports",
            Category::World => "world",
            Category::Politics => "politics",
            Category::Technology => "technology",
            Category::Startup => "startup",
            Category::Entertainment => "entertainment",
            Category::Miscellaneous => "miscellaneous",
            Category::Hatke => "hatke",
            Category::Science => "science",
            Category::Automobile => "automobile",
        }
    }

    /// Comma-separated list of every valid tag, for user-facing messages.
    #[must_use]
    pub fn valid_list() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Normalizes a raw command argument: trimmed, lower-cased, `all` when empty.
    #[must_use]
    pub fn normalize_argument(raw: Option<&str>) -> String {
        let normalized = raw.map(|s| s.trim().to_lowercase()).unwrap_or_default();
        if normalized.is_empty() {
            Category::All.as_str().to_string()
        } else {
            normalized
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the thirteen category tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or(UnknownCategory(wanted))
    }
}

/// Where an outgoing message is delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// A numeric chat id (private chat, group, or channel `-100...` id).
    Chat(i64),
    /// A public channel username including the leading `@`.
    Channel(String),
}

impl FromStr for Destination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("empty destination".to_string());
        }
        if let Ok(id) = trimmed.parse::<i64>() {
            return Ok(Destination::Chat(id));
        }
        let name = trimmed.trim_start_matches('@');
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(format!("'{trimmed}' is neither a chat id nor a channel username"));
        }
        Ok(Destination::Channel(format!("@{name}")))
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Chat(id) => write!(f, "{id}"),
            Destination::Channel(name) => f.write_str(name),
        }
    }
}
