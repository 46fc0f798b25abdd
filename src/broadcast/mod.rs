//! Broadcast Lambda handler and headline delivery

pub mod handler;

pub use handler::{BroadcastOutcome, Broadcaster, function_handler, handle_request};

/// Response message when the source had no headline to post.
pub const NOTHING_TO_POST_MESSAGE: &str = "No news to post";
