//! Headline source access

pub mod client;

pub use client::NewsClient;
