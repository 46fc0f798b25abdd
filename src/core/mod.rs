//! Configuration and domain types shared by both Lambdas

pub mod config;
pub mod models;
