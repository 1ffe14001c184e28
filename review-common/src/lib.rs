//! # Listening Review Common Library
//!
//! Shared code for the review service:
//! - Configuration loading and data folder resolution
//! - Database initialization and row models
//! - Common error type
//! - Timestamp formatting

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
