//! Core types and shared functionality for gridpick.
//!
//! This crate provides:
//! - The in-memory search session cache and its reaper
//! - The token codec addressing individual cached results
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod token;

pub use cache::{BATCH_SIZE, Page, Reaper, ResultCache, SESSION_TTL};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use token::{TOKEN_INDEX_LIMIT, Token};
