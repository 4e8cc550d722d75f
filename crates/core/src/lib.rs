//! Core types and shared functionality for c2pa-docs.
//!
//! This crate provides:
//! - In-memory LRU cache for HTTP response bodies
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{LruCache, compute_cache_key};
pub use config::AppConfig;
pub use error::{Error, redact_secret};
