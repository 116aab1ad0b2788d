//! beadbridge - local issue tracking with pluggable bridges
//!
//! Issues live in the repository itself. Bridges connect that local store to
//! external trackers: each bridge type is a connector plugin that may import
//! issues, export them, or both, and each configured instance keeps its
//! settings in the repository's git config.
//!
//! # Architecture
//!
//! - **bridge**: Registry, configuration persistence and the `Bridge` facade
//! - **repository**: Host repository access (`git config` or in-memory)
//! - **cache**: Local issue cache (JSONL)
//! - **input**: Message files and editor-driven input
//! - **actions**: Command handlers behind the CLI
//! - **config**: Application settings (~/.config/beadbridge/config.yaml)

pub mod actions;
pub mod bridge;
pub mod cache;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod repository;

// Re-exports
pub use error::{BridgeError, Result};
