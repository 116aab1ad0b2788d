//! Configuration system
//!
//! Application settings live in ~/.config/beadbridge/config.yaml:
//! - The git config section that bridge configurations are stored under
//! - The editor used for interactive issue input
//!
//! Per-bridge settings are not kept here; they are persisted in the host
//! repository's git config (see [`crate::bridge::store`]).

mod app_config;

pub use app_config::{AppConfig, DEFAULT_NAMESPACE_ROOT};
