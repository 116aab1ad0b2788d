//! Bridges to external issue trackers
//!
//! # Overview
//!
//! A bridge type (e.g. `github`) is a connector registered in the
//! [`registry`]. Loading one under an instance name yields a [`Bridge`],
//! which persists the connector's configuration in the repository settings
//! and dispatches import and export to whichever capabilities the connector
//! provides.
//!
//! # Flow
//!
//! 1. **Load**: `registry::load_bridge("github", "origin")`
//! 2. **Configure** (once): prompts the user, stores `<root>.github.origin.*`
//! 3. **Pull / Push**: reads the stored configuration and hands it, with the
//!    issue cache, to the connector's importer or exporter

mod facade;
pub mod github;
mod interfaces;
pub mod registry;
pub mod store;

pub use facade::Bridge;
pub use github::GitHub;
pub use interfaces::{BridgeImpl, Configuration, Exporter, Importer};
pub use registry::{BridgeFactory, Registry};
