//! # AnchorKit Settings
//!
//! Editor configuration: history depth, handle mirroring default, interior
//! removal semantics and split tolerance, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::EditorConfig;
pub use error::{SettingsError, SettingsResult};
