//! Zensync core library — domain types, attribute loading, configuration.
//!
//! Public API surface:
//! - [`types`] — validated per-article attribute records
//! - [`attributes`] — YAML sidecar loader with per-field validation
//! - [`config`] — connection info and publish settings
//! - [`error`] — [`ConfigError`]

pub mod attributes;
pub mod config;
pub mod error;
pub mod types;

pub use config::{ConnectionInfo, PublishSettings};
pub use error::ConfigError;
pub use types::{ArticleAttributes, Author};
