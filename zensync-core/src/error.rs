//! Error types for zensync-core.

use thiserror::Error;

/// Configuration errors — always fatal, raised before any network activity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A mandatory property was not supplied.
    #[error("the {name} property is mandatory, aborting")]
    MissingProperty { name: &'static str },
}
