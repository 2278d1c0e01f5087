//! Error types for the clustering engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while configuring the engine.
///
/// The taxonomy is configuration-level only: once construction succeeds the
/// algorithm is total over its inputs and cannot fail at runtime.
#[derive(Debug, Error)]
pub enum Error {
    /// Engine parameters that cannot produce a valid clustering.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl Error {
    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
