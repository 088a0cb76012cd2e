//! Public API Error Types

use derive_more::{Display, Error};

/// A public API error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for public API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The requested protocol version is not one this node speaks.
    #[display("unsupported protocol version: {_0}")]
    UnsupportedVersion(#[error(not(source))] String),
    /// The catalog could not answer the query.
    #[display("catalog query failed")]
    Catalog,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Catalog)
    }
}
