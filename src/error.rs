//! Application Error Types

use derive_more::{Display, Error};

/// An application error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not open the content catalog")]
    Catalog,
    #[display("request failed")]
    Query,
    #[display("not found")]
    NotFound,
    #[display("server error")]
    Server,
    #[display("could not write output")]
    Output,
}

impl ErrorKind {
    /// Process exit code for this kind of failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config => 78,
            Self::Catalog | Self::Query => 69,
            Self::NotFound => 2,
            Self::Server | Self::Output => 1,
        }
    }
}
