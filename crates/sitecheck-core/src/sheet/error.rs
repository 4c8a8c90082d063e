//! Spreadsheet access errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    /// Service-account credentials missing or unusable.
    #[error("credentials: {0}")]
    Credentials(String),
    /// Token exchange with the identity provider failed.
    #[error("auth: {0}")]
    Auth(String),
    /// Transport-level failure talking to the API.
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    /// API answered with a non-2xx status.
    #[error("API returned HTTP {status}: {message}")]
    Api { status: u32, message: String },
    #[error("spreadsheet not found: {name}")]
    NotFound { name: String },
    /// Response or sheet content did not have the expected shape.
    #[error("malformed: {0}")]
    Malformed(String),
}
