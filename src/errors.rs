/*!
 * Error types for the myasub application.
 *
 * The core codec, aligner, resolver and sampler are total over their inputs
 * and never fail; these types cover the fallible boundaries only — the
 * translation provider, the project store and host file I/O.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors that can occur in the project store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(String),

    /// Stored block list could not be decoded
    #[error("Corrupt project record {id}: {message}")]
    CorruptRecord {
        /// Project id of the bad record
        id: String,
        /// Decoding failure detail
        message: String,
    },

    /// Requested project does not exist
    #[error("Project not found: {0}")]
    NotFound(String),
}

/// Main application error type that wraps all other errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a translation provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the project store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
