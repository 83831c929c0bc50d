//! Error conditions.

use serde_json::Error as JsonError;
use std::io::Error as IoError;
use thiserror::Error;

/// Result type of the ledgerdesk-sdk-base.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal representation of errors.
#[derive(Error, Debug)]
pub enum Error {
    /// An error de/serializing type for the `CredentialStore`.
    #[error(transparent)]
    SerdeJson(#[from] JsonError),

    /// An IO error.
    #[error(transparent)]
    IoError(#[from] IoError),

    /// An error occurred in the credential store.
    #[error("the credential store failed: {0}")]
    StoreError(String),
}
