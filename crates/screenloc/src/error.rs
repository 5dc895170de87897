use thiserror::Error;

use crate::process::Address;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read process memory at address {address}: {message}")]
    InaccessibleMemory { address: Address, message: String },

    #[error("Malformed record at address {address}: {reason}")]
    MalformedRecord { address: Address, reason: String },

    #[error("Traversal starting at {head} exceeded the bound of {limit} nodes")]
    TraversalBoundExceeded { head: Address, limit: usize },

    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Failed to open process: {0}")]
    ProcessOpenFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn inaccessible(address: Address, message: impl Into<String>) -> Self {
        Error::InaccessibleMemory {
            address,
            message: message.into(),
        }
    }

    pub(crate) fn malformed(address: Address, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            address,
            reason: reason.into(),
        }
    }

    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    /// Check if this error stops a traversal (as opposed to a single record being unusable)
    pub fn is_traversal_failure(&self) -> bool {
        matches!(
            self,
            Error::InaccessibleMemory { .. } | Error::TraversalBoundExceeded { .. }
        )
    }
}
