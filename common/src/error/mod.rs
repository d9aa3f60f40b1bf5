//! Error types for the transfer service
//!
//! This module provides a unified error handling system shared by the account
//! service and the API gateway. Every failure a caller can observe maps to one
//! variant here, so the transport layer can pick a response without inspecting
//! message text.

use std::fmt::Display;
use thiserror::Error;

/// Transfer service error type
#[derive(Debug, Error)]
pub enum Error {
    /// An account with the same ID already exists
    #[error("{0}")]
    DuplicateId(String),

    /// Error when an account cannot be found
    #[error("{0}")]
    AccountNotFound(String),

    /// Error when the sender has insufficient funds
    #[error("{0}")]
    InsufficientBalance(String),

    /// Unexpected failure while mutating balances of an otherwise valid transfer
    #[error("{0}")]
    TransferFailed(String),

    /// Generic validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Fault reported by a pluggable store or notification channel
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Build the error raised when creating an account whose ID is taken
    pub fn duplicate_id(account_id: &str) -> Self {
        Error::DuplicateId(format!("Account id {} already exists!", account_id))
    }

    /// Whether the caller may retry the same request
    ///
    /// Only storage or lock faults qualify; business rejections will fail the
    /// same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::TransferFailed(_))
    }

    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::DuplicateId(_)
                | Error::AccountNotFound(_)
                | Error::InsufficientBalance(_)
                | Error::ValidationError(_)
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::DuplicateId(msg) => Error::DuplicateId(format!("{}: {}", context, msg)),
                Error::AccountNotFound(msg) => Error::AccountNotFound(format!("{}: {}", context, msg)),
                Error::InsufficientBalance(msg) => Error::InsufficientBalance(format!("{}: {}", context, msg)),
                Error::TransferFailed(msg) => Error::TransferFailed(format!("{}: {}", context, msg)),
                Error::ValidationError(msg) => Error::ValidationError(format!("{}: {}", context, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
            }
        })
    }
}
