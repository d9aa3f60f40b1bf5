//! Common types and utilities for the transfer service
//!
//! This library contains shared types, utilities, and abstractions used by the
//! account service and the API gateway. It provides a unified approach to
//! error handling, decimal amounts, and domain models.

pub mod error;
pub mod model;
pub mod decimal;

/// Re-export important types
pub use error::{Error, Result, ErrorExt};
pub use decimal::*;

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
