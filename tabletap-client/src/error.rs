//! Client error types
//!
//! Every failure surfaces as one of these variants at the component
//! boundary; none is fatal. The worst case anywhere in the system is a
//! stale view, recoverable by refresh or retry.

use shared::{OrderStatus, RequestStatus};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Local precondition failure - never reaches the network
    #[error("Validation error: {0}")]
    Validation(String),

    /// Order or quick-action creation failed; local state is preserved
    /// and the user may retry manually
    #[error("Submission failed: {message}")]
    Submission { message: String, retryable: bool },

    /// Illegal status transition, rejected locally with zero network calls
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Status update failed at the backend; local status unchanged
    #[error("Transition failed: {0}")]
    Transition(String),

    /// A feed refresh cycle failed to fetch; the last fetched state is kept
    #[error("Sync failed: {0}")]
    Sync(String),

    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend reachable but refusing service (5xx, outage, overload)
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Cart store failure
    #[error("Cart store error: {0}")]
    Store(#[from] crate::cart::StoreError),
}

impl ClientError {
    /// Create a submission error that the user may retry
    pub fn submission(message: impl Into<String>) -> Self {
        Self::Submission {
            message: message.into(),
            retryable: true,
        }
    }

    /// Create an invalid-transition error for orders
    pub fn invalid_order_transition(from: OrderStatus, to: OrderStatus) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Create an invalid-transition error for quick requests
    pub fn invalid_request_transition(from: RequestStatus, to: RequestStatus) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Whether retrying the same operation can succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Submission { retryable, .. } => *retryable,
            Self::Transition(_) | Self::Sync(_) | Self::Http(_) | Self::Unavailable(_) => true,
            _ => false,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
