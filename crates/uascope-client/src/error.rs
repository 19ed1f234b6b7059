// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Address space error types.
//!
//! The resolver surfaces three failure kinds: a node whose class attribute is
//! missing or unrecognized, a service call that came back with a bad status
//! code, and everything else, wrapped with a descriptive message. Nothing is
//! retried here; retry policy belongs to the session-owning client.

use std::error::Error as StdError;

use thiserror::Error;

use uascope_types::{NodeId, StatusCode};

/// Result alias for address space operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error source for [`Error::Unexpected`].
pub type BoxedError = Box<dyn StdError + Send + Sync + 'static>;

// =============================================================================
// Error
// =============================================================================

/// The error type for address space operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The base-attribute read returned a null or unrecognized node class.
    #[error("node '{node_id}' has a null or unrecognized NodeClass attribute")]
    NodeClassInvalid {
        /// The node whose class could not be determined.
        node_id: NodeId,
    },

    /// A Read or Browse returned a bad status code, propagated verbatim.
    #[error("service call failed with {status}")]
    Service {
        /// The status code the service returned.
        status: StatusCode,
    },

    /// Any other failure surfaced at the public boundary.
    #[error("{message}")]
    Unexpected {
        /// What went wrong.
        message: String,

        /// The underlying cause, when one exists.
        #[source]
        source: Option<BoxedError>,
    },

    /// The address space was constructed with invalid settings.
    #[error("invalid configuration: {message}")]
    Configuration {
        /// Which setting was rejected and why.
        message: String,
    },
}

impl Error {
    /// Creates a [`Error::NodeClassInvalid`] for `node_id`.
    pub fn node_class_invalid(node_id: &NodeId) -> Self {
        Self::NodeClassInvalid {
            node_id: node_id.clone(),
        }
    }

    /// Creates a [`Error::Service`] carrying `status`.
    #[inline]
    pub fn service(status: StatusCode) -> Self {
        Self::Service { status }
    }

    /// Creates a [`Error::Unexpected`] without a cause.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a [`Error::Unexpected`] wrapping `source`.
    pub fn unexpected_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Unexpected {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a [`Error::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Maps this error onto an OPC UA status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NodeClassInvalid { .. } => StatusCode::BAD_NODE_CLASS_INVALID,
            Self::Service { status } => *status,
            Self::Unexpected { .. } => StatusCode::BAD_UNEXPECTED_ERROR,
            Self::Configuration { .. } => StatusCode::BAD,
        }
    }

    /// Returns the error category for logging and metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Self::NodeClassInvalid { .. } => "node_class",
            Self::Service { .. } => "service",
            Self::Unexpected { .. } => "unexpected",
            Self::Configuration { .. } => "configuration",
        }
    }

    /// Returns `true` if a retry at a higher layer could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Service { status } => {
                *status == StatusCode::BAD_TIMEOUT || *status == StatusCode::BAD_COMMUNICATION_ERROR
            }
            _ => false,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        let error = Error::node_class_invalid(&NodeId::numeric(0, 85));
        assert_eq!(error.status_code(), StatusCode::BAD_NODE_CLASS_INVALID);

        let error = Error::service(StatusCode::BAD_SERVICE_UNSUPPORTED);
        assert_eq!(error.status_code(), StatusCode::BAD_SERVICE_UNSUPPORTED);

        let error = Error::unexpected("boom");
        assert_eq!(error.status_code(), StatusCode::BAD_UNEXPECTED_ERROR);
    }

    #[test]
    fn test_retryable() {
        assert!(Error::service(StatusCode::BAD_TIMEOUT).is_retryable());
        assert!(!Error::service(StatusCode::BAD_NODE_ID_UNKNOWN).is_retryable());
        assert!(!Error::unexpected("boom").is_retryable());
    }

    #[test]
    fn test_unexpected_preserves_source() {
        let cause = std::io::Error::new(std::io::ErrorKind::TimedOut, "socket");
        let error = Error::unexpected_with("read failed", cause);

        assert_eq!(error.to_string(), "read failed");
        assert!(std::error::Error::source(&error).is_some());
        assert_eq!(error.category(), "unexpected");
    }
}
