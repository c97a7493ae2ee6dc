// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! OPC UA client error types.
//!
//! # Error Categories
//!
//! ```text
//! OpcUaError
//! ├── Connection  - NotConnected, Refused, Closed
//! └── Operation   - ReadFailed, WriteFailed, TypeMismatch
//! ```
//!
//! # Examples
//!
//! ```
//! use benchlink_opcua::error::{ConnectionError, OpcUaError};
//!
//! let error = OpcUaError::not_connected();
//! assert!(error.is_not_connected());
//! assert_eq!(error.category(), "connection");
//! assert_eq!(error.error_code().to_string(), "UA-0101");
//! ```

use std::fmt;

use benchlink_core::Severity;
use thiserror::Error;

// =============================================================================
// OpcUaError - Main Error Type
// =============================================================================

/// The main error type for device client operations.
#[derive(Debug, Error)]
pub enum OpcUaError {
    /// Connection-related errors.
    #[error("{0}")]
    Connection(#[from] ConnectionError),

    /// Read/write operation errors.
    #[error("{0}")]
    Operation(#[from] OperationError),
}

impl OpcUaError {
    // =========================================================================
    // Factory Methods
    // =========================================================================

    /// Creates a connection error.
    #[inline]
    pub fn connection(error: ConnectionError) -> Self {
        Self::Connection(error)
    }

    /// Creates an operation error.
    #[inline]
    pub fn operation(error: OperationError) -> Self {
        Self::Operation(error)
    }

    /// Creates a not connected error.
    pub fn not_connected() -> Self {
        Self::Connection(ConnectionError::NotConnected)
    }

    /// Creates a connection refused error.
    pub fn connection_refused(endpoint: impl Into<String>) -> Self {
        Self::Connection(ConnectionError::refused(endpoint))
    }

    /// Creates a read failed error.
    pub fn read_failed(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Operation(OperationError::read_failed(node_id, message))
    }

    /// Creates a write failed error.
    pub fn write_failed(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Operation(OperationError::write_failed(node_id, message))
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: &str, actual: &str) -> Self {
        Self::Operation(OperationError::type_mismatch(expected, actual))
    }

    // =========================================================================
    // Error Properties
    // =========================================================================

    /// Returns `true` for the "operation issued while disconnected" precondition failure.
    pub fn is_not_connected(&self) -> bool {
        matches!(self, Self::Connection(ConnectionError::NotConnected))
    }

    /// Returns `true` if this error is transient.
    ///
    /// The client never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(e) => e.is_retryable(),
            Self::Operation(e) => e.is_retryable(),
        }
    }

    /// Returns the severity used when reporting this error.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Connection(e) => e.severity(),
            Self::Operation(_) => Severity::Error,
        }
    }

    /// Returns the error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "connection",
            Self::Operation(_) => "operation",
        }
    }

    /// Returns a unique error code for this error.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Connection(e) => e.error_code(),
            Self::Operation(e) => e.error_code(),
        }
    }
}

// =============================================================================
// ConnectionError
// =============================================================================

/// Connection-related errors.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// A read or write was issued while disconnected.
    #[error("Not connected to OPC UA server")]
    NotConnected,

    /// Connection refused.
    #[error("Connection refused to '{endpoint}'")]
    Refused {
        /// Target endpoint.
        endpoint: String,
    },

    /// Connection closed unexpectedly.
    #[error("Connection closed unexpectedly: {reason}")]
    Closed {
        /// Reason for closure.
        reason: String,
    },
}

impl ConnectionError {
    /// Creates a connection refused error.
    pub fn refused(endpoint: impl Into<String>) -> Self {
        Self::Refused {
            endpoint: endpoint.into(),
        }
    }

    /// Creates a connection closed error.
    pub fn closed(reason: impl Into<String>) -> Self {
        Self::Closed {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NotConnected => false,
            Self::Refused { .. } | Self::Closed { .. } => true,
        }
    }

    /// Returns the severity level.
    pub fn severity(&self) -> Severity {
        match self {
            Self::NotConnected => Severity::Warn,
            Self::Refused { .. } => Severity::Error,
            Self::Closed { .. } => Severity::Warn,
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotConnected => ErrorCode::new(1, 1),
            Self::Refused { .. } => ErrorCode::new(1, 2),
            Self::Closed { .. } => ErrorCode::new(1, 3),
        }
    }
}

// =============================================================================
// OperationError
// =============================================================================

/// Read/write operation errors.
#[derive(Debug, Error)]
pub enum OperationError {
    /// Read failed.
    #[error("Read failed for node '{node_id}': {message}")]
    ReadFailed {
        /// The node ID.
        node_id: String,
        /// Error message.
        message: String,
    },

    /// Write failed.
    #[error("Write failed for node '{node_id}': {message}")]
    WriteFailed {
        /// The node ID.
        node_id: String,
        /// Error message.
        message: String,
    },

    /// A value had an unexpected type.
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Expected type.
        expected: String,
        /// Actual type.
        actual: String,
    },
}

impl OperationError {
    /// Creates a read failed error.
    pub fn read_failed(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ReadFailed {
            node_id: node_id.into(),
            message: message.into(),
        }
    }

    /// Creates a write failed error.
    pub fn write_failed(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WriteFailed {
            node_id: node_id.into(),
            message: message.into(),
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: &str, actual: &str) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Returns `true` if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ReadFailed { .. } | Self::WriteFailed { .. })
    }

    /// Returns the error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::ReadFailed { .. } => ErrorCode::new(2, 1),
            Self::WriteFailed { .. } => ErrorCode::new(2, 2),
            Self::TypeMismatch { .. } => ErrorCode::new(2, 3),
        }
    }
}

// =============================================================================
// ErrorCode
// =============================================================================

/// Structured error code for categorization.
///
/// Format: `UA-XXYY` where XX is category and YY is specific error.
///
/// Categories:
/// - 1: Connection
/// - 2: Operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode {
    /// Category.
    pub category: u8,
    /// Specific error within category.
    pub code: u8,
}

impl ErrorCode {
    /// Creates a new error code.
    pub const fn new(category: u8, code: u8) -> Self {
        Self { category, code }
    }

    /// Returns the full error code as a u16.
    pub fn as_u16(&self) -> u16 {
        ((self.category as u16) << 8) | (self.code as u16)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UA-{:02X}{:02X}", self.category, self.code)
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// A Result type with OpcUaError.
pub type OpcUaResult<T> = Result<T, OpcUaError>;

// =============================================================================
// Tests
// =============================================================================
