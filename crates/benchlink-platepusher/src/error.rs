// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Request client errors.
//!
//! The simulated transport never fails; these errors come from configuration
//! checks and from the HTTP transport.

use std::time::Duration;

use benchlink_core::Severity;
use thiserror::Error;

/// Errors raised while issuing a device request.
#[derive(Debug, Error)]
pub enum PlatePusherError {
    /// The configuration cannot be used.
    #[error("Invalid plate pusher configuration: {message}")]
    InvalidConfig {
        /// What is wrong.
        message: String,
    },

    /// No response arrived within the configured timeout.
    #[error("Request to '{url}' timed out after {timeout:?}")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout.
        timeout: Duration,
    },

    /// The device answered with a non-success status code.
    #[error("Request to '{url}' failed with HTTP {status}: {body}")]
    Status {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The request could not be sent.
    #[error("Request to '{url}' failed: {message}")]
    Transport {
        /// Request URL.
        url: String,
        /// Underlying error message.
        message: String,
    },

    /// The response body was not a valid response record.
    #[error("Invalid response from '{url}': {message}")]
    Decode {
        /// Request URL.
        url: String,
        /// Decoder message.
        message: String,
    },
}

impl PlatePusherError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            url: url.into(),
            timeout,
        }
    }

    /// Creates a status error.
    pub fn status(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Creates a transport error.
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a decode error.
    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if repeating the request may succeed.
    ///
    /// Server-side (5xx) and rate limit (429) statuses count as transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Transport { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::InvalidConfig { .. } | Self::Decode { .. } => false,
        }
    }

    /// Returns the severity used when reporting this error.
    pub fn severity(&self) -> Severity {
        match self {
            Self::Timeout { .. } | Self::Transport { .. } => Severity::Warn,
            Self::InvalidConfig { .. } | Self::Status { .. } | Self::Decode { .. } => {
                Severity::Error
            }
        }
    }

    /// Returns the error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "config",
            Self::Timeout { .. } => "timeout",
            Self::Status { .. } => "status",
            Self::Transport { .. } => "transport",
            Self::Decode { .. } => "decode",
        }
    }
}

/// A Result type with PlatePusherError.
pub type PlatePusherResult<T> = Result<T, PlatePusherError>;
