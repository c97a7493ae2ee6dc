// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for the benchlink binary.

use benchlink_opcua::OpcUaError;
use benchlink_platepusher::PlatePusherError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for benchlink-bin operations.
pub type BinResult<T> = Result<T, BinError>;

/// Errors that can occur in the benchlink binary.
#[derive(Debug, Error)]
pub enum BinError {
    /// Config loading error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Initialization error.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Output could not be rendered.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Device session error.
    #[error("OPC UA error [{code}]: {0}", code = .0.error_code())]
    OpcUa(#[from] OpcUaError),

    /// Plate pusher request error.
    #[error("Plate pusher error: {0}")]
    PlatePusher(#[from] PlatePusherError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        /// The context description.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<BinError>,
    },
}

impl BinError {
    /// Creates an initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Initialization(msg.into())
    }

    /// Adds context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 1,
            Self::Initialization(_) => 2,
            Self::Serialization(_) => 4,
            Self::OpcUa(_) => 5,
            Self::PlatePusher(_) => 6,
            Self::WithContext { source, .. } => source.exit_code(),
        }
    }
}

impl From<serde_json::Error> for BinError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

// =============================================================================
// Error Reporting
// =============================================================================

/// Reports an error with its cause chain.
pub fn report_error(error: &BinError) {
    eprintln!("Error: {}", error);

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("  Caused by: {}", cause);
        source = cause.source();
    }
}

/// Reports an error and exits with the appropriate code.
pub fn report_error_and_exit(error: BinError) -> ! {
    report_error(&error);
    std::process::exit(error.exit_code())
}

// =============================================================================
// Tests
// =============================================================================
