// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Request client configuration.

use std::time::Duration;

use crate::error::{PlatePusherError, PlatePusherResult};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Immutable configuration of a [`PlatePusherClient`](crate::PlatePusherClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatePusherConfig {
    base_url: String,
    timeout: Duration,
}

impl PlatePusherConfig {
    /// Creates a configuration with the default timeout.
    ///
    /// The base URL is stored as given; trailing slashes are tolerated and
    /// handled when request URLs are built.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the request timeout.
    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Checks that the base URL is non-empty and the timeout is positive.
    pub fn validate(&self) -> PlatePusherResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(PlatePusherError::invalid_config("base URL must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(PlatePusherError::invalid_config("timeout must be greater than zero"));
        }
        Ok(())
    }
}
