// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! HTTP transport abstraction.
//!
//! The request client only knows how to build a URL and a payload. Sending
//! them is delegated to an [`HttpTransport`].

use crate::error::PlatePusherResult;
use crate::types::{Payload, SimulatedResponse};

#[cfg(feature = "http-client")]
pub use http::BlockingHttpTransport;

// =============================================================================
// HttpTransport Trait
// =============================================================================

/// Sends a POST request to the device and returns its response.
pub trait HttpTransport: Send + Sync {
    /// POSTs `payload` as JSON to `url`.
    fn post(&self, url: &str, payload: Option<&Payload>) -> PlatePusherResult<SimulatedResponse>;

    /// Returns the transport name.
    fn name(&self) -> &str;
}

// =============================================================================
// SimulatedHttpTransport
// =============================================================================

/// Transport that never touches the network.
///
/// Every request succeeds with `{status: ok, url, payload}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedHttpTransport;

impl SimulatedHttpTransport {
    /// Creates a simulated transport.
    pub fn new() -> Self {
        Self
    }
}

impl HttpTransport for SimulatedHttpTransport {
    fn post(&self, url: &str, payload: Option<&Payload>) -> PlatePusherResult<SimulatedResponse> {
        Ok(SimulatedResponse::ok(url, payload.cloned()))
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

// =============================================================================
// BlockingHttpTransport
// =============================================================================

#[cfg(feature = "http-client")]
mod http {
    use std::time::Duration;

    use super::HttpTransport;
    use crate::config::PlatePusherConfig;
    use crate::error::{PlatePusherError, PlatePusherResult};
    use crate::types::{Payload, SimulatedResponse};

    /// Transport that POSTs JSON with reqwest's blocking client.
    ///
    /// Must not be called from inside an async runtime.
    #[derive(Debug)]
    pub struct BlockingHttpTransport {
        client: reqwest::blocking::Client,
        timeout: Duration,
    }

    impl BlockingHttpTransport {
        /// Creates a transport using the timeout from `config`.
        pub fn new(config: &PlatePusherConfig) -> PlatePusherResult<Self> {
            config.validate()?;

            let client = reqwest::blocking::Client::builder()
                .timeout(config.timeout())
                .build()
                .map_err(|e| {
                    PlatePusherError::invalid_config(format!("Failed to create HTTP client: {}", e))
                })?;

            Ok(Self {
                client,
                timeout: config.timeout(),
            })
        }

        fn map_send_error(&self, url: &str, error: reqwest::Error) -> PlatePusherError {
            if error.is_timeout() {
                PlatePusherError::timeout(url, self.timeout)
            } else {
                PlatePusherError::transport(url, error.to_string())
            }
        }
    }

    impl HttpTransport for BlockingHttpTransport {
        fn post(
            &self,
            url: &str,
            payload: Option<&Payload>,
        ) -> PlatePusherResult<SimulatedResponse> {
            let mut request = self.client.post(url);
            if let Some(payload) = payload {
                request = request.json(payload);
            }

            let response = request.send().map_err(|e| self.map_send_error(url, e))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                return Err(PlatePusherError::status(url, status.as_u16(), body));
            }

            response
                .json::<SimulatedResponse>()
                .map_err(|e| PlatePusherError::decode(url, e.to_string()))
        }

        fn name(&self) -> &str {
            "http"
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
