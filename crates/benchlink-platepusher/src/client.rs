// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Plate pusher request client.

use std::fmt;

use benchlink_core::{SharedTelemetry, TelemetryEvent};

use crate::config::PlatePusherConfig;
use crate::error::{PlatePusherError, PlatePusherResult};
use crate::transport::{HttpTransport, SimulatedHttpTransport};
use crate::types::{Payload, SimulatedResponse};

const COMPONENT: &str = "platepusher";

/// Joins `base` and `path` with exactly one `/` between them.
///
/// All trailing slashes of `base` and all leading slashes of `path` are
/// removed before joining.
///
/// ```
/// use benchlink_platepusher::join_url;
///
/// assert_eq!(join_url("http://h/api/", "/move"), "http://h/api/move");
/// assert_eq!(join_url("http://h/api", "move"), "http://h/api/move");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

// =============================================================================
// PlatePusherClient
// =============================================================================

/// Stateless client issuing intent-specific requests to a plate pusher.
///
/// The client keeps no state between calls; every method builds a fresh
/// request from the immutable configuration.
pub struct PlatePusherClient<T: HttpTransport = SimulatedHttpTransport> {
    config: PlatePusherConfig,
    transport: T,
    telemetry: SharedTelemetry,
}

impl PlatePusherClient<SimulatedHttpTransport> {
    /// Creates a client backed by the [`SimulatedHttpTransport`].
    pub fn simulated(config: PlatePusherConfig, telemetry: SharedTelemetry) -> Self {
        Self::new(config, SimulatedHttpTransport::new(), telemetry)
    }
}

impl<T: HttpTransport> PlatePusherClient<T> {
    /// Creates a client.
    pub fn new(config: PlatePusherConfig, transport: T, telemetry: SharedTelemetry) -> Self {
        Self {
            config,
            transport,
            telemetry,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PlatePusherConfig {
        &self.config
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends the device to its home position.
    pub fn home(&self) -> PlatePusherResult<SimulatedResponse> {
        self.emit(TelemetryEvent::info(COMPONENT, "Requesting homing move"));
        self.request("/home", Some(Payload::empty()))
    }

    /// Moves the plate to `site`.
    pub fn move_to_site(&self, site: impl Into<String>) -> PlatePusherResult<SimulatedResponse> {
        let site = site.into();
        self.emit(TelemetryEvent::info(COMPONENT, "Requesting move to site").with_field("site", &site));
        self.request("/move", Some(Payload::for_site(site)))
    }

    fn request(&self, path: &str, payload: Option<Payload>) -> PlatePusherResult<SimulatedResponse> {
        let url = join_url(self.config.base_url(), path);

        let shown = payload
            .as_ref()
            .map_or_else(|| "null".to_string(), Payload::to_string);
        self.emit(TelemetryEvent::info(COMPONENT, format!("POST {}", url)).with_field("payload", shown));

        self.transport
            .post(&url, payload.as_ref())
            .inspect_err(|e| self.report(e, &url))
    }

    fn report(&self, error: &PlatePusherError, url: &str) {
        self.emit(
            TelemetryEvent::new(error.severity(), COMPONENT, error.to_string())
                .with_field("category", error.category())
                .with_field("retryable", error.is_retryable())
                .with_field("url", url),
        );
    }

    fn emit(&self, event: TelemetryEvent) {
        if self.telemetry.is_enabled(event.severity) {
            self.telemetry.record(event);
        }
    }
}

impl<T: HttpTransport> fmt::Debug for PlatePusherClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatePusherClient")
            .field("config", &self.config)
            .field("transport", &self.transport.name())
            .field("telemetry", &self.telemetry.name())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
