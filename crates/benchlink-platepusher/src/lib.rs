// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Stateless request client for an HTTP-controlled plate pusher.
//!
//! The client holds an immutable [`PlatePusherConfig`] and exposes one method
//! per device intent ([`PlatePusherClient::home`],
//! [`PlatePusherClient::move_to_site`]). Every intent builds a path and a
//! [`Payload`] and goes through a single request routine that joins the URL,
//! reports the request to telemetry and hands it to an [`HttpTransport`].
//!
//! # Transports
//!
//! | Transport | Availability | Behavior |
//! |-----------|--------------|----------|
//! | [`SimulatedHttpTransport`] | always | echoes the request as `{status: ok, url, payload}` |
//! | `BlockingHttpTransport` | feature `http-client` | POSTs JSON with the configured timeout |
//!
//! # Example
//!
//! ```
//! use benchlink_core::NoopTelemetry;
//! use benchlink_platepusher::{PlatePusherClient, PlatePusherConfig};
//!
//! let client = PlatePusherClient::simulated(
//!     PlatePusherConfig::new("http://demo-platepusher.local/api/"),
//!     NoopTelemetry::shared(),
//! );
//!
//! let response = client.move_to_site("A1").unwrap();
//! assert_eq!(response.url, "http://demo-platepusher.local/api/move");
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{join_url, PlatePusherClient};
pub use config::PlatePusherConfig;
pub use error::{PlatePusherError, PlatePusherResult};
#[cfg(feature = "http-client")]
pub use transport::BlockingHttpTransport;
pub use transport::{HttpTransport, SimulatedHttpTransport};
pub use types::{Payload, ResponseStatus, SimulatedResponse};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
