// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session-scoped OPC UA style device client.
//!
//! This crate provides a small stateful client for reading and writing nodes
//! on an OPC UA style server. The protocol itself is not implemented: the
//! default [`SimulatedTransport`] stands in for the network with fixed
//! latencies and a placeholder read value.
//!
//! # Features
//!
//! - `connect` / `disconnect` lifecycle with an explicit [`ConnectionState`]
//! - `read` / `write` that refuse to run while disconnected
//! - [`with_session`] / [`with_client`] scope helpers that always disconnect
//! - Injectable telemetry through [`benchlink_core::SharedTelemetry`]
//!
//! # Error Handling
//!
//! ```text
//! OpcUaError
//! ├── Connection  - NotConnected, Refused, Closed
//! └── Operation   - ReadFailed, WriteFailed, TypeMismatch
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use benchlink_core::TracingTelemetry;
//! use benchlink_opcua::{with_session, NodeId, OpcUaError, OpcUaValue};
//!
//! let node = NodeId::new("ns=2;s=Demo.Static.Scalar.Int32");
//!
//! let written = with_session(
//!     "opc.tcp://demo-opcua-server:4840",
//!     TracingTelemetry::shared(),
//!     async |client| -> Result<i64, OpcUaError> {
//!         let value = client.read(&node).await?;
//!         let next = value.as_i64().unwrap_or_default() + 1;
//!         client.write(&node, OpcUaValue::Int64(next)).await?;
//!         Ok(next)
//!     },
//! )
//! .await?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod error;
pub mod types;

pub use error::{
    ConnectionError, ErrorCode, OpcUaError, OpcUaResult, OperationError,
};

pub use types::{ConnectionState, DeviceEndpoint, NodeId, OpcUaValue, SimulationConfig};

pub use client::{
    with_client, with_session, ClientStats, DeviceClient, OpcUaTransport, SimulatedTransport,
    TransportProbe,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
