// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # benchlink-core
//!
//! Shared building blocks for the benchlink device clients.
//!
//! The only shared concern between the OPC UA session client and the plate
//! pusher request client is telemetry: each client receives a
//! [`SharedTelemetry`] handle at construction and reports its progress
//! through it instead of a process-wide logger.
//!
//! ```text
//! ┌──────────────────┐   ┌───────────────────────┐
//! │ benchlink-opcua  │   │ benchlink-platepusher │
//! └────────┬─────────┘   └───────────┬───────────┘
//!          │      SharedTelemetry    │
//!          └────────────┬────────────┘
//!                       ▼
//!        ┌──────────────────────────────┐
//!        │ TracingTelemetry │ Memory... │
//!        └──────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod telemetry;

pub use telemetry::{
    MemoryTelemetry, NoopTelemetry, Severity, SharedTelemetry, Telemetry, TelemetryEvent,
    TracingTelemetry,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
