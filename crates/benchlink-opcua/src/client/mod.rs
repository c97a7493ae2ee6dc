// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Device client implementation.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │     with_session / with_client       │
//! │      (connect ... always disconnect) │
//! └──────────────────┬───────────────────┘
//!                    ▼
//! ┌──────────────────────────────────────┐
//! │            DeviceClient              │
//! │   (state, precondition, telemetry)   │
//! └──────────────────┬───────────────────┘
//!                    ▼
//! ┌──────────────────────────────────────┐
//! │           OpcUaTransport             │
//! │        (SimulatedTransport)          │
//! └──────────────────────────────────────┘
//! ```

mod device;
mod session;
mod transport;

pub use device::{ClientStats, DeviceClient};
pub use session::{with_client, with_session};
pub use transport::{OpcUaTransport, SimulatedTransport, TransportProbe};
