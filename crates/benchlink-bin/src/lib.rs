// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # benchlink-bin
//!
//! CLI binary running the benchlink device client demos.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌─────────────┐
//!                    │   main.rs   │
//!                    └──────┬──────┘
//!                           │
//!                    ┌──────▼──────┐
//!                    │   cli.rs    │
//!                    └──────┬──────┘
//!                           │
//!               ┌───────────┼───────────┐
//!               ▼           ▼           ▼
//!        ┌──────────┐ ┌──────────┐ ┌──────────┐
//!        │ commands │ │  config  │ │ logging  │
//!        └────┬─────┘ └──────────┘ └──────────┘
//!             │
//!     ┌───────┴────────┐
//!     ▼                ▼
//! benchlink-opcua  benchlink-platepusher
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Run both demos (default command)
//! benchlink
//!
//! # OPC UA session against another endpoint
//! benchlink opcua --endpoint opc.tcp://bench:4840
//!
//! # Plate pusher moves with custom sites and a config file
//! benchlink -c bench.yaml platepusher --site C3 --site D1
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

pub use cli::{Cli, Commands};
pub use config::{ConfigError, ConfigLoader, DemoConfig};
pub use error::{BinError, BinResult};
pub use logging::init_logging;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
