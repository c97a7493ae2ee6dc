// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.
//!
//! - `demo`: Run both demos
//! - `opcua`: Run the OPC UA session demo
//! - `platepusher`: Run the plate pusher demo
//! - `version`: Show version information

mod opcua;
mod platepusher;
mod version;

pub use opcua::{opcua, run_session, SessionReport};
pub use platepusher::{platepusher, run_moves};
pub use version::version;

use benchlink_core::{SharedTelemetry, TracingTelemetry};

use crate::cli::{Cli, Commands, OpcUaArgs, PlatePusherArgs};
use crate::config::{ConfigLoader, DemoConfig};
use crate::error::BinResult;

/// Executes the appropriate command based on CLI arguments.
pub fn execute(cli: &Cli) -> BinResult<()> {
    match cli.effective_command() {
        Commands::Version => version::version(cli),
        Commands::Opcua(args) => opcua::opcua(&load_config(cli)?, &args, telemetry())
            .map_err(|e| e.with_context("OPC UA demo failed")),
        Commands::Platepusher(args) => {
            platepusher::platepusher(&load_config(cli)?, &args, telemetry())
                .map_err(|e| e.with_context("Plate pusher demo failed"))
        }
        Commands::Demo => demo(&load_config(cli)?, telemetry()),
    }
}

/// Runs the OPC UA demo followed by the plate pusher demo.
///
/// Errors are labelled with the demo that failed.
pub fn demo(config: &DemoConfig, telemetry: SharedTelemetry) -> BinResult<()> {
    opcua::opcua(config, &OpcUaArgs::default(), telemetry.clone())
        .map_err(|e| e.with_context("OPC UA demo failed"))?;
    platepusher::platepusher(config, &PlatePusherArgs::default(), telemetry)
        .map_err(|e| e.with_context("Plate pusher demo failed"))
}

fn load_config(cli: &Cli) -> BinResult<DemoConfig> {
    let config = ConfigLoader::new().load(cli.config.as_deref())?;
    tracing::debug!(
        path = ?cli.config,
        endpoint = %config.opcua.endpoint,
        base_url = %config.platepusher.base_url,
        "Configuration loaded"
    );
    Ok(config)
}

fn telemetry() -> SharedTelemetry {
    TracingTelemetry::shared()
}
