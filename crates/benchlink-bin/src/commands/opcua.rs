// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `opcua` command.

use benchlink_core::SharedTelemetry;
use benchlink_opcua::{
    with_client, DeviceClient, DeviceEndpoint, NodeId, OpcUaError, OpcUaResult, OpcUaValue,
    SimulatedTransport,
};
use serde::Serialize;

use crate::cli::OpcUaArgs;
use crate::config::{DemoConfig, OpcUaSection};
use crate::error::{BinError, BinResult};

/// Outcome of one read-increment-write session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    /// Endpoint the session ran against.
    pub endpoint: DeviceEndpoint,
    /// Node that was read and written.
    pub node: NodeId,
    /// Value read from the node.
    pub read: OpcUaValue,
    /// Value written back.
    pub written: OpcUaValue,
}

/// Executes the `opcua` command.
pub fn opcua(config: &DemoConfig, args: &OpcUaArgs, telemetry: SharedTelemetry) -> BinResult<()> {
    let mut section = config.opcua.clone();
    if let Some(endpoint) = &args.endpoint {
        section.endpoint = endpoint.clone();
    }
    if let Some(node) = &args.node {
        section.node = node.clone();
    }
    section.validate()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| BinError::init(format!("Failed to build async runtime: {}", e)))?;

    let report = runtime.block_on(run_session(&section, telemetry))?;

    println!("Read value {} from node {}", report.read, report.node);
    println!("Wrote value {} to node {}", report.written, report.node);

    Ok(())
}

/// Connects to the configured endpoint, reads the node, writes the value
/// plus one and disconnects.
///
/// Fails with a type mismatch if the node does not hold an integer.
pub async fn run_session(
    section: &OpcUaSection,
    telemetry: SharedTelemetry,
) -> BinResult<SessionReport> {
    let endpoint = section.endpoint();
    let node = section.node();
    let mut client = DeviceClient::new(
        endpoint.clone(),
        SimulatedTransport::new(section.simulation.clone()),
        telemetry,
    );

    let (read, written) = with_client(&mut client, async |c| -> OpcUaResult<(OpcUaValue, OpcUaValue)> {
        let read = c.read(&node).await?;
        let next = read
            .as_i64()
            .ok_or_else(|| OpcUaError::type_mismatch("integer", read.type_name()))?
            .checked_add(1)
            .ok_or_else(|| OpcUaError::write_failed(node.as_str(), "incremented value overflows"))?;

        let written = OpcUaValue::Int64(next);
        c.write(&node, written.clone()).await?;
        Ok((read, written))
    })
    .await?;

    Ok(SessionReport {
        endpoint,
        node,
        read,
        written,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use benchlink_core::{MemoryTelemetry, NoopTelemetry, Severity};
    use benchlink_opcua::SimulationConfig;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_run_session_increments_placeholder() {
        let sink = MemoryTelemetry::new();
        let section = OpcUaSection::default();

        let report = run_session(&section, Arc::new(sink.clone())).await.unwrap();

        assert_eq!(report.read, OpcUaValue::Int32(42));
        assert_eq!(report.written, OpcUaValue::Int64(43));
        assert_eq!(report.endpoint.as_str(), "opc.tcp://demo-opcua-server:4840");
        assert_eq!(sink.messages().last().map(String::as_str), Some("Disconnected"));
        assert_eq!(sink.count_where(|e| e.severity >= Severity::Warn), 0);
    }

    #[tokio::test]
    async fn test_run_session_uses_configured_placeholder() {
        let section = OpcUaSection {
            simulation: SimulationConfig::instant().with_placeholder(-1),
            ..OpcUaSection::default()
        };

        let report = run_session(&section, NoopTelemetry::shared()).await.unwrap();
        assert_eq!(report.written, OpcUaValue::Int64(0));
    }

    #[test]
    fn test_report_serializes() {
        let report = SessionReport {
            endpoint: DeviceEndpoint::new("opc.tcp://x:4840"),
            node: NodeId::new("ns=2;s=A"),
            read: OpcUaValue::Int32(42),
            written: OpcUaValue::Int64(43),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "endpoint": "opc.tcp://x:4840",
                "node": "ns=2;s=A",
                "read": 42,
                "written": 43
            })
        );
    }

    #[test]
    fn test_command_applies_overrides() {
        let args = OpcUaArgs {
            endpoint: Some("opc.tcp://bench:4840".to_string()),
            node: None,
        };
        let mut config = DemoConfig::default();
        config.opcua.simulation = SimulationConfig::instant();

        assert!(opcua(&config, &args, NoopTelemetry::shared()).is_ok());
    }

    #[test]
    fn test_command_rejects_empty_endpoint_flag() {
        let args = OpcUaArgs {
            endpoint: Some(String::new()),
            node: None,
        };

        let err = opcua(&DemoConfig::default(), &args, NoopTelemetry::shared()).unwrap_err();
        assert!(err.to_string().contains("opcua.endpoint"));
        assert_eq!(err.exit_code(), 1);
    }
}
