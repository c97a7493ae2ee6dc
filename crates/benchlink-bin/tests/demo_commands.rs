// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! End-to-end tests for the demo commands.

use std::path::PathBuf;
use std::sync::Arc;

use benchlink_bin::commands::{demo, run_moves, run_session};
use benchlink_bin::{Cli, ConfigLoader, DemoConfig};
use benchlink_core::{MemoryTelemetry, NoopTelemetry, Severity};
use benchlink_opcua::{OpcUaValue, SimulationConfig};
use benchlink_platepusher::PlatePusherClient;
use clap::Parser;

fn example_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../benchlink.example.yaml")
}

#[test]
fn test_example_config_matches_defaults() {
    let config = ConfigLoader::new()
        .with_env_vars(false)
        .load(Some(&example_config_path()))
        .unwrap();
    assert_eq!(config, DemoConfig::default());
}

#[tokio::test(start_paused = true)]
async fn test_session_then_moves_share_telemetry() {
    let config = DemoConfig::default();
    let sink = MemoryTelemetry::new();
    let telemetry = Arc::new(sink.clone());

    let report = run_session(&config.opcua, telemetry.clone()).await.unwrap();
    assert_eq!(report.read, OpcUaValue::Int32(42));
    assert_eq!(report.written, OpcUaValue::Int64(43));

    let client = PlatePusherClient::simulated(config.platepusher.client_config(), telemetry);
    let responses = run_moves(&client, &config.platepusher.sites).unwrap();
    assert_eq!(
        responses.iter().map(|r| r.url.as_str()).collect::<Vec<_>>(),
        vec![
            "http://demo-platepusher.local/api/home",
            "http://demo-platepusher.local/api/move",
            "http://demo-platepusher.local/api/move",
        ]
    );

    let components: Vec<&str> = sink.events().iter().map(|e| e.component).collect();
    assert_eq!(components.first(), Some(&"opcua"));
    assert_eq!(components.last(), Some(&"platepusher"));
    assert_eq!(sink.count_where(|e| e.severity >= Severity::Warn), 0);
}

#[test]
fn test_demo_command_runs_both_flows() {
    let mut config = DemoConfig::default();
    config.opcua.simulation = SimulationConfig::instant();

    assert!(demo(&config, NoopTelemetry::shared()).is_ok());
}

#[test]
fn test_missing_config_file_exit_code() {
    let cli = Cli::parse_from(["benchlink", "-c", "/nonexistent/bench.yaml", "opcua"]);
    let err = benchlink_bin::commands::execute(&cli).unwrap_err();
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_failed_command_names_the_demo() {
    let cli = Cli::parse_from(["benchlink", "opcua", "--endpoint", ""]);
    let err = benchlink_bin::commands::execute(&cli).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("OPC UA demo failed: "), "{message}");
    assert!(message.contains("opcua.endpoint"));
    assert_eq!(err.exit_code(), 1);

    let mut config = DemoConfig::default();
    config.opcua.simulation = SimulationConfig::instant();
    config.platepusher.base_url = String::new();
    let err = demo(&config, NoopTelemetry::shared()).unwrap_err();
    assert!(err.to_string().starts_with("Plate pusher demo failed: "));
    assert_eq!(err.exit_code(), 1);
}
