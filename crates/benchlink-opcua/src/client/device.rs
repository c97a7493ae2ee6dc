// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Stateful device client.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use benchlink_core::{SharedTelemetry, TelemetryEvent};

use crate::error::{OpcUaError, OpcUaResult};
use crate::types::{ConnectionState, DeviceEndpoint, NodeId, OpcUaValue, SimulationConfig};

use super::transport::{OpcUaTransport, SimulatedTransport};

const COMPONENT: &str = "opcua";

// =============================================================================
// ClientStats
// =============================================================================

/// Counters for device client operations.
#[derive(Debug, Default)]
pub struct ClientStats {
    reads: AtomicU64,
    writes: AtomicU64,
    errors: AtomicU64,
    connections: AtomicU64,
    disconnections: AtomicU64,
}

impl ClientStats {
    /// Creates zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    fn record_connection(&self) {
        self.connections.fetch_add(1, Ordering::Relaxed);
    }

    fn record_disconnection(&self) {
        self.disconnections.fetch_add(1, Ordering::Relaxed);
    }

    /// Successful reads.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Successful writes.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Failed operations, including precondition failures.
    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    /// Connections established.
    pub fn connections(&self) -> u64 {
        self.connections.load(Ordering::Relaxed)
    }

    /// Connections released.
    pub fn disconnections(&self) -> u64 {
        self.disconnections.load(Ordering::Relaxed)
    }
}

// =============================================================================
// DeviceClient
// =============================================================================

/// Stateful handle to a single device endpoint.
///
/// The client owns its [`ConnectionState`] exclusively. `read` and `write`
/// fail with [`ConnectionError::NotConnected`](crate::error::ConnectionError::NotConnected)
/// unless the state is [`ConnectionState::Connected`].
///
/// `connect` is idempotent: calling it while connected does nothing.
///
/// # Examples
///
/// ```rust,ignore
/// use benchlink_core::TracingTelemetry;
/// use benchlink_opcua::{DeviceClient, NodeId};
///
/// let mut client = DeviceClient::simulated("opc.tcp://localhost:4840", TracingTelemetry::shared());
/// client.connect().await?;
/// let value = client.read(&NodeId::new("ns=2;s=Temperature")).await?;
/// client.disconnect().await?;
/// ```
pub struct DeviceClient<T: OpcUaTransport = SimulatedTransport> {
    endpoint: DeviceEndpoint,
    state: ConnectionState,
    transport: T,
    telemetry: SharedTelemetry,
    stats: ClientStats,
}

impl DeviceClient<SimulatedTransport> {
    /// Creates a client backed by a [`SimulatedTransport`] with default latencies.
    pub fn simulated(endpoint: impl Into<DeviceEndpoint>, telemetry: SharedTelemetry) -> Self {
        Self::new(
            endpoint,
            SimulatedTransport::new(SimulationConfig::default()),
            telemetry,
        )
    }
}

impl<T: OpcUaTransport> DeviceClient<T> {
    /// Creates a disconnected client.
    pub fn new(endpoint: impl Into<DeviceEndpoint>, transport: T, telemetry: SharedTelemetry) -> Self {
        Self {
            endpoint: endpoint.into(),
            state: ConnectionState::Disconnected,
            transport,
            telemetry,
            stats: ClientStats::new(),
        }
    }

    /// Returns the endpoint this client targets.
    pub fn endpoint(&self) -> &DeviceEndpoint {
        &self.endpoint
    }

    /// Returns the current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Returns `true` if connected.
    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Returns the client statistics.
    pub fn stats(&self) -> &ClientStats {
        &self.stats
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // =========================================================================
    // Connection Management
    // =========================================================================

    /// Connects to the endpoint.
    pub async fn connect(&mut self) -> OpcUaResult<()> {
        if self.state.is_connected() {
            self.emit(
                TelemetryEvent::debug(COMPONENT, "Already connected")
                    .with_field("endpoint", &self.endpoint),
            );
            return Ok(());
        }

        self.emit(
            TelemetryEvent::info(COMPONENT, "Connecting to OPC UA endpoint")
                .with_field("endpoint", &self.endpoint)
                .with_field("transport", self.transport.name()),
        );

        if let Err(e) = self.transport.connect(&self.endpoint).await {
            self.report(&e, "connect");
            return Err(e);
        }

        self.state = ConnectionState::Connected;
        self.stats.record_connection();
        self.emit(TelemetryEvent::info(COMPONENT, "Connection established"));

        Ok(())
    }

    /// Disconnects from the endpoint. Does nothing if not connected.
    ///
    /// The state is `Disconnected` afterwards even if the transport reports
    /// an error while closing; that error is returned.
    pub async fn disconnect(&mut self) -> OpcUaResult<()> {
        if !self.state.is_connected() {
            return Ok(());
        }

        self.emit(
            TelemetryEvent::info(COMPONENT, "Disconnecting from OPC UA endpoint")
                .with_field("endpoint", &self.endpoint),
        );

        let result = self.transport.disconnect(&self.endpoint).await;
        self.state = ConnectionState::Disconnected;
        self.stats.record_disconnection();

        match result {
            Ok(()) => {
                self.emit(TelemetryEvent::info(COMPONENT, "Disconnected"));
                Ok(())
            }
            Err(e) => {
                self.report(&e, "disconnect");
                Err(e)
            }
        }
    }

    // =========================================================================
    // Read / Write
    // =========================================================================

    /// Reads a node value.
    pub async fn read(&self, node_id: &NodeId) -> OpcUaResult<OpcUaValue> {
        self.ensure_connected("read")?;

        self.emit(TelemetryEvent::info(COMPONENT, "Reading node").with_field("node", node_id));

        let value = match self.transport.read_value(node_id).await {
            Ok(value) => value,
            Err(e) => {
                self.report(&e, "read");
                return Err(e);
            }
        };

        self.stats.record_read();
        self.emit(
            TelemetryEvent::info(COMPONENT, "Read value from node")
                .with_field("value", &value)
                .with_field("node", node_id),
        );

        Ok(value)
    }

    /// Writes a value to a node.
    pub async fn write(&self, node_id: &NodeId, value: impl Into<OpcUaValue>) -> OpcUaResult<()> {
        self.ensure_connected("write")?;

        let value = value.into();
        self.emit(
            TelemetryEvent::info(COMPONENT, "Writing value to node")
                .with_field("value", &value)
                .with_field("node", node_id),
        );

        if let Err(e) = self.transport.write_value(node_id, value).await {
            self.report(&e, "write");
            return Err(e);
        }

        self.stats.record_write();
        self.emit(TelemetryEvent::info(COMPONENT, "Write completed"));

        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn ensure_connected(&self, operation: &'static str) -> OpcUaResult<()> {
        if self.state.is_connected() {
            return Ok(());
        }

        let error = OpcUaError::not_connected();
        self.report(&error, operation);
        Err(error)
    }

    fn report(&self, error: &OpcUaError, operation: &'static str) {
        self.stats.record_error();
        self.emit(
            TelemetryEvent::new(error.severity(), COMPONENT, error.to_string())
                .with_field("operation", operation)
                .with_field("error_code", error.error_code())
                .with_field("endpoint", &self.endpoint),
        );
    }

    fn emit(&self, event: TelemetryEvent) {
        if self.telemetry.is_enabled(event.severity) {
            self.telemetry.record(event);
        }
    }
}

impl<T: OpcUaTransport> fmt::Debug for DeviceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceClient")
            .field("endpoint", &self.endpoint)
            .field("state", &self.state)
            .field("transport", &self.transport.name())
            .field("telemetry", &self.telemetry.name())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use benchlink_core::{MemoryTelemetry, Severity};

    use super::*;

    const ENDPOINT: &str = "opc.tcp://demo-opcua-server:4840";

    fn client_with_sink() -> (DeviceClient, MemoryTelemetry) {
        let sink = MemoryTelemetry::new();
        let client = DeviceClient::new(
            ENDPOINT,
            SimulatedTransport::new(SimulationConfig::instant()),
            Arc::new(sink.clone()),
        );
        (client, sink)
    }

    #[tokio::test]
    async fn test_read_before_connect_fails() {
        let (client, sink) = client_with_sink();
        let node = NodeId::new("ns=2;s=Demo");

        let err = client.read(&node).await.unwrap_err();
        assert!(err.is_not_connected());

        let err = client.write(&node, 1).await.unwrap_err();
        assert!(err.is_not_connected());

        assert_eq!(client.stats().errors(), 2);
        assert_eq!(client.transport().probe().reads(), 0);
        assert!(client.transport().probe().writes().is_empty());
        assert!(sink.contains(Severity::Warn, "Not connected"));
    }

    #[tokio::test]
    async fn test_connect_read_write_disconnect() {
        let (mut client, _) = client_with_sink();
        let node = NodeId::new("ns=2;s=Demo.Static.Scalar.Int32");

        assert_eq!(client.state(), ConnectionState::Disconnected);
        client.connect().await.unwrap();
        assert_eq!(client.state(), ConnectionState::Connected);

        let value = client.read(&node).await.unwrap();
        assert_eq!(value, OpcUaValue::Int32(42));

        client.write(&node, value.as_i64().unwrap() + 1).await.unwrap();
        assert_eq!(
            client.transport().probe().last_written(&node),
            Some(OpcUaValue::Int64(43))
        );

        client.disconnect().await.unwrap();
        assert_eq!(client.state(), ConnectionState::Disconnected);

        let err = client.read(&node).await.unwrap_err();
        assert!(err.is_not_connected());
    }

    #[tokio::test]
    async fn test_connect_is_idempotent() {
        let (mut client, sink) = client_with_sink();

        client.connect().await.unwrap();
        client.connect().await.unwrap();

        assert_eq!(client.stats().connections(), 1);
        assert_eq!(client.transport().probe().connects(), 1);
        assert!(sink.contains(Severity::Debug, "Already connected"));
    }

    #[tokio::test]
    async fn test_disconnect_when_disconnected_is_noop() {
        let (mut client, sink) = client_with_sink();

        client.disconnect().await.unwrap();

        assert_eq!(client.transport().probe().disconnects(), 0);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_failed_connect_stays_disconnected() {
        let sink = MemoryTelemetry::new();
        let mut client = DeviceClient::new(
            ENDPOINT,
            SimulatedTransport::new(SimulationConfig::instant()).refusing_connect(),
            Arc::new(sink.clone()),
        );

        let err = client.connect().await.unwrap_err();
        assert!(err.to_string().contains(ENDPOINT));
        assert_eq!(client.state(), ConnectionState::Disconnected);
        assert!(sink.contains(Severity::Error, "refused"));
    }

    #[tokio::test]
    async fn test_failed_disconnect_still_releases() {
        let mut client = DeviceClient::new(
            ENDPOINT,
            SimulatedTransport::new(SimulationConfig::instant()).failing_disconnect(),
            Arc::new(MemoryTelemetry::new()),
        );

        client.connect().await.unwrap();
        assert!(client.disconnect().await.is_err());
        assert_eq!(client.state(), ConnectionState::Disconnected);
        assert_eq!(client.stats().disconnections(), 1);
    }

    #[tokio::test]
    async fn test_progress_events() {
        let (mut client, sink) = client_with_sink();
        let node = NodeId::new("n");

        client.connect().await.unwrap();
        client.read(&node).await.unwrap();
        client.write(&node, 43).await.unwrap();
        client.disconnect().await.unwrap();

        assert_eq!(
            sink.messages(),
            vec![
                "Connecting to OPC UA endpoint",
                "Connection established",
                "Reading node",
                "Read value from node",
                "Writing value to node",
                "Write completed",
                "Disconnecting from OPC UA endpoint",
                "Disconnected",
            ]
        );

        let read = sink.events_where(|e| e.message == "Read value from node");
        assert_eq!(read[0].field("value"), Some("42"));
        assert_eq!(read[0].field("node"), Some("n"));
    }

    #[test]
    fn test_debug_output() {
        let (client, _) = client_with_sink();
        let debug = format!("{:?}", client);
        assert!(debug.contains("simulated"));
        assert!(debug.contains("Disconnected"));
    }
}
