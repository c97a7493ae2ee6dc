// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Transport abstraction layer.
//!
//! [`OpcUaTransport`] is the seam where a real OPC UA stack would plug in.
//! [`SimulatedTransport`] stands in for it with fixed latencies, a placeholder
//! read value and a [`TransportProbe`] that tests use to observe traffic.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{ConnectionError, OpcUaError, OpcUaResult};
use crate::types::{DeviceEndpoint, NodeId, OpcUaValue, SimulationConfig};

// =============================================================================
// OpcUaTransport Trait
// =============================================================================

/// Low-level operations against a device.
///
/// The client enforces the connection-state precondition before calling
/// `read_value`/`write_value`; transports may assume they are connected.
#[async_trait]
pub trait OpcUaTransport: Send + Sync {
    /// Establishes a connection to the endpoint.
    async fn connect(&mut self, endpoint: &DeviceEndpoint) -> OpcUaResult<()>;

    /// Closes the connection.
    async fn disconnect(&mut self, endpoint: &DeviceEndpoint) -> OpcUaResult<()>;

    /// Reads a single node value.
    async fn read_value(&self, node_id: &NodeId) -> OpcUaResult<OpcUaValue>;

    /// Writes a single node value.
    async fn write_value(&self, node_id: &NodeId, value: OpcUaValue) -> OpcUaResult<()>;

    /// Returns the transport name.
    fn name(&self) -> &str;
}

// =============================================================================
// TransportProbe
// =============================================================================

#[derive(Debug, Default)]
struct ProbeInner {
    connects: AtomicU64,
    disconnects: AtomicU64,
    reads: AtomicU64,
    writes: Mutex<Vec<(NodeId, OpcUaValue)>>,
}

/// Read-only view of the traffic a [`SimulatedTransport`] has seen.
///
/// Cloning is cheap; all clones observe the same transport.
#[derive(Debug, Clone, Default)]
pub struct TransportProbe {
    inner: Arc<ProbeInner>,
}

impl TransportProbe {
    /// Number of successful connects.
    pub fn connects(&self) -> u64 {
        self.inner.connects.load(Ordering::Relaxed)
    }

    /// Number of disconnects.
    pub fn disconnects(&self) -> u64 {
        self.inner.disconnects.load(Ordering::Relaxed)
    }

    /// Number of reads served.
    pub fn reads(&self) -> u64 {
        self.inner.reads.load(Ordering::Relaxed)
    }

    /// Every write in the order it was received.
    pub fn writes(&self) -> Vec<(NodeId, OpcUaValue)> {
        self.inner.writes.lock().clone()
    }

    /// The last value written to `node_id`, if any.
    pub fn last_written(&self, node_id: &NodeId) -> Option<OpcUaValue> {
        self.inner
            .writes
            .lock()
            .iter()
            .rev()
            .find(|(n, _)| n == node_id)
            .map(|(_, v)| v.clone())
    }
}

// =============================================================================
// SimulatedTransport
// =============================================================================

/// In-process stand-in for an OPC UA server.
///
/// Every operation sleeps for its configured latency. Reads always return the
/// configured placeholder; writes are recorded but do not change what reads
/// return.
#[derive(Debug, Default)]
pub struct SimulatedTransport {
    config: SimulationConfig,
    refuse_connect: bool,
    fail_disconnect: bool,
    probe: TransportProbe,
}

impl SimulatedTransport {
    /// Creates a transport with the given simulation settings.
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Makes every connect attempt fail with `Refused`.
    pub fn refusing_connect(mut self) -> Self {
        self.refuse_connect = true;
        self
    }

    /// Makes every disconnect report the connection as closed by the peer.
    pub fn failing_disconnect(mut self) -> Self {
        self.fail_disconnect = true;
        self
    }

    /// Returns a probe observing this transport.
    pub fn probe(&self) -> TransportProbe {
        self.probe.clone()
    }

    /// Returns the simulation settings.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[async_trait]
impl OpcUaTransport for SimulatedTransport {
    async fn connect(&mut self, endpoint: &DeviceEndpoint) -> OpcUaResult<()> {
        tokio::time::sleep(self.config.connect_latency).await;

        if self.refuse_connect {
            return Err(OpcUaError::connection_refused(endpoint.as_str()));
        }

        self.probe.inner.connects.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn disconnect(&mut self, _endpoint: &DeviceEndpoint) -> OpcUaResult<()> {
        tokio::time::sleep(self.config.disconnect_latency).await;
        self.probe.inner.disconnects.fetch_add(1, Ordering::Relaxed);

        if self.fail_disconnect {
            return Err(OpcUaError::connection(ConnectionError::closed(
                "peer reset during close",
            )));
        }
        Ok(())
    }

    async fn read_value(&self, _node_id: &NodeId) -> OpcUaResult<OpcUaValue> {
        tokio::time::sleep(self.config.read_latency).await;
        self.probe.inner.reads.fetch_add(1, Ordering::Relaxed);
        Ok(OpcUaValue::Int32(self.config.placeholder_value))
    }

    async fn write_value(&self, node_id: &NodeId, value: OpcUaValue) -> OpcUaResult<()> {
        tokio::time::sleep(self.config.write_latency).await;
        self.probe.inner.writes.lock().push((node_id.clone(), value));
        Ok(())
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

// =============================================================================
// Tests
// =============================================================================
