// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Core types for the OPC UA style device client.
//!
//! Endpoints and node identifiers are deliberately opaque: they follow an
//! external addressing scheme and are passed through unmodified.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// =============================================================================
// DeviceEndpoint
// =============================================================================

/// Opaque connection target, e.g. `opc.tcp://demo-opcua-server:4840`.
///
/// Not parsed or validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceEndpoint(String);

impl DeviceEndpoint {
    /// Creates an endpoint from any string-like value.
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Returns the endpoint as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceEndpoint {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DeviceEndpoint {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// =============================================================================
// NodeId
// =============================================================================

/// Opaque key of a readable/writable point, e.g. `ns=2;s=Demo.Static.Scalar.Int32`.
///
/// No validation is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// =============================================================================
// ConnectionState
// =============================================================================

/// Connection state of a device client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// No connection is held.
    #[default]
    Disconnected,

    /// Connected and ready for reads and writes.
    Connected,
}

impl ConnectionState {
    /// Returns `true` if connected.
    #[inline]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "Disconnected"),
            Self::Connected => write!(f, "Connected"),
        }
    }
}

// =============================================================================
// OpcUaValue
// =============================================================================

/// Value read from or written to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum OpcUaValue {
    /// Boolean value.
    Boolean(bool),

    /// 32-bit signed integer.
    Int32(i32),

    /// 64-bit signed integer.
    Int64(i64),

    /// 64-bit double.
    Double(f64),

    /// String value.
    String(String),

    /// Null value.
    #[default]
    Null,
}

impl OpcUaValue {
    /// Returns the name of the variant's data type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "Boolean",
            Self::Int32(_) => "Int32",
            Self::Int64(_) => "Int64",
            Self::Double(_) => "Double",
            Self::String(_) => "String",
            Self::Null => "Null",
        }
    }

    /// Returns `true` if this is a null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Attempts to get the value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Boolean(v) => Some(i64::from(*v)),
            Self::Int32(v) => Some(i64::from(*v)),
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to get the value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int32(v) => Some(f64::from(*v)),
            Self::Int64(v) => Some(*v as f64),
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to get the value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for OpcUaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{}", v),
            Self::Int32(v) => write!(f, "{}", v),
            Self::Int64(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{}", v),
            Self::Null => write!(f, "null"),
        }
    }
}

impl From<i32> for OpcUaValue {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for OpcUaValue {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f64> for OpcUaValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<bool> for OpcUaValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<&str> for OpcUaValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

// =============================================================================
// SimulationConfig
// =============================================================================

/// Latencies and canned values used by the simulated transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Delay standing in for the connect handshake.
    #[serde(rename = "connect_latency_ms", with = "duration_millis")]
    pub connect_latency: Duration,

    /// Delay standing in for closing the session.
    #[serde(rename = "disconnect_latency_ms", with = "duration_millis")]
    pub disconnect_latency: Duration,

    /// Delay standing in for a read round-trip.
    #[serde(rename = "read_latency_ms", with = "duration_millis")]
    pub read_latency: Duration,

    /// Delay standing in for a write round-trip.
    #[serde(rename = "write_latency_ms", with = "duration_millis")]
    pub write_latency: Duration,

    /// Value returned by every read.
    pub placeholder_value: i32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            connect_latency: Duration::from_millis(100),
            disconnect_latency: Duration::from_millis(50),
            read_latency: Duration::from_millis(50),
            write_latency: Duration::from_millis(50),
            placeholder_value: 42,
        }
    }
}

impl SimulationConfig {
    /// A configuration with no delays, useful in tests.
    pub fn instant() -> Self {
        Self {
            connect_latency: Duration::ZERO,
            disconnect_latency: Duration::ZERO,
            read_latency: Duration::ZERO,
            write_latency: Duration::ZERO,
            ..Default::default()
        }
    }

    /// Sets the placeholder read value.
    pub fn with_placeholder(mut self, value: i32) -> Self {
        self.placeholder_value = value;
        self
    }
}

// =============================================================================
// Duration Serialization Helper
// =============================================================================

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

// =============================================================================
// Tests
// =============================================================================
