// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Injectable telemetry for device clients.
//!
//! Clients never talk to a global logger. They hold a [`SharedTelemetry`]
//! and emit [`TelemetryEvent`]s through it. The binary wires in
//! [`TracingTelemetry`]; tests wire in [`MemoryTelemetry`] and assert on the
//! recorded events.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use benchlink_core::telemetry::{MemoryTelemetry, Severity, Telemetry, TelemetryEvent};
//!
//! let sink = Arc::new(MemoryTelemetry::new());
//! sink.record(TelemetryEvent::info("opcua", "Connection established"));
//!
//! assert_eq!(sink.len(), 1);
//! assert!(sink.contains(Severity::Info, "established"));
//! ```

mod memory;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::Level;

pub use memory::MemoryTelemetry;

// =============================================================================
// Severity
// =============================================================================

/// Severity levels recognized by every telemetry sink.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Very detailed diagnostics.
    Trace,
    /// Diagnostics useful while debugging.
    Debug,
    /// Normal progress.
    #[default]
    Info,
    /// Something unexpected but recoverable.
    Warn,
    /// An operation failed.
    Error,
}

impl Severity {
    /// Converts to the matching tracing level.
    pub fn to_tracing_level(self) -> Level {
        match self {
            Self::Trace => Level::TRACE,
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }

    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// TelemetryEvent
// =============================================================================

/// A single progress or diagnostic event emitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryEvent {
    /// When the event was created.
    pub timestamp: DateTime<Utc>,

    /// Event severity.
    pub severity: Severity,

    /// Emitting component (e.g. `opcua`, `platepusher`).
    pub component: &'static str,

    /// Human-readable message.
    pub message: String,

    /// Structured key/value context.
    pub fields: Vec<(&'static str, String)>,
}

impl TelemetryEvent {
    /// Creates a new event with no fields.
    pub fn new(severity: Severity, component: &'static str, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            component,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Creates a trace event.
    pub fn trace(component: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Trace, component, message)
    }

    /// Creates a debug event.
    pub fn debug(component: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Debug, component, message)
    }

    /// Creates an info event.
    pub fn info(component: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, component, message)
    }

    /// Creates a warning event.
    pub fn warn(component: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, component, message)
    }

    /// Creates an error event.
    pub fn error(component: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, component, message)
    }

    /// Attaches a structured field.
    pub fn with_field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    /// Looks up a field value by key.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for TelemetryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.component, self.message)?;
        for (key, value) in &self.fields {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

// =============================================================================
// Telemetry Trait
// =============================================================================

/// Sink for client telemetry.
///
/// Implementations must be `Send + Sync` so one sink can be shared by
/// several clients.
pub trait Telemetry: Send + Sync + fmt::Debug {
    /// Records an event.
    fn record(&self, event: TelemetryEvent);

    /// Returns `true` if events at `severity` are kept by this sink.
    ///
    /// Clients may skip building expensive events when this is `false`.
    fn is_enabled(&self, severity: Severity) -> bool {
        let _ = severity;
        true
    }

    /// Returns the sink name.
    fn name(&self) -> &str;
}

/// Telemetry handle passed to clients at construction.
pub type SharedTelemetry = Arc<dyn Telemetry>;

// =============================================================================
// TracingTelemetry
// =============================================================================

/// Forwards events to the `tracing` ecosystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl TracingTelemetry {
    /// Creates a new tracing sink.
    pub fn new() -> Self {
        Self
    }

    /// Creates a shared handle to a tracing sink.
    pub fn shared() -> SharedTelemetry {
        Arc::new(Self)
    }
}

impl Telemetry for TracingTelemetry {
    fn record(&self, event: TelemetryEvent) {
        let fields = FieldList(&event.fields);

        match event.severity.to_tracing_level() {
            Level::ERROR => tracing::error!(
                component = event.component,
                fields = %fields,
                "{}",
                event.message
            ),
            Level::WARN => tracing::warn!(
                component = event.component,
                fields = %fields,
                "{}",
                event.message
            ),
            Level::INFO => tracing::info!(
                component = event.component,
                fields = %fields,
                "{}",
                event.message
            ),
            Level::DEBUG => tracing::debug!(
                component = event.component,
                fields = %fields,
                "{}",
                event.message
            ),
            _ => tracing::trace!(
                component = event.component,
                fields = %fields,
                "{}",
                event.message
            ),
        }
    }

    fn name(&self) -> &str {
        "tracing"
    }
}

/// Renders structured fields as `key=value` pairs.
struct FieldList<'a>(&'a [(&'static str, String)]);

impl fmt::Display for FieldList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

// =============================================================================
// NoopTelemetry
// =============================================================================

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl NoopTelemetry {
    /// Creates a shared handle to a no-op sink.
    pub fn shared() -> SharedTelemetry {
        Arc::new(Self)
    }
}

impl Telemetry for NoopTelemetry {
    fn record(&self, _event: TelemetryEvent) {}

    fn is_enabled(&self, _severity: Severity) -> bool {
        false
    }

    fn name(&self) -> &str {
        "noop"
    }
}

// =============================================================================
// Tests
// =============================================================================
