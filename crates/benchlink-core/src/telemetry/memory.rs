// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory telemetry sink for testing and development.

use std::sync::Arc;

use parking_lot::RwLock;

use super::{Severity, Telemetry, TelemetryEvent};

// =============================================================================
// MemoryTelemetry
// =============================================================================

/// Stores every event in memory.
///
/// Primarily meant for tests, where it lets assertions inspect what a client
/// reported. Clones share the same backing store.
#[derive(Debug, Clone)]
pub struct MemoryTelemetry {
    /// Recorded events.
    events: Arc<RwLock<Vec<TelemetryEvent>>>,
    /// Minimum severity kept.
    min_severity: Severity,
    /// Maximum number of events kept (0 = unlimited).
    max_events: usize,
}

impl Default for MemoryTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTelemetry {
    /// Creates a sink that keeps every event.
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            min_severity: Severity::Trace,
            max_events: 0,
        }
    }

    /// Creates a sink that keeps at most `max_events`, dropping the oldest.
    pub fn with_capacity(max_events: usize) -> Self {
        Self {
            max_events,
            ..Self::new()
        }
    }

    /// Only keeps events at or above `severity`.
    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    /// Returns a snapshot of all recorded events.
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.read().clone()
    }

    /// Returns the recorded messages in order.
    pub fn messages(&self) -> Vec<String> {
        self.events.read().iter().map(|e| e.message.clone()).collect()
    }

    /// Returns events matching a predicate.
    pub fn events_where<F>(&self, predicate: F) -> Vec<TelemetryEvent>
    where
        F: Fn(&TelemetryEvent) -> bool,
    {
        self.events
            .read()
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }

    /// Counts events matching a predicate.
    pub fn count_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&TelemetryEvent) -> bool,
    {
        self.events.read().iter().filter(|e| predicate(e)).count()
    }

    /// Returns `true` if an event at `severity` contains `needle`.
    pub fn contains(&self, severity: Severity, needle: &str) -> bool {
        self.events
            .read()
            .iter()
            .any(|e| e.severity == severity && e.message.contains(needle))
    }

    /// Clears all recorded events.
    pub fn clear(&self) {
        self.events.write().clear();
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

impl Telemetry for MemoryTelemetry {
    fn record(&self, event: TelemetryEvent) {
        if event.severity < self.min_severity {
            return;
        }

        let mut events = self.events.write();
        if self.max_events > 0 && events.len() >= self.max_events {
            events.remove(0);
        }
        events.push(event);
    }

    fn is_enabled(&self, severity: Severity) -> bool {
        severity >= self.min_severity
    }

    fn name(&self) -> &str {
        "memory"
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_telemetry_basic() {
        let sink = MemoryTelemetry::new();
        assert!(sink.is_empty());

        sink.record(TelemetryEvent::info("opcua", "Connecting"));
        sink.record(TelemetryEvent::debug("opcua", "Handshake"));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.messages(), vec!["Connecting", "Handshake"]);
        assert!(sink.contains(Severity::Debug, "Hand"));
        assert!(!sink.contains(Severity::Info, "Hand"));
    }

    #[test]
    fn test_memory_telemetry_capacity() {
        let sink = MemoryTelemetry::with_capacity(2);

        sink.record(TelemetryEvent::info("t", "one"));
        sink.record(TelemetryEvent::info("t", "two"));
        sink.record(TelemetryEvent::info("t", "three"));

        assert_eq!(sink.messages(), vec!["two", "three"]);
    }

    #[test]
    fn test_memory_telemetry_min_severity() {
        let sink = MemoryTelemetry::new().with_min_severity(Severity::Warn);

        assert!(!sink.is_enabled(Severity::Info));
        assert!(sink.is_enabled(Severity::Error));

        sink.record(TelemetryEvent::info("t", "skipped"));
        sink.record(TelemetryEvent::error("t", "kept"));

        assert_eq!(sink.messages(), vec!["kept"]);
    }

    #[test]
    fn test_memory_telemetry_shared_clone() {
        let sink = MemoryTelemetry::new();
        let clone = sink.clone();

        clone.record(TelemetryEvent::info("t", "from clone"));
        assert_eq!(sink.len(), 1);

        sink.clear();
        assert!(clone.is_empty());
    }

    #[test]
    fn test_memory_telemetry_queries() {
        let sink = MemoryTelemetry::new();
        sink.record(TelemetryEvent::info("opcua", "a").with_field("node", "n1"));
        sink.record(TelemetryEvent::info("platepusher", "b"));
        sink.record(TelemetryEvent::warn("opcua", "c"));

        assert_eq!(sink.count_where(|e| e.component == "opcua"), 2);

        let with_node = sink.events_where(|e| e.field("node").is_some());
        assert_eq!(with_node.len(), 1);
        assert_eq!(with_node[0].message, "a");
    }
}
