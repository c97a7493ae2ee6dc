// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Scoped session helpers.
//!
//! [`with_client`] connects a client, hands it to an async block, and
//! disconnects it on every exit path: normal return, error return, or panic.
//! A client that was already connected is left connected.
//! [`with_session`] does the same for a freshly built simulated client.

use std::panic::AssertUnwindSafe;

use benchlink_core::SharedTelemetry;
use futures::FutureExt;

use crate::error::OpcUaError;
use crate::types::DeviceEndpoint;

use super::device::DeviceClient;
use super::transport::{OpcUaTransport, SimulatedTransport};

/// Runs `block` against a connected client and always disconnects afterwards.
///
/// - If `connect` fails, its error is returned and `disconnect` is not called.
/// - If `block` returns `Err`, `disconnect` runs and the block's error is
///   returned unchanged. A disconnect failure in that case is only reported
///   to telemetry.
/// - If `block` panics, `disconnect` runs and the panic resumes.
/// - If `block` succeeds but `disconnect` fails, the disconnect error is
///   returned.
///
/// A client that is already connected when this is called is not
/// disconnected; its owner keeps the session.
///
/// Connect failures are not retried.
pub async fn with_client<T, F, R, E>(client: &mut DeviceClient<T>, block: F) -> Result<R, E>
where
    T: OpcUaTransport,
    F: AsyncFnOnce(&mut DeviceClient<T>) -> Result<R, E>,
    E: From<OpcUaError>,
{
    let acquired = !client.is_connected();
    client.connect().await?;

    let outcome = AssertUnwindSafe(block(&mut *client)).catch_unwind().await;
    let released = if acquired {
        client.disconnect().await
    } else {
        Ok(())
    };

    match outcome {
        Ok(Ok(value)) => {
            released?;
            Ok(value)
        }
        Ok(Err(error)) => {
            // `disconnect` has already reported its own failure.
            drop(released);
            Err(error)
        }
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Builds a simulated client for `endpoint` and runs `block` inside a session.
///
/// See [`with_client`] for the cleanup guarantees.
pub async fn with_session<F, R, E>(
    endpoint: impl Into<DeviceEndpoint>,
    telemetry: SharedTelemetry,
    block: F,
) -> Result<R, E>
where
    F: AsyncFnOnce(&mut DeviceClient<SimulatedTransport>) -> Result<R, E>,
    E: From<OpcUaError>,
{
    let mut client = DeviceClient::simulated(endpoint, telemetry);
    with_client(&mut client, block).await
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use benchlink_core::{MemoryTelemetry, NoopTelemetry};

    use super::*;
    use crate::error::OpcUaResult;
    use crate::types::{ConnectionState, NodeId, OpcUaValue, SimulationConfig};

    const ENDPOINT: &str = "opc.tcp://demo-opcua-server:4840";

    #[derive(Debug)]
    enum DemoError {
        Device(OpcUaError),
        Aborted(&'static str),
    }

    impl From<OpcUaError> for DemoError {
        fn from(e: OpcUaError) -> Self {
            Self::Device(e)
        }
    }

    fn instant_client() -> DeviceClient {
        DeviceClient::new(
            ENDPOINT,
            SimulatedTransport::new(SimulationConfig::instant()),
            NoopTelemetry::shared(),
        )
    }

    #[tokio::test]
    async fn test_block_runs_connected_and_releases() {
        let mut client = instant_client();
        let probe = client.transport().probe();
        let node = NodeId::new("ns=2;s=Demo.Static.Scalar.Int32");

        let written = with_client(&mut client, async |c| -> OpcUaResult<i64> {
            assert!(c.is_connected());
            let value = c.read(&node).await?;
            let next = value.as_i64().unwrap_or_default() + 1;
            c.write(&node, next).await?;
            Ok(next)
        })
        .await
        .unwrap();

        assert_eq!(written, 43);
        assert_eq!(client.state(), ConnectionState::Disconnected);
        assert_eq!(probe.connects(), 1);
        assert_eq!(probe.disconnects(), 1);
        assert_eq!(probe.last_written(&node), Some(OpcUaValue::Int64(43)));
    }

    #[tokio::test]
    async fn test_block_error_is_returned_after_release() {
        let mut client = instant_client();
        let probe = client.transport().probe();

        let result = with_client(&mut client, async |_c| -> Result<(), DemoError> {
            Err(DemoError::Aborted("operator stop"))
        })
        .await;

        assert!(matches!(result, Err(DemoError::Aborted("operator stop"))));
        assert_eq!(probe.disconnects(), 1);
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_block_error_wins_over_release_error() {
        let mut client = DeviceClient::new(
            ENDPOINT,
            SimulatedTransport::new(SimulationConfig::instant()).failing_disconnect(),
            NoopTelemetry::shared(),
        );

        let result = with_client(&mut client, async |_c| -> Result<(), DemoError> {
            Err(DemoError::Aborted("first"))
        })
        .await;

        assert!(matches!(result, Err(DemoError::Aborted("first"))));
    }

    #[tokio::test]
    async fn test_release_error_surfaces_on_success() {
        let mut client = DeviceClient::new(
            ENDPOINT,
            SimulatedTransport::new(SimulationConfig::instant()).failing_disconnect(),
            NoopTelemetry::shared(),
        );

        let result = with_client(&mut client, async |_c| -> OpcUaResult<u8> { Ok(1) }).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("closed"));
        assert!(!client.is_connected());
    }

    #[tokio::test]
    async fn test_panic_releases_then_resumes() {
        let mut client = instant_client();
        let probe = client.transport().probe();

        let outcome = AssertUnwindSafe(with_client(
            &mut client,
            async |_c| -> OpcUaResult<()> { panic!("block exploded") },
        ))
        .catch_unwind()
        .await;

        assert!(outcome.is_err());
        assert_eq!(probe.connects(), 1);
        assert_eq!(probe.disconnects(), 1);
    }

    #[tokio::test]
    async fn test_connected_client_is_left_connected() {
        let mut client = instant_client();
        let probe = client.transport().probe();
        client.connect().await.unwrap();

        let value = with_client(&mut client, async |c| -> OpcUaResult<OpcUaValue> {
            c.read(&NodeId::new("ns=2;s=Demo")).await
        })
        .await
        .unwrap();

        assert_eq!(value, OpcUaValue::Int32(42));
        assert!(client.is_connected());
        assert_eq!(probe.connects(), 1);
        assert_eq!(probe.disconnects(), 0);

        client.disconnect().await.unwrap();
        assert_eq!(probe.disconnects(), 1);
    }

    #[tokio::test]
    async fn test_connect_failure_skips_block_and_release() {
        let mut client = DeviceClient::new(
            ENDPOINT,
            SimulatedTransport::new(SimulationConfig::instant()).refusing_connect(),
            NoopTelemetry::shared(),
        );
        let probe = client.transport().probe();
        let mut ran = false;

        let result = with_client(&mut client, async |_c| -> Result<(), DemoError> {
            ran = true;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(DemoError::Device(ref e)) if !e.is_not_connected()));
        assert!(!ran);
        assert_eq!(probe.connects(), 0);
        assert_eq!(probe.disconnects(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_session_uses_simulated_client() {
        let sink = MemoryTelemetry::new();

        let value = with_session(ENDPOINT, Arc::new(sink.clone()), async |c| -> OpcUaResult<OpcUaValue> {
            c.read(&NodeId::new("ns=2;s=Demo")).await
        })
        .await
        .unwrap();

        assert_eq!(value, OpcUaValue::Int32(42));
        assert_eq!(
            sink.messages().first().map(String::as_str),
            Some("Connecting to OPC UA endpoint")
        );
        assert_eq!(sink.messages().last().map(String::as_str), Some("Disconnected"));
    }
}
