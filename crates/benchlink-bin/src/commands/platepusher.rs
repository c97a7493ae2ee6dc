// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `platepusher` command.

use benchlink_core::SharedTelemetry;
use benchlink_platepusher::{HttpTransport, PlatePusherClient, SimulatedResponse};

use crate::cli::PlatePusherArgs;
use crate::config::DemoConfig;
use crate::error::BinResult;

/// Executes the `platepusher` command.
///
/// Prints one JSON response per line.
pub fn platepusher(
    config: &DemoConfig,
    args: &PlatePusherArgs,
    telemetry: SharedTelemetry,
) -> BinResult<()> {
    let mut section = config.platepusher.clone();
    if let Some(base_url) = &args.base_url {
        section.base_url = base_url.clone();
    }
    if !args.sites.is_empty() {
        section.sites = args.sites.clone();
    }

    section.validate()?;
    let client_config = section.client_config();

    #[cfg(feature = "http-client")]
    if args.live {
        let transport = benchlink_platepusher::BlockingHttpTransport::new(&client_config)?;
        let client = PlatePusherClient::new(client_config, transport, telemetry);
        return print_responses(&run_moves(&client, &section.sites)?);
    }

    let client = PlatePusherClient::simulated(client_config, telemetry);
    print_responses(&run_moves(&client, &section.sites)?)
}

/// Homes the device, then moves to each site in order.
///
/// Stops at the first failed request.
pub fn run_moves<T: HttpTransport>(
    client: &PlatePusherClient<T>,
    sites: &[String],
) -> BinResult<Vec<SimulatedResponse>> {
    tracing::info!(sites = sites.len(), "Sending demo moves to plate pusher");

    let mut responses = Vec::with_capacity(sites.len() + 1);
    responses.push(client.home()?);
    for site in sites {
        responses.push(client.move_to_site(site.as_str())?);
    }
    Ok(responses)
}

fn print_responses(responses: &[SimulatedResponse]) -> BinResult<()> {
    for response in responses {
        println!("{}", serde_json::to_string(response)?);
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use benchlink_core::NoopTelemetry;
    use benchlink_platepusher::{Payload, PlatePusherConfig};

    use super::*;

    #[test]
    fn test_run_moves_order() {
        let client = PlatePusherClient::simulated(
            PlatePusherConfig::new("http://demo-platepusher.local/api/"),
            NoopTelemetry::shared(),
        );
        let sites = vec!["A1".to_string(), "B4".to_string()];

        let responses = run_moves(&client, &sites).unwrap();

        assert_eq!(responses.len(), 3);
        assert!(responses[0].url.ends_with("/api/home"));
        assert_eq!(responses[0].payload, Some(Payload::empty()));
        assert_eq!(responses[1].payload, Some(Payload::for_site("A1")));
        assert_eq!(responses[2].payload, Some(Payload::for_site("B4")));
    }

    #[test]
    fn test_run_moves_without_sites_only_homes() {
        let client = PlatePusherClient::simulated(
            PlatePusherConfig::new("http://bench/api"),
            NoopTelemetry::shared(),
        );
        let responses = run_moves(&client, &[]).unwrap();
        assert_eq!(responses.len(), 1);
    }

    #[test]
    fn test_command_rejects_empty_base_url() {
        let args = PlatePusherArgs {
            base_url: Some(String::new()),
            ..PlatePusherArgs::default()
        };
        let err = platepusher(&DemoConfig::default(), &args, NoopTelemetry::shared()).unwrap_err();
        assert!(err.to_string().contains("platepusher.base_url"));
        assert_eq!(err.exit_code(), 1);
    }
}
