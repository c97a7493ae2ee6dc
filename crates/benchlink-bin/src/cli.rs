// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! - `demo`: Run both device demos (default)
//! - `opcua`: Run the OPC UA session demo
//! - `platepusher`: Run the plate pusher request demo
//! - `version`: Show version information

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// benchlink - lab bench device client demos
///
/// Drives a simulated OPC UA device session and a simulated plate pusher.
#[derive(Parser, Debug)]
#[command(
    name = "benchlink",
    author = "Sylvex <contact@sylvex.io>",
    version = benchlink_core::VERSION,
    about = "Device client demos for an OPC UA server and a plate pusher",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path (YAML or TOML); defaults are used when omitted
    #[arg(short, long, env = "BENCHLINK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        default_value = "info",
        env = "BENCHLINK_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json, compact)
    #[arg(long, default_value = "text", env = "BENCHLINK_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Enable quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands for the benchlink CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run both demos
    ///
    /// This is the default command when no subcommand is specified.
    Demo,

    /// Run the OPC UA session demo
    ///
    /// Connects, reads the configured node, writes the value plus one and
    /// disconnects.
    Opcua(OpcUaArgs),

    /// Run the plate pusher demo
    ///
    /// Sends a homing move followed by one move per site.
    Platepusher(PlatePusherArgs),

    /// Show version information
    Version,
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `opcua` command.
#[derive(Args, Debug, Default, Clone)]
pub struct OpcUaArgs {
    /// Endpoint to connect to
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Node to read and write
    #[arg(long)]
    pub node: Option<String>,
}

/// Arguments for the `platepusher` command.
#[derive(Args, Debug, Default, Clone)]
pub struct PlatePusherArgs {
    /// Base URL of the device API
    #[arg(long)]
    pub base_url: Option<String>,

    /// Site to move to (repeatable)
    #[arg(long = "site")]
    pub sites: Vec<String>,

    /// Send real HTTP requests instead of simulating them
    #[cfg(feature = "http-client")]
    #[arg(long)]
    pub live: bool,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective command, defaulting to `Demo` if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Demo)
    }

    /// Get the effective log level based on flags.
    pub fn effective_log_level(&self) -> &str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            &self.log_level
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::parse_from(["benchlink"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(matches!(cli.effective_command(), Commands::Demo));
    }

    #[test]
    fn test_opcua_command() {
        let cli = Cli::parse_from([
            "benchlink",
            "opcua",
            "--endpoint",
            "opc.tcp://bench:4840",
            "--node",
            "ns=2;s=Counter",
        ]);
        if let Some(Commands::Opcua(args)) = cli.command {
            assert_eq!(args.endpoint.as_deref(), Some("opc.tcp://bench:4840"));
            assert_eq!(args.node.as_deref(), Some("ns=2;s=Counter"));
        } else {
            panic!("Expected Opcua command");
        }
    }

    #[test]
    fn test_platepusher_sites() {
        let cli = Cli::parse_from(["benchlink", "platepusher", "--site", "C3", "--site", "D1"]);
        if let Some(Commands::Platepusher(args)) = cli.command {
            assert_eq!(args.sites, vec!["C3", "D1"]);
            assert!(args.base_url.is_none());
        } else {
            panic!("Expected Platepusher command");
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["benchlink", "version", "-c", "bench.toml", "--log-format", "json"]);
        assert_eq!(cli.config, Some(PathBuf::from("bench.toml")));
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Some(Commands::Version)));
    }

    #[test]
    fn test_log_level_flags() {
        let cli = Cli::parse_from(["benchlink", "-l", "trace"]);
        assert_eq!(cli.effective_log_level(), "trace");

        let cli = Cli::parse_from(["benchlink", "-q", "-l", "trace"]);
        assert_eq!(cli.effective_log_level(), "warn");

        let cli = Cli::parse_from(["benchlink", "-v"]);
        assert_eq!(cli.effective_log_level(), "debug");
    }
}
