// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `version` command.

use crate::cli::Cli;
use crate::error::BinResult;

/// Executes the `version` command to display version information.
pub fn version(_cli: &Cli) -> BinResult<()> {
    println!("benchlink - lab bench device client demos");
    println!();
    println!("Version Information:");
    println!("  benchlink-bin:         {}", crate::VERSION);
    println!("  benchlink-core:        {}", benchlink_core::VERSION);
    println!("  benchlink-opcua:       {}", benchlink_opcua::VERSION);
    println!("  benchlink-platepusher: {}", benchlink_platepusher::VERSION);
    println!();
    println!("Build Information:");
    println!("  Rust Edition: 2024");
    println!("  Target:       {}", std::env::consts::ARCH);
    println!("  OS:           {}", std::env::consts::OS);
    println!();
    println!("Features:");
    println!(
        "  HTTP client:  {}",
        if cfg!(feature = "http-client") { "enabled" } else { "disabled" }
    );
    println!();
    println!("License: PolyForm Noncommercial License 1.0.0");
    println!("Copyright (c) 2025 Sylvex. All rights reserved.");

    Ok(())
}
