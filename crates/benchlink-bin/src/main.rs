// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! benchlink entry point.

use benchlink_bin::error::report_error_and_exit;
use benchlink_bin::{commands, init_logging, Cli};

fn main() {
    let cli = Cli::parse_args();

    if let Err(e) = init_logging(cli.effective_log_level(), cli.log_format) {
        report_error_and_exit(e);
    }

    if let Err(e) = commands::execute(&cli) {
        report_error_and_exit(e);
    }
}
