/* SPDX-License-Identifier: BSD-3-Clause */
/***********************************************************************************************
 * Copyright 2024-2026 Fraunhofer SIT, sponsored by the ELISA and ProSeCA research projects.
 * All rights reserved.
 **********************************************************************************************/

use env_logger::Builder as EnvLogger;
use log::{error, info, LevelFilter};
use tspi_rs::TpmContext;

/// # tspi-rs example #1 — get_random()
///
/// This example demonstrates how to obtain random bytes from the hardware random number generator of the TPM.
///
/// ### Remarks
///
/// Please note that this example requires that the TCS daemon (`tcsd`) is running and has access to the TPM!
///
/// The environment variables `TSS_TCSD_HOSTNAME` and `TSS_TCSD_PORT` can be used to connect to a different TCS daemon.
fn main() {
    // Initialize the logger
    EnvLogger::new().filter_level(LevelFilter::Info).init();

    // Print logo
    info!("TSS 1.2 TSPI Wrapper - Example #1");

    // Print library version
    let version = tspi_rs::get_version();
    info!("Using tspi-rs package version: {}, built with native TSPI library version: {}", version.package, version.library);

    // Create a new TPM context
    info!("Creating TPM context, please wait...");
    let mut context = match TpmContext::new() {
        Ok(tpm_ctx) => tpm_ctx,
        Err(error) => panic!("Failed to create context: {:?}", error),
    };

    // Print result
    info!("TPM context created. ({})", context);

    // Generate random
    info!("Generating random data...");
    for _i in 0..8 {
        match context.get_random(32) {
            Ok(random) => info!("Random data: {}", hex::encode(&random[..])),
            Err(error) => error!("get_random() failed: {:?}", error),
        }
    }

    // Exit
    info!("Shutting down...");
    if let Err(error) = context.close() {
        error!("close() failed: {}", error);
    }
}
