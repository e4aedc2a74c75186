//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//

// The Cosmos DB NoSQL quickstart demo. It connects with a connection string,
// upserts two items, reads one back, and runs a partition-scoped query,
// printing status and request-charge metrics at each step.
//
// To run:
//    cargo run --bin quickstart
//
// for extra output:
//    RUST_LOG=debug cargo run --bin quickstart
//
// or, for a LOT of tracing output:
//    RUST_LOG=trace cargo run --bin quickstart

use cosmos_nosql_demo::{run_demo, Handle, RunnerConfig};
use std::error::Error;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Set up a tracing subscriber to see output based on RUST_LOG environment setting
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_ansi(false)
        .compact()
        .init();

    let config = RunnerConfig::from_environment();

    // Create a handle. This should be used throughout the program
    info!("Creating new handle...");
    let handle = Handle::builder()
        .connection_string(&config.connection_string)?
        // ask the service to echo stored items back on writes, so the demo
        // can print what it wrote
        .content_response_on_write(true)?
        .build()
        .await?;

    run_demo(&handle, &config, |line| println!("{}", line)).await?;

    Ok(())
}
