//
// Copyright (c) 2024 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
//! Configuration for the demo runner.

use std::env;
use tracing::warn;

// The quickstart source ships with this literal; it must be replaced (or
// overridden from the environment) before the demo can reach a real account.
const DEFAULT_CONNECTION_STRING: &str = "<azure-cosmos-db-nosql-connection-string>";
const DEFAULT_DATABASE_NAME: &str = "cosmicworks";
const DEFAULT_CONTAINER_NAME: &str = "products";

const ENV_CONNECTION_STRING: &str = "CONFIGURATION__AZURECOSMOSDB__CONNECTIONSTRING";
const ENV_DATABASE_NAME: &str = "CONFIGURATION__AZURECOSMOSDB__DATABASENAME";
const ENV_CONTAINER_NAME: &str = "CONFIGURATION__AZURECOSMOSDB__CONTAINERNAME";

/// The demo runner's configuration, constructed once at startup and passed
/// into [`run_demo()`](crate::run_demo()).
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Account connection string, in the portal's
    /// `AccountEndpoint=...;AccountKey=...;` form.
    pub connection_string: String,
    /// Database name; assumed to already exist on the service.
    pub database_name: String,
    /// Container name; assumed to already exist within the database.
    pub container_name: String,
}

impl RunnerConfig {
    /// Create a configuration from explicit values.
    pub fn new(connection_string: &str, database_name: &str, container_name: &str) -> RunnerConfig {
        RunnerConfig {
            connection_string: connection_string.to_string(),
            database_name: database_name.to_string(),
            container_name: container_name.to_string(),
        }
    }

    /// Collect the configuration from the environment.
    ///
    /// A `.env` file in the working directory is loaded first, if present; a
    /// missing file is not an error and only logs a warning. Unset values
    /// fall back to the demo defaults (`cosmicworks` / `products`, and a
    /// placeholder connection string that must be substituted to reach a
    /// real account).
    pub fn from_environment() -> RunnerConfig {
        if let Err(e) = dotenvy::dotenv() {
            warn!("no .env file found, proceeding without it: {}", e);
        }
        RunnerConfig {
            connection_string: env::var(ENV_CONNECTION_STRING)
                .unwrap_or_else(|_| DEFAULT_CONNECTION_STRING.to_string()),
            database_name: env::var(ENV_DATABASE_NAME)
                .unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string()),
            container_name: env::var(ENV_CONTAINER_NAME)
                .unwrap_or_else(|_| DEFAULT_CONTAINER_NAME.to_string()),
        }
    }
}
