//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
//! Builder for creating a [`Handle`](crate::Handle).

use std::default::Default;
use std::env;
use std::result::Result;
use std::time::Duration;

use crate::error::{ia_err, CosmosError};
use crate::handle::Handle;
use reqwest::Client;

/// Builder used to set all the parameters to create a [`Handle`](crate::Handle).
///
/// The typical path is a single connection string, with the pieces optionally
/// overridden afterwards. Note: later methods called on this builder override
/// earlier methods, which allows setting desired defaults that can then be
/// overridden by, for example, [`from_environment()`](HandleBuilder::from_environment()).
#[derive(Default, Debug, Clone)]
pub struct HandleBuilder {
    pub(crate) endpoint: String,
    pub(crate) key: String,
    pub(crate) timeout: Option<Duration>,
    pub(crate) content_response_on_write: bool,
    pub(crate) accept_invalid_certs: bool,
    pub(crate) client: Option<Client>,
    // For error messaging
    pub(crate) from_environment: bool,
}

impl HandleBuilder {
    /// Create a new HandleBuilder struct.
    ///
    /// The default builder has no endpoint or account key. Consider calling
    /// [`connection_string()`](HandleBuilder::connection_string()) or
    /// [`from_environment()`](HandleBuilder::from_environment()).
    pub fn new() -> Self {
        HandleBuilder {
            ..Default::default()
        }
    }

    /// Configure endpoint and account key from an account connection string.
    ///
    /// The accepted form is the one the portal hands out:
    /// `AccountEndpoint=https://{account}.documents.azure.com:443/;AccountKey={base64};`
    /// Fields may appear in any order; a trailing semicolon is tolerated.
    pub fn connection_string(mut self, connection_string: &str) -> Result<Self, CosmosError> {
        let mut endpoint: Option<&str> = None;
        let mut key: Option<&str> = None;
        for field in connection_string.split(';') {
            let field = field.trim();
            if field.is_empty() {
                continue;
            }
            let Some((name, value)) = field.split_once('=') else {
                return ia_err!("invalid connection string field '{}'", field);
            };
            match name.to_lowercase().as_str() {
                "accountendpoint" => endpoint = Some(value),
                "accountkey" => key = Some(value),
                // other fields (e.g. EndpointSuffix) are not used here
                _ => {}
            }
        }
        let Some(endpoint) = endpoint else {
            return ia_err!("connection string has no AccountEndpoint field");
        };
        let Some(key) = key else {
            return ia_err!("connection string has no AccountKey field");
        };
        self = self.endpoint(endpoint)?;
        self = self.key(key)?;
        Ok(self)
    }

    /// Set the account endpoint to connect to.
    ///
    /// This is typically used when pointing at a local emulator. If the
    /// value carries no scheme, `https://` is assumed.
    pub fn endpoint(mut self, endpoint: &str) -> Result<Self, CosmosError> {
        if endpoint.is_empty() {
            return ia_err!("endpoint must be non-empty");
        }
        if endpoint.contains("://") {
            self.endpoint = endpoint.to_string();
        } else {
            self.endpoint = format!("https://{}", endpoint);
        }
        Ok(self)
    }

    /// Set the account master key (base64, as the portal shows it).
    pub fn key(mut self, key: &str) -> Result<Self, CosmosError> {
        if key.is_empty() {
            return ia_err!("account key must be non-empty");
        }
        self.key = key.to_string();
        Ok(self)
    }

    /// Set the default timeout for all requests made with this handle.
    ///
    /// If not set, a default of 30 seconds is used.
    pub fn timeout(mut self, t: Duration) -> Result<Self, CosmosError> {
        if t < Duration::from_millis(1) {
            return ia_err!("timeout must be at least 1 millisecond");
        }
        self.timeout = Some(t);
        Ok(self)
    }

    /// Ask the service to return the stored document body on writes.
    ///
    /// When disabled (the default), write responses carry status and charge
    /// but no body, which is cheaper on the wire.
    pub fn content_response_on_write(mut self, val: bool) -> Result<Self, CosmosError> {
        self.content_response_on_write = val;
        Ok(self)
    }

    /// Skip verification of the server certificate.
    ///
    /// Only useful for a local emulator with a self-signed certificate.
    pub fn danger_accept_invalid_certs(mut self, val: bool) -> Result<Self, CosmosError> {
        self.accept_invalid_certs = val;
        Ok(self)
    }

    /// Supply a pre-built [`reqwest::Client`] instead of having one created
    /// internally.
    pub fn client(mut self, client: &Client) -> Result<Self, CosmosError> {
        self.client = Some(client.clone());
        Ok(self)
    }

    /// Read connection parameters from environment variables, overriding any
    /// values already set on the builder:
    ///
    /// - `COSMOS_CONNECTION_STRING`
    /// - `COSMOS_ENDPOINT`
    /// - `COSMOS_KEY`
    pub fn from_environment(mut self) -> Result<Self, CosmosError> {
        self.from_environment = true;
        if let Some(val) = env::var("COSMOS_CONNECTION_STRING").ok() {
            self = self.connection_string(&val)?;
        }
        if let Some(val) = env::var("COSMOS_ENDPOINT").ok() {
            self = self.endpoint(&val)?;
        }
        if let Some(val) = env::var("COSMOS_KEY").ok() {
            self = self.key(&val)?;
        }
        Ok(self)
    }

    /// Build the [`Handle`](crate::Handle).
    pub async fn build(self) -> Result<Handle, CosmosError> {
        Handle::new(&self).await
    }
}
