//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};

use crate::auth::{to_header_date, MasterKey};
use crate::database::Database;
use crate::error::{ia_err, user_agent, CosmosError};
use crate::handle_builder::HandleBuilder;
use crate::resource::ResourceLink;

use std::result::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

// REST API version sent with every request.
const AZURE_VERSION: &str = "2020-07-15";

const MS_DATE: &str = "x-ms-date";
const MS_VERSION: &str = "x-ms-version";
const AUTHORIZATION: &str = "authorization";
const PARTITION_KEY: &str = "x-ms-documentdb-partitionkey";
const REQUEST_CHARGE: &str = "x-ms-request-charge";
const CONTINUATION: &str = "x-ms-continuation";

/// **The main database handle**.
///
/// This should be created once and used throughout the application lifetime,
/// across all threads.
///
/// Note: there is no need to enclose this struct in an `Rc` or [`Arc`], as it
/// uses an [`Arc`] internally, so calling `.clone()` on this struct will
/// always return the same underlying handle.
#[derive(Clone, Debug)]
pub struct Handle {
    // Use an inner Arc so cloning keeps the same contents
    pub(crate) inner: Arc<HandleRef>,
}

#[derive(Debug)]
pub(crate) struct HandleRef {
    pub(crate) client: reqwest::Client,
    pub(crate) endpoint: Url,
    pub(crate) auth: MasterKey,
    pub(crate) builder: HandleBuilder,
    timeout: Duration,
}

// Per-request options threaded from the request structs into the send path.
#[derive(Debug, Default)]
pub(crate) struct SendOptions {
    pub(crate) timeout: Duration,
    pub(crate) partition_key: Option<String>,
    pub(crate) headers: HeaderMap,
    // A 404 answer is returned as a normal response instead of an error.
    // Point reads use this; see ReadItemRequest.
    pub(crate) not_found_ok: bool,
}

// What every operation gets back: the HTTP-style status, the service's
// request-charge accounting header, the continuation token (queries), and
// the raw body for the request struct to decode.
#[derive(Debug)]
pub(crate) struct ServiceResponse {
    pub(crate) status: StatusCode,
    pub(crate) request_charge: f64,
    pub(crate) continuation: Option<String>,
    pub(crate) body: Vec<u8>,
}

impl Handle {
    /// Create a new [`HandleBuilder`].
    pub fn builder() -> HandleBuilder {
        HandleBuilder::new()
    }

    // Create the new Handle based on builder configuration
    pub(crate) async fn new(b: &HandleBuilder) -> Result<Handle, CosmosError> {
        if b.endpoint.is_empty() {
            if b.from_environment {
                return ia_err!(
                    "can't determine Cosmos endpoint: set COSMOS_CONNECTION_STRING or COSMOS_ENDPOINT"
                );
            }
            return ia_err!(
                "can't determine Cosmos endpoint: call HandleBuilder::connection_string() or HandleBuilder::endpoint()"
            );
        }
        if b.key.is_empty() {
            if b.from_environment {
                return ia_err!("can't determine account key: set COSMOS_CONNECTION_STRING or COSMOS_KEY");
            }
            return ia_err!(
                "can't determine account key: call HandleBuilder::connection_string() or HandleBuilder::key()"
            );
        }
        let auth = MasterKey::from_base64(&b.key)?;

        // default timeout to 30 seconds
        let timeout = {
            if let Some(t) = b.timeout {
                t
            } else {
                Duration::new(30, 0)
            }
        };
        let client = {
            if let Some(c) = &b.client {
                c.clone()
            } else {
                let mut cb = reqwest::Client::builder()
                    .timeout(timeout)
                    .connect_timeout(timeout);
                if b.accept_invalid_certs {
                    cb = cb.danger_accept_invalid_certs(true);
                }
                cb.build()?
            }
        };

        // normalize the endpoint so resource paths join below it
        let mut endpoint = Url::parse(&b.endpoint)?;
        if !endpoint.path().ends_with('/') {
            let p = format!("{}/", endpoint.path());
            endpoint.set_path(&p);
        }
        debug!("Creating new Handle: endpoint={}", endpoint);
        Ok(Handle {
            inner: Arc::new(HandleRef {
                client,
                endpoint,
                auth,
                builder: b.clone(),
                timeout,
            }),
        })
    }

    /// Get an offline handle to a database by name.
    ///
    /// This performs no network traffic and no existence check; the name is
    /// assumed to resolve on the service side.
    pub fn database(&self, id: &str) -> Database {
        Database::new(id)
    }

    pub(crate) fn get_timeout(&self, t: &Option<Duration>) -> Duration {
        // if t is given, use that. If not, use handle's timeout
        if let Some(d) = t {
            return *d;
        }
        self.inner.timeout
    }

    fn get_f64_header(headers: &HeaderMap, field: &str) -> Result<f64, CosmosError> {
        let Some(val) = headers.get(field) else {
            return Ok(0.0);
        };
        let Ok(valstr) = val.to_str() else {
            return ia_err!("\"{}\" value in return headers is not a valid string", field);
        };
        match valstr.parse::<f64>() {
            Ok(v) => Ok(v),
            Err(_) => ia_err!("\"{}\" value in return headers is not a number", field),
        }
    }

    // The single send path every operation funnels through: sign, stamp the
    // protocol headers, execute once (no retries), and pull the status /
    // charge / continuation triple out of the response.
    pub(crate) async fn send_request(
        &self,
        method: Method,
        link: &ResourceLink,
        body: Option<Vec<u8>>,
        opts: SendOptions,
    ) -> Result<ServiceResponse, CosmosError> {
        let url = self.inner.endpoint.join(&link.path())?;

        // x-ms-date and the string signed over must be exactly the same
        let date = to_header_date(chrono::Utc::now());
        let auth = self.inner.auth.sign(&method, link, &date);

        // TODO: consistency-level and session-token headers
        let mut headers = opts.headers;
        headers.insert(MS_DATE, HeaderValue::from_str(&date)?);
        headers.insert(MS_VERSION, HeaderValue::from_static(AZURE_VERSION));
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&auth)?);
        headers.insert("User-Agent", HeaderValue::from_str(user_agent())?);
        if let Some(pk) = &opts.partition_key {
            headers.insert(PARTITION_KEY, HeaderValue::from_str(pk)?);
        }

        trace!("sending {} {}", method, url);
        let mut req = self
            .inner
            .client
            .request(method, url)
            .timeout(opts.timeout)
            .headers(headers);
        if let Some(b) = body {
            req = req.body(b);
        }
        let resp = req.send().await?;

        let status = resp.status();
        let request_charge = Self::get_f64_header(resp.headers(), REQUEST_CHARGE)?;
        let continuation = match resp.headers().get(CONTINUATION) {
            Some(v) => match v.to_str() {
                Ok(s) => Some(s.to_string()),
                Err(_) => {
                    return ia_err!("\"{}\" value in return headers is not a valid string", CONTINUATION);
                }
            },
            None => None,
        };
        trace!("status={} charge={}", status, request_charge);

        if !status.is_success() && !(opts.not_found_ok && status == StatusCode::NOT_FOUND) {
            let content = resp.text().await?;
            return Err(CosmosError::from_status(status.as_u16(), &content));
        }

        let bytes = resp.bytes().await?;
        Ok(ServiceResponse {
            status,
            request_charge,
            continuation,
            body: bytes.to_vec(),
        })
    }
}
