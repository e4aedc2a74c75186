//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
use crate::container::Container;
use crate::error::{ia_err, CosmosError};
use crate::handle::{Handle, SendOptions};
use crate::types::PartitionKey;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::result::Result;
use std::time::Duration;

const IS_UPSERT: &str = "x-ms-documentdb-is-upsert";
const CONTENT_RESPONSE_ON_WRITE: &str = "x-ms-documentdb-content-response-on-write";

/// Struct used for writing a single item into a container.
///
/// The operation is an upsert: if no item with the given `id` exists in the
/// partition, the item is inserted and the service answers `201 Created`; if
/// one exists, it is replaced **in its entirety** (fields absent from the new
/// payload are not preserved) and the service answers `200 OK`.
///
/// The supplied partition key must match the partition-key property of the
/// item body; the service rejects the write otherwise.
#[derive(Default, Debug)]
pub struct UpsertItemRequest {
    pub(crate) database_id: String,
    pub(crate) container_id: String,
    pub(crate) partition_key: Option<PartitionKey>,
    pub(crate) value: Option<Value>,
    pub(crate) timeout: Option<Duration>,
}

/// Struct representing the result of an [`UpsertItemRequest`] operation.
///
/// This struct is returned from an [`UpsertItemRequest::execute()`] call.
#[derive(Default, Debug)]
pub struct UpsertItemResult {
    pub(crate) status_code: StatusCode,
    pub(crate) request_charge: f64,
    pub(crate) body: Vec<u8>,
}

impl UpsertItemResult {
    /// The HTTP status the service answered with: `200 OK` when an existing
    /// item was replaced, `201 Created` when a new item was inserted.
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// The request charge consumed by this operation.
    pub fn request_charge(&self) -> f64 {
        self.request_charge
    }

    /// The stored item, re-decoded from the response body.
    ///
    /// This is `None` unless the handle was built with
    /// [`content_response_on_write(true)`](crate::HandleBuilder::content_response_on_write()),
    /// since the service omits the body otherwise.
    pub fn item<T: DeserializeOwned>(&self) -> Result<Option<T>, CosmosError> {
        if self.body.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&self.body)?))
    }
}

impl UpsertItemRequest {
    /// Create a new UpsertItemRequest scoped to a container.
    pub fn new(container: &Container) -> UpsertItemRequest {
        UpsertItemRequest {
            database_id: container.database_id().to_string(),
            container_id: container.id().to_string(),
            ..Default::default()
        }
    }

    /// Specify the item to write, from any serializable struct.
    pub fn item<T: Serialize>(mut self, item: &T) -> Result<UpsertItemRequest, CosmosError> {
        self.value = Some(serde_json::to_value(item)?);
        Ok(self)
    }

    /// Specify the item to write, from a raw JSON value.
    pub fn value(mut self, value: Value) -> UpsertItemRequest {
        self.value = Some(value);
        self
    }

    /// Specify the partition key the item belongs to.
    ///
    /// Required; must be consistent with the item's partition-key property.
    pub fn partition_key(mut self, pk: impl Into<PartitionKey>) -> UpsertItemRequest {
        self.partition_key = Some(pk.into());
        self
    }

    /// Specify the timeout value for the request.
    ///
    /// This is optional. If not set, the default timeout value configured for
    /// the [`Handle`](crate::HandleBuilder::timeout()) is used.
    pub fn timeout(mut self, t: &Duration) -> UpsertItemRequest {
        self.timeout = Some(*t);
        self
    }

    /// Execute the request, returning an [`UpsertItemResult`].
    pub async fn execute(&self, h: &Handle) -> Result<UpsertItemResult, CosmosError> {
        let Some(pk) = &self.partition_key else {
            return ia_err!("upsert requires a partition key");
        };
        let Some(value) = &self.value else {
            return ia_err!("upsert requires an item value");
        };
        let body = serde_json::to_vec(value)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(IS_UPSERT, HeaderValue::from_static("true"));
        if h.inner.builder.content_response_on_write {
            headers.insert(CONTENT_RESPONSE_ON_WRITE, HeaderValue::from_static("true"));
        }

        let link = Container::new(&self.database_id, &self.container_id).documents_link();
        let opts = SendOptions {
            timeout: h.get_timeout(&self.timeout),
            partition_key: Some(pk.to_header_value()),
            headers,
            ..Default::default()
        };
        let resp = h.send_request(Method::POST, &link, Some(body), opts).await?;
        Ok(UpsertItemResult {
            status_code: resp.status,
            request_charge: resp.request_charge,
            body: resp.body,
        })
    }
}
