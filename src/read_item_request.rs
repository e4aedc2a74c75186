//
// Copyright (c) 2024 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
use crate::container::Container;
use crate::error::{ia_err, CosmosError};
use crate::handle::{Handle, SendOptions};
use crate::types::PartitionKey;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::result::Result;
use std::time::Duration;

/// Struct used for reading a single item by id and partition key.
#[derive(Default, Debug)]
pub struct ReadItemRequest {
    pub(crate) database_id: String,
    pub(crate) container_id: String,
    pub(crate) item_id: String,
    pub(crate) partition_key: Option<PartitionKey>,
    pub(crate) timeout: Option<Duration>,
}

/// Struct representing the result of a [`ReadItemRequest`] operation.
///
/// This struct is returned from a [`ReadItemRequest::execute()`] call.
#[derive(Default, Debug)]
pub struct ReadItemResult {
    pub(crate) status_code: StatusCode,
    pub(crate) request_charge: f64,
    pub(crate) body: Vec<u8>,
}

impl ReadItemResult {
    /// The HTTP status the service answered with: `200 OK` when the item was
    /// found, `404 Not Found` when it was not.
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// The request charge consumed by this operation.
    pub fn request_charge(&self) -> f64 {
        self.request_charge
    }

    /// The item, decoded from the response body. If no item with the
    /// requested id exists in the partition, this value will be `None`.
    pub fn item<T: DeserializeOwned>(&self) -> Result<Option<T>, CosmosError> {
        if self.status_code == StatusCode::NOT_FOUND || self.body.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&self.body)?))
    }
}

impl ReadItemRequest {
    /// Create a new ReadItemRequest for an item id, scoped to a container.
    pub fn new(container: &Container, item_id: &str) -> ReadItemRequest {
        ReadItemRequest {
            database_id: container.database_id().to_string(),
            container_id: container.id().to_string(),
            item_id: item_id.to_string(),
            ..Default::default()
        }
    }

    /// Specify the partition key the item belongs to.
    ///
    /// Required; a point read addresses exactly one partition.
    pub fn partition_key(mut self, pk: impl Into<PartitionKey>) -> ReadItemRequest {
        self.partition_key = Some(pk.into());
        self
    }

    /// Specify the timeout value for the request.
    ///
    /// This is optional. If not set, the default timeout value configured for
    /// the [`Handle`](crate::HandleBuilder::timeout()) is used.
    pub fn timeout(mut self, t: &Duration) -> ReadItemRequest {
        self.timeout = Some(*t);
        self
    }

    /// Execute the request, returning a [`ReadItemResult`].
    ///
    /// A missing item is not an error: the result then carries status
    /// `404 Not Found` and [`ReadItemResult::item()`] is `None`. Transport
    /// failures and all other non-success statuses are returned as errors.
    pub async fn execute(&self, h: &Handle) -> Result<ReadItemResult, CosmosError> {
        let Some(pk) = &self.partition_key else {
            return ia_err!("read requires a partition key");
        };

        let link = Container::new(&self.database_id, &self.container_id).document_link(&self.item_id);
        let opts = SendOptions {
            timeout: h.get_timeout(&self.timeout),
            partition_key: Some(pk.to_header_value()),
            headers: HeaderMap::new(),
            not_found_ok: true,
        };
        let resp = h.send_request(Method::GET, &link, None, opts).await?;
        Ok(ReadItemResult {
            status_code: resp.status,
            request_charge: resp.request_charge,
            body: resp.body,
        })
    }
}
