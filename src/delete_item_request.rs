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
use std::result::Result;
use std::time::Duration;

/// Struct used for deleting a single item by id and partition key.
///
/// Unlike a point read, deleting a nonexistent item is an error: the request
/// fails with [`NotFound`](crate::CosmosErrorCode::NotFound).
#[derive(Default, Debug)]
pub struct DeleteItemRequest {
    pub(crate) database_id: String,
    pub(crate) container_id: String,
    pub(crate) item_id: String,
    pub(crate) partition_key: Option<PartitionKey>,
    pub(crate) timeout: Option<Duration>,
}

/// Struct representing the result of a [`DeleteItemRequest`] operation.
#[derive(Default, Debug)]
pub struct DeleteItemResult {
    pub(crate) status_code: StatusCode,
    pub(crate) request_charge: f64,
}

impl DeleteItemResult {
    /// The HTTP status the service answered with (`204 No Content` on
    /// success).
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// The request charge consumed by this operation.
    pub fn request_charge(&self) -> f64 {
        self.request_charge
    }
}

impl DeleteItemRequest {
    /// Create a new DeleteItemRequest for an item id, scoped to a container.
    pub fn new(container: &Container, item_id: &str) -> DeleteItemRequest {
        DeleteItemRequest {
            database_id: container.database_id().to_string(),
            container_id: container.id().to_string(),
            item_id: item_id.to_string(),
            ..Default::default()
        }
    }

    /// Specify the partition key the item belongs to. Required.
    pub fn partition_key(mut self, pk: impl Into<PartitionKey>) -> DeleteItemRequest {
        self.partition_key = Some(pk.into());
        self
    }

    /// Specify the timeout value for the request.
    ///
    /// This is optional. If not set, the default timeout value configured for
    /// the [`Handle`](crate::HandleBuilder::timeout()) is used.
    pub fn timeout(mut self, t: &Duration) -> DeleteItemRequest {
        self.timeout = Some(*t);
        self
    }

    /// Execute the request, returning a [`DeleteItemResult`].
    pub async fn execute(&self, h: &Handle) -> Result<DeleteItemResult, CosmosError> {
        let Some(pk) = &self.partition_key else {
            return ia_err!("delete requires a partition key");
        };

        let link = Container::new(&self.database_id, &self.container_id).document_link(&self.item_id);
        let opts = SendOptions {
            timeout: h.get_timeout(&self.timeout),
            partition_key: Some(pk.to_header_value()),
            headers: HeaderMap::new(),
            ..Default::default()
        };
        let resp = h.send_request(Method::DELETE, &link, None, opts).await?;
        Ok(DeleteItemResult {
            status_code: resp.status,
            request_charge: resp.request_charge,
        })
    }
}
