//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
use crate::container::Container;
use crate::error::{ia_err, CosmosError};
use crate::handle::{Handle, SendOptions};
use crate::types::{PartitionKey, Query};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_derive::Deserialize;
use serde_json::Value;
use std::result::Result;
use std::time::Duration;
use tracing::trace;

const IS_QUERY: &str = "x-ms-documentdb-isquery";
const MAX_ITEM_COUNT: &str = "x-ms-max-item-count";
const CONTINUATION: &str = "x-ms-continuation";

/// Encapsulates a SQL-like query of a container, scoped to one partition.
///
/// The request doubles as the page cursor over the result feed: the service
/// returns results in pages, each page carrying its own request charge and,
/// when further results exist, a continuation token. Drive the cursor with
/// [`more()`](QueryItemsRequest::more()) / [`next_page()`](QueryItemsRequest::next_page()),
/// or call [`execute()`](QueryItemsRequest::execute()) to drain every page
/// into one result.
///
/// ## Simple Example
/// ```no_run
/// # use cosmos_nosql_demo::{Handle, QueryItemsRequest};
/// # #[tokio::main]
/// # pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let handle = Handle::builder().build().await?;
/// let container = handle.database("cosmicworks").container("products");
/// let mut query = QueryItemsRequest::new(
///     &container,
///     "SELECT * FROM products p WHERE p.category = @category",
/// )
/// .parameter("@category", "gear-surf-surfboards")
/// .partition_key("gear-surf-surfboards");
/// while query.more() {
///     let page = query.next_page(&handle).await?;
///     for doc in page.documents() {
///         println!("doc = {}", doc);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Default, Debug)]
pub struct QueryItemsRequest {
    pub(crate) database_id: String,
    pub(crate) container_id: String,
    pub(crate) query: Option<Query>,
    pub(crate) partition_key: Option<PartitionKey>,
    pub(crate) page_size: Option<u32>,
    pub(crate) timeout: Option<Duration>,
    // Page-cursor state: "more pages available" holds until a fetched page
    // comes back without a continuation token.
    started: bool,
    continuation: Option<String>,
}

/// One page of query results.
#[derive(Default, Debug)]
pub struct QueryPage {
    pub(crate) status_code: StatusCode,
    pub(crate) request_charge: f64,
    pub(crate) documents: Vec<Value>,
}

impl QueryPage {
    /// The HTTP status the service answered this page fetch with.
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// The request charge consumed by this page fetch alone.
    pub fn request_charge(&self) -> f64 {
        self.request_charge
    }

    /// The raw documents of this page, in service order.
    pub fn documents(&self) -> &Vec<Value> {
        &self.documents
    }

    /// The documents of this page decoded into a native struct.
    pub fn items<T: DeserializeOwned>(&self) -> Result<Vec<T>, CosmosError> {
        let mut items = Vec::with_capacity(self.documents.len());
        for doc in &self.documents {
            items.push(serde_json::from_value(doc.clone())?);
        }
        Ok(items)
    }
}

/// Struct representing the fully-drained result of a query.
///
/// This struct is returned from a [`QueryItemsRequest::execute()`] call. Rows
/// are the concatenation of all pages in arrival order; the request charge is
/// the sum of the per-page charges.
#[derive(Default, Debug)]
pub struct QueryItemsResult {
    pub(crate) rows: Vec<Value>,
    pub(crate) request_charge: f64,
}

impl QueryItemsResult {
    /// The raw result documents across all pages.
    pub fn rows(&self) -> &Vec<Value> {
        &self.rows
    }

    /// The result documents decoded into a native struct.
    pub fn items<T: DeserializeOwned>(&self) -> Result<Vec<T>, CosmosError> {
        let mut items = Vec::with_capacity(self.rows.len());
        for doc in &self.rows {
            items.push(serde_json::from_value(doc.clone())?);
        }
        Ok(items)
    }

    /// The total request charge: the exact sum of every page's charge.
    pub fn request_charge(&self) -> f64 {
        self.request_charge
    }
}

// Wire shape of a query response body.
#[derive(Default, Debug, Deserialize)]
struct FeedResponse {
    #[serde(rename = "Documents", default)]
    documents: Vec<Value>,
}

impl QueryItemsRequest {
    /// Create a new QueryItemsRequest from its statement text, scoped to a
    /// container.
    pub fn new(container: &Container, text: &str) -> QueryItemsRequest {
        QueryItemsRequest {
            database_id: container.database_id().to_string(),
            container_id: container.id().to_string(),
            query: Some(Query::new(text)),
            ..Default::default()
        }
    }

    /// Bind a named parameter of the statement, e.g. `@category`.
    pub fn parameter(mut self, name: &str, value: impl Into<Value>) -> QueryItemsRequest {
        if let Some(q) = self.query.take() {
            self.query = Some(q.parameter(name, value));
        }
        self
    }

    /// Specify the partition key scoping the query. Required.
    pub fn partition_key(mut self, pk: impl Into<PartitionKey>) -> QueryItemsRequest {
        self.partition_key = Some(pk.into());
        self
    }

    /// Limit the number of items the service returns per page.
    ///
    /// This is optional; without it the service chooses its own page size.
    pub fn page_size(mut self, size: u32) -> QueryItemsRequest {
        self.page_size = Some(size);
        self
    }

    /// Specify the timeout value for each page request.
    ///
    /// This is optional. If not set, the default timeout value configured for
    /// the [`Handle`](crate::HandleBuilder::timeout()) is used.
    pub fn timeout(mut self, t: &Duration) -> QueryItemsRequest {
        self.timeout = Some(*t);
        self
    }

    /// Determine if more result pages are available.
    ///
    /// True before the first fetch, and thereafter for as long as the most
    /// recent page carried a continuation token. Use in a loop with
    /// [`next_page()`](QueryItemsRequest::next_page()).
    pub fn more(&self) -> bool {
        !self.started || self.continuation.is_some()
    }

    /// Fetch the next page of results.
    ///
    /// Calling this after [`more()`](QueryItemsRequest::more()) has returned
    /// false is an error.
    pub async fn next_page(&mut self, h: &Handle) -> Result<QueryPage, CosmosError> {
        if !self.more() {
            return ia_err!("no more pages: the query feed is exhausted");
        }
        let Some(pk) = &self.partition_key else {
            return ia_err!("query requires a partition key");
        };
        let Some(query) = &self.query else {
            return ia_err!("query requires a statement");
        };
        let body = serde_json::to_vec(query)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/query+json"),
        );
        headers.insert(IS_QUERY, HeaderValue::from_static("true"));
        if let Some(size) = self.page_size {
            headers.insert(MAX_ITEM_COUNT, HeaderValue::from(size));
        }
        if let Some(token) = &self.continuation {
            headers.insert(CONTINUATION, HeaderValue::from_str(token)?);
        }

        let link = Container::new(&self.database_id, &self.container_id).documents_link();
        let opts = SendOptions {
            timeout: h.get_timeout(&self.timeout),
            partition_key: Some(pk.to_header_value()),
            headers,
            ..Default::default()
        };
        let resp = h.send_request(Method::POST, &link, Some(body), opts).await?;

        self.started = true;
        self.continuation = resp.continuation;

        let feed: FeedResponse = serde_json::from_slice(&resp.body)?;
        trace!(
            "query page: {} documents, more={}",
            feed.documents.len(),
            self.more()
        );
        Ok(QueryPage {
            status_code: resp.status,
            request_charge: resp.request_charge,
            documents: feed.documents,
        })
    }

    /// Execute the query to full completion.
    ///
    /// Internally this loops calling
    /// [`next_page()`](QueryItemsRequest::next_page()) until the feed is
    /// exhausted, concatenating rows and summing the per-page charges.
    ///
    /// If the query has no rows to return, [`QueryItemsResult::rows()`] will
    /// be an empty vector.
    pub async fn execute(&mut self, h: &Handle) -> Result<QueryItemsResult, CosmosError> {
        let mut result = QueryItemsResult::default();
        while self.more() {
            let page = self.next_page(h).await?;
            result.request_charge += page.request_charge;
            result.rows.extend(page.documents);
        }
        Ok(result)
    }
}
