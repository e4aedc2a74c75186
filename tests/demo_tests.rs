//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//

// Integration tests: drive the real client against a local in-process mock
// of the document store's data plane (upsert, point read, delete, and paged
// queries, with request-charge headers), then check the demo runner's
// behavior end to end through its output sink.

use cosmos_nosql_demo::{
    DeleteItemRequest, Handle, Item, QueryItemsRequest, ReadItemRequest, RunnerConfig,
    UpsertItemRequest,
};
use cosmos_nosql_demo::{run_demo, CosmosErrorCode};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

// Per-operation charges the mock reports; tests assert exact sums of these.
const UPSERT_CHARGE: f64 = 10.23;
const READ_CHARGE: f64 = 1.0;
const QUERY_PAGE_CHARGE: f64 = 2.82;
const DELETE_CHARGE: f64 = 5.05;

// Any syntactically valid base64 key works: the mock does not verify
// signatures, and the client signs with whatever it is given.
const TEST_KEY: &str =
    "8F8xXXOptJxkblM1DBXW7a6NMI5oE8NnwPGYBmwxLCKfejOK7B7yhcCHMGvN3PBrlMLIOeol1Hv9RCdzAZR5sg==";

mod mock {
    use super::*;
    use axum::body::Bytes;
    use axum::extract::{Path, State};
    use axum::http::{HeaderMap, HeaderValue, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::routing::{get, post};
    use axum::{Json, Router};

    #[derive(Clone, Default)]
    pub struct MockStore {
        pub inner: Arc<Mutex<StoreInner>>,
    }

    pub struct StoreInner {
        // (partition key, id) -> document; BTreeMap keeps service order
        // deterministic across runs
        pub docs: BTreeMap<(String, String), Value>,
        pub page_size: usize,
        // When set, point reads answer 404 regardless of contents.
        pub read_misses: bool,
    }

    impl Default for StoreInner {
        fn default() -> Self {
            StoreInner {
                docs: BTreeMap::new(),
                page_size: 100,
                read_misses: false,
            }
        }
    }

    fn charge_headers(charge: f64, continuation: Option<String>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-ms-request-charge",
            HeaderValue::from_str(&format!("{}", charge)).unwrap(),
        );
        if let Some(token) = continuation {
            headers.insert("x-ms-continuation", HeaderValue::from_str(&token).unwrap());
        }
        headers
    }

    fn partition_key(headers: &HeaderMap) -> Option<String> {
        let raw = headers.get("x-ms-documentdb-partitionkey")?.to_str().ok()?;
        let parts: Vec<String> = serde_json::from_str(raw).ok()?;
        parts.into_iter().next()
    }

    async fn docs_feed(
        State(store): State<MockStore>,
        Path((_db, _coll)): Path<(String, String)>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response {
        let is_query = headers
            .get("x-ms-documentdb-isquery")
            .map(|v| v == "true")
            .unwrap_or(false);
        if is_query {
            query(store, headers, body)
        } else {
            upsert(store, headers, body)
        }
    }

    fn upsert(store: MockStore, headers: HeaderMap, body: Bytes) -> Response {
        let Some(pk) = partition_key(&headers) else {
            return (StatusCode::BAD_REQUEST, "missing partition key").into_response();
        };
        let doc: Value = match serde_json::from_slice(&body) {
            Ok(doc) => doc,
            Err(_) => return (StatusCode::BAD_REQUEST, "malformed document").into_response(),
        };
        let Some(id) = doc.get("id").and_then(|v| v.as_str()) else {
            return (StatusCode::BAD_REQUEST, "document has no id").into_response();
        };
        // the partition key header must agree with the document's
        // partition-key property
        if doc.get("category").and_then(|v| v.as_str()) != Some(pk.as_str()) {
            return (StatusCode::BAD_REQUEST, "partition key mismatch").into_response();
        }

        let mut inner = store.inner.lock().unwrap();
        let existed = inner
            .docs
            .insert((pk, id.to_string()), doc.clone())
            .is_some();
        let status = if existed {
            StatusCode::OK
        } else {
            StatusCode::CREATED
        };
        (status, charge_headers(UPSERT_CHARGE, None), Json(doc)).into_response()
    }

    fn query(store: MockStore, headers: HeaderMap, body: Bytes) -> Response {
        if partition_key(&headers).is_none() {
            return (StatusCode::BAD_REQUEST, "missing partition key").into_response();
        }
        let q: Value = match serde_json::from_slice(&body) {
            Ok(q) => q,
            Err(_) => return (StatusCode::BAD_REQUEST, "malformed query").into_response(),
        };
        let category = q
            .get("parameters")
            .and_then(|p| p.as_array())
            .and_then(|params| {
                params
                    .iter()
                    .find(|p| p.get("name").and_then(|n| n.as_str()) == Some("@category"))
            })
            .and_then(|p| p.get("value"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let start: usize = headers
            .get("x-ms-continuation")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);

        let inner = store.inner.lock().unwrap();
        let matches: Vec<Value> = inner
            .docs
            .values()
            .filter(|doc| doc.get("category").and_then(|v| v.as_str()) == Some(category.as_str()))
            .cloned()
            .collect();
        let end = (start + inner.page_size).min(matches.len());
        let page = matches[start..end].to_vec();
        let continuation = if end < matches.len() {
            Some(end.to_string())
        } else {
            None
        };

        let feed = json!({"_count": page.len(), "Documents": page});
        (
            StatusCode::OK,
            charge_headers(QUERY_PAGE_CHARGE, continuation),
            Json(feed),
        )
            .into_response()
    }

    async fn read_doc(
        State(store): State<MockStore>,
        Path((_db, _coll, id)): Path<(String, String, String)>,
        headers: HeaderMap,
    ) -> Response {
        let Some(pk) = partition_key(&headers) else {
            return (StatusCode::BAD_REQUEST, "missing partition key").into_response();
        };
        let inner = store.inner.lock().unwrap();
        if inner.read_misses {
            return (
                StatusCode::NOT_FOUND,
                charge_headers(READ_CHARGE, None),
                Json(json!({"code": "NotFound"})),
            )
                .into_response();
        }
        match inner.docs.get(&(pk, id)) {
            Some(doc) => (
                StatusCode::OK,
                charge_headers(READ_CHARGE, None),
                Json(doc.clone()),
            )
                .into_response(),
            None => (
                StatusCode::NOT_FOUND,
                charge_headers(READ_CHARGE, None),
                Json(json!({"code": "NotFound"})),
            )
                .into_response(),
        }
    }

    async fn delete_doc(
        State(store): State<MockStore>,
        Path((_db, _coll, id)): Path<(String, String, String)>,
        headers: HeaderMap,
    ) -> Response {
        let Some(pk) = partition_key(&headers) else {
            return (StatusCode::BAD_REQUEST, "missing partition key").into_response();
        };
        let mut inner = store.inner.lock().unwrap();
        match inner.docs.remove(&(pk, id)) {
            Some(_) => (
                StatusCode::NO_CONTENT,
                charge_headers(DELETE_CHARGE, None),
            )
                .into_response(),
            None => (
                StatusCode::NOT_FOUND,
                charge_headers(DELETE_CHARGE, None),
                Json(json!({"code": "NotFound"})),
            )
                .into_response(),
        }
    }

    /// Start the mock store on an ephemeral local port; returns its endpoint.
    pub async fn start(store: MockStore) -> String {
        let app = Router::new()
            .route("/dbs/:db/colls/:coll/docs", post(docs_feed))
            .route(
                "/dbs/:db/colls/:coll/docs/:id",
                get(read_doc).delete(delete_doc),
            )
            .with_state(store);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

async fn test_handle(endpoint: &str) -> Result<Handle, Box<dyn Error>> {
    let handle = Handle::builder()
        .endpoint(endpoint)?
        .key(TEST_KEY)?
        .content_response_on_write(true)?
        .build()
        .await?;
    Ok(handle)
}

fn surfboard(id: &str, name: &str, quantity: i32) -> Item {
    Item {
        id: id.to_string(),
        category: "gear-surf-surfboards".to_string(),
        name: name.to_string(),
        quantity,
        price: 850.00,
        clearance: false,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn upsert_read_roundtrip() -> Result<(), Box<dyn Error>> {
    let endpoint = mock::start(mock::MockStore::default()).await;
    let handle = test_handle(&endpoint).await?;
    let container = handle.database("cosmicworks").container("products");

    let item = surfboard("item-1", "Yamba Surfboard", 12);
    let res = UpsertItemRequest::new(&container)
        .partition_key("gear-surf-surfboards")
        .item(&item)?
        .execute(&handle)
        .await?;
    assert_eq!(res.status_code(), StatusCode::CREATED);
    assert_eq!(res.request_charge(), UPSERT_CHARGE);
    assert_eq!(res.item::<Item>()?, Some(item.clone()));

    // a second write of the same id replaces, not inserts
    let res = UpsertItemRequest::new(&container)
        .partition_key("gear-surf-surfboards")
        .item(&item)?
        .execute(&handle)
        .await?;
    assert_eq!(res.status_code(), StatusCode::OK);

    // the read must return a record equal in all fields to what was written
    let res = ReadItemRequest::new(&container, "item-1")
        .partition_key("gear-surf-surfboards")
        .execute(&handle)
        .await?;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.request_charge(), READ_CHARGE);
    assert_eq!(res.item::<Item>()?, Some(item));

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn upsert_replaces_the_item_entirely() -> Result<(), Box<dyn Error>> {
    let endpoint = mock::start(mock::MockStore::default()).await;
    let handle = test_handle(&endpoint).await?;
    let container = handle.database("cosmicworks").container("products");

    // first write carries a field the second write does not
    UpsertItemRequest::new(&container)
        .partition_key("c")
        .value(json!({"id": "X", "category": "c", "quantity": 12, "legacy": true}))
        .execute(&handle)
        .await?;
    UpsertItemRequest::new(&container)
        .partition_key("c")
        .value(json!({"id": "X", "category": "c", "quantity": 99}))
        .execute(&handle)
        .await?;

    let res = ReadItemRequest::new(&container, "X")
        .partition_key("c")
        .execute(&handle)
        .await?;
    let doc: Value = res.item()?.expect("item X must exist");
    assert_eq!(doc["quantity"], json!(99));
    // fields not present in the new payload are not preserved
    assert!(doc.get("legacy").is_none());

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn upsert_with_mismatched_partition_key_is_rejected() -> Result<(), Box<dyn Error>> {
    let endpoint = mock::start(mock::MockStore::default()).await;
    let handle = test_handle(&endpoint).await?;
    let container = handle.database("cosmicworks").container("products");

    let item = surfboard("item-1", "Yamba Surfboard", 12);
    let err = UpsertItemRequest::new(&container)
        .partition_key("gear-surf-wetsuits")
        .item(&item)?
        .execute(&handle)
        .await
        .unwrap_err();
    assert_eq!(err.code, CosmosErrorCode::BadRequest);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn read_of_missing_item_is_not_an_error() -> Result<(), Box<dyn Error>> {
    let endpoint = mock::start(mock::MockStore::default()).await;
    let handle = test_handle(&endpoint).await?;
    let container = handle.database("cosmicworks").container("products");

    let res = ReadItemRequest::new(&container, "no-such-item")
        .partition_key("gear-surf-surfboards")
        .execute(&handle)
        .await?;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(res.request_charge(), READ_CHARGE);
    assert_eq!(res.item::<Item>()?, None);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn query_drains_all_pages_and_sums_charges() -> Result<(), Box<dyn Error>> {
    let store = mock::MockStore::default();
    store.inner.lock().unwrap().page_size = 2;
    let endpoint = mock::start(store).await;
    let handle = test_handle(&endpoint).await?;
    let container = handle.database("cosmicworks").container("products");

    // three matching items (upserted out of id order) and one in another
    // category that must not appear
    for (id, name, quantity) in [
        ("item-3", "Bondi Twin Fin", 7),
        ("item-1", "Yamba Surfboard", 12),
        ("item-2", "Kiama Classic Surfboard", 25),
    ] {
        UpsertItemRequest::new(&container)
            .partition_key("gear-surf-surfboards")
            .item(&surfboard(id, name, quantity))?
            .execute(&handle)
            .await?;
    }
    UpsertItemRequest::new(&container)
        .partition_key("gear-surf-wetsuits")
        .value(json!({"id": "w-1", "category": "gear-surf-wetsuits", "name": "Wetsuit"}))
        .execute(&handle)
        .await?;

    let mut query = QueryItemsRequest::new(
        &container,
        "SELECT * FROM products p WHERE p.category = @category",
    )
    .parameter("@category", "gear-surf-surfboards")
    .partition_key("gear-surf-surfboards");

    let mut items: Vec<Item> = Vec::new();
    let mut pages = 0;
    let mut request_charge: f64 = 0.0;
    while query.more() {
        let page = query.next_page(&handle).await?;
        assert_eq!(page.status_code(), StatusCode::OK);
        pages += 1;
        request_charge += page.request_charge();
        items.append(&mut page.items::<Item>()?);
    }
    assert_eq!(pages, 2);
    // the total is the exact sum of the per-page charges
    assert_eq!(request_charge, 2.0 * QUERY_PAGE_CHARGE);

    // exactly the upserted set for the category, regardless of upsert order
    let mut ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["item-1", "item-2", "item-3"]);

    // the feed is exhausted: no further page may be requested
    assert!(!query.more());
    assert!(query.next_page(&handle).await.is_err());

    // the drain-all convenience sees the same rows and total
    let mut query = QueryItemsRequest::new(
        &container,
        "SELECT * FROM products p WHERE p.category = @category",
    )
    .parameter("@category", "gear-surf-surfboards")
    .partition_key("gear-surf-surfboards");
    let result = query.execute(&handle).await?;
    assert_eq!(result.rows().len(), 3);
    assert_eq!(result.request_charge(), 2.0 * QUERY_PAGE_CHARGE);
    assert_eq!(result.items::<Item>()?.len(), 3);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn delete_removes_the_item() -> Result<(), Box<dyn Error>> {
    let endpoint = mock::start(mock::MockStore::default()).await;
    let handle = test_handle(&endpoint).await?;
    let container = handle.database("cosmicworks").container("products");

    let item = surfboard("item-1", "Yamba Surfboard", 12);
    UpsertItemRequest::new(&container)
        .partition_key("gear-surf-surfboards")
        .item(&item)?
        .execute(&handle)
        .await?;

    let res = DeleteItemRequest::new(&container, "item-1")
        .partition_key("gear-surf-surfboards")
        .execute(&handle)
        .await?;
    assert_eq!(res.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(res.request_charge(), DELETE_CHARGE);

    // unlike a point read, deleting a missing item is an error
    let err = DeleteItemRequest::new(&container, "item-1")
        .partition_key("gear-surf-surfboards")
        .execute(&handle)
        .await
        .unwrap_err();
    assert_eq!(err.code, CosmosErrorCode::NotFound);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn demo_runner_reports_every_step() -> Result<(), Box<dyn Error>> {
    let endpoint = mock::start(mock::MockStore::default()).await;
    let handle = test_handle(&endpoint).await?;
    let config = RunnerConfig::new("unused", "cosmicworks", "products");

    let mut lines: Vec<String> = Vec::new();
    run_demo(&handle, &config, |line| lines.push(line.to_string())).await?;

    assert_eq!(lines[0], "Current Status:\tStarting...");
    assert!(lines.contains(&"Get database:\tcosmicworks".to_string()));
    assert!(lines.contains(&"Get container:\tproducts".to_string()));

    // both writes were inserts and echoed the stored item back
    assert_eq!(
        lines.iter().filter(|l| l.starts_with("Upserted item:")).count(),
        2
    );
    assert_eq!(
        lines
            .iter()
            .filter(|l| l.as_str() == "Status code:\t201")
            .count(),
        2
    );
    assert_eq!(
        lines
            .iter()
            .filter(|l| **l == format!("Request charge:\t{:.2}", UPSERT_CHARGE))
            .count(),
        2
    );

    // the read found item A and printed id and contents
    assert!(lines.contains(&"Read item id:\taaaaaaaa-0000-1111-2222-bbbbbbbbbbbb".to_string()));
    assert!(lines.iter().any(|l| l.starts_with("Read item:\t")));
    assert!(lines.contains(&"Status code:\t200".to_string()));

    // the query found both upserted items
    assert!(lines.iter().any(|l| l.starts_with("Found item:\tYamba Surfboard\t")));
    assert!(lines
        .iter()
        .any(|l| l.starts_with("Found item:\tKiama Classic Surfboard\t")));

    // one page, so the accumulated total is a single page charge
    assert_eq!(
        lines.last().unwrap(),
        &format!("Request charge:\t{:.2}", QUERY_PAGE_CHARGE)
    );

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn demo_runner_sums_query_charge_across_pages() -> Result<(), Box<dyn Error>> {
    let store = mock::MockStore::default();
    store.inner.lock().unwrap().page_size = 1;
    let endpoint = mock::start(store).await;
    let handle = test_handle(&endpoint).await?;
    let config = RunnerConfig::new("unused", "cosmicworks", "products");

    let mut lines: Vec<String> = Vec::new();
    run_demo(&handle, &config, |line| lines.push(line.to_string())).await?;

    // two items, one per page: the reported total is the exact two-page sum
    assert_eq!(
        lines.last().unwrap(),
        &format!("Request charge:\t{:.2}", 2.0 * QUERY_PAGE_CHARGE)
    );

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn demo_runner_treats_read_miss_as_nothing_to_print() -> Result<(), Box<dyn Error>> {
    let store = mock::MockStore::default();
    store.inner.lock().unwrap().read_misses = true;
    let endpoint = mock::start(store).await;
    let handle = test_handle(&endpoint).await?;
    let config = RunnerConfig::new("unused", "cosmicworks", "products");

    let mut lines: Vec<String> = Vec::new();
    // the run must still complete
    run_demo(&handle, &config, |line| lines.push(line.to_string())).await?;

    // no "Read item" lines, but the status line is still reported
    assert!(!lines.iter().any(|l| l.starts_with("Read item")));
    assert!(lines.contains(&"Status code:\t404".to_string()));

    Ok(())
}
