//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
//! The demo runner: a strict sequence of upsert / upsert / read / query
//! against one container, reporting status codes and request charges.

use crate::config::RunnerConfig;
use crate::container::Container;
use crate::error::CosmosError;
use crate::handle::Handle;
use crate::query_items_request::QueryItemsRequest;
use crate::read_item_request::ReadItemRequest;
use crate::upsert_item_request::UpsertItemRequest;
use reqwest::StatusCode;
use serde_derive::{Deserialize, Serialize};
use std::result::Result;

const ITEM_A_ID: &str = "aaaaaaaa-0000-1111-2222-bbbbbbbbbbbb";
const ITEM_B_ID: &str = "bbbbbbbb-1111-2222-3333-cccccccccccc";
const CATEGORY: &str = "gear-surf-surfboards";

/// The demo's single domain entity.
///
/// `category` doubles as the partition key value: every operation on an item
/// must supply a partition key equal to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub category: String,
    pub name: String,
    pub quantity: i32,
    pub price: f64,
    pub clearance: bool,
}

async fn upsert_and_report(
    handle: &Handle,
    container: &Container,
    item: &Item,
    write_output: &mut impl FnMut(&str),
) -> Result<(), CosmosError> {
    let res = UpsertItemRequest::new(container)
        .partition_key(item.category.as_str())
        .item(item)?
        .execute(handle)
        .await?;
    if res.status_code() == StatusCode::OK || res.status_code() == StatusCode::CREATED {
        if let Some(upserted) = res.item::<Item>()? {
            write_output(&format!("Upserted item:\t{:?}", upserted));
        }
    }
    write_output(&format!("Status code:\t{}", res.status_code().as_u16()));
    write_output(&format!("Request charge:\t{:.2}", res.request_charge()));
    Ok(())
}

/// Run the demo sequence against the configured database and container.
///
/// All progress and results are emitted as formatted single lines through
/// `write_output`, the caller-supplied sink (the quickstart binary passes
/// `println!`). The first error from any operation aborts the run and is
/// returned as the run's overall failure; there are no retries and no
/// partial-result handling. A read miss is not an error: the item lines are
/// simply not emitted (the status line still is).
pub async fn run_demo(
    handle: &Handle,
    config: &RunnerConfig,
    mut write_output: impl FnMut(&str),
) -> Result<(), CosmosError> {
    write_output("Current Status:\tStarting...");

    let database = handle.database(&config.database_name);
    write_output(&format!("Get database:\t{}", database.id()));

    let container = database.container(&config.container_name);
    write_output(&format!("Get container:\t{}", container.id()));

    let item = Item {
        id: ITEM_A_ID.to_string(),
        category: CATEGORY.to_string(),
        name: "Yamba Surfboard".to_string(),
        quantity: 12,
        price: 850.00,
        clearance: false,
    };
    upsert_and_report(handle, &container, &item, &mut write_output).await?;

    let item = Item {
        id: ITEM_B_ID.to_string(),
        category: CATEGORY.to_string(),
        name: "Kiama Classic Surfboard".to_string(),
        quantity: 25,
        price: 790.00,
        clearance: true,
    };
    upsert_and_report(handle, &container, &item, &mut write_output).await?;

    let res = ReadItemRequest::new(&container, ITEM_A_ID)
        .partition_key(CATEGORY)
        .execute(handle)
        .await?;
    if res.status_code() == StatusCode::OK {
        if let Some(read_item) = res.item::<Item>()? {
            write_output(&format!("Read item id:\t{}", read_item.id));
            write_output(&format!("Read item:\t{:?}", read_item));
        }
    }
    write_output(&format!("Status code:\t{}", res.status_code().as_u16()));
    write_output(&format!("Request charge:\t{:.2}", res.request_charge()));

    let mut query = QueryItemsRequest::new(
        &container,
        "SELECT * FROM products p WHERE p.category = @category",
    )
    .parameter("@category", CATEGORY)
    .partition_key(CATEGORY);

    let mut items: Vec<Item> = Vec::new();
    let mut request_charge: f64 = 0.0;
    while query.more() {
        let page = query.next_page(handle).await?;
        request_charge += page.request_charge();
        items.append(&mut page.items::<Item>()?);
    }

    for item in &items {
        write_output(&format!("Found item:\t{}\t{}", item.name, item.id));
    }
    write_output(&format!("Request charge:\t{:.2}", request_charge));

    Ok(())
}
