//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
//! Azure Cosmos DB for NoSQL quickstart demo
//!
//! This crate is a small demonstration of the Cosmos DB NoSQL data plane
//! from Rust: it carries a minimal REST client for the operations the demo
//! needs (upsert-item, read-item, query-items-with-paging, delete-item) and
//! a [`run_demo()`] driver that connects, writes two items, reads one back,
//! runs a partition-scoped query, and reports the status code and request
//! charge of every operation through a caller-supplied output sink.
//!
//! The crate uses Rust `async` methods throughout, on the
//! [tokio](https://crates.io/crates/tokio) runtime. There is no blocking
//! support.
//!
//! The general flow is:
//! - Create a [`HandleBuilder`] with all needed parameters, typically from a
//!   connection string
//! - Create a [`Handle`] from the [`HandleBuilder`] that is used throughout
//!   the application
//! - Scope requests with [`Handle::database()`] and
//!   [`Database::container()`], then interact with the service using request
//!   structs such as [`UpsertItemRequest`], [`ReadItemRequest`], and
//!   [`QueryItemsRequest`]
//!
//! ## Simple Example
//! The following code creates a [`Handle`] from a connection string and
//! reads a single item from a container:
//! ```no_run
//! use cosmos_nosql_demo::{Handle, ReadItemRequest};
//! use std::error::Error;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn Error>> {
//!     let handle = Handle::builder()
//! #       .endpoint("https://localhost:8081")?
//! #       .key("bm90LWEtcmVhbC1rZXk=")?
//!         .from_environment()?
//!         .build().await?;
//!     let container = handle.database("cosmicworks").container("products");
//!     let res = ReadItemRequest::new(&container, "aaaaaaaa-0000-1111-2222-bbbbbbbbbbbb")
//!         .partition_key("gear-surf-surfboards")
//!         .execute(&handle)
//!         .await?;
//!     println!("item = {:?}", res.item::<serde_json::Value>()?);
//!     Ok(())
//! }
//! ```
//!
//! ## The demo
//!
//! The `quickstart` binary (`cargo run --bin quickstart`) is the demo
//! itself. It collects its configuration from the environment (see
//! [`RunnerConfig::from_environment()`]), builds a handle, and calls
//! [`run_demo()`] with a `println!` sink. For extra output:
//! `RUST_LOG=debug cargo run --bin quickstart`, or `RUST_LOG=trace` for a
//! LOT of tracing output.
//!
//! The connection string in a fresh checkout is a placeholder; set
//! `CONFIGURATION__AZURECOSMOSDB__CONNECTIONSTRING` (directly or via a
//! `.env` file) to point the demo at a real account or emulator. The
//! database and container are assumed to already exist.

pub(crate) mod auth;

pub(crate) mod config;
pub use crate::config::RunnerConfig;

pub(crate) mod container;
pub use crate::container::Container;

pub(crate) mod database;
pub use crate::database::Database;

pub(crate) mod delete_item_request;
pub use crate::delete_item_request::{DeleteItemRequest, DeleteItemResult};

pub(crate) mod demo;
pub use crate::demo::{run_demo, Item};

pub(crate) mod error;
pub use crate::error::{CosmosError, CosmosErrorCode};

pub(crate) mod handle;
pub use crate::handle::Handle;

pub(crate) mod handle_builder;
pub use crate::handle_builder::HandleBuilder;

pub(crate) mod query_items_request;
pub use crate::query_items_request::{QueryItemsRequest, QueryItemsResult, QueryPage};

pub(crate) mod read_item_request;
pub use crate::read_item_request::{ReadItemRequest, ReadItemResult};

pub(crate) mod resource;

pub mod types;

pub(crate) mod upsert_item_request;
pub use crate::upsert_item_request::{UpsertItemRequest, UpsertItemResult};
