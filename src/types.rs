//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
//! Public wire types shared by the request structs.

use serde_derive::Serialize;
use serde_json::Value;

/// The logical partition an operation is routed to.
///
/// Every item request must carry a partition key value consistent with the
/// partition-key property of the item it addresses (`category` in the demo
/// data model); the service rejects or misroutes operations otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionKey {
    value: String,
}

impl PartitionKey {
    /// Create a partition key from a single string value.
    pub fn new(value: &str) -> PartitionKey {
        PartitionKey {
            value: value.to_string(),
        }
    }

    /// The raw partition key value.
    pub fn value(&self) -> &str {
        &self.value
    }

    // Wire form for the x-ms-documentdb-partitionkey header: a JSON array
    // holding the single key component.
    pub(crate) fn to_header_value(&self) -> String {
        Value::Array(vec![Value::String(self.value.clone())]).to_string()
    }
}

impl From<&str> for PartitionKey {
    fn from(value: &str) -> Self {
        PartitionKey::new(value)
    }
}

impl From<String> for PartitionKey {
    fn from(value: String) -> Self {
        PartitionKey { value }
    }
}

/// One named parameter of a parameterized query, bound by `@name`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryParameter {
    pub(crate) name: String,
    pub(crate) value: Value,
}

/// A SQL-like query with its bound parameters, in the shape the service
/// accepts as an `application/query+json` body.
#[derive(Debug, Clone, Serialize)]
pub struct Query {
    #[serde(rename = "query")]
    pub(crate) text: String,
    pub(crate) parameters: Vec<QueryParameter>,
}

impl Query {
    /// Create a query from its statement text.
    pub fn new(text: &str) -> Query {
        Query {
            text: text.to_string(),
            parameters: Vec::new(),
        }
    }

    /// Bind a named parameter. `name` includes the `@` prefix, matching the
    /// placeholder in the statement text.
    pub fn parameter(mut self, name: &str, value: impl Into<Value>) -> Query {
        self.parameters.push(QueryParameter {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    /// The statement text.
    pub fn text(&self) -> &str {
        &self.text
    }
}
