//
// Copyright (c) 2024 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
use crate::container::Container;

/// An offline handle to a database, scoping [`Container`] handles.
///
/// Created by [`Handle::database()`](crate::Handle::database()). Holding one
/// implies nothing about the database existing on the service; requests made
/// through a nonexistent name fail with
/// [`NotFound`](crate::CosmosErrorCode::NotFound) at execution time.
#[derive(Debug, Clone)]
pub struct Database {
    id: String,
}

impl Database {
    pub(crate) fn new(id: &str) -> Database {
        Database { id: id.to_string() }
    }

    /// The database name.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get an offline handle to a container within this database.
    pub fn container(&self, id: &str) -> Container {
        Container::new(&self.id, id)
    }
}
