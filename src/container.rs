//
// Copyright (c) 2024 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
use crate::resource::{ResourceLink, ResourceType};

/// An offline handle to a container, scoping the item request structs.
///
/// Created by [`Database::container()`](crate::Database::container()). Like
/// [`Database`](crate::Database), this performs no network traffic.
#[derive(Debug, Clone)]
pub struct Container {
    database_id: String,
    id: String,
}

impl Container {
    pub(crate) fn new(database_id: &str, id: &str) -> Container {
        Container {
            database_id: database_id.to_string(),
            id: id.to_string(),
        }
    }

    /// The container name.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The name of the database this container belongs to.
    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    // Feed link for creating and querying documents in this container.
    pub(crate) fn documents_link(&self) -> ResourceLink {
        ResourceLink::root(ResourceType::Databases)
            .item(&self.database_id)
            .feed(ResourceType::Containers)
            .item(&self.id)
            .feed(ResourceType::Documents)
    }

    // Item link for a single document.
    pub(crate) fn document_link(&self, id: &str) -> ResourceLink {
        self.documents_link().item(id)
    }
}
