//
// Copyright (c) 2024 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
//! Addressing for data-plane resources.
//!
//! Every request names a resource by a path like `dbs/{db}/colls/{coll}/docs/{id}`.
//! The signature in [`auth`](crate::auth) is computed over two strings derived
//! from that path: the resource *type* (the last path segment kind) and the
//! resource *link* (the item path for item operations, the parent path for
//! feed operations such as creating or querying documents).

/// The kinds of resources the data plane addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResourceType {
    Databases,
    Containers,
    Documents,
}

impl ResourceType {
    pub(crate) fn path_segment(&self) -> &'static str {
        match self {
            ResourceType::Databases => "dbs",
            ResourceType::Containers => "colls",
            ResourceType::Documents => "docs",
        }
    }
}

/// A typed path to a resource item or feed.
#[derive(Debug, Clone)]
pub(crate) struct ResourceLink {
    parent: String,
    resource_type: ResourceType,
    item_id: Option<String>,
}

impl ResourceLink {
    /// Start a link at a top-level feed (`dbs`).
    pub(crate) fn root(resource_type: ResourceType) -> ResourceLink {
        ResourceLink {
            parent: String::new(),
            resource_type,
            item_id: None,
        }
    }

    /// Address one item within the current feed.
    pub(crate) fn item(mut self, id: &str) -> ResourceLink {
        self.item_id = Some(id.to_string());
        self
    }

    /// Descend into a child feed of the current item.
    pub(crate) fn feed(self, resource_type: ResourceType) -> ResourceLink {
        ResourceLink {
            parent: self.path(),
            resource_type,
            item_id: None,
        }
    }

    /// The request path relative to the account endpoint.
    pub(crate) fn path(&self) -> String {
        let mut p = String::new();
        if !self.parent.is_empty() {
            p.push_str(&self.parent);
            p.push('/');
        }
        p.push_str(self.resource_type.path_segment());
        if let Some(id) = &self.item_id {
            p.push('/');
            p.push_str(id);
        }
        p
    }

    /// The resource type string the signature is computed over.
    pub(crate) fn resource_type(&self) -> &'static str {
        self.resource_type.path_segment()
    }

    /// The resource link string the signature is computed over.
    ///
    /// Item operations sign the item path; feed operations sign the parent
    /// path (empty at the root).
    pub(crate) fn resource_link(&self) -> String {
        match &self.item_id {
            Some(_) => self.path(),
            None => self.parent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn documents_feed() -> ResourceLink {
        ResourceLink::root(ResourceType::Databases)
            .item("cosmicworks")
            .feed(ResourceType::Containers)
            .item("products")
            .feed(ResourceType::Documents)
    }

    #[test]
    fn feed_link() {
        let link = documents_feed();
        assert_eq!(link.path(), "dbs/cosmicworks/colls/products/docs");
        assert_eq!(link.resource_type(), "docs");
        assert_eq!(link.resource_link(), "dbs/cosmicworks/colls/products");
    }

    #[test]
    fn item_link() {
        let link = documents_feed().item("aaaa-bbbb");
        assert_eq!(link.path(), "dbs/cosmicworks/colls/products/docs/aaaa-bbbb");
        assert_eq!(link.resource_type(), "docs");
        assert_eq!(
            link.resource_link(),
            "dbs/cosmicworks/colls/products/docs/aaaa-bbbb"
        );
    }

    #[test]
    fn root_feed_signs_empty_link() {
        let link = ResourceLink::root(ResourceType::Databases);
        assert_eq!(link.path(), "dbs");
        assert_eq!(link.resource_link(), "");
    }
}
