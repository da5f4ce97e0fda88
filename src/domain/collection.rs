//! A HAL collection: a plain or paginated list of items plus navigation metadata.

use serde_json::{Map, Value};

use crate::domain::link::Link;
use crate::domain::link_collection::LinkCollection;
use crate::domain::paginator::Paginator;
use crate::domain::resource::HalResource;
use crate::routing::{RouteOptions, RouteParams};

/// Default relation the items are embedded under.
pub const DEFAULT_COLLECTION_NAME: &str = "items";

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// Default name of the identifier field of raw items and of the route parameter it fills.
pub const DEFAULT_IDENTIFIER_NAME: &str = "id";

/// One entry of a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionItem {
    Resource(HalResource),
    /// Rendered unchanged unless the collection has a resource route.
    Raw(Value),
}

impl From<HalResource> for CollectionItem {
    fn from(resource: HalResource) -> Self {
        Self::Resource(resource)
    }
}

impl From<Value> for CollectionItem {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

/// Backing sequence of a collection.
#[derive(Debug, Clone)]
pub enum CollectionItems {
    List(Vec<CollectionItem>),
    Paginated(Paginator),
}

/// A list of resources rendered under `_embedded[collection_name]`.
#[derive(Debug, Clone)]
pub struct HalCollection {
    items: CollectionItems,
    collection_name: String,
    page: usize,
    page_size: usize,
    collection_route: Option<String>,
    collection_route_params: RouteParams,
    collection_route_options: RouteOptions,
    resource_route: Option<String>,
    identifier_name: String,
    links: LinkCollection,
    attributes: Map<String, Value>,
}

impl HalCollection {
    fn with_items(items: CollectionItems) -> Self {
        Self {
            items,
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            collection_route: None,
            collection_route_params: RouteParams::new(),
            collection_route_options: RouteOptions::default(),
            resource_route: None,
            identifier_name: DEFAULT_IDENTIFIER_NAME.to_string(),
            links: LinkCollection::new(),
            attributes: Map::new(),
        }
    }

    /// Collection over a fully materialized list; no paging links are produced.
    pub fn from_list(items: impl IntoIterator<Item = impl Into<CollectionItem>>) -> Self {
        Self::with_items(CollectionItems::List(
            items.into_iter().map(Into::into).collect(),
        ))
    }

    /// Collection over a paginator; renders one page plus navigation links.
    pub fn paginated(paginator: Paginator) -> Self {
        Self::with_items(CollectionItems::Paginated(paginator))
    }

    pub fn collection_name(mut self, name: impl Into<String>) -> Self {
        self.collection_name = name.into();
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Route used to build `self`/`first`/`last`/`prev`/`next`.
    pub fn collection_route(
        mut self,
        name: impl Into<String>,
        params: RouteParams,
        options: RouteOptions,
    ) -> Self {
        self.collection_route = Some(name.into());
        self.collection_route_params = params;
        self.collection_route_options = options;
        self
    }

    /// Route used to give each item without a `self` link one, filled from its identifier.
    pub fn resource_route(mut self, name: impl Into<String>) -> Self {
        self.resource_route = Some(name.into());
        self
    }

    pub fn identifier_name(mut self, name: impl Into<String>) -> Self {
        self.identifier_name = name.into();
        self
    }

    /// Extra collection-level link, rendered next to the navigation links.
    pub fn with_link(mut self, link: Link) -> Self {
        self.links.add(link);
        self
    }

    /// Extra top-level field, rendered before the paging metadata.
    ///
    /// `_links` and `_embedded` are never accepted; on a paginated collection
    /// neither are `page`, `page_count`, `page_size` and `total_items`.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn items(&self) -> &CollectionItems {
        &self.items
    }

    pub fn get_collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn get_page(&self) -> usize {
        self.page
    }

    pub fn get_page_size(&self) -> usize {
        self.page_size
    }

    pub fn get_collection_route(&self) -> Option<&str> {
        self.collection_route.as_deref()
    }

    pub fn collection_route_params(&self) -> &RouteParams {
        &self.collection_route_params
    }

    pub fn collection_route_options(&self) -> &RouteOptions {
        &self.collection_route_options
    }

    pub fn get_resource_route(&self) -> Option<&str> {
        self.resource_route.as_deref()
    }

    pub fn get_identifier_name(&self) -> &str {
        &self.identifier_name
    }

    pub fn links(&self) -> &LinkCollection {
        &self.links
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn is_paginated(&self) -> bool {
        matches!(self.items, CollectionItems::Paginated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let collection = HalCollection::from_list(vec![json!({ "id": 1 })]);
        assert_eq!(collection.get_collection_name(), "items");
        assert_eq!(collection.get_page(), 1);
        assert_eq!(collection.get_page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(collection.get_identifier_name(), "id");
        assert!(collection.get_collection_route().is_none());
        assert!(!collection.is_paginated());
    }

    #[test]
    fn test_builder_setters() {
        let params = json!({ "owner": "acme" }).as_object().cloned().unwrap();
        let collection = HalCollection::paginated(Paginator::from_items(Vec::new()))
            .collection_name("widgets")
            .page(2)
            .page_size(10)
            .collection_route("widgets", params, RouteOptions::default())
            .resource_route("widgets")
            .identifier_name("code")
            .with_attribute("filter", "blue");

        assert!(collection.is_paginated());
        assert_eq!(collection.get_collection_name(), "widgets");
        assert_eq!(collection.get_page(), 2);
        assert_eq!(collection.get_page_size(), 10);
        assert_eq!(collection.get_collection_route(), Some("widgets"));
        assert_eq!(collection.collection_route_params()["owner"], "acme");
        assert_eq!(collection.get_resource_route(), Some("widgets"));
        assert_eq!(collection.get_identifier_name(), "code");
        assert_eq!(collection.attributes()["filter"], "blue");
    }

    #[test]
    fn test_items_convert_from_resources_and_values() {
        let resource = HalResource::new(Map::new(), 1);
        let item: CollectionItem = resource.clone().into();
        assert_eq!(item, CollectionItem::Resource(resource));

        let item: CollectionItem = json!({ "id": 2 }).into();
        assert!(matches!(item, CollectionItem::Raw(_)));
    }
}
