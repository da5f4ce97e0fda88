//! Resource graph to HAL document transformation.
//!
//! [`LinkRenderer`] resolves every link to an href, wraps payloads in the
//! `_links`/`_embedded` envelope, recurses into embedded resources and
//! computes navigation links for paginated collections.

use std::borrow::Cow;
use std::sync::Arc;

use serde_json::{Map, Value};
use url::Url;

use crate::domain::{
    ApiProblem, CollectionItem, CollectionItems, Embedded, HalCollection, HalResource, Identifier,
    Link, LinkBuilder, LinkCollection, LinkTarget, PageWindow,
};
use crate::error::{HalError, RenderingError};
use crate::routing::{HostUrlProvider, RouteParams, UrlBuilder};

/// Keys the envelope owns; payloads must not define them.
pub const RESERVED_KEYS: [&str; 2] = ["_links", "_embedded"];

/// Top-level keys a paginated collection fills with its paging metadata.
pub const PAGING_KEYS: [&str; 4] = ["page", "page_count", "page_size", "total_items"];

/// Status of the problem returned for a page outside the collection.
pub const INVALID_PAGE_STATUS: u16 = 409;

/// Rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RendererOptions {
    /// Render embedded resources in full; when `false` only their `_links` are kept.
    pub render_embedded_resources: bool,
    /// Emit `_links: {}` / `_embedded: {}` on resources that have none.
    pub render_empty_envelopes: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            render_embedded_resources: true,
            render_empty_envelopes: false,
        }
    }
}

/// Result of rendering a collection.
///
/// A page outside the collection is a client mistake, not a programming
/// error, so it comes back as a value.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionRender {
    Document(Map<String, Value>),
    Problem(ApiProblem),
}

/// Turns [`HalResource`]s and [`HalCollection`]s into HAL JSON objects.
#[derive(Clone)]
pub struct LinkRenderer {
    url_builder: Arc<dyn UrlBuilder>,
    host: Arc<dyn HostUrlProvider>,
    options: RendererOptions,
}

impl LinkRenderer {
    pub fn new(url_builder: Arc<dyn UrlBuilder>, host: Arc<dyn HostUrlProvider>) -> Self {
        Self {
            url_builder,
            host,
            options: RendererOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RendererOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    /// Resolves a link to its href.
    ///
    /// URL links pass through verbatim. Route links go through the
    /// [`UrlBuilder`]; with `force_canonical` a relative result is prefixed
    /// with the current host URL.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::RouteAssembly`] if the route cannot be assembled.
    pub fn resolve_href(&self, link: &Link) -> Result<String, HalError> {
        let route = match link.target() {
            LinkTarget::Url(url) => return Ok(url.clone()),
            LinkTarget::Route(route) => route,
        };

        let href = self
            .url_builder
            .assemble(&route.name, &route.params, &route.options)?;

        let href = if route.options.force_canonical && Url::parse(&href).is_err() {
            let host = self.host.current_host_url();
            let host = host.trim_end_matches('/');
            if href.starts_with('/') {
                format!("{host}{href}")
            } else {
                format!("{host}/{href}")
            }
        } else {
            href
        };

        tracing::debug!(
            relation = link.relation(),
            route = %route.name,
            href = %href,
            "Resolved route link"
        );

        Ok(href)
    }

    /// Renders one link object: `href` plus the attributes that were set.
    ///
    /// # Errors
    ///
    /// See [`LinkRenderer::resolve_href`].
    pub fn render_link(&self, link: &Link) -> Result<Map<String, Value>, HalError> {
        let mut out = Map::new();
        out.insert("href".to_string(), Value::from(self.resolve_href(link)?));

        if let Some(templated) = link.templated() {
            out.insert("templated".to_string(), Value::from(templated));
        }
        if let Some(title) = link.title() {
            out.insert("title".to_string(), Value::from(title));
        }
        if let Some(hreflang) = link.hreflang() {
            out.insert("hreflang".to_string(), Value::from(hreflang));
        }
        if let Some(name) = link.name() {
            out.insert("name".to_string(), Value::from(name));
        }
        if let Some(media_type) = link.media_type() {
            out.insert("type".to_string(), Value::from(media_type));
        }
        if let Some(deprecation) = link.deprecation() {
            out.insert("deprecation".to_string(), Value::from(deprecation));
        }
        if let Some(profile) = link.profile() {
            out.insert("profile".to_string(), Value::from(profile));
        }

        Ok(out)
    }

    /// Renders a `_links` object; single-link relations become objects, others arrays.
    ///
    /// # Errors
    ///
    /// See [`LinkRenderer::resolve_href`].
    pub fn render_links(&self, links: &LinkCollection) -> Result<Map<String, Value>, HalError> {
        let mut out = Map::new();

        for (relation, relation_links, as_array) in links.iter() {
            let mut rendered = relation_links
                .iter()
                .map(|link| self.render_link(link).map(Value::Object))
                .collect::<Result<Vec<_>, _>>()?;

            let value = if !as_array && rendered.len() == 1 {
                rendered.remove(0)
            } else {
                Value::Array(rendered)
            };
            out.insert(relation.to_string(), value);
        }

        Ok(out)
    }

    /// Renders a resource and, recursively, everything it embeds.
    ///
    /// # Errors
    ///
    /// - [`RenderingError::ReservedKey`] if a payload defines `_links` or `_embedded`
    /// - [`RenderingError::Cycle`] if a resource embeds itself, directly or transitively
    /// - [`HalError::RouteAssembly`] if any link cannot be resolved
    pub fn render_resource(&self, resource: &HalResource) -> Result<Map<String, Value>, HalError> {
        self.render_resource_at(resource, None, &mut Vec::new())
    }

    /// Renders a collection page.
    ///
    /// # Errors
    ///
    /// Same as [`LinkRenderer::render_resource`] for each item and for the
    /// navigation links. A paginated collection whose attributes use one of
    /// [`PAGING_KEYS`] fails with [`RenderingError::ReservedKey`]. An out-of-range page is not an error: it yields
    /// [`CollectionRender::Problem`].
    pub fn render_collection(
        &self,
        collection: &HalCollection,
    ) -> Result<CollectionRender, HalError> {
        check_reserved_keys(collection.attributes())?;
        if collection.is_paginated() {
            check_keys(collection.attributes(), &PAGING_KEYS)?;
        }

        let page = collection.get_page();
        let page_size = collection.get_page_size();

        let (items, paging): (Cow<'_, [CollectionItem]>, Option<PageWindow>) =
            match collection.items() {
                CollectionItems::List(items) => (Cow::Borrowed(items.as_slice()), None),
                CollectionItems::Paginated(paginator) => {
                    let window = paginator.window(page_size);
                    if !window.contains(page) {
                        tracing::warn!(
                            page,
                            page_count = window.page_count(),
                            "Requested page is out of range"
                        );
                        return Ok(CollectionRender::Problem(ApiProblem::new(
                            INVALID_PAGE_STATUS,
                            "Invalid page provided",
                        )));
                    }
                    (Cow::Owned(paginator.slice(&window, page)), Some(window))
                }
            };

        let mut links = self.navigation_links(collection, paging.as_ref())?;
        for (relation, value) in self.render_links(collection.links())? {
            links.insert(relation, value);
        }

        let mut rendered = Vec::with_capacity(items.len());
        for item in items.iter() {
            rendered.push(self.render_item(collection, item)?);
        }

        let mut doc = collection.attributes().clone();
        if let Some(window) = &paging {
            doc.insert("page".to_string(), Value::from(page));
            doc.insert("page_count".to_string(), Value::from(window.page_count()));
            doc.insert("page_size".to_string(), Value::from(page_size));
            doc.insert("total_items".to_string(), Value::from(window.total_items));
        }
        if !links.is_empty() || self.options.render_empty_envelopes {
            doc.insert("_links".to_string(), Value::Object(links));
        }

        let mut embedded = Map::new();
        embedded.insert(
            collection.get_collection_name().to_string(),
            Value::Array(rendered),
        );
        doc.insert("_embedded".to_string(), Value::Object(embedded));

        Ok(CollectionRender::Document(doc))
    }

    fn render_resource_at(
        &self,
        resource: &HalResource,
        fallback_self: Option<&Link>,
        path: &mut Vec<String>,
    ) -> Result<Map<String, Value>, HalError> {
        check_reserved_keys(resource.payload())?;

        let mut links = self.render_links(resource.links())?;
        if let Some(link) = fallback_self
            && !links.contains_key("self")
        {
            links.insert("self".to_string(), Value::Object(self.render_link(link)?));
        }

        let self_href = links.get("self").and_then(href_of_self);
        if let Some(href) = &self_href {
            if path.contains(href) {
                return Err(RenderingError::Cycle { href: href.clone() }.into());
            }
            path.push(href.clone());
        }

        let embedded = self.render_embedded(resource, path);
        if self_href.is_some() {
            path.pop();
        }
        let embedded = embedded?;

        let mut doc = resource.payload().clone();
        if !links.is_empty() || self.options.render_empty_envelopes {
            doc.insert("_links".to_string(), Value::Object(links));
        }
        if !embedded.is_empty() || self.options.render_empty_envelopes {
            doc.insert("_embedded".to_string(), Value::Object(embedded));
        }

        Ok(doc)
    }

    fn render_embedded(
        &self,
        resource: &HalResource,
        path: &mut Vec<String>,
    ) -> Result<Map<String, Value>, HalError> {
        let mut out = Map::new();

        for (relation, embedded) in resource.embedded() {
            let value = match embedded {
                Embedded::One(child) => Value::Object(self.render_child(child, path)?),
                Embedded::Many(children) => Value::Array(
                    children
                        .iter()
                        .map(|child| self.render_child(child, path).map(Value::Object))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
            };
            out.insert(relation.to_string(), value);
        }

        Ok(out)
    }

    fn render_child(
        &self,
        child: &HalResource,
        path: &mut Vec<String>,
    ) -> Result<Map<String, Value>, HalError> {
        if self.options.render_embedded_resources {
            return self.render_resource_at(child, None, path);
        }

        let mut out = Map::new();
        out.insert(
            "_links".to_string(),
            Value::Object(self.render_links(child.links())?),
        );
        Ok(out)
    }

    fn render_item(
        &self,
        collection: &HalCollection,
        item: &CollectionItem,
    ) -> Result<Value, HalError> {
        match item {
            CollectionItem::Resource(resource) => {
                let fallback = self.item_self_link(collection, resource.identifier())?;
                let doc = self.render_resource_at(resource, fallback.as_ref(), &mut Vec::new())?;
                Ok(Value::Object(doc))
            }
            CollectionItem::Raw(value) => {
                let identifier = value
                    .as_object()
                    .filter(|obj| !RESERVED_KEYS.iter().any(|key| obj.contains_key(*key)))
                    .and_then(|obj| obj.get(collection.get_identifier_name()))
                    .and_then(Identifier::from_value);

                match (collection.get_resource_route(), identifier) {
                    (Some(_), Some(identifier)) => {
                        let resource = HalResource::from_object(
                            value.clone(),
                            collection.get_identifier_name(),
                        )?;
                        let fallback = self.item_self_link(collection, &identifier)?;
                        let doc =
                            self.render_resource_at(&resource, fallback.as_ref(), &mut Vec::new())?;
                        Ok(Value::Object(doc))
                    }
                    _ => Ok(value.clone()),
                }
            }
        }
    }

    fn item_self_link(
        &self,
        collection: &HalCollection,
        identifier: &Identifier,
    ) -> Result<Option<Link>, HalError> {
        let Some(route) = collection.get_resource_route() else {
            return Ok(None);
        };

        let mut params = RouteParams::new();
        params.insert(
            collection.get_identifier_name().to_string(),
            identifier.to_value(),
        );
        Link::from_route("self", route, params).map(Some)
    }

    fn navigation_links(
        &self,
        collection: &HalCollection,
        paging: Option<&PageWindow>,
    ) -> Result<Map<String, Value>, HalError> {
        let mut links = Map::new();
        let Some(route) = collection.get_collection_route() else {
            return Ok(links);
        };

        let Some(window) = paging else {
            let link = LinkBuilder::new("self")?
                .route(
                    route,
                    collection.collection_route_params().clone(),
                    collection.collection_route_options().clone(),
                )?
                .build()?;
            links.insert("self".to_string(), Value::Object(self.render_link(&link)?));
            return Ok(links);
        };

        let page = collection.get_page();
        let page_count = window.page_count();
        let mut targets = vec![("self", page), ("first", 1), ("last", page_count)];
        if page > 1 {
            targets.push(("prev", page - 1));
        }
        if page < page_count {
            targets.push(("next", page + 1));
        }

        for (relation, target_page) in targets {
            let mut params = collection.collection_route_params().clone();
            params.insert("page".to_string(), Value::from(target_page));

            let link = LinkBuilder::new(relation)?
                .route(route, params, collection.collection_route_options().clone())?
                .build()?;
            links.insert(relation.to_string(), Value::Object(self.render_link(&link)?));
        }

        Ok(links)
    }
}

fn check_reserved_keys(fields: &Map<String, Value>) -> Result<(), RenderingError> {
    check_keys(fields, &RESERVED_KEYS)
}

fn check_keys(fields: &Map<String, Value>, reserved: &[&str]) -> Result<(), RenderingError> {
    match reserved.iter().find(|key| fields.contains_key(**key)) {
        Some(key) => Err(RenderingError::ReservedKey {
            key: key.to_string(),
        }),
        None => Ok(()),
    }
}

/// href of a rendered `self` relation (first link when it is an array).
fn href_of_self(value: &Value) -> Option<String> {
    let link = match value {
        Value::Array(links) => links.first()?,
        other => other,
    };
    link.get("href")?.as_str().map(str::to_string)
}
