//! Widget catalog service: turns store records into HAL resources.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{HalCollection, HalResource, Link, LinkBuilder, Paginator};
use crate::error::HalError;
use crate::infrastructure::{Manufacturer, Widget, WidgetStore};
use crate::routing::{RouteOptions, RouteParams, RouteTable};

pub const WIDGETS_ROUTE: &str = "widgets";
pub const MANUFACTURERS_ROUTE: &str = "manufacturers";

/// Relation the widget list is embedded under.
pub const WIDGETS_COLLECTION: &str = "widgets";

/// Builds the resource graph served by the widget endpoints.
pub struct WidgetService {
    store: Arc<WidgetStore>,
}

impl WidgetService {
    pub fn new(store: Arc<WidgetStore>) -> Self {
        Self { store }
    }

    /// Route templates used by the links this service produces.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::RouteAssembly`] if a template is malformed.
    pub fn routes() -> Result<RouteTable, HalError> {
        Ok(RouteTable::new()
            .with_route(WIDGETS_ROUTE, "/widgets[/{id}]")?
            .with_route(MANUFACTURERS_ROUTE, "/manufacturers/{id}")?)
    }

    /// A single widget with its manufacturer embedded.
    ///
    /// Returns `Ok(None)` if no widget has this id.
    ///
    /// # Errors
    ///
    /// Returns [`HalError`] if the resource cannot be assembled.
    pub fn widget(&self, id: i64) -> Result<Option<HalResource>, HalError> {
        let Some(widget) = self.store.widget(id) else {
            return Ok(None);
        };

        let mut resource = widget_resource(widget)?.with_link(
            LinkBuilder::new("collection")?
                .route(WIDGETS_ROUTE, RouteParams::new(), RouteOptions::canonical())?
                .title("All widgets")
                .build()?,
        );

        if let Some(manufacturer) = self.store.manufacturer(widget.manufacturer_id) {
            resource.embed("manufacturer", manufacturer_resource(manufacturer)?);
        }

        Ok(Some(resource))
    }

    /// A single manufacturer.
    ///
    /// # Errors
    ///
    /// Returns [`HalError`] if the resource cannot be assembled.
    pub fn manufacturer(&self, id: i64) -> Result<Option<HalResource>, HalError> {
        self.store
            .manufacturer(id)
            .map(manufacturer_resource)
            .transpose()
    }

    /// One page of the catalog.
    ///
    /// Only the requested page is read from the store, when the collection is rendered.
    ///
    /// # Errors
    ///
    /// Returns [`HalError`] if the search link cannot be built.
    pub fn widgets_page(&self, page: usize, page_size: usize) -> Result<HalCollection, HalError> {
        let search = LinkBuilder::new("search")?
            .url("/widgets{?page,page_size}")?
            .templated(true)
            .title("Browse widgets")
            .build()?;

        Ok(
            HalCollection::paginated(Paginator::new(self.store.clone()))
                .collection_name(WIDGETS_COLLECTION)
                .page(page)
                .page_size(page_size)
                .collection_route(
                    WIDGETS_ROUTE,
                    RouteParams::new(),
                    RouteOptions::default().with_query("page_size", page_size.to_string()),
                )
                .resource_route(WIDGETS_ROUTE)
                .with_link(search)
                .with_attribute("catalog", "demo"),
        )
    }
}

fn id_params(id: i64) -> RouteParams {
    let mut params = RouteParams::new();
    params.insert("id".to_string(), Value::from(id));
    params
}

fn widget_resource(widget: &Widget) -> Result<HalResource, HalError> {
    Ok(HalResource::from_entity(widget, widget.id)?
        .with_link(Link::from_route("self", WIDGETS_ROUTE, id_params(widget.id))?)
        .with_link(Link::from_route(
            "manufacturer",
            MANUFACTURERS_ROUTE,
            id_params(widget.manufacturer_id),
        )?))
}

fn manufacturer_resource(manufacturer: &Manufacturer) -> Result<HalResource, HalError> {
    Ok(HalResource::from_entity(manufacturer, manufacturer.id)?
        .with_link(Link::from_route(
            "self",
            MANUFACTURERS_ROUTE,
            id_params(manufacturer.id),
        )?))
}
