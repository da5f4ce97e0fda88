mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use hal_renderer::domain::{CollectionItems, PaginatorAdapter};
use hal_renderer::prelude::*;
use hal_renderer::render::CollectionRender;
use serde_json::{Value, json};

use common::{body, params, renderer, widget};

fn records(total: i64) -> Vec<CollectionItem> {
    (1..=total)
        .map(|id| json!({ "id": id, "name": format!("widget {id}") }).into())
        .collect()
}

fn paginated(total: i64, page: usize, page_size: usize) -> HalCollection {
    HalCollection::paginated(Paginator::from_items(records(total)))
        .collection_name("widgets")
        .page(page)
        .page_size(page_size)
        .collection_route("widgets", RouteParams::new(), RouteOptions::default())
}

fn render(collection: &HalCollection) -> Value {
    body(&renderer().render(&collection.clone().into()).unwrap())
}

#[test]
fn test_last_page_has_prev_and_no_next() {
    let doc = render(&paginated(25, 3, 10));

    assert_eq!(doc["_links"]["self"]["href"], "/widgets?page=3");
    assert_eq!(doc["_links"]["first"]["href"], "/widgets?page=1");
    assert_eq!(doc["_links"]["last"]["href"], "/widgets?page=3");
    assert_eq!(doc["_links"]["prev"]["href"], "/widgets?page=2");
    assert!(doc["_links"].get("next").is_none());

    assert_eq!(doc["page"], 3);
    assert_eq!(doc["page_count"], 3);
    assert_eq!(doc["page_size"], 10);
    assert_eq!(doc["total_items"], 25);
    assert_eq!(doc["_embedded"]["widgets"].as_array().unwrap().len(), 5);
}

#[test]
fn test_middle_page_has_both_neighbours() {
    let doc = render(&paginated(25, 2, 10));

    assert_eq!(doc["_links"]["prev"]["href"], "/widgets?page=1");
    assert_eq!(doc["_links"]["next"]["href"], "/widgets?page=3");
    let items = doc["_embedded"]["widgets"].as_array().unwrap();
    assert_eq!(items.first().unwrap()["id"], 11);
    assert_eq!(items.last().unwrap()["id"], 20);
}

#[test]
fn test_out_of_range_page_is_problem_value() {
    let result = renderer()
        .link_renderer()
        .render_collection(&paginated(25, 4, 10))
        .unwrap();

    let CollectionRender::Problem(problem) = result else {
        panic!("expected a problem for page 4");
    };
    assert_eq!(problem.status(), 409);
    assert_eq!(problem.detail(), "Invalid page provided");
}

#[test]
fn test_out_of_range_page_document() {
    let document = renderer().render(&paginated(25, 4, 10).into()).unwrap();

    assert!(document.is_api_problem());
    assert_eq!(document.status(), 409);
    assert_eq!(document.content_type(), "application/problem+json");
    let doc = body(&document);
    assert_eq!(doc["status"], 409);
    assert_eq!(doc["detail"], "Invalid page provided");
    assert!(doc.get("_links").is_none());
}

#[test]
fn test_page_zero_is_out_of_range() {
    let document = renderer().render(&paginated(25, 0, 10).into()).unwrap();
    assert_eq!(document.status(), 409);
}

#[test]
fn test_empty_collection_has_one_page() {
    let doc = render(&paginated(0, 1, 10));

    assert_eq!(doc["page_count"], 1);
    assert_eq!(doc["total_items"], 0);
    assert_eq!(doc["_links"]["last"]["href"], "/widgets?page=1");
    assert!(doc["_links"].get("next").is_none());
    assert_eq!(doc["_embedded"]["widgets"], json!([]));
}

#[test]
fn test_route_params_and_query_are_kept_in_navigation() {
    let collection = HalCollection::paginated(Paginator::from_items(records(30)))
        .page(2)
        .page_size(10)
        .collection_route(
            "user",
            params(json!({ "user_id": "ada", "tab": "widgets" })),
            RouteOptions::default().with_query("sort", "name"),
        );

    let doc = render(&collection);
    assert_eq!(
        doc["_links"]["next"]["href"],
        "/users/ada/widgets?page=3&sort=name"
    );
}

#[test]
fn test_canonical_navigation_links() {
    let collection = HalCollection::paginated(Paginator::from_items(records(5)))
        .page_size(10)
        .collection_route("widgets", RouteParams::new(), RouteOptions::canonical());

    let doc = render(&collection);
    assert_eq!(
        doc["_links"]["self"]["href"],
        "https://api.example.com/widgets?page=1"
    );
}

#[test]
fn test_plain_list_has_no_paging_metadata() {
    let collection = HalCollection::from_list(records(3))
        .collection_route("widgets", RouteParams::new(), RouteOptions::default());

    let doc = render(&collection);
    assert_eq!(doc["_links"], json!({ "self": { "href": "/widgets" } }));
    assert!(doc.get("page").is_none());
    assert!(doc.get("total_items").is_none());
    assert_eq!(doc["_embedded"]["items"].as_array().unwrap().len(), 3);
}

#[test]
fn test_raw_records_pass_through_unchanged() {
    let collection = HalCollection::from_list(vec![json!({ "id": 1 }), json!("loose"), json!(7)]);

    let doc = render(&collection);
    assert_eq!(doc["_embedded"]["items"], json!([{ "id": 1 }, "loose", 7]));
}

#[test]
fn test_resource_route_links_items() {
    let items: Vec<CollectionItem> = vec![
        json!({ "id": 1, "name": "raw" }).into(),
        HalResource::from_object(json!({ "id": 2 }), "id").unwrap().into(),
        widget(3).into(),
        json!({ "sku": "no-id" }).into(),
    ];
    let collection = HalCollection::from_list(items).resource_route("widget");

    let doc = render(&collection);
    let items = doc["_embedded"]["items"].as_array().unwrap();
    assert_eq!(items[0]["_links"]["self"]["href"], "/widgets/1");
    assert_eq!(items[0]["name"], "raw");
    assert_eq!(items[1]["_links"]["self"]["href"], "/widgets/2");
    assert_eq!(items[2]["_links"]["self"]["href"], "/widgets/3");
    assert_eq!(items[3], json!({ "sku": "no-id" }));
}

#[test]
fn test_custom_identifier_name() {
    let collection = HalCollection::from_list(vec![json!({ "user_id": "ada" })])
        .resource_route("user")
        .identifier_name("user_id");

    let doc = render(&collection);
    assert_eq!(
        doc["_embedded"]["items"][0]["_links"]["self"]["href"],
        "/users/ada"
    );
}

#[test]
fn test_attributes_and_extra_links() {
    let collection = paginated(25, 1, 10)
        .with_attribute("catalog", "demo")
        .with_link(Link::from_url("self", "/widgets/custom").unwrap())
        .with_link(Link::from_url("describedby", "https://example.com/schema").unwrap());

    let document = renderer().render(&collection.into()).unwrap();
    assert!(document.body().starts_with(r#"{"catalog":"demo","page":1"#));

    let doc = body(&document);
    assert_eq!(doc["_links"]["self"]["href"], "/widgets/custom");
    assert_eq!(
        doc["_links"]["describedby"]["href"],
        "https://example.com/schema"
    );
    assert_eq!(doc["_links"]["next"]["href"], "/widgets?page=2");
}

#[test]
fn test_reserved_attribute_is_error() {
    let collection = paginated(5, 1, 10).with_attribute("_links", json!({}));

    let err = renderer().render(&collection.into()).unwrap_err();
    assert!(matches!(err, HalError::Rendering(RenderingError::ReservedKey { .. })));
}

#[test]
fn test_paging_attribute_on_paginated_collection_is_error() {
    for key in ["page", "page_count", "page_size", "total_items"] {
        let collection = paginated(5, 1, 10).with_attribute(key, 99);

        let err = renderer().render(&collection.into()).unwrap_err();
        assert!(
            matches!(&err, HalError::Rendering(RenderingError::ReservedKey { key: k }) if k == key),
            "{key}: {err:?}"
        );
    }
}

#[test]
fn test_paging_attribute_on_plain_list_is_kept() {
    let collection = HalCollection::from_list(records(2)).with_attribute("page", "front");

    let doc = render(&collection);
    assert_eq!(doc["page"], "front");
}

/// Counts slice calls to show only the requested page is fetched.
struct CountingAdapter {
    total: usize,
    counts: AtomicUsize,
    slices: std::sync::Mutex<Vec<(usize, usize)>>,
}

impl PaginatorAdapter for CountingAdapter {
    fn count(&self) -> usize {
        self.counts.fetch_add(1, Ordering::SeqCst);
        self.total
    }

    fn slice(&self, offset: usize, limit: usize) -> Vec<CollectionItem> {
        self.slices.lock().unwrap().push((offset, limit));
        (offset..(offset + limit).min(self.total))
            .map(|i| json!({ "id": i + 1 }).into())
            .collect()
    }
}

#[test]
fn test_paginator_fetches_only_requested_page() {
    let adapter = Arc::new(CountingAdapter {
        total: 1_000,
        counts: AtomicUsize::new(0),
        slices: Default::default(),
    });
    let collection = HalCollection::paginated(Paginator::new(adapter.clone()))
        .page(7)
        .page_size(25);
    assert!(matches!(collection.items(), CollectionItems::Paginated(_)));

    let doc = render(&collection);
    assert_eq!(doc["_embedded"]["items"][0]["id"], 151);
    assert_eq!(*adapter.slices.lock().unwrap(), vec![(150, 25)]);
    assert_eq!(adapter.counts.load(Ordering::SeqCst), 1);
}

#[test]
fn test_out_of_range_page_counts_once_and_fetches_nothing() {
    let adapter = Arc::new(CountingAdapter {
        total: 30,
        counts: AtomicUsize::new(0),
        slices: Default::default(),
    });
    let collection = HalCollection::paginated(Paginator::new(adapter.clone()))
        .page(4)
        .page_size(10);

    let rendered = renderer().render(&collection.into()).unwrap();
    assert_eq!(rendered.status(), 409);
    assert_eq!(adapter.counts.load(Ordering::SeqCst), 1);
    assert!(adapter.slices.lock().unwrap().is_empty());
}
