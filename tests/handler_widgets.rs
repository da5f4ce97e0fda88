mod common;

use axum::Router;
use axum::http::StatusCode;
use axum_test::TestServer;
use hal_renderer::api::handlers::not_found_handler;
use hal_renderer::api::routes::public_routes;
use hal_renderer::state::AppState;
use serde_json::{Value, json};

fn server_with(state: AppState) -> TestServer {
    let app: Router = public_routes()
        .fallback(not_found_handler)
        .with_state(state);
    TestServer::new(app).unwrap()
}

fn server() -> TestServer {
    server_with(common::create_test_state())
}

#[tokio::test]
async fn test_widget_list_first_page() {
    let response = server().get("/widgets").await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "application/hal+json");

    let json = response.json::<Value>();
    assert_eq!(json["catalog"], "demo");
    assert_eq!(json["page"], 1);
    assert_eq!(json["page_size"], 10);
    assert_eq!(json["page_count"], 3);
    assert_eq!(json["total_items"], 25);

    let links = &json["_links"];
    assert_eq!(links["self"]["href"], "/widgets?page=1&page_size=10");
    assert_eq!(links["first"]["href"], "/widgets?page=1&page_size=10");
    assert_eq!(links["last"]["href"], "/widgets?page=3&page_size=10");
    assert_eq!(links["next"]["href"], "/widgets?page=2&page_size=10");
    assert!(links.get("prev").is_none());
    assert_eq!(
        links["search"],
        json!({ "href": "/widgets{?page,page_size}", "templated": true, "title": "Browse widgets" })
    );

    let items = json["_embedded"]["widgets"].as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(
        items[0],
        json!({
            "id": 1,
            "name": "Widget 1",
            "color": "red",
            "_links": { "self": { "href": "/widgets/1" } }
        })
    );
}

#[tokio::test]
async fn test_widget_list_last_page() {
    let response = server()
        .get("/widgets")
        .add_query_param("page", 3)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["_links"]["prev"]["href"], "/widgets?page=2&page_size=10");
    assert!(json["_links"].get("next").is_none());
    assert_eq!(json["_embedded"]["widgets"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_widget_list_custom_page_size() {
    let response = server()
        .get("/widgets")
        .add_query_param("page", 2)
        .add_query_param("page_size", 20)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["page_count"], 2);
    assert_eq!(json["_links"]["self"]["href"], "/widgets?page=2&page_size=20");
    assert_eq!(json["_embedded"]["widgets"][0]["id"], 21);
}

#[tokio::test]
async fn test_widget_list_page_out_of_range() {
    let response = server()
        .get("/widgets")
        .add_query_param("page", 4)
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.header("content-type"), "application/problem+json");

    let json = response.json::<Value>();
    assert_eq!(json["status"], 409);
    assert_eq!(json["title"], "Conflict");
    assert_eq!(json["detail"], "Invalid page provided");
}

#[tokio::test]
async fn test_widget_list_page_zero() {
    let response = server()
        .get("/widgets")
        .add_query_param("page", 0)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["detail"], "Invalid pagination parameters");
    assert_eq!(
        json["validation_messages"],
        json!([{ "field": "page", "message": "Page must be greater than 0" }])
    );
}

#[tokio::test]
async fn test_widget_list_page_size_too_large() {
    let response = server()
        .get("/widgets")
        .add_query_param("page_size", 500)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["validation_messages"][0]["field"], "page_size");
}

#[tokio::test]
async fn test_widget_list_unparseable_page() {
    let response = server()
        .get("/widgets")
        .add_query_param("page", "two")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.header("content-type"), "application/problem+json");
    assert_eq!(response.json::<Value>()["status"], 400);
}

#[tokio::test]
async fn test_widget_with_embedded_manufacturer() {
    let response = server().get("/widgets/4").await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "application/hal+json");
    assert_eq!(
        response.json::<Value>(),
        json!({
            "id": 4,
            "name": "Widget 4",
            "color": "black",
            "manufacturer_id": 1,
            "_links": {
                "self": { "href": "/widgets/4" },
                "manufacturer": { "href": "/manufacturers/1" },
                "collection": {
                    "href": "https://api.example.com/widgets",
                    "title": "All widgets"
                }
            },
            "_embedded": {
                "manufacturer": {
                    "id": 1,
                    "name": "Acme Corporation",
                    "country": "US",
                    "_links": { "self": { "href": "/manufacturers/1" } }
                }
            }
        })
    );
}

#[tokio::test]
async fn test_widget_links_only_embeds() {
    let mut config = common::test_config();
    config.render_embedded = false;
    let response = server_with(common::create_state_with(config))
        .get("/widgets/2")
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["_embedded"]["manufacturer"],
        json!({ "_links": { "self": { "href": "/manufacturers/2" } } })
    );
}

#[tokio::test]
async fn test_widget_not_found() {
    let response = server().get("/widgets/999").await;

    response.assert_status_not_found();
    assert_eq!(response.header("content-type"), "application/problem+json");
    let json = response.json::<Value>();
    assert_eq!(json["detail"], "Widget 999 not found");
    assert_eq!(json["type"], "about:blank");
    assert!(json.get("trace").is_none());
}

#[tokio::test]
async fn test_widget_invalid_id() {
    let response = server().get("/widgets/abc").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.header("content-type"), "application/problem+json");
}

#[tokio::test]
async fn test_manufacturer() {
    let response = server().get("/manufacturers/2").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["name"], "Globex");
    assert_eq!(json["_links"]["self"]["href"], "/manufacturers/2");

    server()
        .get("/manufacturers/42")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_unknown_path_is_problem() {
    let response = server().get("/gadgets").await;

    response.assert_status_not_found();
    assert_eq!(response.header("content-type"), "application/problem+json");
    assert_eq!(response.json::<Value>()["detail"], "No resource at /gadgets");
}

#[tokio::test]
async fn test_pretty_json_config() {
    let mut config = common::test_config();
    config.pretty_json = true;
    let response = server_with(common::create_state_with(config))
        .get("/widgets/1")
        .await;

    response.assert_status_ok();
    assert!(response.text().starts_with("{\n  \"id\": 1,"));
}
