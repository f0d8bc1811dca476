use axum::http::StatusCode;
use serde_json::Value;

use crate::helpers::{CATALOG_SIZE, as_admin, as_customer, product_keys, test_app};

// ── GET /products ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_whole_catalog_without_filters() {
    let app = test_app().await;
    let res = app.server.get("/products").await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(product_keys(&body).len(), CATALOG_SIZE);
    assert!(body["applied"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn should_match_text_case_insensitively() {
    let app = test_app().await;
    let body: Value = app
        .server
        .get("/products")
        .add_query_param("name", "пвх")
        .await
        .json();
    assert_eq!(product_keys(&body), ["prod1", "prod2"]);

    let body: Value = app
        .server
        .get("/products")
        .add_query_param("name", "ПРЕМИУМ")
        .await
        .json();
    assert_eq!(product_keys(&body), ["prod2"]);
}

#[tokio::test]
async fn should_treat_price_bounds_as_inclusive() {
    let app = test_app().await;
    let body: Value = app
        .server
        .get("/products")
        .add_query_param("min_price", "12500")
        .add_query_param("max_price", "21500")
        .await
        .json();
    assert_eq!(product_keys(&body), ["prod1", "prod2"]);

    let body: Value = app
        .server
        .get("/products")
        .add_query_param("min_price", "12500.01")
        .add_query_param("max_price", "21499.99")
        .await
        .json();
    assert!(product_keys(&body).is_empty());
}

#[tokio::test]
async fn should_ignore_unusable_parameters() {
    let app = test_app().await;
    let body: Value = app
        .server
        .get("/products")
        .add_query_param("min_price", "дёшево")
        .add_query_param("in_stock", "yes")
        .add_query_param("color", "   ")
        .await
        .json();
    assert_eq!(product_keys(&body).len(), CATALOG_SIZE);
    assert_eq!(body["filters"]["min_price"], "дёшево");
    assert!(body["applied"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn should_combine_constraints_and_echo_them() {
    let app = test_app().await;
    let body: Value = app
        .server
        .get("/products")
        .add_query_param("material", " ПВХ ")
        .add_query_param("min_width", "1.3")
        .add_query_param("in_stock", "on")
        .await
        .json();
    assert_eq!(product_keys(&body), ["prod2"]);
    assert_eq!(body["filters"]["material"], " ПВХ ");
    assert_eq!(body["applied"]["material"], "пвх");
    assert_eq!(body["applied"]["in_stock"], "on");
}

#[tokio::test]
async fn should_give_same_result_when_applied_filter_is_resubmitted() {
    let app = test_app().await;
    let first: Value = app
        .server
        .get("/products")
        .add_query_param("description", "Окно")
        .add_query_param("max_height", "1.55")
        .add_query_param("in_stock", "on")
        .await
        .json();

    let mut again = app.server.get("/products");
    for (k, v) in first["applied"].as_object().unwrap() {
        again = again.add_query_param(k, v.as_str().unwrap());
    }
    let second: Value = again.await.json();
    assert_eq!(first["applied"], second["applied"]);
    assert_eq!(product_keys(&first), product_keys(&second));
}

// ── GET /order/new ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_offer_only_in_stock_products_to_customers() {
    let app = test_app().await;
    let (name, value) = as_customer();
    let res = app.server.get("/order/new").add_header(name, value).await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(product_keys(&body), ["prod1", "prod2", "prod4"]);
}

#[tokio::test]
async fn should_keep_order_form_away_from_non_customers() {
    let app = test_app().await;
    app.server
        .get("/order/new")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let (name, value) = as_admin();
    app.server
        .get("/order/new")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
