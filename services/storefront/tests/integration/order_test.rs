use axum::http::StatusCode;
use serde_json::{Value, json};

use windowshop_domain::entity::EntityRef;
use windowshop_domain::role::Role;
use windowshop_storefront::domain::repository::{EdgeRepository, OrderRepository};
use windowshop_storefront::domain::types::EdgeCollection;

use crate::helpers::{as_customer, as_user, test_app};

#[tokio::test]
async fn should_create_order_with_total_status_and_edges() {
    let app = test_app().await;
    let (name, value) = as_customer();
    let res = app
        .server
        .post("/order/create")
        .add_header(name, value)
        .form(&json!({
            "product_id": "prod1",
            "quantity": "2",
            "address": "г. Москва, ул. Тверская, 1",
            "comments": "Позвонить за час"
        }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let order: Value = res.json();
    assert_eq!(order["total_price"], 25000.0);
    assert_eq!(order["product_price"], 12500.0);
    assert_eq!(order["status"], "new");
    assert_eq!(order["customer_id"], "customer1");
    assert_eq!(order["customer_name"], "Иван Петров");
    let order_key = order["key"].as_str().unwrap();

    let created = app
        .store
        .list_edges(EdgeCollection::UserOrders)
        .await
        .unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].from, EntityRef::user("customer1"));
    assert_eq!(created[0].to, EntityRef::order(order_key));
    assert_eq!(created[0].edge_type, "created");

    let contains = app
        .store
        .list_edges(EdgeCollection::ContainProduct)
        .await
        .unwrap();
    assert_eq!(contains.len(), 1);
    assert_eq!(contains[0].from, EntityRef::order(order_key));
    assert_eq!(contains[0].to, EntityRef::product("prod1"));
}

#[tokio::test]
async fn should_default_quantity_to_one() {
    let app = test_app().await;
    let (name, value) = as_customer();
    let order: Value = app
        .server
        .post("/order/create")
        .add_header(name, value)
        .form(&json!({"product_id": "prod4", "address": "СПб, Невский пр., 10"}))
        .await
        .json();
    assert_eq!(order["quantity"], 1);
    assert_eq!(order["total_price"], 27800.0);
    assert!(order["comments"].is_null());
}

#[tokio::test]
async fn should_report_every_invalid_field_and_echo_input() {
    let app = test_app().await;
    let (name, value) = as_customer();
    let res = app
        .server
        .post("/order/create")
        .add_header(name, value)
        .form(&json!({"product_id": "prod1", "quantity": "0", "address": "  "}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert!(body["fields"]["quantity"].is_string());
    assert!(body["fields"]["address"].is_string());
    assert_eq!(body["input"]["quantity"], "0");
    assert_eq!(app.store.count_orders().await.unwrap(), 0);
}

#[tokio::test]
async fn should_reject_unknown_product() {
    let app = test_app().await;
    let (name, value) = as_customer();
    let res = app
        .server
        .post("/order/create")
        .add_header(name, value)
        .form(&json!({"product_id": "prod999", "quantity": "1", "address": "Казань"}))
        .await;
    res.assert_status(StatusCode::NOT_FOUND);
    let body: Value = res.json();
    assert_eq!(body["kind"], "PRODUCT_NOT_FOUND");
    assert!(
        app.store
            .list_edges(EdgeCollection::UserOrders)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn should_only_let_customers_order() {
    let app = test_app().await;
    let form = json!({"product_id": "prod1", "quantity": "1", "address": "Тула"});
    app.server
        .post("/order/create")
        .form(&form)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let (name, value) = as_user("measurer1", Role::Measurer);
    app.server
        .post("/order/create")
        .add_header(name, value)
        .form(&form)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_list_own_orders_newest_first() {
    let app = test_app().await;
    for product in ["prod1", "prod2"] {
        let (name, value) = as_customer();
        app.server
            .post("/order/create")
            .add_header(name, value)
            .form(&json!({"product_id": product, "address": "Тверь"}))
            .await
            .assert_status(StatusCode::CREATED);
    }
    let (name, value) = as_user("customer2", Role::Customer);
    app.server
        .post("/order/create")
        .add_header(name, value)
        .form(&json!({"product_id": "prod4", "address": "Псков"}))
        .await
        .assert_status(StatusCode::CREATED);

    let (name, value) = as_customer();
    let orders: Value = app.server.get("/my-orders").add_header(name, value).await.json();
    let products: Vec<&str> = orders
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["product_id"].as_str().unwrap())
        .collect();
    assert_eq!(products, ["prod2", "prod1"]);
}

#[tokio::test]
async fn should_reject_quantity_beyond_storable_range() {
    let app = test_app().await;
    let (name, value) = as_customer();
    let res = app
        .server
        .post("/order/create")
        .add_header(name, value)
        .form(&json!({
            "product_id": "prod1",
            "quantity": "3000000000",
            "address": "г. Москва, ул. Тверская, 1"
        }))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert!(body["fields"]["quantity"].is_string());
    assert!(app.store.list_orders().await.unwrap().is_empty());
}
