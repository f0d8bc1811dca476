use axum::http::StatusCode;
use serde_json::{Value, json};

use windowshop_domain::role::Role;
use windowshop_storefront::domain::repository::{ProductRepository, UserRepository};

use crate::helpers::{CATALOG_SIZE, USERS, as_admin, as_customer, as_superadmin, test_app};

#[tokio::test]
async fn should_list_the_closed_set_of_kinds() {
    let app = test_app().await;
    let (name, value) = as_superadmin();
    let res = app.server.get("/entities").add_header(name, value).await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(
        body["entities"],
        json!(["users", "products", "orders", "measurements", "photos"])
    );
}

#[tokio::test]
async fn should_reject_unsupported_kind() {
    let app = test_app().await;
    for path in ["/entities/invoices", "/entities/invoices/x"] {
        let (name, value) = as_superadmin();
        let res = app.server.get(path).add_header(name, value).await;
        res.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = res.json();
        assert_eq!(body["kind"], "UNSUPPORTED_ENTITY");
    }
}

#[tokio::test]
async fn should_tell_missing_document_from_unsupported_kind() {
    let app = test_app().await;
    let (name, value) = as_superadmin();
    let res = app
        .server
        .get("/entities/products/nope")
        .add_header(name, value)
        .await;
    res.assert_status(StatusCode::NOT_FOUND);
    let body: Value = res.json();
    assert_eq!(body["kind"], "ENTITY_NOT_FOUND");
}

#[tokio::test]
async fn should_list_documents_without_password_hashes() {
    let app = test_app().await;
    let (name, value) = as_superadmin();
    let res = app
        .server
        .get("/entities/users")
        .add_header(name, value)
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["entity_type"], "users");
    let docs = body["documents"].as_array().unwrap();
    assert_eq!(docs.len(), USERS.len());
    assert!(docs.iter().all(|d| d.get("password_hash").is_none()));

    let (name, value) = as_superadmin();
    let res = app
        .server
        .get("/entities/products")
        .add_header(name, value)
        .await;
    let body: Value = res.json();
    assert_eq!(body["documents"].as_array().unwrap().len(), CATALOG_SIZE);
}

#[tokio::test]
async fn should_update_only_submitted_fields() {
    let app = test_app().await;
    let before = app.store.find_product("prod2").await.unwrap().unwrap();

    let (name, value) = as_superadmin();
    let res = app
        .server
        .post("/entities/products/prod2/edit")
        .add_header(name, value)
        .form(&json!({"price": "19900", "color": "антрацит"}))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["price"], 19900.0);
    assert_eq!(body["color"], "антрацит");

    let after = app.store.find_product("prod2").await.unwrap().unwrap();
    assert_eq!(after.price, 19900.0);
    assert_eq!(after.name, before.name);
    assert_eq!(after.width, before.width);
    assert_eq!(after.material, before.material);
    assert_eq!(after.in_stock, before.in_stock);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn should_report_invalid_fields_and_leave_document_untouched() {
    let app = test_app().await;
    let (name, value) = as_superadmin();
    let res = app
        .server
        .post("/entities/products/prod1/edit")
        .add_header(name, value)
        .form(&json!({"price": "-5", "width": "wide", "name": ""}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["kind"], "VALIDATION");
    for field in ["price", "width", "name"] {
        assert!(body["fields"][field].is_string(), "{field} must be reported");
    }
    assert_eq!(body["input"]["width"], "wide");

    let prod1 = app.store.find_product("prod1").await.unwrap().unwrap();
    assert_eq!(prod1.price, 12500.0);
}

#[tokio::test]
async fn should_refuse_to_edit_own_role() {
    let app = test_app().await;
    let (name, value) = as_superadmin();
    let res = app
        .server
        .post("/entities/users/superadmin/edit")
        .add_header(name, value)
        .form(&json!({"role": "customer", "first_name": "Алёша"}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["kind"], "SELF_ROLE_CHANGE");

    let me = app.store.find_user("superadmin").await.unwrap().unwrap();
    assert_eq!(me.role, Role::Superadmin);
    assert_eq!(me.first_name, "Алексей");
}

#[tokio::test]
async fn should_allow_editing_own_profile_fields() {
    let app = test_app().await;
    let (name, value) = as_superadmin();
    let res = app
        .server
        .post("/entities/users/superadmin/edit")
        .add_header(name, value)
        .form(&json!({"first_name": "Алёша"}))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["full_name"], "Алёша Главный");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn should_recompute_total_when_quantity_changes() {
    let app = test_app().await;
    let (name, value) = as_customer();
    let order: Value = app
        .server
        .post("/order/create")
        .add_header(name, value)
        .form(&json!({"product_id": "prod1", "quantity": "1", "address": "г. Тверь"}))
        .await
        .json();
    let key = order["key"].as_str().unwrap();

    let (name, value) = as_superadmin();
    let res = app
        .server
        .post(&format!("/entities/orders/{key}/edit"))
        .add_header(name, value)
        .form(&json!({"quantity": "3", "status": "in_progress"}))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["quantity"], 3);
    assert_eq!(body["total_price"], 37500.0);
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["address"], "г. Тверь");
}

#[tokio::test]
async fn should_reserve_entity_editor_for_superadmin() {
    let app = test_app().await;
    let (name, value) = as_admin();
    app.server
        .get("/entities/products")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    app.server
        .get("/entities")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_keep_both_edits_of_different_fields() {
    let app = test_app().await;
    for form in [json!({"price": "19900"}), json!({"color": "антрацит"})] {
        let (name, value) = as_superadmin();
        app.server
            .post("/entities/products/prod2/edit")
            .add_header(name, value)
            .form(&form)
            .await
            .assert_status_ok();
    }
    let prod2 = app.store.find_product("prod2").await.unwrap().unwrap();
    assert_eq!(prod2.price, 19900.0);
    assert_eq!(prod2.color, "антрацит");
}
