use axum::http::StatusCode;
use serde_json::{Value, json};

use windowshop_domain::role::Role;
use windowshop_storefront::domain::repository::UserRepository;

use crate::helpers::{CATALOG_SIZE, USERS, as_admin, as_superadmin, test_app};

// ── POST /admin/users/{key}/change-role ──────────────────────────────────────

#[tokio::test]
async fn should_reject_own_role_change_and_keep_role() {
    let app = test_app().await;
    let (name, value) = as_superadmin();
    let res = app
        .server
        .post("/admin/users/superadmin/change-role")
        .add_header(name, value)
        .json(&json!({"new_role": "customer"}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["kind"], "SELF_ROLE_CHANGE");

    let stored = app.store.find_user("superadmin").await.unwrap().unwrap();
    assert_eq!(stored.role, Role::Superadmin);
}

#[tokio::test]
async fn should_change_another_users_role() {
    let app = test_app().await;
    let (name, value) = as_superadmin();
    let res = app
        .server
        .post("/admin/users/customer2/change-role")
        .add_header(name, value)
        .json(&json!({"new_role": "measurer"}))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body, json!({"status": "ok", "new_role": "measurer"}));

    let stored = app.store.find_user("customer2").await.unwrap().unwrap();
    assert_eq!(stored.role, Role::Measurer);
}

#[tokio::test]
async fn should_explain_rejected_role_changes() {
    let app = test_app().await;
    let cases = [
        ("customer2", json!({}), StatusCode::BAD_REQUEST, "MISSING_DATA"),
        ("customer2", json!({"new_role": "owner"}), StatusCode::BAD_REQUEST, "INVALID_ROLE"),
        ("nobody", json!({"new_role": "admin"}), StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
    ];
    for (target, body, status, kind) in cases {
        let (name, value) = as_superadmin();
        let res = app
            .server
            .post(&format!("/admin/users/{target}/change-role"))
            .add_header(name, value)
            .json(&body)
            .await;
        res.assert_status(status);
        let got: Value = res.json();
        assert_eq!(got["kind"], kind, "{target} {body}");
    }
}

#[tokio::test]
async fn should_reserve_role_changes_for_superadmin() {
    let app = test_app().await;
    let (name, value) = as_admin();
    app.server
        .post("/admin/users/customer2/change-role")
        .add_header(name, value)
        .json(&json!({"new_role": "admin"}))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    let stored = app.store.find_user("customer2").await.unwrap().unwrap();
    assert_eq!(stored.role, Role::Customer);
}

// ── POST /admin/products ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_product_with_defaults() {
    let app = test_app().await;
    let (name, value) = as_admin();
    let res = app
        .server
        .post("/admin/products")
        .add_header(name, value)
        .form(&json!({
            "name": "Мансардное окно",
            "width": "0.78",
            "height": "1.18",
            "material": "Дерево",
            "price": "41990"
        }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let product: Value = res.json();
    assert_eq!(product["color"], "белый");
    assert_eq!(product["in_stock"], true);
    assert_eq!(product["price"], 41990.0);

    let body: Value = app.server.get("/products").await.json();
    assert_eq!(body["products"].as_array().unwrap().len(), CATALOG_SIZE + 1);
}

#[tokio::test]
async fn should_echo_input_when_product_is_invalid() {
    let app = test_app().await;
    let (name, value) = as_admin();
    let res = app
        .server
        .post("/admin/products")
        .add_header(name, value)
        .form(&json!({"name": "", "width": "-1", "height": "abc", "price": "0"}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["kind"], "VALIDATION");
    for field in ["name", "width", "height", "price"] {
        assert!(body["fields"][field].is_string(), "{field} must be reported");
    }
    assert_eq!(body["input"]["height"], "abc");
}

// ── POST /admin/users ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_user_without_leaking_password() {
    let app = test_app().await;
    let (name, value) = as_superadmin();
    let res = app
        .server
        .post("/admin/users")
        .add_header(name, value)
        .form(&json!({
            "username": "measurer2",
            "password": "zamer-2026",
            "role": "measurer",
            "first_name": "Пётр",
            "last_name": "Рулеткин",
            "phone_number": "+79110000042"
        }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let body: Value = res.json();
    assert_eq!(body["role"], "measurer");
    assert!(body.get("password_hash").is_none());
    assert!(!body.to_string().contains("zamer-2026"));

    let login = app
        .server
        .post("/login")
        .form(&json!({"username": "measurer2", "password": "zamer-2026"}))
        .await;
    login.assert_status_ok();
}

#[tokio::test]
async fn should_reject_duplicate_username() {
    let app = test_app().await;
    let (name, value) = as_superadmin();
    let res = app
        .server
        .post("/admin/users")
        .add_header(name, value)
        .form(&json!({
            "username": "customer1",
            "password": "another-one",
            "phone_number": "+79119999999"
        }))
        .await;
    res.assert_status(StatusCode::CONFLICT);
    let body: Value = res.json();
    assert_eq!(body["kind"], "USER_ALREADY_EXISTS");
}

#[tokio::test]
async fn should_not_echo_password_on_validation_error() {
    let app = test_app().await;
    let (name, value) = as_superadmin();
    let res = app
        .server
        .post("/admin/users")
        .add_header(name, value)
        .form(&json!({"username": "x", "password": "123", "phone_number": ""}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert!(body["fields"]["password"].is_string());
    assert!(body["input"].get("password").is_none());
    assert_eq!(body["input"]["username"], "x");
}

// ── Listings and dashboard ───────────────────────────────────────────────────

#[tokio::test]
async fn should_count_collections_on_dashboard() {
    let app = test_app().await;
    let (name, value) = as_admin();
    let body: Value = app
        .server
        .get("/admin/dashboard")
        .add_header(name, value)
        .await
        .json();
    assert_eq!(body["counts"]["products"], CATALOG_SIZE);
    assert_eq!(body["counts"]["users"], USERS.len());
    assert_eq!(body["counts"]["orders"], 0);
    assert_eq!(body["user"]["full_name"], "Анна Админова");
}

#[tokio::test]
async fn should_list_users_without_password_hashes() {
    let app = test_app().await;
    let (name, value) = as_admin();
    let body: Value = app
        .server
        .get("/admin/users")
        .add_header(name, value)
        .await
        .json();
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), USERS.len());
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}
