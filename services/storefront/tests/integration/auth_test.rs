use axum::http::{StatusCode, header};
use serde_json::{Value, json};

use windowshop_storefront::domain::patch::EntityPatch;
use windowshop_storefront::domain::repository::EntityRepository;
use windowshop_domain::entity::EntityKind;

use crate::helpers::{TEST_PASSWORD, test_app};

fn set_cookie(res: &axum_test::TestResponse) -> String {
    res.headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}

#[tokio::test]
async fn should_set_http_only_cookie_on_login() {
    let app = test_app().await;
    let res = app
        .server
        .post("/login")
        .form(&json!({"username": "customer1", "password": TEST_PASSWORD}))
        .await;
    res.assert_status_ok();

    let cookie = set_cookie(&res);
    assert!(cookie.starts_with("access_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=1800"));

    let body: Value = res.json();
    assert_eq!(body["user"]["username"], "customer1");
    assert_eq!(body["user"]["role"], "customer");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn should_open_session_usable_by_later_requests() {
    let app = test_app().await;
    let login = app
        .server
        .post("/login")
        .form(&json!({"username": "admin", "password": TEST_PASSWORD}))
        .await;
    let cookie = set_cookie(&login);
    let pair = cookie.split(';').next().unwrap().to_owned();

    let res = app
        .server
        .get("/profile")
        .add_header(header::COOKIE, pair.parse::<axum::http::HeaderValue>().unwrap())
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["username"], "admin");
    assert_eq!(body["full_name"], "Анна Админова");
}

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_user_alike() {
    let app = test_app().await;
    for (username, password) in [("customer1", "wrong-password"), ("nobody", TEST_PASSWORD)] {
        let res = app
            .server
            .post("/login")
            .form(&json!({"username": username, "password": password}))
            .await;
        res.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = res.json();
        assert_eq!(body["kind"], "INVALID_CREDENTIALS");
        assert!(set_cookie(&res).is_empty());
    }
}

#[tokio::test]
async fn should_refuse_inactive_user() {
    let app = test_app().await;
    let mut fields = std::collections::BTreeMap::new();
    fields.insert("is_active".to_owned(), "false".to_owned());
    let patch = EntityPatch::from_fields(EntityKind::Users, &fields).unwrap();
    app.store.update_document("customer2", &patch).await.unwrap();

    let res = app
        .server
        .post("/login")
        .form(&json!({"username": "customer2", "password": TEST_PASSWORD}))
        .await;
    res.assert_status(StatusCode::FORBIDDEN);
    let body: Value = res.json();
    assert_eq!(body["kind"], "USER_INACTIVE");
}

#[tokio::test]
async fn should_clear_cookie_on_logout() {
    let app = test_app().await;
    let res = app.server.post("/logout").await;
    res.assert_status(StatusCode::NO_CONTENT);
    let cookie = set_cookie(&res);
    assert!(cookie.starts_with("access_token=;"));
    assert!(cookie.contains("Max-Age=0"));
}
