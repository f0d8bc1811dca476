use axum::http::{HeaderValue, StatusCode, header};

use windowshop_domain::role::Role;
use windowshop_testing::auth::MockAuth;

use crate::helpers::{TEST_JWT_SECRET, USERS, as_user, test_app};

/// `(path, roles allowed)` for read-only gated endpoints.
const GATES: [(&str, &[Role]); 6] = [
    ("/profile", &Role::ALL),
    ("/my-orders", &[Role::Customer]),
    ("/admin/dashboard", &[Role::Admin, Role::Superadmin]),
    ("/admin/users", &[Role::Admin, Role::Superadmin]),
    ("/admin/export", &[Role::Admin, Role::Superadmin]),
    ("/entities", &[Role::Superadmin]),
];

#[tokio::test]
async fn should_follow_role_table_for_every_role() {
    let app = test_app().await;
    for (username, role, ..) in USERS {
        for (path, allowed) in GATES {
            let (name, value) = as_user(username, role);
            let res = app.server.get(path).add_header(name, value).await;
            let expected = if allowed.contains(&role) {
                StatusCode::OK
            } else {
                StatusCode::FORBIDDEN
            };
            assert_eq!(res.status_code(), expected, "{role} on {path}");
        }
    }
}

#[tokio::test]
async fn should_deny_anonymous_everywhere() {
    let app = test_app().await;
    for (path, _) in GATES {
        let res = app.server.get(path).await;
        res.assert_status(StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = res.json();
        assert_eq!(body["kind"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn should_treat_expired_token_as_anonymous() {
    let app = test_app().await;
    let (name, value) = MockAuth::expired("superadmin", Role::Superadmin).cookie(TEST_JWT_SECRET);
    app.server
        .get("/entities")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_treat_forged_token_as_anonymous() {
    let app = test_app().await;
    let (name, value) = MockAuth::new("superadmin", Role::Superadmin).cookie("not-the-secret");
    app.server
        .get("/entities")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .get("/entities")
        .add_header(
            header::COOKIE,
            HeaderValue::from_static("access_token=garbage"),
        )
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_treat_token_for_unknown_user_as_anonymous() {
    let app = test_app().await;
    let (name, value) = as_user("ghost", Role::Superadmin);
    app.server
        .get("/admin/dashboard")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_authorize_by_token_role_not_stored_role() {
    let app = test_app().await;
    // customer1 is stored as a customer; the token claims admin.
    let (name, value) = as_user("customer1", Role::Admin);
    app.server
        .get("/admin/dashboard")
        .add_header(name, value)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn should_tag_responses_with_request_id() {
    let app = test_app().await;
    let res = app.server.get("/healthz").await;
    res.assert_status_ok();
    assert!(res.headers().contains_key("x-request-id"));
}
