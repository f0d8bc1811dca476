use axum::http::{StatusCode, header};
use serde_json::{Value, json};

use windowshop_storefront::domain::repository::ProductRepository;

use crate::helpers::{CATALOG_SIZE, USERS, as_admin, as_customer, test_app};

#[tokio::test]
async fn should_export_every_collection_as_attachment() {
    let app = test_app().await;
    let (name, value) = as_admin();
    let res = app.server.get("/admin/export").add_header(name, value).await;
    res.assert_status_ok();

    let disposition = res
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(disposition.starts_with("attachment; filename=\"windowshop-backup-"));

    let body: Value = res.json();
    assert_eq!(body["products"].as_array().unwrap().len(), CATALOG_SIZE);
    assert_eq!(body["users"].as_array().unwrap().len(), USERS.len());
    assert_eq!(body["orders"].as_array().unwrap().len(), 0);
    assert_eq!(body["measurements"].as_array().unwrap().len(), 1);
    assert_eq!(body["photos"].as_array().unwrap().len(), 1);
    // Backups carry hashes so accounts survive a restore.
    assert!(body["users"][0]["password_hash"].is_string());
}

#[tokio::test]
async fn should_overwrite_and_insert_on_import() {
    let app = test_app().await;
    let (name, value) = as_admin();
    let res = app
        .server
        .post("/admin/import")
        .add_header(name, value)
        .json(&json!({
            "products": [
                {"_key": "prod1", "name": "Окно ПВХ Стандарт+", "width": 1.2, "height": 1.5,
                 "material": "ПВХ", "color": "белый", "price": 13100.0, "in_stock": false},
                {"_key": "prod9", "name": "Витраж", "width": 3.0, "height": 2.5,
                 "material": "Алюминий", "color": "чёрный", "price": 99000.0}
            ]
        }))
        .await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["imported"]["products"], 2);
    assert_eq!(body["imported"]["users"], 0);

    let prod1 = app.store.find_product("prod1").await.unwrap().unwrap();
    assert_eq!(prod1.price, 13100.0);
    assert!(!prod1.in_stock);
    assert!(app.store.find_product("prod9").await.unwrap().is_some());
    assert_eq!(app.store.count_products().await.unwrap(), CATALOG_SIZE as u64 + 1);
}

#[tokio::test]
async fn should_reject_malformed_bundle() {
    let app = test_app().await;
    let (name, value) = as_admin();
    let res = app
        .server
        .post("/admin/import")
        .add_header(name, value)
        .bytes("{\"products\": \"nope\"}".into())
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = res.json();
    assert_eq!(body["kind"], "INVALID_IMPORT");
    assert_eq!(app.store.count_products().await.unwrap(), CATALOG_SIZE as u64);
}

#[tokio::test]
async fn should_keep_backups_away_from_customers() {
    let app = test_app().await;
    let (name, value) = as_customer();
    app.server
        .get("/admin/export")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_report_health_with_counts() {
    let app = test_app().await;
    let res = app.server.get("/api/health").await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["counts"]["products"], CATALOG_SIZE);

    app.server.get("/readyz").await.assert_status_ok();
}
