use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use chrono::Utc;

use windowshop_domain::role::Role;
use windowshop_storefront::domain::repository::{BackupRepository, UserRepository};
use windowshop_storefront::domain::types::{Backup, User};
use windowshop_storefront::infra::memory::MemoryStore;
use windowshop_storefront::infra::password::hash_password;
use windowshop_storefront::router::build_router;
use windowshop_storefront::state::AppState;
use windowshop_testing::auth::MockAuth;
use windowshop_testing::fixture::Fixture;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-integration-tests";
pub const TEST_PASSWORD: &str = "okna-2026";
pub const CATALOG_FIXTURE: &str = "services/storefront/tests/fixtures/catalog.json";
pub const CATALOG_SIZE: usize = 4;

/// `(key/username, role, first name, last name, phone)`
pub const USERS: [(&str, Role, &str, &str, &str); 5] = [
    ("customer1", Role::Customer, "Иван", "Петров", "+79110000001"),
    ("customer2", Role::Customer, "Мария", "Сидорова", "+79110000002"),
    ("measurer1", Role::Measurer, "Олег", "Замеров", "+79110000003"),
    ("admin", Role::Admin, "Анна", "Админова", "+79110000004"),
    ("superadmin", Role::Superadmin, "Алексей", "Главный", "+79110000005"),
];

pub struct TestApp {
    pub server: TestServer,
    pub store: MemoryStore,
}

/// Server over an in-memory store holding the catalog fixture and [`USERS`].
pub async fn test_app() -> TestApp {
    let store = MemoryStore::new();
    let catalog: Backup = serde_json::from_value(Fixture::load(CATALOG_FIXTURE)).unwrap();
    store.import_all(&catalog).await.unwrap();

    let password_hash = hash_password(TEST_PASSWORD).unwrap();
    for (key, role, first_name, last_name, phone) in USERS {
        store
            .create_user(&User {
                key: key.to_owned(),
                username: key.to_owned(),
                password_hash: password_hash.clone(),
                role,
                first_name: first_name.to_owned(),
                last_name: last_name.to_owned(),
                phone_number: phone.to_owned(),
                is_active: true,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
    }

    let state = AppState {
        store: store.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_minutes: 30,
        cookie_secure: false,
    };
    let server = TestServer::new(build_router(state)).unwrap();
    TestApp { server, store }
}

/// Cookie header authenticating as `username` with `role` asserted by the token.
pub fn as_user(username: &str, role: Role) -> (HeaderName, HeaderValue) {
    MockAuth::new(username, role).cookie(TEST_JWT_SECRET)
}

pub fn as_customer() -> (HeaderName, HeaderValue) {
    as_user("customer1", Role::Customer)
}

pub fn as_admin() -> (HeaderName, HeaderValue) {
    as_user("admin", Role::Admin)
}

pub fn as_superadmin() -> (HeaderName, HeaderValue) {
    as_user("superadmin", Role::Superadmin)
}

/// Keys of the `products` array in a JSON response, in order.
pub fn product_keys(body: &serde_json::Value) -> Vec<String> {
    body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["key"].as_str().unwrap().to_owned())
        .collect()
}
