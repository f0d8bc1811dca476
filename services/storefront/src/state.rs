use windowshop_core::health::ReadinessCheck;

use crate::domain::repository::Store;

/// Shared application state passed to every handler via axum `State`.
///
/// The store is built once in `main` and cloned per request.
#[derive(Clone)]
pub struct AppState<S: Store> {
    pub store: S,
    pub jwt_secret: String,
    pub token_minutes: u64,
    pub cookie_secure: bool,
}

impl<S: Store> AppState<S> {
    pub fn repo(&self) -> S {
        self.store.clone()
    }
}

impl<S: Store> ReadinessCheck for AppState<S> {
    async fn ready(&self) -> bool {
        self.store.ping().await
    }
}
