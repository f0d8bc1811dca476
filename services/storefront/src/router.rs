use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use windowshop_core::health::{healthz, readyz};
use windowshop_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::domain::repository::Store;
use crate::handlers::{
    admin::{
        change_role, create_product, create_user, dashboard, list_orders, list_products,
        list_users,
    },
    auth::{login, logout, profile},
    backup::{export_all, import_all},
    entity::{get_entity, list_entities, list_kinds, update_entity},
    health::api_health,
    order::{create_order, my_orders},
    product::{order_form, search_products},
};
use crate::state::AppState;

pub fn build_router<S: Store>(state: AppState<S>) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz::<AppState<S>>))
        .route("/api/health", get(api_health::<S>))
        // Session
        .route("/login", post(login::<S>))
        .route("/logout", post(logout))
        .route("/profile", get(profile::<S>))
        // Catalog and orders
        .route("/products", get(search_products::<S>))
        .route("/order/new", get(order_form::<S>))
        .route("/order/create", post(create_order::<S>))
        .route("/my-orders", get(my_orders::<S>))
        // Admin
        .route("/admin/dashboard", get(dashboard::<S>))
        .route("/admin/users", get(list_users::<S>).post(create_user::<S>))
        .route("/admin/users/{key}/change-role", post(change_role::<S>))
        .route(
            "/admin/products",
            get(list_products::<S>).post(create_product::<S>),
        )
        .route("/admin/orders", get(list_orders::<S>))
        .route("/admin/export", get(export_all::<S>))
        .route("/admin/import", post(import_all::<S>))
        // Generic entities
        .route("/entities", get(list_kinds))
        .route("/entities/{type}", get(list_entities::<S>))
        .route("/entities/{type}/{key}", get(get_entity::<S>))
        .route("/entities/{type}/{key}/edit", post(update_entity::<S>))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}
