use std::collections::BTreeMap;

use axum::{
    Form, Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use windowshop_domain::role::Role;

use crate::domain::access::{STAFF, SUPERADMIN};
use crate::domain::repository::Store;
use crate::domain::types::{CollectionCounts, Order, Product};
use crate::error::StorefrontError;
use crate::extract::MaybeUser;
use crate::handlers::view::UserView;
use crate::state::AppState;
use crate::usecase::dashboard::CountCollectionsUseCase;
use crate::usecase::order::ListOrdersUseCase;
use crate::usecase::product::{CreateProductInput, CreateProductUseCase, ListProductsUseCase};
use crate::usecase::user::{
    ChangeUserRoleUseCase, CreateUserInput, CreateUserUseCase, ListUsersUseCase,
};

// ── GET /admin/dashboard ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct DashboardResponse {
    pub user: UserSummary,
    pub counts: CollectionCounts,
}

#[derive(Serialize)]
pub struct UserSummary {
    pub username: String,
    pub full_name: String,
    pub role: Role,
}

pub async fn dashboard<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
) -> Result<Json<DashboardResponse>, StorefrontError> {
    let current = user.require(STAFF)?;
    let usecase = CountCollectionsUseCase { repo: state.repo() };
    Ok(Json(DashboardResponse {
        user: UserSummary {
            username: current.username.clone(),
            full_name: current.full_name(),
            role: current.role,
        },
        counts: usecase.execute().await?,
    }))
}

// ── GET /admin/users | /admin/products | /admin/orders ───────────────────────

pub async fn list_users<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<UserView>>, StorefrontError> {
    user.require(STAFF)?;
    let usecase = ListUsersUseCase { repo: state.repo() };
    let users = usecase.execute().await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

pub async fn list_products<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Product>>, StorefrontError> {
    user.require(STAFF)?;
    let usecase = ListProductsUseCase { repo: state.repo() };
    Ok(Json(usecase.execute().await?))
}

pub async fn list_orders<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Order>>, StorefrontError> {
    user.require(STAFF)?;
    let usecase = ListOrdersUseCase {
        orders: state.repo(),
    };
    Ok(Json(usecase.execute().await?))
}

// ── POST /admin/products ─────────────────────────────────────────────────────

pub async fn create_product<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
    Form(form): Form<BTreeMap<String, String>>,
) -> Result<(StatusCode, Json<Product>), StorefrontError> {
    user.require(STAFF)?;
    let input = CreateProductInput::parse(&form)?;
    let usecase = CreateProductUseCase { repo: state.repo() };
    Ok((StatusCode::CREATED, Json(usecase.execute(input).await?)))
}

// ── POST /admin/users ────────────────────────────────────────────────────────

pub async fn create_user<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
    Form(form): Form<BTreeMap<String, String>>,
) -> Result<(StatusCode, Json<UserView>), StorefrontError> {
    user.require(SUPERADMIN)?;
    let input = CreateUserInput::parse(&form)?;
    let usecase = CreateUserUseCase { repo: state.repo() };
    let created = usecase.execute(input).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

// ── POST /admin/users/{key}/change-role ──────────────────────────────────────

#[derive(Default, Deserialize)]
pub struct ChangeRoleRequest {
    #[serde(default)]
    pub new_role: Option<String>,
}

#[derive(Serialize)]
pub struct ChangeRoleResponse {
    pub status: &'static str,
    pub new_role: Role,
}

/// An absent or unreadable body is treated as "no role given".
pub async fn change_role<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<Json<ChangeRoleResponse>, StorefrontError> {
    let actor = user.require(SUPERADMIN)?;
    let request: ChangeRoleRequest = serde_json::from_slice(&body).unwrap_or_default();
    let usecase = ChangeUserRoleUseCase { repo: state.repo() };
    let new_role = usecase
        .execute(actor, &key, request.new_role.as_deref())
        .await?;
    Ok(Json(ChangeRoleResponse {
        status: "ok",
        new_role,
    }))
}
