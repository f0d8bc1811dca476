use std::collections::BTreeMap;

use axum::{
    Form, Json,
    extract::{Path, State},
};
use serde::Serialize;

use windowshop_domain::entity::EntityKind;

use crate::domain::access::SUPERADMIN;
use crate::domain::repository::Store;
use crate::error::StorefrontError;
use crate::extract::MaybeUser;
use crate::handlers::view::document_view;
use crate::state::AppState;
use crate::usecase::entity::{GetEntityUseCase, ListEntitiesUseCase, UpdateEntityUseCase};

// ── GET /entities ────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EntityKindsResponse {
    pub entities: Vec<EntityKind>,
}

pub async fn list_kinds(user: MaybeUser) -> Result<Json<EntityKindsResponse>, StorefrontError> {
    user.require(SUPERADMIN)?;
    Ok(Json(EntityKindsResponse {
        entities: EntityKind::ALL.to_vec(),
    }))
}

// ── GET /entities/{type} ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EntityListResponse {
    pub entity_type: String,
    pub documents: Vec<serde_json::Value>,
}

pub async fn list_entities<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
    Path(kind): Path<String>,
) -> Result<Json<EntityListResponse>, StorefrontError> {
    user.require(SUPERADMIN)?;
    let usecase = ListEntitiesUseCase { repo: state.repo() };
    let documents = usecase
        .execute(&kind)
        .await?
        .into_iter()
        .map(document_view)
        .collect::<Result<_, _>>()?;
    Ok(Json(EntityListResponse {
        entity_type: kind,
        documents,
    }))
}

// ── GET /entities/{type}/{key} ───────────────────────────────────────────────

pub async fn get_entity<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
    Path((kind, key)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, StorefrontError> {
    user.require(SUPERADMIN)?;
    let usecase = GetEntityUseCase { repo: state.repo() };
    Ok(Json(document_view(usecase.execute(&kind, &key).await?)?))
}

// ── POST /entities/{type}/{key}/edit ─────────────────────────────────────────

pub async fn update_entity<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
    Path((kind, key)): Path<(String, String)>,
    Form(fields): Form<BTreeMap<String, String>>,
) -> Result<Json<serde_json::Value>, StorefrontError> {
    let actor = user.require(SUPERADMIN)?;
    let usecase = UpdateEntityUseCase { repo: state.repo() };
    let updated = usecase.execute(actor, &kind, &key, fields).await?;
    Ok(Json(document_view(updated)?))
}
