use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::header,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Serialize;

use crate::domain::access::STAFF;
use crate::domain::repository::Store;
use crate::domain::types::ImportSummary;
use crate::error::StorefrontError;
use crate::extract::MaybeUser;
use crate::state::AppState;
use crate::usecase::backup::{ExportAllUseCase, ImportAllUseCase};

// ── GET /admin/export ────────────────────────────────────────────────────────

pub async fn export_all<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, StorefrontError> {
    user.require(STAFF)?;
    let usecase = ExportAllUseCase { repo: state.repo() };
    let backup = usecase.execute().await?;
    let disposition = format!(
        "attachment; filename=\"windowshop-backup-{}.json\"",
        Utc::now().format("%Y%m%d-%H%M%S")
    );
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(backup)))
}

// ── POST /admin/import ───────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ImportResponse {
    pub status: &'static str,
    pub imported: ImportSummary,
}

pub async fn import_all<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<Json<ImportResponse>, StorefrontError> {
    user.require(STAFF)?;
    let usecase = ImportAllUseCase { repo: state.repo() };
    let imported = usecase.execute(&body).await?;
    Ok(Json(ImportResponse {
        status: "ok",
        imported,
    }))
}
