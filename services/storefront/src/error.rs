use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use windowshop_core::error::error_response;

/// Field name -> human-readable problem.
pub type FieldErrors = BTreeMap<String, String>;

/// Storefront service error variants.
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    #[error("authentication required")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("user is inactive")]
    UserInactive,
    #[error("unsupported entity type: {0}")]
    UnsupportedEntity(String),
    #[error("entity not found")]
    EntityNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("product not found")]
    ProductNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("cannot change own role")]
    SelfRoleChange,
    #[error("invalid role: {0}")]
    InvalidRole(String),
    #[error("missing data")]
    MissingData,
    #[error("invalid input")]
    Validation {
        fields: FieldErrors,
        input: BTreeMap<String, String>,
    },
    #[error("invalid import bundle: {0}")]
    InvalidImport(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl StorefrontError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UserInactive => "USER_INACTIVE",
            Self::UnsupportedEntity(_) => "UNSUPPORTED_ENTITY",
            Self::EntityNotFound => "ENTITY_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::SelfRoleChange => "SELF_ROLE_CHANGE",
            Self::InvalidRole(_) => "INVALID_ROLE",
            Self::MissingData => "MISSING_DATA",
            Self::Validation { .. } => "VALIDATION",
            Self::InvalidImport(_) => "INVALID_IMPORT",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn validation(fields: FieldErrors, input: BTreeMap<String, String>) -> Self {
        Self::Validation { fields, input }
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::UserInactive => StatusCode::FORBIDDEN,
            Self::EntityNotFound | Self::UserNotFound | Self::ProductNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::UnsupportedEntity(_)
            | Self::SelfRoleChange
            | Self::InvalidRole(_)
            | Self::MissingData
            | Self::Validation { .. }
            | Self::InvalidImport(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let kind = self.kind();
        let message = self.to_string();
        let extra = match self {
            Self::Validation { fields, input } => serde_json::json!({
                "fields": fields,
                "input": input,
            }),
            _ => serde_json::Value::Null,
        };
        error_response(status, kind, message, extra)
    }
}
