use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Render the JSON error envelope shared by every service error:
/// `{"kind": ..., "message": ...}` plus any extra top-level members.
///
/// `extra` must be a JSON object or `Null`; other values are ignored.
pub fn error_response(
    status: StatusCode,
    kind: &str,
    message: String,
    extra: serde_json::Value,
) -> Response {
    let mut body = serde_json::json!({
        "kind": kind,
        "message": message,
    });
    if let (Some(target), serde_json::Value::Object(members)) = (body.as_object_mut(), extra) {
        target.extend(members);
    }
    (status, axum::Json(body)).into_response()
}

/// Common application error variants.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    #[error("service unavailable")]
    Unavailable,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Unavailable => "UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Only 500s are logged here; TraceLayer records status for every request.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        error_response(
            self.status(),
            self.kind(),
            self.to_string(),
            serde_json::Value::Null,
        )
    }
}
