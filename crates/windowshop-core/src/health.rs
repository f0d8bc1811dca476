use std::future::Future;

use axum::extract::State;
use axum::http::StatusCode;

use crate::error::AppError;

/// Something that can say whether its backing resources are reachable.
pub trait ReadinessCheck: Clone + Send + Sync + 'static {
    fn ready(&self) -> impl Future<Output = bool> + Send;
}

/// Handler for `GET /healthz`: liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`: 200 once the readiness check succeeds, 503 otherwise.
pub async fn readyz<P: ReadinessCheck>(State(check): State<P>) -> Result<StatusCode, AppError> {
    if check.ready().await {
        Ok(StatusCode::OK)
    } else {
        Err(AppError::Unavailable)
    }
}
