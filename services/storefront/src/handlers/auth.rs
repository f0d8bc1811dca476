use std::collections::BTreeMap;

use axum::{Form, Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use windowshop_auth_types::cookie::{clear_access_token_cookie, set_access_token_cookie};
use windowshop_domain::role::Role;

use crate::domain::repository::Store;
use crate::error::StorefrontError;
use crate::extract::MaybeUser;
use crate::handlers::view::UserView;
use crate::state::AppState;
use crate::usecase::token::{LoginInput, LoginUseCase};
use crate::usecase::user::GetProfileUseCase;

// ── POST /login ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LoginResponse {
    pub user: UserView,
    pub access_token_exp: u64,
}

pub async fn login<S: Store>(
    State(state): State<AppState<S>>,
    jar: CookieJar,
    Form(form): Form<BTreeMap<String, String>>,
) -> Result<impl IntoResponse, StorefrontError> {
    let usecase = LoginUseCase {
        repo: state.repo(),
        jwt_secret: state.jwt_secret.clone(),
        token_minutes: state.token_minutes,
    };
    let out = usecase
        .execute(LoginInput {
            username: form.get("username").map(|u| u.trim().to_owned()).unwrap_or_default(),
            password: form.get("password").cloned().unwrap_or_default(),
        })
        .await?;

    let jar = set_access_token_cookie(
        jar,
        out.access_token,
        state.token_minutes * 60,
        state.cookie_secure,
    );
    Ok((
        jar,
        Json(LoginResponse {
            user: out.user.into(),
            access_token_exp: out.access_token_exp,
        }),
    ))
}

// ── POST /logout ─────────────────────────────────────────────────────────────

pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (clear_access_token_cookie(jar), StatusCode::NO_CONTENT)
}

// ── GET /profile ─────────────────────────────────────────────────────────────

pub async fn profile<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
) -> Result<Json<UserView>, StorefrontError> {
    let current = user.require(&Role::ALL)?;
    let usecase = GetProfileUseCase { repo: state.repo() };
    Ok(Json(usecase.execute(current).await?.into()))
}
