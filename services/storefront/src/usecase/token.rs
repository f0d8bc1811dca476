use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;
use jsonwebtoken::{EncodingKey, Header, encode};
use tracing::info;

use windowshop_auth_types::token::JwtClaims;
use windowshop_domain::role::Role;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::StorefrontError;
use crate::infra::password::verify_password_async;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Sign an access token asserting `username` and `role`.
/// Returns the token and its expiry (seconds since epoch).
pub fn issue_access_token(
    username: &str,
    role: Role,
    secret: &str,
    lifetime_minutes: u64,
) -> Result<(String, u64), StorefrontError> {
    let exp = now_secs() + lifetime_minutes * 60;
    let claims = JwtClaims {
        sub: username.to_owned(),
        role,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("sign access token")?;
    Ok((token, exp))
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub access_token: String,
    pub access_token_exp: u64,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
    pub token_minutes: u64,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, StorefrontError> {
        let user = self
            .repo
            .find_user_by_username(input.username.trim())
            .await?
            .ok_or(StorefrontError::InvalidCredentials)?;

        if !verify_password_async(input.password, user.password_hash.clone()).await {
            return Err(StorefrontError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(StorefrontError::UserInactive);
        }

        let (access_token, access_token_exp) = issue_access_token(
            &user.username,
            user.role,
            &self.jwt_secret,
            self.token_minutes,
        )?;
        info!(username = %user.username, role = %user.role, "user logged in");
        Ok(LoginOutput {
            user,
            access_token,
            access_token_exp,
        })
    }
}
