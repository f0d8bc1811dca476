//! Mock auth helpers for integration tests.
//!
//! The storefront reads identity from the `access_token` cookie. `MockAuth`
//! signs a token with the test secret and renders it as a `Cookie` header so a
//! test can act as any user without going through `/login`.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderName, HeaderValue, header};
use jsonwebtoken::{EncodingKey, Header, encode};
use windowshop_auth_types::cookie::ACCESS_TOKEN_COOKIE;
use windowshop_auth_types::token::JwtClaims;
use windowshop_domain::role::Role;

/// Identity asserted by a test request.
pub struct MockAuth {
    pub username: String,
    pub role: Role,
    pub exp: u64,
}

impl MockAuth {
    /// A token valid for the next 30 minutes.
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
            exp: now_secs() + 1800,
        }
    }

    /// A token that expired an hour ago.
    pub fn expired(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
            exp: now_secs().saturating_sub(3600),
        }
    }

    /// Sign the claims with `secret`.
    pub fn token(&self, secret: &str) -> String {
        let claims = JwtClaims {
            sub: self.username.clone(),
            role: self.role,
            exp: self.exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("test token must encode")
    }

    /// `Cookie: access_token=<jwt>` header pair.
    pub fn cookie(&self, secret: &str) -> (HeaderName, HeaderValue) {
        let value = format!("{ACCESS_TOKEN_COOKIE}={}", self.token(secret));
        (
            header::COOKIE,
            HeaderValue::from_str(&value).expect("jwt is a valid header value"),
        )
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
