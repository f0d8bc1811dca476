use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use windowshop_auth_types::cookie::ACCESS_TOKEN_COOKIE;
use windowshop_domain::role::Role;

use crate::domain::access::authorize;
use crate::domain::repository::Store;
use crate::domain::types::CurrentUser;
use crate::error::StorefrontError;
use crate::state::AppState;
use crate::usecase::identity::ResolveIdentityUseCase;

/// The caller behind the `access_token` cookie, if any.
///
/// Never rejects: a missing, forged or expired token is simply anonymous.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

impl MaybeUser {
    /// Apply the role gate.
    pub fn require(&self, allowed: &[Role]) -> Result<&CurrentUser, StorefrontError> {
        Ok(authorize(self.0.as_ref(), allowed)?)
    }
}

impl<S: Store> FromRequestParts<AppState<S>> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let token = CookieJar::from_headers(&parts.headers)
            .get(ACCESS_TOKEN_COOKIE)
            .map(|c| c.value().to_owned());
        let usecase = ResolveIdentityUseCase {
            repo: state.repo(),
            jwt_secret: state.jwt_secret.clone(),
        };
        Ok(Self(usecase.execute(token.as_deref()).await))
    }
}
