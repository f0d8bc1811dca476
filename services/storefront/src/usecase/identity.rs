use tracing::{debug, warn};

use windowshop_auth_types::token::validate_access_token;

use crate::domain::repository::UserRepository;
use crate::domain::types::CurrentUser;

// ── ResolveIdentity ──────────────────────────────────────────────────────────

/// Turn an access-token cookie value into the current user, or anonymous.
///
/// Never fails: bad signatures, expired tokens, unknown users and store errors
/// all resolve to `None`. Performs at most one user lookup.
pub struct ResolveIdentityUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> ResolveIdentityUseCase<R> {
    pub async fn execute(&self, token: Option<&str>) -> Option<CurrentUser> {
        let token = token?;
        let info = match validate_access_token(token, &self.jwt_secret) {
            Ok(info) => info,
            Err(e) => {
                debug!(error = %e, "access token rejected");
                return None;
            }
        };
        let user = match self.repo.find_user_by_username(&info.username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(username = %info.username, "token subject not found");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "user lookup failed during identity resolution");
                return None;
            }
        };
        Some(CurrentUser {
            key: user.key,
            username: user.username,
            role: info.role,
            first_name: user.first_name,
            last_name: user.last_name,
        })
    }
}
