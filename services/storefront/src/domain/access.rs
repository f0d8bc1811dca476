use windowshop_domain::role::Role;

use crate::domain::types::CurrentUser;
use crate::error::StorefrontError;

pub const CUSTOMER: &[Role] = &[Role::Customer];
pub const STAFF: &[Role] = &[Role::Admin, Role::Superadmin];
pub const SUPERADMIN: &[Role] = &[Role::Superadmin];

/// Why [`authorize`] refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Denied {
    #[error("authentication required")]
    Anonymous,
    #[error("role {0} is not allowed")]
    RoleNotAllowed(Role),
}

impl From<Denied> for StorefrontError {
    fn from(denied: Denied) -> Self {
        match denied {
            Denied::Anonymous => Self::Unauthorized,
            Denied::RoleNotAllowed(_) => Self::Forbidden,
        }
    }
}

/// Grant access iff a user is present and their role is in `allowed`.
pub fn authorize<'a>(
    user: Option<&'a CurrentUser>,
    allowed: &[Role],
) -> Result<&'a CurrentUser, Denied> {
    let user = user.ok_or(Denied::Anonymous)?;
    if allowed.contains(&user.role) {
        Ok(user)
    } else {
        Err(Denied::RoleNotAllowed(user.role))
    }
}
