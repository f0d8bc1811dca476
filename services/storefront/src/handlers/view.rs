//! Response shapes. Password hashes never leave the service.

use anyhow::Context as _;
use serde::Serialize;

use windowshop_domain::role::Role;

use crate::domain::types::{EntityDocument, User};
use crate::error::StorefrontError;

#[derive(Debug, Serialize)]
pub struct UserView {
    pub key: String,
    pub username: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub phone_number: String,
    pub is_active: bool,
    #[serde(serialize_with = "windowshop_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            full_name: user.full_name(),
            key: user.key,
            username: user.username,
            role: user.role,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Any document as JSON, users through [`UserView`].
pub fn document_view(doc: EntityDocument) -> Result<serde_json::Value, StorefrontError> {
    let value = match doc {
        EntityDocument::User(d) => serde_json::to_value(UserView::from(d)),
        EntityDocument::Product(d) => serde_json::to_value(d),
        EntityDocument::Order(d) => serde_json::to_value(d),
        EntityDocument::Measurement(d) => serde_json::to_value(d),
        EntityDocument::Photo(d) => serde_json::to_value(d),
    };
    Ok(value.context("serialize document")?)
}
