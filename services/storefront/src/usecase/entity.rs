use std::collections::BTreeMap;

use tracing::info;

use windowshop_domain::entity::EntityKind;

use crate::domain::patch::EntityPatch;
use crate::domain::repository::EntityRepository;
use crate::domain::types::{CurrentUser, EntityDocument};
use crate::error::StorefrontError;

/// Resolve a path segment to a supported kind. Runs before any store access.
pub fn parse_kind(raw: &str) -> Result<EntityKind, StorefrontError> {
    raw.parse::<EntityKind>()
        .map_err(|e| StorefrontError::UnsupportedEntity(e.0))
}

// ── ListEntities ─────────────────────────────────────────────────────────────

pub struct ListEntitiesUseCase<R: EntityRepository> {
    pub repo: R,
}

impl<R: EntityRepository> ListEntitiesUseCase<R> {
    pub async fn execute(&self, kind: &str) -> Result<Vec<EntityDocument>, StorefrontError> {
        let kind = parse_kind(kind)?;
        self.repo.list_documents(kind).await
    }
}

// ── GetEntity ────────────────────────────────────────────────────────────────

pub struct GetEntityUseCase<R: EntityRepository> {
    pub repo: R,
}

impl<R: EntityRepository> GetEntityUseCase<R> {
    pub async fn execute(&self, kind: &str, key: &str) -> Result<EntityDocument, StorefrontError> {
        let kind = parse_kind(kind)?;
        self.repo
            .get_document(kind, key)
            .await?
            .ok_or(StorefrontError::EntityNotFound)
    }
}

// ── UpdateEntity ─────────────────────────────────────────────────────────────

pub struct UpdateEntityUseCase<R: EntityRepository> {
    pub repo: R,
}

impl<R: EntityRepository> UpdateEntityUseCase<R> {
    /// Coerce `fields` into a typed patch and merge it. A superadmin may not
    /// change their own role this way either.
    pub async fn execute(
        &self,
        actor: &CurrentUser,
        kind: &str,
        key: &str,
        fields: BTreeMap<String, String>,
    ) -> Result<EntityDocument, StorefrontError> {
        let kind = parse_kind(kind)?;
        let patch = EntityPatch::from_fields(kind, &fields)
            .map_err(|errors| StorefrontError::validation(errors, fields.clone()))?;

        if kind == EntityKind::Users && actor.key == key && patch.new_role().is_some() {
            return Err(StorefrontError::SelfRoleChange);
        }

        let updated = self
            .repo
            .update_document(key, &patch)
            .await?
            .ok_or(StorefrontError::EntityNotFound)?;
        info!(
            actor = %actor.username,
            kind = %kind,
            key = %key,
            fields = ?fields.keys().collect::<Vec<_>>(),
            "entity updated"
        );
        Ok(updated)
    }
}
