use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use windowshop_domain::entity::EntityRef;

use crate::domain::repository::EdgeRepository;
use crate::domain::types::{Edge, EdgeCollection};
use crate::error::StorefrontError;

// ── LinkOrderCreation ────────────────────────────────────────────────────────

/// Record who created an order and what it contains.
///
/// Runs after the order insert. There is no rollback: if an edge write fails
/// the order stays and the caller sees an internal error.
pub struct LinkOrderCreationUseCase<E: EdgeRepository> {
    pub edges: E,
}

impl<E: EdgeRepository> LinkOrderCreationUseCase<E> {
    /// Writes `customer -> order` (`created`), then `order -> product` (`contains`).
    /// Returns the `created` edge.
    pub async fn execute(
        &self,
        customer: EntityRef,
        order: EntityRef,
        product: EntityRef,
    ) -> Result<Edge, StorefrontError> {
        let created = self
            .link(EdgeCollection::UserOrders, customer, order.clone())
            .await?;
        self.link(EdgeCollection::ContainProduct, order, product)
            .await?;
        Ok(created)
    }

    async fn link(
        &self,
        collection: EdgeCollection,
        from: EntityRef,
        to: EntityRef,
    ) -> Result<Edge, StorefrontError> {
        self.edges.ensure_collection(collection).await?;
        let edge = Edge {
            key: Uuid::now_v7().to_string(),
            from,
            to,
            edge_type: collection.edge_type().to_owned(),
            created_at: Utc::now(),
        };
        self.edges.insert_edge(collection, &edge).await?;
        debug!(
            collection = collection.name(),
            from = %edge.from,
            to = %edge.to,
            "edge written"
        );
        Ok(edge)
    }
}
