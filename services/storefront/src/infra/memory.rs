//! In-process store selected with `DATABASE_URL=memory://`.
//!
//! Collections are insertion-ordered vectors behind one `RwLock`. The guard is
//! only held for synchronous map access, never across an `.await`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;
use chrono::Utc;

use windowshop_domain::entity::EntityKind;
use windowshop_domain::role::Role;

use crate::domain::patch::EntityPatch;
use crate::domain::query::ProductQuery;
use crate::domain::repository::{
    BackupRepository, EdgeRepository, EntityRepository, OrderRepository, ProductRepository,
    UserRepository,
};
use crate::domain::types::{
    Backup, Edge, EdgeCollection, EntityDocument, ImportSummary, Measurement, Order, Photo,
    Product, User,
};
use crate::error::StorefrontError;

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    products: Vec<Product>,
    orders: Vec<Order>,
    measurements: Vec<Measurement>,
    photos: Vec<Photo>,
    edges: HashMap<EdgeCollection, Vec<Edge>>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StorefrontError> {
        self.inner
            .read()
            .map_err(|_| anyhow!("memory store lock poisoned").into())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StorefrontError> {
        self.inner
            .write()
            .map_err(|_| anyhow!("memory store lock poisoned").into())
    }
}

/// Another user already holds `username` or `phone_number`.
fn conflicts(users: &[User], candidate: &User) -> bool {
    users.iter().any(|u| {
        u.key != candidate.key
            && (u.username == candidate.username || u.phone_number == candidate.phone_number)
    })
}

/// Replace the document with the same key, or append it.
fn upsert<T: Clone>(target: &mut Vec<T>, incoming: &[T], key: impl Fn(&T) -> &str) -> usize {
    for doc in incoming {
        match target.iter_mut().find(|d| key(d) == key(doc)) {
            Some(slot) => *slot = doc.clone(),
            None => target.push(doc.clone()),
        }
    }
    incoming.len()
}

impl Collections {
    fn document(&self, kind: EntityKind, key: &str) -> Option<EntityDocument> {
        match kind {
            EntityKind::Users => self
                .users
                .iter()
                .find(|d| d.key == key)
                .cloned()
                .map(EntityDocument::User),
            EntityKind::Products => self
                .products
                .iter()
                .find(|d| d.key == key)
                .cloned()
                .map(EntityDocument::Product),
            EntityKind::Orders => self
                .orders
                .iter()
                .find(|d| d.key == key)
                .cloned()
                .map(EntityDocument::Order),
            EntityKind::Measurements => self
                .measurements
                .iter()
                .find(|d| d.key == key)
                .cloned()
                .map(EntityDocument::Measurement),
            EntityKind::Photos => self
                .photos
                .iter()
                .find(|d| d.key == key)
                .cloned()
                .map(EntityDocument::Photo),
        }
    }

    fn replace(&mut self, doc: EntityDocument) {
        fn put<T>(slots: &mut [T], key: &str, doc: T, key_of: impl Fn(&T) -> &str) {
            if let Some(slot) = slots.iter_mut().find(|d| key_of(d) == key) {
                *slot = doc;
            }
        }
        let key = doc.key().to_owned();
        match doc {
            EntityDocument::User(d) => put(&mut self.users, &key, d, |d| d.key.as_str()),
            EntityDocument::Product(d) => put(&mut self.products, &key, d, |d| d.key.as_str()),
            EntityDocument::Order(d) => put(&mut self.orders, &key, d, |d| d.key.as_str()),
            EntityDocument::Measurement(d) => put(&mut self.measurements, &key, d, |d| d.key.as_str()),
            EntityDocument::Photo(d) => put(&mut self.photos, &key, d, |d| d.key.as_str()),
        }
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

impl UserRepository for MemoryStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StorefrontError> {
        Ok(self
            .read()?
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_user(&self, key: &str) -> Result<Option<User>, StorefrontError> {
        Ok(self.read()?.users.iter().find(|u| u.key == key).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StorefrontError> {
        Ok(self.read()?.users.clone())
    }

    async fn create_user(&self, user: &User) -> Result<(), StorefrontError> {
        let mut inner = self.write()?;
        if conflicts(&inner.users, user) || inner.users.iter().any(|u| u.key == user.key) {
            return Err(StorefrontError::UserAlreadyExists);
        }
        inner.users.push(user.clone());
        Ok(())
    }

    async fn update_user_role(&self, key: &str, role: Role) -> Result<bool, StorefrontError> {
        let mut inner = self.write()?;
        match inner.users.iter_mut().find(|u| u.key == key) {
            Some(user) => {
                user.role = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_users(&self) -> Result<u64, StorefrontError> {
        Ok(self.read()?.users.len() as u64)
    }
}

// ── Products ─────────────────────────────────────────────────────────────────

impl ProductRepository for MemoryStore {
    async fn search_products(&self, query: &ProductQuery) -> Result<Vec<Product>, StorefrontError> {
        Ok(self
            .read()?
            .products
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect())
    }

    async fn find_product(&self, key: &str) -> Result<Option<Product>, StorefrontError> {
        Ok(self.read()?.products.iter().find(|p| p.key == key).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>, StorefrontError> {
        Ok(self.read()?.products.clone())
    }

    async fn create_product(&self, product: &Product) -> Result<(), StorefrontError> {
        self.write()?.products.push(product.clone());
        Ok(())
    }

    async fn count_products(&self) -> Result<u64, StorefrontError> {
        Ok(self.read()?.products.len() as u64)
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

impl OrderRepository for MemoryStore {
    async fn create_order(&self, order: &Order) -> Result<(), StorefrontError> {
        self.write()?.orders.push(order.clone());
        Ok(())
    }

    async fn list_orders_by_customer(
        &self,
        customer_key: &str,
    ) -> Result<Vec<Order>, StorefrontError> {
        let mut orders: Vec<Order> = self
            .read()?
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_key)
            .cloned()
            .collect();
        // Stable sort, so same-instant orders keep reverse insertion order.
        orders.reverse();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StorefrontError> {
        Ok(self.read()?.orders.clone())
    }

    async fn count_orders(&self) -> Result<u64, StorefrontError> {
        Ok(self.read()?.orders.len() as u64)
    }
}

// ── Generic entities ─────────────────────────────────────────────────────────

impl EntityRepository for MemoryStore {
    async fn list_documents(&self, kind: EntityKind) -> Result<Vec<EntityDocument>, StorefrontError> {
        let inner = self.read()?;
        let docs = match kind {
            EntityKind::Users => inner.users.iter().cloned().map(EntityDocument::User).collect(),
            EntityKind::Products => inner
                .products
                .iter()
                .cloned()
                .map(EntityDocument::Product)
                .collect(),
            EntityKind::Orders => inner.orders.iter().cloned().map(EntityDocument::Order).collect(),
            EntityKind::Measurements => inner
                .measurements
                .iter()
                .cloned()
                .map(EntityDocument::Measurement)
                .collect(),
            EntityKind::Photos => inner.photos.iter().cloned().map(EntityDocument::Photo).collect(),
        };
        Ok(docs)
    }

    async fn get_document(
        &self,
        kind: EntityKind,
        key: &str,
    ) -> Result<Option<EntityDocument>, StorefrontError> {
        Ok(self.read()?.document(kind, key))
    }

    async fn update_document(
        &self,
        key: &str,
        patch: &EntityPatch,
    ) -> Result<Option<EntityDocument>, StorefrontError> {
        let mut inner = self.write()?;
        let Some(mut doc) = inner.document(patch.kind(), key) else {
            return Ok(None);
        };
        if !patch.apply(&mut doc, Utc::now()) {
            return Err(anyhow!("patch kind {} does not match document", patch.kind()).into());
        }
        if let EntityDocument::User(ref user) = doc {
            if conflicts(&inner.users, user) {
                return Err(StorefrontError::UserAlreadyExists);
            }
        }
        inner.replace(doc.clone());
        Ok(Some(doc))
    }
}

// ── Edges ────────────────────────────────────────────────────────────────────

impl EdgeRepository for MemoryStore {
    async fn ensure_collection(&self, collection: EdgeCollection) -> Result<(), StorefrontError> {
        self.write()?.edges.entry(collection).or_default();
        Ok(())
    }

    async fn insert_edge(
        &self,
        collection: EdgeCollection,
        edge: &Edge,
    ) -> Result<(), StorefrontError> {
        let mut inner = self.write()?;
        let edges = inner
            .edges
            .get_mut(&collection)
            .ok_or_else(|| anyhow!("edge collection {} does not exist", collection.name()))?;
        edges.push(edge.clone());
        Ok(())
    }

    async fn list_edges(&self, collection: EdgeCollection) -> Result<Vec<Edge>, StorefrontError> {
        Ok(self
            .read()?
            .edges
            .get(&collection)
            .cloned()
            .unwrap_or_default())
    }
}

// ── Backup ───────────────────────────────────────────────────────────────────

impl BackupRepository for MemoryStore {
    async fn export_all(&self) -> Result<Backup, StorefrontError> {
        let inner = self.read()?;
        Ok(Backup {
            products: Some(inner.products.clone()),
            orders: Some(inner.orders.clone()),
            users: Some(inner.users.clone()),
            measurements: Some(inner.measurements.clone()),
            photos: Some(inner.photos.clone()),
        })
    }

    async fn import_all(&self, backup: &Backup) -> Result<ImportSummary, StorefrontError> {
        let mut inner = self.write()?;
        Ok(ImportSummary {
            products: upsert(
                &mut inner.products,
                backup.products.as_deref().unwrap_or_default(),
                |d| d.key.as_str(),
            ),
            orders: upsert(
                &mut inner.orders,
                backup.orders.as_deref().unwrap_or_default(),
                |d| d.key.as_str(),
            ),
            users: upsert(
                &mut inner.users,
                backup.users.as_deref().unwrap_or_default(),
                |d| d.key.as_str(),
            ),
            measurements: upsert(
                &mut inner.measurements,
                backup.measurements.as_deref().unwrap_or_default(),
                |d| d.key.as_str(),
            ),
            photos: upsert(
                &mut inner.photos,
                backup.photos.as_deref().unwrap_or_default(),
                |d| d.key.as_str(),
            ),
        })
    }

    async fn count_documents(&self, kind: EntityKind) -> Result<u64, StorefrontError> {
        let inner = self.read()?;
        let n = match kind {
            EntityKind::Users => inner.users.len(),
            EntityKind::Products => inner.products.len(),
            EntityKind::Orders => inner.orders.len(),
            EntityKind::Measurements => inner.measurements.len(),
            EntityKind::Photos => inner.photos.len(),
        };
        Ok(n as u64)
    }

    async fn ping(&self) -> bool {
        !self.inner.is_poisoned()
    }
}
