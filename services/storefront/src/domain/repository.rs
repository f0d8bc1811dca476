//! Store ports.
//!
//! Methods return `impl Future + Send` so handlers generic over the store stay
//! `Send`; implementations may still write `async fn`.

use std::future::Future;

use windowshop_domain::entity::EntityKind;
use windowshop_domain::role::Role;

use crate::domain::patch::EntityPatch;
use crate::domain::query::ProductQuery;
use crate::domain::types::{
    Backup, Edge, EdgeCollection, EntityDocument, ImportSummary, Order, Product, User,
};
use crate::error::StorefrontError;

type Res<T> = Result<T, StorefrontError>;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    fn find_user_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Res<Option<User>>> + Send;

    fn find_user(&self, key: &str) -> impl Future<Output = Res<Option<User>>> + Send;

    fn list_users(&self) -> impl Future<Output = Res<Vec<User>>> + Send;

    /// Fails with `UserAlreadyExists` when the username or phone number is taken.
    fn create_user(&self, user: &User) -> impl Future<Output = Res<()>> + Send;

    /// Returns `false` when no such user exists.
    fn update_user_role(
        &self,
        key: &str,
        role: Role,
    ) -> impl Future<Output = Res<bool>> + Send;

    fn count_users(&self) -> impl Future<Output = Res<u64>> + Send;
}

/// Repository for the product catalog.
pub trait ProductRepository: Send + Sync {
    /// Every product satisfying all clauses, in store order.
    fn search_products(
        &self,
        query: &ProductQuery,
    ) -> impl Future<Output = Res<Vec<Product>>> + Send;

    fn find_product(&self, key: &str) -> impl Future<Output = Res<Option<Product>>> + Send;

    fn list_products(&self) -> impl Future<Output = Res<Vec<Product>>> + Send;

    fn create_product(&self, product: &Product) -> impl Future<Output = Res<()>> + Send;

    fn count_products(&self) -> impl Future<Output = Res<u64>> + Send;
}

/// Repository for orders.
pub trait OrderRepository: Send + Sync {
    fn create_order(&self, order: &Order) -> impl Future<Output = Res<()>> + Send;

    /// Orders placed by `customer_key`, newest first.
    fn list_orders_by_customer(
        &self,
        customer_key: &str,
    ) -> impl Future<Output = Res<Vec<Order>>> + Send;

    fn list_orders(&self) -> impl Future<Output = Res<Vec<Order>>> + Send;

    fn count_orders(&self) -> impl Future<Output = Res<u64>> + Send;
}

/// Kind-generic document access for the admin entity editor.
pub trait EntityRepository: Send + Sync {
    fn list_documents(
        &self,
        kind: EntityKind,
    ) -> impl Future<Output = Res<Vec<EntityDocument>>> + Send;

    fn get_document(
        &self,
        kind: EntityKind,
        key: &str,
    ) -> impl Future<Output = Res<Option<EntityDocument>>> + Send;

    /// Merge `patch` into the document. `None` when it does not exist.
    fn update_document(
        &self,
        key: &str,
        patch: &EntityPatch,
    ) -> impl Future<Output = Res<Option<EntityDocument>>> + Send;
}

/// Append-only relationship edges.
pub trait EdgeRepository: Send + Sync {
    /// Create the edge collection if it is missing. Idempotent.
    fn ensure_collection(
        &self,
        collection: EdgeCollection,
    ) -> impl Future<Output = Res<()>> + Send;

    fn insert_edge(
        &self,
        collection: EdgeCollection,
        edge: &Edge,
    ) -> impl Future<Output = Res<()>> + Send;

    fn list_edges(
        &self,
        collection: EdgeCollection,
    ) -> impl Future<Output = Res<Vec<Edge>>> + Send;
}

impl<T: EdgeRepository> EdgeRepository for &T {
    fn ensure_collection(
        &self,
        collection: EdgeCollection,
    ) -> impl Future<Output = Res<()>> + Send {
        (**self).ensure_collection(collection)
    }

    fn insert_edge(
        &self,
        collection: EdgeCollection,
        edge: &Edge,
    ) -> impl Future<Output = Res<()>> + Send {
        (**self).insert_edge(collection, edge)
    }

    fn list_edges(
        &self,
        collection: EdgeCollection,
    ) -> impl Future<Output = Res<Vec<Edge>>> + Send {
        (**self).list_edges(collection)
    }
}

/// Whole-store export and upsert-by-overwrite import.
pub trait BackupRepository: Send + Sync {
    fn export_all(&self) -> impl Future<Output = Res<Backup>> + Send;

    /// Overwrite-or-insert every document of every collection present in `backup`.
    fn import_all(&self, backup: &Backup) -> impl Future<Output = Res<ImportSummary>> + Send;

    fn count_documents(&self, kind: EntityKind) -> impl Future<Output = Res<u64>> + Send;

    /// Cheap connectivity check.
    fn ping(&self) -> impl Future<Output = bool> + Send;
}

/// Every port at once; what `AppState` is generic over.
pub trait Store:
    UserRepository
    + ProductRepository
    + OrderRepository
    + EntityRepository
    + EdgeRepository
    + BackupRepository
    + Clone
    + 'static
{
}

impl<T> Store for T where
    T: UserRepository
        + ProductRepository
        + OrderRepository
        + EntityRepository
        + EdgeRepository
        + BackupRepository
        + Clone
        + 'static
{
}
