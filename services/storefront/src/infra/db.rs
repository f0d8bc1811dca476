use anyhow::{Context as _, anyhow};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Alias, ColumnDef, Expr, OnConflict, Query, Table};
use sea_orm::{
    ActiveValue::{self, NotSet, Set},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QueryTrait, Select,
    SqlErr, Statement, TransactionTrait,
};
use sea_orm_migration::SchemaManager;

use windowshop_core::sea_ext::contains_ignore_case;
use windowshop_domain::entity::{EntityKind, EntityRef};
use windowshop_domain::role::Role;
use windowshop_storefront_schema::{measurements, orders, photos, products, users};

use crate::domain::patch::{
    EntityPatch, MeasurementPatch, OrderPatch, PhotoPatch, ProductPatch, UserPatch,
};
use crate::domain::query::{Clause, ProductField, ProductQuery};
use crate::domain::repository::{
    BackupRepository, EdgeRepository, EntityRepository, OrderRepository, ProductRepository,
    UserRepository,
};
use crate::domain::types::{
    Backup, Edge, EdgeCollection, EntityDocument, ImportSummary, Measurement, Order, Photo,
    Product, User,
};
use crate::error::StorefrontError;

#[derive(Clone)]
pub struct DbStore {
    pub db: DatabaseConnection,
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── Users ────────────────────────────────────────────────────────────────────

impl UserRepository for DbStore {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StorefrontError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        model.map(user_from_model).transpose()
    }

    async fn find_user(&self, key: &str) -> Result<Option<User>, StorefrontError> {
        let model = users::Entity::find_by_id(key.to_owned())
            .one(&self.db)
            .await
            .context("find user by key")?;
        model.map(user_from_model).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, StorefrontError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .order_by_asc(users::Column::Key)
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn create_user(&self, user: &User) -> Result<(), StorefrontError> {
        match users::Entity::insert(user_to_active(user))
            .exec_without_returning(&self.db)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(StorefrontError::UserAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn update_user_role(&self, key: &str, role: Role) -> Result<bool, StorefrontError> {
        let result = users::Entity::update_many()
            .col_expr(
                users::Column::Role,
                sea_orm::sea_query::Expr::value(role.as_str()),
            )
            .filter(users::Column::Key.eq(key))
            .exec(&self.db)
            .await
            .context("update user role")?;
        Ok(result.rows_affected > 0)
    }

    async fn count_users(&self) -> Result<u64, StorefrontError> {
        Ok(users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?)
    }
}

fn user_from_model(model: users::Model) -> Result<User, StorefrontError> {
    let role = model
        .role
        .parse::<Role>()
        .map_err(|_| anyhow!("user {} has unknown stored role {:?}", model.key, model.role))?;
    Ok(User {
        key: model.key,
        username: model.username,
        password_hash: model.password_hash,
        role,
        first_name: model.first_name,
        last_name: model.last_name,
        phone_number: model.phone_number,
        is_active: model.is_active,
        created_at: model.created_at,
    })
}

fn user_to_active(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        key: Set(user.key.clone()),
        username: Set(user.username.clone()),
        password_hash: Set(user.password_hash.clone()),
        role: Set(user.role.as_str().to_owned()),
        first_name: Set(user.first_name.clone()),
        last_name: Set(user.last_name.clone()),
        phone_number: Set(user.phone_number.clone()),
        is_active: Set(user.is_active),
        created_at: Set(user.created_at),
    }
}

// ── Products ─────────────────────────────────────────────────────────────────

fn product_column(field: ProductField) -> products::Column {
    match field {
        ProductField::Name => products::Column::Name,
        ProductField::Description => products::Column::Description,
        ProductField::Material => products::Column::Material,
        ProductField::Color => products::Column::Color,
        ProductField::Price => products::Column::Price,
        ProductField::Width => products::Column::Width,
        ProductField::Height => products::Column::Height,
        ProductField::InStock => products::Column::InStock,
    }
}

/// One `SELECT` over `products`, one `AND`ed predicate per clause, in clause
/// order. Every operand is a bound parameter.
pub fn product_search(query: &ProductQuery) -> Select<products::Entity> {
    query
        .clauses
        .iter()
        .fold(products::Entity::find(), |select, clause| match clause {
            Clause::Contains(field, needle) => select.filter(contains_ignore_case(
                (products::Entity, product_column(*field)),
                needle,
            )),
            Clause::AtLeast(field, bound) => select.filter(product_column(*field).gte(*bound)),
            Clause::AtMost(field, bound) => select.filter(product_column(*field).lte(*bound)),
            Clause::Equals(field, flag) => select.filter(product_column(*field).eq(*flag)),
        })
        .order_by_asc(products::Column::CreatedAt)
        .order_by_asc(products::Column::Key)
}

/// The Postgres statement [`product_search`] sends, for inspection.
pub fn render_product_search(query: &ProductQuery) -> Statement {
    product_search(query).build(DbBackend::Postgres)
}

impl ProductRepository for DbStore {
    async fn search_products(&self, query: &ProductQuery) -> Result<Vec<Product>, StorefrontError> {
        let models = product_search(query)
            .all(&self.db)
            .await
            .context("search products")?;
        Ok(models.into_iter().map(product_from_model).collect())
    }

    async fn find_product(&self, key: &str) -> Result<Option<Product>, StorefrontError> {
        let model = products::Entity::find_by_id(key.to_owned())
            .one(&self.db)
            .await
            .context("find product by key")?;
        Ok(model.map(product_from_model))
    }

    async fn list_products(&self) -> Result<Vec<Product>, StorefrontError> {
        self.search_products(&ProductQuery::default()).await
    }

    async fn create_product(&self, product: &Product) -> Result<(), StorefrontError> {
        products::Entity::insert(product_to_active(product))
            .exec_without_returning(&self.db)
            .await
            .context("create product")?;
        Ok(())
    }

    async fn count_products(&self) -> Result<u64, StorefrontError> {
        Ok(products::Entity::find()
            .count(&self.db)
            .await
            .context("count products")?)
    }
}

fn product_from_model(model: products::Model) -> Product {
    Product {
        key: model.key,
        name: model.name,
        description: model.description,
        width: model.width,
        height: model.height,
        material: model.material,
        color: model.color,
        price: model.price,
        in_stock: model.in_stock,
        created_at: model.created_at,
    }
}

fn product_to_active(product: &Product) -> products::ActiveModel {
    products::ActiveModel {
        key: Set(product.key.clone()),
        name: Set(product.name.clone()),
        description: Set(product.description.clone()),
        width: Set(product.width),
        height: Set(product.height),
        material: Set(product.material.clone()),
        color: Set(product.color.clone()),
        price: Set(product.price),
        in_stock: Set(product.in_stock),
        created_at: Set(product.created_at),
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

impl OrderRepository for DbStore {
    async fn create_order(&self, order: &Order) -> Result<(), StorefrontError> {
        orders::Entity::insert(order_to_active(order)?)
            .exec_without_returning(&self.db)
            .await
            .context("create order")?;
        Ok(())
    }

    async fn list_orders_by_customer(
        &self,
        customer_key: &str,
    ) -> Result<Vec<Order>, StorefrontError> {
        let models = orders::Entity::find()
            .filter(orders::Column::CustomerId.eq(customer_key))
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Key)
            .all(&self.db)
            .await
            .context("list orders by customer")?;
        models.into_iter().map(order_from_model).collect()
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StorefrontError> {
        let models = orders::Entity::find()
            .order_by_asc(orders::Column::CreatedAt)
            .order_by_asc(orders::Column::Key)
            .all(&self.db)
            .await
            .context("list orders")?;
        models.into_iter().map(order_from_model).collect()
    }

    async fn count_orders(&self) -> Result<u64, StorefrontError> {
        Ok(orders::Entity::find()
            .count(&self.db)
            .await
            .context("count orders")?)
    }
}

fn order_from_model(model: orders::Model) -> Result<Order, StorefrontError> {
    let status = model
        .status
        .parse()
        .map_err(|_| anyhow!("order {} has unknown stored status {:?}", model.key, model.status))?;
    let quantity = u32::try_from(model.quantity)
        .with_context(|| format!("order {} has negative quantity", model.key))?;
    Ok(Order {
        key: model.key,
        customer_id: model.customer_id,
        customer_name: model.customer_name,
        product_id: model.product_id,
        product_name: model.product_name,
        product_price: model.product_price,
        quantity,
        address: model.address,
        comments: model.comments,
        status,
        total_price: model.total_price,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn stored_quantity(quantity: u32) -> anyhow::Result<i32> {
    i32::try_from(quantity).with_context(|| format!("quantity {quantity} exceeds column range"))
}

fn order_to_active(order: &Order) -> anyhow::Result<orders::ActiveModel> {
    Ok(orders::ActiveModel {
        key: Set(order.key.clone()),
        customer_id: Set(order.customer_id.clone()),
        customer_name: Set(order.customer_name.clone()),
        product_id: Set(order.product_id.clone()),
        product_name: Set(order.product_name.clone()),
        product_price: Set(order.product_price),
        quantity: Set(stored_quantity(order.quantity)?),
        address: Set(order.address.clone()),
        comments: Set(order.comments.clone()),
        status: Set(order.status.as_str().to_owned()),
        total_price: Set(order.total_price),
        created_at: Set(order.created_at),
        updated_at: Set(order.updated_at),
    })
}

// ── Measurements / photos ────────────────────────────────────────────────────

fn measurement_from_model(model: measurements::Model) -> Measurement {
    Measurement {
        key: model.key,
        measurer_id: model.measurer_id,
        order_id: model.order_id,
        address: model.address,
        scheduled_at: model.scheduled_at,
        status: model.status,
        notes: model.notes,
        created_at: model.created_at,
    }
}

fn measurement_to_active(m: &Measurement) -> measurements::ActiveModel {
    measurements::ActiveModel {
        key: Set(m.key.clone()),
        measurer_id: Set(m.measurer_id.clone()),
        order_id: Set(m.order_id.clone()),
        address: Set(m.address.clone()),
        scheduled_at: Set(m.scheduled_at),
        status: Set(m.status.clone()),
        notes: Set(m.notes.clone()),
        created_at: Set(m.created_at),
    }
}

fn photo_from_model(model: photos::Model) -> Photo {
    Photo {
        key: model.key,
        product_id: model.product_id,
        url: model.url,
        caption: model.caption,
        created_at: model.created_at,
    }
}

fn photo_to_active(photo: &Photo) -> photos::ActiveModel {
    photos::ActiveModel {
        key: Set(photo.key.clone()),
        product_id: Set(photo.product_id.clone()),
        url: Set(photo.url.clone()),
        caption: Set(photo.caption.clone()),
        created_at: Set(photo.created_at),
    }
}

impl DbStore {
    async fn all_measurements(&self) -> Result<Vec<Measurement>, StorefrontError> {
        let models = measurements::Entity::find()
            .order_by_asc(measurements::Column::CreatedAt)
            .order_by_asc(measurements::Column::Key)
            .all(&self.db)
            .await
            .context("list measurements")?;
        Ok(models.into_iter().map(measurement_from_model).collect())
    }

    async fn all_photos(&self) -> Result<Vec<Photo>, StorefrontError> {
        let models = photos::Entity::find()
            .order_by_asc(photos::Column::CreatedAt)
            .order_by_asc(photos::Column::Key)
            .all(&self.db)
            .await
            .context("list photos")?;
        Ok(models.into_iter().map(photo_from_model).collect())
    }
}

// ── Partial updates ──────────────────────────────────────────────────────────

fn patched<V: Into<sea_orm::Value> + Clone>(value: &Option<V>) -> ActiveValue<V> {
    value.clone().map_or(NotSet, Set)
}

fn user_patch(p: &UserPatch) -> users::ActiveModel {
    users::ActiveModel {
        username: patched(&p.username),
        role: patched(&p.role.map(|r| r.as_str().to_owned())),
        first_name: patched(&p.first_name),
        last_name: patched(&p.last_name),
        phone_number: patched(&p.phone_number),
        is_active: patched(&p.is_active),
        ..Default::default()
    }
}

fn product_patch(p: &ProductPatch) -> products::ActiveModel {
    products::ActiveModel {
        name: patched(&p.name),
        description: patched(&p.description),
        width: patched(&p.width),
        height: patched(&p.height),
        material: patched(&p.material),
        color: patched(&p.color),
        price: patched(&p.price),
        in_stock: patched(&p.in_stock),
        ..Default::default()
    }
}

fn order_patch(p: &OrderPatch, now: DateTime<Utc>) -> orders::ActiveModel {
    orders::ActiveModel {
        address: patched(&p.address),
        comments: patched(&p.comments),
        status: patched(&p.status.map(|s| s.as_str().to_owned())),
        updated_at: Set(now),
        ..Default::default()
    }
}

fn measurement_patch(p: &MeasurementPatch) -> measurements::ActiveModel {
    measurements::ActiveModel {
        measurer_id: patched(&p.measurer_id),
        order_id: patched(&p.order_id),
        address: patched(&p.address),
        scheduled_at: patched(&p.scheduled_at),
        status: patched(&p.status),
        notes: patched(&p.notes),
        ..Default::default()
    }
}

fn photo_patch(p: &PhotoPatch) -> photos::ActiveModel {
    photos::ActiveModel {
        product_id: patched(&p.product_id),
        url: patched(&p.url),
        caption: patched(&p.caption),
        ..Default::default()
    }
}

/// `UPDATE` of row `key` setting only the columns `patch` carries. Orders also
/// bump `updated_at`, and a new quantity recomputes `total_price` from the
/// stored unit price in the same statement.
pub fn patch_update(
    backend: DbBackend,
    key: &str,
    patch: &EntityPatch,
    now: DateTime<Utc>,
) -> Result<Statement, StorefrontError> {
    let stmt = match patch {
        EntityPatch::User(p) => users::Entity::update_many()
            .set(user_patch(p))
            .filter(users::Column::Key.eq(key))
            .build(backend),
        EntityPatch::Product(p) => products::Entity::update_many()
            .set(product_patch(p))
            .filter(products::Column::Key.eq(key))
            .build(backend),
        EntityPatch::Order(p) => {
            let mut update = orders::Entity::update_many().set(order_patch(p, now));
            if let Some(quantity) = p.quantity {
                let quantity = stored_quantity(quantity)?;
                update = update
                    .col_expr(orders::Column::Quantity, Expr::value(quantity))
                    .col_expr(
                        orders::Column::TotalPrice,
                        Expr::col(orders::Column::ProductPrice).mul(f64::from(quantity)),
                    );
            }
            update.filter(orders::Column::Key.eq(key)).build(backend)
        }
        EntityPatch::Measurement(p) => measurements::Entity::update_many()
            .set(measurement_patch(p))
            .filter(measurements::Column::Key.eq(key))
            .build(backend),
        EntityPatch::Photo(p) => photos::Entity::update_many()
            .set(photo_patch(p))
            .filter(photos::Column::Key.eq(key))
            .build(backend),
    };
    Ok(stmt)
}

// ── Generic entities ─────────────────────────────────────────────────────────

impl EntityRepository for DbStore {
    async fn list_documents(&self, kind: EntityKind) -> Result<Vec<EntityDocument>, StorefrontError> {
        let docs = match kind {
            EntityKind::Users => self
                .list_users()
                .await?
                .into_iter()
                .map(EntityDocument::User)
                .collect(),
            EntityKind::Products => self
                .list_products()
                .await?
                .into_iter()
                .map(EntityDocument::Product)
                .collect(),
            EntityKind::Orders => self
                .list_orders()
                .await?
                .into_iter()
                .map(EntityDocument::Order)
                .collect(),
            EntityKind::Measurements => self
                .all_measurements()
                .await?
                .into_iter()
                .map(EntityDocument::Measurement)
                .collect(),
            EntityKind::Photos => self
                .all_photos()
                .await?
                .into_iter()
                .map(EntityDocument::Photo)
                .collect(),
        };
        Ok(docs)
    }

    async fn get_document(
        &self,
        kind: EntityKind,
        key: &str,
    ) -> Result<Option<EntityDocument>, StorefrontError> {
        let key = key.to_owned();
        let doc = match kind {
            EntityKind::Users => self.find_user(&key).await?.map(EntityDocument::User),
            EntityKind::Products => self.find_product(&key).await?.map(EntityDocument::Product),
            EntityKind::Orders => orders::Entity::find_by_id(key)
                .one(&self.db)
                .await
                .context("find order by key")?
                .map(order_from_model)
                .transpose()?
                .map(EntityDocument::Order),
            EntityKind::Measurements => measurements::Entity::find_by_id(key)
                .one(&self.db)
                .await
                .context("find measurement by key")?
                .map(|m| EntityDocument::Measurement(measurement_from_model(m))),
            EntityKind::Photos => photos::Entity::find_by_id(key)
                .one(&self.db)
                .await
                .context("find photo by key")?
                .map(|m| EntityDocument::Photo(photo_from_model(m))),
        };
        Ok(doc)
    }

    async fn update_document(
        &self,
        key: &str,
        patch: &EntityPatch,
    ) -> Result<Option<EntityDocument>, StorefrontError> {
        let kind = patch.kind();
        if patch.is_empty() {
            return self.get_document(kind, key).await;
        }
        let stmt = patch_update(self.db.get_database_backend(), key, patch, Utc::now())?;
        let result = match self.db.execute(stmt).await {
            Ok(result) => result,
            Err(e) if is_unique_violation(&e) => return Err(StorefrontError::UserAlreadyExists),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("update {kind} {key}"))
                    .into());
            }
        };
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_document(kind, key).await
    }
}

// ── Edges ────────────────────────────────────────────────────────────────────

mod edge_col {
    pub const KEY: &str = "key";
    pub const FROM: &str = "from_ref";
    pub const TO: &str = "to_ref";
    pub const EDGE_TYPE: &str = "edge_type";
    pub const CREATED_AT: &str = "created_at";
}

#[derive(Debug, FromQueryResult)]
struct EdgeRow {
    key: String,
    from_ref: String,
    to_ref: String,
    edge_type: String,
    created_at: chrono::DateTime<Utc>,
}

impl TryFrom<EdgeRow> for Edge {
    type Error = anyhow::Error;

    fn try_from(row: EdgeRow) -> Result<Self, Self::Error> {
        Ok(Edge {
            from: row
                .from_ref
                .parse::<EntityRef>()
                .with_context(|| format!("edge {} has malformed from", row.key))?,
            to: row
                .to_ref
                .parse::<EntityRef>()
                .with_context(|| format!("edge {} has malformed to", row.key))?,
            key: row.key,
            edge_type: row.edge_type,
            created_at: row.created_at,
        })
    }
}

impl EdgeRepository for DbStore {
    async fn ensure_collection(&self, collection: EdgeCollection) -> Result<(), StorefrontError> {
        let manager = SchemaManager::new(&self.db);
        if manager
            .has_table(collection.name())
            .await
            .with_context(|| format!("check edge table {}", collection.name()))?
        {
            return Ok(());
        }
        manager
            .create_table(
                Table::create()
                    .table(Alias::new(collection.name()))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new(edge_col::KEY))
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new(edge_col::FROM)).string().not_null())
                    .col(ColumnDef::new(Alias::new(edge_col::TO)).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new(edge_col::EDGE_TYPE))
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Alias::new(edge_col::CREATED_AT))
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
            .with_context(|| format!("create edge table {}", collection.name()))?;
        tracing::info!(collection = collection.name(), "edge collection created");
        Ok(())
    }

    async fn insert_edge(
        &self,
        collection: EdgeCollection,
        edge: &Edge,
    ) -> Result<(), StorefrontError> {
        let insert = Query::insert()
            .into_table(Alias::new(collection.name()))
            .columns([
                Alias::new(edge_col::KEY),
                Alias::new(edge_col::FROM),
                Alias::new(edge_col::TO),
                Alias::new(edge_col::EDGE_TYPE),
                Alias::new(edge_col::CREATED_AT),
            ])
            .values([
                edge.key.clone().into(),
                edge.from.to_string().into(),
                edge.to.to_string().into(),
                edge.edge_type.clone().into(),
                edge.created_at.into(),
            ])
            .context("build edge insert")?
            .to_owned();
        let backend = self.db.get_database_backend();
        self.db
            .execute(backend.build(&insert))
            .await
            .with_context(|| format!("insert edge into {}", collection.name()))?;
        Ok(())
    }

    async fn list_edges(&self, collection: EdgeCollection) -> Result<Vec<Edge>, StorefrontError> {
        let manager = SchemaManager::new(&self.db);
        if !manager
            .has_table(collection.name())
            .await
            .with_context(|| format!("check edge table {}", collection.name()))?
        {
            return Ok(Vec::new());
        }
        let select = Query::select()
            .columns([
                Alias::new(edge_col::KEY),
                Alias::new(edge_col::FROM),
                Alias::new(edge_col::TO),
                Alias::new(edge_col::EDGE_TYPE),
                Alias::new(edge_col::CREATED_AT),
            ])
            .from(Alias::new(collection.name()))
            .order_by(Alias::new(edge_col::CREATED_AT), sea_orm::sea_query::Order::Asc)
            .to_owned();
        let backend = self.db.get_database_backend();
        let rows = EdgeRow::find_by_statement(backend.build(&select))
            .all(&self.db)
            .await
            .with_context(|| format!("list edges in {}", collection.name()))?;
        rows.into_iter()
            .map(|row| Edge::try_from(row).map_err(StorefrontError::from))
            .collect()
    }
}

// ── Backup ───────────────────────────────────────────────────────────────────

impl BackupRepository for DbStore {
    async fn export_all(&self) -> Result<Backup, StorefrontError> {
        Ok(Backup {
            products: Some(self.list_products().await?),
            orders: Some(self.list_orders().await?),
            users: Some(self.list_users().await?),
            measurements: Some(self.all_measurements().await?),
            photos: Some(self.all_photos().await?),
        })
    }

    async fn import_all(&self, backup: &Backup) -> Result<ImportSummary, StorefrontError> {
        let txn = self.db.begin().await.context("begin import")?;
        let mut summary = ImportSummary::default();

        if let Some(docs) = backup.users.as_deref().filter(|d| !d.is_empty()) {
            users::Entity::insert_many(docs.iter().map(user_to_active))
                .on_conflict(
                    OnConflict::column(users::Column::Key)
                        .update_columns([
                            users::Column::Username,
                            users::Column::PasswordHash,
                            users::Column::Role,
                            users::Column::FirstName,
                            users::Column::LastName,
                            users::Column::PhoneNumber,
                            users::Column::IsActive,
                            users::Column::CreatedAt,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .context("import users")?;
            summary.users = docs.len();
        }
        if let Some(docs) = backup.products.as_deref().filter(|d| !d.is_empty()) {
            products::Entity::insert_many(docs.iter().map(product_to_active))
                .on_conflict(
                    OnConflict::column(products::Column::Key)
                        .update_columns([
                            products::Column::Name,
                            products::Column::Description,
                            products::Column::Width,
                            products::Column::Height,
                            products::Column::Material,
                            products::Column::Color,
                            products::Column::Price,
                            products::Column::InStock,
                            products::Column::CreatedAt,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .context("import products")?;
            summary.products = docs.len();
        }
        if let Some(docs) = backup.orders.as_deref().filter(|d| !d.is_empty()) {
            let rows = docs
                .iter()
                .map(order_to_active)
                .collect::<anyhow::Result<Vec<_>>>()
                .map_err(|e| StorefrontError::InvalidImport(e.to_string()))?;
            orders::Entity::insert_many(rows)
                .on_conflict(
                    OnConflict::column(orders::Column::Key)
                        .update_columns([
                            orders::Column::CustomerId,
                            orders::Column::CustomerName,
                            orders::Column::ProductId,
                            orders::Column::ProductName,
                            orders::Column::ProductPrice,
                            orders::Column::Quantity,
                            orders::Column::Address,
                            orders::Column::Comments,
                            orders::Column::Status,
                            orders::Column::TotalPrice,
                            orders::Column::CreatedAt,
                            orders::Column::UpdatedAt,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .context("import orders")?;
            summary.orders = docs.len();
        }
        if let Some(docs) = backup.measurements.as_deref().filter(|d| !d.is_empty()) {
            measurements::Entity::insert_many(docs.iter().map(measurement_to_active))
                .on_conflict(
                    OnConflict::column(measurements::Column::Key)
                        .update_columns([
                            measurements::Column::MeasurerId,
                            measurements::Column::OrderId,
                            measurements::Column::Address,
                            measurements::Column::ScheduledAt,
                            measurements::Column::Status,
                            measurements::Column::Notes,
                            measurements::Column::CreatedAt,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .context("import measurements")?;
            summary.measurements = docs.len();
        }
        if let Some(docs) = backup.photos.as_deref().filter(|d| !d.is_empty()) {
            photos::Entity::insert_many(docs.iter().map(photo_to_active))
                .on_conflict(
                    OnConflict::column(photos::Column::Key)
                        .update_columns([
                            photos::Column::ProductId,
                            photos::Column::Url,
                            photos::Column::Caption,
                            photos::Column::CreatedAt,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .context("import photos")?;
            summary.photos = docs.len();
        }

        txn.commit().await.context("commit import")?;
        Ok(summary)
    }

    async fn count_documents(&self, kind: EntityKind) -> Result<u64, StorefrontError> {
        let count = match kind {
            EntityKind::Users => users::Entity::find().count(&self.db).await,
            EntityKind::Products => products::Entity::find().count(&self.db).await,
            EntityKind::Orders => orders::Entity::find().count(&self.db).await,
            EntityKind::Measurements => measurements::Entity::find().count(&self.db).await,
            EntityKind::Photos => photos::Entity::find().count(&self.db).await,
        };
        Ok(count.with_context(|| format!("count {kind}"))?)
    }

    async fn ping(&self) -> bool {
        self.db.ping().await.is_ok()
    }
}
