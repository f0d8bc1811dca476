use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use windowshop_domain::entity::{EntityKind, EntityRef};
use windowshop_domain::order::OrderStatus;
use windowshop_domain::role::Role;

// Every document type doubles as its export/import record, so the serde
// shape below is the backup file format. API responses use handler views.

/// Account record. `password_hash` is an argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_key")]
    pub key: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub phone_number: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(
        default = "Utc::now",
        serialize_with = "windowshop_core::serde::to_rfc3339_ms"
    )]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// "First Last", trimmed; either part may be empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    pub fn reference(&self) -> EntityRef {
        EntityRef::user(self.key.clone())
    }
}

/// Catalog entry. Dimensions are metres, price is in roubles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "_key")]
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub color: String,
    pub price: f64,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(
        default = "Utc::now",
        serialize_with = "windowshop_core::serde::to_rfc3339_ms"
    )]
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn reference(&self) -> EntityRef {
        EntityRef::product(self.key.clone())
    }
}

/// Largest quantity an order may carry; the `orders.quantity` column is `INTEGER`.
pub const MAX_ORDER_QUANTITY: u32 = i32::MAX as u32;

pub const QUANTITY_RANGE: &str = "must be a whole number from 1 to 2147483647";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(alias = "_key")]
    pub key: String,
    pub customer_id: String,
    #[serde(default)]
    pub customer_name: String,
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    /// Unit price captured when the order was placed.
    pub product_price: f64,
    pub quantity: u32,
    pub address: String,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    pub total_price: f64,
    #[serde(
        default = "Utc::now",
        serialize_with = "windowshop_core::serde::to_rfc3339_ms"
    )]
    pub created_at: DateTime<Utc>,
    #[serde(
        default = "Utc::now",
        serialize_with = "windowshop_core::serde::to_rfc3339_ms"
    )]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn reference(&self) -> EntityRef {
        EntityRef::order(self.key.clone())
    }

    /// Recompute `total_price` from the captured unit price.
    pub fn recompute_total(&mut self) {
        self.total_price = self.product_price * f64::from(self.quantity);
    }
}

/// On-site measurement visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(alias = "_key")]
    pub key: String,
    pub measurer_id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    pub address: String,
    #[serde(
        default,
        serialize_with = "windowshop_core::serde::opt_to_rfc3339_ms"
    )]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default = "default_measurement_status")]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(
        default = "Utc::now",
        serialize_with = "windowshop_core::serde::to_rfc3339_ms"
    )]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(alias = "_key")]
    pub key: String,
    pub product_id: String,
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(
        default = "Utc::now",
        serialize_with = "windowshop_core::serde::to_rfc3339_ms"
    )]
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

fn default_measurement_status() -> String {
    "scheduled".to_owned()
}

/// One document of any supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityDocument {
    User(User),
    Product(Product),
    Order(Order),
    Measurement(Measurement),
    Photo(Photo),
}

impl EntityDocument {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::Users,
            Self::Product(_) => EntityKind::Products,
            Self::Order(_) => EntityKind::Orders,
            Self::Measurement(_) => EntityKind::Measurements,
            Self::Photo(_) => EntityKind::Photos,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::User(d) => &d.key,
            Self::Product(d) => &d.key,
            Self::Order(d) => &d.key,
            Self::Measurement(d) => &d.key,
            Self::Photo(d) => &d.key,
        }
    }
}

// ── Edges ────────────────────────────────────────────────────────────────────

/// Edge collections, one per relationship kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeCollection {
    /// customer -> order, `created`
    UserOrders,
    /// order -> product, `contains`
    ContainProduct,
}

impl EdgeCollection {
    pub const ALL: [EdgeCollection; 2] = [Self::UserOrders, Self::ContainProduct];

    pub fn name(self) -> &'static str {
        match self {
            Self::UserOrders => "user_orders",
            Self::ContainProduct => "contain_product",
        }
    }

    pub fn edge_type(self) -> &'static str {
        match self {
            Self::UserOrders => "created",
            Self::ContainProduct => "contains",
        }
    }
}

/// Directed, append-only link between two documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub key: String,
    pub from: EntityRef,
    pub to: EntityRef,
    pub edge_type: String,
    #[serde(serialize_with = "windowshop_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

// ── Identity ─────────────────────────────────────────────────────────────────

/// The caller, as asserted by a valid access token and confirmed by one user lookup.
///
/// `role` comes from the token claim, not from the stored user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub key: String,
    pub username: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
}

impl CurrentUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    pub fn reference(&self) -> EntityRef {
        EntityRef::user(self.key.clone())
    }
}

// ── Backup ───────────────────────────────────────────────────────────────────

/// Export/import bundle. A missing collection is left untouched on import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<Vec<Order>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurements: Option<Vec<Measurement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos: Option<Vec<Photo>>,
}

/// Documents written per collection by one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub products: usize,
    pub orders: usize,
    pub users: usize,
    pub measurements: usize,
    pub photos: usize,
}

/// Document counts shown on the dashboard and `/api/health`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionCounts {
    pub products: u64,
    pub orders: u64,
    pub users: u64,
}
