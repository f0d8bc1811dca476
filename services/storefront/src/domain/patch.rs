//! Typed partial updates for the generic entity editor.
//!
//! Form fields arrive as strings. They are coerced exactly once, here, into a
//! per-kind patch where every field is optional; stores apply only the fields
//! that are `Some`.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use windowshop_domain::entity::EntityKind;
use windowshop_domain::order::OrderStatus;
use windowshop_domain::role::Role;

use crate::domain::types::{
    EntityDocument, MAX_ORDER_QUANTITY, Measurement, Order, Photo, Product, QUANTITY_RANGE, User,
};
use crate::error::FieldErrors;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub role: Option<Role>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub material: Option<String>,
    pub color: Option<String>,
    pub price: Option<f64>,
    pub in_stock: Option<bool>,
}

/// `comments: Some(None)` clears the comment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub quantity: Option<u32>,
    pub address: Option<String>,
    pub comments: Option<Option<String>>,
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementPatch {
    pub measurer_id: Option<String>,
    pub order_id: Option<Option<String>>,
    pub address: Option<String>,
    pub scheduled_at: Option<Option<DateTime<Utc>>>,
    pub status: Option<String>,
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoPatch {
    pub product_id: Option<String>,
    pub url: Option<String>,
    pub caption: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityPatch {
    User(UserPatch),
    Product(ProductPatch),
    Order(OrderPatch),
    Measurement(MeasurementPatch),
    Photo(PhotoPatch),
}

impl EntityPatch {
    /// Coerce form fields for `kind`. Every problem is reported, keyed by field.
    pub fn from_fields(
        kind: EntityKind,
        fields: &BTreeMap<String, String>,
    ) -> Result<Self, FieldErrors> {
        let mut p = FieldParser::new(fields);
        let patch = match kind {
            EntityKind::Users => Self::User(UserPatch {
                username: p.required_text("username"),
                role: p.parsed("role", "unknown role"),
                first_name: p.text("first_name"),
                last_name: p.text("last_name"),
                phone_number: p.required_text("phone_number"),
                is_active: p.flag("is_active"),
            }),
            EntityKind::Products => Self::Product(ProductPatch {
                name: p.required_text("name"),
                description: p.text("description"),
                width: p.positive("width"),
                height: p.positive("height"),
                material: p.text("material"),
                color: p.text("color"),
                price: p.positive("price"),
                in_stock: p.flag("in_stock"),
            }),
            EntityKind::Orders => Self::Order(OrderPatch {
                quantity: p.quantity("quantity"),
                address: p.required_text("address"),
                comments: p.optional_text("comments"),
                status: p.parsed("status", "unknown status"),
            }),
            EntityKind::Measurements => Self::Measurement(MeasurementPatch {
                measurer_id: p.required_text("measurer_id"),
                order_id: p.optional_text("order_id"),
                address: p.required_text("address"),
                scheduled_at: p.optional_timestamp("scheduled_at"),
                status: p.required_text("status"),
                notes: p.optional_text("notes"),
            }),
            EntityKind::Photos => Self::Photo(PhotoPatch {
                product_id: p.required_text("product_id"),
                url: p.required_text("url"),
                caption: p.optional_text("caption"),
            }),
        };
        p.finish()?;
        if patch.is_empty() {
            let mut errors = FieldErrors::new();
            errors.insert("_".into(), "no fields to update".into());
            return Err(errors);
        }
        Ok(patch)
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::Users,
            Self::Product(_) => EntityKind::Products,
            Self::Order(_) => EntityKind::Orders,
            Self::Measurement(_) => EntityKind::Measurements,
            Self::Photo(_) => EntityKind::Photos,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::User(p) => *p == UserPatch::default(),
            Self::Product(p) => *p == ProductPatch::default(),
            Self::Order(p) => *p == OrderPatch::default(),
            Self::Measurement(p) => *p == MeasurementPatch::default(),
            Self::Photo(p) => *p == PhotoPatch::default(),
        }
    }

    /// Role the patch assigns, if it is a user patch that touches the role.
    pub fn new_role(&self) -> Option<Role> {
        match self {
            Self::User(p) => p.role,
            _ => None,
        }
    }

    /// Merge into a document of the same kind. Returns `false` on kind mismatch.
    pub fn apply(&self, doc: &mut EntityDocument, now: DateTime<Utc>) -> bool {
        match (self, doc) {
            (Self::User(p), EntityDocument::User(d)) => p.apply(d),
            (Self::Product(p), EntityDocument::Product(d)) => p.apply(d),
            (Self::Order(p), EntityDocument::Order(d)) => p.apply(d, now),
            (Self::Measurement(p), EntityDocument::Measurement(d)) => p.apply(d),
            (Self::Photo(p), EntityDocument::Photo(d)) => p.apply(d),
            _ => return false,
        }
        true
    }
}

impl UserPatch {
    pub fn apply(&self, user: &mut User) {
        set(&mut user.username, &self.username);
        set(&mut user.role, &self.role);
        set(&mut user.first_name, &self.first_name);
        set(&mut user.last_name, &self.last_name);
        set(&mut user.phone_number, &self.phone_number);
        set(&mut user.is_active, &self.is_active);
    }
}

impl ProductPatch {
    pub fn apply(&self, product: &mut Product) {
        set(&mut product.name, &self.name);
        set(&mut product.description, &self.description);
        set(&mut product.width, &self.width);
        set(&mut product.height, &self.height);
        set(&mut product.material, &self.material);
        set(&mut product.color, &self.color);
        set(&mut product.price, &self.price);
        set(&mut product.in_stock, &self.in_stock);
    }
}

impl OrderPatch {
    /// Bumps `updated_at`; recomputes `total_price` when quantity changes.
    pub fn apply(&self, order: &mut Order, now: DateTime<Utc>) {
        set(&mut order.address, &self.address);
        set(&mut order.comments, &self.comments);
        set(&mut order.status, &self.status);
        if let Some(quantity) = self.quantity {
            order.quantity = quantity;
            order.recompute_total();
        }
        order.updated_at = now;
    }
}

impl MeasurementPatch {
    pub fn apply(&self, m: &mut Measurement) {
        set(&mut m.measurer_id, &self.measurer_id);
        set(&mut m.order_id, &self.order_id);
        set(&mut m.address, &self.address);
        set(&mut m.scheduled_at, &self.scheduled_at);
        set(&mut m.status, &self.status);
        set(&mut m.notes, &self.notes);
    }
}

impl PhotoPatch {
    pub fn apply(&self, photo: &mut Photo) {
        set(&mut photo.product_id, &self.product_id);
        set(&mut photo.url, &self.url);
        set(&mut photo.caption, &self.caption);
    }
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

// ── Field coercion ───────────────────────────────────────────────────────────

struct FieldParser<'a> {
    fields: &'a BTreeMap<String, String>,
    consumed: Vec<&'static str>,
    errors: FieldErrors,
}

impl<'a> FieldParser<'a> {
    fn new(fields: &'a BTreeMap<String, String>) -> Self {
        Self {
            fields,
            consumed: Vec::new(),
            errors: FieldErrors::new(),
        }
    }

    fn take(&mut self, key: &'static str) -> Option<&'a str> {
        self.consumed.push(key);
        self.fields.get(key).map(|v| v.trim())
    }

    fn fail(&mut self, key: &str, message: &str) {
        self.errors.insert(key.to_owned(), message.to_owned());
    }

    fn text(&mut self, key: &'static str) -> Option<String> {
        self.take(key).map(str::to_owned)
    }

    fn required_text(&mut self, key: &'static str) -> Option<String> {
        let value = self.take(key)?;
        if value.is_empty() {
            self.fail(key, "must not be empty");
            return None;
        }
        Some(value.to_owned())
    }

    /// Present and blank clears the field.
    fn optional_text(&mut self, key: &'static str) -> Option<Option<String>> {
        self.take(key)
            .map(|v| (!v.is_empty()).then(|| v.to_owned()))
    }

    fn positive(&mut self, key: &'static str) -> Option<f64> {
        let value = self.take(key)?;
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => Some(v),
            _ => {
                self.fail(key, "must be a positive number");
                None
            }
        }
    }

    fn quantity(&mut self, key: &'static str) -> Option<u32> {
        let value = self.take(key)?;
        match value.parse::<u32>() {
            Ok(v) if (1..=MAX_ORDER_QUANTITY).contains(&v) => Some(v),
            _ => {
                self.fail(key, QUANTITY_RANGE);
                None
            }
        }
    }

    fn flag(&mut self, key: &'static str) -> Option<bool> {
        let value = self.take(key)?;
        match value {
            "true" | "on" | "1" => Some(true),
            "false" | "off" | "0" => Some(false),
            _ => {
                self.fail(key, "must be true or false");
                None
            }
        }
    }

    fn parsed<T: FromStr>(&mut self, key: &'static str, message: &str) -> Option<T> {
        let value = self.take(key)?;
        match value.parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                self.fail(key, message);
                None
            }
        }
    }

    fn optional_timestamp(&mut self, key: &'static str) -> Option<Option<DateTime<Utc>>> {
        let value = self.take(key)?;
        if value.is_empty() {
            return Some(None);
        }
        match DateTime::parse_from_rfc3339(value) {
            Ok(v) => Some(Some(v.with_timezone(&Utc))),
            Err(_) => {
                self.fail(key, "must be an RFC 3339 timestamp");
                None
            }
        }
    }

    /// Anything not consumed is unknown or read-only for this kind.
    fn finish(mut self) -> Result<(), FieldErrors> {
        let rejected: Vec<String> = self
            .fields
            .keys()
            .filter(|k| !self.consumed.contains(&k.as_str()))
            .cloned()
            .collect();
        for key in rejected {
            self.fail(&key, "unknown or read-only field");
        }
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
