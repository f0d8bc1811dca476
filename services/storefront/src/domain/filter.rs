//! Catalog search parameters, normalized.
//!
//! Raw query parameters arrive as untyped strings. [`ProductFilter::normalize`]
//! turns them into typed, optional constraints; anything unusable is dropped
//! rather than rejected, so a bad bound never fails a search.

use std::collections::BTreeMap;

/// Value of `in_stock` that turns the constraint on. Anything else means "no constraint".
pub const IN_STOCK_SENTINEL: &str = "on";

pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";
pub const MATERIAL: &str = "material";
pub const COLOR: &str = "color";
pub const MIN_PRICE: &str = "min_price";
pub const MAX_PRICE: &str = "max_price";
pub const MIN_WIDTH: &str = "min_width";
pub const MAX_WIDTH: &str = "max_width";
pub const MIN_HEIGHT: &str = "min_height";
pub const MAX_HEIGHT: &str = "max_height";
pub const IN_STOCK: &str = "in_stock";

/// Normalized product search constraints. `None` means unconstrained.
///
/// Text fields are trimmed and lower-cased; numeric bounds are finite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub material: Option<String>,
    pub color: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
    /// `Some(true)` only; "not in stock" is not expressible.
    pub in_stock: Option<bool>,
}

impl ProductFilter {
    /// Build a filter from raw query parameters. Unknown keys are ignored.
    pub fn normalize(raw: &BTreeMap<String, String>) -> Self {
        Self {
            name: text(raw, NAME),
            description: text(raw, DESCRIPTION),
            material: text(raw, MATERIAL),
            color: text(raw, COLOR),
            min_price: number(raw, MIN_PRICE),
            max_price: number(raw, MAX_PRICE),
            min_width: number(raw, MIN_WIDTH),
            max_width: number(raw, MAX_WIDTH),
            min_height: number(raw, MIN_HEIGHT),
            max_height: number(raw, MAX_HEIGHT),
            in_stock: raw
                .get(IN_STOCK)
                .filter(|v| v.as_str() == IN_STOCK_SENTINEL)
                .map(|_| true),
        }
    }

    /// Render back to raw parameters. `normalize(&f.to_params()) == f` for any
    /// normalized `f`.
    pub fn to_params(&self) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        let texts = [
            (NAME, &self.name),
            (DESCRIPTION, &self.description),
            (MATERIAL, &self.material),
            (COLOR, &self.color),
        ];
        for (key, value) in texts {
            if let Some(v) = value {
                out.insert(key.to_owned(), v.clone());
            }
        }
        let numbers = [
            (MIN_PRICE, self.min_price),
            (MAX_PRICE, self.max_price),
            (MIN_WIDTH, self.min_width),
            (MAX_WIDTH, self.max_width),
            (MIN_HEIGHT, self.min_height),
            (MAX_HEIGHT, self.max_height),
        ];
        for (key, value) in numbers {
            if let Some(v) = value {
                // `{}` on f64 prints the shortest string that parses back exactly.
                out.insert(key.to_owned(), v.to_string());
            }
        }
        if self.in_stock == Some(true) {
            out.insert(IN_STOCK.to_owned(), IN_STOCK_SENTINEL.to_owned());
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn text(raw: &BTreeMap<String, String>, key: &str) -> Option<String> {
    raw.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

fn number(raw: &BTreeMap<String, String>, key: &str) -> Option<f64> {
    raw.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
