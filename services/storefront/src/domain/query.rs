//! Conjunctive product query built from a [`ProductFilter`].
//!
//! The clause list is backend-neutral: `infra::db` renders it to SQL with bound
//! parameters, `infra::memory` evaluates it with [`ProductQuery::matches`].

use crate::domain::filter::ProductFilter;
use crate::domain::types::Product;

/// Product attribute a clause constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Description,
    Material,
    Color,
    Price,
    Width,
    Height,
    InStock,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Case-insensitive substring. The needle is already lower-cased.
    Contains(ProductField, String),
    /// Inclusive lower bound.
    AtLeast(ProductField, f64),
    /// Inclusive upper bound.
    AtMost(ProductField, f64),
    Equals(ProductField, bool),
}

/// Ordered list of clauses, all of which must hold. Empty matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub clauses: Vec<Clause>,
}

impl ProductQuery {
    /// Compose clauses in a fixed field order: name, description, material,
    /// color, price, width, height, in-stock. Same filter, same query.
    pub fn compose(filter: &ProductFilter) -> Self {
        let mut clauses = Vec::new();

        let texts = [
            (ProductField::Name, &filter.name),
            (ProductField::Description, &filter.description),
            (ProductField::Material, &filter.material),
            (ProductField::Color, &filter.color),
        ];
        for (field, value) in texts {
            if let Some(needle) = value {
                clauses.push(Clause::Contains(field, needle.clone()));
            }
        }

        let ranges = [
            (ProductField::Price, filter.min_price, filter.max_price),
            (ProductField::Width, filter.min_width, filter.max_width),
            (ProductField::Height, filter.min_height, filter.max_height),
        ];
        for (field, min, max) in ranges {
            if let Some(min) = min {
                clauses.push(Clause::AtLeast(field, min));
            }
            if let Some(max) = max {
                clauses.push(Clause::AtMost(field, max));
            }
        }

        if let Some(flag) = filter.in_stock {
            clauses.push(Clause::Equals(ProductField::InStock, flag));
        }

        Self { clauses }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.clauses.iter().all(|clause| clause.matches(product))
    }
}

impl Clause {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::Contains(field, needle) => text_of(product, *field)
                .is_some_and(|hay| hay.to_lowercase().contains(needle.as_str())),
            Self::AtLeast(field, bound) => number_of(product, *field).is_some_and(|v| v >= *bound),
            Self::AtMost(field, bound) => number_of(product, *field).is_some_and(|v| v <= *bound),
            Self::Equals(field, flag) => flag_of(product, *field).is_some_and(|v| v == *flag),
        }
    }
}

fn text_of(product: &Product, field: ProductField) -> Option<&str> {
    match field {
        ProductField::Name => Some(&product.name),
        ProductField::Description => Some(&product.description),
        ProductField::Material => Some(&product.material),
        ProductField::Color => Some(&product.color),
        _ => None,
    }
}

fn number_of(product: &Product, field: ProductField) -> Option<f64> {
    match field {
        ProductField::Price => Some(product.price),
        ProductField::Width => Some(product.width),
        ProductField::Height => Some(product.height),
        _ => None,
    }
}

fn flag_of(product: &Product, field: ProductField) -> Option<bool> {
    match field {
        ProductField::InStock => Some(product.in_stock),
        _ => None,
    }
}
