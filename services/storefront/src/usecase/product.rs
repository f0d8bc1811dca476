use std::collections::BTreeMap;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::filter::ProductFilter;
use crate::domain::query::ProductQuery;
use crate::domain::repository::ProductRepository;
use crate::domain::types::Product;
use crate::error::{FieldErrors, StorefrontError};

// ── SearchProducts ───────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct SearchProductsOutput {
    pub products: Vec<Product>,
    pub filter: ProductFilter,
}

pub struct SearchProductsUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> SearchProductsUseCase<R> {
    pub async fn execute(
        &self,
        raw: &BTreeMap<String, String>,
    ) -> Result<SearchProductsOutput, StorefrontError> {
        let filter = ProductFilter::normalize(raw);
        let query = ProductQuery::compose(&filter);
        let products = self.repo.search_products(&query).await?;
        debug!(
            clauses = query.clauses.len(),
            hits = products.len(),
            "product search"
        );
        Ok(SearchProductsOutput { products, filter })
    }
}

// ── ListInStockProducts ──────────────────────────────────────────────────────

/// Products a customer can order right now.
pub struct ListInStockProductsUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> ListInStockProductsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Product>, StorefrontError> {
        let filter = ProductFilter {
            in_stock: Some(true),
            ..Default::default()
        };
        self.repo
            .search_products(&ProductQuery::compose(&filter))
            .await
    }
}

// ── ListProducts ─────────────────────────────────────────────────────────────

pub struct ListProductsUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> ListProductsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Product>, StorefrontError> {
        self.repo.list_products().await
    }
}

// ── CreateProduct ────────────────────────────────────────────────────────────

pub const DEFAULT_COLOR: &str = "белый";

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductInput {
    pub name: String,
    pub description: String,
    pub width: f64,
    pub height: f64,
    pub material: String,
    pub color: String,
    pub price: f64,
    pub in_stock: bool,
}

impl CreateProductInput {
    /// Parse the product form; every invalid field is reported and the raw
    /// form is echoed back. An absent `in_stock` means in stock, an absent
    /// color means white.
    pub fn parse(form: &BTreeMap<String, String>) -> Result<Self, StorefrontError> {
        let mut errors = FieldErrors::new();
        let text = |key: &str| form.get(key).map(|v| v.trim()).unwrap_or_default();

        let name = text("name");
        if name.is_empty() {
            errors.insert("name".into(), "must not be empty".into());
        }
        let mut positive = |key: &str| match text(key).parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => v,
            _ => {
                errors.insert(key.to_owned(), "must be a positive number".into());
                0.0
            }
        };
        let width = positive("width");
        let height = positive("height");
        let price = positive("price");

        if !errors.is_empty() {
            return Err(StorefrontError::validation(errors, form.clone()));
        }
        Ok(Self {
            name: name.to_owned(),
            description: text("description").to_owned(),
            width,
            height,
            material: text("material").to_owned(),
            color: Some(text("color"))
                .filter(|c| !c.is_empty())
                .unwrap_or(DEFAULT_COLOR)
                .to_owned(),
            price,
            in_stock: form
                .get("in_stock")
                .is_none_or(|v| v.trim().eq_ignore_ascii_case("on")),
        })
    }
}

pub struct CreateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> CreateProductUseCase<R> {
    pub async fn execute(&self, input: CreateProductInput) -> Result<Product, StorefrontError> {
        let product = Product {
            key: Uuid::now_v7().to_string(),
            name: input.name,
            description: input.description,
            width: input.width,
            height: input.height,
            material: input.material,
            color: input.color,
            price: input.price,
            in_stock: input.in_stock,
            created_at: Utc::now(),
        };
        self.repo.create_product(&product).await?;
        info!(product = %product.key, name = %product.name, "product created");
        Ok(product)
    }
}
