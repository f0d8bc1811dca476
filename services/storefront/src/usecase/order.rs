use std::collections::BTreeMap;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use windowshop_domain::order::OrderStatus;

use crate::domain::repository::{EdgeRepository, OrderRepository, ProductRepository};
use crate::domain::types::{CurrentUser, MAX_ORDER_QUANTITY, Order, QUANTITY_RANGE};
use crate::error::{FieldErrors, StorefrontError};
use crate::usecase::edge::LinkOrderCreationUseCase;

// ── CreateOrder ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderInput {
    pub product_id: String,
    pub quantity: u32,
    pub address: String,
    pub comments: Option<String>,
}

impl CreateOrderInput {
    /// Parse the order form. `quantity` defaults to 1 when absent.
    pub fn parse(form: &BTreeMap<String, String>) -> Result<Self, StorefrontError> {
        let mut errors = FieldErrors::new();
        let field = |key: &str| form.get(key).map(|v| v.trim()).unwrap_or_default();

        let product_id = field("product_id");
        if product_id.is_empty() {
            errors.insert("product_id".into(), "must not be empty".into());
        }
        let quantity = match form.get("quantity").map(|v| v.trim()) {
            None | Some("") => 1,
            Some(raw) => match raw.parse::<u32>() {
                Ok(q) if (1..=MAX_ORDER_QUANTITY).contains(&q) => q,
                _ => {
                    errors.insert("quantity".into(), QUANTITY_RANGE.into());
                    0
                }
            },
        };
        let address = field("address");
        if address.is_empty() {
            errors.insert("address".into(), "must not be empty".into());
        }
        let comments = Some(field("comments"))
            .filter(|c| !c.is_empty())
            .map(str::to_owned);

        if !errors.is_empty() {
            return Err(StorefrontError::validation(errors, form.clone()));
        }
        Ok(Self {
            product_id: product_id.to_owned(),
            quantity,
            address: address.to_owned(),
            comments,
        })
    }
}

pub struct CreateOrderUseCase<P: ProductRepository, O: OrderRepository, E: EdgeRepository> {
    pub products: P,
    pub orders: O,
    pub edges: E,
}

impl<P: ProductRepository, O: OrderRepository, E: EdgeRepository> CreateOrderUseCase<P, O, E> {
    pub async fn execute(
        &self,
        customer: &CurrentUser,
        input: CreateOrderInput,
    ) -> Result<Order, StorefrontError> {
        let product = self
            .products
            .find_product(&input.product_id)
            .await?
            .ok_or(StorefrontError::ProductNotFound)?;

        let now = Utc::now();
        let mut order = Order {
            key: Uuid::now_v7().to_string(),
            customer_id: customer.key.clone(),
            customer_name: customer.full_name(),
            product_id: product.key.clone(),
            product_name: product.name.clone(),
            product_price: product.price,
            quantity: input.quantity,
            address: input.address,
            comments: input.comments,
            status: OrderStatus::New,
            total_price: 0.0,
            created_at: now,
            updated_at: now,
        };
        order.recompute_total();
        self.orders.create_order(&order).await?;
        info!(
            order = %order.key,
            customer = %customer.username,
            product = %product.key,
            quantity = order.quantity,
            "order created"
        );

        let linker = LinkOrderCreationUseCase { edges: &self.edges };
        linker
            .execute(customer.reference(), order.reference(), product.reference())
            .await?;
        Ok(order)
    }
}

// ── ListMyOrders ─────────────────────────────────────────────────────────────

pub struct ListMyOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> ListMyOrdersUseCase<O> {
    pub async fn execute(&self, customer: &CurrentUser) -> Result<Vec<Order>, StorefrontError> {
        self.orders.list_orders_by_customer(&customer.key).await
    }
}

// ── ListOrders ───────────────────────────────────────────────────────────────

pub struct ListOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> ListOrdersUseCase<O> {
    pub async fn execute(&self) -> Result<Vec<Order>, StorefrontError> {
        self.orders.list_orders().await
    }
}
