use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Serialize;

use crate::domain::access::CUSTOMER;
use crate::domain::repository::Store;
use crate::domain::types::Product;
use crate::error::StorefrontError;
use crate::extract::MaybeUser;
use crate::state::AppState;
use crate::usecase::product::{ListInStockProductsUseCase, SearchProductsUseCase};

// ── GET /products ────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProductSearchResponse {
    pub products: Vec<Product>,
    /// Raw parameters as received, for re-populating the filter form.
    pub filters: BTreeMap<String, String>,
    /// The constraints actually applied.
    pub applied: BTreeMap<String, String>,
}

pub async fn search_products<S: Store>(
    State(state): State<AppState<S>>,
    Query(raw): Query<BTreeMap<String, String>>,
) -> Result<Json<ProductSearchResponse>, StorefrontError> {
    let usecase = SearchProductsUseCase { repo: state.repo() };
    let out = usecase.execute(&raw).await?;
    Ok(Json(ProductSearchResponse {
        products: out.products,
        applied: out.filter.to_params(),
        filters: raw,
    }))
}

// ── GET /order/new ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct OrderFormResponse {
    pub products: Vec<Product>,
}

pub async fn order_form<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
) -> Result<Json<OrderFormResponse>, StorefrontError> {
    user.require(CUSTOMER)?;
    let usecase = ListInStockProductsUseCase { repo: state.repo() };
    Ok(Json(OrderFormResponse {
        products: usecase.execute().await?,
    }))
}
