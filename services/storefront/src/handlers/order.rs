use std::collections::BTreeMap;

use axum::{Form, Json, extract::State, http::StatusCode};

use crate::domain::access::CUSTOMER;
use crate::domain::repository::Store;
use crate::domain::types::Order;
use crate::error::StorefrontError;
use crate::extract::MaybeUser;
use crate::state::AppState;
use crate::usecase::order::{CreateOrderInput, CreateOrderUseCase, ListMyOrdersUseCase};

// ── POST /order/create ───────────────────────────────────────────────────────

pub async fn create_order<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
    Form(form): Form<BTreeMap<String, String>>,
) -> Result<(StatusCode, Json<Order>), StorefrontError> {
    let customer = user.require(CUSTOMER)?;
    let input = CreateOrderInput::parse(&form)?;
    let usecase = CreateOrderUseCase {
        products: state.repo(),
        orders: state.repo(),
        edges: state.repo(),
    };
    let order = usecase.execute(customer, input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

// ── GET /my-orders ───────────────────────────────────────────────────────────

pub async fn my_orders<S: Store>(
    user: MaybeUser,
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Order>>, StorefrontError> {
    let customer = user.require(CUSTOMER)?;
    let usecase = ListMyOrdersUseCase {
        orders: state.repo(),
    };
    Ok(Json(usecase.execute(customer).await?))
}
