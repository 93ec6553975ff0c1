//! Admin dashboard route handlers.
//!
//! Every handler requires an admin user via `RequireAdmin`. Product
//! payloads reuse [`NewProduct`]; the price type already rejects negative
//! values at deserialization, so only the string fields need checking here.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shophub_core::{OrderId, OrderStatus, ProductId};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{NewProduct, Order, Product};
use crate::state::AppState;
use crate::store::{OrderRepository, ProductRepository, UserRepository};

/// Default number of orders on the dashboard.
const RECENT_ORDERS_LIMIT: usize = 5;

/// Dashboard statistics.
#[derive(Debug, Serialize)]
pub struct Stats {
    pub total_revenue: Decimal,
    pub total_products: usize,
    pub total_orders: usize,
    pub total_users: usize,
}

/// `GET /admin/stats` - dashboard statistics.
#[instrument(skip(state, _admin))]
pub async fn stats(State(state): State<AppState>, _admin: RequireAdmin) -> Result<Json<Stats>> {
    let store = state.store();
    let orders = OrderRepository::new(store).list()?;

    Ok(Json(Stats {
        total_revenue: orders.iter().map(|o| o.total).sum(),
        total_products: ProductRepository::new(store).count()?,
        total_orders: orders.len(),
        total_users: UserRepository::new(store).count()?,
    }))
}

/// Query parameters for the recent orders listing.
#[derive(Debug, Default, Deserialize)]
pub struct RecentOrdersParams {
    pub limit: Option<usize>,
}

/// `GET /admin/orders` - most recent orders, newest first.
#[instrument(skip(state, _admin))]
pub async fn recent_orders(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(params): Query<RecentOrdersParams>,
) -> Result<Json<Vec<Order>>> {
    let limit = params.limit.unwrap_or(RECENT_ORDERS_LIMIT);
    let orders = OrderRepository::new(state.store()).list_recent(limit)?;
    Ok(Json(orders))
}

fn validate_product(fields: &NewProduct) -> Result<()> {
    if fields.name.trim().is_empty() {
        return Err(AppError::Validation("product name is required".to_owned()));
    }
    if fields.description.trim().is_empty() {
        return Err(AppError::Validation(
            "product description is required".to_owned(),
        ));
    }
    if fields.image.trim().is_empty() {
        return Err(AppError::Validation("product image is required".to_owned()));
    }
    Ok(())
}

/// `POST /admin/products` - add a product to the catalog.
#[instrument(skip(state, _admin, fields), fields(name = %fields.name))]
pub async fn create_product(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(fields): Json<NewProduct>,
) -> Result<impl IntoResponse> {
    validate_product(&fields)?;

    let product = ProductRepository::new(state.store()).create(fields)?;
    tracing::info!(product_id = %product.id, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /admin/products/{id}` - replace a product's fields.
#[instrument(skip(state, _admin, fields))]
pub async fn update_product(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<ProductId>,
    Json(fields): Json<NewProduct>,
) -> Result<Json<Product>> {
    validate_product(&fields)?;

    let product = ProductRepository::new(state.store()).update(&id, fields)?;
    Ok(Json(product))
}

/// `DELETE /admin/products/{id}` - remove a product from the catalog.
///
/// Carts and order snapshots keep their own copies; deleting a product
/// does not touch them.
#[instrument(skip(state, _admin))]
pub async fn delete_product(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    let deleted = ProductRepository::new(state.store()).delete(&id)?;
    if !deleted {
        return Err(AppError::NotFound(format!("product {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Status transition payload.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// `POST /admin/orders/{id}/status` - move an order to a new status.
#[instrument(skip(state, _admin))]
pub async fn update_order_status(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<OrderId>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.store()).update_status(&id, payload.status)?;
    tracing::info!(order_id = %order.id, status = %order.status, "Order status updated");
    Ok(Json(order))
}
