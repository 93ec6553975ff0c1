//! Order history route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::Order;
use crate::state::AppState;
use crate::store::OrderRepository;

/// `GET /orders` - the caller's orders, newest first.
#[instrument(skip(state, user), fields(user_id = %user.0.id))]
pub async fn index(
    State(state): State<AppState>,
    user: RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.store()).list_for_user(&user.0.id)?;
    Ok(Json(orders))
}
