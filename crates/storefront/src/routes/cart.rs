//! Cart and checkout route handlers.
//!
//! The cart lives in the cookie session; each handler loads it, applies
//! one operation, and writes it back. Prices come from the product
//! snapshot taken at add time, so a later catalog edit doesn't reprice
//! lines already in a cart.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use shophub_core::{Cart, CartLine, ProductId};

use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::models::session_keys;
use crate::services::CheckoutService;
use crate::state::AppState;
use crate::store::ProductRepository;

/// Cart display data.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub total: Decimal,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().to_vec(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, defaulting to empty.
pub async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Write the cart back to the session.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// A cart mutation naming a product.
#[derive(Debug, Deserialize)]
pub struct ProductRef {
    pub product_id: ProductId,
}

/// Set-quantity payload.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantity {
    pub product_id: ProductId,
    pub quantity: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /cart` - cart contents.
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// `POST /cart/add` - add one unit of a product, merging duplicate lines.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ProductRef>,
) -> Result<Json<CartView>> {
    let product = ProductRepository::new(state.store())
        .get(&payload.product_id)?
        .ok_or_else(|| AppError::NotFound(format!("product {}", payload.product_id)))?;

    if !product.in_stock() {
        return Err(AppError::Validation(format!(
            "{} is out of stock",
            product.name
        )));
    }

    let mut cart = load_cart(&session).await?;
    cart.add(product.to_cart_line());
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// `POST /cart/update` - set a line's quantity; zero removes the line.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(payload): Json<UpdateQuantity>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.update(&payload.product_id, payload.quantity);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// `POST /cart/remove` - drop a line.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(payload): Json<ProductRef>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.remove(&payload.product_id);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// `POST /cart/clear` - empty the cart.
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// `GET /cart/count` - total item count for the header badge.
pub async fn count(session: Session) -> Result<Json<serde_json::Value>> {
    let cart = load_cart(&session).await?;
    Ok(Json(serde_json::json!({ "count": cart.item_count() })))
}

/// `POST /checkout` - place an order from the cart.
///
/// Requires a logged-in user and a non-empty cart; on success the order is
/// returned with `201 Created` and the session cart is emptied.
#[instrument(skip(state, session, user))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
) -> Result<impl IntoResponse> {
    let mut cart = load_cart(&session).await?;

    let order = CheckoutService::new(state.store()).place_order(user.as_ref(), &mut cart)?;

    save_cart(&session, &cart).await?;
    Ok((StatusCode::CREATED, Json(order)))
}
