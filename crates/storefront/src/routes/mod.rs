//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Health check
//!
//! # Products
//! GET  /products                - Product listing (?category=&q=&page=)
//! GET  /products/{id}           - Product detail
//!
//! # Cart (session-backed)
//! GET  /cart                    - Cart contents
//! POST /cart/add                - Add a product (quantity 1, merges)
//! POST /cart/update             - Set a line's quantity (0 removes)
//! POST /cart/remove             - Remove a line
//! POST /cart/clear              - Empty the cart
//! GET  /cart/count              - Total item count
//!
//! # Checkout
//! POST /checkout                - Place an order from the cart (requires auth)
//! GET  /orders                  - The caller's order history (requires auth)
//!
//! # Auth
//! POST /auth/register           - Register and log in
//! POST /auth/login              - Log in
//! POST /auth/logout             - Log out
//! GET  /auth/me                 - The logged-in user
//!
//! # Admin (requires admin)
//! GET    /admin/stats               - Dashboard statistics
//! GET    /admin/orders              - Recent orders (?limit=)
//! POST   /admin/products            - Create a product
//! PUT    /admin/products/{id}       - Update a product
//! DELETE /admin/products/{id}       - Delete a product
//! POST   /admin/orders/{id}/status  - Move an order's status
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(admin::stats))
        .route("/orders", get(admin::recent_orders))
        .route("/products", post(admin::create_product))
        .route(
            "/products/{id}",
            put(admin::update_product).delete(admin::delete_product),
        )
        .route("/orders/{id}/status", post(admin::update_order_status))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout and order history
        .route("/checkout", post(cart::checkout))
        .route("/orders", get(orders::index))
        // Auth routes
        .nest("/auth", auth_routes())
        // Admin routes
        .nest("/admin", admin_routes())
}
