//! Integration tests for the storefront API.
//!
//! These run against the full router with an in-memory record store, so
//! they exercise the same stack as the binary: session layer, extractors,
//! and handlers. Session state is carried between requests by replaying
//! the session cookie by hand.

use axum::{
    Router,
    body::Body,
    http::{
        Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    },
    response::Response,
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use shophub_core::{Category, Email, Price, Role};
use shophub_storefront::config::StorefrontConfig;
use shophub_storefront::models::NewProduct;
use shophub_storefront::state::AppState;
use shophub_storefront::store::{ProductRepository, Store, UserRepository};

const ADMIN_EMAIL: &str = "admin@shophub.dev";
const ADMIN_PASSWORD: &str = "admin123";

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        data_dir: std::env::temp_dir(),
    }
}

fn product_fields(name: &str, cents: i64, category: Category, stock: u32) -> NewProduct {
    NewProduct {
        name: name.to_owned(),
        price: Price::new(Decimal::new(cents, 2)).unwrap(),
        category,
        description: format!("{name} description"),
        stock,
        image: "https://example.com/p.jpg".to_owned(),
    }
}

/// Build the app over a seeded in-memory store.
///
/// Returns the router and the IDs of the seeded products, in seed order.
fn test_app(products: &[NewProduct]) -> (Router, Vec<String>) {
    let store = Store::in_memory();

    let ids = products
        .iter()
        .map(|fields| {
            ProductRepository::new(&store)
                .create(fields.clone())
                .unwrap()
                .id
                .into_inner()
        })
        .collect();

    UserRepository::new(&store)
        .create(
            Email::parse(ADMIN_EMAIL).unwrap(),
            ADMIN_PASSWORD.to_owned(),
            Role::Admin,
        )
        .unwrap();

    let state = AppState::new(test_config(), store);
    (shophub_storefront::app(state), ids)
}

/// A test client that replays the session cookie like a browser would.
struct Client {
    app: Router,
    cookie: Option<String>,
}

impl Client {
    fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    async fn request(&mut self, method: &str, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(COOKIE, cookie);
        }

        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(SET_COOKIE) {
            let raw = set_cookie.to_str().unwrap();
            // Keep only the name=value pair
            self.cookie = Some(raw.split(';').next().unwrap_or(raw).to_owned());
        }

        response
    }

    async fn get(&mut self, uri: &str) -> Response {
        self.request("GET", uri, None).await
    }

    async fn post(&mut self, uri: &str, body: Value) -> Response {
        self.request("POST", uri, Some(body)).await
    }

    async fn login(&mut self, email: &str, password: &str) {
        let response = self
            .post("/auth/login", json!({ "email": email, "password": password }))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Health & Products
// ============================================================================

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app(&[]);
    let response = Client::new(app).get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_product_listing_paginates_at_eight() {
    let products: Vec<_> = (0..10)
        .map(|i| product_fields(&format!("Product {i}"), 1000, Category::Books, 5))
        .collect();
    let (app, _) = test_app(&products);
    let mut client = Client::new(app);

    let page1 = body_json(client.get("/products").await).await;
    assert_eq!(page1["products"].as_array().unwrap().len(), 8);
    assert_eq!(page1["page"], 1);
    assert_eq!(page1["total_pages"], 2);
    assert_eq!(page1["total"], 10);

    let page2 = body_json(client.get("/products?page=2").await).await;
    assert_eq!(page2["products"].as_array().unwrap().len(), 2);
    assert_eq!(page2["page"], 2);
}

#[tokio::test]
async fn test_product_listing_filters() {
    let (app, _) = test_app(&[
        product_fields("Smart Speaker", 120_999, Category::Electronics, 40),
        product_fields("Yoga Mat", 180_099, Category::Sports, 60),
        product_fields("Running Shoes", 700_099, Category::Sports, 35),
    ]);
    let mut client = Client::new(app);

    let sports = body_json(client.get("/products?category=sports").await).await;
    assert_eq!(sports["total"], 2);

    let search = body_json(client.get("/products?q=yoga").await).await;
    assert_eq!(search["total"], 1);
    assert_eq!(search["products"][0]["name"], "Yoga Mat");

    let both = body_json(client.get("/products?category=sports&q=shoes").await).await;
    assert_eq!(both["total"], 1);

    let bad = client.get("/products?category=garden").await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_detail() {
    let (app, ids) = test_app(&[product_fields("Coffee Maker", 4_000_000, Category::Home, 20)]);
    let mut client = Client::new(app);

    let found = client.get(&format!("/products/{}", ids[0])).await;
    assert_eq!(found.status(), StatusCode::OK);
    let product = body_json(found).await;
    assert_eq!(product["name"], "Coffee Maker");

    let missing = client.get("/products/nope").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_cart_add_merges_duplicate_lines() {
    let (app, ids) = test_app(&[product_fields("Headphones", 150_000, Category::Electronics, 50)]);
    let mut client = Client::new(app);

    client.post("/cart/add", json!({ "product_id": ids[0] })).await;
    let cart = body_json(client.post("/cart/add", json!({ "product_id": ids[0] })).await).await;

    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["quantity"], 2);
    assert_eq!(cart["item_count"], 2);

    let count = body_json(client.get("/cart/count").await).await;
    assert_eq!(count["count"], 2);
}

#[tokio::test]
async fn test_cart_update_to_zero_removes_line() {
    let (app, ids) = test_app(&[
        product_fields("Shirt", 30_000, Category::Clothing, 100),
        product_fields("Book", 39_099, Category::Books, 25),
    ]);
    let mut client = Client::new(app);

    client.post("/cart/add", json!({ "product_id": ids[0] })).await;
    client.post("/cart/add", json!({ "product_id": ids[1] })).await;

    let cart = body_json(
        client
            .post("/cart/update", json!({ "product_id": ids[0], "quantity": 0 }))
            .await,
    )
    .await;

    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["product_id"], ids[1]);
}

#[tokio::test]
async fn test_cart_add_unknown_or_out_of_stock() {
    let (app, ids) = test_app(&[product_fields("Sold Out", 1000, Category::Books, 0)]);
    let mut client = Client::new(app);

    let missing = client.post("/cart/add", json!({ "product_id": "nope" })).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let sold_out = client.post("/cart/add", json!({ "product_id": ids[0] })).await;
    assert_eq!(sold_out.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_register_login_me() {
    let (app, _) = test_app(&[]);
    let mut client = Client::new(app);

    let registered = client
        .post(
            "/auth/register",
            json!({ "email": "alice@example.com", "password": "pw123" }),
        )
        .await;
    assert_eq!(registered.status(), StatusCode::CREATED);
    let body = body_json(registered).await;
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["user"]["role"], "customer");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let me = body_json(client.get("/auth/me").await).await;
    assert_eq!(me["email"], "alice@example.com");

    client.post("/auth/logout", json!({})).await;
    let after_logout = client.get("/auth/me").await;
    assert_eq!(after_logout.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let (app, _) = test_app(&[]);
    let mut client = Client::new(app);

    let creds = json!({ "email": "bob@example.com", "password": "pw" });
    client.post("/auth/register", creds.clone()).await;

    let duplicate = client.post("/auth/register", creds).await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let (app, _) = test_app(&[]);
    let mut client = Client::new(app);

    let response = client
        .post(
            "/auth/login",
            json!({ "email": ADMIN_EMAIL, "password": "wrong" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Checkout & Orders
// ============================================================================

#[tokio::test]
async fn test_checkout_places_order_and_decrements_stock() {
    let (app, ids) = test_app(&[product_fields("Watch", 1000, Category::Electronics, 5)]);
    let mut client = Client::new(app);

    client
        .post(
            "/auth/register",
            json!({ "email": "buyer@example.com", "password": "pw" }),
        )
        .await;
    client.post("/cart/add", json!({ "product_id": ids[0] })).await;
    client.post("/cart/add", json!({ "product_id": ids[0] })).await;

    let response = client.post("/checkout", json!({})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let order = body_json(response).await;
    assert_eq!(order["status"], "pending");
    assert_eq!(order["items"][0]["quantity"], 2);
    assert_eq!(order["total"], "20.00");

    // Stock went 5 -> 3 and the cart is now empty.
    let product = body_json(client.get(&format!("/products/{}", ids[0])).await).await;
    assert_eq!(product["stock"], 3);
    let cart = body_json(client.get("/cart").await).await;
    assert!(cart["items"].as_array().unwrap().is_empty());

    // The order shows up in the buyer's history.
    let orders = body_json(client.get("/orders").await).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);
    assert_eq!(orders[0]["id"], order["id"]);
}

#[tokio::test]
async fn test_checkout_requires_login() {
    let (app, ids) = test_app(&[product_fields("Watch", 1000, Category::Electronics, 5)]);
    let mut client = Client::new(app);

    client.post("/cart/add", json!({ "product_id": ids[0] })).await;
    let response = client.post("/checkout", json!({})).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_checkout_rejects_empty_cart() {
    let (app, _) = test_app(&[]);
    let mut client = Client::new(app);

    client
        .post(
            "/auth/register",
            json!({ "email": "buyer@example.com", "password": "pw" }),
        )
        .await;

    let response = client.post("/checkout", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let orders = body_json(client.get("/orders").await).await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_orders_are_scoped_to_the_caller() {
    let (app, ids) = test_app(&[product_fields("Watch", 1000, Category::Electronics, 50)]);

    let mut buyer = Client::new(app.clone());
    buyer
        .post(
            "/auth/register",
            json!({ "email": "one@example.com", "password": "pw" }),
        )
        .await;
    buyer.post("/cart/add", json!({ "product_id": ids[0] })).await;
    buyer.post("/checkout", json!({})).await;

    let mut other = Client::new(app);
    other
        .post(
            "/auth/register",
            json!({ "email": "two@example.com", "password": "pw" }),
        )
        .await;
    let orders = body_json(other.get("/orders").await).await;
    assert!(orders.as_array().unwrap().is_empty());
}

// ============================================================================
// Admin
// ============================================================================

#[tokio::test]
async fn test_admin_routes_reject_non_admins() {
    let (app, _) = test_app(&[]);

    let mut anonymous = Client::new(app.clone());
    let response = anonymous.get("/admin/stats").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let mut customer = Client::new(app);
    customer
        .post(
            "/auth/register",
            json!({ "email": "plain@example.com", "password": "pw" }),
        )
        .await;
    let response = customer.get("/admin/stats").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_stats_reflect_the_store() {
    let (app, ids) = test_app(&[product_fields("Watch", 1000, Category::Electronics, 5)]);

    let mut buyer = Client::new(app.clone());
    buyer
        .post(
            "/auth/register",
            json!({ "email": "buyer@example.com", "password": "pw" }),
        )
        .await;
    buyer.post("/cart/add", json!({ "product_id": ids[0] })).await;
    buyer.post("/checkout", json!({})).await;

    let mut admin = Client::new(app);
    admin.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let stats = body_json(admin.get("/admin/stats").await).await;
    assert_eq!(stats["total_products"], 1);
    assert_eq!(stats["total_orders"], 1);
    assert_eq!(stats["total_users"], 2);
    assert_eq!(stats["total_revenue"], "10.00");

    let recent = body_json(admin.get("/admin/orders").await).await;
    assert_eq!(recent.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_admin_product_crud() {
    let (app, _) = test_app(&[]);
    let mut admin = Client::new(app);
    admin.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let created = admin
        .post(
            "/admin/products",
            json!({
                "name": "Fitness Watch",
                "price": "1400.00",
                "category": "electronics",
                "description": "Tracks workouts",
                "stock": 30,
                "image": "https://example.com/watch.jpg"
            }),
        )
        .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let product = body_json(created).await;
    let id = product["id"].as_str().unwrap().to_owned();

    let updated = admin
        .request(
            "PUT",
            &format!("/admin/products/{id}"),
            Some(json!({
                "name": "Fitness Watch v2",
                "price": "1500.00",
                "category": "electronics",
                "description": "Tracks workouts",
                "stock": 25,
                "image": "https://example.com/watch.jpg"
            })),
        )
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    assert_eq!(body_json(updated).await["name"], "Fitness Watch v2");

    let invalid = admin
        .post(
            "/admin/products",
            json!({
                "name": "",
                "price": "1.00",
                "category": "books",
                "description": "x",
                "stock": 1,
                "image": "https://example.com/x.jpg"
            }),
        )
        .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let deleted = admin
        .request("DELETE", &format!("/admin/products/{id}"), None)
        .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = admin
        .request("DELETE", &format!("/admin/products/{id}"), None)
        .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_order_status_transitions() {
    let (app, ids) = test_app(&[product_fields("Watch", 1000, Category::Electronics, 5)]);

    let mut buyer = Client::new(app.clone());
    buyer
        .post(
            "/auth/register",
            json!({ "email": "buyer@example.com", "password": "pw" }),
        )
        .await;
    buyer.post("/cart/add", json!({ "product_id": ids[0] })).await;
    let order = body_json(buyer.post("/checkout", json!({})).await).await;
    let order_id = order["id"].as_str().unwrap().to_owned();

    let mut admin = Client::new(app);
    admin.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let completed = admin
        .post(
            &format!("/admin/orders/{order_id}/status"),
            json!({ "status": "completed" }),
        )
        .await;
    assert_eq!(completed.status(), StatusCode::OK);
    assert_eq!(body_json(completed).await["status"], "completed");

    // Completed orders cannot move again.
    let again = admin
        .post(
            &format!("/admin/orders/{order_id}/status"),
            json!({ "status": "cancelled" }),
        )
        .await;
    assert_eq!(again.status(), StatusCode::CONFLICT);
}
