//! Seed the record store with the demo catalog and admin account.
//!
//! Seeding is additive-only: a collection that already holds records is
//! left alone, so running `seed` against a live store never clobbers data.
//! Use `reset` first for a clean slate.

use rust_decimal::Decimal;
use tracing::info;

use shophub_core::{Category, Email, Price, Role};
use shophub_storefront::config::StorefrontConfig;
use shophub_storefront::models::NewProduct;
use shophub_storefront::store::{ProductRepository, Store, UserRepository};

/// Default admin credentials. Demo only.
const ADMIN_EMAIL: &str = "admin@shophub.dev";
const ADMIN_PASSWORD: &str = "admin123";

/// The demo catalog: (name, price in cents, category, description, stock, image).
const CATALOG: [(&str, i64, Category, &str, u32, &str); 8] = [
    (
        "Premium Wireless Headphones",
        150_000,
        Category::Electronics,
        "High-quality wireless headphones with noise cancellation",
        50,
        "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=500",
    ),
    (
        "Smart Fitness Watch",
        140_000,
        Category::Electronics,
        "Track your fitness goals with this advanced smartwatch",
        30,
        "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=500",
    ),
    (
        "Designer T-Shirt",
        30_000,
        Category::Clothing,
        "Comfortable premium cotton t-shirt",
        100,
        "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=500",
    ),
    (
        "The Full Stack Developer",
        39_099,
        Category::Books,
        "Complete guide to modern web development",
        25,
        "https://images.unsplash.com/photo-1532012197267-da84d127e765?w=500",
    ),
    (
        "Smart Home Speaker",
        120_999,
        Category::Electronics,
        "Voice-controlled smart speaker with premium sound",
        40,
        "https://images.unsplash.com/photo-1589003077984-894e133dabab?w=500",
    ),
    (
        "Yoga Mat Pro",
        180_099,
        Category::Sports,
        "Non-slip professional yoga mat",
        60,
        "https://images.unsplash.com/photo-1601925260368-ae2f83cf8b7f?w=500",
    ),
    (
        "Coffee Maker Deluxe",
        4_000_000,
        Category::Home,
        "Programmable coffee maker with thermal carafe",
        20,
        "https://images.unsplash.com/photo-1517668808822-9ebb02f2a0e6?w=500",
    ),
    (
        "Running Shoes Elite",
        700_099,
        Category::Sports,
        "Lightweight running shoes with superior cushioning",
        35,
        "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=500",
    ),
];

/// Seed the demo catalog and admin user.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the store fails.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let store = Store::open(&config.data_dir)?;
    info!(data_dir = %config.data_dir.display(), "Seeding record store");

    seed_products(&store)?;
    seed_admin(&store)?;

    info!("Seeding complete");
    Ok(())
}

fn seed_products(store: &Store) -> Result<(), Box<dyn std::error::Error>> {
    let products = ProductRepository::new(store);
    if products.count()? > 0 {
        info!("Products collection is not empty, skipping");
        return Ok(());
    }

    for (name, cents, category, description, stock, image) in CATALOG {
        let product = products.create(NewProduct {
            name: name.to_owned(),
            price: Price::new(Decimal::new(cents, 2))?,
            category,
            description: description.to_owned(),
            stock,
            image: image.to_owned(),
        })?;
        info!(product_id = %product.id, name, "Seeded product");
    }

    Ok(())
}

fn seed_admin(store: &Store) -> Result<(), Box<dyn std::error::Error>> {
    let users = UserRepository::new(store);
    if users.count()? > 0 {
        info!("Users collection is not empty, skipping");
        return Ok(());
    }

    let admin = users.create(
        Email::parse(ADMIN_EMAIL)?,
        ADMIN_PASSWORD.to_owned(),
        Role::Admin,
    )?;
    info!(user_id = %admin.id, email = ADMIN_EMAIL, "Seeded admin account");

    Ok(())
}
