//! ShopHub Core - Shared types library.
//!
//! This crate provides common types used across all ShopHub components:
//! - `storefront` - The storefront HTTP service (customer + admin surface)
//! - `cli` - Command-line tools for seeding and resetting the record store
//!
//! # Architecture
//!
//! The core crate contains only types and pure state - no I/O, no HTTP,
//! no storage access. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`cart`] - The session cart state machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartLine};
pub use types::*;
