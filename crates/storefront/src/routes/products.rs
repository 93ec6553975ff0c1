//! Product route handlers.
//!
//! The catalog is read straight from the record store; filtering and
//! pagination happen in memory, which is fine at demo-catalog scale.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shophub_core::{Category, ProductId};

use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;
use crate::store::ProductRepository;

/// Products shown per page.
pub const PAGE_SIZE: usize = 8;

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Case-insensitive substring match on name and description.
    pub q: Option<String>,
    /// Category filter; must be one of the known categories.
    pub category: Option<String>,
    /// 1-based page number.
    pub page: Option<usize>,
}

/// One page of the catalog.
#[derive(Debug, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// `GET /products` - filtered, paginated product listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ProductPage>> {
    let category = params
        .category
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(str::parse::<Category>)
        .transpose()
        .map_err(AppError::Validation)?;

    let query = params
        .q
        .as_deref()
        .map(str::to_lowercase)
        .filter(|q| !q.is_empty());

    let mut products = ProductRepository::new(state.store()).list()?;

    if let Some(category) = category {
        products.retain(|p| p.category == category);
    }
    if let Some(query) = &query {
        products.retain(|p| {
            p.name.to_lowercase().contains(query)
                || p.description.to_lowercase().contains(query)
        });
    }

    let total = products.len();
    let total_pages = total.div_ceil(PAGE_SIZE).max(1);
    let page = params.page.unwrap_or(1).max(1);

    let products = products
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    Ok(Json(ProductPage {
        products,
        page,
        total_pages,
        total,
    }))
}

/// `GET /products/{id}` - product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.store())
        .get(&id)?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}
