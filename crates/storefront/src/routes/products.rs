//! Product catalog handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use webshop_core::{Product, ProductId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// List all products.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().products().to_vec())
}

/// Show a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>> {
    let product_id = ProductId::new(product_id);
    state
        .catalog()
        .product(&product_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))
}
