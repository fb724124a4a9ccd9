//! Catalog handlers - the storefront's browse surface.

use crate::{
    core::product,
    entities::ProductModel,
    errors::{Error, Result},
    http::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

/// `GET /products` - the full catalog, ordered by name.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductModel>>> {
    let products = product::get_all_products(&state.db).await?;
    Ok(Json(products))
}

/// `GET /products/:id` - one product's detail page data.
pub async fn view_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ProductModel>> {
    let product = product::get_product_by_id(&state.db, id)
        .await?
        .ok_or(Error::ProductNotFound { id })?;
    Ok(Json(product))
}
