//! Admin handlers - dashboard, product creation, uploads, order inspection.
//!
//! These routes are intentionally unauthenticated; access control is outside
//! the scope of this service.

use crate::{
    core::{order, product},
    entities::{OrderItemModel, OrderModel, ProductModel},
    errors::{Error, Result},
    http::AppState,
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything the admin landing page shows.
#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    /// Full catalog
    pub products: Vec<ProductModel>,
    /// How many products have at least one unit in stock
    pub products_in_stock: u64,
    /// All orders, newest first
    pub orders: Vec<OrderModel>,
}

/// Body of `POST /admin/products`.
#[derive(Debug, Deserialize)]
pub struct AddProductRequest {
    /// Unique product name
    pub name: String,
    /// Unit price in minor currency units
    pub price: i64,
    /// Initial stock level
    pub stock: i64,
    /// Product description
    #[serde(default)]
    pub description: String,
    /// Image reference from `POST /admin/uploads`
    #[serde(default)]
    pub image: String,
}

/// Query parameters of `POST /admin/uploads`.
#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// Original filename of the uploaded image
    pub filename: String,
}

/// Response of `POST /admin/uploads`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Stable reference to hand to `POST /admin/products`
    pub image: String,
}

/// An order with its items and recomputed totals, for the admin order page.
#[derive(Debug, Serialize)]
pub struct OrderDetail {
    /// The order record
    pub order: OrderModel,
    /// Its line items
    pub items: Vec<OrderItemModel>,
    /// `sum(quantity * current_price) + shipping fee`
    pub order_total: i64,
    /// Sum of item quantities
    pub quantity_total: i64,
}

/// `GET /admin` - the dashboard data.
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Json<AdminDashboard>> {
    let products = product::get_all_products(&state.db).await?;
    let products_in_stock = product::count_products_in_stock(&state.db).await?;
    let orders = order::get_all_orders(&state.db).await?;

    Ok(Json(AdminDashboard {
        products,
        products_in_stock,
        orders,
    }))
}

/// `POST /admin/products` - creates a catalog product.
pub async fn add_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddProductRequest>,
) -> Result<impl IntoResponse> {
    let product = product::create_product(
        &state.db,
        payload.name,
        payload.price,
        payload.stock,
        payload.description,
        payload.image,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// `POST /admin/uploads` - stores raw image bytes, returns the reference.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<Json<UploadResponse>> {
    let image = state.uploads.store(&query.filename, &body).await?;
    Ok(Json(UploadResponse { image }))
}

/// `GET /admin/orders/:id` - one order with items and recomputed totals.
pub async fn view_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<OrderDetail>> {
    let order = order::get_order_by_id(&state.db, id)
        .await?
        .ok_or(Error::OrderNotFound { id })?;

    let items = order::get_order_items(&state.db, id).await?;
    let order_total = order::order_total(&state.db, id).await?;
    let quantity_total = order::quantity_total(&state.db, id).await?;

    Ok(Json(OrderDetail {
        order,
        items,
        order_total,
        quantity_total,
    }))
}
