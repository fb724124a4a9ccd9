//! Cart handlers - session-cart mutation and the aggregated cart view.
//!
//! Adding entries does not hit the catalog; a stale product id only surfaces
//! as an error when the cart is next aggregated. Every response here carries
//! the session cookie so a fresh client keeps its cart across requests.

use crate::{
    core::cart::{self, Cart, CartSummary},
    errors::Result,
    http::{AppState, session::ClientSession},
};
use axum::{
    Json,
    extract::{Path, State},
    response::{AppendHeaders, IntoResponse},
};
use serde::Deserialize;
use std::sync::Arc;

/// Body of `POST /cart/items`.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    /// Product to add
    pub product_id: i64,
    /// Desired units, must be positive
    pub quantity: i64,
}

/// `POST /cart/items` - appends an entry and returns the raw cart.
pub async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    session: ClientSession,
    Json(payload): Json<AddToCartRequest>,
) -> Result<impl IntoResponse> {
    let cart = state.sessions.with_cart(&session.id, |cart| {
        cart.add(payload.product_id, payload.quantity)?;
        Ok::<_, crate::errors::Error>(cart.clone())
    })?;

    Ok((AppendHeaders([session.set_cookie()]), Json(cart)))
}

/// `POST /cart/quick-add/:id` - appends a single unit of the product.
pub async fn quick_add(
    State(state): State<Arc<AppState>>,
    session: ClientSession,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let cart = state.sessions.with_cart(&session.id, |cart| {
        cart.quick_add(id);
        cart.clone()
    });

    Ok((AppendHeaders([session.set_cookie()]), Json(cart)))
}

/// `GET /cart` - the aggregated cart: line items plus totals.
pub async fn view_cart(
    State(state): State<Arc<AppState>>,
    session: ClientSession,
) -> Result<impl IntoResponse> {
    let cart = state.sessions.cart(&session.id);
    let summary: CartSummary = cart::aggregate_cart(&state.db, &cart).await?;

    Ok((AppendHeaders([session.set_cookie()]), Json(summary)))
}

/// `DELETE /cart/items/:index` - removes the entry at the given position.
pub async fn remove_from_cart(
    State(state): State<Arc<AppState>>,
    session: ClientSession,
    Path(index): Path<usize>,
) -> Result<impl IntoResponse> {
    let cart = state.sessions.with_cart(&session.id, |cart| {
        cart.remove(index)?;
        Ok::<Cart, crate::errors::Error>(cart.clone())
    })?;

    Ok((AppendHeaders([session.set_cookie()]), Json(cart)))
}
