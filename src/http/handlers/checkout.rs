//! Checkout handlers - review and order submission.

use crate::{
    core::{
        cart,
        order::{self, CheckoutDetails},
    },
    errors::Result,
    http::{AppState, session::ClientSession},
};
use axum::{
    Json,
    extract::State,
    response::{AppendHeaders, IntoResponse},
};
use serde::Serialize;
use std::sync::Arc;

/// What the client gets back for a materialized order.
#[derive(Debug, Serialize)]
pub struct OrderReceipt {
    /// Database id of the new order
    pub id: i64,
    /// Display reference code
    pub reference: String,
    /// Initial order status
    pub status: String,
}

/// `GET /checkout` - the aggregated cart, as shown on the checkout page.
pub async fn review_checkout(
    State(state): State<Arc<AppState>>,
    session: ClientSession,
) -> Result<impl IntoResponse> {
    let cart = state.sessions.cart(&session.id);
    let summary = cart::aggregate_cart(&state.db, &cart).await?;

    Ok((AppendHeaders([session.set_cookie()]), Json(summary)))
}

/// `POST /checkout` - materializes the session cart into an order.
///
/// The session cart is cleared only after the order is durably written; a
/// failed checkout leaves the cart exactly as it was.
pub async fn submit_checkout(
    State(state): State<Arc<AppState>>,
    session: ClientSession,
    Json(details): Json<CheckoutDetails>,
) -> Result<impl IntoResponse> {
    let cart = state.sessions.cart(&session.id);
    let order = order::place_order(&state.db, &details, &cart).await?;

    state.sessions.with_cart(&session.id, |cart| cart.clear());

    let receipt = OrderReceipt {
        id: order.id,
        reference: order.reference,
        status: order.status,
    };
    Ok((AppendHeaders([session.set_cookie()]), Json(receipt)))
}
