//! Cart business logic - The session cart and its aggregation.
//!
//! A [`Cart`] is an explicit per-session context object: an ordered list of
//! `{product_id, quantity}` entries that lives in the session store and is
//! never persisted. [`aggregate_cart`] enriches the entries against the
//! catalog into line items with computed totals. Entries are deliberately not
//! merged by product id; adding the same product twice yields two lines.

use crate::{
    core::product,
    errors::{Error, Result},
};
use sea_orm::prelude::*;
use serde::{Deserialize, Serialize};

/// Flat shipping fee in minor currency units, applied to every checkout.
pub const SHIPPING_FEE: i64 = 10;

/// One session-held cart entry: a product id and a desired quantity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// ID of the product the customer wants
    pub product_id: i64,
    /// Desired number of units, always positive
    pub quantity: i64,
}

/// The ordered list of cart entries for one session.
///
/// Positions are meaningful: `remove` takes the index shown to the customer
/// on the last render, and later entries shift down by one afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Appends an entry for the given product.
    ///
    /// # Errors
    /// Returns [`Error::InvalidQuantity`] if the quantity is not positive.
    pub fn add(&mut self, product_id: i64, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            return Err(Error::InvalidQuantity { quantity });
        }
        self.entries.push(CartEntry {
            product_id,
            quantity,
        });
        Ok(())
    }

    /// Appends a single unit of the given product (the "quick add" button).
    pub fn quick_add(&mut self, product_id: i64) {
        self.entries.push(CartEntry {
            product_id,
            quantity: 1,
        });
    }

    /// Removes and returns the entry at `index`.
    ///
    /// # Errors
    /// Returns a [`Error::Validation`] error if the index is out of range;
    /// the cart is left unchanged in that case.
    pub fn remove(&mut self, index: usize) -> Result<CartEntry> {
        if index >= self.entries.len() {
            return Err(Error::Validation {
                message: format!("No cart entry at position {index}"),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Drops every entry. Called after a successful checkout.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether the cart holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries (not units) in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A cart entry enriched with resolved product data and a computed subtotal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LineItem {
    /// ID of the resolved product
    pub product_id: i64,
    /// Product name at render time
    pub name: String,
    /// Current unit price in minor currency units
    pub price: i64,
    /// Product image reference
    pub image: String,
    /// Units requested by this entry
    pub quantity: i64,
    /// `price * quantity` for this line
    pub line_total: i64,
    /// Position of the entry in the cart list, for remove-by-index
    pub index: usize,
}

/// The aggregated view of a cart: line items plus totals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Enriched line items in cart-entry order
    pub items: Vec<LineItem>,
    /// Sum of all line totals
    pub items_subtotal: i64,
    /// The flat shipping fee applied on top
    pub shipping_fee: i64,
    /// `items_subtotal + shipping_fee`
    pub total_with_shipping: i64,
    /// Sum of all entry quantities
    pub total_quantity: i64,
}

/// Derives line items and totals from the cart against the current catalog.
///
/// Entries are resolved in order; each one must reference an existing
/// product. An entry pointing at a product id that is no longer in the
/// catalog fails the whole aggregation rather than being skipped or
/// null-filled. An empty cart yields no items, a zero subtotal, zero
/// quantity, and a total of the shipping fee alone.
///
/// Generic over the connection so materialization can re-run the resolution
/// inside its database transaction.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] for an unresolvable entry, or a
/// database error if a lookup fails.
pub async fn aggregate_cart<C>(conn: &C, cart: &Cart) -> Result<CartSummary>
where
    C: ConnectionTrait,
{
    let mut items = Vec::with_capacity(cart.len());
    let mut items_subtotal = 0;
    let mut total_quantity = 0;

    for (index, entry) in cart.entries().iter().enumerate() {
        let product = product::get_product_by_id(conn, entry.product_id)
            .await?
            .ok_or(Error::ProductNotFound {
                id: entry.product_id,
            })?;

        let line_total = product.price * entry.quantity;
        items_subtotal += line_total;
        total_quantity += entry.quantity;

        items.push(LineItem {
            product_id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            quantity: entry.quantity,
            line_total,
            index,
        });
    }

    Ok(CartSummary {
        items,
        items_subtotal,
        shipping_fee: SHIPPING_FEE,
        total_with_shipping: items_subtotal + SHIPPING_FEE,
        total_quantity,
    })
}
