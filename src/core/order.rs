//! Order business logic - Materializes carts into persisted orders.
//!
//! Checkout turns the session cart into one Order row plus one OrderItem row
//! per cart line, decrements stock, and assigns a generated reference code,
//! all inside a single database transaction so a failure leaves nothing
//! behind. Totals are recomputed on demand from the order's items joined to
//! *current* catalog prices; prices are not snapshotted at purchase time, so
//! an order's total is always "as of now" rather than "as of purchase".

use crate::{
    core::{
        cart::{self, Cart, SHIPPING_FEE},
        product,
    },
    entities::{OrderItem, order, order_item},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Status assigned to every freshly materialized order.
pub const INITIAL_ORDER_STATUS: &str = "PENDING";

/// Alphabet the order reference code is drawn from.
const REFERENCE_ALPHABET: &[u8] = b"ABCDE";

/// Length of the order reference code.
const REFERENCE_LENGTH: usize = 10;

/// Contact and shipping details captured by the checkout form.
///
/// An explicit data-transfer structure: every field is mapped one-by-one into
/// the order entity at materialization, so nothing is populated dynamically.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct CheckoutDetails {
    /// Customer first name
    pub first_name: String,
    /// Customer last name
    pub last_name: String,
    /// Customer phone number
    pub phone_number: String,
    /// Customer email address
    pub email: String,
    /// Shipping street address
    pub address: String,
    /// Shipping city
    pub city: String,
    /// Shipping country
    pub country: String,
    /// Payment type label; stored, never charged
    pub payment_type: String,
}

impl CheckoutDetails {
    /// Checks that every required field is present and non-blank.
    ///
    /// # Errors
    /// Returns a [`Error::Validation`] error naming the first blank field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("phone_number", &self.phone_number),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("country", &self.country),
            ("payment_type", &self.payment_type),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Validation {
                    message: format!("Checkout field '{field}' cannot be empty"),
                });
            }
        }

        Ok(())
    }
}

/// Generates a display reference code for a new order.
///
/// Ten independent uniform draws from the five-letter alphabet `ABCDE`.
/// Collisions against existing orders are not checked; the reference is a
/// display handle, not a key.
#[must_use]
pub fn generate_reference() -> String {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    (0..REFERENCE_LENGTH)
        .map(|_| REFERENCE_ALPHABET[rng.gen_range(0..REFERENCE_ALPHABET.len())] as char)
        .collect()
}

/// Materializes the cart into a persisted order.
///
/// Validates the checkout details, then in a single database transaction:
/// re-resolves every cart entry against the catalog, inserts the order with a
/// fresh reference and `PENDING` status, inserts one order item per line, and
/// decrements each referenced product's stock by its line quantity. The
/// decrement is unconditional; stock may go negative. Any failure rolls the
/// whole transaction back, so there is never a partial order, an orphan item,
/// or a stray stock decrement. The caller is responsible for clearing the
/// session cart once this returns Ok.
///
/// # Errors
/// Returns an error if:
/// - A checkout field is blank, or the cart is empty
/// - A cart entry references a product missing from the catalog
/// - Any write inside the transaction fails
pub async fn place_order(
    db: &DatabaseConnection,
    details: &CheckoutDetails,
    cart: &Cart,
) -> Result<order::Model> {
    details.validate()?;

    if cart.is_empty() {
        return Err(Error::Validation {
            message: "Cannot check out an empty cart".to_string(),
        });
    }

    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    // Resolve every entry up front; a dangling product id aborts the checkout
    let summary = cart::aggregate_cart(&txn, cart).await?;

    let order = order::ActiveModel {
        reference: Set(generate_reference()),
        first_name: Set(details.first_name.trim().to_string()),
        last_name: Set(details.last_name.trim().to_string()),
        phone_number: Set(details.phone_number.trim().to_string()),
        email: Set(details.email.trim().to_string()),
        address: Set(details.address.trim().to_string()),
        city: Set(details.city.trim().to_string()),
        country: Set(details.country.trim().to_string()),
        status: Set(INITIAL_ORDER_STATUS.to_string()),
        payment_type: Set(details.payment_type.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let order = order.insert(&txn).await?;

    for item in &summary.items {
        if item.quantity <= 0 {
            return Err(Error::InvalidQuantity {
                quantity: item.quantity,
            });
        }

        let line = order_item::ActiveModel {
            order_id: Set(order.id),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            ..Default::default()
        };
        line.insert(&txn).await?;

        product::decrement_stock(&txn, item.product_id, item.quantity).await?;
    }

    txn.commit().await?;

    Ok(order)
}

/// Retrieves a specific order by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Option<order::Model>> {
    crate::entities::Order::find_by_id(order_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all orders, newest first. Feeds the admin dashboard listing.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_orders(db: &DatabaseConnection) -> Result<Vec<order::Model>> {
    crate::entities::Order::find()
        .order_by_desc(order::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the line items belonging to an order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_order_items(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Vec<order_item::Model>> {
    OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Recomputes an order's total from its items joined to current prices.
///
/// Returns `sum(quantity * current_price) + SHIPPING_FEE`. Because prices are
/// read live from the catalog, the figure can drift after the fact when a
/// product's price changes. An order with no items yields the shipping fee
/// alone rather than an error. Items whose product has vanished contribute
/// nothing, matching inner-join semantics; products are never deleted
/// in-scope, so that branch stays theoretical.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn order_total(db: &DatabaseConnection, order_id: i64) -> Result<i64> {
    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .find_also_related(crate::entities::Product)
        .all(db)
        .await?;

    let subtotal: i64 = items
        .iter()
        .filter_map(|(item, product)| {
            product
                .as_ref()
                .map(|product| item.quantity * product.price)
        })
        .sum();

    Ok(subtotal + SHIPPING_FEE)
}

/// Sums the quantities across an order's items; 0 for an itemless order.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn quantity_total(db: &DatabaseConnection, order_id: i64) -> Result<i64> {
    let items = get_order_items(db, order_id).await?;
    Ok(items.iter().map(|item| item.quantity).sum())
}
