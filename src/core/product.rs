//! Catalog business logic - Handles all product-related operations.
//!
//! This module provides functions for creating and retrieving catalog
//! products and for adjusting stock levels when orders are materialized.
//! All functions are async and return Result types for proper error handling
//! throughout the system. Lookups that may run inside a database transaction
//! are generic over [`ConnectionTrait`].

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};

/// Retrieves the full catalog, ordered alphabetically by name.
///
/// This is the storefront index query: every product is listed regardless of
/// stock level, matching the behavior of the shop front page.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID, returning None if absent.
///
/// Generic over the connection so cart aggregation and order materialization
/// can resolve products inside an open database transaction.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id<C>(conn: &C, product_id: i64) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(conn)
        .await
        .map_err(Into::into)
}

/// Finds a product by its unique name, returning None if not found.
///
/// Used for the duplicate-name check before creation.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new catalog product, performing input validation.
///
/// The name is trimmed and must be non-empty and unique across the catalog;
/// price and stock are minor-unit/count integers and must be non-negative at
/// creation time (stock may still go negative later through checkout).
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - A product with the same name already exists
/// - The price or initial stock is negative
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    price: i64,
    stock: i64,
    description: String,
    image: String,
) -> Result<product::Model> {
    // Validate inputs
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Product name cannot be empty".to_string(),
        });
    }

    if price < 0 {
        return Err(Error::InvalidAmount { amount: price });
    }

    if stock < 0 {
        return Err(Error::InvalidAmount { amount: stock });
    }

    if get_product_by_name(db, name.trim()).await?.is_some() {
        return Err(Error::Validation {
            message: format!("A product named '{}' already exists", name.trim()),
        });
    }

    let now = chrono::Utc::now();

    let product = product::ActiveModel {
        name: Set(name.trim().to_string()),
        price: Set(price),
        stock: Set(stock),
        description: Set(description),
        image: Set(image),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Counts catalog products with at least one unit in stock.
///
/// Feeds the admin dashboard headline figure.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn count_products_in_stock(db: &DatabaseConnection) -> Result<u64> {
    Product::find()
        .filter(product::Column::Stock.gt(0))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Decrements a product's stock by the given amount with a single atomic update.
///
/// Instead of reading the stock, modifying it, and writing it back, this issues
/// one SQL statement: `UPDATE products SET stock = stock - amount WHERE id = ?`.
/// The decrement is unconditional: stock is allowed to go negative when
/// concurrent checkouts oversell a product, and no reservation is taken.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if the product does not exist, or a
/// database error if the update fails.
pub async fn decrement_stock<C>(conn: &C, product_id: i64, amount: i64) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    // First verify the product exists
    let _product = Product::find_by_id(product_id)
        .one(conn)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    // Perform atomic update: stock = stock - amount
    Product::update_many()
        .col_expr(
            product::Column::Stock,
            Expr::col(product::Column::Stock).sub(amount),
        )
        .filter(product::Column::Id.eq(product_id))
        .exec(conn)
        .await?;

    // Return the updated product
    Product::find_by_id(product_id)
        .one(conn)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })
}
