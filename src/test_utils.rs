//! Shared test utilities for `shopfront`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{order::CheckoutDetails, product},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test product with sensible defaults.
///
/// # Arguments
/// * `db` - Database connection
/// * `name` - Product name
///
/// # Defaults
/// * price: 100 (minor units)
/// * stock: 10
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    create_custom_product(db, name, 100, 10).await
}

/// Creates a test product with custom price and stock.
/// Use this when a test cares about the exact figures.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    price: i64,
    stock: i64,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        name.to_string(),
        price,
        stock,
        format!("{name} description"),
        format!("/images/{}.png", name.to_lowercase().replace(' ', "-")),
    )
    .await
}

/// A fully filled-in checkout form for materialization tests.
#[must_use]
pub fn sample_checkout() -> CheckoutDetails {
    CheckoutDetails {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        phone_number: "0700000000".to_string(),
        email: "jane@example.com".to_string(),
        address: "1 Main St".to_string(),
        city: "Nairobi".to_string(),
        country: "Kenya".to_string(),
        payment_type: "POD".to_string(),
    }
}

/// Sets up a complete test environment with one product.
/// Returns (db, product) for common storefront scenarios.
pub async fn setup_with_product() -> Result<(DatabaseConnection, entities::product::Model)> {
    let db = setup_test_db().await?;
    let product = create_test_product(&db, "Test Product").await?;
    Ok((db, product))
}
