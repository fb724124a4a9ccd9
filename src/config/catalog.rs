//! Catalog seeding from catalog.toml.
//!
//! An optional TOML file can describe initial products, which are inserted on
//! startup so a fresh deployment has something on the shelf. Seeding skips
//! products whose name already exists, so it is safe to run on every boot.

use crate::{
    core::product,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire catalog.toml file
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// List of products to seed
    pub products: Vec<ProductConfig>,
}

/// Configuration for a single seeded product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    /// Unique product name
    pub name: String,
    /// Unit price in minor currency units
    pub price: i64,
    /// Initial stock level
    pub stock: i64,
    /// Product description, empty if omitted
    #[serde(default)]
    pub description: String,
    /// Image reference, empty if omitted
    #[serde(default)]
    pub image: String,
}

/// Loads the catalog seed configuration from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog.toml: {e}"),
    })
}

/// Inserts the configured products, skipping names already in the catalog.
///
/// Returns the number of products actually created.
///
/// # Errors
/// Returns an error if a lookup or insert fails, or if a seeded product
/// fails creation-time validation.
pub async fn seed_catalog(db: &DatabaseConnection, config: &CatalogConfig) -> Result<usize> {
    let mut created = 0;

    for entry in &config.products {
        if product::get_product_by_name(db, entry.name.trim())
            .await?
            .is_some()
        {
            continue;
        }

        product::create_product(
            db,
            entry.name.clone(),
            entry.price,
            entry.stock,
            entry.description.clone(),
            entry.image.clone(),
        )
        .await?;
        created += 1;
    }

    if created > 0 {
        info!("Seeded {created} catalog product(s)");
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    const SAMPLE: &str = r#"
        [[products]]
        name = "Ceramic Mug"
        price = 350
        stock = 12
        description = "A mug"
        image = "/images/mug.png"

        [[products]]
        name = "Canvas Apron"
        price = 900
        stock = 4
    "#;

    #[test]
    fn test_parse_catalog_config() {
        let config: CatalogConfig = toml::from_str(SAMPLE).unwrap();

        assert_eq!(config.products.len(), 2);
        assert_eq!(config.products[0].name, "Ceramic Mug");
        assert_eq!(config.products[0].price, 350);
        assert_eq!(config.products[1].stock, 4);
        // Optional fields default to empty
        assert_eq!(config.products[1].description, "");
        assert_eq!(config.products[1].image, "");
    }

    #[tokio::test]
    async fn test_seed_catalog_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config: CatalogConfig = toml::from_str(SAMPLE).unwrap();

        assert_eq!(seed_catalog(&db, &config).await?, 2);
        assert_eq!(seed_catalog(&db, &config).await?, 0);

        let products = crate::core::product::get_all_products(&db).await?;
        assert_eq!(products.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_catalog_skips_existing_names() -> Result<()> {
        let db = setup_test_db().await?;

        create_custom_product(&db, "Ceramic Mug", 999, 1).await?;

        let config: CatalogConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(seed_catalog(&db, &config).await?, 1);

        // The pre-existing product keeps its price
        let mug = crate::core::product::get_product_by_name(&db, "Ceramic Mug")
            .await?
            .unwrap();
        assert_eq!(mug.price, 999);

        Ok(())
    }
}
