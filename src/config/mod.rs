/// Catalog seeding from catalog.toml
pub mod catalog;

/// Database connection and table creation
pub mod database;

/// Runtime settings loaded from environment variables
pub mod settings;
