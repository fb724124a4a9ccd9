//! Runtime settings loaded from environment variables.
//!
//! Every setting has a default suitable for local development, so the server
//! starts with no environment at all. A `.env` file is honored when present
//! (loaded in `main` before this module runs).

use crate::errors::{Error, Result};
use std::{env, path::PathBuf};

/// Default SQLite database location.
const DEFAULT_DATABASE_URL: &str = "sqlite://data/shopfront.sqlite?mode=rwc";

/// Default HTTP bind port.
const DEFAULT_PORT: u16 = 8080;

/// Default directory for uploaded product images.
const DEFAULT_UPLOAD_DIR: &str = "images";

/// Default path of the optional catalog seed file.
const DEFAULT_CATALOG_PATH: &str = "catalog.toml";

/// Application configuration assembled at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SeaORM connection string
    pub database_url: String,
    /// Port the HTTP server binds on
    pub port: u16,
    /// Directory uploaded images are written to
    pub upload_dir: PathBuf,
    /// Location of the optional catalog seed file
    pub catalog_path: PathBuf,
}

impl AppConfig {
    /// Reads the configuration from the environment, filling in defaults.
    ///
    /// # Errors
    /// Returns a [`Error::Config`] error if `SHOPFRONT_PORT` is set but does
    /// not parse as a port number.
    pub fn load() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let port = match env::var("SHOPFRONT_PORT") {
            Ok(raw) => raw.parse().map_err(|e| Error::Config {
                message: format!("Invalid SHOPFRONT_PORT '{raw}': {e}"),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let upload_dir =
            PathBuf::from(env::var("SHOPFRONT_UPLOAD_DIR").unwrap_or_else(|_| {
                DEFAULT_UPLOAD_DIR.to_string()
            }));

        let catalog_path =
            PathBuf::from(env::var("SHOPFRONT_CATALOG").unwrap_or_else(|_| {
                DEFAULT_CATALOG_PATH.to_string()
            }));

        Ok(Self {
            database_url,
            port,
            upload_dir,
            catalog_path,
        })
    }
}
