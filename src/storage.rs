//! Upload store - turns image payloads into stable reference strings.
//!
//! The admin surface hands uploaded image bytes to [`ImageStore::store`],
//! which writes them under the configured upload directory and returns the
//! `/images/<name>` reference that gets saved on the product row. Stored
//! names carry a random tag so repeated uploads of the same filename never
//! overwrite each other and every returned reference stays stable.

use crate::errors::{Error, Result};
use std::path::PathBuf;

/// Length of the random tag prefixed to stored filenames.
const TAG_LENGTH: usize = 8;

/// Filesystem-backed store for product images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Creates a store rooted at the given upload directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Writes an image payload and returns its reference string.
    ///
    /// The original filename is reduced to a safe character set, so path
    /// separators and other markup cannot escape the upload directory.
    ///
    /// # Errors
    /// Returns a [`Error::Validation`] error if the filename is empty after
    /// sanitizing, or an I/O error if the write fails.
    pub async fn store(&self, filename: &str, bytes: &[u8]) -> Result<String> {
        let safe = sanitize_filename(filename);
        if safe.is_empty() {
            return Err(Error::Validation {
                message: format!("Unusable image filename: '{filename}'"),
            });
        }

        let stored_name = format!("{}-{safe}", random_tag());

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&stored_name), bytes).await?;

        Ok(format!("/images/{stored_name}"))
    }
}

/// Keeps alphanumerics, dots, dashes, and underscores; drops everything else.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect()
}

fn random_tag() -> String {
    use rand::{Rng, distributions::Alphanumeric};

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TAG_LENGTH)
        .map(char::from)
        .collect()
}
