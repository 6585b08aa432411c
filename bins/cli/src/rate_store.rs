//! On-disk copy of the last fetched rate book, shared between runs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};
use vpsval_core::currency::RateBook;
use vpsval_shared::{AppError, AppResult, Currency};

/// JSON file holding one rate book.
#[derive(Debug, Clone)]
pub struct RateStore {
    path: PathBuf,
}

impl RateStore {
    /// Creates a store backed by `path`. Nothing is read until [`RateStore::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored book if there is one quoted against `base`.
    ///
    /// A missing or unreadable file counts as no book.
    pub fn load(&self, base: Currency) -> Option<RateBook> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(path = %self.path.display(), error = %err, "No stored exchange rates");
                return None;
            }
        };

        match serde_json::from_slice::<RateBook>(&bytes) {
            Ok(book) if book.base == base => Some(book),
            Ok(book) => {
                debug!(stored = %book.base, %base, "Stored exchange rates use another base");
                None
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Ignoring corrupt rate cache");
                None
            }
        }
    }

    /// Replaces the stored book with `book`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if the file cannot be written.
    pub fn save(&self, book: &RateBook) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }
        let json = serde_json::to_vec_pretty(book).map_err(|e| self.write_error(e))?;
        std::fs::write(&self.path, json).map_err(|e| self.write_error(e))
    }

    fn write_error(&self, err: impl std::fmt::Display) -> AppError {
        AppError::Internal(format!(
            "cannot write rate cache {}: {err}",
            self.path.display()
        ))
    }
}

/// Returns true if `book` was fetched less than `ttl` before `now`.
///
/// Books stamped in the future are treated as stale.
pub fn is_fresh(book: &RateBook, ttl: Duration, now: DateTime<Utc>) -> bool {
    let Ok(ttl) = TimeDelta::from_std(ttl) else {
        return true;
    };
    let age = now.signed_duration_since(book.fetched_at);
    age >= TimeDelta::zero() && age < ttl
}
