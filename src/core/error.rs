use thiserror::Error;

/// Errors returned by form operations.
///
/// Validation failures are never reported through this type; they are data
/// in the form's error map. These variants cover API misuse and storage.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormError {
    /// An item index outside the current line-item list.
    #[error("no line item at index {index} (invoice has {len} items)")]
    NoSuchItem { index: usize, len: usize },

    /// Removing the item would drop the list below the configured minimum.
    #[error("invoice must keep at least {min} line item(s)")]
    MinimumItems { min: usize },

    /// Reading or writing the local draft store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors from a [`Storage`](crate::persist::Storage) backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    /// Filesystem failure (permissions, disk full, ...).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend refused the write because it is full.
    #[error("storage quota exceeded writing '{key}'")]
    QuotaExceeded { key: String },
}
