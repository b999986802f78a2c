use chrono::{DateTime, Local};
use serde::de::DeserializeOwned;

use super::storage::Storage;
use crate::config::StorageKeys;
use crate::core::{InvoiceDetails, LineItem, StorageError};

/// The two persisted records of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub items: Vec<LineItem>,
    pub details: InvoiceDetails,
}

/// Writes draft snapshots to a [`Storage`] and tracks the "saved" notice.
///
/// Timing is not handled here; the form decides when to call
/// [`Autosave::flush`].
#[derive(Debug)]
pub struct Autosave<S> {
    storage: S,
    keys: StorageKeys,
    notice: Option<String>,
    saves: u64,
}

impl<S: Storage> Autosave<S> {
    pub fn new(storage: S, keys: StorageKeys) -> Self {
        Self {
            storage,
            keys,
            notice: None,
            saves: 0,
        }
    }

    /// Read the stored draft.
    ///
    /// A missing record falls back to its default: one blank item, or
    /// `default_details`. An unreadable or corrupt record is logged and also
    /// falls back, so a broken store never stops the form from opening.
    pub fn load(&self, default_details: InvoiceDetails) -> Draft {
        let items = self
            .read_record::<Vec<LineItem>>(&self.keys.items)
            .unwrap_or_else(|| vec![LineItem::default()]);
        let details = self
            .read_record::<InvoiceDetails>(&self.keys.details)
            .unwrap_or(default_details);
        Draft { items, details }
    }

    fn read_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read saved draft record");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "saved draft record is corrupt, using defaults");
                None
            }
        }
    }

    /// Write both records now.
    ///
    /// On failure the error is logged and this save is dropped; the next
    /// scheduled save tries again. Returns whether the write succeeded.
    ///
    /// Items are written before details, so a failed details write leaves
    /// the new items stored next to the previous details.
    pub fn flush(&mut self, items: &[LineItem], details: &InvoiceDetails) -> bool {
        self.flush_at(items, details, Local::now())
    }

    pub(crate) fn flush_at(
        &mut self,
        items: &[LineItem],
        details: &InvoiceDetails,
        at: DateTime<Local>,
    ) -> bool {
        match self.write(items, details) {
            Ok(()) => {
                self.saves += 1;
                self.notice = Some(format!("Auto-saved at {}", at.format("%H:%M:%S")));
                tracing::info!(items = items.len(), saves = self.saves, "draft saved");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to save draft");
                false
            }
        }
    }

    fn write(&mut self, items: &[LineItem], details: &InvoiceDetails) -> Result<(), StorageError> {
        let items_json = serde_json::to_string(items)?;
        let details_json = serde_json::to_string(details)?;
        self.storage.set(&self.keys.items, &items_json)?;
        self.storage.set(&self.keys.details, &details_json)?;
        Ok(())
    }

    /// Stored theme preference; `prefers_dark` (the OS setting) when none was
    /// stored or the value is unreadable.
    pub fn load_dark_mode(&self, prefers_dark: bool) -> bool {
        match self.storage.get(&self.keys.dark_mode) {
            Ok(Some(value)) => value == "true",
            Ok(None) => prefers_dark,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read theme preference");
                prefers_dark
            }
        }
    }

    /// Persist the theme preference right away.
    pub fn store_dark_mode(&mut self, dark: bool) {
        let value = if dark { "true" } else { "false" };
        if let Err(e) = self.storage.set(&self.keys.dark_mode, value) {
            tracing::warn!(error = %e, "failed to save theme preference");
        }
    }

    /// Text of the "saved" notice while it is showing.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Successful saves since creation.
    pub fn saves(&self) -> u64 {
        self.saves
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
