//! Form settings: storage keys, timer durations, item policy.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_CURRENCY;

/// Keys of the persisted records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageKeys {
    /// JSON array of line items.
    pub items: String,
    /// JSON object with the invoice header.
    pub details: String,
    /// `"true"` / `"false"`.
    pub dark_mode: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            items: "invoiceBuilderItems".into(),
            details: "invoiceBuilderDetails".into(),
            dark_mode: "invoiceBuilderDarkMode".into(),
        }
    }
}

/// Settings for an [`InvoiceForm`](crate::form::InvoiceForm).
///
/// All fields have defaults, so a partial JSON document is enough:
///
/// ```
/// use invoice_form::config::FormConfig;
///
/// let config = FormConfig::from_json(r#"{ "autosaveDelayMs": 250 }"#).unwrap();
/// assert_eq!(config.autosave_delay().as_millis(), 250);
/// assert_eq!(config.min_items, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormConfig {
    pub storage_keys: StorageKeys,
    /// Quiet period after the last edit before the draft is written.
    pub autosave_delay_ms: u64,
    /// How long the "Auto-saved at ..." notice stays up.
    pub saved_notice_ms: u64,
    /// How long a just-fixed field stays highlighted.
    pub fixed_highlight_ms: u64,
    /// Fewest line items `remove_item` will leave. 0 disables the check.
    pub min_items: usize,
    /// Currency for new drafts.
    pub default_currency: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            storage_keys: StorageKeys::default(),
            autosave_delay_ms: 1000,
            saved_notice_ms: 3000,
            fixed_highlight_ms: 2000,
            min_items: 1,
            default_currency: DEFAULT_CURRENCY.into(),
        }
    }
}

impl FormConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    pub fn saved_notice_duration(&self) -> Duration {
        Duration::from_millis(self.saved_notice_ms)
    }

    pub fn fixed_highlight_duration(&self) -> Duration {
        Duration::from_millis(self.fixed_highlight_ms)
    }

    pub fn with_min_items(mut self, min: usize) -> Self {
        self.min_items = min;
        self
    }

    pub fn with_autosave_delay(mut self, delay: Duration) -> Self {
        self.autosave_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_storage_keys(mut self, keys: StorageKeys) -> Self {
        self.storage_keys = keys;
        self
    }

    pub fn with_default_currency(mut self, code: impl Into<String>) -> Self {
        self.default_currency = code.into();
        self
    }
}
