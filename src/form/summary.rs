use std::collections::BTreeMap;
use std::fmt;

use crate::core::{FieldKey, ItemField};

/// Coarse grouping of blocking errors for the summary dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Item descriptions.
    Description,
    /// Quantity, unit price, tax or discount of an item.
    Numeric,
    /// Everything else: header fields, empty rows, no items.
    Invoice,
}

impl ErrorCategory {
    pub fn of(key: &FieldKey) -> Self {
        match key {
            FieldKey::Item {
                field: ItemField::Description,
                ..
            } => ErrorCategory::Description,
            FieldKey::Item { .. } => ErrorCategory::Numeric,
            FieldKey::ItemGeneral(_) | FieldKey::Detail(_) | FieldKey::General => {
                ErrorCategory::Invoice
            }
        }
    }
}

/// One line of the error panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub key: FieldKey,
    /// Display name, e.g. `"Item 2 - Quantity"` or `"CompanyName"`.
    pub label: String,
    pub category: ErrorCategory,
    pub message: String,
}

/// Blocking errors grouped for display after a failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSummary {
    pub entries: Vec<SummaryEntry>,
    pub description: usize,
    pub numeric: usize,
    pub invoice: usize,
}

impl ErrorSummary {
    pub fn from_errors(errors: &BTreeMap<FieldKey, String>) -> Self {
        let mut summary = ErrorSummary::default();
        for (key, message) in errors.iter().filter(|(_, m)| !m.is_empty()) {
            let category = ErrorCategory::of(key);
            match category {
                ErrorCategory::Description => summary.description += 1,
                ErrorCategory::Numeric => summary.numeric += 1,
                ErrorCategory::Invoice => summary.invoice += 1,
            }
            summary.entries.push(SummaryEntry {
                key: *key,
                label: display_label(key),
                category,
                message: message.clone(),
            });
        }
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Text for the blocking dialog, counting problems per category.
    pub fn message(&self) -> String {
        let mut message = String::from("Please fix the following validation issues:\n");
        if self.description > 0 {
            message.push_str(&format!(
                "- {} description field(s) need attention\n",
                self.description
            ));
        }
        if self.numeric > 0 {
            message.push_str(&format!(
                "- {} numeric field(s) have invalid values\n",
                self.numeric
            ));
        }
        if self.invoice > 0 {
            message.push_str(&format!(
                "- {} invoice detail field(s) need attention\n",
                self.invoice
            ));
        }
        message.push_str("\nPlease check the error summary at the top of the page.");
        message
    }
}

impl fmt::Display for ErrorSummary {
    /// The error panel: one `label: message` line per entry.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Please fix the following validation errors:")?;
        for entry in &self.entries {
            writeln!(f, "- {}: {}", entry.label, entry.message)?;
        }
        Ok(())
    }
}

fn display_label(key: &FieldKey) -> String {
    let raw = key.to_string();
    match key.item_index() {
        Some(index) => {
            let field = raw.split_once('-').map_or("", |(_, field)| field);
            format!("Item {} - {}", index + 1, capitalize(field))
        }
        None => capitalize(&raw),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
