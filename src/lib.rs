//! # invoice-form
//!
//! Logic core of an invoice-drafting form: per-field validation with
//! blocking and advisory messages, GSTIN format checks, line totals, and a
//! debounced autosave of the draft to local key/value storage.
//!
//! Line-item columns are stored as the raw text the user typed and parsed on
//! demand. Money is computed with [`rust_decimal::Decimal`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//!
//! use invoice_form::config::FormConfig;
//! use invoice_form::core::*;
//! use invoice_form::form::InvoiceForm;
//! use invoice_form::persist::MemoryStorage;
//! use rust_decimal_macros::dec;
//!
//! let mut form = InvoiceForm::open(MemoryStorage::new(), FormConfig::default(), false);
//! form.edit_detail(DetailField::CompanyName, "ACME Pvt Ltd");
//! form.edit_detail(DetailField::ClientName, "Kunde Traders");
//! form.edit_item(0, ItemField::Description, "Consulting").unwrap();
//! form.edit_item(0, ItemField::Quantity, "2").unwrap();
//! form.edit_item(0, ItemField::UnitPrice, "10").unwrap();
//! form.edit_item(0, ItemField::Tax, "10").unwrap();
//!
//! assert!(form.validate_all());
//! assert_eq!(form.totals().total, dec!(22));
//!
//! // One quiet second later the draft is written.
//! form.advance(Duration::from_secs(1));
//! assert!(form.saved_notice().is_some());
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `fs` (default) | Directory-backed [`persist::FileStorage`] |
//! | `all` | Everything |

pub mod config;
pub mod core;
pub mod form;
pub mod persist;
pub mod preview;
pub mod schedule;

// Re-export core types at crate root for convenience
pub use crate::core::*;
