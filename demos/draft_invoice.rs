//! Drive the form the way a UI would: edits, a pause, validation, print.
//!
//! Run with `RUST_LOG=debug cargo run --example draft_invoice [DIR]`. The
//! draft is kept in DIR (default: a `draft` directory under the system temp
//! dir), so a second run picks it up again.

use std::path::PathBuf;
use std::time::Duration;

use invoice_form::config::FormConfig;
use invoice_form::core::*;
use invoice_form::form::{InvoiceForm, PrintHost};
use invoice_form::persist::FileStorage;
use tracing_subscriber::EnvFilter;

struct Terminal;

impl PrintHost for Terminal {
    fn print(&mut self) {
        println!("[print dialog opened]");
    }

    fn alert(&mut self, message: &str) {
        println!("--- alert ---\n{message}\n-------------");
    }
}

fn main() -> Result<(), FormError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("draft"));
    let storage = FileStorage::open(dir)?;
    let mut form = InvoiceForm::open(storage, FormConfig::default(), false);
    println!("Loaded {} item(s) from {}", form.items().len(), form.storage().dir().display());

    form.edit_detail(DetailField::CompanyName, "ACME Pvt Ltd");
    form.edit_detail(DetailField::Gstin, "29ABCDE1234F1Z");
    form.set_currency("INR");

    let result = form.edit_item(0, ItemField::Quantity, "1,5")?;
    println!("Quantity \"1,5\": {}", result.message());
    form.edit_item(0, ItemField::Quantity, "2")?;
    form.edit_item(0, ItemField::Description, "Consulting")?;
    let result = form.edit_item(0, ItemField::UnitPrice, "250000")?;
    println!("Unit price \"250000\": {}", result.message());

    let mut host = Terminal;
    form.print(&mut host);
    print!("{}", form.error_summary());

    form.edit_detail(DetailField::Gstin, GSTIN_EXAMPLE);
    form.edit_detail(DetailField::ClientName, "Kunde Traders");
    form.advance(Duration::from_secs(1));
    if let Some(notice) = form.saved_notice() {
        println!("{notice}");
    }

    form.validate_form(&mut host);
    form.export(&mut host);
    println!("\n{}", form.preview());
    Ok(())
}
