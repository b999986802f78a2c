#![no_main]

use invoice_form::config::FormConfig;
use invoice_form::form::InvoiceForm;
use invoice_form::persist::{MemoryStorage, Storage};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Whatever is in storage, opening and validating must not panic.
        let keys = FormConfig::default().storage_keys;
        let mut storage = MemoryStorage::new();
        let _ = storage.set(&keys.items, s);
        let _ = storage.set(&keys.details, s);
        let mut form = InvoiceForm::open(storage, FormConfig::default(), false);
        form.validate_all();
        let _ = serde_json::to_string(&form.preview());
    }
});
