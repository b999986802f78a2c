#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let result = invoice_form::core::validate_gstin(s);
        assert!(result.is_valid() || !result.message().is_empty());
    }
});
