#![no_main]

use invoice_form::core::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Every column check and the totals must accept arbitrary text.
        for field in ItemField::ALL {
            let _ = validate_item_field(0, field, s);
            let _ = is_item_value_valid(field, s);
        }
        let item = LineItemBuilder::new(s, s, s).tax(s).discount(s).build();
        let _ = calculate_totals(&[item]);
    }
});
