//! Display currencies.
//!
//! Currency is a label on the preview only; amounts are never converted.

/// Currency selected for new drafts.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Symbol shown for codes outside [`SUPPORTED_CURRENCIES`].
pub const FALLBACK_SYMBOL: &str = "$";

/// Supported currency codes with their symbols, sorted by code for binary search.
pub static SUPPORTED_CURRENCIES: &[(&str, &str)] = &[
    ("EUR", "€"),
    ("GBP", "£"),
    ("INR", "₹"),
    ("USD", "$"),
];

/// Check whether `code` is one of the supported display currencies.
pub fn is_supported_currency(code: &str) -> bool {
    lookup(code).is_some()
}

/// Symbol for `code`, or [`FALLBACK_SYMBOL`] when the code is unknown.
pub fn currency_symbol(code: &str) -> &'static str {
    lookup(code).unwrap_or(FALLBACK_SYMBOL)
}

fn lookup(code: &str) -> Option<&'static str> {
    SUPPORTED_CURRENCIES
        .binary_search_by(|(c, _)| (*c).cmp(code))
        .ok()
        .map(|i| SUPPORTED_CURRENCIES[i].1)
}
