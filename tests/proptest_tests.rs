//! Property-based tests for the number rules, totals and full validation.
//!
//! Run with: `cargo test --test proptest_tests`

use invoice_form::core::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Text matching the accepted number grammar, without a sign.
fn arb_number_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,6}",
        "[0-9]{0,6}\\.[0-9]{1,4}",
    ]
}

/// Text that contains at least one character outside the grammar.
fn arb_garbage() -> impl Strategy<Value = String> {
    "[0-9]{0,3}[a-zA-Z ,+eE$%]{1,3}[0-9]{0,3}"
}

/// Any line item, mixing well-formed and malformed columns.
fn arb_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => arb_number_text(),
        1 => arb_number_text().prop_map(|s| format!("-{s}")),
        1 => arb_garbage(),
        1 => Just(String::new()),
    ]
}

fn arb_item() -> impl Strategy<Value = LineItem> {
    (
        "[a-zA-Z ]{0,12}",
        arb_cell(),
        arb_cell(),
        arb_cell(),
        arb_cell(),
    )
        .prop_map(|(description, quantity, unit_price, tax, discount)| LineItem {
            description,
            quantity,
            unit_price,
            tax,
            discount,
        })
}

fn arb_items() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(arb_item(), 0..=6)
}

const KINDS: [FieldKind; 5] = [
    FieldKind::Quantity,
    FieldKind::UnitPrice,
    FieldKind::TaxPercent,
    FieldKind::DiscountPercent,
    FieldKind::Generic,
];

// ── Property Tests ──────────────────────────────────────────────────────────

proptest! {
    /// Text outside the grammar is rejected by every kind.
    #[test]
    fn garbage_is_rejected(text in arb_garbage(), kind in 0usize..5) {
        prop_assume!(parse_number(&text).is_none());
        prop_assert!(!validate_number(&text, KINDS[kind], "Value").is_valid());
    }

    /// Negative numbers are rejected by every kind.
    #[test]
    fn negatives_are_rejected(text in arb_number_text(), kind in 0usize..5) {
        let negative = format!("-{text}");
        let value = parse_number(&negative).unwrap();
        prop_assume!(value < 0.0);
        let result = validate_number(&negative, KINDS[kind], "Value");
        prop_assert!(!result.is_valid());
        prop_assert!(result.message().contains("cannot be negative"));
    }

    /// Well-formed non-negative text always passes the generic rules.
    #[test]
    fn grammar_text_is_generic_valid(text in arb_number_text()) {
        prop_assert!(parse_number(&text).is_some());
        prop_assert!(validate_number(&text, FieldKind::Generic, "Value").is_valid());
    }

    /// Percentages are valid exactly when they lie in [0, 100].
    #[test]
    fn percent_range(text in arb_number_text()) {
        let value = parse_number(&text).unwrap();
        let valid = validate_number(&text, FieldKind::TaxPercent, "Tax").is_valid();
        prop_assert_eq!(valid, value <= 100.0);
    }

    /// A line with an invalid quantity contributes nothing to the totals.
    #[test]
    fn invalid_quantity_contributes_zero(
        garbage in arb_garbage(),
        price in arb_number_text(),
        tax in arb_number_text(),
    ) {
        prop_assume!(parse_number(&garbage).is_none());
        let item = LineItemBuilder::new("Thing", garbage, price).tax(tax).build();
        prop_assert_eq!(line_amounts(&item), LineAmounts::default());
    }

    /// Totals are the sums of the line amounts.
    #[test]
    fn totals_are_sums_of_lines(items in arb_items()) {
        let totals = calculate_totals(&items);
        let lines: Vec<LineAmounts> = items.iter().map(line_amounts).collect();
        prop_assert_eq!(totals.subtotal, lines.iter().map(|l| l.base).sum::<Decimal>());
        prop_assert_eq!(totals.total_tax, lines.iter().map(|l| l.tax).sum::<Decimal>());
        prop_assert_eq!(
            totals.total,
            totals.subtotal + totals.total_tax - totals.total_discount
        );
    }

    /// Collecting errors twice over the same draft gives the same map.
    #[test]
    fn collecting_errors_is_idempotent(items in arb_items()) {
        let details = DetailsBuilder::new("ACME", "Kunde").build();
        prop_assert_eq!(collect_errors(&details, &items), collect_errors(&details, &items));
    }

    /// Every collected error has a message and points at an existing row.
    #[test]
    fn errors_point_at_existing_rows(items in arb_items()) {
        let details = DetailsBuilder::new("ACME", "Kunde").build();
        for (key, message) in collect_errors(&details, &items) {
            prop_assert!(!message.is_empty());
            if let Some(index) = key.item_index() {
                prop_assert!(index < items.len());
            }
        }
    }

    /// Raw text survives a JSON round trip unchanged.
    #[test]
    fn raw_text_survives_json(item in arb_item()) {
        let json = serde_json::to_string(&item).unwrap();
        let back: LineItem = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, item);
    }

    /// GSTIN checking never panics and only accepts 15 characters.
    #[test]
    fn gstin_length_gate(text in "\\PC{0,20}") {
        let result = validate_gstin(&text);
        if !text.is_empty() && text.chars().count() != 15 {
            prop_assert!(!result.is_valid());
        }
    }
}
