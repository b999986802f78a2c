use std::collections::BTreeMap;

use super::gstin::validate_gstin;
use super::types::*;

/// Outcome of checking one field value.
///
/// A result is either clean, *advisory* (accepted, but the user should take a
/// second look) or *blocking* (must be fixed before printing). Only blocking
/// results are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    blocking: Option<String>,
    advisory: Option<String>,
}

impl ValidationResult {
    /// Accepted without remarks.
    pub fn ok() -> Self {
        Self::default()
    }

    /// Accepted, with a warning for the user.
    pub fn advisory(message: impl Into<String>) -> Self {
        Self {
            blocking: None,
            advisory: Some(message.into()),
        }
    }

    /// Rejected.
    pub fn blocking(message: impl Into<String>) -> Self {
        Self {
            blocking: Some(message.into()),
            advisory: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.blocking.is_none()
    }

    pub fn is_advisory(&self) -> bool {
        self.advisory.is_some()
    }

    pub fn blocking_message(&self) -> Option<&str> {
        self.blocking.as_deref()
    }

    pub fn advisory_message(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    /// Whichever message is present, or `""` for a clean result.
    pub fn message(&self) -> &str {
        self.blocking
            .as_deref()
            .or(self.advisory.as_deref())
            .unwrap_or("")
    }
}

/// What a numeric field represents; selects the range rules applied on top
/// of the basic number checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Quantity,
    UnitPrice,
    TaxPercent,
    DiscountPercent,
    Generic,
}

impl FieldKind {
    /// Kind of a line-item column. Description is not numeric and maps to
    /// [`FieldKind::Generic`].
    pub fn of(field: ItemField) -> Self {
        match field {
            ItemField::Quantity => FieldKind::Quantity,
            ItemField::UnitPrice => FieldKind::UnitPrice,
            ItemField::Tax => FieldKind::TaxPercent,
            ItemField::Discount => FieldKind::DiscountPercent,
            ItemField::Description => FieldKind::Generic,
        }
    }

    fn is_percent(self) -> bool {
        matches!(self, FieldKind::TaxPercent | FieldKind::DiscountPercent)
    }

    /// Input hint shown next to the field.
    pub fn guidance(self) -> &'static str {
        match self {
            FieldKind::Quantity => "Enter a positive whole number. Example: 5",
            FieldKind::UnitPrice => {
                "Enter price per unit with up to 2 decimal places. Example: 19.99"
            }
            FieldKind::TaxPercent => "Enter tax percentage between 0-100%. Example: 18",
            FieldKind::DiscountPercent => {
                "Enter discount percentage between 0-100%. Example: 10"
            }
            FieldKind::Generic => "",
        }
    }
}

/// Largest quantity accepted without being rejected as a likely typo.
pub const MAX_QUANTITY: f64 = 1000.0;
/// Unit prices above this get an advisory.
pub const HIGH_UNIT_PRICE: f64 = 100_000.0;
/// Unit prices above this are rejected on edit.
pub const EXTREME_UNIT_PRICE: f64 = 1_000_000.0;
/// Discounts above this (up to 100) get an advisory on edit.
pub const HIGH_DISCOUNT: f64 = 75.0;
/// Descriptions shorter than this (trimmed, in characters) are rejected.
pub const MIN_DESCRIPTION_CHARS: usize = 3;

/// Check a numeric field value.
///
/// `label` only appears in messages (e.g. `"Item 2 Quantity"`); the rules are
/// selected by `kind`. The first failing rule wins.
pub fn validate_number(value: &str, kind: FieldKind, label: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::blocking(format!("{label} cannot be empty"));
    }

    let Some(number) = parse_number(value) else {
        if value.contains(',') {
            return ValidationResult::blocking(format!(
                "{label} must use decimal point, not comma ({})",
                value.replacen(',', ".", 1)
            ));
        }
        return ValidationResult::blocking(format!(
            "{label} must be a valid number (e.g., 10 or 10.5)"
        ));
    };

    if number < 0.0 {
        return ValidationResult::blocking(format!(
            "{label} cannot be negative, please enter a value ≥ 0"
        ));
    }

    if kind.is_percent() && number > 100.0 {
        return ValidationResult::blocking(format!("{label} cannot exceed 100%"));
    }

    match kind {
        FieldKind::Quantity => {
            if number > MAX_QUANTITY {
                return ValidationResult::blocking(format!(
                    "{label} seems unusually high ({number}). Is this correct?"
                ));
            }
            if has_extra_decimals(number) {
                return ValidationResult::advisory(format!(
                    "{label} has more than 2 decimal places. Is this intentional?"
                ));
            }
        }
        FieldKind::UnitPrice => {
            if number > HIGH_UNIT_PRICE {
                return ValidationResult::advisory(format!(
                    "{label} is very high ({number}). Please verify."
                ));
            }
            if has_extra_decimals(number) {
                return ValidationResult::advisory(format!(
                    "{label} has more than 2 decimal places. Is this correct for currency?"
                ));
            }
        }
        FieldKind::TaxPercent | FieldKind::DiscountPercent | FieldKind::Generic => {}
    }

    ValidationResult::ok()
}

/// Parse text matching `-?\d*\.?\d+` (the whole string, ASCII digits).
///
/// Anything else, including surrounding whitespace, exponents and a trailing
/// dot, yields `None`.
pub fn parse_number(value: &str) -> Option<f64> {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());

    let well_formed = match unsigned.split_once('.') {
        Some((int, frac)) => all_digits(int) && !frac.is_empty() && all_digits(frac),
        None => !unsigned.is_empty() && all_digits(unsigned),
    };
    if !well_formed {
        return None;
    }
    value.parse::<f64>().ok()
}

/// True when `number` has more than two decimal places, judged on the binary
/// double: `1.005` is flagged, `1.25` is not. Values whose product with 100
/// is not exactly integral in binary are flagged too.
pub fn has_extra_decimals(number: f64) -> bool {
    let scaled = number * 100.0;
    number != number.floor() && scaled != scaled.floor()
}

/// Label for a line-item column in messages, with a 1-based item number.
pub fn item_label(index: usize, field: ItemField) -> String {
    let n = index + 1;
    match field {
        ItemField::Description => format!("Item {n} Description"),
        ItemField::Quantity => format!("Item {n} Quantity"),
        ItemField::UnitPrice => format!("Item {n} Unit price"),
        ItemField::Tax => format!("Item {n} Tax percentage"),
        ItemField::Discount => format!("Item {n} Discount percentage"),
    }
}

/// Check one line-item column as the user edits it.
///
/// Applies the generic number rules, then the edit-time special cases: zero
/// quantity and extreme unit prices are rejected, very high discounts get an
/// advisory.
pub fn validate_item_field(index: usize, field: ItemField, value: &str) -> ValidationResult {
    let n = index + 1;
    let label = item_label(index, field);

    match field {
        ItemField::Description => {
            let chars = value.trim().chars().count();
            if chars == 0 {
                ValidationResult::blocking(format!(
                    "Item {n}: Please provide a description for better invoice clarity"
                ))
            } else if chars < MIN_DESCRIPTION_CHARS {
                ValidationResult::blocking(format!(
                    "Item {n}: Description is too short (min 3 characters)"
                ))
            } else {
                ValidationResult::ok()
            }
        }
        ItemField::Quantity => match parse_number(value) {
            Some(q) if q == 0.0 => ValidationResult::blocking(format!(
                "Item {n}: Quantity cannot be zero - either remove the item or add quantity"
            )),
            _ => validate_number(value, FieldKind::Quantity, &label),
        },
        ItemField::UnitPrice => match parse_number(value) {
            Some(p) if p > EXTREME_UNIT_PRICE => ValidationResult::blocking(format!(
                "Item {n}: Unit price is extremely high. Please verify."
            )),
            _ => validate_number(value, FieldKind::UnitPrice, &label),
        },
        ItemField::Tax => validate_number(value, FieldKind::TaxPercent, &label),
        ItemField::Discount => match parse_number(value) {
            Some(d) if d > HIGH_DISCOUNT && d <= 100.0 => ValidationResult::advisory(format!(
                "Item {n}: Discount is very high ({value}%). Please verify."
            )),
            _ => validate_number(value, FieldKind::DiscountPercent, &label),
        },
    }
}

/// Whether an edited item column counts as "valid" for highlighting.
///
/// Descriptions need three characters; numeric columns use the generic
/// number rules, so advisories still count as valid.
pub fn is_item_value_valid(field: ItemField, value: &str) -> bool {
    match field {
        ItemField::Description => value.trim().chars().count() >= MIN_DESCRIPTION_CHARS,
        _ => validate_number(value, FieldKind::Generic, "Value").is_valid(),
    }
}

/// Collect every blocking problem in a draft, keyed by field.
///
/// An empty map means the draft may be printed. Advisories are not included.
pub fn collect_errors(details: &InvoiceDetails, items: &[LineItem]) -> BTreeMap<FieldKey, String> {
    let mut errors = BTreeMap::new();

    if items.is_empty() {
        errors.insert(
            FieldKey::General,
            "Your invoice needs at least one item".to_string(),
        );
    }

    if details.company_name.trim().is_empty() {
        errors.insert(
            FieldKey::Detail(DetailField::CompanyName),
            "Please provide your company name".to_string(),
        );
    }

    if details.client_name.trim().is_empty() {
        errors.insert(
            FieldKey::Detail(DetailField::ClientName),
            "Please provide a name for the invoice recipient or client".to_string(),
        );
    }

    for (index, item) in items.iter().enumerate() {
        collect_item_errors(index, item, &mut errors);
    }

    if !details.gstin.is_empty() {
        if let Some(message) = validate_gstin(&details.gstin).blocking_message() {
            errors.insert(FieldKey::Detail(DetailField::Gstin), message.to_string());
        }
    }

    errors
}

fn collect_item_errors(index: usize, item: &LineItem, errors: &mut BTreeMap<FieldKey, String>) {
    let n = index + 1;

    let description = item.description.trim().chars().count();
    if description == 0 {
        errors.insert(
            FieldKey::item(index, ItemField::Description),
            format!("Item {n}: Please provide a description"),
        );
    } else if description < MIN_DESCRIPTION_CHARS {
        errors.insert(
            FieldKey::item(index, ItemField::Description),
            format!("Item {n}: Description is too short"),
        );
    }

    if parse_number(&item.quantity) == Some(0.0) && parse_number(&item.unit_price) == Some(0.0) {
        errors.insert(
            FieldKey::ItemGeneral(index),
            format!("Item {n}: Empty item (both quantity and price are zero)"),
        );
    }

    for field in ItemField::NUMERIC {
        let result = validate_number(item.get(field), FieldKind::of(field), &item_label(index, field));
        if let Some(message) = result.blocking_message() {
            errors.insert(FieldKey::item(index, field), message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic(value: &str) -> ValidationResult {
        validate_number(value, FieldKind::Generic, "Value")
    }

    #[test]
    fn empty_is_blocking() {
        let r = validate_number("  ", FieldKind::Quantity, "Quantity");
        assert!(!r.is_valid());
        assert_eq!(r.message(), "Quantity cannot be empty");
    }

    #[test]
    fn grammar() {
        assert_eq!(parse_number("10"), Some(10.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("-.5"), Some(-0.5));
        assert_eq!(parse_number("0010.25"), Some(10.25));
        assert_eq!(parse_number("5."), None);
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("+5"), None);
        assert_eq!(parse_number("1e3"), None);
        assert_eq!(parse_number(" 5"), None);
        assert_eq!(parse_number("٣"), None);
    }

    #[test]
    fn comma_hint_replaces_first_comma() {
        let r = generic("1,000,5");
        assert_eq!(
            r.message(),
            "Value must use decimal point, not comma (1.000,5)"
        );
    }

    #[test]
    fn malformed_without_comma() {
        let r = generic("abc");
        assert_eq!(r.message(), "Value must be a valid number (e.g., 10 or 10.5)");
    }

    #[test]
    fn negative_zero_is_accepted() {
        assert!(generic("-0").is_valid());
    }

    #[test]
    fn generic_kind_has_no_range_rules() {
        assert!(generic("150").is_valid());
        assert!(generic("5000").is_valid());
        assert!(!generic("150").is_advisory());
    }

    #[test]
    fn decimal_places_follow_binary_arithmetic() {
        assert!(has_extra_decimals(1.005));
        assert!(has_extra_decimals(0.123));
        assert!(!has_extra_decimals(1.25));
        assert!(!has_extra_decimals(2.5));
        assert!(!has_extra_decimals(7.0));
    }

    #[test]
    fn high_quantity_shows_value() {
        let r = validate_number("1000.01", FieldKind::Quantity, "Quantity");
        assert_eq!(r.message(), "Quantity seems unusually high (1000.01). Is this correct?");
    }

    #[test]
    fn result_message_slots() {
        let a = ValidationResult::advisory("careful");
        assert!(a.is_valid());
        assert_eq!(a.advisory_message(), Some("careful"));
        assert_eq!(a.blocking_message(), None);

        let b = ValidationResult::blocking("no");
        assert!(!b.is_valid());
        assert_eq!(b.message(), "no");

        assert_eq!(ValidationResult::ok().message(), "");
    }

    #[test]
    fn description_rules() {
        let r = validate_item_field(0, ItemField::Description, "  ");
        assert_eq!(
            r.message(),
            "Item 1: Please provide a description for better invoice clarity"
        );
        let r = validate_item_field(2, ItemField::Description, "ab");
        assert_eq!(r.message(), "Item 3: Description is too short (min 3 characters)");
        assert!(validate_item_field(0, ItemField::Description, "abc").is_valid());
    }

    #[test]
    fn highlight_validity() {
        assert!(is_item_value_valid(ItemField::Description, " abc "));
        assert!(!is_item_value_valid(ItemField::Description, "ab"));
        assert!(is_item_value_valid(ItemField::Quantity, "0"));
        assert!(!is_item_value_valid(ItemField::Tax, "x"));
    }

    #[test]
    fn guidance_text() {
        assert!(FieldKind::UnitPrice.guidance().contains("19.99"));
        assert_eq!(FieldKind::Generic.guidance(), "");
    }
}
