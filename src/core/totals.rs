use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::types::LineItem;
use super::validation::{FieldKind, validate_number};

/// Invoice totals derived from the line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Decimal,
    pub total_tax: Decimal,
    pub total_discount: Decimal,
    /// `subtotal + total_tax - total_discount`; may be negative.
    pub total: Decimal,
}

/// Amounts contributed by a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAmounts {
    /// quantity × unit price.
    pub base: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    /// `base + tax - discount`.
    pub total: Decimal,
}

/// Amounts for one line.
///
/// The base needs both quantity and unit price to pass the generic number
/// rules, otherwise it is zero. Tax and discount are percentages of the base
/// and are zero when their own text is invalid. Range rules (e.g. quantity
/// above 1000) do not exclude a line. A line whose total leaves the `Decimal`
/// range is all zeros.
pub fn line_amounts(item: &LineItem) -> LineAmounts {
    let base = match (amount(&item.quantity), amount(&item.unit_price)) {
        (Some(quantity), Some(price)) => quantity.checked_mul(price).unwrap_or_else(|| {
            tracing::debug!(quantity = %item.quantity, unit_price = %item.unit_price, "line amount overflow");
            Decimal::ZERO
        }),
        _ => Decimal::ZERO,
    };
    let tax = percent_of(base, &item.tax);
    let discount = percent_of(base, &item.discount);

    match net(base, tax, discount) {
        Some(total) => LineAmounts {
            base,
            tax,
            discount,
            total,
        },
        None => {
            tracing::debug!(quantity = %item.quantity, unit_price = %item.unit_price, "line total overflow");
            LineAmounts::default()
        }
    }
}

/// Fold all lines into invoice totals.
///
/// Always recomputed from the full list, since one edit can change which
/// lines are included. A line that would push any sum past the `Decimal`
/// range is left out like an invalid line.
pub fn calculate_totals(items: &[LineItem]) -> Totals {
    let mut totals = Totals::default();
    for (index, line) in items.iter().map(line_amounts).enumerate() {
        match totals.with_line(&line) {
            Some(next) => totals = next,
            None => tracing::debug!(index, "line skipped, totals would overflow"),
        }
    }
    totals
}

impl Totals {
    fn with_line(&self, line: &LineAmounts) -> Option<Totals> {
        let subtotal = self.subtotal.checked_add(line.base)?;
        let total_tax = self.total_tax.checked_add(line.tax)?;
        let total_discount = self.total_discount.checked_add(line.discount)?;
        Some(Totals {
            subtotal,
            total_tax,
            total_discount,
            total: net(subtotal, total_tax, total_discount)?,
        })
    }
}

fn net(base: Decimal, tax: Decimal, discount: Decimal) -> Option<Decimal> {
    base.checked_add(tax)?.checked_sub(discount)
}

fn percent_of(base: Decimal, rate: &str) -> Decimal {
    amount(rate)
        .and_then(|rate| (rate / dec!(100)).checked_mul(base))
        .unwrap_or(Decimal::ZERO)
}

/// Decimal value of `text` if it passes the generic number rules.
///
/// Digit strings too long for a `Decimal` count as absent.
fn amount(text: &str) -> Option<Decimal> {
    if !validate_number(text, FieldKind::Generic, "Value").is_valid() {
        return None;
    }
    let normalized = match text.strip_prefix('-') {
        Some(rest) if rest.starts_with('.') => format!("-0{rest}"),
        _ if text.starts_with('.') => format!("0{text}"),
        _ => text.to_string(),
    };
    Decimal::from_str(&normalized).ok()
}

/// Format an amount with two decimals, rounding half away from zero.
pub fn format_amount(value: Decimal) -> String {
    let rounded =
        value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}
