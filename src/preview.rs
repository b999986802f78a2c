//! Printable rendering of a draft.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::*;

/// One table row of the preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewLine {
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub tax: String,
    pub discount: String,
    pub line_total: Decimal,
}

/// Snapshot of everything the printed invoice shows.
///
/// Cells are shown as typed; only the money columns are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub details: InvoiceDetails,
    pub currency_symbol: &'static str,
    pub lines: Vec<PreviewLine>,
    pub totals: Totals,
}

impl Preview {
    pub fn new(details: &InvoiceDetails, items: &[LineItem]) -> Self {
        let lines = items
            .iter()
            .map(|item| PreviewLine {
                description: item.description.clone(),
                quantity: item.quantity.clone(),
                unit_price: item.unit_price.clone(),
                tax: item.tax.clone(),
                discount: item.discount.clone(),
                line_total: line_amounts(item).total,
            })
            .collect();

        Self {
            details: details.clone(),
            currency_symbol: currency_symbol(&details.currency),
            lines,
            totals: calculate_totals(items),
        }
    }

    fn money(&self, amount: Decimal) -> String {
        format!("{}{}", self.currency_symbol, format_amount(amount))
    }
}

fn display_date(raw: &str, parsed: Option<chrono::NaiveDate>) -> String {
    parsed.map_or_else(|| raw.to_string(), |d| d.format("%d %b %Y").to_string())
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.details;

        if d.invoice_number.is_empty() {
            writeln!(f, "INVOICE")?;
        } else {
            writeln!(f, "INVOICE {}", d.invoice_number)?;
        }
        for line in [&d.company_name, &d.company_address, &d.company_contact] {
            if !line.is_empty() {
                writeln!(f, "{line}")?;
            }
        }
        if !d.gstin.is_empty() {
            writeln!(f, "GSTIN: {}", d.gstin)?;
        }
        writeln!(f)?;
        writeln!(f, "Client: {}", d.client_name)?;
        for line in [&d.client_address, &d.client_contact] {
            if !line.is_empty() {
                writeln!(f, "{line}")?;
            }
        }
        writeln!(f, "Date: {}", display_date(&d.date, d.issue_date()))?;
        if !d.due_date.is_empty() {
            writeln!(f, "Due: {}", display_date(&d.due_date, d.due()))?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Description | Quantity | Unit Price | Tax (%) | Discount (%) | Line Total"
        )?;
        for line in &self.lines {
            writeln!(
                f,
                "{} | {} | {}{} | {} | {} | {}",
                line.description,
                line.quantity,
                self.currency_symbol,
                line.unit_price,
                line.tax,
                line.discount,
                self.money(line.line_total)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Subtotal: {}", self.money(self.totals.subtotal))?;
        writeln!(f, "Tax: {}", self.money(self.totals.total_tax))?;
        writeln!(f, "Discount: {}", self.money(self.totals.total_discount))?;
        write!(f, "Total: {}", self.money(self.totals.total))?;

        if let Some(notes) = d.notes.as_deref().filter(|n| !n.is_empty()) {
            write!(f, "\n\nNotes: {notes}")?;
        }
        Ok(())
    }
}
