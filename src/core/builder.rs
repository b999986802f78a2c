use chrono::NaiveDate;

use super::types::*;

/// Builder for line items.
///
/// ```
/// use invoice_form::core::*;
///
/// let item = LineItemBuilder::new("Web design", "10", "150")
///     .tax("18")
///     .discount("5")
///     .build();
///
/// assert_eq!(item.unit_price, "150");
/// assert_eq!(item.tax, "18");
/// ```
pub struct LineItemBuilder {
    description: String,
    quantity: String,
    unit_price: String,
    tax: String,
    discount: String,
}

impl LineItemBuilder {
    pub fn new(
        description: impl Into<String>,
        quantity: impl Into<String>,
        unit_price: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            quantity: quantity.into(),
            unit_price: unit_price.into(),
            tax: "0".to_string(),
            discount: "0".to_string(),
        }
    }

    /// Tax percentage, as typed.
    pub fn tax(mut self, percent: impl Into<String>) -> Self {
        self.tax = percent.into();
        self
    }

    /// Discount percentage, as typed.
    pub fn discount(mut self, percent: impl Into<String>) -> Self {
        self.discount = percent.into();
        self
    }

    pub fn build(self) -> LineItem {
        LineItem {
            description: self.description,
            quantity: self.quantity,
            unit_price: self.unit_price,
            tax: self.tax,
            discount: self.discount,
        }
    }
}

/// Builder for invoice headers.
///
/// ```
/// use invoice_form::core::*;
///
/// let details = DetailsBuilder::new("ACME Pvt Ltd", "Kunde Traders")
///     .gstin("29ABCDE1234F1Z5")
///     .currency("INR")
///     .build();
///
/// assert_eq!(currency_symbol(&details.currency), "₹");
/// ```
pub struct DetailsBuilder {
    details: InvoiceDetails,
}

impl DetailsBuilder {
    pub fn new(company_name: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self {
            details: InvoiceDetails {
                company_name: company_name.into(),
                client_name: client_name.into(),
                ..InvoiceDetails::default()
            },
        }
    }

    pub fn company_address(mut self, address: impl Into<String>) -> Self {
        self.details.company_address = address.into();
        self
    }

    pub fn company_contact(mut self, contact: impl Into<String>) -> Self {
        self.details.company_contact = contact.into();
        self
    }

    pub fn client_address(mut self, address: impl Into<String>) -> Self {
        self.details.client_address = address.into();
        self
    }

    pub fn client_contact(mut self, contact: impl Into<String>) -> Self {
        self.details.client_contact = contact.into();
        self
    }

    pub fn gstin(mut self, gstin: impl Into<String>) -> Self {
        self.details.gstin = gstin.into();
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.details.currency = code.into();
        self
    }

    pub fn invoice_number(mut self, number: impl Into<String>) -> Self {
        self.details.invoice_number = number.into();
        self
    }

    pub fn issue_date(mut self, date: NaiveDate) -> Self {
        self.details = self.details.with_issue_date(date);
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.details.due_date = date.format("%Y-%m-%d").to_string();
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.details.notes = Some(note.into());
        self
    }

    pub fn logo(mut self, reference: impl Into<String>) -> Self {
        self.details.logo = Some(reference.into());
        self
    }

    pub fn build(self) -> InvoiceDetails {
        self.details
    }
}
