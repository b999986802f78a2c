use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One row of the invoice.
///
/// Numeric columns hold the raw text the user typed. Nothing is coerced on
/// the way in, so malformed input survives a save/load cycle and can be
/// re-validated; parsing happens when validating or calculating totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, deserialize_with = "raw_text")]
    pub description: String,
    #[serde(default, deserialize_with = "raw_text")]
    pub quantity: String,
    #[serde(default, deserialize_with = "raw_text")]
    pub unit_price: String,
    /// Tax percentage.
    #[serde(default, deserialize_with = "raw_text")]
    pub tax: String,
    /// Discount percentage.
    #[serde(default, deserialize_with = "raw_text")]
    pub discount: String,
}

impl Default for LineItem {
    /// A blank row: one unit at zero price, no tax, no discount.
    fn default() -> Self {
        Self {
            description: String::new(),
            quantity: "1".into(),
            unit_price: "0".into(),
            tax: "0".into(),
            discount: "0".into(),
        }
    }
}

impl LineItem {
    pub fn get(&self, field: ItemField) -> &str {
        match field {
            ItemField::Description => &self.description,
            ItemField::Quantity => &self.quantity,
            ItemField::UnitPrice => &self.unit_price,
            ItemField::Tax => &self.tax,
            ItemField::Discount => &self.discount,
        }
    }

    pub fn set(&mut self, field: ItemField, value: impl Into<String>) {
        let slot = match field {
            ItemField::Description => &mut self.description,
            ItemField::Quantity => &mut self.quantity,
            ItemField::UnitPrice => &mut self.unit_price,
            ItemField::Tax => &mut self.tax,
            ItemField::Discount => &mut self.discount,
        };
        *slot = value.into();
    }
}

/// Accepts a JSON string, number or null and keeps it as text.
///
/// Drafts written by older builds stored numeric columns as JSON numbers.
fn raw_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Flag(bool),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Number(n)) => n.to_string(),
        Some(Raw::Flag(b)) => b.to_string(),
        None => String::new(),
    })
}

/// Editable columns of a [`LineItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemField {
    Description,
    Quantity,
    UnitPrice,
    Tax,
    Discount,
}

impl ItemField {
    pub const ALL: [ItemField; 5] = [
        ItemField::Description,
        ItemField::Quantity,
        ItemField::UnitPrice,
        ItemField::Tax,
        ItemField::Discount,
    ];

    /// The numeric columns, in the order they are checked.
    pub const NUMERIC: [ItemField; 4] = [
        ItemField::Quantity,
        ItemField::UnitPrice,
        ItemField::Tax,
        ItemField::Discount,
    ];

    /// Name used in field keys and persisted records.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemField::Description => "description",
            ItemField::Quantity => "quantity",
            ItemField::UnitPrice => "unitPrice",
            ItemField::Tax => "tax",
            ItemField::Discount => "discount",
        }
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invoice header: seller, recipient, dates and display currency.
///
/// Dates are kept as the `YYYY-MM-DD` text the date picker produced (possibly
/// empty); use [`InvoiceDetails::issue_date`] for a parsed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceDetails {
    pub company_name: String,
    pub company_address: String,
    pub company_contact: String,
    /// Optional Indian GST identification number.
    pub gstin: String,
    /// Display currency code; see [`currency_symbol`](super::currency_symbol).
    pub currency: String,
    pub invoice_number: String,
    pub date: String,
    pub due_date: String,
    #[serde(alias = "name")]
    pub client_name: String,
    pub client_address: String,
    pub client_contact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Logo reference (data URL or path); never inspected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Default for InvoiceDetails {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            company_address: String::new(),
            company_contact: String::new(),
            gstin: String::new(),
            currency: super::DEFAULT_CURRENCY.into(),
            invoice_number: String::new(),
            date: String::new(),
            due_date: String::new(),
            client_name: String::new(),
            client_address: String::new(),
            client_contact: String::new(),
            notes: None,
            logo: None,
        }
    }
}

impl InvoiceDetails {
    /// Set the issue date column from a calendar date.
    pub fn with_issue_date(mut self, date: NaiveDate) -> Self {
        self.date = date.format(DATE_FORMAT).to_string();
        self
    }

    /// Parsed issue date, `None` if empty or malformed.
    pub fn issue_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Parsed due date, `None` if empty or malformed.
    pub fn due(&self) -> Option<NaiveDate> {
        parse_date(&self.due_date)
    }

    pub fn get(&self, field: DetailField) -> &str {
        match field {
            DetailField::CompanyName => &self.company_name,
            DetailField::CompanyAddress => &self.company_address,
            DetailField::CompanyContact => &self.company_contact,
            DetailField::Gstin => &self.gstin,
            DetailField::Currency => &self.currency,
            DetailField::InvoiceNumber => &self.invoice_number,
            DetailField::Date => &self.date,
            DetailField::DueDate => &self.due_date,
            DetailField::ClientName => &self.client_name,
            DetailField::ClientAddress => &self.client_address,
            DetailField::ClientContact => &self.client_contact,
            DetailField::Notes => self.notes.as_deref().unwrap_or(""),
            DetailField::Logo => self.logo.as_deref().unwrap_or(""),
        }
    }

    /// Overwrite one header column. Empty notes/logo clear the option.
    pub fn set(&mut self, field: DetailField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DetailField::CompanyName => self.company_name = value,
            DetailField::CompanyAddress => self.company_address = value,
            DetailField::CompanyContact => self.company_contact = value,
            DetailField::Gstin => self.gstin = value,
            DetailField::Currency => self.currency = value,
            DetailField::InvoiceNumber => self.invoice_number = value,
            DetailField::Date => self.date = value,
            DetailField::DueDate => self.due_date = value,
            DetailField::ClientName => self.client_name = value,
            DetailField::ClientAddress => self.client_address = value,
            DetailField::ClientContact => self.client_contact = value,
            DetailField::Notes => self.notes = (!value.is_empty()).then_some(value),
            DetailField::Logo => self.logo = (!value.is_empty()).then_some(value),
        }
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// Editable columns of [`InvoiceDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DetailField {
    CompanyName,
    CompanyAddress,
    CompanyContact,
    Gstin,
    Currency,
    InvoiceNumber,
    Date,
    DueDate,
    ClientName,
    ClientAddress,
    ClientContact,
    Notes,
    Logo,
}

impl DetailField {
    pub fn as_str(self) -> &'static str {
        match self {
            DetailField::CompanyName => "companyName",
            DetailField::CompanyAddress => "companyAddress",
            DetailField::CompanyContact => "companyContact",
            DetailField::Gstin => "gstin",
            DetailField::Currency => "currency",
            DetailField::InvoiceNumber => "invoiceNumber",
            DetailField::Date => "date",
            DetailField::DueDate => "dueDate",
            DetailField::ClientName => "clientName",
            DetailField::ClientAddress => "clientAddress",
            DetailField::ClientContact => "clientContact",
            DetailField::Notes => "notes",
            DetailField::Logo => "logo",
        }
    }
}

impl fmt::Display for DetailField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of an entry in the error, advisory, valid and fixed maps.
///
/// Item indexes are 0-based; messages use 1-based item numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    /// Form-wide problem (no items at all).
    General,
    /// A header column.
    Detail(DetailField),
    /// One column of one line item.
    Item { index: usize, field: ItemField },
    /// Whole-row problem for one line item.
    ItemGeneral(usize),
}

impl FieldKey {
    pub fn item(index: usize, field: ItemField) -> Self {
        FieldKey::Item { index, field }
    }

    /// Row index for item-scoped keys.
    pub fn item_index(&self) -> Option<usize> {
        match *self {
            FieldKey::Item { index, .. } | FieldKey::ItemGeneral(index) => Some(index),
            FieldKey::General | FieldKey::Detail(_) => None,
        }
    }

    /// Same key pointing at another row; header keys are returned unchanged.
    pub fn with_index(self, new_index: usize) -> Self {
        match self {
            FieldKey::Item { field, .. } => FieldKey::Item {
                index: new_index,
                field,
            },
            FieldKey::ItemGeneral(_) => FieldKey::ItemGeneral(new_index),
            other => other,
        }
    }

    /// Where this key points once row `removed` is deleted: `None` for the
    /// removed row's own keys, one row up for later rows.
    pub fn after_removal(self, removed: usize) -> Option<Self> {
        match self.item_index() {
            Some(index) if index == removed => None,
            Some(index) if index > removed => Some(self.with_index(index - 1)),
            _ => Some(self),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::General => f.write_str("general"),
            FieldKey::Detail(field) => f.write_str(field.as_str()),
            FieldKey::Item { index, field } => write!(f, "{index}-{field}"),
            FieldKey::ItemGeneral(index) => write!(f, "{index}-general"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_item_has_one_unit() {
        let item = LineItem::default();
        assert_eq!(item.description, "");
        assert_eq!(item.quantity, "1");
        assert_eq!(item.unit_price, "0");
        assert_eq!(item.tax, "0");
        assert_eq!(item.discount, "0");
    }

    #[test]
    fn item_reads_numbers_as_text() {
        let json = r#"{"description":"Widget","quantity":2,"unitPrice":9.5,"tax":18,"discount":0}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, "2");
        assert_eq!(item.unit_price, "9.5");
        assert_eq!(item.tax, "18");
    }

    #[test]
    fn item_missing_columns_become_empty() {
        let item: LineItem = serde_json::from_str(r#"{"description":"x","quantity":null}"#).unwrap();
        assert_eq!(item.quantity, "");
        assert_eq!(item.unit_price, "");
    }

    #[test]
    fn item_keeps_malformed_text() {
        let mut item = LineItem::default();
        item.set(ItemField::UnitPrice, "1,5");
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""unitPrice":"1,5""#));
        let back: LineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn details_accept_legacy_client_key() {
        let details: InvoiceDetails =
            serde_json::from_str(r#"{"name":"Client Ltd","currency":"EUR"}"#).unwrap();
        assert_eq!(details.client_name, "Client Ltd");
        assert_eq!(details.currency, "EUR");
        assert_eq!(details.company_name, "");
    }

    #[test]
    fn details_default_currency_is_usd() {
        assert_eq!(InvoiceDetails::default().currency, "USD");
    }

    #[test]
    fn issue_date_parses() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let details = InvoiceDetails::default().with_issue_date(date);
        assert_eq!(details.date, "2024-06-15");
        assert_eq!(details.issue_date(), Some(date));
        assert_eq!(InvoiceDetails::default().issue_date(), None);
    }

    #[test]
    fn empty_notes_clear_option() {
        let mut details = InvoiceDetails::default();
        details.set(DetailField::Notes, "Thanks");
        assert_eq!(details.notes.as_deref(), Some("Thanks"));
        details.set(DetailField::Notes, "");
        assert_eq!(details.notes, None);
    }

    #[test]
    fn field_key_display() {
        assert_eq!(FieldKey::item(1, ItemField::UnitPrice).to_string(), "1-unitPrice");
        assert_eq!(FieldKey::ItemGeneral(0).to_string(), "0-general");
        assert_eq!(FieldKey::Detail(DetailField::Gstin).to_string(), "gstin");
        assert_eq!(FieldKey::General.to_string(), "general");
    }

    #[test]
    fn keys_shift_after_removal() {
        let gstin = FieldKey::Detail(DetailField::Gstin);
        assert_eq!(gstin.after_removal(0), Some(gstin));
        assert_eq!(FieldKey::item(1, ItemField::Tax).after_removal(1), None);
        assert_eq!(
            FieldKey::item(3, ItemField::Tax).after_removal(1),
            Some(FieldKey::item(2, ItemField::Tax))
        );
        assert_eq!(FieldKey::ItemGeneral(0).after_removal(1), Some(FieldKey::ItemGeneral(0)));
    }
}
