use crate::core::*;

/// Ordered line items with the minimum-count policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemStore {
    items: Vec<LineItem>,
    min_items: usize,
}

impl LineItemStore {
    /// `min_items` of 0 allows removing every row.
    pub fn new(items: Vec<LineItem>, min_items: usize) -> Self {
        Self { items, min_items }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn min_items(&self) -> usize {
        self.min_items
    }

    pub fn get(&self, index: usize) -> Result<&LineItem, FormError> {
        self.items.get(index).ok_or(FormError::NoSuchItem {
            index,
            len: self.items.len(),
        })
    }

    /// Append a blank row and return its index.
    pub fn add(&mut self) -> usize {
        self.push(LineItem::default())
    }

    pub fn push(&mut self, item: LineItem) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    /// Whether one more row may be removed under the policy.
    pub fn can_remove(&self) -> bool {
        self.min_items == 0 || self.items.len() > self.min_items
    }

    pub fn remove(&mut self, index: usize) -> Result<LineItem, FormError> {
        self.get(index)?;
        if !self.can_remove() {
            return Err(FormError::MinimumItems {
                min: self.min_items,
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn set(&mut self, index: usize, field: ItemField, value: &str) -> Result<(), FormError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(FormError::NoSuchItem { index, len })?;
        item.set(field, value);
        Ok(())
    }
}

/// The invoice header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailsStore {
    details: InvoiceDetails,
}

impl DetailsStore {
    pub fn new(details: InvoiceDetails) -> Self {
        Self { details }
    }

    pub fn details(&self) -> &InvoiceDetails {
        &self.details
    }

    pub fn get(&self, field: DetailField) -> &str {
        self.details.get(field)
    }

    pub fn set(&mut self, field: DetailField, value: &str) {
        self.details.set(field, value);
    }

    /// Symbol for the selected currency, `"$"` for unknown codes.
    pub fn currency_symbol(&self) -> &'static str {
        currency_symbol(&self.details.currency)
    }
}
