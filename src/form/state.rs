use std::collections::{BTreeMap, BTreeSet};

use crate::core::{FieldKey, ValidationResult};

/// Per-field UI state: blocking errors, advisories, and the transient
/// valid/just-fixed markers used for highlighting.
///
/// None of this is persisted; it is rebuilt from the draft as the user edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    errors: BTreeMap<FieldKey, String>,
    advisories: BTreeMap<FieldKey, String>,
    valid: BTreeSet<FieldKey>,
    fixed: BTreeSet<FieldKey>,
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocking messages by key.
    pub fn errors(&self) -> &BTreeMap<FieldKey, String> {
        &self.errors
    }

    /// Advisory messages by key.
    pub fn advisories(&self) -> &BTreeMap<FieldKey, String> {
        &self.advisories
    }

    pub fn error(&self, key: &FieldKey) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    pub fn advisory(&self, key: &FieldKey) -> Option<&str> {
        self.advisories.get(key).map(String::as_str)
    }

    pub fn has_error(&self, key: &FieldKey) -> bool {
        self.errors.contains_key(key)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_valid(&self, key: &FieldKey) -> bool {
        self.valid.contains(key)
    }

    pub fn is_fixed(&self, key: &FieldKey) -> bool {
        self.fixed.contains(key)
    }

    pub fn fixed(&self) -> impl Iterator<Item = &FieldKey> {
        self.fixed.iter()
    }

    /// Overwrite both message slots for `key` with `result`.
    pub fn record(&mut self, key: FieldKey, result: &ValidationResult) {
        set_or_remove(&mut self.errors, key, result.blocking_message());
        set_or_remove(&mut self.advisories, key, result.advisory_message());
    }

    pub fn set_error(&mut self, key: FieldKey, message: impl Into<String>) {
        self.errors.insert(key, message.into());
    }

    /// Replace the whole error map, as a full validation pass does.
    pub fn replace_errors(&mut self, errors: BTreeMap<FieldKey, String>) {
        self.errors = errors;
    }

    pub fn set_valid(&mut self, key: FieldKey, valid: bool) {
        if valid {
            self.valid.insert(key);
        } else {
            self.valid.remove(&key);
        }
    }

    pub fn mark_fixed(&mut self, key: FieldKey) {
        self.fixed.insert(key);
    }

    /// Clear the just-fixed marker. Returns false if it was not set, e.g.
    /// because the row was removed in the meantime.
    pub fn unfix(&mut self, key: &FieldKey) -> bool {
        self.fixed.remove(key)
    }

    /// Forget row `index` and move later rows' state up by one.
    pub fn remove_item(&mut self, index: usize) {
        self.errors = shift_map(std::mem::take(&mut self.errors), index);
        self.advisories = shift_map(std::mem::take(&mut self.advisories), index);
        self.valid = shift_set(std::mem::take(&mut self.valid), index);
        self.fixed = shift_set(std::mem::take(&mut self.fixed), index);
    }
}

fn set_or_remove(map: &mut BTreeMap<FieldKey, String>, key: FieldKey, message: Option<&str>) {
    match message {
        Some(m) if !m.is_empty() => {
            map.insert(key, m.to_string());
        }
        _ => {
            map.remove(&key);
        }
    }
}

fn shift_map(map: BTreeMap<FieldKey, String>, removed: usize) -> BTreeMap<FieldKey, String> {
    map.into_iter()
        .filter_map(|(k, v)| k.after_removal(removed).map(|k| (k, v)))
        .collect()
}

fn shift_set(set: BTreeSet<FieldKey>, removed: usize) -> BTreeSet<FieldKey> {
    set.into_iter()
        .filter_map(|k| k.after_removal(removed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DetailField, ItemField};

    #[test]
    fn record_overwrites_both_slots() {
        let key = FieldKey::item(0, ItemField::Discount);
        let mut state = FieldState::new();
        state.record(key, &ValidationResult::blocking("bad"));
        assert_eq!(state.error(&key), Some("bad"));

        state.record(key, &ValidationResult::advisory("hmm"));
        assert!(!state.has_error(&key));
        assert_eq!(state.advisory(&key), Some("hmm"));

        state.record(key, &ValidationResult::ok());
        assert_eq!(state.advisory(&key), None);
    }

    #[test]
    fn remove_item_shifts_later_rows() {
        let mut state = FieldState::new();
        state.set_error(FieldKey::item(0, ItemField::Tax), "zero");
        state.set_error(FieldKey::item(1, ItemField::Tax), "one");
        state.set_error(FieldKey::item(2, ItemField::Tax), "two");
        state.set_error(FieldKey::Detail(DetailField::Gstin), "gstin");
        state.mark_fixed(FieldKey::item(1, ItemField::Quantity));
        state.set_valid(FieldKey::item(2, ItemField::Quantity), true);

        state.remove_item(1);

        assert_eq!(state.error(&FieldKey::item(0, ItemField::Tax)), Some("zero"));
        assert_eq!(state.error(&FieldKey::item(1, ItemField::Tax)), Some("two"));
        assert!(!state.has_error(&FieldKey::item(2, ItemField::Tax)));
        assert!(state.has_error(&FieldKey::Detail(DetailField::Gstin)));
        assert_eq!(state.fixed().count(), 0);
        assert!(state.is_valid(&FieldKey::item(1, ItemField::Quantity)));
    }
}
