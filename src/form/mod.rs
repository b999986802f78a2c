//! The invoice form: stores, field state, timers and autosave in one context.
//!
//! [`InvoiceForm`] is created once at startup and every user action is a
//! method on it. It never blocks and owns no threads: the host forwards input
//! events, reports elapsed time through [`InvoiceForm::advance`], and renders
//! from the accessors.

mod state;
mod store;
mod summary;

use std::time::Duration;

use chrono::{Local, NaiveDate};

pub use state::FieldState;
pub use store::{DetailsStore, LineItemStore};
pub use summary::{ErrorCategory, ErrorSummary, SummaryEntry};

use crate::config::FormConfig;
use crate::core::*;
use crate::persist::{Autosave, Storage};
use crate::preview::Preview;
use crate::schedule::Scheduler;

/// Shown when printing is blocked by validation errors.
pub const PRINT_BLOCKED_MESSAGE: &str =
    "Please fix all validation errors before printing the invoice.";

/// Shown on export; PDFs come from the host's print dialog.
pub const EXPORT_INSTRUCTIONS: &str = "To save as PDF:\n\n1. Click the \"Print Invoice\" button\n2. Select \"Save as PDF\" in the print dialog\n3. Choose a save location and click Save";

/// Timers owned by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimerKey {
    /// Debounced draft write.
    Autosave,
    /// Hides the "Auto-saved at ..." notice.
    SavedNotice,
    /// Ends the just-fixed highlight of one field.
    FixedExpiry(FieldKey),
}

/// Host facilities used by the print, export and validate actions.
pub trait PrintHost {
    /// Open the native print dialog.
    fn print(&mut self);

    /// Bring the error summary into view.
    fn scroll_to_top(&mut self) {}

    /// Show a blocking message.
    fn alert(&mut self, message: &str);
}

/// Application context for one invoice draft.
#[derive(Debug)]
pub struct InvoiceForm<S> {
    config: FormConfig,
    items: LineItemStore,
    details: DetailsStore,
    fields: FieldState,
    timers: Scheduler<TimerKey>,
    autosave: Autosave<S>,
    dark_mode: bool,
}

impl<S: Storage> InvoiceForm<S> {
    /// Load the saved draft from `storage`, falling back to a blank draft
    /// dated today. `prefers_dark` is the OS theme, used when no preference
    /// was stored.
    pub fn open(storage: S, config: FormConfig, prefers_dark: bool) -> Self {
        Self::open_on(storage, config, prefers_dark, Local::now().date_naive())
    }

    /// Like [`InvoiceForm::open`] with an explicit date for a blank draft.
    pub fn open_on(storage: S, config: FormConfig, prefers_dark: bool, today: NaiveDate) -> Self {
        let autosave = Autosave::new(storage, config.storage_keys.clone());
        let blank = InvoiceDetails {
            currency: config.default_currency.clone(),
            ..InvoiceDetails::default()
        }
        .with_issue_date(today);
        let draft = autosave.load(blank);
        let dark_mode = autosave.load_dark_mode(prefers_dark);
        tracing::debug!(items = draft.items.len(), dark_mode, "invoice form opened");

        Self {
            items: LineItemStore::new(draft.items, config.min_items),
            details: DetailsStore::new(draft.details),
            fields: FieldState::new(),
            timers: Scheduler::new(),
            autosave,
            dark_mode,
            config,
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn items(&self) -> &[LineItem] {
        self.items.items()
    }

    pub fn item_store(&self) -> &LineItemStore {
        &self.items
    }

    pub fn details(&self) -> &InvoiceDetails {
        self.details.details()
    }

    pub fn fields(&self) -> &FieldState {
        &self.fields
    }

    pub fn errors(&self) -> &std::collections::BTreeMap<FieldKey, String> {
        self.fields.errors()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn currency_symbol(&self) -> &'static str {
        self.details.currency_symbol()
    }

    /// Totals from the items as they are right now.
    pub fn totals(&self) -> Totals {
        calculate_totals(self.items.items())
    }

    /// The "Auto-saved at ..." notice, while it is showing.
    pub fn saved_notice(&self) -> Option<&str> {
        self.autosave.notice()
    }

    pub fn is_pending(&self, timer: &TimerKey) -> bool {
        self.timers.is_scheduled(timer)
    }

    /// Time until the next timer fires, for the host's event loop.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn storage(&self) -> &S {
        self.autosave.storage()
    }

    pub fn into_storage(self) -> S {
        self.autosave.into_storage()
    }

    pub fn preview(&self) -> Preview {
        Preview::new(self.details.details(), self.items.items())
    }

    /// Append a blank row; returns its index.
    pub fn add_item(&mut self) -> usize {
        let index = self.items.add();
        self.schedule_autosave();
        index
    }

    /// Remove a row, subject to the minimum-items policy.
    ///
    /// The row's field state and pending highlight timers go with it; state of
    /// later rows moves up by one.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, FormError> {
        let removed = self.items.remove(index)?;
        self.fields.remove_item(index);
        self.timers.rekey(|timer| match *timer {
            TimerKey::FixedExpiry(key) => key.after_removal(index).map(TimerKey::FixedExpiry),
            other => Some(other),
        });
        self.schedule_autosave();
        Ok(removed)
    }

    /// Apply a keystroke to one item column and validate it.
    ///
    /// The value is stored exactly as given. The returned result is also
    /// recorded in the field state under `"<index>-<field>"`.
    pub fn edit_item(
        &mut self,
        index: usize,
        field: ItemField,
        value: &str,
    ) -> Result<ValidationResult, FormError> {
        self.items.set(index, field, value)?;

        let key = FieldKey::item(index, field);
        let had_error = self.fields.has_error(&key);
        let result = validate_item_field(index, field, value);
        self.fields.record(key, &result);
        self.track_fix(key, had_error, is_item_value_valid(field, value));

        self.schedule_autosave();
        Ok(result)
    }

    /// Apply an edit to a header column.
    ///
    /// Company and client name are required, GSTIN is format-checked and the
    /// company address is marked valid once filled in. Other columns are
    /// stored without checks.
    pub fn edit_detail(&mut self, field: DetailField, value: &str) -> ValidationResult {
        self.details.set(field, value);

        let key = FieldKey::Detail(field);
        let had_error = self.fields.has_error(&key);
        let result = match field {
            DetailField::CompanyName => {
                required(value, "Please provide your company name")
            }
            DetailField::ClientName => {
                required(value, "Please provide a name for the client/recipient")
            }
            DetailField::Gstin => validate_gstin(value),
            DetailField::CompanyAddress => {
                self.fields.set_valid(key, !value.trim().is_empty());
                self.schedule_autosave();
                return ValidationResult::ok();
            }
            _ => {
                self.schedule_autosave();
                return ValidationResult::ok();
            }
        };

        self.fields.record(key, &result);
        // Clearing the optional GSTIN keeps its valid marker as it was.
        if !(field == DetailField::Gstin && value.is_empty()) {
            let filled = !value.trim().is_empty();
            self.track_fix(key, had_error, filled && result.is_valid());
        }

        self.schedule_autosave();
        result
    }

    /// Change the display currency; amounts are not converted.
    pub fn set_currency(&mut self, code: &str) {
        self.edit_detail(DetailField::Currency, code);
    }

    /// Flip the theme and store the preference immediately.
    pub fn toggle_theme(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.autosave.store_dark_mode(self.dark_mode);
        self.dark_mode
    }

    /// Rebuild the error map from the whole draft. Returns true when nothing
    /// blocks printing.
    pub fn validate_all(&mut self) -> bool {
        let errors = collect_errors(self.details.details(), self.items.items());
        let ok = errors.is_empty();
        tracing::debug!(errors = errors.len(), "full validation");
        self.fields.replace_errors(errors);
        ok
    }

    /// Blocking errors grouped for display.
    pub fn error_summary(&self) -> ErrorSummary {
        ErrorSummary::from_errors(self.fields.errors())
    }

    /// The "Validate Form" action: validate everything and tell the user.
    pub fn validate_form(&mut self, host: &mut impl PrintHost) -> bool {
        if self.validate_all() {
            host.alert(&self.success_message());
            true
        } else {
            host.scroll_to_top();
            host.alert(&self.error_summary().message());
            false
        }
    }

    /// The "Print" action: print only a draft without blocking errors.
    pub fn print(&mut self, host: &mut impl PrintHost) -> bool {
        if self.validate_all() {
            host.print();
            true
        } else {
            host.scroll_to_top();
            let summary = self.error_summary();
            host.alert(&format!("{PRINT_BLOCKED_MESSAGE}\n\n{}", summary.message()));
            false
        }
    }

    /// The "Export" action: explain how to save a PDF, then print.
    pub fn export(&mut self, host: &mut impl PrintHost) -> bool {
        host.alert(EXPORT_INSTRUCTIONS);
        self.print(host)
    }

    fn success_message(&self) -> String {
        format!(
            "✅ Great job!\n\nYour invoice is valid and contains:\n- {} item(s)\n- Total amount: {}{}\n\nYou can now safely print or export your invoice.",
            self.items.len(),
            self.currency_symbol(),
            format_amount(self.totals().total)
        )
    }

    /// Let `elapsed` time pass, running every timer that comes due in
    /// deadline order.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        while let Some(timer) = self.timers.pop_due(until) {
            self.fire(timer);
        }
        self.timers.settle(until);
    }

    /// Write the draft now instead of waiting for the debounce.
    pub fn save_now(&mut self) -> bool {
        self.timers.cancel(&TimerKey::Autosave);
        self.fire_autosave()
    }

    fn fire(&mut self, timer: TimerKey) {
        match timer {
            TimerKey::Autosave => {
                self.fire_autosave();
            }
            TimerKey::SavedNotice => self.autosave.clear_notice(),
            TimerKey::FixedExpiry(key) => {
                if !self.fields.unfix(&key) {
                    tracing::debug!(field = %key, "highlight expired for a field that is gone");
                }
            }
        }
    }

    fn fire_autosave(&mut self) -> bool {
        let saved = self
            .autosave
            .flush(self.items.items(), self.details.details());
        if saved {
            self.timers
                .schedule(TimerKey::SavedNotice, self.config.saved_notice_duration());
        }
        saved
    }

    fn schedule_autosave(&mut self) {
        self.timers
            .schedule(TimerKey::Autosave, self.config.autosave_delay());
    }

    /// Update the valid marker and start the just-fixed highlight when a field
    /// with an error becomes valid.
    fn track_fix(&mut self, key: FieldKey, had_error: bool, valid: bool) {
        self.fields.set_valid(key, valid);
        if had_error && valid {
            self.fields.mark_fixed(key);
            self.timers.schedule(
                TimerKey::FixedExpiry(key),
                self.config.fixed_highlight_duration(),
            );
        } else if !valid && self.fields.unfix(&key) {
            self.timers.cancel(&TimerKey::FixedExpiry(key));
        }
    }
}

fn required(value: &str, message: &str) -> ValidationResult {
    if value.trim().is_empty() {
        ValidationResult::blocking(message)
    } else {
        ValidationResult::ok()
    }
}
