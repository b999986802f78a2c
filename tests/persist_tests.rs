use std::time::Duration;

use chrono::NaiveDate;
use invoice_form::config::{FormConfig, StorageKeys};
use invoice_form::core::*;
use invoice_form::form::InvoiceForm;
use invoice_form::persist::{Autosave, MemoryStorage, Storage};

const ITEMS_KEY: &str = "invoiceBuilderItems";
const DETAILS_KEY: &str = "invoiceBuilderDetails";
const DARK_KEY: &str = "invoiceBuilderDarkMode";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// Show the crate's warnings in test output; safe to call from every test.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("warn,invoice_form=debug")
        .with_test_writer()
        .try_init()
        .ok();
}

fn open<S: Storage>(storage: S) -> InvoiceForm<S> {
    InvoiceForm::open_on(storage, FormConfig::default(), false, today())
}

// --- Round trips ---

#[test]
fn draft_survives_reopen_with_raw_text() {
    let mut form = open(MemoryStorage::new());
    form.edit_detail(DetailField::CompanyName, "ACME Pvt Ltd");
    form.edit_detail(DetailField::Gstin, "29ABCDE1234F1Z");
    form.edit_item(0, ItemField::Description, "Widgets").unwrap();
    form.edit_item(0, ItemField::Quantity, "1,5").unwrap();
    form.edit_item(0, ItemField::UnitPrice, "abc").unwrap();
    let i = form.add_item();
    form.edit_item(i, ItemField::Tax, "18").unwrap();
    form.advance(Duration::from_secs(1));

    let reopened = open(form.into_storage());
    assert_eq!(reopened.items().len(), 2);
    assert_eq!(reopened.items()[0].quantity, "1,5");
    assert_eq!(reopened.items()[0].unit_price, "abc");
    assert_eq!(reopened.items()[1].tax, "18");
    assert_eq!(reopened.details().company_name, "ACME Pvt Ltd");
    assert_eq!(reopened.details().gstin, "29ABCDE1234F1Z");

    // Field state is not persisted; malformed values are found again.
    assert!(reopened.errors().is_empty());
    let mut reopened = reopened;
    assert!(!reopened.validate_all());
    assert!(reopened
        .errors()
        .contains_key(&FieldKey::item(0, ItemField::Quantity)));
}

#[cfg(feature = "fs")]
#[test]
fn file_storage_round_trip() {
    use invoice_form::persist::FileStorage;

    let dir = tempfile::tempdir().unwrap();
    let mut form = open(FileStorage::open(dir.path()).unwrap());
    form.edit_detail(DetailField::ClientName, "Kunde Traders");
    form.edit_item(0, ItemField::Discount, "12.5").unwrap();
    form.advance(Duration::from_secs(1));
    drop(form);

    assert!(dir.path().join(ITEMS_KEY).exists());
    assert!(dir.path().join(DETAILS_KEY).exists());

    let reopened = open(FileStorage::open(dir.path()).unwrap());
    assert_eq!(reopened.details().client_name, "Kunde Traders");
    assert_eq!(reopened.items()[0].discount, "12.5");
}

#[cfg(feature = "fs")]
#[test]
fn file_storage_rejects_path_like_keys() {
    use invoice_form::persist::FileStorage;

    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::open(dir.path()).unwrap();
    assert!(storage.set("../escape", "x").is_err());
    assert!(storage.get(".hidden").is_err());
    assert_eq!(storage.get("missing").unwrap(), None);
    storage.remove("missing").unwrap();
}

// --- Defaults and corruption ---

#[test]
fn empty_storage_gives_blank_draft() {
    let form = open(MemoryStorage::new());
    assert_eq!(form.items(), &[LineItem::default()]);
    assert_eq!(form.details().issue_date(), Some(today()));
    assert_eq!(form.details().currency, DEFAULT_CURRENCY);
}

#[test]
fn corrupt_items_fall_back_independently() {
    init_tracing();
    let mut storage = MemoryStorage::new();
    storage.set(ITEMS_KEY, "[{not json").unwrap();
    storage
        .set(DETAILS_KEY, r#"{"companyName":"Kept Ltd","currency":"INR"}"#)
        .unwrap();

    let form = open(storage);
    assert_eq!(form.items(), &[LineItem::default()]);
    assert_eq!(form.details().company_name, "Kept Ltd");
    assert_eq!(form.currency_symbol(), "₹");
}

#[test]
fn corrupt_details_fall_back() {
    init_tracing();
    let mut storage = MemoryStorage::new();
    storage.set(DETAILS_KEY, "42").unwrap();
    let form = open(storage);
    assert_eq!(form.details().date, "2024-06-15");
    assert_eq!(form.details().company_name, "");
}

#[test]
fn numeric_json_values_load_as_text() {
    let mut storage = MemoryStorage::new();
    storage
        .set(
            ITEMS_KEY,
            r#"[{"description":"Legacy","quantity":3,"unitPrice":19.99,"tax":18,"discount":0}]"#,
        )
        .unwrap();
    let form = open(storage);
    assert_eq!(form.items()[0].quantity, "3");
    assert_eq!(form.items()[0].unit_price, "19.99");
}

#[test]
fn saved_empty_list_is_respected() {
    let mut storage = MemoryStorage::new();
    storage.set(ITEMS_KEY, "[]").unwrap();
    let form = open(storage);
    assert!(form.items().is_empty());
}

// --- Failures ---

#[test]
fn quota_failure_is_retried_on_next_edit() {
    init_tracing();
    let mut form = open(MemoryStorage::with_quota(1000));
    form.edit_item(0, ItemField::Description, &"x".repeat(2000))
        .unwrap();
    form.advance(Duration::from_secs(1));
    assert_eq!(form.storage().writes(), 0);
    assert_eq!(form.saved_notice(), None);

    // The failed save is not retried on its own.
    form.advance(Duration::from_secs(10));
    assert_eq!(form.storage().writes(), 0);

    form.edit_item(0, ItemField::Description, "Short").unwrap();
    form.advance(Duration::from_secs(1));
    assert_eq!(form.storage().writes(), 2);
    assert!(form.saved_notice().is_some());
}

#[test]
fn save_now_reports_failure() {
    let mut form = open(MemoryStorage::with_quota(10));
    assert!(!form.save_now());
}

// --- Theme ---

#[test]
fn theme_falls_back_to_os_preference() {
    let form = InvoiceForm::open_on(MemoryStorage::new(), FormConfig::default(), true, today());
    assert!(form.dark_mode());
}

#[test]
fn stored_theme_wins_over_os_preference() {
    let mut storage = MemoryStorage::new();
    storage.set(DARK_KEY, "false").unwrap();
    let form = InvoiceForm::open_on(storage, FormConfig::default(), true, today());
    assert!(!form.dark_mode());
}

#[test]
fn toggled_theme_survives_reopen() {
    let mut form = open(MemoryStorage::new());
    form.toggle_theme();
    let reopened = open(form.into_storage());
    assert!(reopened.dark_mode());
}

// --- Custom keys ---

#[test]
fn custom_storage_keys() {
    let keys = StorageKeys {
        items: "a".into(),
        details: "b".into(),
        dark_mode: "c".into(),
    };
    let mut autosave = Autosave::new(MemoryStorage::new(), keys.clone());
    let details = DetailsBuilder::new("ACME", "Kunde").build();
    let items = vec![LineItemBuilder::new("Thing", "1", "2").build()];
    assert!(autosave.flush(&items, &details));
    assert_eq!(autosave.saves(), 1);
    assert!(autosave.storage().get("a").unwrap().is_some());
    assert!(autosave.storage().get(ITEMS_KEY).unwrap().is_none());

    let draft = autosave.load(InvoiceDetails::default());
    assert_eq!(draft.items, items);
    assert_eq!(draft.details, details);

    let config = FormConfig::default().with_storage_keys(keys);
    let form = InvoiceForm::open_on(autosave.into_storage(), config, false, today());
    assert_eq!(form.details().company_name, "ACME");
}
