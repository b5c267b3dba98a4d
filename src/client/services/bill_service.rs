//! Bill detail editing and the per-bill persistence contract.
//!
//! Saving writes each field under its own composite key; loading overlays
//! whatever is stored onto the in-memory bill. Storage failures degrade to
//! "nothing happened": they are logged and the in-memory state stays
//! authoritative for the session.

use log::warn;
use uuid::Uuid;

use crate::client::storage::{keys, KeyValueStore};
use crate::common::dates;
use crate::common::models::{bill_total, Bill, Product, ProductForm, ProductFormError};

/// Editable state behind the bill detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillSheet {
    pub bill: Bill,
    pub products: Vec<Product>,
    /// "Did not participate": while set, quantity controls are inactive.
    /// Claimed quantities are kept so opting back in restores them.
    pub opted_out: bool,
}

impl BillSheet {
    pub fn new(bill: Bill) -> Self {
        Self {
            bill,
            products: Vec::new(),
            opted_out: false,
        }
    }

    pub fn controls_enabled(&self) -> bool {
        !self.opted_out
    }

    pub fn toggle_participation(&mut self) {
        self.opted_out = !self.opted_out;
    }

    pub fn total(&self) -> u64 {
        bill_total(&self.products)
    }

    pub fn add_product(&mut self, form: &ProductForm) -> Result<(), ProductFormError> {
        let product = form.build()?;
        self.products.push(product);
        Ok(())
    }

    /// Claim one more unit of `product_id`. Ignored while opted out or at
    /// the available-quantity cap.
    pub fn increment(&mut self, product_id: Uuid) {
        if self.opted_out {
            return;
        }
        if let Some(p) = self.products.iter_mut().find(|p| p.id == product_id) {
            p.increment();
        }
    }

    /// Release one claimed unit of `product_id`. Ignored while opted out or
    /// at zero.
    pub fn decrement(&mut self, product_id: Uuid) {
        if self.opted_out {
            return;
        }
        if let Some(p) = self.products.iter_mut().find(|p| p.id == product_id) {
            p.decrement();
        }
    }

    /// Apply a title/date edit on behalf of `editor`. Returns false (and
    /// changes nothing) when the editor is not the bill's creator.
    pub fn apply_edits(&mut self, editor: &str, title: &str, date: &str) -> bool {
        if !self.bill.is_editable_by(editor) {
            return false;
        }
        self.bill.title = title.to_string();
        self.bill.date = date.to_string();
        true
    }
}

/// Persist the sheet: products, participation, title/date when `editor`
/// created the bill, and the completion flag, which save always sets.
pub fn save_sheet(store: &mut dyn KeyValueStore, sheet: &mut BillSheet, editor: &str) {
    let id = sheet.bill.id;
    match serde_json::to_string(&sheet.products) {
        Ok(json) => put(store, &keys::bill_products(&id), &json),
        Err(e) => warn!("could not serialize products for bill {}: {}", id, e),
    }
    put(
        store,
        &keys::bill_participation(&id),
        if sheet.opted_out { "true" } else { "false" },
    );
    if sheet.bill.is_editable_by(editor) {
        put(store, &keys::bill_title(&id), &sheet.bill.title);
        put(store, &keys::bill_date(&id), &sheet.bill.date);
    }
    sheet.bill.is_completed = true;
    put(store, &keys::bill_completed(&id), "true");
}

/// Restore a sheet. `in_memory` products are kept when nothing is stored;
/// a stored title or date overrides the in-memory bill's fields.
pub fn load_sheet(store: &dyn KeyValueStore, bill: Bill, in_memory: Vec<Product>) -> BillSheet {
    let mut sheet = BillSheet {
        bill,
        products: in_memory,
        opted_out: false,
    };
    let id = sheet.bill.id;
    if let Some(json) = store.get(&keys::bill_products(&id)) {
        match serde_json::from_str(&json) {
            Ok(products) => sheet.products = products,
            Err(e) => warn!("could not decode stored products for bill {}: {}", id, e),
        }
    }
    sheet.opted_out = store
        .get(&keys::bill_participation(&id))
        .map(|v| v == "true")
        .unwrap_or(false);
    if let Some(title) = store.get(&keys::bill_title(&id)) {
        sheet.bill.title = title;
    }
    if let Some(date) = store.get(&keys::bill_date(&id)) {
        sheet.bill.date = date;
    }
    sheet
}

/// A fresh bill created by `creator`, dated today.
pub fn new_bill(creator: &str) -> Bill {
    Bill::new("New bill", creator, &dates::today_day_month())
}

/// Persist a party's bill list under the party key.
pub fn save_bill_list(store: &mut dyn KeyValueStore, party_id: Uuid, bills: &[Bill]) {
    match serde_json::to_string(bills) {
        Ok(json) => put(store, &keys::party_bills(&party_id), &json),
        Err(e) => warn!("could not serialize bills for party {}: {}", party_id, e),
    }
}

/// Load a party's bill list, falling back to `current` when nothing is
/// stored, then overlay each bill's completion flag from its own key.
pub fn load_bill_list(
    store: &dyn KeyValueStore,
    party_id: Uuid,
    current: Vec<Bill>,
) -> Vec<Bill> {
    let mut bills = match store.get(&keys::party_bills(&party_id)) {
        Some(json) => match serde_json::from_str(&json) {
            Ok(list) => list,
            Err(e) => {
                warn!("could not decode stored bills for party {}: {}", party_id, e);
                current
            }
        },
        None => current,
    };
    for bill in &mut bills {
        if let Some(v) = store.get(&keys::bill_completed(&bill.id)) {
            bill.is_completed = v == "true";
        }
    }
    bills
}

fn put(store: &mut dyn KeyValueStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        warn!("could not persist {}: {}", key, e);
    }
}
