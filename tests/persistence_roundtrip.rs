// Bill state survives a full store close/reopen cycle
use splitparty::client::services::bill_service;
use splitparty::client::storage::{FileStore, KeyValueStore};
use splitparty::common::models::{Bill, ProductForm};
use uuid::Uuid;

#[test]
fn saved_bill_state_survives_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let party_id = Uuid::new_v4();

    let bill = Bill::new("Breakfast run", "@pollle4kaa", "15.09");
    let bill_id = bill.id;
    {
        let mut store = FileStore::open(&path).unwrap();
        let mut sheet = bill_service::load_sheet(&store, bill.clone(), Vec::new());
        sheet
            .add_product(&ProductForm {
                name: "Chips".to_string(),
                price_per_unit: "50".to_string(),
                total_quantity: "3".to_string(),
            })
            .unwrap();
        sheet
            .add_product(&ProductForm {
                name: "Lemonade".to_string(),
                price_per_unit: "120".to_string(),
                total_quantity: "2".to_string(),
            })
            .unwrap();
        let chips = sheet.products[0].id;
        sheet.increment(chips);
        sheet.increment(chips);
        sheet.toggle_participation();
        bill_service::save_sheet(&mut store, &mut sheet, "@pollle4kaa");
        bill_service::save_bill_list(&mut store, party_id, &[sheet.bill.clone()]);
    }

    let store = FileStore::open(&path).unwrap();
    let sheet = bill_service::load_sheet(&store, bill, Vec::new());
    assert_eq!(sheet.products.len(), 2);
    assert_eq!(sheet.products[0].name, "Chips");
    assert_eq!(sheet.products[0].user_quantity, 2);
    assert_eq!(sheet.products[1].price_per_unit, 120);
    assert!(sheet.opted_out, "participation flag must round-trip");
    // quantities were kept even though the user had opted out
    assert_eq!(sheet.total(), 100);

    let bills = bill_service::load_bill_list(&store, party_id, Vec::new());
    assert_eq!(bills.len(), 1);
    assert_eq!(bills[0].id, bill_id);
    assert!(bills[0].is_completed, "save marks the bill completed");
}

#[test]
fn partial_state_loads_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let mut store = FileStore::open(&path).unwrap();

    // only a stored title, nothing else
    let bill = Bill::new("Breakfast run", "@pollle4kaa", "15.09");
    store
        .set(
            &splitparty::client::storage::keys::bill_title(&bill.id),
            "Stored title",
        )
        .unwrap();

    let sheet = bill_service::load_sheet(&store, bill, Vec::new());
    assert_eq!(sheet.bill.title, "Stored title");
    assert!(sheet.products.is_empty());
    assert!(!sheet.opted_out, "absent participation flag defaults to participating");
}
