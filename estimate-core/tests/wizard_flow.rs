//! End-to-end walk through the five wizard steps against an in-memory slot:
//! basic info, catalog-backed work selection, price edits, discounts, and
//! the summary derivation, with the session reloaded mid-flow the way a page
//! reload would.

use estimate_core::{
    BasicInfoPatch, CatalogMaterial, DraftSession, MemoryStorage, PersistentSession, STEP_COUNT,
    SessionStorage, Work, WorkItemEntry, WorkItemPatch,
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn plastering_work() -> Work {
    Work {
        id: "w-03".to_string(),
        name: "Wall plastering".to_string(),
        category: "walls".to_string(),
        unit: "m2".to_string(),
        default_labor_price: dec!(25),
        is_system: true,
        materials: vec![CatalogMaterial {
            name: "plaster".to_string(),
            unit: "kg".to_string(),
            consumption_per_work_unit: dec!(1.5),
            default_price_per_unit: Some(dec!(40)),
        }],
    }
}

#[test]
fn wizard_flow_survives_a_reload_and_derives_consistent_totals() {
    let storage = MemoryStorage::new();
    let mut wizard = PersistentSession::open(&storage).unwrap();

    // Step 0: basic info.
    wizard
        .update(|s| {
            s.set_basic_info(BasicInfoPatch {
                investor_name: Some("Jan Kowalski".to_string()),
                investor_address: Some("ul. Prosta 1, Warszawa".to_string()),
                ..BasicInfoPatch::default()
            });
            s.step_forward();
        })
        .unwrap();

    // Step 1: pick a catalog work.
    let item_id = wizard
        .update(|s| {
            let id = s.add_work_item(WorkItemEntry::from_work(&plastering_work(), dec!(1)));
            s.step_forward();
            id
        })
        .unwrap();

    // Simulated page reload: a new handle over the same slot.
    let mut wizard = PersistentSession::open(&storage).unwrap();
    assert_eq!(wizard.session().current_step(), 2);
    assert_eq!(wizard.session().draft().items.len(), 1);

    // Step 2: adjust the quantity.
    wizard
        .update(|s| {
            s.update_work_item(
                item_id,
                WorkItemPatch {
                    quantity: Some(dec!(10)),
                    ..WorkItemPatch::default()
                },
            );
            s.step_forward();
        })
        .unwrap();

    // Step 3: discounts and dates.
    wizard
        .update(|s| {
            s.set_discounts(dec!(10), dec!(0));
            s.set_dates("2026-10-01", "");
            s.step_forward();
        })
        .unwrap();
    assert_eq!(wizard.session().current_step(), STEP_COUNT - 1);

    // Step 4: summary.
    let breakdown = wizard.session().cost_breakdown();
    assert_eq!(breakdown.labor_cost, dec!(250.00));
    assert_eq!(breakdown.material_cost, dec!(600.00));
    assert_eq!(breakdown.material_cost_with_discount, dec!(540.00));
    assert_eq!(breakdown.total_cost, dec!(790.00));

    let request = wizard.session().submission_request();
    assert_eq!(request.valid_until.as_deref(), Some("2026-10-01"));
    assert_eq!(request.start_date, None);
    assert_eq!(request.work_items[0].quantity, dec!(10));

    // Submission succeeded: start over.
    wizard.clear().unwrap();
    assert_eq!(wizard.session(), &DraftSession::new());
    assert_eq!(storage.load().unwrap(), None);
}
