//! Round-trip tests for the JSON session slot: save/load fidelity, missing
//! and corrupt slots, and the reload behavior a wizard session relies on.

use estimate_client::JsonFileStorage;
use estimate_core::{
    BasicInfoPatch, DraftSession, PersistentSession, SessionStorage, StorageError, WorkItemEntry,
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn slot_in(dir: &tempfile::TempDir) -> JsonFileStorage {
    JsonFileStorage::new(dir.path().join("draft-session.json"))
}

fn sample_session() -> DraftSession {
    let mut session = DraftSession::new();
    session.set_basic_info(BasicInfoPatch {
        investor_name: Some("Jan Kowalski".to_string()),
        investor_address: Some("ul. Prosta 1".to_string()),
        ..BasicInfoPatch::default()
    });
    session.add_work_item(WorkItemEntry::new(
        "Wall plastering",
        "m2",
        dec!(10),
        dec!(25),
        vec![],
    ));
    session.set_discounts(dec!(10), dec!(5));
    session.set_current_step(3);
    session
}

#[test]
fn empty_slot_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let storage = slot_in(&dir);

    assert_eq!(storage.load().unwrap(), None);
}

#[test]
fn save_then_load_restores_the_identical_session() {
    let dir = tempfile::tempdir().unwrap();
    let storage = slot_in(&dir);
    let session = sample_session();

    storage.save(&session).unwrap();
    let loaded = storage.load().unwrap();

    assert_eq!(loaded, Some(session));
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path().join("nested/deeper/draft-session.json"));

    storage.save(&DraftSession::new()).unwrap();

    assert!(storage.path().exists());
}

#[test]
fn clear_removes_the_slot_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let storage = slot_in(&dir);
    storage.save(&sample_session()).unwrap();

    storage.clear().unwrap();
    storage.clear().unwrap();

    assert_eq!(storage.load().unwrap(), None);
}

#[test]
fn corrupt_slot_is_reported_not_silently_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let storage = slot_in(&dir);
    std::fs::write(storage.path(), b"{ not json").unwrap();

    let result = storage.load();

    assert!(matches!(result, Err(StorageError::Corrupt(_))));
}

#[test]
fn persistent_session_reloads_across_handles() {
    let dir = tempfile::tempdir().unwrap();
    let storage = slot_in(&dir);

    let mut wizard = PersistentSession::open(&storage).unwrap();
    let id = wizard
        .update(|s| {
            let id = s.add_work_item(WorkItemEntry::new(
                "Painting",
                "m2",
                dec!(20),
                dec!(15),
                vec![],
            ));
            s.step_forward();
            id
        })
        .unwrap();

    let reopened = PersistentSession::open(&storage).unwrap();

    assert_eq!(reopened.session().current_step(), 1);
    assert_eq!(reopened.session().draft().items[0].id, id);
    assert_eq!(reopened.session().labor_cost(), dec!(300.00));
}
