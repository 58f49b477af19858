mod common;

use common::{date, expense};
use sparplan::plan::BillingInterval;
use sparplan::session::{SessionStore, EXPENSES_KEY, INCOME_KEY};
use sparplan::storage::{JsonFileStore, KeyValueStore, MemoryStore};
use tempfile::TempDir;

fn file_store(dir: &TempDir) -> JsonFileStore {
    JsonFileStore::open(dir.path().join("store.json")).expect("json store")
}

#[test]
fn fresh_store_opens_as_an_unconfigured_session() {
    let temp = TempDir::new().unwrap();
    let session = SessionStore::open(file_store(&temp)).unwrap();
    assert_eq!(session.session().income, None);
    assert!(session.session().expenses.is_empty());
}

#[test]
fn mutations_survive_a_reopen() {
    let temp = TempDir::new().unwrap();

    {
        let mut session = SessionStore::open(file_store(&temp)).unwrap();
        session.set_income(3000.0).unwrap();
        session
            .add_expense(expense(
                "Rent",
                BillingInterval::Monthly,
                850.0,
                date(2025, 1, 1),
                date(2025, 12, 1),
            ))
            .unwrap();
        session
            .add_expense(expense(
                "Insurance",
                BillingInterval::SemiAnnual,
                240.0,
                date(2025, 2, 1),
                date(2026, 2, 1),
            ))
            .unwrap();
    }

    let reopened = SessionStore::open(file_store(&temp)).unwrap();
    assert_eq!(reopened.session().income, Some(3000.0));
    assert_eq!(reopened.session().expenses.len(), 2);
    assert_eq!(reopened.session().expenses[0].name, "Rent");
    assert_eq!(
        reopened.session().expenses[1].interval,
        BillingInterval::SemiAnnual
    );
}

#[test]
fn ids_stay_stable_across_reopen() {
    let temp = TempDir::new().unwrap();

    let id = {
        let mut session = SessionStore::open(file_store(&temp)).unwrap();
        session
            .add_expense(expense(
                "Rent",
                BillingInterval::Monthly,
                850.0,
                date(2025, 1, 1),
                date(2025, 12, 1),
            ))
            .unwrap()
    };

    let reopened = SessionStore::open(file_store(&temp)).unwrap();
    assert_eq!(reopened.session().expenses[0].id, id);
}

#[test]
fn remove_and_replace_are_mirrored_to_the_store() {
    let temp = TempDir::new().unwrap();
    let mut session = SessionStore::open(file_store(&temp)).unwrap();
    let keep = session
        .add_expense(expense(
            "Rent",
            BillingInterval::Monthly,
            850.0,
            date(2025, 1, 1),
            date(2025, 12, 1),
        ))
        .unwrap();
    let drop = session
        .add_expense(expense(
            "Gym",
            BillingInterval::Monthly,
            30.0,
            date(2025, 1, 1),
            date(2025, 12, 1),
        ))
        .unwrap();

    session.remove_expense(drop).unwrap();
    session
        .replace_expense(
            keep,
            expense(
                "Rent",
                BillingInterval::Monthly,
                900.0,
                date(2025, 1, 1),
                date(2026, 12, 1),
            ),
        )
        .unwrap();

    let reopened = SessionStore::open(file_store(&temp)).unwrap();
    assert_eq!(reopened.session().expenses.len(), 1);
    assert_eq!(reopened.session().expenses[0].amount, 900.0);
    assert_eq!(reopened.session().expenses[0].id, keep);
}

#[test]
fn clear_all_wipes_the_backend() {
    let temp = TempDir::new().unwrap();
    let mut session = SessionStore::open(file_store(&temp)).unwrap();
    session.set_income(3000.0).unwrap();
    session
        .add_expense(expense(
            "Rent",
            BillingInterval::Monthly,
            850.0,
            date(2025, 1, 1),
            date(2025, 12, 1),
        ))
        .unwrap();

    session.clear_all().unwrap();

    let reopened = SessionStore::open(file_store(&temp)).unwrap();
    assert_eq!(reopened.session().income, None);
    assert!(reopened.session().expenses.is_empty());
}

#[test]
fn clearing_income_removes_only_that_key() {
    let mut store = MemoryStore::new();
    store.set(EXPENSES_KEY, "[]").unwrap();

    let mut session = SessionStore::open(store).unwrap();
    session.set_income(1500.0).unwrap();
    session.clear_income().unwrap();

    assert_eq!(session.session().income, None);
    assert!(session.session().expenses.is_empty());
}

#[test]
fn unknown_interval_in_a_stored_payload_is_rejected_on_load() {
    // The legacy implementation let unrecognized interval tags fall through
    // to "never recurs"; here they fail the load instead.
    let mut store = MemoryStore::new();
    store
        .set(
            EXPENSES_KEY,
            r#"[{
                "name": "Mystery",
                "kind": "fixed",
                "interval": "weekly",
                "amount": 10.0,
                "first_due": "2025-01-01",
                "last_due": "2025-12-01"
            }]"#,
        )
        .unwrap();

    assert!(SessionStore::open(store).is_err());
}

#[test]
fn legacy_income_payload_parses_as_a_plain_number() {
    let mut store = MemoryStore::new();
    store.set(INCOME_KEY, "2750.5").unwrap();

    let session = SessionStore::open(store).unwrap();
    assert_eq!(session.session().income, Some(2750.5));
}
