// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pennywise::LedgerError;
use pennywise::config::{EngineConfig, get_setting, set_setting};
use pennywise::ledger::catalog::{
    create_card, create_category, create_recurring, delete_category, delete_recurring,
    update_card, update_category,
};
use pennywise::ledger::{TransactionDraft, create_transaction, materialize_recurring};
use pennywise::models::{Category, CreditCard, Frequency, Kind, NEW_ID, RecurringTransaction};
use pennywise::store::{LedgerStore, SqliteStore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const USER: i64 = 1;

fn setup() -> SqliteStore {
    SqliteStore::open_in_memory().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn category(store: &mut SqliteStore, user: i64, name: &str) -> Category {
    create_category(
        store,
        user,
        Category {
            id: NEW_ID,
            user_id: user,
            name: name.into(),
            kind: Kind::Expense,
        },
    )
    .unwrap()
}

fn rent(due_day: u32, category_id: Option<i64>) -> RecurringTransaction {
    RecurringTransaction {
        id: NEW_ID,
        user_id: USER,
        description: "Rent".into(),
        amount: dec!(1200),
        kind: Kind::Expense,
        category_id,
        due_day,
        frequency: Frequency::Monthly,
    }
}

#[test]
fn category_in_use_cannot_be_deleted() {
    let mut store = setup();
    let food = category(&mut store, USER, "Food");
    let mut d = TransactionDraft::new(date("2025-03-01"), dec!(10), Kind::Expense);
    d.category_id = Some(food.id);
    let tx = create_transaction(&mut store, USER, d).unwrap();

    let err = delete_category(&mut store, USER, food.id).unwrap_err();
    assert!(matches!(err, LedgerError::Conflict(_)));

    pennywise::ledger::delete_transaction(&mut store, USER, tx.id).unwrap();
    delete_category(&mut store, USER, food.id).unwrap();
    assert!(store.category(food.id).unwrap().is_none());
}

#[test]
fn category_update_is_owner_only() {
    let mut store = setup();
    let food = category(&mut store, USER, "Food");
    let renamed = Category {
        name: "Groceries".into(),
        ..food.clone()
    };
    assert!(matches!(
        update_category(&mut store, 2, food.id, renamed.clone()),
        Err(LedgerError::OwnershipViolation { .. })
    ));
    let saved = update_category(&mut store, USER, food.id, renamed).unwrap();
    assert_eq!(saved.name, "Groceries");
}

#[test]
fn foreign_category_on_transaction_is_rejected() {
    let mut store = setup();
    let theirs = category(&mut store, 2, "Theirs");
    let mut d = TransactionDraft::new(date("2025-03-01"), dec!(10), Kind::Expense);
    d.category_id = Some(theirs.id);
    assert_eq!(
        create_transaction(&mut store, USER, d).unwrap_err(),
        LedgerError::OwnershipViolation {
            entity: "category",
            id: theirs.id
        }
    );
}

#[test]
fn card_update_keeps_used_limit() {
    let mut store = setup();
    let card = create_card(
        &mut store,
        USER,
        CreditCard {
            id: NEW_ID,
            user_id: USER,
            name: "Visa".into(),
            last_four: None,
            limit_total: dec!(1000),
            limit_used: Decimal::ZERO,
            closing_day: 1,
            due_day: 10,
        },
    )
    .unwrap();
    let mut d = TransactionDraft::new(date("2025-03-01"), dec!(250), Kind::Expense);
    d.card_id = Some(card.id);
    create_transaction(&mut store, USER, d).unwrap();

    let changes = CreditCard {
        limit_total: dec!(3000),
        limit_used: dec!(1),
        ..card.clone()
    };
    let updated = update_card(&mut store, USER, card.id, changes).unwrap();
    assert_eq!(updated.limit_total, dec!(3000));
    assert_eq!(updated.limit_used, dec!(250));
    assert_eq!(updated.available(), dec!(2750));

    let bad_day = CreditCard {
        due_day: 32,
        ..card
    };
    assert!(matches!(
        update_card(&mut store, USER, updated.id, bad_day),
        Err(LedgerError::InvalidRange(_))
    ));
}

#[test]
fn recurring_books_clamped_date() {
    let mut store = setup();
    let housing = category(&mut store, USER, "Housing");
    let item = create_recurring(&mut store, USER, rent(31, Some(housing.id))).unwrap();

    let april = materialize_recurring(&mut store, USER, item.id, 4, 2025).unwrap();
    assert_eq!(april.date, date("2025-04-30"));
    assert_eq!(april.amount, dec!(1200));
    assert_eq!(april.category_id, Some(housing.id));
    assert_eq!(april.description, "Rent");

    let feb = materialize_recurring(&mut store, USER, item.id, 2, 2024).unwrap();
    assert_eq!(feb.date, date("2024-02-29"));
    let feb = materialize_recurring(&mut store, USER, item.id, 2, 2025).unwrap();
    assert_eq!(feb.date, date("2025-02-28"));

    assert_eq!(store.transactions_of_user(USER).unwrap().len(), 3);
}

#[test]
fn recurring_validation_and_ownership() {
    let mut store = setup();
    assert!(matches!(
        create_recurring(&mut store, USER, rent(0, None)),
        Err(LedgerError::InvalidRange(_))
    ));
    let negative = RecurringTransaction {
        amount: dec!(-1),
        ..rent(1, None)
    };
    assert!(matches!(
        create_recurring(&mut store, USER, negative),
        Err(LedgerError::InvalidAmount(_))
    ));

    let item = create_recurring(&mut store, USER, rent(5, None)).unwrap();
    assert!(matches!(
        materialize_recurring(&mut store, 2, item.id, 3, 2025),
        Err(LedgerError::OwnershipViolation { .. })
    ));
    assert!(delete_recurring(&mut store, 2, item.id).is_err());
    delete_recurring(&mut store, USER, item.id).unwrap();
    assert!(store.recurring_of(USER).unwrap().is_empty());
}

#[test]
fn deleting_category_detaches_templates() {
    let mut store = setup();
    let housing = category(&mut store, USER, "Housing");
    let item = create_recurring(&mut store, USER, rent(1, Some(housing.id))).unwrap();
    delete_category(&mut store, USER, housing.id).unwrap();
    assert_eq!(store.recurring(item.id).unwrap().unwrap().category_id, None);
}

#[test]
fn settings_round_trip_and_validate() {
    let store = setup();
    assert_eq!(EngineConfig::load(store.conn()).unwrap(), EngineConfig::default());

    set_setting(store.conn(), "recent_limit", "8").unwrap();
    set_setting(store.conn(), "uncategorized_label", "Misc").unwrap();
    assert_eq!(
        get_setting(store.conn(), "recent_limit").unwrap().as_deref(),
        Some("8")
    );
    let cfg = EngineConfig::load(store.conn()).unwrap();
    assert_eq!(cfg.recent_limit, 8);
    assert_eq!(cfg.uncategorized_label, "Misc");

    assert!(set_setting(store.conn(), "recent_limit", "many").is_err());
    assert!(set_setting(store.conn(), "spending_pace_days", "0").is_err());
    assert!(set_setting(store.conn(), "colour", "blue").is_err());
    assert_eq!(EngineConfig::load(store.conn()).unwrap().recent_limit, 8);
}

#[test]
fn window_settings_are_bounded() {
    let store = setup();
    let mut cfg = EngineConfig::default();
    assert!(matches!(
        cfg.apply("upcoming_window_days", "4000000000"),
        Err(LedgerError::InvalidRange(_))
    ));
    assert!(matches!(
        set_setting(store.conn(), "recent_window_days", "367"),
        Err(LedgerError::InvalidRange(_))
    ));
    set_setting(store.conn(), "recent_window_days", "366").unwrap();
    set_setting(store.conn(), "upcoming_window_days", "0").unwrap();
    let loaded = EngineConfig::load(store.conn()).unwrap();
    assert_eq!(loaded.recent_window_days, 366);
    assert_eq!(loaded.upcoming_window_days, 0);
    assert_eq!(cfg, EngineConfig::default());
}

#[test]
fn unparseable_input_is_a_parse_error() {
    let store = setup();
    assert!(matches!("transfer".parse::<Kind>(), Err(LedgerError::Parse(_))));
    assert!(matches!(
        "fortnightly".parse::<Frequency>(),
        Err(LedgerError::Parse(_))
    ));
    assert!(matches!(
        set_setting(store.conn(), "recent_limit", "many"),
        Err(LedgerError::Parse(_))
    ));
    assert!(matches!(
        set_setting(store.conn(), "colour", "blue"),
        Err(LedgerError::Parse(_))
    ));
    assert_eq!("Expense".parse::<Kind>().unwrap(), Kind::Expense);
}
