// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pennywise::LedgerError;
use pennywise::ledger::catalog::{create_account, create_card, create_category};
use pennywise::ledger::{
    TransactionDraft, create_transaction, delete_transaction, reconcile_card_limits,
    update_transaction,
};
use pennywise::models::{Account, Category, CreditCard, Kind, NEW_ID};
use pennywise::store::{LedgerStore, SqliteStore};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

const ALICE: i64 = 1;
const BOB: i64 = 2;

fn setup() -> SqliteStore {
    SqliteStore::open_in_memory().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn card(store: &mut SqliteStore, user: i64, name: &str, limit: Decimal) -> CreditCard {
    create_card(
        store,
        user,
        CreditCard {
            id: NEW_ID,
            user_id: user,
            name: name.into(),
            last_four: Some("4242".into()),
            limit_total: limit,
            limit_used: dec!(999),
            closing_day: 5,
            due_day: 15,
        },
    )
    .unwrap()
}

fn account(store: &mut SqliteStore, user: i64) -> Account {
    create_account(
        store,
        user,
        Account {
            id: NEW_ID,
            user_id: user,
            name: "Checking".into(),
            bank: None,
            r#type: "checking".into(),
            initial_balance: Decimal::ZERO,
        },
    )
    .unwrap()
}

fn on_card(card_id: i64, amount: Decimal, kind: Kind) -> TransactionDraft {
    let mut d = TransactionDraft::new(date("2025-03-10"), amount, kind);
    d.card_id = Some(card_id);
    d
}

fn used(store: &SqliteStore, card_id: i64) -> Decimal {
    store.card(card_id).unwrap().unwrap().limit_used
}

#[test]
fn new_card_starts_unused() {
    let mut store = setup();
    let c = card(&mut store, ALICE, "Visa", dec!(5000));
    assert_eq!(c.limit_used, Decimal::ZERO);
    assert_eq!(c.available(), dec!(5000));
}

#[test]
fn expenses_accumulate_and_delete_reverses() {
    let mut store = setup();
    let c = card(&mut store, ALICE, "Visa", dec!(5000));
    create_transaction(&mut store, ALICE, on_card(c.id, dec!(49.90), Kind::Expense)).unwrap();
    let big =
        create_transaction(&mut store, ALICE, on_card(c.id, dec!(320.50), Kind::Expense)).unwrap();
    create_transaction(&mut store, ALICE, on_card(c.id, dec!(45.20), Kind::Expense)).unwrap();
    assert_eq!(used(&store, c.id), dec!(415.60));

    let after = delete_transaction(&mut store, ALICE, big.id).unwrap().unwrap();
    assert_eq!(after.limit_used, dec!(95.10));
    assert_eq!(used(&store, c.id), dec!(95.10));
}

#[test]
fn income_on_card_does_not_touch_limit() {
    let mut store = setup();
    let c = card(&mut store, ALICE, "Visa", dec!(1000));
    let refund =
        create_transaction(&mut store, ALICE, on_card(c.id, dec!(30), Kind::Income)).unwrap();
    assert_eq!(used(&store, c.id), Decimal::ZERO);
    assert_eq!(delete_transaction(&mut store, ALICE, refund.id).unwrap(), None);
    assert_eq!(used(&store, c.id), Decimal::ZERO);
}

#[test]
fn update_moves_charge_between_cards() {
    let mut store = setup();
    let a = card(&mut store, ALICE, "A", dec!(1000));
    let b = card(&mut store, ALICE, "B", dec!(1000));
    let tx = create_transaction(&mut store, ALICE, on_card(a.id, dec!(100), Kind::Expense)).unwrap();

    update_transaction(&mut store, ALICE, tx.id, on_card(b.id, dec!(80), Kind::Expense)).unwrap();
    assert_eq!(used(&store, a.id), Decimal::ZERO);
    assert_eq!(used(&store, b.id), dec!(80));

    // expense -> income releases the charge
    update_transaction(&mut store, ALICE, tx.id, on_card(b.id, dec!(80), Kind::Income)).unwrap();
    assert_eq!(used(&store, b.id), Decimal::ZERO);
}

#[test]
fn update_to_account_releases_card() {
    let mut store = setup();
    let c = card(&mut store, ALICE, "Visa", dec!(1000));
    let acct = account(&mut store, ALICE);
    let tx = create_transaction(&mut store, ALICE, on_card(c.id, dec!(60), Kind::Expense)).unwrap();

    let mut draft = TransactionDraft::new(date("2025-03-10"), dec!(60), Kind::Expense);
    draft.account_id = Some(acct.id);
    let moved = update_transaction(&mut store, ALICE, tx.id, draft).unwrap();
    assert_eq!(moved.account_id(), Some(acct.id));
    assert_eq!(moved.card_id(), None);
    assert_eq!(used(&store, c.id), Decimal::ZERO);
}

#[test]
fn foreign_card_is_rejected_without_side_effects() {
    let mut store = setup();
    let bobs = card(&mut store, BOB, "Bob's", dec!(1000));
    let err = create_transaction(&mut store, ALICE, on_card(bobs.id, dec!(10), Kind::Expense))
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::OwnershipViolation {
            entity: "credit card",
            id: bobs.id
        }
    );
    assert_eq!(used(&store, bobs.id), Decimal::ZERO);
    assert!(store.transactions_of_user(ALICE).unwrap().is_empty());
}

#[test]
fn foreign_transaction_cannot_be_deleted() {
    let mut store = setup();
    let c = card(&mut store, ALICE, "Visa", dec!(1000));
    let tx = create_transaction(&mut store, ALICE, on_card(c.id, dec!(10), Kind::Expense)).unwrap();
    let err = delete_transaction(&mut store, BOB, tx.id).unwrap_err();
    assert!(matches!(err, LedgerError::OwnershipViolation { .. }));
    assert_eq!(used(&store, c.id), dec!(10));
    assert!(store.transaction(tx.id).unwrap().is_some());
}

#[test]
fn missing_card_is_not_found() {
    let mut store = setup();
    let err =
        create_transaction(&mut store, ALICE, on_card(77, dec!(10), Kind::Expense)).unwrap_err();
    assert_eq!(
        err,
        LedgerError::NotFound {
            entity: "credit card",
            id: 77
        }
    );
}

#[test]
fn negative_amount_is_rejected() {
    let mut store = setup();
    let c = card(&mut store, ALICE, "Visa", dec!(1000));
    let err =
        create_transaction(&mut store, ALICE, on_card(c.id, dec!(-5), Kind::Expense)).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));
    assert_eq!(used(&store, c.id), Decimal::ZERO);
}

#[test]
fn reconcile_reports_and_repairs_drift() {
    let mut store = setup();
    let c = card(&mut store, ALICE, "Visa", dec!(1000));
    create_transaction(&mut store, ALICE, on_card(c.id, dec!(40), Kind::Expense)).unwrap();

    let mut broken = store.card(c.id).unwrap().unwrap();
    broken.limit_used = dec!(7);
    store.save_card(broken).unwrap();

    let drift = reconcile_card_limits(&mut store, ALICE, false).unwrap();
    assert_eq!(drift.len(), 1);
    assert_eq!(drift[0].stored, dec!(7));
    assert_eq!(drift[0].derived, dec!(40));
    assert_eq!(used(&store, c.id), dec!(7));

    reconcile_card_limits(&mut store, ALICE, true).unwrap();
    assert_eq!(used(&store, c.id), dec!(40));
    assert!(reconcile_card_limits(&mut store, ALICE, false).unwrap().is_empty());
}

#[test]
fn update_onto_foreign_card_leaves_everything_in_place() {
    let mut store = setup();
    let mine = card(&mut store, ALICE, "Alice's", dec!(1000));
    let bobs = card(&mut store, BOB, "Bob's", dec!(1000));
    let tx =
        create_transaction(&mut store, ALICE, on_card(mine.id, dec!(75), Kind::Expense)).unwrap();

    let err = update_transaction(&mut store, ALICE, tx.id, on_card(bobs.id, dec!(75), Kind::Expense))
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::OwnershipViolation {
            entity: "credit card",
            id: bobs.id
        }
    );
    assert_eq!(used(&store, mine.id), dec!(75));
    assert_eq!(used(&store, bobs.id), Decimal::ZERO);
    assert_eq!(store.transaction(tx.id).unwrap().unwrap(), tx);
}

#[test]
fn update_onto_foreign_category_leaves_everything_in_place() {
    let mut store = setup();
    let mine = card(&mut store, ALICE, "Alice's", dec!(1000));
    let bobs_food = create_category(
        &mut store,
        BOB,
        Category {
            id: NEW_ID,
            user_id: BOB,
            name: "Food".into(),
            kind: Kind::Expense,
        },
    )
    .unwrap();
    let tx =
        create_transaction(&mut store, ALICE, on_card(mine.id, dec!(75), Kind::Expense)).unwrap();

    let mut draft = on_card(mine.id, dec!(20), Kind::Expense);
    draft.category_id = Some(bobs_food.id);
    let err = update_transaction(&mut store, ALICE, tx.id, draft).unwrap_err();
    assert_eq!(
        err,
        LedgerError::OwnershipViolation {
            entity: "category",
            id: bobs_food.id
        }
    );
    assert_eq!(used(&store, mine.id), dec!(75));
    assert_eq!(store.transaction(tx.id).unwrap().unwrap(), tx);
}

#[test]
fn overflowing_charge_rolls_back() {
    let mut store = setup();
    let c = card(&mut store, ALICE, "Visa", Decimal::MAX);
    create_transaction(&mut store, ALICE, on_card(c.id, Decimal::MAX, Kind::Expense)).unwrap();

    let err = create_transaction(&mut store, ALICE, on_card(c.id, Decimal::MAX, Kind::Expense))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));
    assert_eq!(used(&store, c.id), Decimal::MAX);
    assert_eq!(store.transactions_of_card(c.id).unwrap().len(), 1);
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Card(usize),
    Account,
    Unlinked,
}

#[derive(Debug, Clone)]
enum Op {
    Create { to: Target, cents: i64, expense: bool },
    Update { pick: usize, to: Target, cents: i64, expense: bool },
    Delete { pick: usize },
}

fn target() -> impl Strategy<Value = Target> {
    prop_oneof![
        3 => (0..2usize).prop_map(Target::Card),
        1 => Just(Target::Account),
        1 => Just(Target::Unlinked),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (target(), 0..50_000i64, any::<bool>())
            .prop_map(|(to, cents, expense)| Op::Create { to, cents, expense }),
        (any::<usize>(), target(), 0..50_000i64, any::<bool>()).prop_map(
            |(pick, to, cents, expense)| Op::Update {
                pick,
                to,
                cents,
                expense
            }
        ),
        any::<usize>().prop_map(|pick| Op::Delete { pick }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn stored_limit_matches_model_after_any_sequence(ops in prop::collection::vec(op(), 1..25)) {
        let mut store = setup();
        let cards = [
            card(&mut store, ALICE, "A", dec!(10000)),
            card(&mut store, ALICE, "B", dec!(10000)),
        ];
        let checking = account(&mut store, ALICE);
        // tx id -> (card index, amount, kind)
        let mut model: HashMap<i64, (Option<usize>, Decimal, Kind)> = HashMap::new();
        let mut live: Vec<i64> = Vec::new();

        let draft = |to: Target, cents: i64, expense: bool| {
            let kind = if expense { Kind::Expense } else { Kind::Income };
            let mut d = TransactionDraft::new(date("2025-03-10"), Decimal::new(cents, 2), kind);
            let card = match to {
                Target::Card(i) => {
                    d.card_id = Some(cards[i].id);
                    Some(i)
                }
                Target::Account => {
                    d.account_id = Some(checking.id);
                    None
                }
                Target::Unlinked => None,
            };
            (d, (card, Decimal::new(cents, 2), kind))
        };

        for op in ops {
            match op {
                Op::Create { to, cents, expense } => {
                    let (d, entry) = draft(to, cents, expense);
                    let id = create_transaction(&mut store, ALICE, d).unwrap().id;
                    live.push(id);
                    model.insert(id, entry);
                }
                Op::Update { pick, to, cents, expense } if !live.is_empty() => {
                    let id = live[pick % live.len()];
                    let (d, entry) = draft(to, cents, expense);
                    update_transaction(&mut store, ALICE, id, d).unwrap();
                    model.insert(id, entry);
                }
                Op::Delete { pick } if !live.is_empty() => {
                    let id = live.remove(pick % live.len());
                    delete_transaction(&mut store, ALICE, id).unwrap();
                    model.remove(&id);
                }
                _ => {}
            }
        }

        for (i, c) in cards.iter().enumerate() {
            let expected: Decimal = model
                .values()
                .filter(|(card, _, kind)| *card == Some(i) && *kind == Kind::Expense)
                .map(|(_, amount, _)| *amount)
                .sum();
            prop_assert_eq!(used(&store, c.id), expected);
        }
    }
}
