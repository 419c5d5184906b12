// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pennywise::LedgerError;
use pennywise::ledger::catalog::{create_investment, delete_investment, update_investment};
use pennywise::ledger::{investment_summary, net_worth};
use pennywise::models::{Investment, NEW_ID};
use pennywise::store::{LedgerStore, SqliteStore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const ALICE: i64 = 1;
const BOB: i64 = 2;

fn setup() -> SqliteStore {
    SqliteStore::open_in_memory().unwrap()
}

fn position(name: &str, invested: Decimal, current: Decimal) -> Investment {
    Investment {
        id: NEW_ID,
        user_id: 0,
        name: name.into(),
        r#type: "stock".into(),
        invested_amount: invested,
        current_value: current,
    }
}

#[test]
fn gain_is_current_minus_invested() {
    let mut store = setup();
    let up = create_investment(&mut store, ALICE, position("ACME", dec!(1000), dec!(1250.40))).unwrap();
    let down =
        create_investment(&mut store, ALICE, position("Bonds", dec!(500), dec!(480))).unwrap();
    assert_eq!(up.user_id, ALICE);
    assert_eq!(up.gain(), dec!(250.40));
    assert_eq!(down.gain(), dec!(-20));

    let summary = investment_summary(&store, ALICE).unwrap();
    assert_eq!(summary.positions.len(), 2);
    assert_eq!(summary.invested, dec!(1500));
    assert_eq!(summary.current, dec!(1730.40));
    assert_eq!(summary.gain, dec!(230.40));
    assert_eq!(summary.gain_percentage, dec!(15.36));
}

#[test]
fn empty_portfolio_has_zero_gain() {
    let store = setup();
    let summary = investment_summary(&store, ALICE).unwrap();
    assert!(summary.positions.is_empty());
    assert_eq!(summary.gain, Decimal::ZERO);
    assert_eq!(summary.gain_percentage, Decimal::ZERO);
}

#[test]
fn revaluation_updates_in_place() {
    let mut store = setup();
    let inv = create_investment(&mut store, ALICE, position("ACME", dec!(1000), dec!(1000))).unwrap();
    let updated =
        update_investment(&mut store, ALICE, inv.id, position("ACME", dec!(1000), dec!(900)))
            .unwrap();
    assert_eq!(updated.id, inv.id);
    assert_eq!(store.investment(inv.id).unwrap().unwrap().current_value, dec!(900));
    assert_eq!(investment_summary(&store, ALICE).unwrap().gain, dec!(-100));
}

#[test]
fn negative_amounts_are_rejected() {
    let mut store = setup();
    let err = create_investment(&mut store, ALICE, position("X", dec!(-1), dec!(0))).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));
    let inv = create_investment(&mut store, ALICE, position("X", dec!(1), dec!(1))).unwrap();
    let err =
        update_investment(&mut store, ALICE, inv.id, position("X", dec!(1), dec!(-3))).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount(_)));
    assert_eq!(store.investment(inv.id).unwrap().unwrap().current_value, dec!(1));
}

#[test]
fn other_users_positions_are_off_limits() {
    let mut store = setup();
    let inv = create_investment(&mut store, ALICE, position("ACME", dec!(10), dec!(12))).unwrap();

    let err = update_investment(&mut store, BOB, inv.id, position("Mine", dec!(0), dec!(0)))
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::OwnershipViolation {
            entity: "investment",
            id: inv.id
        }
    );
    assert!(matches!(
        delete_investment(&mut store, BOB, inv.id),
        Err(LedgerError::OwnershipViolation { .. })
    ));
    assert!(investment_summary(&store, BOB).unwrap().positions.is_empty());
    assert_eq!(store.investment(inv.id).unwrap().unwrap().name, "ACME");

    delete_investment(&mut store, ALICE, inv.id).unwrap();
    assert!(store.investment(inv.id).unwrap().is_none());
    assert_eq!(
        delete_investment(&mut store, ALICE, inv.id).unwrap_err(),
        LedgerError::NotFound {
            entity: "investment",
            id: inv.id
        }
    );
}

#[test]
fn investments_stay_out_of_net_worth() {
    let mut store = setup();
    create_investment(&mut store, ALICE, position("ACME", dec!(1000), dec!(5000))).unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
    assert_eq!(net_worth(&store, ALICE, today).unwrap().net_worth, Decimal::ZERO);
}
