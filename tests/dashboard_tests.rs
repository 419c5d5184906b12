// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use chrono::NaiveDate;
use pennywise::LedgerError;
use pennywise::config::EngineConfig;
use pennywise::ledger::catalog::{create_category, create_recurring};
use pennywise::ledger::dashboard::{top_categories, upcoming_recurring};
use pennywise::ledger::{TransactionDraft, create_transaction, dashboard_snapshot};
use pennywise::models::{
    Category, Frequency, Kind, NEW_ID, RecurringTransaction, Transaction,
};
use pennywise::store::SqliteStore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const USER: i64 = 1;

fn setup() -> SqliteStore {
    SqliteStore::open_in_memory().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn book(store: &mut SqliteStore, day: &str, amount: Decimal, kind: Kind, category: Option<i64>) {
    let mut d = TransactionDraft::new(date(day), amount, kind);
    d.description = format!("{} {}", kind, day);
    d.category_id = category;
    create_transaction(store, USER, d).unwrap();
}

fn template(due_day: u32, description: &str) -> RecurringTransaction {
    RecurringTransaction {
        id: NEW_ID,
        user_id: USER,
        description: description.into(),
        amount: dec!(10),
        kind: Kind::Expense,
        category_id: None,
        due_day,
        frequency: Frequency::Monthly,
    }
}

#[test]
fn snapshot_totals_and_pace() {
    let mut store = setup();
    let food = create_category(
        &mut store,
        USER,
        Category {
            id: NEW_ID,
            user_id: USER,
            name: "Food".into(),
            kind: Kind::Expense,
        },
    )
    .unwrap()
    .id;
    book(&mut store, "2025-02-03", dec!(200), Kind::Expense, Some(food));
    book(&mut store, "2025-02-25", dec!(50), Kind::Expense, None);
    book(&mut store, "2025-03-01", dec!(3000), Kind::Income, None);
    book(&mut store, "2025-03-14", dec!(100), Kind::Expense, Some(food));
    book(&mut store, "2025-03-20", dec!(200), Kind::Expense, None);

    let today = date("2025-03-20");
    let d = dashboard_snapshot(&store, USER, today, &EngineConfig::default()).unwrap();

    assert_eq!(d.daily_expenses.len(), 30);
    assert_eq!(d.daily_expenses[0].label, "19/02");
    assert_eq!(d.daily_expenses[29].label, "20/03");
    assert_eq!(d.daily_expenses[29].value, dec!(200));
    let pace_total: Decimal = d.daily_expenses.iter().map(|p| p.value).sum();
    assert_eq!(pace_total, dec!(350));

    assert_eq!(d.total_spent_current, dec!(300));
    assert_eq!(d.total_spent_previous, dec!(250));
    assert_eq!(d.spending_change, dec!(20));
    assert_eq!(d.income_current, dec!(3000));
    assert_eq!(d.monthly_result, dec!(2700));

    let top: Vec<(&str, Decimal)> = d
        .top_categories
        .iter()
        .map(|c| (c.category.as_str(), c.total))
        .collect();
    assert_eq!(top, vec![("Food", dec!(200)), ("Uncategorized", dec!(50))]);

    let recent: Vec<NaiveDate> = d.recent_transactions.iter().map(|t| t.date).collect();
    assert_eq!(recent, vec![date("2025-03-20"), date("2025-03-14")]);
}

#[test]
fn spending_change_from_nothing() {
    let mut store = setup();
    book(&mut store, "2025-03-02", dec!(80), Kind::Expense, None);
    let d = dashboard_snapshot(&store, USER, date("2025-03-20"), &EngineConfig::default()).unwrap();
    assert_eq!(d.total_spent_previous, Decimal::ZERO);
    assert_eq!(d.spending_change, dec!(100));

    let empty = setup();
    let d = dashboard_snapshot(&empty, USER, date("2025-03-20"), &EngineConfig::default()).unwrap();
    assert_eq!(d.spending_change, Decimal::ZERO);
    assert!(d.daily_expenses.iter().all(|p| p.value.is_zero()));
    assert!(d.top_categories.is_empty());
}

#[test]
fn recent_is_capped() {
    let mut store = setup();
    for day in 14..=20 {
        book(&mut store, &format!("2025-03-{}", day), dec!(1), Kind::Expense, None);
    }
    let d = dashboard_snapshot(&store, USER, date("2025-03-20"), &EngineConfig::default()).unwrap();
    assert_eq!(d.recent_transactions.len(), 5);
    assert_eq!(d.recent_transactions[0].date, date("2025-03-20"));
    assert_eq!(d.recent_transactions[4].date, date("2025-03-16"));
}

#[test]
fn config_changes_windows() {
    let mut store = setup();
    book(&mut store, "2025-03-20", dec!(5), Kind::Expense, None);
    let cfg = EngineConfig {
        spending_pace_days: 7,
        top_categories_limit: 1,
        ..EngineConfig::default()
    };
    let d = dashboard_snapshot(&store, USER, date("2025-03-20"), &cfg).unwrap();
    assert_eq!(d.daily_expenses.len(), 7);
    assert_eq!(d.daily_expenses[0].label, "14/03");
}

#[test]
fn top_categories_treat_negative_amounts_as_spending() {
    let names: HashMap<i64, String> = [(1, "Food".to_string()), (2, "Fun".to_string())].into();
    let row = |id, category_id, amount, kind| Transaction {
        id,
        user_id: USER,
        date: date("2025-02-10"),
        amount,
        kind,
        description: String::new(),
        link: None,
        category_id,
        external_id: None,
    };
    let txs = vec![
        row(1, Some(1), dec!(30), Kind::Expense),
        row(2, Some(2), dec!(-45), Kind::Income),
        row(3, Some(1), dec!(20), Kind::Expense),
        row(4, Some(2), dec!(500), Kind::Income),
    ];
    let top = top_categories(&txs, &names, "Uncategorized", 5).unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!((top[0].category.as_str(), top[0].total), ("Food", dec!(50)));
    assert_eq!((top[1].category.as_str(), top[1].total), ("Fun", dec!(45)));
    assert_eq!(top_categories(&txs, &names, "Uncategorized", 1).unwrap().len(), 1);
}

#[test]
fn upcoming_within_window() {
    let items = vec![
        template(4, "gym"),
        template(19, "phone"),
        template(5, "rent"),
        template(20, "water"),
        template(10, "internet"),
    ];
    let due = upcoming_recurring(items, date("2025-03-05"), 14).unwrap();
    let names: Vec<&str> = due.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(names, vec!["rent", "internet", "phone"]);
}

#[test]
fn upcoming_compares_day_numbers_only() {
    // 25 March + 14 days lands on 8 April, so the bound wraps to 8 and the
    // window is empty.
    let items = vec![template(28, "late"), template(2, "early")];
    assert!(upcoming_recurring(items, date("2025-03-25"), 14).unwrap().is_empty());
}

#[test]
fn snapshot_lists_upcoming_templates() {
    let mut store = setup();
    create_recurring(&mut store, USER, template(12, "insurance")).unwrap();
    create_recurring(&mut store, USER, template(28, "streaming")).unwrap();
    let d = dashboard_snapshot(&store, USER, date("2025-03-10"), &EngineConfig::default()).unwrap();
    assert_eq!(d.upcoming.len(), 1);
    assert_eq!(d.upcoming[0].description, "insurance");
}

#[test]
fn oversized_windows_fail_instead_of_panicking() {
    let store = setup();
    let today = date("2025-03-20");
    let cfg = EngineConfig {
        upcoming_window_days: u32::MAX,
        ..EngineConfig::default()
    };
    assert!(matches!(
        dashboard_snapshot(&store, USER, today, &cfg),
        Err(LedgerError::InvalidRange(_))
    ));
    let cfg = EngineConfig {
        recent_window_days: u32::MAX,
        ..EngineConfig::default()
    };
    assert!(matches!(
        dashboard_snapshot(&store, USER, today, &cfg),
        Err(LedgerError::InvalidRange(_))
    ));
    assert!(matches!(
        upcoming_recurring(Vec::new(), today, u32::MAX),
        Err(LedgerError::InvalidRange(_))
    ));
}
