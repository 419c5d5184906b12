// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::math::{add, month_of, percent_change, previous_month_of, sub, totals};
use super::net_worth::{NetWorth, net_worth_with_monthly};
use super::reports::{category_label, category_names};
use crate::config::EngineConfig;
use crate::error::{LedgerError, Result};
use crate::models::{Kind, RecurringTransaction, Transaction, UserId};
use crate::store::{LedgerStore, TransactionFilter};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCategory {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub daily_expenses: Vec<ChartPoint>,
    pub total_spent_current: Decimal,
    pub total_spent_previous: Decimal,
    pub spending_change: Decimal,
    pub income_current: Decimal,
    pub monthly_result: Decimal,
    pub net_worth: NetWorth,
    pub top_categories: Vec<TopCategory>,
    pub recent_transactions: Vec<Transaction>,
    pub upcoming: Vec<RecurringTransaction>,
}

/// `date` moved by `days`, or `InvalidRange` when that leaves the calendar.
fn shift(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    Duration::try_days(days)
        .and_then(|d| date.checked_add_signed(d))
        .ok_or_else(|| {
            LedgerError::InvalidRange(format!("{} shifted by {} days is out of range", date, days))
        })
}

pub fn dashboard_snapshot<S: LedgerStore>(
    store: &S,
    user: UserId,
    today: NaiveDate,
    cfg: &EngineConfig,
) -> Result<Dashboard> {
    let all = TransactionFilter::default();

    let pace_start = shift(today, -(i64::from(cfg.spending_pace_days.max(1)) - 1))?;
    let pace_rows =
        store.transactions_in_range(user, pace_start, today, &TransactionFilter::kind(Kind::Expense))?;
    let daily_expenses = spending_pace(&pace_rows, pace_start, today)?;

    let (cur_start, cur_end) = month_of(today)?;
    let (prev_start, prev_end) = previous_month_of(today)?;
    let current = store.transactions_in_range(user, cur_start, cur_end, &all)?;
    let previous = store.transactions_in_range(user, prev_start, prev_end, &all)?;
    let (income_current, total_spent_current) = totals(&current)?;
    let (_, total_spent_previous) = totals(&previous)?;
    let spending_change = percent_change(total_spent_current, total_spent_previous);
    let monthly_result = sub(income_current, total_spent_current)?;

    let net_worth = net_worth_with_monthly(store, user, monthly_result)?;

    let names = category_names(store, user)?;
    let top_categories = top_categories(
        &previous,
        &names,
        &cfg.uncategorized_label,
        cfg.top_categories_limit,
    )?;

    let since = shift(today, -i64::from(cfg.recent_window_days))?;
    let mut recent_transactions = store.recent_transactions(user, since)?;
    recent_transactions.truncate(cfg.recent_limit);

    let upcoming = upcoming_recurring(store.recurring_of(user)?, today, cfg.upcoming_window_days)?;

    tracing::debug!(
        user,
        %today,
        spent = %total_spent_current,
        previous = %total_spent_previous,
        upcoming = upcoming.len(),
        "dashboard"
    );
    Ok(Dashboard {
        daily_expenses,
        total_spent_current,
        total_spent_previous,
        spending_change,
        income_current,
        monthly_result,
        net_worth,
        top_categories,
        recent_transactions,
        upcoming,
    })
}

/// Daily EXPENSE totals from `start` through `end`, labelled `dd/mm`.
pub fn spending_pace(
    txs: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<ChartPoint>> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for t in txs.iter().filter(|t| t.is_expense()) {
        let day = by_day.entry(t.date).or_insert(Decimal::ZERO);
        *day = add(*day, t.amount)?;
    }
    Ok(start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|d| ChartPoint {
            label: d.format("%d/%m").to_string(),
            value: by_day.get(&d).copied().unwrap_or(Decimal::ZERO),
        })
        .collect())
}

/// Largest spending categories across `txs`. A row counts as spending when
/// it is typed EXPENSE or carries a negative amount; magnitudes are summed.
pub fn top_categories(
    txs: &[Transaction],
    names: &HashMap<i64, String>,
    uncategorized_label: &str,
    limit: usize,
) -> Result<Vec<TopCategory>> {
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    for t in txs
        .iter()
        .filter(|t| t.is_expense() || t.amount < Decimal::ZERO)
    {
        let total = agg
            .entry(category_label(t, names, uncategorized_label))
            .or_insert(Decimal::ZERO);
        *total = add(*total, t.amount.abs())?;
    }
    let mut items: Vec<TopCategory> = agg
        .into_iter()
        .map(|(name, total)| TopCategory {
            category: name.to_string(),
            total,
        })
        .collect();
    items.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    items.truncate(limit);
    Ok(items)
}

/// Templates due between today's day-of-month and the day-of-month
/// `window_days` ahead, by due day.
///
/// Only day numbers are compared. When the window crosses into the next
/// month the upper bound wraps to a small number and early-month items are
/// not reported.
pub fn upcoming_recurring(
    items: Vec<RecurringTransaction>,
    today: NaiveDate,
    window_days: u32,
) -> Result<Vec<RecurringTransaction>> {
    let from = today.day();
    let to = shift(today, i64::from(window_days))?.day();
    let mut due: Vec<RecurringTransaction> = items
        .into_iter()
        .filter(|r| r.due_day >= from && r.due_day <= to)
        .collect();
    due.sort_by_key(|r| r.due_day);
    Ok(due)
}
