// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::math::{add, checked_sum, month_bounds, percent_of};
use crate::error::{LedgerError, Result};
use crate::models::{Kind, Transaction, UserId};
use crate::store::{LedgerStore, TransactionFilter};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowDay {
    pub date: NaiveDate,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_balance: Decimal,
}

/// One entry per calendar day in `[start, end]`, zero-filled.
pub fn cash_flow<S: LedgerStore>(
    store: &S,
    user: UserId,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<CashFlowDay>> {
    if end < start {
        return Err(LedgerError::InvalidRange(format!(
            "end {} is before start {}",
            end, start
        )));
    }
    let txs = store.transactions_in_range(user, start, end, &TransactionFilter::default())?;
    bucket_by_day(&txs, start, end)
}

pub fn bucket_by_day(
    txs: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<CashFlowDay>> {
    let mut map: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for t in txs.iter().filter(|t| t.date >= start && t.date <= end) {
        let entry = map.entry(t.date).or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.kind {
            Kind::Income => entry.0 = add(entry.0, t.amount)?,
            Kind::Expense => entry.1 = add(entry.1, t.amount)?,
        }
    }
    // both totals are non-negative
    Ok(start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| {
            let (inc, exp) = map.get(&date).copied().unwrap_or_default();
            CashFlowDay {
                date,
                total_income: inc,
                total_expense: exp,
                net_balance: inc - exp,
            }
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Decimal,
    pub percentage: Decimal,
}

/// EXPENSE totals per category name for `month`/`year`, largest first.
/// Empty when nothing was spent.
pub fn category_breakdown<S: LedgerStore>(
    store: &S,
    user: UserId,
    month: u32,
    year: i32,
    uncategorized_label: &str,
) -> Result<Vec<CategoryShare>> {
    let (start, end) = month_bounds(month, year)?;
    let expenses =
        store.transactions_in_range(user, start, end, &TransactionFilter::kind(Kind::Expense))?;
    let names = category_names(store, user)?;
    breakdown(&expenses, &names, uncategorized_label)
}

pub fn category_names<S: LedgerStore>(store: &S, user: UserId) -> Result<HashMap<i64, String>> {
    Ok(store
        .categories_of(user)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}

pub(crate) fn category_label<'a>(
    tx: &Transaction,
    names: &'a HashMap<i64, String>,
    uncategorized_label: &'a str,
) -> &'a str {
    tx.category_id
        .and_then(|id| names.get(&id))
        .map(String::as_str)
        .unwrap_or(uncategorized_label)
}

pub fn breakdown(
    expenses: &[Transaction],
    names: &HashMap<i64, String>,
    uncategorized_label: &str,
) -> Result<Vec<CategoryShare>> {
    let expenses: Vec<&Transaction> = expenses.iter().filter(|t| t.is_expense()).collect();
    let total = checked_sum(expenses.iter().map(|t| t.amount))?;
    if total.is_zero() {
        return Ok(Vec::new());
    }
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    for t in &expenses {
        let sum = agg
            .entry(category_label(t, names, uncategorized_label))
            .or_insert(Decimal::ZERO);
        *sum = add(*sum, t.amount)?;
    }
    let mut items: Vec<CategoryShare> = agg
        .into_iter()
        .map(|(name, amount)| CategoryShare {
            category: name.to_string(),
            total: amount,
            percentage: percent_of(amount, total),
        })
        .collect();
    items.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    Ok(items)
}
