// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Net worth = account balances + asset values.
//!
//! The month-over-month change compares against a start-of-month figure
//! obtained by backing the current month's net income out of today's total.
//! It is an estimate, not a stored snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::balance::compute_balance;
use super::math::{add, checked_sum, month_of, percent_change, sub, totals};
use crate::error::Result;
use crate::models::UserId;
use crate::store::{LedgerStore, TransactionFilter};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetWorth {
    pub accounts_total: Decimal,
    pub assets_total: Decimal,
    pub net_worth: Decimal,
    pub start_of_month: Decimal,
    pub percentage_change: Decimal,
}

impl NetWorth {
    pub fn from_parts(
        accounts_total: Decimal,
        assets_total: Decimal,
        monthly_net: Decimal,
    ) -> Result<Self> {
        let net_worth = add(accounts_total, assets_total)?;
        let start_of_month = sub(net_worth, monthly_net)?;
        Ok(Self {
            accounts_total,
            assets_total,
            net_worth,
            start_of_month,
            percentage_change: percent_change(net_worth, start_of_month),
        })
    }
}

pub fn net_worth<S: LedgerStore>(store: &S, user: UserId, today: NaiveDate) -> Result<NetWorth> {
    let (start, end) = month_of(today)?;
    let month = store.transactions_in_range(user, start, end, &TransactionFilter::default())?;
    let (income, expense) = totals(&month)?;
    net_worth_with_monthly(store, user, sub(income, expense)?)
}

/// Same as [`net_worth`] with the current month's net income supplied by a
/// caller that already has it.
pub fn net_worth_with_monthly<S: LedgerStore>(
    store: &S,
    user: UserId,
    monthly_net: Decimal,
) -> Result<NetWorth> {
    let mut accounts_total = Decimal::ZERO;
    for account in store.accounts_of(user)? {
        let txs = store.transactions_of_account(account.id)?;
        accounts_total = add(accounts_total, compute_balance(&account, &txs)?)?;
    }
    let assets_total = checked_sum(store.assets_of(user)?.iter().filter_map(|a| a.value))?;
    let nw = NetWorth::from_parts(accounts_total, assets_total, monthly_net)?;
    tracing::debug!(user, net_worth = %nw.net_worth, change = %nw.percentage_change, "net worth");
    Ok(nw)
}
