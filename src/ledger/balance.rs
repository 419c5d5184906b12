// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::access::require_owned;
use super::math::add;
use crate::error::Result;
use crate::models::{Account, Transaction, UserId};
use crate::store::LedgerStore;

/// Lifetime balance: `initial + Σincome − Σexpense` over the account's rows.
pub fn compute_balance(account: &Account, transactions: &[Transaction]) -> Result<Decimal> {
    transactions
        .iter()
        .try_fold(account.initial_balance, |bal, t| add(bal, t.signed_amount()))
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountBalance {
    #[serde(flatten)]
    pub account: Account,
    pub current_balance: Decimal,
}

pub fn account_balance<S: LedgerStore>(
    store: &S,
    user: UserId,
    account_id: i64,
) -> Result<AccountBalance> {
    let account = require_owned(store.account(account_id)?, account_id, user)?;
    let txs = store.transactions_of_account(account.id)?;
    let current_balance = compute_balance(&account, &txs)?;
    Ok(AccountBalance {
        account,
        current_balance,
    })
}

pub fn accounts_with_balances<S: LedgerStore>(
    store: &S,
    user: UserId,
) -> Result<Vec<AccountBalance>> {
    let mut data = Vec::new();
    for account in store.accounts_of(user)? {
        let txs = store.transactions_of_account(account.id)?;
        let current_balance = compute_balance(&account, &txs)?;
        tracing::debug!(account = account.id, rows = txs.len(), %current_balance, "balance");
        data.push(AccountBalance {
            account,
            current_balance,
        });
    }
    Ok(data)
}
