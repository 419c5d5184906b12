// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::access::require_owned;
use super::math::clamp_day;
use super::transactions::{TransactionDraft, create_transaction};
use crate::error::Result;
use crate::models::{Transaction, UserId};
use crate::store::LedgerStore;

/// Books a real transaction from a recurring template for `month`/`year`.
///
/// The due day is clamped to the month's length. The new row has no account
/// or card link; it goes through [`create_transaction`] like any other.
pub fn materialize_recurring<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    recurring_id: i64,
    month: u32,
    year: i32,
) -> Result<Transaction> {
    let item = require_owned(store.recurring(recurring_id)?, recurring_id, user)?;
    let date = clamp_day(item.due_day, month, year)?;
    let mut draft = TransactionDraft::new(date, item.amount, item.kind);
    draft.description = item.description;
    draft.category_id = item.category_id;
    create_transaction(store, user, draft)
}
