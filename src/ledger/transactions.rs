// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::access::{require_owned, require_owned_opt};
use super::card_limits::{apply_transaction_effect, reverse_transaction_effect};
use super::math::month_bounds;
use crate::error::{LedgerError, Result};
use crate::models::{CreditCard, Kind, Link, NEW_ID, Transaction, UserId};
use crate::store::{LedgerStore, TransactionFilter};

/// Caller-supplied state of a transaction, before links are verified.
///
/// When both `card_id` and `account_id` are set the card wins and the
/// account is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub kind: Kind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub account_id: Option<i64>,
    #[serde(default)]
    pub card_id: Option<i64>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub external_id: Option<String>,
}

impl TransactionDraft {
    pub fn new(date: NaiveDate, amount: Decimal, kind: Kind) -> Self {
        Self {
            date,
            amount,
            kind,
            description: String::new(),
            account_id: None,
            card_id: None,
            category_id: None,
            external_id: None,
        }
    }
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(format!(
            "{} is negative; the direction comes from the kind",
            amount
        )));
    }
    Ok(())
}

/// Verifies every entity the draft points at and returns the link and
/// category to store.
fn resolve_links<S: LedgerStore>(
    store: &S,
    user: UserId,
    draft: &TransactionDraft,
) -> Result<(Option<Link>, Option<i64>)> {
    let link = if let Some(card_id) = draft.card_id {
        require_owned(store.card(card_id)?, card_id, user)?;
        Some(Link::Card(card_id))
    } else if let Some(account_id) = draft.account_id {
        require_owned(store.account(account_id)?, account_id, user)?;
        Some(Link::Account(account_id))
    } else {
        None
    };
    let category = require_owned_opt(draft.category_id, user, |id| store.category(id))?;
    Ok((link, category.map(|c| c.id)))
}

pub fn create_transaction<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    draft: TransactionDraft,
) -> Result<Transaction> {
    validate_amount(draft.amount)?;
    let (link, category_id) = resolve_links(store, user, &draft)?;
    if let Some(ext) = draft.external_id.as_deref() {
        if store.transaction_by_external_id(user, ext)?.is_some() {
            return Err(LedgerError::Duplicate(ext.to_string()));
        }
    }

    let tx = Transaction {
        id: NEW_ID,
        user_id: user,
        date: draft.date,
        amount: draft.amount,
        kind: draft.kind,
        description: draft.description,
        link,
        category_id,
        external_id: draft.external_id,
    };
    let saved = store.atomically(|s| {
        apply_transaction_effect(s, &tx, None)?;
        s.save_transaction(tx.clone())
    })?;
    tracing::info!(id = saved.id, user, kind = %saved.kind, amount = %saved.amount, "transaction created");
    Ok(saved)
}

/// Replaces the transaction's state with `draft`. The card contribution of
/// the old state is reversed before the new one is applied. The stored
/// external id is kept as is.
pub fn update_transaction<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    id: i64,
    draft: TransactionDraft,
) -> Result<Transaction> {
    validate_amount(draft.amount)?;
    let existing = require_owned(store.transaction(id)?, id, user)?;
    let (link, category_id) = resolve_links(store, user, &draft)?;

    let updated = Transaction {
        id,
        user_id: user,
        date: draft.date,
        amount: draft.amount,
        kind: draft.kind,
        description: draft.description,
        link,
        category_id,
        external_id: existing.external_id.clone(),
    };
    let saved = store.atomically(|s| {
        apply_transaction_effect(s, &updated, Some(&existing))?;
        s.save_transaction(updated.clone())
    })?;
    tracing::info!(id, user, "transaction updated");
    Ok(saved)
}

/// Deletes the row and returns the card it was charged to, if any.
pub fn delete_transaction<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    id: i64,
) -> Result<Option<CreditCard>> {
    let existing = require_owned(store.transaction(id)?, id, user)?;
    let card = store.atomically(|s| {
        let card = reverse_transaction_effect(s, &existing)?;
        s.delete_transaction(id)?;
        Ok(card)
    })?;
    tracing::info!(id, user, "transaction deleted");
    Ok(card)
}

/// The month's rows, newest first, optionally narrowed to one category.
pub fn list_transactions<S: LedgerStore>(
    store: &S,
    user: UserId,
    month: u32,
    year: i32,
    category_id: Option<i64>,
) -> Result<Vec<Transaction>> {
    let (start, end) = month_bounds(month, year)?;
    let filter = TransactionFilter {
        category_id,
        kind: None,
    };
    let mut rows = store.transactions_in_range(user, start, end, &filter)?;
    rows.reverse();
    Ok(rows)
}
