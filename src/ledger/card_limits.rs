// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Keeps `CreditCard::limit_used` equal to the sum of EXPENSE rows charged
//! to the card.
//!
//! The counter is maintained incrementally: a create adds, a delete
//! subtracts, an update reverses the old contribution and then applies the
//! new one (possibly on a different card). Callers must have verified
//! ownership of every referenced row first and should run these inside
//! [`LedgerStore::atomically`] together with the row write.
//!
//! [`reconcile_card_limits`] recomputes the sum from the ledger and reports
//! (optionally repairs) any drift.

use rust_decimal::Decimal;
use serde::Serialize;

use super::math::{add, checked_sum};
use crate::error::{LedgerError, Result};
use crate::models::{CreditCard, Transaction, UserId};
use crate::store::LedgerStore;

fn adjust<S: LedgerStore>(store: &mut S, card_id: i64, delta: Decimal) -> Result<CreditCard> {
    let mut card = store.card(card_id)?.ok_or(LedgerError::NotFound {
        entity: "credit card",
        id: card_id,
    })?;
    let before = card.limit_used;
    card.limit_used = add(before, delta)?;
    tracing::debug!(card = card_id, %before, %delta, after = %card.limit_used, "limit_used");
    store.save_card(card)
}

/// Applies `tx`'s contribution, first reversing `previous` when the row is
/// being edited. Returns the card `tx` now charges, if any.
pub fn apply_transaction_effect<S: LedgerStore>(
    store: &mut S,
    tx: &Transaction,
    previous: Option<&Transaction>,
) -> Result<Option<CreditCard>> {
    if let Some(prev) = previous {
        reverse_transaction_effect(store, prev)?;
    }
    match tx.charged_card() {
        Some(card_id) => adjust(store, card_id, tx.amount).map(Some),
        None => Ok(None),
    }
}

/// Removes `tx`'s contribution. Returns the card it was charged to, if any.
pub fn reverse_transaction_effect<S: LedgerStore>(
    store: &mut S,
    tx: &Transaction,
) -> Result<Option<CreditCard>> {
    match tx.charged_card() {
        Some(card_id) => adjust(store, card_id, -tx.amount).map(Some),
        None => Ok(None),
    }
}

/// What `limit_used` should be for a card, given the rows linked to it.
pub fn derived_limit_used(card_transactions: &[Transaction]) -> Result<Decimal> {
    checked_sum(
        card_transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount),
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDrift {
    pub card_id: i64,
    pub name: String,
    pub stored: Decimal,
    pub derived: Decimal,
}

/// Compares every card's stored `limit_used` with the ledger sum. With
/// `repair`, drifted cards are overwritten with the derived value.
pub fn reconcile_card_limits<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    repair: bool,
) -> Result<Vec<CardDrift>> {
    store.atomically(|s| {
        let mut drifts = Vec::new();
        for mut card in s.cards_of(user)? {
            let derived = derived_limit_used(&s.transactions_of_card(card.id)?)?;
            if derived == card.limit_used {
                continue;
            }
            tracing::warn!(card = card.id, stored = %card.limit_used, %derived, "limit_used drift");
            drifts.push(CardDrift {
                card_id: card.id,
                name: card.name.clone(),
                stored: card.limit_used,
                derived,
            });
            if repair {
                card.limit_used = derived;
                s.save_card(card)?;
            }
        }
        Ok(drifts)
    })
}
