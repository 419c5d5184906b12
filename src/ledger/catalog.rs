// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Maintenance of the non-ledger entities: accounts, cards, categories,
//! assets, investments and recurring templates. Updates and deletes are ownership-checked.

use rust_decimal::Decimal;

use super::access::{require_owned, require_owned_opt};
use crate::error::{LedgerError, Result};
use crate::models::{
    Account, Asset, Category, CreditCard, Investment, NEW_ID, RecurringTransaction, UserId,
};
use crate::store::LedgerStore;

fn check_day(what: &str, day: u32) -> Result<()> {
    if !(1..=31).contains(&day) {
        return Err(LedgerError::InvalidRange(format!(
            "{} must be between 1 and 31, got {}",
            what, day
        )));
    }
    Ok(())
}

fn check_non_negative(what: &str, amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(format!(
            "{} {} is negative",
            what, amount
        )));
    }
    Ok(())
}

pub fn create_account<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    mut account: Account,
) -> Result<Account> {
    account.id = NEW_ID;
    account.user_id = user;
    store.save_account(account)
}

/// Overwrites name, bank, type and initial balance.
pub fn update_account<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    id: i64,
    changes: Account,
) -> Result<Account> {
    let mut account = require_owned(store.account(id)?, id, user)?;
    account.name = changes.name;
    account.bank = changes.bank;
    account.r#type = changes.r#type;
    account.initial_balance = changes.initial_balance;
    store.save_account(account)
}

/// Deleting an account also deletes its transactions.
pub fn delete_account<S: LedgerStore>(store: &mut S, user: UserId, id: i64) -> Result<()> {
    require_owned(store.account(id)?, id, user)?;
    store.delete_account(id)?;
    tracing::info!(id, user, "account deleted");
    Ok(())
}

/// New cards always start with nothing used.
pub fn create_card<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    mut card: CreditCard,
) -> Result<CreditCard> {
    check_non_negative("limit", card.limit_total)?;
    check_day("closing day", card.closing_day)?;
    check_day("due day", card.due_day)?;
    card.id = NEW_ID;
    card.user_id = user;
    card.limit_used = Decimal::ZERO;
    store.save_card(card)
}

/// Overwrites the card's descriptive fields and total limit. `limit_used`
/// is never taken from `changes`.
pub fn update_card<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    id: i64,
    changes: CreditCard,
) -> Result<CreditCard> {
    check_non_negative("limit", changes.limit_total)?;
    check_day("closing day", changes.closing_day)?;
    check_day("due day", changes.due_day)?;
    let mut card = require_owned(store.card(id)?, id, user)?;
    card.name = changes.name;
    card.last_four = changes.last_four;
    card.limit_total = changes.limit_total;
    card.closing_day = changes.closing_day;
    card.due_day = changes.due_day;
    store.save_card(card)
}

pub fn delete_card<S: LedgerStore>(store: &mut S, user: UserId, id: i64) -> Result<()> {
    require_owned(store.card(id)?, id, user)?;
    store.delete_card(id)?;
    tracing::info!(id, user, "card deleted");
    Ok(())
}

pub fn create_category<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    mut category: Category,
) -> Result<Category> {
    category.id = NEW_ID;
    category.user_id = user;
    store.save_category(category)
}

pub fn update_category<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    id: i64,
    changes: Category,
) -> Result<Category> {
    let mut category = require_owned(store.category(id)?, id, user)?;
    category.name = changes.name;
    category.kind = changes.kind;
    store.save_category(category)
}

/// Fails with `Conflict` while transactions still use the category.
pub fn delete_category<S: LedgerStore>(store: &mut S, user: UserId, id: i64) -> Result<()> {
    let category = require_owned(store.category(id)?, id, user)?;
    let in_use = store
        .transactions_of_user(user)?
        .iter()
        .filter(|t| t.category_id == Some(id))
        .count();
    if in_use > 0 {
        return Err(LedgerError::Conflict(format!(
            "category '{}' still has {} transaction(s)",
            category.name, in_use
        )));
    }
    store.delete_category(id)
}

pub fn create_asset<S: LedgerStore>(store: &mut S, user: UserId, mut asset: Asset) -> Result<Asset> {
    asset.id = NEW_ID;
    asset.user_id = user;
    store.save_asset(asset)
}

pub fn update_asset<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    id: i64,
    changes: Asset,
) -> Result<Asset> {
    let mut asset = require_owned(store.asset(id)?, id, user)?;
    asset.name = changes.name;
    asset.r#type = changes.r#type;
    asset.value = changes.value;
    store.save_asset(asset)
}

pub fn delete_asset<S: LedgerStore>(store: &mut S, user: UserId, id: i64) -> Result<()> {
    require_owned(store.asset(id)?, id, user)?;
    store.delete_asset(id)
}

pub fn create_recurring<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    mut item: RecurringTransaction,
) -> Result<RecurringTransaction> {
    check_non_negative("amount", item.amount)?;
    check_day("due day", item.due_day)?;
    require_owned_opt(item.category_id, user, |id| store.category(id))?;
    item.id = NEW_ID;
    item.user_id = user;
    store.save_recurring(item)
}

pub fn update_recurring<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    id: i64,
    changes: RecurringTransaction,
) -> Result<RecurringTransaction> {
    check_non_negative("amount", changes.amount)?;
    check_day("due day", changes.due_day)?;
    let mut item = require_owned(store.recurring(id)?, id, user)?;
    require_owned_opt(changes.category_id, user, |cid| store.category(cid))?;
    item.description = changes.description;
    item.amount = changes.amount;
    item.kind = changes.kind;
    item.category_id = changes.category_id;
    item.due_day = changes.due_day;
    item.frequency = changes.frequency;
    store.save_recurring(item)
}

pub fn delete_recurring<S: LedgerStore>(store: &mut S, user: UserId, id: i64) -> Result<()> {
    require_owned(store.recurring(id)?, id, user)?;
    store.delete_recurring(id)
}

pub fn create_investment<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    mut investment: Investment,
) -> Result<Investment> {
    check_non_negative("invested amount", investment.invested_amount)?;
    check_non_negative("current value", investment.current_value)?;
    investment.id = NEW_ID;
    investment.user_id = user;
    store.save_investment(investment)
}

/// Overwrites name, type and both amounts; a revaluation is just an update.
pub fn update_investment<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    id: i64,
    changes: Investment,
) -> Result<Investment> {
    check_non_negative("invested amount", changes.invested_amount)?;
    check_non_negative("current value", changes.current_value)?;
    let mut investment = require_owned(store.investment(id)?, id, user)?;
    investment.name = changes.name;
    investment.r#type = changes.r#type;
    investment.invested_amount = changes.invested_amount;
    investment.current_value = changes.current_value;
    store.save_investment(investment)
}

pub fn delete_investment<S: LedgerStore>(store: &mut S, user: UserId, id: i64) -> Result<()> {
    require_owned(store.investment(id)?, id, user)?;
    store.delete_investment(id)?;
    tracing::info!(id, user, "investment deleted");
    Ok(())
}
