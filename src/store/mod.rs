// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence seam for the ledger engine.
//!
//! The engine never talks SQL. It reads rows through [`LedgerStore`] and
//! writes them back through the same trait, wrapping multi-row mutations in
//! [`LedgerStore::atomically`] so the store can serialize them.

pub mod sqlite;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{
    Account, Asset, Budget, Category, CreditCard, Investment, Kind, RecurringTransaction,
    Transaction, UserId,
};

pub use sqlite::SqliteStore;

/// Optional narrowing for range queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub category_id: Option<i64>,
    pub kind: Option<Kind>,
}

impl TransactionFilter {
    pub fn kind(kind: Kind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        self.kind.is_none_or(|k| tx.kind == k)
            && self.category_id.is_none_or(|c| tx.category_id == Some(c))
    }
}

pub trait LedgerStore {
    fn transaction(&self, id: i64) -> Result<Option<Transaction>>;
    fn account(&self, id: i64) -> Result<Option<Account>>;
    fn card(&self, id: i64) -> Result<Option<CreditCard>>;
    fn category(&self, id: i64) -> Result<Option<Category>>;
    fn budget(&self, id: i64) -> Result<Option<Budget>>;
    fn asset(&self, id: i64) -> Result<Option<Asset>>;
    fn recurring(&self, id: i64) -> Result<Option<RecurringTransaction>>;
    fn investment(&self, id: i64) -> Result<Option<Investment>>;

    fn transactions_of_user(&self, user: UserId) -> Result<Vec<Transaction>>;
    fn transactions_of_account(&self, account_id: i64) -> Result<Vec<Transaction>>;
    fn transactions_of_card(&self, card_id: i64) -> Result<Vec<Transaction>>;
    /// Inclusive on both ends, ascending by date.
    fn transactions_in_range(
        &self,
        user: UserId,
        start: NaiveDate,
        end: NaiveDate,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>>;
    /// Rows dated on or after `since`, newest first.
    fn recent_transactions(&self, user: UserId, since: NaiveDate) -> Result<Vec<Transaction>>;
    fn transaction_by_external_id(
        &self,
        user: UserId,
        external_id: &str,
    ) -> Result<Option<Transaction>>;

    fn accounts_of(&self, user: UserId) -> Result<Vec<Account>>;
    fn cards_of(&self, user: UserId) -> Result<Vec<CreditCard>>;
    fn categories_of(&self, user: UserId) -> Result<Vec<Category>>;
    fn assets_of(&self, user: UserId) -> Result<Vec<Asset>>;
    fn recurring_of(&self, user: UserId) -> Result<Vec<RecurringTransaction>>;
    fn investments_of(&self, user: UserId) -> Result<Vec<Investment>>;
    fn budgets_of(&self, user: UserId, month: u32, year: i32) -> Result<Vec<Budget>>;
    fn find_budget(
        &self,
        user: UserId,
        category_id: i64,
        month: u32,
        year: i32,
    ) -> Result<Option<Budget>>;

    // Saves insert when `id == NEW_ID` and update otherwise.
    fn save_transaction(&mut self, tx: Transaction) -> Result<Transaction>;
    fn save_account(&mut self, account: Account) -> Result<Account>;
    fn save_card(&mut self, card: CreditCard) -> Result<CreditCard>;
    fn save_category(&mut self, category: Category) -> Result<Category>;
    fn save_budget(&mut self, budget: Budget) -> Result<Budget>;
    fn save_asset(&mut self, asset: Asset) -> Result<Asset>;
    fn save_recurring(&mut self, item: RecurringTransaction) -> Result<RecurringTransaction>;
    fn save_investment(&mut self, investment: Investment) -> Result<Investment>;

    fn delete_transaction(&mut self, id: i64) -> Result<()>;
    fn delete_account(&mut self, id: i64) -> Result<()>;
    fn delete_card(&mut self, id: i64) -> Result<()>;
    fn delete_category(&mut self, id: i64) -> Result<()>;
    fn delete_budget(&mut self, id: i64) -> Result<()>;
    fn delete_asset(&mut self, id: i64) -> Result<()>;
    fn delete_recurring(&mut self, id: i64) -> Result<()>;
    fn delete_investment(&mut self, id: i64) -> Result<()>;

    /// Runs `f` as one unit: every write inside it lands, or none does.
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>;
}
