// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::types::{Type, Value};
use rusqlite::{Connection, OptionalExtension, Params, Row, params, params_from_iter};
use rust_decimal::Decimal;
use std::path::Path;

use super::{LedgerStore, TransactionFilter};
use crate::db::init_schema;
use crate::error::{LedgerError, Result};
use crate::models::{
    Account, Asset, Budget, Category, CreditCard, Investment, Link, NEW_ID, RecurringTransaction,
    Transaction, UserId,
};

const TX_COLS: &str = "id, user_id, date, amount, kind, description, account_id, card_id, category_id, external_id";
const ACCOUNT_COLS: &str = "id, user_id, name, bank, type, initial_balance";
const CARD_COLS: &str = "id, user_id, name, last_four, limit_total, limit_used, closing_day, due_day";
const CATEGORY_COLS: &str = "id, user_id, name, kind";
const BUDGET_COLS: &str = "id, user_id, category_id, month, year, amount";
const ASSET_COLS: &str = "id, user_id, name, type, value";
const RECURRING_COLS: &str =
    "id, user_id, description, amount, kind, category_id, due_day, frequency";
const INVESTMENT_COLS: &str = "id, user_id, name, type, invested_amount, current_value";

/// [`LedgerStore`] over a single SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open(path: &Path) -> Result<Self> {
        Self::new(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn query_all<T, P: Params>(
        &self,
        sql: &str,
        params: P,
        map: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, map)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(data)
    }

    fn query_one<T, P: Params>(
        &self,
        sql: &str,
        params: P,
        map: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> Result<Option<T>> {
        Ok(self.conn.query_row(sql, params, map).optional()?)
    }

    fn delete_row(&mut self, table: &str, id: i64) -> Result<()> {
        self.conn
            .execute(&format!("DELETE FROM {} WHERE id=?1", table), params![id])?;
        Ok(())
    }
}

fn conversion_error(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, msg.into())
}

fn dec_col(r: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    s.parse::<Decimal>()
        .map_err(|e| conversion_error(idx, format!("invalid decimal '{}': {}", s, e)))
}

fn opt_dec_col(r: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Decimal>> {
    let s: Option<String> = r.get(idx)?;
    s.map(|s| {
        s.parse::<Decimal>()
            .map_err(|e| conversion_error(idx, format!("invalid decimal '{}': {}", s, e)))
    })
    .transpose()
}

fn parsed_col<T: std::str::FromStr<Err = LedgerError>>(
    r: &Row<'_>,
    idx: usize,
) -> rusqlite::Result<T> {
    let s: String = r.get(idx)?;
    s.parse::<T>().map_err(|e| conversion_error(idx, e.to_string()))
}

fn map_tx(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    let account_id: Option<i64> = r.get(6)?;
    let card_id: Option<i64> = r.get(7)?;
    let link = match (card_id, account_id) {
        (Some(card), _) => Some(Link::Card(card)),
        (None, Some(account)) => Some(Link::Account(account)),
        (None, None) => None,
    };
    Ok(Transaction {
        id: r.get(0)?,
        user_id: r.get(1)?,
        date: r.get(2)?,
        amount: dec_col(r, 3)?,
        kind: parsed_col(r, 4)?,
        description: r.get(5)?,
        link,
        category_id: r.get(8)?,
        external_id: r.get(9)?,
    })
}

fn map_account(r: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        bank: r.get(3)?,
        r#type: r.get(4)?,
        initial_balance: dec_col(r, 5)?,
    })
}

fn map_card(r: &Row<'_>) -> rusqlite::Result<CreditCard> {
    Ok(CreditCard {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        last_four: r.get(3)?,
        limit_total: dec_col(r, 4)?,
        limit_used: dec_col(r, 5)?,
        closing_day: r.get(6)?,
        due_day: r.get(7)?,
    })
}

fn map_category(r: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        kind: parsed_col(r, 3)?,
    })
}

fn map_budget(r: &Row<'_>) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: r.get(0)?,
        user_id: r.get(1)?,
        category_id: r.get(2)?,
        month: r.get(3)?,
        year: r.get(4)?,
        amount: dec_col(r, 5)?,
    })
}

fn map_asset(r: &Row<'_>) -> rusqlite::Result<Asset> {
    Ok(Asset {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        r#type: r.get(3)?,
        value: opt_dec_col(r, 4)?,
    })
}

fn map_recurring(r: &Row<'_>) -> rusqlite::Result<RecurringTransaction> {
    Ok(RecurringTransaction {
        id: r.get(0)?,
        user_id: r.get(1)?,
        description: r.get(2)?,
        amount: dec_col(r, 3)?,
        kind: parsed_col(r, 4)?,
        category_id: r.get(5)?,
        due_day: r.get(6)?,
        frequency: parsed_col(r, 7)?,
    })
}

fn map_investment(r: &Row<'_>) -> rusqlite::Result<Investment> {
    Ok(Investment {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        r#type: r.get(3)?,
        invested_amount: dec_col(r, 4)?,
        current_value: dec_col(r, 5)?,
    })
}

fn ensure_updated(changed: usize, entity: &'static str, id: i64) -> Result<()> {
    if changed == 0 {
        return Err(LedgerError::NotFound { entity, id });
    }
    Ok(())
}

impl LedgerStore for SqliteStore {
    fn transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let sql = format!("SELECT {} FROM transactions WHERE id=?1", TX_COLS);
        self.query_one(&sql, params![id], map_tx)
    }

    fn account(&self, id: i64) -> Result<Option<Account>> {
        let sql = format!("SELECT {} FROM accounts WHERE id=?1", ACCOUNT_COLS);
        self.query_one(&sql, params![id], map_account)
    }

    fn card(&self, id: i64) -> Result<Option<CreditCard>> {
        let sql = format!("SELECT {} FROM credit_cards WHERE id=?1", CARD_COLS);
        self.query_one(&sql, params![id], map_card)
    }

    fn category(&self, id: i64) -> Result<Option<Category>> {
        let sql = format!("SELECT {} FROM categories WHERE id=?1", CATEGORY_COLS);
        self.query_one(&sql, params![id], map_category)
    }

    fn budget(&self, id: i64) -> Result<Option<Budget>> {
        let sql = format!("SELECT {} FROM budgets WHERE id=?1", BUDGET_COLS);
        self.query_one(&sql, params![id], map_budget)
    }

    fn asset(&self, id: i64) -> Result<Option<Asset>> {
        let sql = format!("SELECT {} FROM assets WHERE id=?1", ASSET_COLS);
        self.query_one(&sql, params![id], map_asset)
    }

    fn recurring(&self, id: i64) -> Result<Option<RecurringTransaction>> {
        let sql = format!(
            "SELECT {} FROM recurring_transactions WHERE id=?1",
            RECURRING_COLS
        );
        self.query_one(&sql, params![id], map_recurring)
    }

    fn investment(&self, id: i64) -> Result<Option<Investment>> {
        let sql = format!("SELECT {} FROM investments WHERE id=?1", INVESTMENT_COLS);
        self.query_one(&sql, params![id], map_investment)
    }

    fn transactions_of_user(&self, user: UserId) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT {} FROM transactions WHERE user_id=?1 ORDER BY date, id",
            TX_COLS
        );
        self.query_all(&sql, params![user], map_tx)
    }

    fn transactions_of_account(&self, account_id: i64) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT {} FROM transactions WHERE account_id=?1 ORDER BY date, id",
            TX_COLS
        );
        self.query_all(&sql, params![account_id], map_tx)
    }

    fn transactions_of_card(&self, card_id: i64) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT {} FROM transactions WHERE card_id=?1 ORDER BY date, id",
            TX_COLS
        );
        self.query_all(&sql, params![card_id], map_tx)
    }

    fn transactions_in_range(
        &self,
        user: UserId,
        start: NaiveDate,
        end: NaiveDate,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        let mut sql = format!(
            "SELECT {} FROM transactions WHERE user_id=? AND date>=? AND date<=?",
            TX_COLS
        );
        let mut params_vec: Vec<Value> = vec![
            Value::Integer(user),
            Value::Text(start.to_string()),
            Value::Text(end.to_string()),
        ];
        if let Some(cat) = filter.category_id {
            sql.push_str(" AND category_id=?");
            params_vec.push(Value::Integer(cat));
        }
        if let Some(kind) = filter.kind {
            sql.push_str(" AND kind=?");
            params_vec.push(Value::Text(kind.as_str().to_string()));
        }
        sql.push_str(" ORDER BY date, id");
        self.query_all(&sql, params_from_iter(params_vec), map_tx)
    }

    fn recent_transactions(&self, user: UserId, since: NaiveDate) -> Result<Vec<Transaction>> {
        let sql = format!(
            "SELECT {} FROM transactions WHERE user_id=?1 AND date>=?2 ORDER BY date DESC, id DESC",
            TX_COLS
        );
        self.query_all(&sql, params![user, since], map_tx)
    }

    fn transaction_by_external_id(
        &self,
        user: UserId,
        external_id: &str,
    ) -> Result<Option<Transaction>> {
        let sql = format!(
            "SELECT {} FROM transactions WHERE user_id=?1 AND external_id=?2",
            TX_COLS
        );
        self.query_one(&sql, params![user, external_id], map_tx)
    }

    fn accounts_of(&self, user: UserId) -> Result<Vec<Account>> {
        let sql = format!(
            "SELECT {} FROM accounts WHERE user_id=?1 ORDER BY name, id",
            ACCOUNT_COLS
        );
        self.query_all(&sql, params![user], map_account)
    }

    fn cards_of(&self, user: UserId) -> Result<Vec<CreditCard>> {
        let sql = format!(
            "SELECT {} FROM credit_cards WHERE user_id=?1 ORDER BY name, id",
            CARD_COLS
        );
        self.query_all(&sql, params![user], map_card)
    }

    fn categories_of(&self, user: UserId) -> Result<Vec<Category>> {
        let sql = format!(
            "SELECT {} FROM categories WHERE user_id=?1 ORDER BY name, id",
            CATEGORY_COLS
        );
        self.query_all(&sql, params![user], map_category)
    }

    fn assets_of(&self, user: UserId) -> Result<Vec<Asset>> {
        let sql = format!(
            "SELECT {} FROM assets WHERE user_id=?1 ORDER BY name, id",
            ASSET_COLS
        );
        self.query_all(&sql, params![user], map_asset)
    }

    fn recurring_of(&self, user: UserId) -> Result<Vec<RecurringTransaction>> {
        let sql = format!(
            "SELECT {} FROM recurring_transactions WHERE user_id=?1 ORDER BY due_day, id",
            RECURRING_COLS
        );
        self.query_all(&sql, params![user], map_recurring)
    }

    fn investments_of(&self, user: UserId) -> Result<Vec<Investment>> {
        let sql = format!(
            "SELECT {} FROM investments WHERE user_id=?1 ORDER BY name, id",
            INVESTMENT_COLS
        );
        self.query_all(&sql, params![user], map_investment)
    }

    fn budgets_of(&self, user: UserId, month: u32, year: i32) -> Result<Vec<Budget>> {
        let sql = format!(
            "SELECT {} FROM budgets WHERE user_id=?1 AND month=?2 AND year=?3 ORDER BY id",
            BUDGET_COLS
        );
        self.query_all(&sql, params![user, month, year], map_budget)
    }

    fn find_budget(
        &self,
        user: UserId,
        category_id: i64,
        month: u32,
        year: i32,
    ) -> Result<Option<Budget>> {
        let sql = format!(
            "SELECT {} FROM budgets WHERE user_id=?1 AND category_id=?2 AND month=?3 AND year=?4",
            BUDGET_COLS
        );
        self.query_one(&sql, params![user, category_id, month, year], map_budget)
    }

    fn save_transaction(&mut self, mut tx: Transaction) -> Result<Transaction> {
        let amount = tx.amount.to_string();
        if tx.id == NEW_ID {
            self.conn.execute(
                "INSERT INTO transactions(user_id, date, amount, kind, description, account_id, card_id, category_id, external_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    tx.user_id,
                    tx.date,
                    amount,
                    tx.kind.as_str(),
                    tx.description,
                    tx.account_id(),
                    tx.card_id(),
                    tx.category_id,
                    tx.external_id
                ],
            )?;
            tx.id = self.conn.last_insert_rowid();
        } else {
            let changed = self.conn.execute(
                "UPDATE transactions SET date=?2, amount=?3, kind=?4, description=?5, account_id=?6,
                 card_id=?7, category_id=?8, external_id=?9 WHERE id=?1",
                params![
                    tx.id,
                    tx.date,
                    amount,
                    tx.kind.as_str(),
                    tx.description,
                    tx.account_id(),
                    tx.card_id(),
                    tx.category_id,
                    tx.external_id
                ],
            )?;
            ensure_updated(changed, "transaction", tx.id)?;
        }
        Ok(tx)
    }

    fn save_account(&mut self, mut account: Account) -> Result<Account> {
        let initial = account.initial_balance.to_string();
        if account.id == NEW_ID {
            self.conn.execute(
                "INSERT INTO accounts(user_id, name, bank, type, initial_balance) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![account.user_id, account.name, account.bank, account.r#type, initial],
            )?;
            account.id = self.conn.last_insert_rowid();
        } else {
            let changed = self.conn.execute(
                "UPDATE accounts SET name=?2, bank=?3, type=?4, initial_balance=?5 WHERE id=?1",
                params![account.id, account.name, account.bank, account.r#type, initial],
            )?;
            ensure_updated(changed, "account", account.id)?;
        }
        Ok(account)
    }

    fn save_card(&mut self, mut card: CreditCard) -> Result<CreditCard> {
        let total = card.limit_total.to_string();
        let used = card.limit_used.to_string();
        if card.id == NEW_ID {
            self.conn.execute(
                "INSERT INTO credit_cards(user_id, name, last_four, limit_total, limit_used, closing_day, due_day)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    card.user_id,
                    card.name,
                    card.last_four,
                    total,
                    used,
                    card.closing_day,
                    card.due_day
                ],
            )?;
            card.id = self.conn.last_insert_rowid();
        } else {
            let changed = self.conn.execute(
                "UPDATE credit_cards SET name=?2, last_four=?3, limit_total=?4, limit_used=?5,
                 closing_day=?6, due_day=?7 WHERE id=?1",
                params![
                    card.id,
                    card.name,
                    card.last_four,
                    total,
                    used,
                    card.closing_day,
                    card.due_day
                ],
            )?;
            ensure_updated(changed, "credit card", card.id)?;
        }
        Ok(card)
    }

    fn save_category(&mut self, mut category: Category) -> Result<Category> {
        if category.id == NEW_ID {
            self.conn.execute(
                "INSERT INTO categories(user_id, name, kind) VALUES (?1, ?2, ?3)",
                params![category.user_id, category.name, category.kind.as_str()],
            )?;
            category.id = self.conn.last_insert_rowid();
        } else {
            let changed = self.conn.execute(
                "UPDATE categories SET name=?2, kind=?3 WHERE id=?1",
                params![category.id, category.name, category.kind.as_str()],
            )?;
            ensure_updated(changed, "category", category.id)?;
        }
        Ok(category)
    }

    fn save_budget(&mut self, mut budget: Budget) -> Result<Budget> {
        let amount = budget.amount.to_string();
        if budget.id == NEW_ID {
            self.conn.execute(
                "INSERT INTO budgets(user_id, category_id, month, year, amount) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    budget.user_id,
                    budget.category_id,
                    budget.month,
                    budget.year,
                    amount
                ],
            )?;
            budget.id = self.conn.last_insert_rowid();
        } else {
            let changed = self.conn.execute(
                "UPDATE budgets SET category_id=?2, month=?3, year=?4, amount=?5 WHERE id=?1",
                params![budget.id, budget.category_id, budget.month, budget.year, amount],
            )?;
            ensure_updated(changed, "budget", budget.id)?;
        }
        Ok(budget)
    }

    fn save_asset(&mut self, mut asset: Asset) -> Result<Asset> {
        let value = asset.value.map(|v| v.to_string());
        if asset.id == NEW_ID {
            self.conn.execute(
                "INSERT INTO assets(user_id, name, type, value) VALUES (?1, ?2, ?3, ?4)",
                params![asset.user_id, asset.name, asset.r#type, value],
            )?;
            asset.id = self.conn.last_insert_rowid();
        } else {
            let changed = self.conn.execute(
                "UPDATE assets SET name=?2, type=?3, value=?4 WHERE id=?1",
                params![asset.id, asset.name, asset.r#type, value],
            )?;
            ensure_updated(changed, "asset", asset.id)?;
        }
        Ok(asset)
    }

    fn save_recurring(&mut self, mut item: RecurringTransaction) -> Result<RecurringTransaction> {
        let amount = item.amount.to_string();
        if item.id == NEW_ID {
            self.conn.execute(
                "INSERT INTO recurring_transactions(user_id, description, amount, kind, category_id, due_day, frequency)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    item.user_id,
                    item.description,
                    amount,
                    item.kind.as_str(),
                    item.category_id,
                    item.due_day,
                    item.frequency.as_str()
                ],
            )?;
            item.id = self.conn.last_insert_rowid();
        } else {
            let changed = self.conn.execute(
                "UPDATE recurring_transactions SET description=?2, amount=?3, kind=?4, category_id=?5,
                 due_day=?6, frequency=?7 WHERE id=?1",
                params![
                    item.id,
                    item.description,
                    amount,
                    item.kind.as_str(),
                    item.category_id,
                    item.due_day,
                    item.frequency.as_str()
                ],
            )?;
            ensure_updated(changed, "recurring transaction", item.id)?;
        }
        Ok(item)
    }

    fn save_investment(&mut self, mut investment: Investment) -> Result<Investment> {
        let invested = investment.invested_amount.to_string();
        let current = investment.current_value.to_string();
        if investment.id == NEW_ID {
            self.conn.execute(
                "INSERT INTO investments(user_id, name, type, invested_amount, current_value)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    investment.user_id,
                    investment.name,
                    investment.r#type,
                    invested,
                    current
                ],
            )?;
            investment.id = self.conn.last_insert_rowid();
        } else {
            let changed = self.conn.execute(
                "UPDATE investments SET name=?2, type=?3, invested_amount=?4, current_value=?5 WHERE id=?1",
                params![
                    investment.id,
                    investment.name,
                    investment.r#type,
                    invested,
                    current
                ],
            )?;
            ensure_updated(changed, "investment", investment.id)?;
        }
        Ok(investment)
    }

    fn delete_transaction(&mut self, id: i64) -> Result<()> {
        self.delete_row("transactions", id)
    }

    fn delete_account(&mut self, id: i64) -> Result<()> {
        self.delete_row("accounts", id)
    }

    fn delete_card(&mut self, id: i64) -> Result<()> {
        self.delete_row("credit_cards", id)
    }

    fn delete_category(&mut self, id: i64) -> Result<()> {
        self.delete_row("categories", id)
    }

    fn delete_budget(&mut self, id: i64) -> Result<()> {
        self.delete_row("budgets", id)
    }

    fn delete_asset(&mut self, id: i64) -> Result<()> {
        self.delete_row("assets", id)
    }

    fn delete_recurring(&mut self, id: i64) -> Result<()> {
        self.delete_row("recurring_transactions", id)
    }

    fn delete_investment(&mut self, id: i64) -> Result<()> {
        self.delete_row("investments", id)
    }

    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.conn.execute_batch("SAVEPOINT ledger_op")?;
        match f(self) {
            Ok(v) => {
                self.conn.execute_batch("RELEASE ledger_op")?;
                Ok(v)
            }
            Err(e) => {
                if matches!(e, LedgerError::Storage(_)) {
                    tracing::error!("storage failure, rolling back: {e}");
                } else {
                    tracing::warn!("rolling back ledger mutation: {e}");
                }
                self.conn
                    .execute_batch("ROLLBACK TO ledger_op; RELEASE ledger_op")?;
                Err(e)
            }
        }
    }
}
