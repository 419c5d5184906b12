// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

pub type UserId = i64;

/// Rows not yet persisted carry this id; `save_*` assigns a real one.
pub const NEW_ID: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Income => "INCOME",
            Kind::Expense => "EXPENSE",
        }
    }
}

impl std::str::FromStr for Kind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Ok(Kind::Income),
            "EXPENSE" => Ok(Kind::Expense),
            other => Err(LedgerError::Parse(format!(
                "unknown kind '{}', expected income or expense",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a transaction's money moved. A transaction is linked to an account
/// or to a card, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Link {
    Account(i64),
    Card(i64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: UserId,
    pub date: NaiveDate,
    /// Magnitude only; direction comes from `kind`.
    pub amount: Decimal,
    pub kind: Kind,
    pub description: String,
    pub link: Option<Link>,
    pub category_id: Option<i64>,
    pub external_id: Option<String>,
}

impl Transaction {
    pub fn card_id(&self) -> Option<i64> {
        match self.link {
            Some(Link::Card(id)) => Some(id),
            _ => None,
        }
    }

    pub fn account_id(&self) -> Option<i64> {
        match self.link {
            Some(Link::Account(id)) => Some(id),
            _ => None,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == Kind::Expense
    }

    /// The card whose `limit_used` this row contributes to, if any.
    pub fn charged_card(&self) -> Option<i64> {
        if self.is_expense() { self.card_id() } else { None }
    }

    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            Kind::Income => self.amount,
            Kind::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub user_id: UserId,
    pub name: String,
    pub bank: Option<String>,
    pub r#type: String,
    pub initial_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: i64,
    pub user_id: UserId,
    pub name: String,
    pub last_four: Option<String>,
    pub limit_total: Decimal,
    pub limit_used: Decimal,
    pub closing_day: u32,
    pub due_day: u32,
}

impl CreditCard {
    pub fn available(&self) -> Decimal {
        self.limit_total - self.limit_used
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub user_id: UserId,
    pub name: String,
    pub kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: UserId,
    pub category_id: i64,
    pub month: u32,
    pub year: i32,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    pub user_id: UserId,
    pub name: String,
    pub r#type: String,
    pub value: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WEEKLY" => Ok(Frequency::Weekly),
            "MONTHLY" => Ok(Frequency::Monthly),
            "YEARLY" => Ok(Frequency::Yearly),
            other => Err(LedgerError::Parse(format!(
                "unknown frequency '{}', expected weekly, monthly or yearly",
                other
            ))),
        }
    }
}

/// A template for a repeating charge or income; not a ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringTransaction {
    pub id: i64,
    pub user_id: UserId,
    pub description: String,
    pub amount: Decimal,
    pub kind: Kind,
    pub category_id: Option<i64>,
    pub due_day: u32, // 1-31
    pub frequency: Frequency,
}

/// A tracked position: what went in and what it is worth now. Kept apart
/// from net worth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: i64,
    pub user_id: UserId,
    pub name: String,
    pub r#type: String,
    pub invested_amount: Decimal,
    pub current_value: Decimal,
}

impl Investment {
    pub fn gain(&self) -> Decimal {
        self.current_value - self.invested_amount
    }
}

/// Entities scoped to a single user.
pub trait Owned {
    const ENTITY: &'static str;

    fn id(&self) -> i64;
    fn owner(&self) -> UserId;
}

macro_rules! impl_owned {
    ($ty:ty, $name:literal) => {
        impl Owned for $ty {
            const ENTITY: &'static str = $name;

            fn id(&self) -> i64 {
                self.id
            }

            fn owner(&self) -> UserId {
                self.user_id
            }
        }
    };
}

impl_owned!(Transaction, "transaction");
impl_owned!(Account, "account");
impl_owned!(CreditCard, "credit card");
impl_owned!(Category, "category");
impl_owned!(Budget, "budget");
impl_owned!(Investment, "investment");
impl_owned!(Asset, "asset");
impl_owned!(RecurringTransaction, "recurring transaction");
