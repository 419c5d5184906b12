// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use super::access::require_owned;
use super::math::{checked_sum, month_bounds, percent_of};
use crate::error::{LedgerError, Result};
use crate::models::{Budget, Kind, NEW_ID, UserId};
use crate::store::{LedgerStore, TransactionFilter};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub budget_id: i64,
    pub category_id: i64,
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub percentage: Decimal,
}

/// Spent-vs-limit for every budget the user set for `month`/`year`.
pub fn budget_progress<S: LedgerStore>(
    store: &S,
    user: UserId,
    month: u32,
    year: i32,
) -> Result<Vec<BudgetProgress>> {
    let (start, end) = month_bounds(month, year)?;
    let mut data = Vec::new();
    for budget in store.budgets_of(user, month, year)? {
        let category = store
            .category(budget.category_id)?
            .ok_or(LedgerError::NotFound {
                entity: "category",
                id: budget.category_id,
            })?;
        let filter = TransactionFilter {
            category_id: Some(budget.category_id),
            kind: Some(Kind::Expense),
        };
        let spent = checked_sum(
            store
                .transactions_in_range(user, start, end, &filter)?
                .iter()
                .map(|t| t.amount),
        )?;
        data.push(BudgetProgress {
            budget_id: budget.id,
            category_id: category.id,
            category: category.name,
            limit: budget.amount,
            spent,
            percentage: percent_of(spent, budget.amount),
        });
    }
    tracing::debug!(user, month, year, budgets = data.len(), "budget progress");
    Ok(data)
}

/// Sets the limit for (user, category, month, year), updating the existing
/// budget for that key instead of adding a second one.
pub fn upsert_budget<S: LedgerStore>(
    store: &mut S,
    user: UserId,
    category_id: i64,
    amount: Decimal,
    month: u32,
    year: i32,
) -> Result<Budget> {
    if amount < Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(format!(
            "budget limit {} is negative",
            amount
        )));
    }
    month_bounds(month, year)?;
    require_owned(store.category(category_id)?, category_id, user)?;

    let budget = match store.find_budget(user, category_id, month, year)? {
        Some(mut existing) => {
            existing.amount = amount;
            existing
        }
        None => Budget {
            id: NEW_ID,
            user_id: user,
            category_id,
            month,
            year,
            amount,
        },
    };
    let saved = store.save_budget(budget)?;
    tracing::info!(id = saved.id, user, category_id, month, year, %amount, "budget set");
    Ok(saved)
}

pub fn delete_budget<S: LedgerStore>(store: &mut S, user: UserId, id: i64) -> Result<()> {
    require_owned(store.budget(id)?, id, user)?;
    store.delete_budget(id)
}
