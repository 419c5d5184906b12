// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger engine: invariant maintenance for card limits and every
//! derived figure (balances, budgets, net worth, reports, dashboard).
//!
//! Nothing here caches. Each call re-reads the rows it needs from a
//! [`LedgerStore`](crate::store::LedgerStore) and recomputes.

pub mod access;
pub mod balance;
pub mod budgets;
pub mod card_limits;
pub mod catalog;
pub mod dashboard;
pub mod investments;
pub mod math;
pub mod net_worth;
pub mod recurring;
pub mod reports;
pub mod transactions;

pub use balance::{AccountBalance, account_balance, accounts_with_balances, compute_balance};
pub use budgets::{BudgetProgress, budget_progress, delete_budget, upsert_budget};
pub use card_limits::{
    CardDrift, apply_transaction_effect, derived_limit_used, reconcile_card_limits,
    reverse_transaction_effect,
};
pub use dashboard::{Dashboard, dashboard_snapshot};
pub use investments::{InvestmentSummary, investment_summary};
pub use net_worth::{NetWorth, net_worth};
pub use recurring::materialize_recurring;
pub use reports::{CashFlowDay, CategoryShare, cash_flow, category_breakdown};
pub use transactions::{
    TransactionDraft, create_transaction, delete_transaction, list_transactions,
    update_transaction,
};
