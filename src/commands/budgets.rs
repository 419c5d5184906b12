// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::Ctx;
use crate::ledger::{budget_progress, delete_budget, upsert_budget};
use crate::store::SqliteStore;
use crate::utils::{
    arg, emit, fmt_money, fmt_percent, id, parse_decimal, parse_month, pretty_table,
};

pub fn handle(store: &mut SqliteStore, ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let (month, year) = parse_month(arg(sub, "month")?)?;
            let amount = parse_decimal(arg(sub, "amount")?)?;
            let budget = upsert_budget(store, ctx.user, id(sub, "category")?, amount, month, year)?;
            println!(
                "Budget {} set to {} for {:04}-{:02}",
                budget.id,
                fmt_money(&budget.amount),
                year,
                month
            );
        }
        Some(("progress", sub)) => {
            let (month, year) = ctx.month_or_current(sub)?;
            let data = budget_progress(store, ctx.user, month, year)?;
            emit(sub, &data, || {
                let rows = data
                    .iter()
                    .map(|b| {
                        vec![
                            b.budget_id.to_string(),
                            b.category.clone(),
                            fmt_money(&b.limit),
                            fmt_money(&b.spent),
                            fmt_money(&(b.limit - b.spent)),
                            fmt_percent(&b.percentage),
                        ]
                    })
                    .collect();
                pretty_table(&["ID", "Category", "Limit", "Spent", "Left", "Used"], rows)
            })?;
        }
        Some(("rm", sub)) => {
            let budget_id = id(sub, "id")?;
            delete_budget(store, ctx.user, budget_id)?;
            println!("Removed budget {}", budget_id);
        }
        _ => {}
    }
    Ok(())
}
