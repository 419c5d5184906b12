// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::Ctx;
use crate::config::EngineConfig;
use crate::ledger::math::month_of;
use crate::ledger::{cash_flow, category_breakdown};
use crate::store::SqliteStore;
use crate::utils::{emit, fmt_money, fmt_percent, opt_arg, parse_date, pretty_table};

pub fn handle(store: &SqliteStore, ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("cashflow", sub)) => cashflow(store, ctx, sub)?,
        Some(("by-category", sub)) => by_category(store, ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn cashflow(store: &SqliteStore, ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let (first, last) = month_of(ctx.today)?;
    let start = opt_arg(sub, "from").map(parse_date).transpose()?.unwrap_or(first);
    let end = opt_arg(sub, "to").map(parse_date).transpose()?.unwrap_or(last);
    let data = cash_flow(store, ctx.user, start, end)?;
    emit(sub, &data, || {
        let rows = data
            .iter()
            .map(|d| {
                vec![
                    d.date.to_string(),
                    fmt_money(&d.total_income),
                    fmt_money(&d.total_expense),
                    fmt_money(&d.net_balance),
                ]
            })
            .collect();
        pretty_table(&["Date", "Income", "Expense", "Net"], rows)
    })
}

fn by_category(store: &SqliteStore, ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let (month, year) = ctx.month_or_current(sub)?;
    let cfg = EngineConfig::load(store.conn())?;
    let data = category_breakdown(store, ctx.user, month, year, &cfg.uncategorized_label)?;
    emit(sub, &data, || {
        let rows = data
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    fmt_money(&c.total),
                    fmt_percent(&c.percentage),
                ]
            })
            .collect();
        pretty_table(&["Category", "Spent", "Share"], rows)
    })
}
