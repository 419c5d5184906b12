// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::Ctx;
use crate::config::EngineConfig;
use crate::ledger::{NetWorth, dashboard_snapshot, net_worth};
use crate::store::SqliteStore;
use crate::utils::{emit, fmt_money, fmt_percent, maybe_print_json, pretty_table};

fn net_worth_rows(nw: &NetWorth) -> Vec<Vec<String>> {
    vec![
        vec!["Accounts".into(), fmt_money(&nw.accounts_total)],
        vec!["Assets".into(), fmt_money(&nw.assets_total)],
        vec!["Net worth".into(), fmt_money(&nw.net_worth)],
        vec!["Start of month".into(), fmt_money(&nw.start_of_month)],
        vec!["Change".into(), fmt_percent(&nw.percentage_change)],
    ]
}

pub fn networth(store: &SqliteStore, ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    let nw = net_worth(store, ctx.user, ctx.today)?;
    emit(m, &nw, || pretty_table(&["", "Amount"], net_worth_rows(&nw)))
}

pub fn handle(store: &SqliteStore, ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    let cfg = EngineConfig::load(store.conn())?;
    let d = dashboard_snapshot(store, ctx.user, ctx.today, &cfg)?;
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &d)? {
        return Ok(());
    }

    let mut summary = vec![
        vec!["Spent this month".into(), fmt_money(&d.total_spent_current)],
        vec!["Spent last month".into(), fmt_money(&d.total_spent_previous)],
        vec!["Spending change".into(), fmt_percent(&d.spending_change)],
        vec!["Income this month".into(), fmt_money(&d.income_current)],
        vec!["Monthly result".into(), fmt_money(&d.monthly_result)],
    ];
    summary.extend(net_worth_rows(&d.net_worth));
    println!("{}", pretty_table(&["Summary", ""], summary));

    let pace = d
        .daily_expenses
        .iter()
        .filter(|p| !p.value.is_zero())
        .map(|p| vec![p.label.clone(), fmt_money(&p.value)])
        .collect();
    println!("{}", pretty_table(&["Day", "Spent"], pace));

    let top = d
        .top_categories
        .iter()
        .map(|c| vec![c.category.clone(), fmt_money(&c.total)])
        .collect();
    println!("{}", pretty_table(&["Top categories (last month)", "Total"], top));

    let recent = d
        .recent_transactions
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.kind.to_string(),
                fmt_money(&t.amount),
                t.description.clone(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Date", "Kind", "Amount", "Recent"], recent));

    let upcoming = d
        .upcoming
        .iter()
        .map(|r| vec![r.due_day.to_string(), r.description.clone(), fmt_money(&r.amount)])
        .collect();
    println!("{}", pretty_table(&["Day", "Upcoming", "Amount"], upcoming));
    Ok(())
}
