// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use anyhow::Result;
use serde::Serialize;

use super::Ctx;
use crate::ledger::reports::category_names;
use crate::ledger::{
    TransactionDraft, create_transaction, delete_transaction, list_transactions,
    update_transaction,
};
use crate::models::{Kind, Link, Transaction};
use crate::store::{LedgerStore, SqliteStore};
use crate::utils::{
    arg, emit, fmt_money, id, opt_arg, opt_id, parse_date, parse_decimal, pretty_table,
};

pub fn handle(store: &mut SqliteStore, ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let mut draft = draft_from_args(sub)?;
            draft.external_id = opt_arg(sub, "external-id").map(str::to_string);
            let tx = create_transaction(store, ctx.user, draft)?;
            println!(
                "Recorded {} {} on {} (id {})",
                tx.kind,
                fmt_money(&tx.amount),
                tx.date,
                tx.id
            );
            report_card(store, &tx)?;
        }
        Some(("edit", sub)) => {
            let tx = update_transaction(store, ctx.user, id(sub, "id")?, draft_from_args(sub)?)?;
            println!("Updated transaction {}", tx.id);
            report_card(store, &tx)?;
        }
        Some(("rm", sub)) => {
            let tx_id = id(sub, "id")?;
            match delete_transaction(store, ctx.user, tx_id)? {
                Some(card) => println!(
                    "Removed transaction {}; '{}' now has {} available",
                    tx_id,
                    card.name,
                    fmt_money(&card.available())
                ),
                None => println!("Removed transaction {}", tx_id),
            }
        }
        Some(("list", sub)) => list(store, ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn draft_from_args(sub: &clap::ArgMatches) -> Result<TransactionDraft> {
    let kind: Kind = arg(sub, "kind")?.parse()?;
    let mut draft = TransactionDraft::new(
        parse_date(arg(sub, "date")?)?,
        parse_decimal(arg(sub, "amount")?)?,
        kind,
    );
    draft.description = opt_arg(sub, "description").unwrap_or_default().to_string();
    draft.account_id = opt_id(sub, "account");
    draft.card_id = opt_id(sub, "card");
    draft.category_id = opt_id(sub, "category");
    Ok(draft)
}

fn report_card(store: &SqliteStore, tx: &Transaction) -> Result<()> {
    if let Some(card) = tx.card_id().map(|c| store.card(c)).transpose()?.flatten() {
        println!(
            "Card '{}': used {} of {}",
            card.name,
            fmt_money(&card.limit_used),
            fmt_money(&card.limit_total)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: Kind,
    pub amount: String,
    pub description: String,
    pub source: String,
    pub category: String,
}

fn list(store: &SqliteStore, ctx: &Ctx, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(store, ctx, sub)?;
    emit(sub, &data, || {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.to_string(),
                    r.amount.clone(),
                    r.description.clone(),
                    r.source.clone(),
                    r.category.clone(),
                ]
            })
            .collect();
        pretty_table(
            &["ID", "Date", "Kind", "Amount", "Description", "Source", "Category"],
            rows,
        )
    })
}

/// Rows for `tx list`: the month's transactions, newest first, with
/// account/card and category names resolved.
pub fn query_rows(
    store: &SqliteStore,
    ctx: &Ctx,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let (month, year) = ctx.month_or_current(sub)?;
    let mut txs = list_transactions(store, ctx.user, month, year, opt_id(sub, "category"))?;
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }
    let names = category_names(store, ctx.user)?;
    rows(store, ctx, &txs, &names)
}

fn rows(
    store: &SqliteStore,
    ctx: &Ctx,
    txs: &[Transaction],
    categories: &HashMap<i64, String>,
) -> Result<Vec<TransactionRow>> {
    let accounts: HashMap<i64, String> = store
        .accounts_of(ctx.user)?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();
    let cards: HashMap<i64, String> = store
        .cards_of(ctx.user)?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    Ok(txs
        .iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            kind: t.kind,
            amount: fmt_money(&t.amount),
            description: t.description.clone(),
            source: match t.link {
                Some(Link::Account(a)) => accounts.get(&a).cloned().unwrap_or_default(),
                Some(Link::Card(c)) => cards.get(&c).cloned().unwrap_or_default(),
                None => String::new(),
            },
            category: t
                .category_id
                .and_then(|c| categories.get(&c).cloned())
                .unwrap_or_default(),
        })
        .collect())
}
