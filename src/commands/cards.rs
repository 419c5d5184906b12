// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use super::Ctx;
use crate::ledger::catalog;
use crate::models::{CreditCard, NEW_ID};
use crate::store::{LedgerStore, SqliteStore};
use crate::utils::{arg, emit, fmt_money, id, opt_arg, parse_decimal, pretty_table};

pub fn handle(store: &mut SqliteStore, ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let card = catalog::create_card(store, ctx.user, from_args(ctx, sub)?)?;
            println!("Added card '{}' (id {})", card.name, card.id);
        }
        Some(("list", sub)) => {
            let data = store.cards_of(ctx.user)?;
            emit(sub, &data, || {
                let rows = data
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.to_string(),
                            c.name.clone(),
                            c.last_four.clone().unwrap_or_default(),
                            fmt_money(&c.limit_total),
                            fmt_money(&c.limit_used),
                            fmt_money(&c.available()),
                            c.closing_day.to_string(),
                            c.due_day.to_string(),
                        ]
                    })
                    .collect();
                pretty_table(
                    &["ID", "Name", "Last 4", "Limit", "Used", "Available", "Closes", "Due"],
                    rows,
                )
            })?;
        }
        Some(("update", sub)) => {
            let card_id = id(sub, "id")?;
            let card = catalog::update_card(store, ctx.user, card_id, from_args(ctx, sub)?)?;
            println!(
                "Updated card '{}' (available {})",
                card.name,
                fmt_money(&card.available())
            );
        }
        Some(("rm", sub)) => {
            let card_id = id(sub, "id")?;
            catalog::delete_card(store, ctx.user, card_id)?;
            println!("Removed card {} and its transactions", card_id);
        }
        _ => {}
    }
    Ok(())
}

fn from_args(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<CreditCard> {
    let day = |name: &str| {
        sub.get_one::<u32>(name)
            .copied()
            .with_context(|| format!("Missing --{}", name))
    };
    Ok(CreditCard {
        id: NEW_ID,
        user_id: ctx.user,
        name: arg(sub, "name")?.to_string(),
        last_four: opt_arg(sub, "last-four").map(str::to_string),
        limit_total: parse_decimal(arg(sub, "limit")?)?,
        limit_used: Decimal::ZERO,
        closing_day: day("closing-day")?,
        due_day: day("due-day")?,
    })
}
