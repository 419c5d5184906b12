// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use super::Ctx;
use crate::ledger::{catalog, materialize_recurring};
use crate::models::{Frequency, Kind, NEW_ID, RecurringTransaction};
use crate::store::{LedgerStore, SqliteStore};
use crate::utils::{arg, emit, fmt_money, id, opt_id, parse_decimal, pretty_table};

pub fn handle(store: &mut SqliteStore, ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let kind: Kind = arg(sub, "kind")?.parse()?;
            let frequency: Frequency = arg(sub, "frequency")?.parse()?;
            let due_day = sub
                .get_one::<u32>("due-day")
                .copied()
                .context("Missing --due-day")?;
            let item = catalog::create_recurring(
                store,
                ctx.user,
                RecurringTransaction {
                    id: NEW_ID,
                    user_id: ctx.user,
                    description: arg(sub, "description")?.to_string(),
                    amount: parse_decimal(arg(sub, "amount")?)?,
                    kind,
                    category_id: opt_id(sub, "category"),
                    due_day,
                    frequency,
                },
            )?;
            println!("Added recurring '{}' due on day {}", item.description, item.due_day);
        }
        Some(("list", sub)) => {
            let data = store.recurring_of(ctx.user)?;
            emit(sub, &data, || {
                let rows = data
                    .iter()
                    .map(|r| {
                        vec![
                            r.id.to_string(),
                            r.description.clone(),
                            fmt_money(&r.amount),
                            r.kind.to_string(),
                            r.due_day.to_string(),
                            r.frequency.as_str().to_string(),
                        ]
                    })
                    .collect();
                pretty_table(&["ID", "Description", "Amount", "Kind", "Day", "Frequency"], rows)
            })?;
        }
        Some(("rm", sub)) => {
            let item_id = id(sub, "id")?;
            catalog::delete_recurring(store, ctx.user, item_id)?;
            println!("Removed recurring {}", item_id);
        }
        Some(("book", sub)) => {
            let (month, year) = ctx.month_or_current(sub)?;
            let tx = materialize_recurring(store, ctx.user, id(sub, "id")?, month, year)?;
            println!(
                "Booked {} {} on {} (transaction {})",
                tx.kind,
                fmt_money(&tx.amount),
                tx.date,
                tx.id
            );
        }
        _ => {}
    }
    Ok(())
}
