// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::Ctx;
use crate::ledger::{catalog, investment_summary};
use crate::models::{Investment, NEW_ID};
use crate::store::SqliteStore;
use crate::utils::{arg, emit, fmt_money, fmt_percent, id, parse_decimal, pretty_table};

fn position(ctx: &Ctx, m: &clap::ArgMatches) -> Result<Investment> {
    Ok(Investment {
        id: NEW_ID,
        user_id: ctx.user,
        name: arg(m, "name")?.to_string(),
        r#type: arg(m, "type")?.to_string(),
        invested_amount: parse_decimal(arg(m, "invested")?)?,
        current_value: parse_decimal(arg(m, "current")?)?,
    })
}

pub fn handle(store: &mut SqliteStore, ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let inv = catalog::create_investment(store, ctx.user, position(ctx, sub)?)?;
            println!("Added investment '{}' (id {})", inv.name, inv.id);
        }
        Some(("update", sub)) => {
            let inv_id = id(sub, "id")?;
            let inv = catalog::update_investment(store, ctx.user, inv_id, position(ctx, sub)?)?;
            println!("Updated investment {} (gain {})", inv.id, fmt_money(&inv.gain()));
        }
        Some(("list", sub)) => {
            let summary = investment_summary(store, ctx.user)?;
            emit(sub, &summary, || {
                let mut rows: Vec<Vec<String>> = summary
                    .positions
                    .iter()
                    .map(|i| {
                        vec![
                            i.id.to_string(),
                            i.name.clone(),
                            i.r#type.clone(),
                            fmt_money(&i.invested_amount),
                            fmt_money(&i.current_value),
                            fmt_money(&i.gain()),
                        ]
                    })
                    .collect();
                rows.push(vec![
                    String::new(),
                    "Total".into(),
                    fmt_percent(&summary.gain_percentage),
                    fmt_money(&summary.invested),
                    fmt_money(&summary.current),
                    fmt_money(&summary.gain),
                ]);
                pretty_table(&["ID", "Name", "Type", "Invested", "Current", "Gain"], rows)
            })?;
        }
        Some(("rm", sub)) => {
            let inv_id = id(sub, "id")?;
            catalog::delete_investment(store, ctx.user, inv_id)?;
            println!("Removed investment {}", inv_id);
        }
        _ => {}
    }
    Ok(())
}
