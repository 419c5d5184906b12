// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::Ctx;
use crate::ledger::catalog;
use crate::models::{Asset, NEW_ID};
use crate::store::{LedgerStore, SqliteStore};
use crate::utils::{arg, emit, fmt_money, id, opt_arg, parse_decimal, pretty_table};

pub fn handle(store: &mut SqliteStore, ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let value = opt_arg(sub, "value").map(parse_decimal).transpose()?;
            let asset = catalog::create_asset(
                store,
                ctx.user,
                Asset {
                    id: NEW_ID,
                    user_id: ctx.user,
                    name: arg(sub, "name")?.to_string(),
                    r#type: arg(sub, "type")?.to_string(),
                    value,
                },
            )?;
            println!("Added asset '{}' (id {})", asset.name, asset.id);
        }
        Some(("list", sub)) => {
            let data = store.assets_of(ctx.user)?;
            emit(sub, &data, || {
                let rows = data
                    .iter()
                    .map(|a| {
                        vec![
                            a.id.to_string(),
                            a.name.clone(),
                            a.r#type.clone(),
                            a.value.as_ref().map(fmt_money).unwrap_or_else(|| "-".into()),
                        ]
                    })
                    .collect();
                pretty_table(&["ID", "Name", "Type", "Value"], rows)
            })?;
        }
        Some(("rm", sub)) => {
            let asset_id = id(sub, "id")?;
            catalog::delete_asset(store, ctx.user, asset_id)?;
            println!("Removed asset {}", asset_id);
        }
        _ => {}
    }
    Ok(())
}
