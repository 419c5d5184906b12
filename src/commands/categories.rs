// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::Ctx;
use crate::ledger::catalog;
use crate::models::{Category, Kind, NEW_ID};
use crate::store::{LedgerStore, SqliteStore};
use crate::utils::{arg, emit, id, pretty_table};

pub fn handle(store: &mut SqliteStore, ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let kind: Kind = arg(sub, "kind")?.parse()?;
            let category = catalog::create_category(
                store,
                ctx.user,
                Category {
                    id: NEW_ID,
                    user_id: ctx.user,
                    name: arg(sub, "name")?.to_string(),
                    kind,
                },
            )?;
            println!("Added category '{}' (id {})", category.name, category.id);
        }
        Some(("list", sub)) => {
            let data = store.categories_of(ctx.user)?;
            emit(sub, &data, || {
                let rows = data
                    .iter()
                    .map(|c| vec![c.id.to_string(), c.name.clone(), c.kind.to_string()])
                    .collect();
                pretty_table(&["ID", "Name", "Kind"], rows)
            })?;
        }
        Some(("rm", sub)) => {
            let category_id = id(sub, "id")?;
            catalog::delete_category(store, ctx.user, category_id)?;
            println!("Removed category {}", category_id);
        }
        _ => {}
    }
    Ok(())
}
