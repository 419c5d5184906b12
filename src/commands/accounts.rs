// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use super::Ctx;
use crate::ledger::{accounts_with_balances, catalog};
use crate::models::{Account, NEW_ID};
use crate::store::SqliteStore;
use crate::utils::{arg, emit, fmt_money, id, opt_arg, parse_decimal, pretty_table};

pub fn handle(store: &mut SqliteStore, ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let account = catalog::create_account(store, ctx.user, from_args(ctx, sub)?)?;
            println!("Added account '{}' (id {})", account.name, account.id);
        }
        Some(("list", sub)) => {
            let data = accounts_with_balances(store, ctx.user)?;
            emit(sub, &data, || {
                let rows = data
                    .iter()
                    .map(|a| {
                        vec![
                            a.account.id.to_string(),
                            a.account.name.clone(),
                            a.account.r#type.clone(),
                            a.account.bank.clone().unwrap_or_default(),
                            fmt_money(&a.account.initial_balance),
                            fmt_money(&a.current_balance),
                        ]
                    })
                    .collect();
                pretty_table(&["ID", "Name", "Type", "Bank", "Initial", "Balance"], rows)
            })?;
        }
        Some(("update", sub)) => {
            let account_id = id(sub, "id")?;
            let account =
                catalog::update_account(store, ctx.user, account_id, from_args(ctx, sub)?)?;
            println!("Updated account '{}'", account.name);
        }
        Some(("rm", sub)) => {
            let account_id = id(sub, "id")?;
            catalog::delete_account(store, ctx.user, account_id)?;
            println!("Removed account {} and its transactions", account_id);
        }
        _ => {}
    }
    Ok(())
}

fn from_args(ctx: &Ctx, sub: &clap::ArgMatches) -> Result<Account> {
    let initial_balance = match opt_arg(sub, "initial") {
        Some(s) => parse_decimal(s)?,
        None => Decimal::ZERO,
    };
    Ok(Account {
        id: NEW_ID,
        user_id: ctx.user,
        name: arg(sub, "name")?.to_string(),
        bank: opt_arg(sub, "bank").map(str::to_string),
        r#type: arg(sub, "type")?.to_string(),
        initial_balance,
    })
}
