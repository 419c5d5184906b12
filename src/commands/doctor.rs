// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::Ctx;
use crate::ledger::reconcile_card_limits;
use crate::store::SqliteStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle(store: &mut SqliteStore, ctx: &Ctx, m: &clap::ArgMatches) -> Result<()> {
    let fix = m.get_flag("fix");
    let drifts = reconcile_card_limits(store, ctx.user, fix)?;
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &drifts)? {
        return Ok(());
    }

    if drifts.is_empty() {
        println!("doctor: no issues found");
        return Ok(());
    }
    let rows = drifts
        .iter()
        .map(|d| {
            vec![
                "card_limit_drift".into(),
                format!("{} ({})", d.name, d.card_id),
                fmt_money(&d.stored),
                fmt_money(&d.derived),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Issue", "Card", "Stored", "Ledger"], rows));
    if fix {
        println!("Repaired {} card(s)", drifts.len());
    } else {
        println!("Run with --fix to overwrite stored limits with the ledger sums");
    }
    Ok(())
}
