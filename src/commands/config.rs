// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::config::{EngineConfig, set_setting};
use crate::store::SqliteStore;
use crate::utils::{arg, emit, pretty_table};

pub fn handle(store: &SqliteStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let cfg = EngineConfig::load(store.conn())?;
            emit(sub, &cfg, || {
                let rows = vec![
                    vec!["spending_pace_days".into(), cfg.spending_pace_days.to_string()],
                    vec!["upcoming_window_days".into(), cfg.upcoming_window_days.to_string()],
                    vec!["recent_window_days".into(), cfg.recent_window_days.to_string()],
                    vec!["recent_limit".into(), cfg.recent_limit.to_string()],
                    vec!["top_categories_limit".into(), cfg.top_categories_limit.to_string()],
                    vec!["uncategorized_label".into(), cfg.uncategorized_label.clone()],
                ];
                pretty_table(&["Key", "Value"], rows)
            })?;
        }
        Some(("set", sub)) => {
            let key = arg(sub, "key")?;
            let value = arg(sub, "value")?;
            set_setting(store.conn(), key, value)?;
            println!("{} = {}", key, value);
        }
        _ => {}
    }
    Ok(())
}
