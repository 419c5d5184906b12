// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use pennywise::commands::{self, Ctx};
use pennywise::store::SqliteStore;
use pennywise::{cli, db};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pennywise=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_arg = matches.get_one::<String>("db").map(PathBuf::from);
    let conn = db::open_or_init(db_arg.as_deref())?;
    let mut store = SqliteStore::new(conn)?;

    let ctx = || -> Result<Ctx> {
        let user = matches
            .get_one::<i64>("user")
            .copied()
            .context("No user given; pass --user or set PENNYWISE_USER")?;
        Ok(Ctx {
            user,
            today: chrono::Local::now().date_naive(),
        })
    };

    match matches.subcommand() {
        Some(("init", _)) => {
            let path = match db_arg {
                Some(p) => p,
                None => db::db_path()?,
            };
            println!("Database initialized at {}", path.display());
        }
        Some(("account", sub)) => commands::accounts::handle(&mut store, &ctx()?, sub)?,
        Some(("card", sub)) => commands::cards::handle(&mut store, &ctx()?, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut store, &ctx()?, sub)?,
        Some(("asset", sub)) => commands::assets::handle(&mut store, &ctx()?, sub)?,
        Some(("investment", sub)) => commands::investments::handle(&mut store, &ctx()?, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(&mut store, &ctx()?, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut store, &ctx()?, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut store, &ctx()?, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, &ctx()?, sub)?,
        Some(("networth", sub)) => commands::dashboard::networth(&store, &ctx()?, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&store, &ctx()?, sub)?,
        Some(("doctor", sub)) => commands::doctor::handle(&mut store, &ctx()?, sub)?,
        Some(("config", sub)) => commands::config::handle(&store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
