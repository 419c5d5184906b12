// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(c: Command) -> Command {
    c.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg(name: &'static str, required: bool) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(value_parser!(i64))
        .required(required)
}

fn text_arg(name: &'static str, required: bool) -> Arg {
    Arg::new(name).long(name).required(required)
}

fn day_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(value_parser!(u32).range(1..=31))
        .required(true)
}

fn month_arg(required: bool) -> Arg {
    text_arg("month", required).help("YYYY-MM")
}

fn investment_fields(c: Command) -> Command {
    c.arg(text_arg("name", true))
        .arg(text_arg("type", true))
        .arg(text_arg("invested", true).help("Amount put in"))
        .arg(text_arg("current", true).help("Current market value"))
}

fn tx_fields(c: Command, required: bool) -> Command {
    c.arg(text_arg("date", required).help("YYYY-MM-DD"))
        .arg(text_arg("amount", required).help("Non-negative amount"))
        .arg(text_arg("kind", required).help("income | expense"))
        .arg(text_arg("description", false))
        .arg(id_arg("account", false).conflicts_with("card"))
        .arg(id_arg("card", false))
        .arg(id_arg("category", false))
}

pub fn build_cli() -> Command {
    Command::new("pennywise")
        .about("Personal finance ledger: accounts, cards, budgets, net worth and reports")
        .version(clap::crate_version!())
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .env("PENNYWISE_USER")
                .value_parser(value_parser!(i64))
                .help("Acting user id"),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("PENNYWISE_DB")
                .help("Database file (defaults to the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .arg(text_arg("name", true))
                        .arg(text_arg("type", true))
                        .arg(text_arg("bank", false))
                        .arg(text_arg("initial", false).help("Initial balance")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("update")
                        .arg(id_arg("id", true))
                        .arg(text_arg("name", true))
                        .arg(text_arg("type", true))
                        .arg(text_arg("bank", false))
                        .arg(text_arg("initial", false)),
                )
                .subcommand(Command::new("rm").arg(id_arg("id", true))),
        )
        .subcommand(
            Command::new("card")
                .about("Manage credit cards")
                .subcommand(
                    Command::new("add")
                        .arg(text_arg("name", true))
                        .arg(text_arg("limit", true))
                        .arg(day_arg("closing-day"))
                        .arg(day_arg("due-day"))
                        .arg(text_arg("last-four", false)),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("update")
                        .arg(id_arg("id", true))
                        .arg(text_arg("name", true))
                        .arg(text_arg("limit", true))
                        .arg(day_arg("closing-day"))
                        .arg(day_arg("due-day"))
                        .arg(text_arg("last-four", false)),
                )
                .subcommand(Command::new("rm").arg(id_arg("id", true))),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(text_arg("name", true))
                        .arg(text_arg("kind", true).help("income | expense")),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg("id", true))),
        )
        .subcommand(
            Command::new("asset")
                .about("Manage non-liquid assets")
                .subcommand(
                    Command::new("add")
                        .arg(text_arg("name", true))
                        .arg(text_arg("type", true))
                        .arg(text_arg("value", false)),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg("id", true))),
        )
        .subcommand(
            Command::new("investment")
                .about("Track investments and their gain")
                .subcommand(investment_fields(Command::new("add")))
                .subcommand(json_args(Command::new("list")))
                .subcommand(investment_fields(
                    Command::new("update").arg(id_arg("id", true)),
                ))
                .subcommand(Command::new("rm").arg(id_arg("id", true))),
        )
        .subcommand(
            Command::new("recurring")
                .about("Manage recurring templates")
                .subcommand(
                    Command::new("add")
                        .arg(text_arg("description", true))
                        .arg(text_arg("amount", true))
                        .arg(text_arg("kind", true))
                        .arg(day_arg("due-day"))
                        .arg(text_arg("frequency", false).default_value("monthly"))
                        .arg(id_arg("category", false)),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg("id", true)))
                .subcommand(
                    Command::new("book")
                        .about("Create a transaction from a template")
                        .arg(id_arg("id", true))
                        .arg(month_arg(false)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(tx_fields(
                    Command::new("add").arg(text_arg("external-id", false)),
                    true,
                ))
                .subcommand(tx_fields(Command::new("edit").arg(id_arg("id", true)), true))
                .subcommand(Command::new("rm").arg(id_arg("id", true)))
                .subcommand(json_args(
                    Command::new("list")
                        .arg(month_arg(false))
                        .arg(id_arg("category", false))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly category budgets")
                .subcommand(
                    Command::new("set")
                        .arg(id_arg("category", true))
                        .arg(month_arg(true))
                        .arg(text_arg("amount", true)),
                )
                .subcommand(json_args(Command::new("progress").arg(month_arg(false))))
                .subcommand(Command::new("rm").arg(id_arg("id", true))),
        )
        .subcommand(
            Command::new("report")
                .about("Cash flow and category reports")
                .subcommand(json_args(
                    Command::new("cashflow")
                        .arg(text_arg("from", false).help("YYYY-MM-DD, default first of month"))
                        .arg(text_arg("to", false).help("YYYY-MM-DD, default end of month")),
                ))
                .subcommand(json_args(Command::new("by-category").arg(month_arg(false)))),
        )
        .subcommand(json_args(
            Command::new("networth").about("Accounts + assets, with month-over-month change"),
        ))
        .subcommand(json_args(
            Command::new("dashboard").about("Spending pace, top categories, upcoming items"),
        ))
        .subcommand(json_args(
            Command::new("doctor")
                .about("Check card limits against the ledger")
                .arg(
                    Arg::new("fix")
                        .long("fix")
                        .action(ArgAction::SetTrue)
                        .help("Overwrite drifted limits with the ledger sum"),
                ),
        ))
        .subcommand(
            Command::new("config")
                .about("Engine settings")
                .subcommand(json_args(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(text_arg("key", true))
                        .arg(text_arg("value", true)),
                ),
        )
}
