// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn month_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("month")
            .long("month")
            .short('m')
            .value_name("YYYY-MM")
            .help("Only include this month"),
    )
    .arg(
        Arg::new("all")
            .long("all")
            .action(ArgAction::SetTrue)
            .conflicts_with("month")
            .help("Include every month, ignoring the default-month setting"),
    )
}

fn tx_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("date")
            .long("date")
            .value_name("YYYY-MM-DD")
            .required(required),
    )
    .arg(
        Arg::new("type")
            .long("type")
            .short('t')
            .value_name("Budget|Expense")
            .required(required),
    )
    .arg(Arg::new("amount").long("amount").short('a').required(required))
    .arg(Arg::new("category").long("category").short('c'))
    .arg(Arg::new("account").long("account"))
    .arg(Arg::new("note").long("note").short('n'))
}

pub fn build_cli() -> Command {
    Command::new("tallybook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Budget and expense ledger")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Database file (default: $TALLYBOOK_DB or the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create the database if needed"))
        .subcommand(
            Command::new("tx")
                .about("Record and edit transactions")
                .subcommand(tx_fields(
                    Command::new("add").about("Record a budget or expense entry"),
                    true,
                ))
                .subcommand(json_args(month_args(
                    Command::new("list").about("List transactions in ledger order"),
                )))
                .subcommand(json_args(
                    Command::new("show")
                        .about("Show one transaction")
                        .arg(Arg::new("id").required(true)),
                ))
                .subcommand(tx_fields(
                    Command::new("update")
                        .about("Edit a transaction; omitted fields keep their value")
                        .arg(Arg::new("id").required(true)),
                    false,
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(json_args(month_args(
            Command::new("status")
                .about("Monthly and daily budget/expense summary")
                .arg(
                    Arg::new("daily-only")
                        .long("daily-only")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("monthly-only"),
                )
                .arg(
                    Arg::new("monthly-only")
                        .long("monthly-only")
                        .action(ArgAction::SetTrue),
                ),
        )))
        .subcommand(json_args(month_args(
            Command::new("trend").about("Expense per day and share per category"),
        )))
        .subcommand(
            Command::new("export")
                .about("Write a backup of all transactions")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Output file (default: Backup_<date>.<ext> in export-dir)"),
                ),
        )
        .subcommand(
            Command::new("clear")
                .about("Delete all transactions")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Confirm the irreversible clear"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change settings")
                .subcommand(Command::new("get").arg(Arg::new("key")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
}
