// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;

use tallybook::config::Config;
use tallybook::storage::SqliteStore;
use tallybook::{Ledger, cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = db::db_path(matches.get_one::<PathBuf>("db").map(PathBuf::as_path))?;
    let conn = db::open_or_init(&path)?;
    let cfg = Config::load(&conn)?;
    // init, config and clear must work even when the stored ledger is unreadable
    let open = || Ledger::open(SqliteStore::new(&conn));
    let today = chrono::Local::now().date_naive();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut open()?, &cfg, sub, today)?,
        Some((name @ ("status" | "trend"), sub)) => {
            commands::reports::handle(&open()?, &cfg, name, sub, today)?
        }
        Some(("export", sub)) => {
            commands::backup::export(&open()?, &cfg, sub, today)?;
        }
        Some(("clear", sub)) => {
            commands::backup::clear(SqliteStore::new(&conn), sub)?;
        }
        Some(("config", sub)) => commands::settings::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
