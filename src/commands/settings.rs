// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Config, KEYS, set_setting};
use crate::utils::pretty_table;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let cfg = Config::load(conn)?;
            match sub.get_one::<String>("key") {
                Some(key) => println!("{}", cfg.value_of(key)?),
                None => {
                    let mut data = Vec::new();
                    for key in KEYS {
                        data.push(vec![key.to_string(), cfg.value_of(key)?]);
                    }
                    println!("{}", pretty_table(&["Setting", "Value"], data));
                }
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").context("missing key")?;
            let value = sub.get_one::<String>("value").context("missing value")?;
            set_setting(conn, key, value)?;
            println!("Set {} = {}", key, value);
        }
        _ => {}
    }
    Ok(())
}
