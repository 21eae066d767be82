// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Once;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::aggregate::MonthFilter;
use crate::config::{Config, DefaultMonth};
use crate::models::TransactionId;

static TRACING_INIT: Once = Once::new();

/// Installs the stderr subscriber. `RUST_LOG` overrides the `tallybook=warn` default.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("tallybook=warn"));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

pub fn parse_month(s: &str) -> Result<MonthFilter> {
    Ok(s.parse::<MonthFilter>()?)
}

pub fn parse_id(s: &str) -> Result<TransactionId> {
    s.parse::<TransactionId>()
        .with_context(|| format!("Invalid transaction id '{}'", s))
}

pub fn fmt_amount(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

/// Month filter for a report: `--all` wins, then `--month`, then the configured default.
pub fn resolve_month(
    sub: &clap::ArgMatches,
    cfg: &Config,
    today: NaiveDate,
) -> Result<Option<MonthFilter>> {
    if sub.get_flag("all") {
        return Ok(None);
    }
    if let Some(m) = sub.get_one::<String>("month") {
        return Ok(Some(parse_month(m)?));
    }
    Ok(match cfg.default_month {
        DefaultMonth::All => None,
        DefaultMonth::Current => Some(MonthFilter::from_date(today)),
    })
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
