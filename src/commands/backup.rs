// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;

use crate::config::Config;
use crate::export::{ExportFormat, backup_file_name, export_to_path};
use crate::ledger::Ledger;
use crate::storage::Storage;

/// Writes the backup file and returns where it went.
pub fn export<S: Storage>(
    ledger: &Ledger<S>,
    cfg: &Config,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<PathBuf> {
    let fmt = sub
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("csv")
        .parse::<ExportFormat>()
        .map_err(|e| anyhow!(e))?;
    let out = match sub.get_one::<PathBuf>("out") {
        Some(p) => p.clone(),
        None => cfg.export_dir().join(backup_file_name(today, fmt)),
    };
    let path = export_to_path(ledger.all(), fmt, &out)
        .with_context(|| format!("Export to {} failed", out.display()))?;
    println!("Exported {} transactions to {}", ledger.len(), path.display());
    Ok(path)
}

/// Erases the store without loading it first, so a ledger that no longer
/// parses can still be wiped.
pub fn clear<S: Storage>(store: S, sub: &clap::ArgMatches) -> Result<Ledger<S>> {
    if !sub.get_flag("yes") {
        bail!("Refusing to clear all transactions without --yes");
    }
    let ledger = Ledger::reset(store).context("Clearing the ledger failed")?;
    println!("All data cleared!");
    Ok(ledger)
}
