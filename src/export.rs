// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{LedgerError, Result};
use crate::models::Transaction;

pub const CSV_HEADER: [&str; 6] = ["Date", "Type", "Amount", "Category", "Account", "Note"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("Unknown format: {} (use csv|json)", other)),
        }
    }
}

/// `Backup_2024-03-05.csv` style name for a backup taken on `today`.
pub fn backup_file_name(today: NaiveDate, format: ExportFormat) -> String {
    format!("Backup_{}.{}", today.format("%Y-%m-%d"), format.extension())
}

/// Fields containing commas, quotes or newlines are quoted.
pub fn write_csv<W: Write>(txs: &[Transaction], out: W) -> Result<()> {
    if txs.is_empty() {
        return Err(LedgerError::EmptyLedger);
    }
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(CSV_HEADER)?;
    for t in txs {
        wtr.write_record([
            t.day_key(),
            t.kind.to_string(),
            t.amount.to_string(),
            t.category.clone(),
            t.account.clone(),
            t.note.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(txs: &[Transaction], out: W) -> Result<()> {
    if txs.is_empty() {
        return Err(LedgerError::EmptyLedger);
    }
    serde_json::to_writer_pretty(out, txs)?;
    Ok(())
}

/// Writes the backup file. Nothing is created when the ledger is empty.
pub fn export_to_path(txs: &[Transaction], format: ExportFormat, path: &Path) -> Result<PathBuf> {
    if txs.is_empty() {
        return Err(LedgerError::EmptyLedger);
    }
    let file = std::fs::File::create(path)?;
    match format {
        ExportFormat::Csv => write_csv(txs, file)?,
        ExportFormat::Json => write_json(txs, file)?,
    }
    tracing::info!(path = %path.display(), count = txs.len(), "ledger exported");
    Ok(path.to_path_buf())
}
