// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

use crate::models::TransactionId;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Failures raised by the ledger, its storage and the derived views.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Position {position} is out of range (ledger holds {len} transactions)")]
    OutOfRange { position: usize, len: usize },
    #[error("Transaction {0} not found")]
    NotFound(TransactionId),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    MalformedDate(String),
    #[error("Unknown transaction type '{0}', expected Budget or Expense")]
    UnknownKind(String),
    #[error("Invalid amount '{0}', expected a non-negative decimal below 10^15")]
    InvalidAmount(String),
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
    #[error("Selected transaction {0} no longer exists")]
    StaleSelection(TransactionId),
    #[error("No transaction is selected")]
    NothingSelected,
    #[error("No data to export")]
    EmptyLedger,
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
