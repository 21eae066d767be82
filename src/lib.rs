// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod session;
pub mod storage;
pub mod utils;

pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use models::{Kind, Transaction, TransactionDraft, TransactionId, TransactionInput};
pub use storage::{MemoryStore, SqliteStore, Storage};
