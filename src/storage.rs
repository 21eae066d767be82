// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension, params};

use crate::error::{LedgerError, Result};
use crate::models::{Transaction, TransactionId};

pub const LEDGER_KEY: &str = "transactions";
/// Highest id ever handed out; survives deletes and clears.
pub const LAST_ID_KEY: &str = "last_id";

/// Whole-ledger persistence. Every save replaces the stored sequence.
pub trait Storage {
    fn load(&self) -> Result<Vec<Transaction>>;
    fn load_last_id(&self) -> Result<TransactionId>;
    /// Stores the sequence together with the id high-water mark.
    fn save(&mut self, records: &[Transaction], last_id: TransactionId) -> Result<()>;
    /// Erases every record. The id high-water mark is kept.
    fn clear(&mut self) -> Result<()>;
}

/// Ledger stored as one JSON array in the `kv` table.
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        SqliteStore { conn }
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?)
    }
}

impl Storage for SqliteStore<'_> {
    fn load(&self) -> Result<Vec<Transaction>> {
        match self.get(LEDGER_KEY)? {
            Some(s) => Ok(serde_json::from_str(&s)?),
            None => Ok(Vec::new()),
        }
    }

    fn load_last_id(&self) -> Result<TransactionId> {
        match self.get(LAST_ID_KEY)? {
            Some(s) => s.parse::<TransactionId>().map_err(|_| {
                LedgerError::Unavailable(format!("corrupt {} value '{}'", LAST_ID_KEY, s))
            }),
            None => Ok(TransactionId::default()),
        }
    }

    fn save(&mut self, records: &[Transaction], last_id: TransactionId) -> Result<()> {
        let value = serde_json::to_string(records)?;
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in [(LEDGER_KEY, value), (LAST_ID_KEY, last_id.to_string())] {
            tx.execute(
                "INSERT INTO kv(key, value) VALUES(?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value",
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key<>?1", params![LAST_ID_KEY])?;
        Ok(())
    }
}

/// In-process store. `set_failing(true)` makes every write fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<Transaction>,
    last_id: TransactionId,
    failing: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Transaction>) -> Self {
        MemoryStore {
            records,
            ..Self::default()
        }
    }

    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStore {
    fn load(&self) -> Result<Vec<Transaction>> {
        Ok(self.records.clone())
    }

    fn load_last_id(&self) -> Result<TransactionId> {
        Ok(self.last_id)
    }

    fn save(&mut self, records: &[Transaction], last_id: TransactionId) -> Result<()> {
        if self.failing {
            return Err(LedgerError::Unavailable("memory store is read-only".into()));
        }
        self.records = records.to_vec();
        self.last_id = last_id;
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.failing {
            return Err(LedgerError::Unavailable("memory store is read-only".into()));
        }
        self.records.clear();
        self.writes += 1;
        Ok(())
    }
}
