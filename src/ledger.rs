// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, Result};
use crate::models::{Transaction, TransactionDraft, TransactionId, check_amount};
use crate::storage::Storage;

/// Ordered transaction ledger backed by a [`Storage`].
///
/// Each mutation builds the next sequence, persists it, and only then
/// replaces the in-memory copy, so a failed write changes nothing.
pub struct Ledger<S: Storage> {
    records: Vec<Transaction>,
    last_id: TransactionId,
    store: S,
}

impl<S: Storage> Ledger<S> {
    pub fn open(store: S) -> Result<Self> {
        let mut records = store.load()?;
        for t in &records {
            check_amount(t.amount)?;
        }
        // Never below the stored mark, so deleted or cleared ids stay retired.
        let mut last_id = records
            .iter()
            .map(|t| t.id)
            .max()
            .unwrap_or_default()
            .max(store.load_last_id()?);
        let mut renumbered = 0usize;
        for t in records.iter_mut().filter(|t| t.id.is_unassigned()) {
            last_id = last_id.next();
            t.id = last_id;
            renumbered += 1;
        }
        if renumbered > 0 {
            tracing::info!(renumbered, "assigned ids to legacy transactions");
        }
        tracing::debug!(count = records.len(), "ledger loaded");
        Ok(Ledger {
            records,
            last_id,
            store,
        })
    }

    /// Erases the store without reading it, so an unreadable ledger can
    /// still be wiped.
    pub fn reset(mut store: S) -> Result<Self> {
        store.clear()?;
        let last_id = store.load_last_id()?;
        tracing::info!("ledger reset");
        Ok(Ledger {
            records: Vec::new(),
            last_id,
            store,
        })
    }

    pub fn all(&self) -> &[Transaction] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.records.iter().find(|t| t.id == id)
    }

    pub fn position_of(&self, id: TransactionId) -> Option<usize> {
        self.records.iter().position(|t| t.id == id)
    }

    /// Appends a record and returns its new id.
    pub fn add(&mut self, draft: TransactionDraft) -> Result<TransactionId> {
        let id = self.last_id.next();
        let mut next = self.records.clone();
        next.push(draft.into_transaction(id));
        self.commit(next, id)?;
        self.last_id = id;
        tracing::debug!(%id, "transaction added");
        Ok(id)
    }

    /// Replaces the record at `position`, keeping its id.
    pub fn update(&mut self, position: usize, draft: TransactionDraft) -> Result<()> {
        self.check_bounds(position)?;
        let mut next = self.records.clone();
        let id = next[position].id;
        next[position] = draft.into_transaction(id);
        self.commit(next, self.last_id)?;
        tracing::debug!(%id, position, "transaction updated");
        Ok(())
    }

    /// Removes the record at `position`; later positions shift down by one.
    pub fn delete(&mut self, position: usize) -> Result<Transaction> {
        self.check_bounds(position)?;
        let mut next = self.records.clone();
        let removed = next.remove(position);
        self.commit(next, self.last_id)?;
        tracing::debug!(id = %removed.id, position, "transaction deleted");
        Ok(removed)
    }

    pub fn update_by_id(&mut self, id: TransactionId, draft: TransactionDraft) -> Result<()> {
        let position = self.position_of(id).ok_or(LedgerError::NotFound(id))?;
        self.update(position, draft)
    }

    pub fn delete_by_id(&mut self, id: TransactionId) -> Result<Transaction> {
        let position = self.position_of(id).ok_or(LedgerError::NotFound(id))?;
        self.delete(position)
    }

    /// Drops every record and erases the store. The id high-water mark is
    /// kept, so ids from before the clear are never handed out again.
    pub fn clear(&mut self) -> Result<()> {
        // Legacy ids numbered at load are not stored yet; record the mark first.
        self.store.save(&self.records, self.last_id)?;
        self.store.clear()?;
        let dropped = self.records.len();
        self.records.clear();
        tracing::info!(dropped, "ledger cleared");
        Ok(())
    }

    fn check_bounds(&self, position: usize) -> Result<()> {
        if position >= self.records.len() {
            return Err(LedgerError::OutOfRange {
                position,
                len: self.records.len(),
            });
        }
        Ok(())
    }

    fn commit(&mut self, next: Vec<Transaction>, last_id: TransactionId) -> Result<()> {
        if let Err(e) = self.store.save(&next, last_id) {
            tracing::warn!(error = %e, "ledger write failed; keeping previous state");
            return Err(e);
        }
        self.records = next;
        Ok(())
    }
}
