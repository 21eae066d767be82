// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, Result};
use crate::ledger::Ledger;
use crate::models::{TransactionId, TransactionInput};
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing(TransactionId),
}

/// What a successful submit did to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    Added(TransactionId),
    Updated(TransactionId),
}

/// Tracks which record the form is editing. Records are referenced by id,
/// so adds and deletes elsewhere never redirect an edit to another record.
#[derive(Debug, Default)]
pub struct EditSession {
    state: EditState,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// Enters `Editing` and returns the form contents for the record.
    pub fn select<S: Storage>(
        &mut self,
        ledger: &Ledger<S>,
        id: TransactionId,
    ) -> Result<TransactionInput> {
        let t = ledger.get(id).ok_or(LedgerError::NotFound(id))?;
        self.state = EditState::Editing(id);
        Ok(TransactionInput::from(t))
    }

    pub fn cancel(&mut self) {
        self.state = EditState::Idle;
    }

    /// Adds when idle, updates the selected record when editing.
    /// Invalid input leaves the session where it was.
    pub fn submit<S: Storage>(
        &mut self,
        ledger: &mut Ledger<S>,
        input: &TransactionInput,
    ) -> Result<Submitted> {
        let draft = input.validate()?;
        match self.state {
            EditState::Idle => Ok(Submitted::Added(ledger.add(draft)?)),
            EditState::Editing(id) => {
                let id = self.ensure_live(ledger, id)?;
                ledger.update_by_id(id, draft)?;
                self.state = EditState::Idle;
                Ok(Submitted::Updated(id))
            }
        }
    }

    pub fn delete<S: Storage>(&mut self, ledger: &mut Ledger<S>) -> Result<TransactionId> {
        let EditState::Editing(id) = self.state else {
            return Err(LedgerError::NothingSelected);
        };
        let id = self.ensure_live(ledger, id)?;
        ledger.delete_by_id(id)?;
        self.state = EditState::Idle;
        Ok(id)
    }

    fn ensure_live<S: Storage>(
        &mut self,
        ledger: &Ledger<S>,
        id: TransactionId,
    ) -> Result<TransactionId> {
        if ledger.get(id).is_none() {
            tracing::warn!(%id, "selection went stale; returning to idle");
            self.state = EditState::Idle;
            return Err(LedgerError::StaleSelection(id));
        }
        Ok(id)
    }
}
