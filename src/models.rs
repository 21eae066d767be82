// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Stable identity of a transaction, assigned once when it is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub u64);

impl TransactionId {
    pub fn next(self) -> Self {
        TransactionId(self.0 + 1)
    }

    pub fn is_unassigned(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransactionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(TransactionId)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Budget,
    Expense,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Budget => "Budget",
            Kind::Expense => "Expense",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "budget" => Ok(Kind::Budget),
            "expense" => Ok(Kind::Expense),
            _ => Err(LedgerError::UnknownKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    // Legacy arrays carry no id; the ledger numbers them on load.
    #[serde(default)]
    pub id: TransactionId,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub amount: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub note: String,
}

impl Transaction {
    /// Year-month grouping key, e.g. `2024-03`.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Day grouping key, e.g. `2024-03-05`.
    pub fn day_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn draft(&self) -> TransactionDraft {
        TransactionDraft {
            date: self.date,
            kind: self.kind,
            amount: self.amount,
            category: self.category.clone(),
            account: self.account.clone(),
            note: self.note.clone(),
        }
    }
}

/// A validated transaction that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub kind: Kind,
    pub amount: Decimal,
    pub category: String,
    pub account: String,
    pub note: String,
}

impl TransactionDraft {
    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            date: self.date,
            kind: self.kind,
            amount: self.amount,
            category: self.category,
            account: self.account,
            note: self.note,
        }
    }
}

/// Raw form fields as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub account: String,
    pub note: String,
}

impl TransactionInput {
    pub fn validate(&self) -> Result<TransactionDraft> {
        Ok(TransactionDraft {
            date: parse_ledger_date(&self.date)?,
            kind: self.kind.parse()?,
            amount: parse_amount(&self.amount)?,
            category: self.category.clone(),
            account: self.account.clone(),
            note: self.note.clone(),
        })
    }
}

impl From<&Transaction> for TransactionInput {
    fn from(t: &Transaction) -> Self {
        TransactionInput {
            date: t.day_key(),
            kind: t.kind.to_string(),
            amount: t.amount.to_string(),
            category: t.category.clone(),
            account: t.account.clone(),
            note: t.note.clone(),
        }
    }
}

/// Accepts only zero-padded `YYYY-MM-DD` so that string order stays date order.
pub fn parse_ledger_date(s: &str) -> Result<NaiveDate> {
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| LedgerError::MalformedDate(s.to_string()))?;
    if d.format("%Y-%m-%d").to_string() != s {
        return Err(LedgerError::MalformedDate(s.to_string()));
    }
    Ok(d)
}

/// Exclusive upper bound for a single amount (10^15). Sums of any realistic
/// number of records stay far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

pub fn parse_amount(s: &str) -> Result<Decimal> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_| LedgerError::InvalidAmount(s.to_string()))?;
    check_amount(amount)?;
    Ok(amount)
}

/// Rejects negative amounts and amounts at or above [`MAX_AMOUNT`].
pub fn check_amount(amount: Decimal) -> Result<()> {
    if (amount.is_sign_negative() && !amount.is_zero()) || amount >= MAX_AMOUNT {
        return Err(LedgerError::InvalidAmount(amount.to_string()));
    }
    Ok(())
}
