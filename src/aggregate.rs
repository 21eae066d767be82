// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only summaries derived from a ledger snapshot.
//!
//! Every function here is pure over `&[Transaction]` and an optional month
//! filter. Month and day keys are ISO strings, so sorting them lexically sorts
//! them chronologically.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, Result};
use crate::models::{Kind, Transaction};

/// A `YYYY-MM` month restricting which transactions take part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthFilter(String);

impl MonthFilter {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        date.format("%Y-%m").to_string() == self.0
    }

    pub fn from_date(date: NaiveDate) -> Self {
        MonthFilter(date.format("%Y-%m").to_string())
    }
}

impl FromStr for MonthFilter {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let d = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map_err(|_| LedgerError::InvalidMonth(s.to_string()))?;
        if d.format("%Y-%m").to_string() != s {
            return Err(LedgerError::InvalidMonth(s.to_string()));
        }
        Ok(MonthFilter(s.to_string()))
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Budget and expense sums for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub budget: Decimal,
    pub expense: Decimal,
}

impl Totals {
    pub fn record(&mut self, kind: Kind, amount: Decimal) {
        match kind {
            Kind::Budget => self.budget += amount,
            Kind::Expense => self.expense += amount,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.budget - self.expense
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub period: String,
    pub budget: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayExpense {
    pub date: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryExpense {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    /// Percentage of the expense total, one decimal place.
    pub share: Decimal,
}

fn in_filter<'a>(
    txs: &'a [Transaction],
    filter: Option<&'a MonthFilter>,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    txs.iter()
        .filter(move |t| filter.is_none_or(|f| f.matches(t.date)))
}

fn summarize<F>(txs: &[Transaction], filter: Option<&MonthFilter>, key: F) -> Vec<PeriodSummary>
where
    F: Fn(&Transaction) -> String,
{
    let mut groups: BTreeMap<String, Totals> = BTreeMap::new();
    for t in in_filter(txs, filter) {
        groups.entry(key(t)).or_default().record(t.kind, t.amount);
    }
    groups
        .into_iter()
        .map(|(period, totals)| PeriodSummary {
            period,
            budget: totals.budget,
            expense: totals.expense,
            balance: totals.balance(),
        })
        .collect()
}

/// One row per year-month, ascending.
pub fn monthly_summary(txs: &[Transaction], filter: Option<&MonthFilter>) -> Vec<PeriodSummary> {
    summarize(txs, filter, Transaction::month_key)
}

/// One row per calendar day, ascending.
pub fn daily_summary(txs: &[Transaction], filter: Option<&MonthFilter>) -> Vec<PeriodSummary> {
    summarize(txs, filter, Transaction::day_key)
}

pub fn expense_by_day(txs: &[Transaction], filter: Option<&MonthFilter>) -> Vec<DayExpense> {
    let mut days: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in in_filter(txs, filter).filter(|t| t.kind == Kind::Expense) {
        *days.entry(t.day_key()).or_insert(Decimal::ZERO) += t.amount;
    }
    days.into_iter()
        .map(|(date, amount)| DayExpense { date, amount })
        .collect()
}

/// Expense totals per category in the order each category first appears.
/// Category labels are used verbatim, so `""` and `" "` are distinct groups.
pub fn expense_by_category(
    txs: &[Transaction],
    filter: Option<&MonthFilter>,
) -> Vec<CategoryExpense> {
    let mut out: Vec<CategoryExpense> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for t in in_filter(txs, filter).filter(|t| t.kind == Kind::Expense) {
        match index.get(t.category.as_str()) {
            Some(&i) => out[i].amount += t.amount,
            None => {
                index.insert(&t.category, out.len());
                out.push(CategoryExpense {
                    category: t.category.clone(),
                    amount: t.amount,
                });
            }
        }
    }
    out
}

pub fn category_shares(txs: &[Transaction], filter: Option<&MonthFilter>) -> Vec<CategoryShare> {
    let by_cat = expense_by_category(txs, filter);
    let total: Decimal = by_cat.iter().map(|c| c.amount).sum();
    by_cat
        .into_iter()
        .map(|c| {
            let share = if total.is_zero() {
                Decimal::ZERO
            } else {
                (c.amount * Decimal::ONE_HUNDRED / total).round_dp(1)
            };
            CategoryShare {
                category: c.category,
                amount: c.amount,
                share,
            }
        })
        .collect()
}
