// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    CategoryShare, DayExpense, MonthFilter, PeriodSummary, category_shares, daily_summary,
    expense_by_day, monthly_summary,
};
use crate::config::Config;
use crate::ledger::Ledger;
use crate::storage::Storage;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table, resolve_month};
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

pub fn handle<S: Storage>(
    ledger: &Ledger<S>,
    cfg: &Config,
    name: &str,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<()> {
    match name {
        "status" => status(ledger, cfg, sub, today),
        "trend" => trend(ledger, cfg, sub, today),
        _ => Ok(()),
    }
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly: Option<Vec<PeriodSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<Vec<PeriodSummary>>,
}

#[derive(Debug, Serialize)]
pub struct TrendReport {
    pub month: Option<String>,
    pub expense_by_day: Vec<DayExpense>,
    pub categories: Vec<CategoryShare>,
}

pub fn status_report<S: Storage>(
    ledger: &Ledger<S>,
    cfg: &Config,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<StatusReport> {
    let filter = resolve_month(sub, cfg, today)?;
    let f = filter.as_ref();
    let monthly = (!sub.get_flag("daily-only")).then(|| monthly_summary(ledger.all(), f));
    let daily = (!sub.get_flag("monthly-only")).then(|| daily_summary(ledger.all(), f));
    Ok(StatusReport {
        month: filter.map(|m| m.to_string()),
        monthly,
        daily,
    })
}

pub fn trend_report<S: Storage>(
    ledger: &Ledger<S>,
    cfg: &Config,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<TrendReport> {
    let filter: Option<MonthFilter> = resolve_month(sub, cfg, today)?;
    let f = filter.as_ref();
    Ok(TrendReport {
        expense_by_day: expense_by_day(ledger.all(), f),
        categories: category_shares(ledger.all(), f),
        month: filter.map(|m| m.to_string()),
    })
}

fn period_rows(rows: &[PeriodSummary]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| {
            vec![
                r.period.clone(),
                fmt_amount(&r.budget),
                fmt_amount(&r.expense),
                fmt_amount(&r.balance),
            ]
        })
        .collect()
}

fn status<S: Storage>(
    ledger: &Ledger<S>,
    cfg: &Config,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<()> {
    let report = status_report(ledger, cfg, sub, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    if let Some(monthly) = &report.monthly {
        println!(
            "{}",
            pretty_table(
                &["Month", "Budget", "Expense", "Balance"],
                period_rows(monthly)
            )
        );
    }
    if let Some(daily) = &report.daily {
        println!(
            "{}",
            pretty_table(&["Day", "Budget", "Expense", "Balance"], period_rows(daily))
        );
    }
    Ok(())
}

fn trend<S: Storage>(
    ledger: &Ledger<S>,
    cfg: &Config,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<()> {
    let report = trend_report(ledger, cfg, sub, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let days = report
        .expense_by_day
        .iter()
        .map(|d| vec![d.date.clone(), fmt_amount(&d.amount)])
        .collect();
    println!("{}", pretty_table(&["Day", "Expense"], days));
    let cats = report
        .categories
        .iter()
        .map(|c| {
            vec![
                c.category.clone(),
                fmt_amount(&c.amount),
                format!("{:.1}%", c.share),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Expense", "Share"], cats));
    Ok(())
}
