// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::ledger::Ledger;
use crate::models::{Transaction, TransactionInput};
use crate::session::{EditSession, Submitted};
use crate::storage::Storage;
use crate::utils::{fmt_amount, maybe_print_json, parse_id, pretty_table, resolve_month};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

pub fn handle<S: Storage>(
    ledger: &mut Ledger<S>,
    cfg: &Config,
    m: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, cfg, sub, today)?,
        Some(("show", sub)) => show(ledger, sub)?,
        Some(("update", sub)) => update(ledger, sub)?,
        Some(("rm", sub)) => remove(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn arg<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a String> {
    sub.get_one::<String>(name)
}

/// Form contents from `tx add` flags; optional text fields default to empty.
pub fn input_from_args(sub: &clap::ArgMatches) -> TransactionInput {
    let field = |name: &str| arg(sub, name).cloned().unwrap_or_default();
    TransactionInput {
        date: field("date"),
        kind: field("type"),
        amount: field("amount"),
        category: field("category"),
        account: field("account"),
        note: field("note"),
    }
}

/// Overwrites only the fields given on the command line.
pub fn overlay_args(input: &mut TransactionInput, sub: &clap::ArgMatches) {
    let targets: [(&str, &mut String); 6] = [
        ("date", &mut input.date),
        ("type", &mut input.kind),
        ("amount", &mut input.amount),
        ("category", &mut input.category),
        ("account", &mut input.account),
        ("note", &mut input.note),
    ];
    for (name, slot) in targets {
        if let Some(v) = arg(sub, name) {
            *slot = v.clone();
        }
    }
}

pub fn add<S: Storage>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let input = input_from_args(sub);
    let mut session = EditSession::new();
    let outcome = session
        .submit(ledger, &input)
        .context("Transaction rejected")?;
    if let Submitted::Added(id) = outcome {
        if let Some(t) = ledger.get(id) {
            println!(
                "Recorded {} {} on {} (id {})",
                t.kind,
                fmt_amount(&t.amount),
                t.date,
                id
            );
        }
    }
    Ok(())
}

pub fn update<S: Storage>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(arg(sub, "id").context("missing transaction id")?)?;
    let mut session = EditSession::new();
    let mut input = session.select(ledger, id)?;
    overlay_args(&mut input, sub);
    session
        .submit(ledger, &input)
        .with_context(|| format!("Update of transaction {} rejected", id))?;
    println!("Updated transaction {}", id);
    Ok(())
}

pub fn remove<S: Storage>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(arg(sub, "id").context("missing transaction id")?)?;
    let mut session = EditSession::new();
    session.select(ledger, id)?;
    session.delete(ledger)?;
    println!("Deleted transaction {}", id);
    Ok(())
}

fn list<S: Storage>(
    ledger: &Ledger<S>,
    cfg: &Config,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<()> {
    let data = query_rows(ledger, cfg, sub, today)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        print_rows(&data);
    }
    Ok(())
}

fn show<S: Storage>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = parse_id(arg(sub, "id").context("missing transaction id")?)?;
    let t = ledger
        .get(id)
        .with_context(|| format!("Transaction {} not found", id))?;
    let row = TransactionRow::from(t);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &row)? {
        print_rows(std::slice::from_ref(&row));
    }
    Ok(())
}

fn print_rows(data: &[TransactionRow]) {
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date.clone(),
                r.kind.clone(),
                r.amount.clone(),
                r.category.clone(),
                r.account.clone(),
                r.note.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Type", "Amount", "Category", "Account", "Note"],
            rows,
        )
    );
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: u64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub account: String,
    pub note: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        TransactionRow {
            id: t.id.0,
            date: t.day_key(),
            kind: t.kind.to_string(),
            amount: fmt_amount(&t.amount),
            category: t.category.clone(),
            account: t.account.clone(),
            note: t.note.clone(),
        }
    }
}

/// Ledger-order rows, restricted to the resolved month filter.
pub fn query_rows<S: Storage>(
    ledger: &Ledger<S>,
    cfg: &Config,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<Vec<TransactionRow>> {
    let filter = resolve_month(sub, cfg, today)?;
    Ok(ledger
        .all()
        .iter()
        .filter(|t| filter.as_ref().is_none_or(|f| f.matches(t.date)))
        .map(TransactionRow::from)
        .collect())
}
