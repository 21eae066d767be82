// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde_json::json;
use tallybook::commands::backup;
use tallybook::config::Config;
use tallybook::export::{ExportFormat, backup_file_name, write_csv};
use tallybook::{Ledger, LedgerError, MemoryStore, SqliteStore, TransactionInput, cli, db};
use tempfile::tempdir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
}

fn ledger_with_note(note: &str) -> Ledger<MemoryStore> {
    let mut ledger = Ledger::open(MemoryStore::new()).unwrap();
    let d = TransactionInput {
        date: "2025-01-02".into(),
        kind: "Expense".into(),
        amount: "12.34".into(),
        category: "Groceries".into(),
        account: "Checking".into(),
        note: note.into(),
    }
    .validate()
    .unwrap();
    ledger.add(d).unwrap();
    ledger
}

#[test]
fn csv_has_header_and_quotes_embedded_commas() {
    let ledger = ledger_with_note("milk, eggs");
    let mut buf = Vec::new();
    write_csv(ledger.all(), &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(
        text,
        "Date,Type,Amount,Category,Account,Note\n2025-01-02,Expense,12.34,Groceries,Checking,\"milk, eggs\"\n"
    );
}

#[test]
fn empty_ledger_is_reported() {
    let ledger = Ledger::open(MemoryStore::new()).unwrap();
    let mut buf = Vec::new();
    assert!(matches!(
        write_csv(ledger.all(), &mut buf),
        Err(LedgerError::EmptyLedger)
    ));
    assert!(buf.is_empty());
}

#[test]
fn export_json_to_explicit_path() {
    let ledger = ledger_with_note("Weekly run");
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "tallybook", "export", "--format", "json", "--out", &out_str,
    ]);
    let sub = matches.subcommand_matches("export").unwrap();
    backup::export(&ledger, &Config::default(), sub, today()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": 1,
                "date": "2025-01-02",
                "type": "Expense",
                "amount": "12.34",
                "category": "Groceries",
                "account": "Checking",
                "note": "Weekly run"
            }
        ])
    );
}

#[test]
fn export_defaults_to_dated_name_in_export_dir() {
    let ledger = ledger_with_note("");
    let dir = tempdir().unwrap();
    let cfg = Config {
        export_dir: Some(dir.path().to_path_buf()),
        ..Config::default()
    };
    let matches = cli::build_cli().get_matches_from(["tallybook", "export"]);
    let sub = matches.subcommand_matches("export").unwrap();
    let path = backup::export(&ledger, &cfg, sub, today()).unwrap();

    assert_eq!(path, dir.path().join("Backup_2025-01-02.csv"));
    assert!(path.exists());
    assert_eq!(backup_file_name(today(), ExportFormat::Json), "Backup_2025-01-02.json");
}

#[test]
fn export_rejects_unknown_format_and_empty_ledger() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let ledger = ledger_with_note("");
    let matches = cli::build_cli().get_matches_from([
        "tallybook", "export", "--format", "xml", "--out", &out_str,
    ]);
    let sub = matches.subcommand_matches("export").unwrap();
    assert!(backup::export(&ledger, &Config::default(), sub, today()).is_err());
    assert!(!out_path.exists());

    let empty = Ledger::open(MemoryStore::new()).unwrap();
    let matches = cli::build_cli().get_matches_from(["tallybook", "export", "--out", &out_str]);
    let sub = matches.subcommand_matches("export").unwrap();
    assert!(backup::export(&empty, &Config::default(), sub, today()).is_err());
    assert!(!out_path.exists());
}

#[test]
fn clear_requires_confirmation() {
    let conn = db::open_in_memory().unwrap();
    let mut ledger = Ledger::open(SqliteStore::new(&conn)).unwrap();
    ledger.add(ledger_with_note("").all()[0].draft()).unwrap();

    let matches = cli::build_cli().get_matches_from(["tallybook", "clear"]);
    let sub = matches.subcommand_matches("clear").unwrap();
    assert!(backup::clear(SqliteStore::new(&conn), sub).is_err());
    assert_eq!(Ledger::open(SqliteStore::new(&conn)).unwrap().len(), 1);

    let matches = cli::build_cli().get_matches_from(["tallybook", "clear", "--yes"]);
    let sub = matches.subcommand_matches("clear").unwrap();
    let cleared = backup::clear(SqliteStore::new(&conn), sub).unwrap();
    assert!(cleared.is_empty());
    assert!(Ledger::open(SqliteStore::new(&conn)).unwrap().is_empty());
}

#[test]
fn clear_wipes_ledger_that_no_longer_loads() {
    let conn = db::open_in_memory().unwrap();
    // browser NaN amounts were saved as null
    conn.execute(
        "INSERT INTO kv(key, value) VALUES('transactions', \
         '[{\"date\":\"2024-03-01\",\"type\":\"Expense\",\"amount\":null}]')",
        [],
    )
    .unwrap();
    assert!(Ledger::open(SqliteStore::new(&conn)).is_err());

    let matches = cli::build_cli().get_matches_from(["tallybook", "clear", "--yes"]);
    let sub = matches.subcommand_matches("clear").unwrap();
    backup::clear(SqliteStore::new(&conn), sub).unwrap();

    let mut ledger = Ledger::open(SqliteStore::new(&conn)).unwrap();
    assert!(ledger.is_empty());
    ledger.add(ledger_with_note("").all()[0].draft()).unwrap();
    assert_eq!(ledger.len(), 1);
}
