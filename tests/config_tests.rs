// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use tallybook::commands::settings;
use tallybook::config::{Config, DefaultMonth, set_setting};
use tallybook::{cli, db};

#[test]
fn defaults_when_nothing_stored() {
    let conn = db::open_in_memory().unwrap();
    let cfg = Config::load(&conn).unwrap();
    assert_eq!(cfg.default_month, DefaultMonth::Current);
    assert_eq!(cfg.export_dir(), PathBuf::from("."));
}

#[test]
fn set_via_cli_and_reload() {
    let conn = db::open_in_memory().unwrap();
    let matches = cli::build_cli().get_matches_from([
        "tallybook", "config", "set", "default-month", "all",
    ]);
    settings::handle(&conn, matches.subcommand_matches("config").unwrap()).unwrap();
    set_setting(&conn, "export-dir", "/tmp/backups").unwrap();

    let cfg = Config::load(&conn).unwrap();
    assert_eq!(cfg.default_month, DefaultMonth::All);
    assert_eq!(cfg.export_dir(), PathBuf::from("/tmp/backups"));
    assert_eq!(cfg.value_of("default-month").unwrap(), "all");
}

#[test]
fn rejects_unknown_keys_and_values() {
    let conn = db::open_in_memory().unwrap();
    assert!(set_setting(&conn, "theme", "dark").is_err());
    assert!(set_setting(&conn, "default-month", "last").is_err());
    assert!(set_setting(&conn, "export-dir", "  ").is_err());
    assert_eq!(Config::load(&conn).unwrap(), Config::default());
}

#[test]
fn db_path_prefers_explicit_path() {
    let explicit = PathBuf::from("/tmp/elsewhere/ledger.sqlite");
    assert_eq!(db::db_path(Some(explicit.as_path())).unwrap(), explicit);
}

#[test]
fn file_database_is_created_with_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("tallybook.sqlite");
    db::open_or_init(&path).unwrap();
    assert!(path.exists());
}
