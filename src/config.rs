// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Result, bail};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

pub const DEFAULT_MONTH: &str = "default-month";
pub const EXPORT_DIR: &str = "export-dir";
pub const KEYS: [&str; 2] = [DEFAULT_MONTH, EXPORT_DIR];

/// Which month reports use when no `--month` is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultMonth {
    All,
    #[default]
    Current,
}

impl DefaultMonth {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(DefaultMonth::All),
            "current" => Ok(DefaultMonth::Current),
            other => bail!("Invalid value '{}' for {}, expected all|current", other, DEFAULT_MONTH),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            DefaultMonth::All => "all",
            DefaultMonth::Current => "current",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Config {
    pub default_month: DefaultMonth,
    pub export_dir: Option<PathBuf>,
}

impl Config {
    pub fn load(conn: &Connection) -> Result<Self> {
        let default_month = match get_setting(conn, DEFAULT_MONTH)? {
            Some(v) => DefaultMonth::parse(&v)?,
            None => DefaultMonth::default(),
        };
        let export_dir = get_setting(conn, EXPORT_DIR)?.map(PathBuf::from);
        Ok(Config {
            default_month,
            export_dir,
        })
    }

    /// Export directory, falling back to the working directory.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn value_of(&self, key: &str) -> Result<String> {
        match key {
            DEFAULT_MONTH => Ok(self.default_month.as_str().to_string()),
            EXPORT_DIR => Ok(self.export_dir().display().to_string()),
            other => bail!("Unknown setting '{}' (known: {})", other, KEYS.join(", ")),
        }
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

/// Validates and stores a setting.
pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    match key {
        DEFAULT_MONTH => {
            DefaultMonth::parse(value)?;
        }
        EXPORT_DIR => {
            if value.trim().is_empty() {
                bail!("{} must not be empty", EXPORT_DIR);
            }
        }
        other => bail!("Unknown setting '{}' (known: {})", other, KEYS.join(", ")),
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    tracing::debug!(key, value, "setting stored");
    Ok(())
}
