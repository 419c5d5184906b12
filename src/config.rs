// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Engine tunables. Defaults match the dashboard's documented windows;
/// overrides live in the `settings` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub spending_pace_days: u32,
    pub upcoming_window_days: u32,
    pub recent_window_days: u32,
    pub recent_limit: usize,
    pub top_categories_limit: usize,
    pub uncategorized_label: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            spending_pace_days: 30,
            upcoming_window_days: 14,
            recent_window_days: 7,
            recent_limit: 5,
            top_categories_limit: 5,
            uncategorized_label: "Uncategorized".to_string(),
        }
    }
}

/// Upper bound for every day-window setting.
pub const MAX_WINDOW_DAYS: u32 = 366;

pub const KEYS: &[&str] = &[
    "spending_pace_days",
    "upcoming_window_days",
    "recent_window_days",
    "recent_limit",
    "top_categories_limit",
    "uncategorized_label",
];

impl EngineConfig {
    pub fn load(conn: &Connection) -> Result<Self> {
        let mut cfg = Self::default();
        for key in KEYS {
            if let Some(v) = get_setting(conn, key)? {
                cfg.apply(key, &v)?;
            }
        }
        Ok(cfg)
    }

    /// Validates and applies a single override. Day windows must stay
    /// within [`MAX_WINDOW_DAYS`].
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        fn num<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| LedgerError::Parse(format!("setting {} = '{}'", key, value)))
        }
        fn days(key: &str, value: &str, min: u32) -> Result<u32> {
            let n: u32 = num(key, value)?;
            if !(min..=MAX_WINDOW_DAYS).contains(&n) {
                return Err(LedgerError::InvalidRange(format!(
                    "{} must be between {} and {}, got {}",
                    key, min, MAX_WINDOW_DAYS, n
                )));
            }
            Ok(n)
        }
        match key {
            "spending_pace_days" => self.spending_pace_days = days(key, value, 1)?,
            "upcoming_window_days" => self.upcoming_window_days = days(key, value, 0)?,
            "recent_window_days" => self.recent_window_days = days(key, value, 0)?,
            "recent_limit" => self.recent_limit = num(key, value)?,
            "top_categories_limit" => self.top_categories_limit = num(key, value)?,
            "uncategorized_label" => self.uncategorized_label = value.to_string(),
            other => {
                return Err(LedgerError::Parse(format!("unknown setting '{}'", other)));
            }
        }
        Ok(())
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    EngineConfig::default().apply(key, value)?;
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}
