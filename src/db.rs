// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Cardclip", "cardclip"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("cardclip.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    -- Header snapshot per statement, keyed by (possibly masked) card number.
    -- Transactions are never nested here; they live as flat rows below.
    CREATE TABLE IF NOT EXISTS statements(
        card_number TEXT PRIMARY KEY,
        account_id TEXT NOT NULL,
        total_payment TEXT NOT NULL,
        minimum_payment TEXT NOT NULL,
        payment_due_date TEXT NOT NULL,
        credit_line TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        account_id TEXT NOT NULL,
        card_number TEXT NOT NULL DEFAULT '',
        transaction_date TEXT NOT NULL,
        posting_date TEXT NOT NULL,
        description TEXT NOT NULL,
        amount TEXT NOT NULL,
        is_installment INTEGER NOT NULL DEFAULT 0,
        installment_term TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_account_date
        ON transactions(account_id, transaction_date);
    "#,
    )?;
    Ok(())
}
