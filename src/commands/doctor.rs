// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::extract;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, api_key_present: bool) -> Result<()> {
    let mut rows = Vec::new();

    // 1) External collaborators
    if !extract::tool_available() {
        rows.push(vec![
            "pdftotext_missing".into(),
            "install poppler-utils to enable statement ingestion".into(),
        ]);
    }
    if !api_key_present {
        rows.push(vec![
            "api_key_missing".into(),
            "set GEMINI_API_KEY to enable statement ingestion".into(),
        ]);
    }

    // 2) Stored-data invariants
    rows.extend(scan_stored(conn)?);

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Scan stored transactions for invariant violations: an installment flag
/// disagreeing with its term, and dates that are not calendar dates (those
/// escape every range query). Returns one issue row per finding.
pub fn scan_stored(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    let mut stmt = conn.prepare(
        "SELECT id, description FROM transactions
         WHERE (is_installment=1 AND installment_term='')
            OR (is_installment=0 AND installment_term!='')",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let desc: String = r.get(1)?;
        rows.push(vec![
            "installment_mismatch".into(),
            format!("tx {} '{}'", id, desc),
        ]);
    }

    let mut stmt2 = conn.prepare("SELECT id, transaction_date FROM transactions")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let d: String = r.get(1)?;
        if chrono::NaiveDate::parse_from_str(&d, "%Y-%m-%d").is_err() {
            rows.push(vec!["bad_date".into(), format!("tx {} '{}'", id, d)]);
        }
    }

    Ok(rows)
}
