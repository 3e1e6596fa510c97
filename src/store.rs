// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::PipelineError;
use crate::models::{Statement, Transaction};
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

/// Persist a normalized statement: the header snapshot (upsert by card
/// number) plus every transaction as a flat row, all inside one SQLite
/// transaction. Either the whole batch commits or nothing does.
pub fn save_statement(
    conn: &mut Connection,
    account_id: &str,
    statement: &Statement,
) -> Result<(), PipelineError> {
    let tx = conn.transaction()?;

    if !statement.card_number.is_empty() {
        tx.execute(
            "INSERT INTO statements(card_number, account_id, total_payment, minimum_payment, payment_due_date, credit_line)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(card_number) DO UPDATE SET
                account_id=excluded.account_id,
                total_payment=excluded.total_payment,
                minimum_payment=excluded.minimum_payment,
                payment_due_date=excluded.payment_due_date,
                credit_line=excluded.credit_line",
            params![
                statement.card_number,
                account_id,
                statement.total_payment.to_string(),
                statement.minimum_payment.to_string(),
                statement.payment_due_date,
                statement.credit_line.to_string(),
            ],
        )?;
    }

    for t in &statement.transactions {
        tx.execute(
            "INSERT INTO transactions(account_id, card_number, transaction_date, posting_date, description, amount, is_installment, installment_term)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                t.account_id,
                t.card_number,
                t.transaction_date,
                t.posting_date,
                t.description,
                t.amount.to_string(),
                t.is_installment,
                t.installment_term,
            ],
        )?;
    }

    tx.commit()?;
    Ok(())
}

/// All transactions for `account_id` whose transaction date falls within
/// `[from, to]` inclusive. Dates are compared as ISO calendar strings; the
/// result order is the store's natural order.
pub fn query_range(
    conn: &Connection,
    account_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<Transaction>, PipelineError> {
    let mut stmt = conn.prepare(
        "SELECT account_id, card_number, transaction_date, posting_date, description, amount, is_installment, installment_term
         FROM transactions
         WHERE account_id=?1 AND transaction_date>=?2 AND transaction_date<=?3",
    )?;
    let rows = stmt.query_map(
        params![account_id, from.to_string(), to.to_string()],
        |r| {
            // A stored amount that no longer parses is a corrupt row; report
            // it as a read failure rather than fabricating a zero.
            let amount = r.get::<_, String>(5)?.parse::<Decimal>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    5,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;
            Ok(Transaction {
                account_id: r.get(0)?,
                card_number: r.get(1)?,
                transaction_date: r.get(2)?,
                posting_date: r.get(3)?,
                description: r.get(4)?,
                amount,
                is_installment: r.get(6)?,
                installment_term: r.get(7)?,
            })
        },
    )?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
