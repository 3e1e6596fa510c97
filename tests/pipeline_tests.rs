// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cardclip::db;
use cardclip::error::PipelineError;
use cardclip::llm::ReasoningClient;
use cardclip::models::{Statement, Transaction};
use cardclip::pipeline::ingest_text;
use cardclip::protocol::encode_statement;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::cell::Cell;

struct CannedClient {
    reply: String,
    calls: Cell<usize>,
}

impl CannedClient {
    fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: Cell::new(0),
        }
    }
}

impl ReasoningClient for CannedClient {
    fn complete(&self, _prompt: &str) -> Result<String, PipelineError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.reply.clone())
    }
}

struct FailingClient;

impl ReasoningClient for FailingClient {
    fn complete(&self, _prompt: &str) -> Result<String, PipelineError> {
        Err(PipelineError::Upstream(
            "operation timed out after 60s".into(),
        ))
    }
}

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn tx_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap()
}

fn sample_statement() -> Statement {
    Statement {
        card_number: "1234-XXXX".into(),
        total_payment: Decimal::from(5000),
        minimum_payment: Decimal::from(500),
        payment_due_date: "2025-02-06".into(),
        credit_line: Decimal::from(20000),
        transactions: vec![
            Transaction {
                transaction_date: "2024-12-17".into(),
                posting_date: "2024-12-17".into(),
                description: "COFFEE SHOP".into(),
                amount: Decimal::new(15000, 2),
                ..Default::default()
            },
            Transaction {
                transaction_date: "2024-12-20".into(),
                posting_date: "2024-12-20".into(),
                description: "REFUND".into(),
                amount: Decimal::new(-7550, 2),
                ..Default::default()
            },
        ],
    }
}

#[test]
fn ingest_persists_and_returns_tagged_transactions() {
    let mut conn = setup();
    let client = CannedClient::new(encode_statement(&sample_statement()));

    let got = ingest_text(&mut conn, &client, "statement body", "acct-1").unwrap();
    assert_eq!(got.len(), 2);
    for t in &got {
        assert_eq!(t.account_id, "acct-1");
        assert_eq!(t.card_number, "1234-XXXX");
    }
    assert_eq!(got[0].amount, Decimal::new(15000, 2));
    assert_eq!(got[1].amount, Decimal::new(-7550, 2));
    assert_eq!(tx_count(&conn), 2);

    let stmt_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM statements", [], |r| r.get(0))
        .unwrap();
    assert_eq!(stmt_count, 1);
}

#[test]
fn empty_extracted_text_yields_zero_transactions_without_calling_upstream() {
    let mut conn = setup();
    let client = CannedClient::new("should never be used");

    let got = ingest_text(&mut conn, &client, "   \n  ", "acct-1").unwrap();
    assert!(got.is_empty());
    assert_eq!(client.calls.get(), 0);
    assert_eq!(tx_count(&conn), 0);
}

#[test]
fn upstream_timeout_fails_before_any_persistence() {
    let mut conn = setup();
    let err = ingest_text(&mut conn, &FailingClient, "statement body", "acct-1").unwrap_err();
    assert!(matches!(err, PipelineError::Upstream(_)));
    assert_eq!(tx_count(&conn), 0);
}

#[test]
fn unreadable_reply_fails_before_any_persistence() {
    let mut conn = setup();
    let client = CannedClient::new("  \n ");
    let err = ingest_text(&mut conn, &client, "statement body", "acct-1").unwrap_err();
    assert!(matches!(err, PipelineError::EmptyReply));
    assert_eq!(tx_count(&conn), 0);
}

#[test]
fn store_failure_is_distinguishable_from_parse_failure() {
    // No schema at all: the parse succeeds, persistence cannot.
    let mut conn = Connection::open_in_memory().unwrap();
    let client = CannedClient::new(encode_statement(&sample_statement()));

    let err = ingest_text(&mut conn, &client, "statement body", "acct-1").unwrap_err();
    assert!(matches!(err, PipelineError::Store(_)));
}

#[test]
fn normalization_applies_between_parse_and_persist() {
    let mut conn = setup();
    // Flag lies, term is well formed; reply also carries messy whitespace.
    let reply = "HEADER|9999-XXXX|0|0|2025-02-06|0\n\
                 2024-04-01|2024-04-01|2C2P   *LAZADA 04/06|416.67|false|04/06";
    let client = CannedClient::new(reply);

    let got = ingest_text(&mut conn, &client, "statement body", "acct-1").unwrap();
    assert_eq!(got.len(), 1);
    assert!(got[0].is_installment);
    assert_eq!(got[0].installment_term, "04/06");
    assert_eq!(got[0].description, "2C2P *LAZADA 04/06");

    let stored: (String, bool) = conn
        .query_row(
            "SELECT installment_term, is_installment FROM transactions",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(stored.0, "04/06");
    assert!(stored.1);
}
