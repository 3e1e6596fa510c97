// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::PipelineError;
use crate::llm::ReasoningClient;
use crate::models::Transaction;
use crate::{extract, normalize, protocol, store};
use rusqlite::Connection;

/// Full ingestion: PDF bytes -> extracted text -> reasoning service ->
/// parsed statement -> normalized, account-tagged transactions -> one
/// all-or-nothing store batch. Returns the tagged transactions only after
/// the batch has committed.
pub fn ingest_document(
    conn: &mut Connection,
    client: &dyn ReasoningClient,
    pdf_bytes: &[u8],
    password: Option<&str>,
    account_id: &str,
) -> Result<Vec<Transaction>, PipelineError> {
    let text = extract::extract_text(pdf_bytes, password)?;
    ingest_text(conn, client, &text, account_id)
}

/// Ingestion from already-extracted text. Split out so the pipeline below
/// the extraction stage is exercisable without pdftotext.
pub fn ingest_text(
    conn: &mut Connection,
    client: &dyn ReasoningClient,
    text: &str,
    account_id: &str,
) -> Result<Vec<Transaction>, PipelineError> {
    // An empty statement is valid degenerate input, not an error. Nothing
    // to ask the reasoning service, nothing to persist.
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let prompt = protocol::build_prompt(text);
    let reply = client.complete(&prompt)?;
    let mut statement = protocol::parse_reply(&reply)?;
    normalize::normalize(&mut statement, account_id);
    store::save_statement(conn, account_id, &statement)?;
    Ok(statement.transactions)
}
