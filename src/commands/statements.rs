// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::llm::{GeminiClient, LlmConfig};
use crate::pipeline;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use std::fs;

pub fn handle(conn: &mut Connection, config: &LlmConfig, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("ingest", sub)) => ingest(conn, config, sub),
        _ => Ok(()),
    }
}

fn ingest(conn: &mut Connection, config: &LlmConfig, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("file").unwrap().trim();
    let account = sub.get_one::<String>("account").unwrap();
    let password = sub.get_one::<String>("password").map(|s| s.as_str());
    let json_flag = sub.get_flag("json");

    if config.api_key.is_empty() {
        bail!("GEMINI_API_KEY is not set; statement ingestion requires it");
    }
    let pdf_bytes = fs::read(path).with_context(|| format!("Read PDF {}", path))?;

    let client = GeminiClient::new(config.clone())?;
    let transactions = pipeline::ingest_document(conn, &client, &pdf_bytes, password, account)?;

    if transactions.is_empty() {
        println!("No transactions found in {}", path);
        return Ok(());
    }

    if !maybe_print_json(json_flag, false, &transactions)? {
        let rows: Vec<Vec<String>> = transactions
            .iter()
            .map(|t| {
                vec![
                    t.transaction_date.clone(),
                    t.posting_date.clone(),
                    t.description.clone(),
                    t.amount.to_string(),
                    if t.is_installment {
                        t.installment_term.clone()
                    } else {
                        String::new()
                    },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Posted", "Description", "Amount", "Term"], rows)
        );
    }
    println!(
        "Ingested {} transactions for account {}",
        transactions.len(),
        account
    );
    Ok(())
}
