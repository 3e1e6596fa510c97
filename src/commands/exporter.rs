// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::parse_date_range;
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let account = sub.get_one::<String>("account").unwrap();
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let (from, to) = parse_date_range(
        sub.get_one::<String>("from").unwrap(),
        sub.get_one::<String>("to").unwrap(),
    )?;

    let transactions = store::query_range(conn, account, from, to)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "transaction_date",
                "posting_date",
                "description",
                "amount",
                "card_number",
                "is_installment",
                "installment_term",
            ])?;
            for t in &transactions {
                wtr.write_record([
                    t.transaction_date.as_str(),
                    t.posting_date.as_str(),
                    t.description.as_str(),
                    &t.amount.to_string(),
                    t.card_number.as_str(),
                    if t.is_installment { "true" } else { "false" },
                    t.installment_term.as_str(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = transactions
                .iter()
                .map(|t| {
                    json!({
                        "transaction_date": t.transaction_date,
                        "posting_date": t.posting_date,
                        "description": t.description,
                        "amount": t.amount.to_string(),
                        "card_number": t.card_number,
                        "is_installment": t.is_installment,
                        "installment_term": t.installment_term,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} transactions to {}", transactions.len(), out);
    Ok(())
}
