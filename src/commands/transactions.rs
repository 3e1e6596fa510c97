// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::store;
use crate::utils::{maybe_print_json, parse_date_range, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub),
        _ => Ok(()),
    }
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.transaction_date.clone(),
                    t.posting_date.clone(),
                    t.description.clone(),
                    t.amount.to_string(),
                    t.card_number.clone(),
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
            pretty_table(
                &["Date", "Posted", "Description", "Amount", "Card", "Term"],
                rows,
            )
        );
    }
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let account = sub.get_one::<String>("account").unwrap();
    let (from, to) = parse_date_range(
        sub.get_one::<String>("from").unwrap(),
        sub.get_one::<String>("to").unwrap(),
    )?;
    Ok(store::query_range(conn, account, from, to)?)
}
