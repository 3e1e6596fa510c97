// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cardclip::{cli, commands::exporter, db};
use rusqlite::{Connection, params};
use tempfile::NamedTempFile;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO transactions(account_id, card_number, transaction_date, posting_date, description, amount, is_installment, installment_term)
         VALUES ('a1', '1234-XXXX', '2025-01-10', '2025-01-11', 'ZOOM CAMERA 10/10', '416.67', 1, '10/10')",
        params![],
    )
    .unwrap();
    conn
}

fn export_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args);
    let Some(("export", export_m)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    export_m.clone()
}

#[test]
fn csv_export_writes_header_and_rows() {
    let conn = setup();
    let out = NamedTempFile::new().unwrap();
    let out_path = out.path().to_str().unwrap().to_string();

    let sub = export_matches(&[
        "cardclip", "export", "transactions", "--account", "a1", "--from", "2025-01-01", "--to",
        "2025-01-31", "--format", "csv", "--out", &out_path,
    ]);
    exporter::handle(&conn, &sub).unwrap();

    let body = std::fs::read_to_string(&out_path).unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next().unwrap(),
        "transaction_date,posting_date,description,amount,card_number,is_installment,installment_term"
    );
    let row = lines.next().unwrap();
    assert!(row.contains("2025-01-10"));
    assert!(row.contains("ZOOM CAMERA 10/10"));
    assert!(row.contains("416.67"));
    assert!(row.contains("true"));
}

#[test]
fn json_export_writes_array() {
    let conn = setup();
    let out = NamedTempFile::new().unwrap();
    let out_path = out.path().to_str().unwrap().to_string();

    let sub = export_matches(&[
        "cardclip", "export", "transactions", "--account", "a1", "--from", "2025-01-01", "--to",
        "2025-01-31", "--format", "json", "--out", &out_path,
    ]);
    exporter::handle(&conn, &sub).unwrap();

    let body = std::fs::read_to_string(&out_path).unwrap();
    let val: serde_json::Value = serde_json::from_str(&body).unwrap();
    let arr = val.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["installment_term"], "10/10");
    assert_eq!(arr[0]["is_installment"], true);
}
