// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

pub fn build_cli() -> Command {
    Command::new("cardclip")
        .version(crate_version!())
        .about("Credit-card statement ingestion, normalization, and transaction query CLI")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("statement")
                .about("Statement ingestion")
                .subcommand(
                    Command::new("ingest")
                        .about("Extract, parse, and persist a statement PDF")
                        .arg(
                            Arg::new("file")
                                .long("file")
                                .required(true)
                                .help("Path to the statement PDF"),
                        )
                        .arg(
                            Arg::new("account")
                                .long("account")
                                .required(true)
                                .help("Account identifier to tag transactions with"),
                        )
                        .arg(
                            Arg::new("password")
                                .long("password")
                                .help("Password for protected PDFs"),
                        )
                        .arg(
                            Arg::new("json")
                                .long("json")
                                .action(ArgAction::SetTrue)
                                .help("Print ingested transactions as JSON"),
                        ),
                ),
        )
        .subcommand(
            Command::new("tx").about("Transactions").subcommand(
                Command::new("list")
                    .about("List transactions for an account within a date window")
                    .arg(
                        Arg::new("account")
                            .long("account")
                            .required(true)
                            .help("Account identifier"),
                    )
                    .arg(
                        Arg::new("from")
                            .long("from")
                            .required(true)
                            .help("Start date (YYYY-MM-DD, inclusive)"),
                    )
                    .arg(
                        Arg::new("to")
                            .long("to")
                            .required(true)
                            .help("End date (YYYY-MM-DD, inclusive)"),
                    )
                    .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                    .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue)),
            ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Export transactions for an account and date window")
                    .arg(Arg::new("account").long("account").required(true))
                    .arg(Arg::new("from").long("from").required(true))
                    .arg(Arg::new("to").long("to").required(true))
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv or json"),
                    )
                    .arg(
                        Arg::new("out")
                            .long("out")
                            .required(true)
                            .help("Output file path"),
                    ),
            ),
        )
        .subcommand(Command::new("doctor").about("Check environment and stored-data health"))
}
