// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use cardclip::llm::LlmConfig;
use cardclip::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;
    // Environment is read here at the edge only; everything below takes an
    // explicit config.
    let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("statement", sub)) => {
            commands::statements::handle(&mut conn, &LlmConfig::new(api_key), sub)?
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn, !api_key.is_empty())?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
