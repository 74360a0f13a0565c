// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tripledger::{cli, commands, db, ledger::Ledger};

fn setup_logging(verbose: bool) {
    let default = if verbose { "tripledger=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    setup_logging(matches.get_flag("verbose"));

    let override_path = matches.get_one::<String>("db").map(PathBuf::from);
    let path = db::resolve_path(override_path.as_deref())?;
    let store = db::SqliteStore::open(&path)?;
    let mut ledger = Ledger::load(store)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Ledger initialized at {}", path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("lock", sub)) => commands::locks::handle(&mut ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ledger, sub)?,
        Some(("tags", sub)) => commands::tags::handle(&mut ledger, sub)?,
        Some(("currency", sub)) => commands::currencies::handle(&mut ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
