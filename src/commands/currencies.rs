// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::ledger::Ledger;
use crate::models::{CURRENCIES, Currency, find_currency};
use crate::store::KeyValueStore;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle<S: KeyValueStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("use", sub)) => {
            let c = select(ledger, required(sub, "CODE")?)?;
            println!("New entries default to {} ({})", c.code, c.display_name);
        }
        _ => {}
    }
    Ok(())
}

pub fn lookup(code: &str) -> Result<Currency> {
    find_currency(code)
        .cloned()
        .ok_or_else(|| anyhow!("Unknown currency '{}'", code.trim()))
}

/// Makes `code` the default currency for new transactions.
pub fn select<S: KeyValueStore>(ledger: &mut Ledger<S>, code: &str) -> Result<Currency> {
    let c = lookup(code)?;
    ledger.set_last_currency(&c);
    Ok(c)
}

fn list<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &*CURRENCIES)? {
        return Ok(());
    }
    let current = &ledger.last_currency().code;
    let rows = CURRENCIES
        .iter()
        .map(|c| {
            vec![
                c.code.clone(),
                c.symbol.clone(),
                c.display_name.clone(),
                c.rate_to_base.to_string(),
                if &c.code == current { "*" } else { "" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Code", "Symbol", "Name", "Rate", "Default"], rows)
    );
    Ok(())
}
