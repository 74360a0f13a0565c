// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::date_or_today;
use crate::ledger::Ledger;
use crate::store::KeyValueStore;
use crate::utils::{maybe_print_json, parse_date_key, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: KeyValueStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("toggle", sub)) => {
            let date = date_or_today(sub)?;
            if ledger.toggle_lock(&date) {
                println!("Locked {}", date);
            } else {
                println!("Unlocked {}", date);
            }
        }
        Some(("status", sub)) => status(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct LockRow {
    pub date: String,
    pub locked: bool,
    pub transactions: usize,
}

pub fn status_rows<S: KeyValueStore>(
    ledger: &Ledger<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<LockRow>> {
    let row = |d: &str| LockRow {
        date: d.to_string(),
        locked: ledger.is_locked(d),
        transactions: ledger.transactions(d).len(),
    };
    match sub.get_one::<String>("date") {
        Some(d) => Ok(vec![row(&parse_date_key(d)?)]),
        None => Ok(ledger.locked_dates().into_iter().map(row).collect()),
    }
}

fn status<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data = status_rows(ledger, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No locked days");
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.date.clone(),
                if r.locked { "locked" } else { "open" }.to_string(),
                r.transactions.to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Date", "State", "Transactions"], rows));
    Ok(())
}
