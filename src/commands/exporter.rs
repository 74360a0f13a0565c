// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::ledger::Ledger;
use crate::store::KeyValueStore;
use crate::summary::round_base;
use anyhow::{Context, Result, bail};
use serde_json::json;

pub fn handle<S: KeyValueStore>(ledger: &Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ledger, sub),
        _ => Ok(()),
    }
}

fn export_transactions<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.trim().to_lowercase();
    let out = required(sub, "out")?;

    // Oldest day first, each day in entry order.
    let items: Vec<_> = ledger
        .book()
        .values()
        .flat_map(|day| day.iter().rev())
        .collect();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create {}", out))?;
            wtr.write_record([
                "id", "date", "kind", "person", "category", "amount", "currency", "rate",
                "base_amount", "locked",
            ])?;
            for t in &items {
                wtr.write_record([
                    t.id.to_string(),
                    t.date_key.clone(),
                    t.kind().label().to_string(),
                    t.person.clone(),
                    t.category.clone(),
                    t.amount.to_string(),
                    t.currency.code.clone(),
                    t.currency.rate_to_base.to_string(),
                    round_base(t.amount_in_base()).to_string(),
                    ledger.is_locked(&t.date_key).to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let rows: Vec<_> = items
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.date_key,
                        "kind": t.kind().label(),
                        "person": t.person,
                        "category": t.category,
                        "amount": t.amount,
                        "currency": t.currency.code,
                        "base_amount": round_base(t.amount_in_base()),
                        "locked": ledger.is_locked(&t.date_key),
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)
                .with_context(|| format!("Write {}", out))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    println!("Exported {} transactions to {}", items.len(), out);
    Ok(())
}
