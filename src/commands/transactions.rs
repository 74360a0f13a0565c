// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{date_or_today, required};
use crate::ledger::Ledger;
use crate::models::{Transaction, base_currency};
use crate::store::KeyValueStore;
use crate::utils::{fmt_base, fmt_money, maybe_print_json, parse_amount, pretty_table};
use anyhow::{Result, anyhow};
use serde::Serialize;

pub fn handle<S: KeyValueStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(ledger, sub)?;
        }
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn add<S: KeyValueStore>(
    ledger: &mut Ledger<S>,
    sub: &clap::ArgMatches,
) -> Result<Transaction> {
    let date = date_or_today(sub)?;
    let person = match sub.get_one::<String>("person") {
        Some(p) => p.trim().to_string(),
        None => ledger.last_person().unwrap_or_default().to_string(),
    };
    let amount = parse_amount(required(sub, "amount")?)?;
    let category = required(sub, "category")?.trim().to_string();
    let chosen = match sub.get_one::<String>("currency") {
        Some(code) => Some(super::currencies::lookup(code)?),
        None => None,
    };
    let currency = chosen.clone().unwrap_or_else(|| ledger.last_currency().clone());
    let is_expense = !sub.get_flag("income");

    let t = ledger.add_transaction(&date, &person, amount, &category, &currency, is_expense)?;
    // the explicit choice sticks only once the entry is recorded
    if let Some(c) = chosen {
        ledger.set_last_currency(&c);
    }
    println!(
        "Recorded {} {} on {} by '{}' for '{}' (id {})",
        t.kind().label(),
        fmt_money(t.amount, &t.currency),
        t.date_key,
        t.person,
        t.category,
        t.id
    );
    Ok(t)
}

fn rm<S: KeyValueStore>(ledger: &mut Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let date = date_or_today(sub)?;
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow!("Missing --id"))?;
    if ledger.delete_transaction(&date, id)? {
        println!("Deleted transaction {} on {}", id, date);
    } else {
        println!("No transaction {} on {}", id, date);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub person: String,
    pub category: String,
    pub amount: i64,
    pub currency: String,
    pub base_amount: String,
}

pub fn query_rows<S: KeyValueStore>(
    ledger: &Ledger<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let date = date_or_today(sub)?;
    let base = base_currency();
    Ok(ledger
        .transactions(&date)
        .iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date_key.clone(),
            kind: t.kind().label().to_string(),
            person: t.person.clone(),
            category: t.category.clone(),
            amount: t.amount,
            currency: t.currency.code.clone(),
            base_amount: fmt_base(t.amount_in_base(), &base),
        })
        .collect())
}

fn list<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let date = date_or_today(sub)?;
    if ledger.is_locked(&date) {
        println!("{} is locked", date);
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.kind.clone(),
                r.person.clone(),
                r.category.clone(),
                r.amount.to_string(),
                r.currency.clone(),
                r.base_amount.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Kind", "Person", "Category", "Amount", "CCY", "Base"],
            rows,
        )
    );
    Ok(())
}
