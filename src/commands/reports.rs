// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::date_or_today;
use crate::ledger::Ledger;
use crate::models::base_currency;
use crate::store::KeyValueStore;
use crate::summary::{SummaryScope, round_base};
use crate::utils::{fmt_base, fmt_money, maybe_print_json, parse_date_key, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: KeyValueStore>(ledger: &Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("day", sub)) => day(ledger, sub)?,
        Some(("spenders", sub)) => spenders(ledger, sub)?,
        Some(("trip", sub)) => trip(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DayCurrencyRow {
    pub currency: String,
    pub expense: i64,
    pub income: i64,
    pub balance: i64,
    pub expense_base: i64,
    pub income_base: i64,
    pub balance_base: i64,
}

pub fn day_rows<S: KeyValueStore>(ledger: &Ledger<S>, date: &str) -> Vec<DayCurrencyRow> {
    ledger
        .currency_totals(date)
        .into_iter()
        .map(|c| DayCurrencyRow {
            currency: c.currency.code.clone(),
            expense: round_base(c.expense),
            income: round_base(c.income),
            balance: round_base(c.balance()),
            expense_base: round_base(c.expense_base()),
            income_base: round_base(c.income_base()),
            balance_base: round_base(c.balance_base()),
        })
        .collect()
}

fn day<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let date = date_or_today(sub)?;
    let totals = ledger.currency_totals(&date);
    let data = day_rows(ledger, &date);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let base = base_currency();
    let rows = totals
        .iter()
        .map(|c| {
            let mut row = vec![
                c.currency.code.clone(),
                fmt_base(c.expense, &c.currency),
                fmt_base(c.income, &c.currency),
                fmt_base(c.balance(), &c.currency),
            ];
            if c.currency.is_base() {
                row.push(String::new());
            } else {
                row.push(fmt_base(c.balance_base(), &base));
            }
            row
        })
        .collect();
    let lock = if ledger.is_locked(&date) { " (locked)" } else { "" };
    println!("{}{}", date, lock);
    println!(
        "{}",
        pretty_table(
            &["CCY", "Expense", "Income", "Balance", &format!("Balance ({})", base.code)],
            rows,
        )
    );
    Ok(())
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SpenderRow {
    pub person: String,
    pub amount: i64,
}

pub fn spender_rows<S: KeyValueStore>(
    ledger: &Ledger<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<SpenderRow>> {
    let scope = match sub.get_one::<String>("date") {
        Some(d) => SummaryScope::Day(parse_date_key(d)?),
        None => SummaryScope::Trip,
    };
    Ok(ledger
        .spender_totals(&scope)
        .into_iter()
        .map(|s| SpenderRow {
            person: s.person,
            amount: round_base(s.amount),
        })
        .collect())
}

fn spenders<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data = spender_rows(ledger, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let base = base_currency();
    let rows = data
        .iter()
        .map(|r| vec![r.person.clone(), fmt_money(r.amount, &base)])
        .collect();
    println!(
        "{}",
        pretty_table(&["Person", &format!("Spent ({})", base.code)], rows)
    );
    Ok(())
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TripRow {
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
}

pub fn trip_row<S: KeyValueStore>(ledger: &Ledger<S>) -> TripRow {
    let t = ledger.trip_totals();
    TripRow {
        income: round_base(t.income),
        expense: round_base(t.expense),
        balance: round_base(t.balance()),
    }
}

fn trip<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data = trip_row(ledger);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let base = base_currency();
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                fmt_money(data.income, &base),
                fmt_money(data.expense, &base),
                fmt_money(data.balance, &base),
            ]],
        )
    );
    Ok(())
}
