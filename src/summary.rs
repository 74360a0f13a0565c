// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregates computed on demand from a ledger snapshot.
//!
//! Base-currency values are kept exact here; [`round_base`] is applied only
//! where a total is shown or compared as a whole number.

use crate::models::{Currency, Transaction};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

pub type Book = BTreeMap<String, Vec<Transaction>>;

/// Nearest integer, halves away from zero.
pub fn round_base(d: Decimal) -> i64 {
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(if d.is_sign_negative() { i64::MIN } else { i64::MAX })
}

/// Totals in the currency's own units. Kept as `Decimal` so a day whose
/// amounts sum past `i64::MAX` still adds up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyTotals {
    pub currency: Currency,
    pub expense: Decimal,
    pub income: Decimal,
}

impl CurrencyTotals {
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }

    pub fn expense_base(&self) -> Decimal {
        self.currency.convert(self.expense)
    }

    pub fn income_base(&self) -> Decimal {
        self.currency.convert(self.income)
    }

    pub fn balance_base(&self) -> Decimal {
        self.income_base() - self.expense_base()
    }
}

/// Per-currency income and expense for one day, in first-seen order.
pub fn currency_totals(day: &[Transaction]) -> Vec<CurrencyTotals> {
    let mut out: Vec<CurrencyTotals> = Vec::new();
    for t in day {
        let idx = match out.iter().position(|c| c.currency.code == t.currency.code) {
            Some(i) => i,
            None => {
                out.push(CurrencyTotals {
                    currency: t.currency.clone(),
                    expense: Decimal::ZERO,
                    income: Decimal::ZERO,
                });
                out.len() - 1
            }
        };
        let entry = &mut out[idx];
        if t.is_expense {
            entry.expense += Decimal::from(t.amount);
        } else {
            entry.income += Decimal::from(t.amount);
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryScope {
    Day(String),
    Trip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpenderTotal {
    pub person: String,
    pub amount: Decimal,
}

/// Expense spent per person in base currency, largest first.
///
/// Trip scope walks days in ascending date order, each day newest first.
/// Equal totals keep the order in which their person first appeared.
pub fn spender_totals(book: &Book, scope: &SummaryScope) -> Vec<SpenderTotal> {
    let mut out: Vec<SpenderTotal> = Vec::new();
    let days: Vec<&Vec<Transaction>> = match scope {
        SummaryScope::Day(key) => book.get(key).into_iter().collect(),
        SummaryScope::Trip => book.values().collect(),
    };
    for t in days.into_iter().flatten().filter(|t| t.is_expense) {
        let amt = t.amount_in_base();
        match out.iter_mut().find(|s| s.person == t.person) {
            Some(s) => s.amount += amt,
            None => out.push(SpenderTotal {
                person: t.person.clone(),
                amount: amt,
            }),
        }
    }
    // sort_by is stable
    out.sort_by(|a, b| b.amount.cmp(&a.amount));
    out
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TripTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl TripTotals {
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

/// Base-currency income and expense over every day, locked or not.
pub fn trip_totals(book: &Book) -> TripTotals {
    book.values()
        .flatten()
        .fold(TripTotals::default(), |mut acc, t| {
            if t.is_expense {
                acc.expense += t.amount_in_base();
            } else {
                acc.income += t.amount_in_base();
            }
            acc
        })
}
