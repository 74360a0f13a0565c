// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use crate::models::Currency;
use chrono::{Local, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9][0-9,]*$").unwrap_or_else(|e| panic!("amount pattern: {e}"))
});

/// Canonical `YYYY-MM-DD` key for a calendar day.
pub fn parse_date_key(s: &str) -> LedgerResult<String> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| date_key(&d))
        .map_err(|_| LedgerError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", s)))
}

pub fn date_key(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn today_key() -> String {
    date_key(&Local::now().date_naive())
}

/// Parses a typed amount. Thousands separators are allowed; anything
/// else that is not a digit is rejected.
pub fn parse_amount(s: &str) -> LedgerResult<i64> {
    let s = s.trim();
    let invalid = || LedgerError::validation(format!("Invalid amount '{}'", s));
    if !AMOUNT_RE.is_match(s) {
        return Err(invalid());
    }
    let digits: String = s.chars().filter(|c| *c != ',').collect();
    let n: i64 = digits.parse().map_err(|_| invalid())?;
    if n <= 0 {
        return Err(LedgerError::validation(
            "Amount must be a positive whole number",
        ));
    }
    Ok(n)
}

/// Groups digits in threes: `1234567` -> `1,234,567`.
pub fn fmt_number(n: i64) -> String {
    group_digits(n < 0, &n.unsigned_abs().to_string())
}

fn group_digits(negative: bool, digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn fmt_money(amount: i64, ccy: &Currency) -> String {
    format!("{}{}", ccy.symbol, fmt_number(amount))
}

/// Exact value rounded to whole units for display. Not limited to `i64`.
pub fn fmt_base(d: Decimal, ccy: &Currency) -> String {
    let whole = d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = whole.is_sign_negative() && !whole.is_zero();
    let digits = whole.abs().trunc().to_string();
    format!("{}{}", ccy.symbol, group_digits(negative, &digits))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> anyhow::Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_accepts_thousands_separators() {
        assert_eq!(parse_amount(" 1,500 ").unwrap(), 1500);
        assert_eq!(parse_amount("42").unwrap(), 42);
    }

    #[test]
    fn amount_rejects_zero_negative_and_text() {
        for bad in ["0", "-5", "12.5", "abc", "", ",100"] {
            assert!(
                matches!(parse_amount(bad), Err(LedgerError::Validation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn date_key_is_canonical() {
        assert_eq!(parse_date_key(" 2025-03-07 ").unwrap(), "2025-03-07");
        assert!(parse_date_key("07/03/2025").is_err());
        assert!(parse_date_key("2025-02-30").is_err());
    }

    #[test]
    fn number_grouping() {
        assert_eq!(fmt_number(0), "0");
        assert_eq!(fmt_number(999), "999");
        assert_eq!(fmt_number(1000), "1,000");
        assert_eq!(fmt_number(-1234567), "-1,234,567");
    }

    #[test]
    fn fmt_base_rounds_and_goes_past_i64() {
        let krw = crate::models::base_currency();
        assert_eq!(fmt_base(Decimal::new(-15, 1), &krw), "₩-2");
        assert_eq!(fmt_base(Decimal::new(4, 1), &krw), "₩0");
        let big = Decimal::from(i64::MAX) + Decimal::ONE;
        assert_eq!(fmt_base(big, &krw), "₩9,223,372,036,854,775,808");
    }
}
