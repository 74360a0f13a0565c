// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
    #[serde(rename = "name")]
    pub display_name: String,
    /// Units of the base currency per one unit of this currency.
    #[serde(rename = "rate", with = "rust_decimal::serde::float")]
    pub rate_to_base: Decimal,
}

impl Currency {
    fn new(code: &str, symbol: &str, display_name: &str, rate_to_base: i64) -> Self {
        Self {
            code: code.to_string(),
            symbol: symbol.to_string(),
            display_name: display_name.to_string(),
            rate_to_base: Decimal::from(rate_to_base),
        }
    }

    pub fn is_base(&self) -> bool {
        self.rate_to_base == Decimal::ONE
    }

    /// Converts an amount in this currency into base units, unrounded.
    pub fn to_base(&self, amount: i64) -> Decimal {
        self.convert(Decimal::from(amount))
    }

    pub fn convert(&self, amount: Decimal) -> Decimal {
        amount * self.rate_to_base
    }
}

// First entry is the base currency.
pub static CURRENCIES: Lazy<Vec<Currency>> = Lazy::new(|| {
    vec![
        Currency::new("KRW", "₩", "Won", 1),
        Currency::new("THB", "฿", "Baht", 42),
        Currency::new("USD", "$", "Dollar", 1350),
        Currency::new("EUR", "€", "Euro", 1450),
    ]
});

pub fn base_currency() -> Currency {
    CURRENCIES[0].clone()
}

pub fn find_currency(code: &str) -> Option<&'static Currency> {
    let code = code.trim();
    CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Currency as found inside a stored record; older records may lack
/// fields or hold `null`.
#[derive(Deserialize)]
struct StoredCurrency {
    code: Option<String>,
    symbol: Option<String>,
    name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    rate: Option<Decimal>,
}

impl From<StoredCurrency> for Currency {
    fn from(stored: StoredCurrency) -> Self {
        let known = stored
            .code
            .as_deref()
            .and_then(find_currency)
            .cloned()
            .unwrap_or_else(base_currency);
        Self {
            code: stored.code.unwrap_or(known.code),
            symbol: stored.symbol.unwrap_or(known.symbol),
            display_name: stored.name.unwrap_or(known.display_name),
            // a missing or zero rate counts as one base unit
            rate_to_base: stored
                .rate
                .filter(|r| !r.is_zero())
                .unwrap_or(Decimal::ONE),
        }
    }
}

fn stored_currency<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Currency, D::Error> {
    let stored = Option::<StoredCurrency>::deserialize(deserializer)?;
    Ok(stored.map(Currency::from).unwrap_or_else(base_currency))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn from_is_expense(is_expense: bool) -> Self {
        if is_expense { Self::Expense } else { Self::Income }
    }

    pub fn is_expense(self) -> bool {
        matches!(self, Self::Expense)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "date")]
    pub date_key: String,
    pub person: String,
    pub amount: i64,
    pub category: String,
    #[serde(default = "base_currency", deserialize_with = "stored_currency")]
    pub currency: Currency,
    pub is_expense: bool,
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        TransactionKind::from_is_expense(self.is_expense)
    }

    pub fn amount_in_base(&self) -> Decimal {
        self.currency.to_base(self.amount)
    }
}
