// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod currencies;
pub mod exporter;
pub mod locks;
pub mod reports;
pub mod tags;
pub mod transactions;

use crate::models::TransactionKind;
use crate::utils::{parse_date_key, today_key};
use anyhow::{Context, Result};

pub(crate) fn required<'a>(m: &'a clap::ArgMatches, id: &str) -> Result<&'a str> {
    m.get_one::<String>(id)
        .map(String::as_str)
        .with_context(|| format!("Missing --{}", id))
}

/// `--date` when given, else today's key.
pub(crate) fn date_or_today(m: &clap::ArgMatches) -> Result<String> {
    match m.get_one::<String>("date") {
        Some(d) => Ok(parse_date_key(d)?),
        None => Ok(today_key()),
    }
}

pub(crate) fn kind_from_flag(m: &clap::ArgMatches) -> TransactionKind {
    TransactionKind::from_is_expense(!m.get_flag("income"))
}
