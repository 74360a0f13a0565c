// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::kind_from_flag;
use crate::ledger::Ledger;
use crate::store::KeyValueStore;
use crate::tags::TagField;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, bail};
use serde::Serialize;

pub fn handle<S: KeyValueStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("add", sub)) => {
            let kind = kind_from_flag(sub);
            let (person, category) = targets(sub)?;
            if let Some(p) = person {
                ledger.remember_person(p, kind);
                println!("Saved {} person '{}'", kind.label(), p.trim());
            }
            if let Some(c) = category {
                ledger.remember_category(c, kind);
                println!("Saved {} category '{}'", kind.label(), c.trim());
            }
        }
        Some(("rm", sub)) => {
            let kind = kind_from_flag(sub);
            let (person, category) = targets(sub)?;
            if let Some(p) = person {
                report_removal(ledger.forget_person(p, kind), TagField::Person, p);
            }
            if let Some(c) = category {
                report_removal(ledger.forget_category(c, kind), TagField::Category, c);
            }
        }
        _ => {}
    }
    Ok(())
}

fn targets(sub: &clap::ArgMatches) -> Result<(Option<&str>, Option<&str>)> {
    let person = sub.get_one::<String>("person").map(String::as_str);
    let category = sub.get_one::<String>("category").map(String::as_str);
    if person.is_none() && category.is_none() {
        bail!("Pass --person and/or --category");
    }
    Ok((person, category))
}

fn report_removal(removed: bool, field: TagField, name: &str) {
    if removed {
        println!("Removed {} '{}'", field.label(), name.trim());
    } else {
        println!("No saved {} '{}'", field.label(), name.trim());
    }
}

#[derive(Debug, Serialize)]
pub struct TagLists<'a> {
    pub persons: &'a [String],
    pub categories: &'a [String],
}

fn list<S: KeyValueStore>(ledger: &Ledger<S>, sub: &clap::ArgMatches) -> Result<()> {
    let kind = kind_from_flag(sub);
    let tags = ledger.tags();
    let data = TagLists {
        persons: tags.list(TagField::Person, kind),
        categories: tags.list(TagField::Category, kind),
    };
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let n = data.persons.len().max(data.categories.len());
    let rows = (0..n)
        .map(|i| {
            vec![
                data.persons.get(i).cloned().unwrap_or_default(),
                data.categories.get(i).cloned().unwrap_or_default(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Person", "Category"], rows));
    if let Some(last) = ledger.last_person() {
        println!("Default person: {}", last);
    }
    Ok(())
}
