// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::collections::HashMap;

pub const KEY_LEDGER: &str = "expense-app-data";
pub const KEY_LEDGER_BACKUP: &str = "expense-app-data-unreadable";
pub const KEY_LOCKED: &str = "expense-app-locked";
pub const KEY_EXPENSE_PERSONS: &str = "expense-app-expense-persons";
pub const KEY_INCOME_PERSONS: &str = "expense-app-income-persons";
pub const KEY_EXPENSE_CATEGORIES: &str = "expense-app-expense-categories";
pub const KEY_INCOME_CATEGORIES: &str = "expense-app-income-categories";
pub const KEY_LEGACY_PERSONS: &str = "expense-app-persons";
pub const KEY_LEGACY_CATEGORIES: &str = "expense-app-categories";
pub const KEY_LAST_PERSON: &str = "expense-app-last-person";
pub const KEY_LAST_CURRENCY: &str = "expense-app-last-currency";

/// String key-value persistence. `get` yields `None` for a missing key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
