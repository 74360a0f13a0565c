// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger engine: dated transactions, day locks and tag history over an
//! injected key-value store.
//!
//! State is read once in [`Ledger::load`]. Every mutation rewrites only the
//! keys it touched; a failed write is logged and the in-memory state stays
//! authoritative for the rest of the session.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Currency, Transaction, TransactionKind, base_currency, find_currency};
use crate::store::{
    KEY_EXPENSE_CATEGORIES, KEY_EXPENSE_PERSONS, KEY_INCOME_CATEGORIES, KEY_INCOME_PERSONS,
    KEY_LAST_CURRENCY, KEY_LAST_PERSON, KEY_LEDGER, KEY_LEGACY_CATEGORIES, KEY_LEGACY_PERSONS,
    KEY_LEDGER_BACKUP, KEY_LOCKED, KeyValueStore,
};
use crate::summary::{self, Book, CurrencyTotals, SpenderTotal, SummaryScope, TripTotals};
use crate::tags::{TagField, TagHistory};
use crate::utils::parse_date_key;
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

pub struct Ledger<S: KeyValueStore> {
    store: S,
    book: Book,
    locks: BTreeMap<String, bool>,
    tags: TagHistory,
    last_person: Option<String>,
    last_currency: Currency,
    last_id: i64,
}

fn read_json<S: KeyValueStore, T: DeserializeOwned + Default>(store: &S, key: &str) -> Result<T> {
    let Some(raw) = store.get(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Ok(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed stored value, treating as empty");
            Ok(T::default())
        }
    }
}

/// Canonical form of a caller's day key. Keys that are not calendar days
/// are kept as given, trimmed, so they still address a distinct lock.
fn day_key(date_key: &str) -> String {
    parse_date_key(date_key).unwrap_or_else(|_| date_key.trim().to_string())
}

/// Decodes stored buckets one record at a time. A record that does not
/// decode is dropped with a warning; the rest of the ledger survives.
fn decode_book(raw: BTreeMap<String, Value>) -> Book {
    let mut book = Book::new();
    for (key, bucket) in raw {
        let Value::Array(records) = bucket else {
            tracing::warn!(bucket = %key, "stored day is not a list, skipping it");
            continue;
        };
        for record in records {
            match serde_json::from_value::<Transaction>(record) {
                Ok(t) => book.entry(key.clone()).or_default().push(t),
                Err(e) => tracing::warn!(bucket = %key, error = %e, "dropping unreadable record"),
            }
        }
    }
    book
}

/// Puts every record in the bucket of its own date, newest first.
fn normalize_book(raw: Book) -> Book {
    let mut book = Book::new();
    for (key, items) in raw {
        for mut t in items {
            t.date_key = day_key(&t.date_key);
            if t.date_key != key {
                tracing::warn!(
                    id = t.id,
                    bucket = %key,
                    date = %t.date_key,
                    "transaction stored under another day, moving it"
                );
            }
            book.entry(t.date_key.clone()).or_default().push(t);
        }
    }
    book.retain(|_, items| !items.is_empty());
    for items in book.values_mut() {
        items.sort_by(|a, b| b.id.cmp(&a.id));
        items.dedup_by_key(|t| t.id);
    }
    book
}

impl<S: KeyValueStore> Ledger<S> {
    /// Reads all persisted state. Only store read failures are errors;
    /// malformed values load as empty.
    pub fn load(mut store: S) -> Result<Self> {
        let raw_book = read_json::<S, Option<BTreeMap<String, Value>>>(&store, KEY_LEDGER)?;
        if raw_book.is_none() {
            // Keep an unreadable ledger around before the next save replaces it.
            if let Some(raw) = store.get(KEY_LEDGER)? {
                if let Err(e) = store.set(KEY_LEDGER_BACKUP, &raw) {
                    tracing::error!(key = KEY_LEDGER_BACKUP, error = %e, "write failed");
                }
            }
        }
        let book = normalize_book(decode_book(raw_book.unwrap_or_default()));
        let locks: BTreeMap<String, bool> = read_json::<S, BTreeMap<String, bool>>(&store, KEY_LOCKED)?
            .into_iter()
            .filter(|(_, v)| *v)
            .map(|(k, v)| (day_key(&k), v))
            .collect();

        let mut tags = TagHistory {
            expense_persons: read_json(&store, KEY_EXPENSE_PERSONS)?,
            income_persons: read_json(&store, KEY_INCOME_PERSONS)?,
            expense_categories: read_json(&store, KEY_EXPENSE_CATEGORIES)?,
            income_categories: read_json(&store, KEY_INCOME_CATEGORIES)?,
            persons: read_json(&store, KEY_LEGACY_PERSONS)?,
            categories: read_json(&store, KEY_LEGACY_CATEGORIES)?,
        };
        tags.normalize();
        tags.fill_legacy_from_split();

        let last_person = store.get(KEY_LAST_PERSON)?.filter(|p| !p.is_empty());
        let last_currency = read_json::<S, Option<Currency>>(&store, KEY_LAST_CURRENCY)?
            .and_then(|c| find_currency(&c.code).cloned())
            .unwrap_or_else(base_currency);

        let last_id = book.values().flatten().map(|t| t.id).max().unwrap_or(0);
        tracing::debug!(
            days = book.len(),
            locked = locks.values().filter(|v| **v).count(),
            "ledger loaded"
        );
        Ok(Self {
            store,
            book,
            locks,
            tags,
            last_person,
            last_currency,
            last_id,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn tags(&self) -> &TagHistory {
        &self.tags
    }

    pub fn last_person(&self) -> Option<&str> {
        self.last_person.as_deref()
    }

    pub fn last_currency(&self) -> &Currency {
        &self.last_currency
    }

    /// Dates that hold at least one transaction, ascending.
    pub fn dates(&self) -> Vec<&str> {
        self.book.keys().map(String::as_str).collect()
    }

    /// The day's transactions, newest first.
    pub fn transactions(&self, date_key: &str) -> &[Transaction] {
        self.book
            .get(&day_key(date_key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_locked(&self, date_key: &str) -> bool {
        self.locks.get(&day_key(date_key)).copied().unwrap_or(false)
    }

    pub fn locked_dates(&self) -> Vec<&str> {
        self.locks
            .iter()
            .filter(|(_, v)| **v)
            .map(|(k, _)| k.as_str())
            .collect()
    }

    fn ensure_open(&self, date_key: &str) -> LedgerResult<()> {
        if self.is_locked(date_key) {
            return Err(LedgerError::locked(date_key));
        }
        Ok(())
    }

    // Wall-clock milliseconds, bumped so ids stay unique and increasing.
    fn next_id(&mut self) -> i64 {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    pub fn add_transaction(
        &mut self,
        date_key: &str,
        person: &str,
        amount: i64,
        category: &str,
        currency: &Currency,
        is_expense: bool,
    ) -> LedgerResult<Transaction> {
        let canonical = parse_date_key(date_key);
        self.ensure_open(&day_key(date_key))?;

        let person = person.trim();
        let category = category.trim();
        if person.is_empty() || category.is_empty() {
            return Err(LedgerError::validation("Person and category are required"));
        }
        if amount <= 0 {
            return Err(LedgerError::validation(format!(
                "Amount must be a positive whole number, got {}",
                amount
            )));
        }
        let date_key = canonical?;

        let kind = TransactionKind::from_is_expense(is_expense);
        self.remember_person(person, kind);
        self.remember_category(category, kind);

        let item = Transaction {
            id: self.next_id(),
            date_key: date_key.clone(),
            person: person.to_string(),
            amount,
            category: category.to_string(),
            currency: currency.clone(),
            is_expense,
        };
        self.book.entry(date_key).or_default().insert(0, item.clone());
        self.save_book();
        tracing::info!(
            id = item.id,
            date = %item.date_key,
            kind = kind.label(),
            amount = item.amount,
            currency = %item.currency.code,
            "transaction added"
        );
        Ok(item)
    }

    /// Removes a transaction by id. Returns whether anything was removed.
    pub fn delete_transaction(&mut self, date_key: &str, id: i64) -> LedgerResult<bool> {
        let key = day_key(date_key);
        self.ensure_open(&key)?;
        let Some(items) = self.book.get_mut(&key) else {
            return Ok(false);
        };
        let before = items.len();
        items.retain(|t| t.id != id);
        let removed = items.len() != before;
        if items.is_empty() {
            self.book.remove(&key);
        }
        if removed {
            self.save_book();
            tracing::info!(id, date = %key, "transaction deleted");
        }
        Ok(removed)
    }

    /// Flips the day's lock and returns the new state.
    pub fn toggle_lock(&mut self, date_key: &str) -> bool {
        let key = day_key(date_key);
        let locked = if self.is_locked(&key) {
            self.locks.remove(&key);
            false
        } else {
            self.locks.insert(key.clone(), true);
            true
        };
        let locks = self.locks.clone();
        self.persist_json(KEY_LOCKED, &locks);
        tracing::info!(date = %key, locked, "lock toggled");
        locked
    }

    pub fn currency_totals(&self, date_key: &str) -> Vec<CurrencyTotals> {
        summary::currency_totals(self.transactions(date_key))
    }

    pub fn spender_totals(&self, scope: &SummaryScope) -> Vec<SpenderTotal> {
        match scope {
            SummaryScope::Day(d) => {
                summary::spender_totals(&self.book, &SummaryScope::Day(day_key(d)))
            }
            SummaryScope::Trip => summary::spender_totals(&self.book, scope),
        }
    }

    pub fn trip_totals(&self) -> TripTotals {
        summary::trip_totals(&self.book)
    }

    /// Records the person as most recently used for `kind` and as the
    /// default person for the next entry.
    pub fn remember_person(&mut self, name: &str, kind: TransactionKind) {
        let name = name.trim();
        if self.tags.remember(TagField::Person, kind, name) {
            self.save_tags(TagField::Person, kind);
            self.last_person = Some(name.to_string());
            self.persist(KEY_LAST_PERSON, name.to_string());
        }
    }

    pub fn remember_category(&mut self, name: &str, kind: TransactionKind) {
        if self.tags.remember(TagField::Category, kind, name.trim()) {
            self.save_tags(TagField::Category, kind);
        }
    }

    /// Drops a person from the recent list. Clears the default person when
    /// it is the one removed.
    pub fn forget_person(&mut self, name: &str, kind: TransactionKind) -> bool {
        let name = name.trim();
        let removed = self.tags.forget(TagField::Person, kind, name);
        self.save_tags(TagField::Person, kind);
        if self.last_person.as_deref() == Some(name) {
            self.last_person = None;
            self.persist(KEY_LAST_PERSON, String::new());
        }
        removed
    }

    pub fn forget_category(&mut self, name: &str, kind: TransactionKind) -> bool {
        let removed = self.tags.forget(TagField::Category, kind, name.trim());
        self.save_tags(TagField::Category, kind);
        removed
    }

    pub fn set_last_currency(&mut self, currency: &Currency) {
        self.last_currency = currency.clone();
        self.persist_json(KEY_LAST_CURRENCY, currency);
    }

    fn save_book(&mut self) {
        let json = serde_json::to_string(&self.book);
        match json {
            Ok(s) => self.persist(KEY_LEDGER, s),
            Err(e) => tracing::error!(key = KEY_LEDGER, error = %e, "could not encode ledger"),
        }
    }

    fn save_tags(&mut self, field: TagField, kind: TransactionKind) {
        let (key, legacy_key) = match (field, kind) {
            (TagField::Person, TransactionKind::Expense) => {
                (KEY_EXPENSE_PERSONS, KEY_LEGACY_PERSONS)
            }
            (TagField::Person, TransactionKind::Income) => (KEY_INCOME_PERSONS, KEY_LEGACY_PERSONS),
            (TagField::Category, TransactionKind::Expense) => {
                (KEY_EXPENSE_CATEGORIES, KEY_LEGACY_CATEGORIES)
            }
            (TagField::Category, TransactionKind::Income) => {
                (KEY_INCOME_CATEGORIES, KEY_LEGACY_CATEGORIES)
            }
        };
        let list = self.tags.list(field, kind).to_vec();
        let legacy = match field {
            TagField::Person => self.tags.persons.clone(),
            TagField::Category => self.tags.categories.clone(),
        };
        self.persist_json(key, &list);
        self.persist_json(legacy_key, &legacy);
    }

    fn persist_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(s) => self.persist(key, s),
            Err(e) => tracing::error!(key, error = %e, "could not encode value"),
        }
    }

    fn persist(&mut self, key: &str, value: String) {
        if let Err(e) = self.store.set(key, &value) {
            tracing::error!(key, error = %e, "write failed");
        }
    }
}
