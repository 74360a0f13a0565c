// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recently used persons and categories, kept separately for expenses and
//! income. Every list is most-recent-first and holds each value once.
//!
//! The combined `persons`/`categories` lists predate the expense/income
//! split. They are still maintained and persisted so older readers of the
//! store keep working, but nothing in the ledger reads them for logic.

use crate::models::TransactionKind;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagHistory {
    pub expense_persons: Vec<String>,
    pub income_persons: Vec<String>,
    pub expense_categories: Vec<String>,
    pub income_categories: Vec<String>,
    pub persons: Vec<String>,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagField {
    Person,
    Category,
}

impl TagField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Category => "category",
        }
    }
}

/// Moves `value` to the front of `list`, dropping any earlier copy.
pub fn move_to_front(list: &mut Vec<String>, value: &str) {
    list.retain(|v| v != value);
    list.insert(0, value.to_string());
}

fn dedup_keep_first(list: &mut Vec<String>) {
    let mut seen = Vec::with_capacity(list.len());
    list.retain(|v| {
        if seen.contains(v) {
            false
        } else {
            seen.push(v.clone());
            true
        }
    });
}

impl TagHistory {
    pub fn list(&self, field: TagField, kind: TransactionKind) -> &[String] {
        match (field, kind) {
            (TagField::Person, TransactionKind::Expense) => &self.expense_persons,
            (TagField::Person, TransactionKind::Income) => &self.income_persons,
            (TagField::Category, TransactionKind::Expense) => &self.expense_categories,
            (TagField::Category, TransactionKind::Income) => &self.income_categories,
        }
    }

    fn list_mut(&mut self, field: TagField, kind: TransactionKind) -> &mut Vec<String> {
        match (field, kind) {
            (TagField::Person, TransactionKind::Expense) => &mut self.expense_persons,
            (TagField::Person, TransactionKind::Income) => &mut self.income_persons,
            (TagField::Category, TransactionKind::Expense) => &mut self.expense_categories,
            (TagField::Category, TransactionKind::Income) => &mut self.income_categories,
        }
    }

    fn legacy_mut(&mut self, field: TagField) -> &mut Vec<String> {
        match field {
            TagField::Person => &mut self.persons,
            TagField::Category => &mut self.categories,
        }
    }

    /// Records a use of `value`. Empty values are ignored.
    pub fn remember(&mut self, field: TagField, kind: TransactionKind, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        move_to_front(self.legacy_mut(field), value);
        move_to_front(self.list_mut(field, kind), value);
        true
    }

    /// Removes `value` from the kind's list and the combined list.
    pub fn forget(&mut self, field: TagField, kind: TransactionKind, value: &str) -> bool {
        let list = self.list_mut(field, kind);
        let before = list.len();
        list.retain(|v| v != value);
        let removed = list.len() != before;
        self.legacy_mut(field).retain(|v| v != value);
        removed
    }

    /// Restores uniqueness after loading lists written by another program.
    pub fn normalize(&mut self) {
        for list in [
            &mut self.expense_persons,
            &mut self.income_persons,
            &mut self.expense_categories,
            &mut self.income_categories,
            &mut self.persons,
            &mut self.categories,
        ] {
            dedup_keep_first(list);
        }
    }

    /// Builds the combined lists from the split ones when none were stored.
    pub fn fill_legacy_from_split(&mut self) {
        if self.persons.is_empty() {
            self.persons = [self.expense_persons.clone(), self.income_persons.clone()].concat();
            dedup_keep_first(&mut self.persons);
        }
        if self.categories.is_empty() {
            self.categories = [
                self.expense_categories.clone(),
                self.income_categories.clone(),
            ]
            .concat();
            dedup_keep_first(&mut self.categories);
        }
    }
}
