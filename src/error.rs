// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures a ledger mutation reports back to the user.
///
/// Neither variant is retried; callers show the message and stop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A required field was empty, the amount was not a positive integer,
    /// or the date key was not a calendar day.
    #[error("{0}")]
    Validation(String),

    /// The day is locked and cannot be changed until it is unlocked.
    #[error("{0} is locked; unlock it before making changes")]
    LockedDate(String),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn locked(date_key: impl Into<String>) -> Self {
        Self::LockedDate(date_key.into())
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
