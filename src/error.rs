// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Errors raised by the ledger engine.
//!
//! Ownership and existence checks run before any write, so an
//! [`OwnershipViolation`] or [`NotFound`] always means nothing was changed.
//! Zero denominators are never errors; see [`crate::ledger::math`].
//!
//!  [`OwnershipViolation`]: LedgerError::OwnershipViolation
//!  [`NotFound`]: LedgerError::NotFound
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("{entity} {id} does not belong to the acting user")]
    OwnershipViolation { entity: &'static str, id: i64 },
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("\"{0}\" already present")]
    Duplicate(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid value: {0}")]
    Parse(String),
    #[error("Corrupt stored value: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

impl PartialEq for LedgerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::OwnershipViolation { entity: a, id: x },
                Self::OwnershipViolation { entity: b, id: y },
            ) => a == b && x == y,
            (Self::NotFound { entity: a, id: x }, Self::NotFound { entity: b, id: y }) => {
                a == b && x == y
            }
            (Self::InvalidRange(a), Self::InvalidRange(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::Duplicate(a), Self::Duplicate(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Parse(a), Self::Parse(b)) => a == b,
            (Self::Corrupt(a), Self::Corrupt(b)) => a == b,
            (Self::Storage(a), Self::Storage(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
