// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, Result};
use crate::models::{Owned, UserId};

/// Unwraps a lookup and checks that the row belongs to `user`.
///
/// Must run before any write that depends on the row.
pub fn require_owned<T: Owned>(found: Option<T>, id: i64, user: UserId) -> Result<T> {
    let row = found.ok_or(LedgerError::NotFound {
        entity: T::ENTITY,
        id,
    })?;
    if row.owner() != user {
        tracing::warn!(entity = T::ENTITY, id, user, "rejected cross-user reference");
        return Err(LedgerError::OwnershipViolation {
            entity: T::ENTITY,
            id,
        });
    }
    Ok(row)
}

/// Like [`require_owned`] but for optional references.
pub fn require_owned_opt<T: Owned>(
    id: Option<i64>,
    user: UserId,
    lookup: impl FnOnce(i64) -> Result<Option<T>>,
) -> Result<Option<T>> {
    match id {
        Some(id) => require_owned(lookup(id)?, id, user).map(Some),
        None => Ok(None),
    }
}
