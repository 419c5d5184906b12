// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Portfolio totals. Investments are tracked on their own and do not feed
//! net worth.

use rust_decimal::Decimal;
use serde::Serialize;

use super::math::{checked_sum, percent_change, sub};
use crate::error::Result;
use crate::models::{Investment, UserId};
use crate::store::LedgerStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentSummary {
    pub positions: Vec<Investment>,
    pub invested: Decimal,
    pub current: Decimal,
    pub gain: Decimal,
    /// Gain relative to the invested total, 4 dp.
    pub gain_percentage: Decimal,
}

pub fn investment_summary<S: LedgerStore>(store: &S, user: UserId) -> Result<InvestmentSummary> {
    let positions = store.investments_of(user)?;
    let invested = checked_sum(positions.iter().map(|i| i.invested_amount))?;
    let current = checked_sum(positions.iter().map(|i| i.current_value))?;
    let gain = sub(current, invested)?;
    tracing::debug!(user, positions = positions.len(), %gain, "investment summary");
    Ok(InvestmentSummary {
        positions,
        invested,
        current,
        gain,
        gain_percentage: percent_change(current, invested),
    })
}
