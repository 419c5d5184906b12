// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Rounding, percentages and calendar helpers shared by the calculators.
//!
//! Percentages are rounded to four decimal places, half away from zero.
//! A zero (or negative, for limits) denominator never errors: the result
//! falls back to a fixed default. Sums that leave `Decimal`'s range do
//! error, with `InvalidAmount`.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{LedgerError, Result};
use crate::models::{Kind, Transaction};

pub const PERCENT_DP: u32 = 4;

pub fn round_percent(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(PERCENT_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole * 100`, or zero when `whole <= 0`.
///
/// The quotient is rounded after scaling, so 320.50 of 800 is 40.0625.
/// Rounding the ratio first and then scaling would give 40.06.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .map(round_percent)
        .unwrap_or(Decimal::ZERO)
}

/// Relative change from `baseline` to `current`, in percent.
///
/// A zero baseline yields 100 when `current` moved away from zero and 0 when
/// both are zero.
pub fn percent_change(current: Decimal, baseline: Decimal) -> Decimal {
    if baseline.is_zero() {
        return if current.is_zero() {
            Decimal::ZERO
        } else {
            Decimal::ONE_HUNDRED
        };
    }
    current
        .checked_sub(baseline)
        .and_then(|delta| delta.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|scaled| scaled.checked_div(baseline))
        .map(round_percent)
        .unwrap_or(Decimal::ZERO)
}

fn out_of_range(op: &str, a: Decimal, b: Decimal) -> LedgerError {
    LedgerError::InvalidAmount(format!("{} {} {} is out of range", a, op, b))
}

pub fn add(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_add(b).ok_or_else(|| out_of_range("+", a, b))
}

pub fn sub(a: Decimal, b: Decimal) -> Result<Decimal> {
    a.checked_sub(b).ok_or_else(|| out_of_range("-", a, b))
}

pub fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Result<Decimal> {
    values.into_iter().try_fold(Decimal::ZERO, add)
}

/// Income and expense totals, in that order.
pub fn totals<'a>(txs: impl IntoIterator<Item = &'a Transaction>) -> Result<(Decimal, Decimal)> {
    txs.into_iter()
        .try_fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), t| match t.kind {
            Kind::Income => Ok((add(inc, t.amount)?, exp)),
            Kind::Expense => Ok((inc, add(exp, t.amount)?)),
        })
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// First and last calendar day of `month`/`year`.
pub fn month_bounds(month: u32, year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || LedgerError::InvalidRange(format!("no such month {}-{:02}", year, month));
    let last = days_in_month(year, month).ok_or_else(invalid)?;
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let end = NaiveDate::from_ymd_opt(year, month, last).ok_or_else(invalid)?;
    Ok((start, end))
}

/// Month bounds of the month containing `date`.
pub fn month_of(date: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    month_bounds(date.month(), date.year())
}

/// Month bounds of the calendar month before the one containing `date`.
pub fn previous_month_of(date: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let (start, _) = month_of(date)?;
    let last_of_previous = start
        .pred_opt()
        .ok_or_else(|| LedgerError::InvalidRange(format!("no month before {}", start)))?;
    month_of(last_of_previous)
}

/// `day` in `month`/`year`, pulled back to the month's last day when it
/// overshoots (31 in April is the 30th).
pub fn clamp_day(day: u32, month: u32, year: i32) -> Result<NaiveDate> {
    let (start, end) = month_bounds(month, year)?;
    let day = day.clamp(1, end.day());
    start
        .with_day(day)
        .ok_or_else(|| LedgerError::InvalidRange(format!("day {} of {}", day, start)))
}
