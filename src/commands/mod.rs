// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};

use crate::models::UserId;

pub mod accounts;
pub mod assets;
pub mod budgets;
pub mod cards;
pub mod categories;
pub mod config;
pub mod dashboard;
pub mod doctor;
pub mod investments;
pub mod recurring;
pub mod reports;
pub mod transactions;

/// Who is acting, and on which day.
#[derive(Debug, Clone, Copy)]
pub struct Ctx {
    pub user: UserId,
    pub today: NaiveDate,
}

impl Ctx {
    /// `--month` when given, otherwise the current month.
    pub fn month_or_current(&self, m: &clap::ArgMatches) -> anyhow::Result<(u32, i32)> {
        match crate::utils::opt_arg(m, "month") {
            Some(s) => crate::utils::parse_month(s),
            None => Ok((self.today.month(), self.today.year())),
        }
    }
}
