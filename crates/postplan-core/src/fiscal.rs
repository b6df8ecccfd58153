//! Fiscal calendar.
//!
//! The fiscal year starts in April: April is period 1, March is period 12.

use chrono::{Datelike, NaiveDate};

/// Calendar month in which fiscal period 1 starts.
pub const FISCAL_YEAR_START_MONTH: u32 = 4;

/// Fiscal period (1..=12) of `date`.
pub fn fiscal_period(date: NaiveDate) -> u32 {
    period_of_month(date.month())
}

/// Fiscal period (1..=12) of a calendar month (1..=12).
pub const fn period_of_month(month: u32) -> u32 {
    if month >= FISCAL_YEAR_START_MONTH {
        month - (FISCAL_YEAR_START_MONTH - 1)
    } else {
        month + (12 - (FISCAL_YEAR_START_MONTH - 1))
    }
}
