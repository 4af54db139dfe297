//! Calendar-aware age and interval arithmetic.
//!
//! Chrono has no year/month/day difference, so the breakdown borrows manually: a negative day
//! difference borrows the length of the month before `today`, a negative month difference
//! borrows a year.
//!
//! The derived totals are deliberately approximate (30-day months, 4-week months). Eligibility
//! thresholds are defined against these approximations, so they must not be replaced with
//! exact day counts.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Years, months and days elapsed between an anchor date and a reference date.
///
/// Invariants: `months < 12` and `days <= 30`. When the day difference had to borrow, `days` is
/// also shorter than the borrowed month.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AgeBreakdown {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl AgeBreakdown {
    /// Compute the interval from `anchor` (a birth or delivery date) to `today`.
    ///
    /// A negative day difference borrows the length of the month before `today`. If that still
    /// leaves the days negative (31 January measured on 1 March), the anchor day is clamped to the
    /// borrowed month's last day, so 2020-01-31 to 2020-03-01 is one month and one day.
    ///
    /// An anchor later than `today` yields the zero breakdown.
    pub fn between(anchor: NaiveDate, today: NaiveDate) -> Self {
        if anchor >= today {
            return Self::default();
        }

        let mut years = today.year() - anchor.year();
        let mut months = today.month() as i32 - anchor.month() as i32;
        let mut days = today.day() as i32 - anchor.day() as i32;

        if days < 0 {
            months -= 1;
            let borrowed = days_in_previous_month(today) as i32;
            days += borrowed;
            if days < 0 {
                days = today.day() as i32 + borrowed - (anchor.day() as i32).min(borrowed);
            }
        }

        if months < 0 {
            years -= 1;
            months += 12;
        }

        Self {
            years: years.max(0) as u32,
            months: months as u32,
            days: days as u32,
        }
    }

    /// Whole months: `years * 12 + months`.
    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }

    /// Approximate day count using 30-day months: `total_months * 30 + days`.
    pub fn approx_total_days(&self) -> u32 {
        self.total_months() * 30 + self.days
    }

    /// Approximate week count using 52-week years and 4-week months.
    pub fn approx_weeks(&self) -> u32 {
        self.years * 52 + self.months * 4 + self.days / 7
    }
}

impl std::fmt::Display for AgeBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Length of the calendar month immediately before `date`'s month.
fn days_in_previous_month(date: NaiveDate) -> u32 {
    date.with_day(1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}
