//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into evaluation. Nothing in
//! the eligibility path reads environment variables or the system clock; callers turn "now"
//! into the clinic's calendar date here and hand that date to the evaluator.

use crate::{EligibilityError, EligibilityResult};
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    utc_offset: FixedOffset,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            utc_offset: utc(),
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig` for a clinic at the given UTC offset.
    pub fn new(utc_offset: FixedOffset) -> Self {
        Self { utc_offset }
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    /// The clinic-local calendar date at instant `now`.
    ///
    /// Ages are counted in calendar days at the clinic, so a child born late in the evening is
    /// one day old at the clinic's midnight regardless of where the server runs.
    pub fn clinic_today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.utc_offset).date_naive()
    }
}

/// Parse the clinic UTC offset from an optional string value.
///
/// Accepts `Z`, `+HH:MM` or `-HH:MM`. If `value` is `None` or empty/whitespace, UTC is used.
///
/// # Errors
///
/// Returns [`EligibilityError::InvalidInput`] if the value is not a valid offset.
pub fn utc_offset_from_env_value(value: Option<String>) -> EligibilityResult<FixedOffset> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(value) = value else {
        return Ok(utc());
    };
    if value.eq_ignore_ascii_case("z") {
        return Ok(utc());
    }

    value
        .parse::<FixedOffset>()
        .map_err(|e| EligibilityError::InvalidInput(format!("invalid UTC offset '{value}': {e}")))
}

fn utc() -> FixedOffset {
    Utc.fix()
}
