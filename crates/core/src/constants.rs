//! Verdict labels shown to clinic staff.
//!
//! The wording is the registry's established Portuguese text; staff and printed cards rely on
//! it, so it is kept verbatim.

/// Scheme finished.
pub const LABEL_COMPLETE: &str = "Completo";

/// Next dose may be given.
pub const LABEL_DUE: &str = "Pendente";

pub const LABEL_BLOCKED_OVER_ONE_YEAR: &str = "Bloqueado (>1 ano)";
pub const LABEL_BLOCKED_OVER_24_HOURS: &str = "Bloqueado (>24h)";
pub const LABEL_BLOCKED_OVER_FOUR_MONTHS: &str = "Bloqueado (>4 meses)";
pub const LABEL_BLOCKED_OVER_TWO_YEARS: &str = "Bloqueado (>2 anos)";
pub const LABEL_HPV_GIRLS_ONLY: &str = "Apenas meninas 9-12 anos";
pub const LABEL_BLOCKED_POSTPARTUM: &str = "Bloqueado (Pós-parto)";
pub const LABEL_POSTPARTUM_ONLY: &str = "Apenas Puérperas";
pub const LABEL_BLOCKED_OVER_EIGHT_WEEKS: &str = "Bloqueado (>8 semanas)";
pub const LABEL_BLOCKED_OVER_FIVE_YEARS: &str = "Bloqueado (>5 anos)";

/// BCG is blocked from this age (years).
pub const BCG_LIMIT_YEARS: u32 = 1;

/// Birth doses are given within this many approximate days of birth.
pub const BIRTH_DOSE_MAX_DAYS: u32 = 1;

/// First rotavirus dose must start by this many whole months.
pub const ROTAVIRUS_FIRST_DOSE_MAX_MONTHS: u32 = 4;

/// Pentavalent/pneumococcal schemes cannot be started from this age (years).
pub const PENTA_PNEUMO_START_LIMIT_YEARS: u32 = 2;

pub const HPV_MIN_YEARS: u32 = 9;
pub const HPV_MAX_YEARS: u32 = 12;

/// Vitamin A is given within this many approximate weeks of delivery.
pub const VITAMIN_A_MAX_WEEKS: u32 = 8;

/// Child-targeted vaccines are blocked from this age (years).
pub const CHILD_LIMIT_YEARS: u32 = 5;
