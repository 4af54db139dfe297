use crate::eligibility::Status;
use vax_types::NonEmptyText;

#[derive(Debug, thiserror::Error)]
pub enum EligibilityError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{vaccine} cannot be administered ({status}): {label}")]
    NotAdministrable {
        vaccine: NonEmptyText,
        status: Status,
        label: String,
    },
}

pub type EligibilityResult<T> = std::result::Result<T, EligibilityError>;
