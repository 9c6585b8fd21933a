use thiserror::Error;

/// Input rejected before it reaches the calculators. Messages name the CLI
/// flag so they read the same from the terminal and the HTTP API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{flag} must be a finite number >= 0")]
    Negative { flag: &'static str },
    #[error("{flag} must be between {min} and {max}")]
    OutOfRange {
        flag: &'static str,
        min: i64,
        max: i64,
    },
    #[error("--from-spending, --from-saving and --from-investing must add up to 100 (got {total})")]
    Unbalanced { total: i32 },
    #[error("Invalid request payload: {0}")]
    Payload(String),
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

pub(crate) fn non_negative(flag: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(InputError::Negative { flag })
    }
}

pub(crate) fn within(flag: &'static str, value: i64, min: i64, max: i64) -> Result<i64, InputError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(InputError::OutOfRange { flag, min, max })
    }
}

pub(crate) fn rate_within(
    flag: &'static str,
    value: f64,
    min: i64,
    max: i64,
) -> Result<f64, InputError> {
    if value.is_finite() && (min as f64..=max as f64).contains(&value) {
        Ok(value)
    } else {
        Err(InputError::OutOfRange { flag, min, max })
    }
}
