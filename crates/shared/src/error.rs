use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::RunPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    RunActive,
    InvalidTransition,
    Validation,
}

/// Serializable form of a rejected control action, carried on the event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRejection {
    pub code: ErrorCode,
    pub message: String,
}

impl ControlRejection {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("cannot {action} while a run is active")]
    RunActive { action: &'static str },
    #[error("cannot {action} from the {phase} phase")]
    InvalidTransition {
        action: &'static str,
        phase: RunPhase,
    },
    #[error("array size {requested} outside {min}..={max}")]
    InvalidSize {
        requested: usize,
        min: usize,
        max: usize,
    },
    #[error("speed {raw} outside {min}..={max}")]
    InvalidSpeed { raw: u8, min: u8, max: u8 },
    #[error("invalid value range {low}..={high}")]
    InvalidValueRange { low: u32, high: u32 },
    #[error("value at index {index} must be positive")]
    NonPositiveValue { index: usize },
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),
}

impl ControlError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ControlError::RunActive { .. } => ErrorCode::RunActive,
            ControlError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            ControlError::InvalidSize { .. }
            | ControlError::InvalidSpeed { .. }
            | ControlError::InvalidValueRange { .. }
            | ControlError::NonPositiveValue { .. }
            | ControlError::UnknownAlgorithm(_) => ErrorCode::Validation,
        }
    }
}

impl From<&ControlError> for ControlRejection {
    fn from(value: &ControlError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
