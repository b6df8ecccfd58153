//! Error types for plan compilation and replay.

use thiserror::Error;

/// Errors raised while classifying rows, extracting the header or compiling
/// the plan.
///
/// Every variant is produced before the first action reaches an actuator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// A required input collection is missing or empty.
    #[error("data shape error: {0}")]
    DataShape(String),

    /// A required header field is absent.
    #[error("missing field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },

    /// A field is present but cannot be parsed to its expected type.
    #[error("invalid value for {field}: '{value}' ({reason})")]
    Validation {
        /// Name of the offending field.
        field: String,
        /// The raw value found in the sheet.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// There are no bank movements to post.
    #[error("empty batch: no bank rows to post")]
    EmptyBatch,

    /// The user or the secret is blank.
    #[error("credential error: {0}")]
    Credential(String),
}

impl PlanError {
    /// Shorthand for [`PlanError::MissingField`].
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Shorthand for [`PlanError::Validation`].
    pub fn invalid(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Stable kind label used in reports.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DataShape(_) => "DataShapeError",
            Self::MissingField { .. } => "MissingFieldError",
            Self::Validation { .. } => "ValidationError",
            Self::EmptyBatch => "EmptyBatchError",
            Self::Credential(_) => "CredentialError",
        }
    }
}

/// An actuator rejected an action during replay.
///
/// The external message is kept exactly as the actuator reported it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("replay failed at step {step} ({action}): {message}")]
pub struct ReplayError {
    /// Zero-based index of the failing step in the replayed sequence.
    pub step: usize,
    /// Rendering of the failing action.
    pub action: String,
    /// Message reported by the external system.
    pub message: String,
}

/// Result alias for compilation.
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(PlanError::EmptyBatch.kind(), "EmptyBatchError");
        assert_eq!(PlanError::missing("territory").kind(), "MissingFieldError");
        assert_eq!(
            PlanError::invalid("REDONDEO", "abc", "not a number").kind(),
            "ValidationError"
        );
    }

    #[test]
    fn test_display_names_field() {
        let err = PlanError::missing("territory");
        assert_eq!(err.to_string(), "missing field: territory");

        let err = PlanError::invalid("Territorio", "north", "not numeric");
        assert_eq!(
            err.to_string(),
            "invalid value for Territorio: 'north' (not numeric)"
        );
    }

    #[test]
    fn test_replay_error_keeps_message() {
        let err = ReplayError {
            step: 3,
            action: "press wnd[0]/tbar[1]/btn[16]".to_string(),
            message: "E: Control could not be found by id.".to_string(),
        };
        assert!(err
            .to_string()
            .ends_with(": E: Control could not be found by id."));
    }
}
