//! Errors raised by the mux at bind time and when building URLs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MuxError {
    /// The path template could not be compiled.
    #[error("invalid path template {template:?}: {reason}")]
    Pattern { template: String, reason: String },

    /// No binding carries the requested name.
    #[error("no route named {0:?}")]
    UnknownRoute(String),

    #[error("missing value for variable {name:?} in {template:?}")]
    MissingParam { template: String, name: String },

    /// A supplied value does not satisfy the variable's constraint.
    #[error("value {value:?} does not match the constraint of variable {name:?}")]
    InvalidParam { name: String, value: String },
}

impl MuxError {
    pub(crate) fn pattern(template: &str, reason: impl Into<String>) -> Self {
        MuxError::Pattern {
            template: template.to_string(),
            reason: reason.into(),
        }
    }
}
