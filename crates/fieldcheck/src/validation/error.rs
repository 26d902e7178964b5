use crate::{SharedString, error::Error};
use std::fmt;

/// An error which aborts a rule check instead of being recorded as a message.
#[derive(Debug)]
#[non_exhaustive]
pub enum RuleError {
    /// The rule was invoked with missing or invalid parameters.
    Malformed {
        /// Rule name.
        rule: String,
        /// Reason.
        reason: SharedString,
    },
    /// The database query behind the `unique` rule failed.
    Dependency(Error),
    /// The `unique` rule was invoked without a row counter.
    DatabaseUnavailable,
}

impl RuleError {
    /// Creates a new error for a malformed rule invocation.
    #[inline]
    pub fn malformed(rule: impl ToString, reason: impl Into<SharedString>) -> Self {
        Self::Malformed {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error is caused by the rule invocation itself.
    #[inline]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { rule, reason } => {
                write!(f, "malformed invocation of the rule `{rule}`: {reason}")
            }
            Self::Dependency(err) => write!(f, "fail to check uniqueness: {err}"),
            Self::DatabaseUnavailable => {
                write!(f, "the `unique` rule requires a row counter")
            }
        }
    }
}

impl std::error::Error for RuleError {}
