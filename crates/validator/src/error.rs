//! Configuration faults raised while running a validation pass.
//!
//! A field that does not satisfy a rule is *not* an error in this sense: it
//! is recorded in the [`ErrorStore`](crate::messages::ErrorStore) and the
//! pass carries on. The variants below mean a rule was wired incorrectly
//! (unknown name, missing or malformed parameter) and abort `exec()`.

use std::borrow::Cow;

/// A rule declaration the engine cannot evaluate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// No predicate is registered under this name.
    #[error("Unknown validation rule \"{name}\"")]
    UnknownRule {
        /// The name that failed to resolve.
        name: String,
    },

    /// A required positional parameter was not supplied.
    #[error("Missing argument {position} for \"{rule}\" rule")]
    MissingArgument {
        /// Rule name as registered.
        rule: Cow<'static, str>,
        /// 1-based parameter position.
        position: usize,
    },

    /// A parameter was supplied but has the wrong shape.
    #[error("Argument for \"{rule}\" rule is invalid: {reason}")]
    InvalidArgument {
        /// Rule name as registered.
        rule: Cow<'static, str>,
        /// What was wrong with it.
        reason: String,
    },
}

impl RuleError {
    pub(crate) fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownRule { name: name.into() }
    }

    pub(crate) fn missing(rule: &'static str, position: usize) -> Self {
        Self::MissingArgument {
            rule: Cow::Borrowed(rule),
            position,
        }
    }

    pub(crate) fn invalid(rule: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            rule: Cow::Borrowed(rule),
            reason: reason.into(),
        }
    }
}

/// Result alias used by predicates and the engine.
pub type RuleResult<T> = Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_argument_message_names_position_and_rule() {
        let err = RuleError::missing("between", 2);
        assert_eq!(err.to_string(), "Missing argument 2 for \"between\" rule");
    }

    #[test]
    fn unknown_rule_message() {
        let err = RuleError::unknown("lenght");
        assert!(err.to_string().contains("lenght"));
    }
}
