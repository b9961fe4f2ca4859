use crate::engine::custom::CustomRule;
use crate::value::Param;

/// What runs for a rule instance.
#[derive(Debug, Clone)]
pub(crate) enum RuleKind {
    /// Catalog name, looked up in the registry when the pass runs.
    Builtin(String),
    Custom(CustomRule),
}

/// One (field, rule, parameters) attachment.
#[derive(Debug, Clone)]
pub(crate) struct RuleInstance {
    pub(crate) field: String,
    pub(crate) kind: RuleKind,
    pub(crate) params: Vec<Param>,
    pub(crate) message: Option<String>,
}

impl RuleInstance {
    pub(crate) fn builtin(field: &str, name: &str, params: Vec<Param>) -> Self {
        Self {
            field: field.to_string(),
            kind: RuleKind::Builtin(name.to_string()),
            params,
            message: None,
        }
    }

    pub(crate) fn custom(field: &str, rule: CustomRule) -> Self {
        Self {
            field: field.to_string(),
            kind: RuleKind::Custom(rule),
            params: Vec::new(),
            message: None,
        }
    }

    /// Catalog name for built-in instances.
    pub(crate) fn rule_name(&self) -> Option<&str> {
        match &self.kind {
            RuleKind::Builtin(name) => Some(name),
            RuleKind::Custom(_) => None,
        }
    }
}
