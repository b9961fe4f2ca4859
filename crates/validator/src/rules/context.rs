//! Per-evaluation input handed to a rule.

use crate::config::qualify;
use crate::error::{RuleError, RuleResult};
use crate::value::{Param, Value, as_text};

/// Lets a rule look at fields other than the one it is attached to.
///
/// The engine implements this over its [`FieldSource`](crate::source::FieldSource)
/// and combined fields.
pub trait FieldResolver {
    /// Current value of `field` (unqualified; the resolver applies the prefix).
    fn resolve(&self, field: &str) -> Option<Value>;

    /// Whether the control behind the fully qualified name is checked.
    fn is_checked(&self, qualified: &str) -> bool;
}

/// Resolver that knows no fields. Used when a rule is evaluated standalone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFields;

impl FieldResolver for NoFields {
    fn resolve(&self, _field: &str) -> Option<Value> {
        None
    }

    fn is_checked(&self, _qualified: &str) -> bool {
        false
    }
}

/// Everything a rule may read while deciding one field.
///
/// Built by the engine for exactly one predicate call and dropped right after.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::rules::{Between, RuleContext, RuleDefinition};
/// use fieldcheck_validator::value::{Param, Value};
///
/// let value = Value::from("5");
/// let params = [Param::from(1), Param::from(10)];
/// let ctx = RuleContext::new("age", Some(&value), &params);
/// assert!(Between.check(&ctx).unwrap());
/// ```
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    field: &'a str,
    prefix: Option<&'a str>,
    params: &'a [Param],
    message: Option<&'a str>,
    value: Option<&'a Value>,
    resolver: &'a dyn FieldResolver,
}

impl<'a> RuleContext<'a> {
    /// Context for `field` with no prefix, message override or resolver.
    pub fn new(field: &'a str, value: Option<&'a Value>, params: &'a [Param]) -> Self {
        Self {
            field,
            prefix: None,
            params,
            message: None,
            value,
            resolver: &NoFields,
        }
    }

    /// Sets the prefix the field was looked up under.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_prefix(mut self, prefix: Option<&'a str>) -> Self {
        self.prefix = prefix;
        self
    }

    /// Sets the message override of the rule instance.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    /// Sets the resolver used for cross-field rules.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_resolver(mut self, resolver: &'a dyn FieldResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn field(&self) -> &'a str {
        self.field
    }

    pub fn prefix(&self) -> Option<&'a str> {
        self.prefix
    }

    pub fn params(&self) -> &'a [Param] {
        self.params
    }

    pub fn message(&self) -> Option<&'a str> {
        self.message
    }

    pub fn value(&self) -> Option<&'a Value> {
        self.value.filter(|v| !v.is_null())
    }

    /// The value as text; `None` for absent and non-string values.
    pub fn text(&self) -> Option<&'a str> {
        as_text(self.value)
    }

    /// Parameter at `index` (0-based), if given.
    pub fn param(&self, index: usize) -> Option<&'a Param> {
        self.params.get(index)
    }

    /// Parameter at `index`, or a [`RuleError::MissingArgument`] for `rule`.
    pub fn require(&self, rule: &'static str, index: usize) -> RuleResult<&'a Param> {
        self.param(index)
            .ok_or_else(|| RuleError::missing(rule, index + 1))
    }

    /// Current value of another field, honouring prefix and combined fields.
    pub fn other_value(&self, field: &str) -> Option<Value> {
        self.resolver.resolve(field).filter(|v| !v.is_null())
    }

    /// Whether this field's control is checked.
    pub fn is_checked(&self) -> bool {
        self.resolver
            .is_checked(&qualify(self.prefix, self.field))
    }
}

impl std::fmt::Debug for RuleContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleContext")
            .field("field", &self.field)
            .field("prefix", &self.prefix)
            .field("params", &self.params)
            .field("message", &self.message)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
