//! Equality, membership and presence rules.

use crate::error::{RuleError, RuleResult};
use crate::rules::RuleContext;
use crate::value::{Param, Value};

/// Strict element match used by `in` / `notin` lists.
fn element_matches(element: &Param, value: &Value) -> bool {
    match (element, value) {
        (Param::Str(a), Value::String(b)) => a == b,
        (Param::Num(a), Value::Number(b)) => b.as_f64() == Some(*a),
        (Param::Bool(a), Value::Bool(b)) => a == b,
        _ => false,
    }
}

/// Whether the value is a member of `haystack`: an element of a list, or a
/// substring of a string.
fn is_member(rule: &'static str, haystack: &Param, value: Option<&Value>) -> RuleResult<bool> {
    match haystack {
        Param::List(items) => Ok(value.is_some_and(|v| items.iter().any(|e| element_matches(e, v)))),
        Param::Str(text) => Ok(value
            .and_then(Value::as_str)
            .is_some_and(|needle| text.contains(needle))),
        other => Err(RuleError::invalid(
            rule,
            format!("expected a list or a string, got `{other}`"),
        )),
    }
}

fn equals(ctx: &RuleContext<'_>, rule: &'static str) -> RuleResult<Option<bool>> {
    let expected = ctx.require(rule, 0)?;
    let strict = ctx.param(1).is_some_and(Param::is_true);

    Ok(ctx.text().map(|text| {
        if strict {
            expected.strictly_equals(text)
        } else {
            expected.loosely_equals(text)
        }
    }))
}

crate::rule! {
    /// The field's control is checked (checkbox, radio).
    pub Accepted = "accepted", "Must be accepted";
    rule(ctx) { ctx.is_checked() }
}

crate::rule! {
    /// Value differs from the value of the field named by parameter 1.
    pub Different = "different", "Can not have the same value as \"%s\" field";
    check(ctx) {
        let other = ctx.require(Self::NAME, 0)?.to_string();
        Ok(ctx.value() != ctx.other_value(&other).as_ref())
    }
}

crate::rule! {
    /// Value equals parameter 1. Parameter 2 `true` demands an exact string
    /// match; otherwise numbers and booleans compare after coercion.
    pub Equals = "equals", "Must be equal to \"%s\"";
    check(ctx) {
        Ok(equals(ctx, Self::NAME)?.unwrap_or(false))
    }
}

crate::rule! {
    /// Value does not equal parameter 1, compared like `equals`.
    pub NotEquals = "notequals", "Must not be equal to \"%s\"";
    check(ctx) {
        Ok(equals(ctx, Self::NAME)?.is_some_and(|equal| !equal))
    }
}

crate::rule! {
    /// Value is one of the list in parameter 1.
    pub In = "in", "Invalid input";
    check(ctx) {
        is_member(Self::NAME, ctx.require(Self::NAME, 0)?, ctx.value())
    }
}

crate::rule! {
    /// Value is none of the list in parameter 1.
    pub NotIn = "notin", "Invalid input";
    check(ctx) {
        Ok(!is_member(Self::NAME, ctx.require(Self::NAME, 0)?, ctx.value())?)
    }
}

crate::rule! {
    /// The field exists and has a value, even an empty one.
    pub Present = "present", "Required";
    rule(ctx) { ctx.value().is_some() }
}
