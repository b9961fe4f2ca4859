//! Numeric range and number-shape rules.
//!
//! `between`, `max` and `min` only look at string values and parse them with
//! [`parse_float`]; a value that is already a number fails. `isint` and
//! `isnumeric` accept both.

use crate::rules::RuleContext;
use crate::value::{Value, parse_float, parse_int, to_number};

/// The value parsed as a float, for string values only.
fn numeric_text(ctx: &RuleContext<'_>) -> Option<f64> {
    ctx.text().map(parse_float)
}

crate::rule! {
    /// Between parameter 1 and parameter 2, inclusive.
    pub Between = "between", "Must be between \"%s\" and \"%s\"";
    check(ctx) {
        let low = ctx.require(Self::NAME, 0)?.parse_float();
        let high = ctx.require(Self::NAME, 1)?.parse_float();
        Ok(numeric_text(ctx).is_some_and(|n| n >= low && n <= high))
    }
}

crate::rule! {
    /// At most parameter 1.
    pub Max = "max", "Must be less than or equal to %s";
    check(ctx) {
        let max = ctx.require(Self::NAME, 0)?.parse_float();
        Ok(numeric_text(ctx).is_some_and(|n| n <= max))
    }
}

crate::rule! {
    /// At least parameter 1.
    pub Min = "min", "Must be greater than or equal to %s";
    check(ctx) {
        let min = ctx.require(Self::NAME, 0)?.parse_float();
        Ok(numeric_text(ctx).is_some_and(|n| n >= min))
    }
}

crate::rule! {
    /// An integral number, or a string whose integer prefix is the whole value.
    pub IsInt = "isint", "Must be an integer number";
    rule(ctx) {
        match ctx.value() {
            Some(Value::String(s)) => parse_int(s) == to_number(s),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0),
            _ => false,
        }
    }
}

crate::rule! {
    /// A finite number, or a string that reads as one.
    pub IsNumeric = "isnumeric", "Must be a number";
    rule(ctx) {
        match ctx.value() {
            Some(Value::String(s)) => !parse_float(s).is_nan() && to_number(s).is_finite(),
            Some(Value::Number(n)) => n.as_f64().is_some_and(f64::is_finite),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleError;
    use crate::rules::RuleDefinition;
    use crate::value::Param;
    use crate::rules::testing::{check_text, check_value, passes};
    use rstest::rstest;

    #[rstest]
    #[case("5", true)]
    #[case("1", true)]
    #[case("10", true)]
    #[case("0", false)]
    #[case("11", false)]
    #[case("10.0001", false)]
    #[case("7px", true)]
    #[case("abc", false)]
    #[case("", false)]
    fn between(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(passes(&Between, input, &[1.into(), 10.into()]), expected);
    }

    #[test]
    fn bounds_may_be_strings() {
        assert!(passes(&Between, "2.5", &["2".into(), "3".into()]));
        assert!(passes(&Max, "3", &["3".into()]));
        assert!(!passes(&Min, "2.99", &["3".into()]));
    }

    #[test]
    fn max_and_min() {
        assert!(passes(&Max, "9", &[10.into()]));
        assert!(!passes(&Max, "10.5", &[10.into()]));
        assert!(passes(&Min, "-1", &[(-1).into()]));
        assert!(!passes(&Min, "-1.5", &[(-1).into()]));
    }

    #[rstest]
    #[case(&Between)]
    #[case(&Max)]
    #[case(&Min)]
    fn numeric_typed_values_always_fail(#[case] rule: &dyn RuleDefinition) {
        let params: [Param; 2] = [0.into(), 100.into()];
        assert!(!check_value(rule, Some(Value::from(5)), &params).unwrap());
        assert!(!check_value(rule, None, &params).unwrap());
    }

    #[rstest]
    #[case("42", true)]
    #[case(" 42 ", true)]
    #[case("-7", true)]
    #[case("4.0", true)]
    #[case("4.5", false)]
    #[case("4a", false)]
    #[case("abc", false)]
    #[case("", false)]
    fn isint_strings(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(passes(&IsInt, input, &[]), expected);
    }

    #[test]
    fn isint_numbers() {
        assert!(check_value(&IsInt, Some(Value::from(3)), &[]).unwrap());
        assert!(!check_value(&IsInt, Some(Value::from(3.5)), &[]).unwrap());
        assert!(!check_value(&IsInt, Some(Value::Bool(true)), &[]).unwrap());
    }

    #[rstest]
    #[case("3.14", true)]
    #[case("-0.5", true)]
    #[case("1e3", true)]
    #[case("0x1A", true)]
    #[case("12abc", false)]
    #[case("", false)]
    #[case("   ", false)]
    #[case("Infinity", false)]
    fn isnumeric_strings(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(passes(&IsNumeric, input, &[]), expected);
    }

    #[test]
    fn isnumeric_numbers() {
        assert!(check_value(&IsNumeric, Some(Value::from(2.5)), &[]).unwrap());
        assert!(!check_value(&IsNumeric, None, &[]).unwrap());
    }

    #[test]
    fn bounded_rules_require_their_bounds() {
        assert_eq!(
            check_text(&Between, "5", &[]).unwrap_err(),
            RuleError::missing("between", 1)
        );
        assert_eq!(
            check_text(&Between, "5", &[1.into()]).unwrap_err(),
            RuleError::missing("between", 2)
        );
        assert_eq!(
            check_text(&Max, "5", &[]).unwrap_err(),
            RuleError::missing("max", 1)
        );
        assert_eq!(
            check_text(&Min, "5", &[]).unwrap_err(),
            RuleError::missing("min", 1)
        );
    }
}
