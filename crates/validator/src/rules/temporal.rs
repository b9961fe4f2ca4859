//! Date rules backed by [`DateFormat`].

use chrono::NaiveDateTime;

use crate::date::{DateFormat, parse_date};
use crate::error::RuleResult;
use crate::rules::RuleContext;

/// Parses the field value and the comparison date (parameter 1) with the
/// format in parameter 2. `None` when either does not parse.
fn dates(
    ctx: &RuleContext<'_>,
    rule: &'static str,
) -> RuleResult<Option<(NaiveDateTime, NaiveDateTime)>> {
    let compare = ctx.require(rule, 0)?.to_string();
    let format = ctx.require(rule, 1)?.to_string();

    let Ok(format) = DateFormat::compile(&format) else {
        return Ok(None);
    };

    let value = ctx.text().and_then(|s| format.parse(s));
    Ok(value.zip(format.parse(&compare)))
}

crate::rule! {
    /// Date strictly later than parameter 1, both read with format parameter 2.
    pub After = "after", "Date should be after %s";
    check(ctx) {
        Ok(dates(ctx, Self::NAME)?.is_some_and(|(value, compare)| value > compare))
    }
}

crate::rule! {
    /// Date strictly earlier than parameter 1, both read with format parameter 2.
    pub Before = "before", "Date should be before %s";
    check(ctx) {
        Ok(dates(ctx, Self::NAME)?.is_some_and(|(value, compare)| value < compare))
    }
}

crate::rule! {
    /// Value is a real calendar date in format parameter 1.
    pub IsDate = "isdate", "Must be a valid date";
    check(ctx) {
        let format = ctx.require(Self::NAME, 0)?.to_string();
        Ok(parse_date(ctx.value(), &format).is_some())
    }
}
