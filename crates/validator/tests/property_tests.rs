//! Property-based tests for fieldcheck-validator.

use fieldcheck_validator::combine::CombinedField;
use fieldcheck_validator::date::DateFormat;
use fieldcheck_validator::messages::{ErrorStore, render_template};
use fieldcheck_validator::prelude::*;
use fieldcheck_validator::rules::{Between, LengthMax, MaxWords, Words};
use fieldcheck_validator::value::{format_number, parse_float, to_number};
use proptest::prelude::*;

fn check(rule: &dyn RuleDefinition, value: &str, params: &[Param]) -> bool {
    let value = Value::from(value);
    rule.check(&RuleContext::new("field", Some(&value), params))
        .unwrap()
}

// ============================================================================
// NUMERIC COERCION
// ============================================================================

proptest! {
    #[test]
    fn integers_survive_text_round_trip(n in -1_000_000_000i64..1_000_000_000) {
        let text = format_number(n as f64);
        prop_assert_eq!(text.clone(), n.to_string());
        prop_assert_eq!(to_number(&text), n as f64);
        prop_assert_eq!(parse_float(&text), n as f64);
    }

    #[test]
    fn between_matches_plain_comparison(
        value in -500i32..500,
        low in -500i32..500,
        span in 0i32..500,
    ) {
        let high = low + span;
        let passed = check(&Between, &value.to_string(), &[low.into(), high.into()]);
        prop_assert_eq!(passed, value >= low && value <= high);
    }

    #[test]
    fn numeric_trailing_garbage_still_uses_prefix(value in 0u32..10_000, tail in "[a-z]{1,5}") {
        let text = format!("{value}{tail}");
        prop_assert!(check(&Between, &text, &[value.into(), value.into()]));
    }
}

// ============================================================================
// LENGTH AND WORDS
// ============================================================================

proptest! {
    #[test]
    fn lengthmax_counts_characters(s in "\\PC{0,40}", max in 0usize..50) {
        let passed = check(&LengthMax, &s, &[max.into()]);
        prop_assert_eq!(passed, s.chars().count() <= max);
    }

    #[test]
    fn words_counts_whitespace_separated_runs(words in prop::collection::vec("[a-z]{1,8}", 0..12)) {
        let text = words.join("  ");
        prop_assert!(check(&Words, &text, &[words.len().into()]));
        prop_assert!(check(&MaxWords, &text, &[words.len().into()]));
    }
}

// ============================================================================
// TEMPLATES AND STORE
// ============================================================================

proptest! {
    #[test]
    fn templates_without_placeholders_are_untouched(template in "[^%]{0,40}", arg in ".{0,10}") {
        prop_assert_eq!(render_template(&template, &[arg]), template);
    }

    #[test]
    fn each_argument_fills_one_placeholder(args in prop::collection::vec("[a-z0-9]{0,6}", 0..6)) {
        let template = vec!["%s"; args.len() + 1].join("|");
        let rendered = render_template(&template, &args);
        let expected = format!("{}|%s", args.join("|"));
        prop_assert_eq!(rendered.trim_start_matches('|'), expected.trim_start_matches('|'));
    }

    #[test]
    fn store_keeps_last_message_per_field(messages in prop::collection::vec(".{0,12}", 1..8)) {
        let mut store = ErrorStore::new();
        for message in &messages {
            store.record("field", Some("form"), message.as_str());
        }
        prop_assert_eq!(store.len(), 1);
        prop_assert_eq!(store.message("field"), messages.last().map(String::as_str));
        prop_assert_eq!(store.message("form[field]"), messages.last().map(String::as_str));
    }

    #[test]
    fn glue_join_matches_std_join(
        parts in prop::collection::vec("[a-z]{0,6}", 1..6),
        glue in "[-/ .]{0,2}",
    ) {
        let values: Vec<Value> = parts.iter().map(|p| Value::from(p.as_str())).collect();
        let field = CombinedField::new(parts.iter().map(|_| "src")).with_glue(glue.clone());
        prop_assert_eq!(field.combine(&values), Some(Value::from(parts.join(glue.as_str()))));
    }
}

// ============================================================================
// DATES
// ============================================================================

proptest! {
    #[test]
    fn parse_never_panics(input in "\\PC{0,20}", format in "[YymndjgGhHis/.: -]{0,8}") {
        if let Ok(compiled) = DateFormat::compile(&format) {
            let _ = compiled.parse(&input);
        }
    }

    #[test]
    fn day_past_month_end_is_rejected(year in 1900i32..2100, month in 1u32..=12) {
        let format = DateFormat::compile("Y-m-d").unwrap();
        let text = format!("{year:04}-{month:02}-32");
        prop_assert!(format.parse(&text).is_none());

        let last = (28..=31)
            .rev()
            .find(|day| format.parse(&format!("{year:04}-{month:02}-{day:02}")).is_some());
        prop_assert!(last.is_some());
    }
}
