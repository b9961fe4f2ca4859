//! Error message rendering and storage.

use std::fmt;

use indexmap::IndexMap;

use crate::config::qualify;

const PLACEHOLDER: &str = "%s";

/// Replaces `%s` placeholders in `template` with `args`, left to right.
///
/// Placeholders without a matching argument stay as they are; surplus
/// arguments are ignored. Substituted text is never scanned again.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::messages::render_template;
///
/// assert_eq!(render_template("Between %s and %s", &[1, 10]), "Between 1 and 10");
/// assert_eq!(render_template("Between %s and %s", &[1]), "Between 1 and %s");
/// ```
pub fn render_template<T: fmt::Display>(template: &str, args: &[T]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();

    while let Some(at) = rest.find(PLACEHOLDER) {
        let Some(arg) = args.next() else { break };
        out.push_str(&rest[..at]);
        out.push_str(&arg.to_string());
        rest = &rest[at + PLACEHOLDER.len()..];
    }

    out.push_str(rest);
    out
}

/// Failure messages of one validation pass.
///
/// Every failure is stored twice: under the bare field name (short key) and
/// under the qualified `prefix[field]` name (full key). A later failure for
/// the same field overwrites the earlier one. Insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorStore {
    short: IndexMap<String, String>,
    full: IndexMap<String, String>,
}

impl ErrorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field`.
    pub fn record(&mut self, field: &str, prefix: Option<&str>, message: impl Into<String>) {
        let message = message.into();
        self.full.insert(qualify(prefix, field), message.clone());
        self.short.insert(field.to_string(), message);
    }

    pub fn clear(&mut self) {
        self.short.clear();
        self.full.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.short.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.short.len()
    }

    /// All messages keyed by qualified name when `full`, otherwise by field name.
    pub fn messages(&self, full: bool) -> &IndexMap<String, String> {
        if full { &self.full } else { &self.short }
    }

    /// Message for `field`, looked up by short key first, then full key.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.short
            .get(field)
            .or_else(|| self.full.get(field))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Param;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Maximum %s characters", &["10"], "Maximum 10 characters")]
    #[case("Must be between \"%s\" and \"%s\"", &["1", "10"], "Must be between \"1\" and \"10\"")]
    #[case("No placeholders", &["x"], "No placeholders")]
    #[case("%s and %s", &[], "%s and %s")]
    #[case("%s%s", &["%s", "b"], "%sb")]
    fn renders_templates(#[case] template: &str, #[case] args: &[&str], #[case] expected: &str) {
        assert_eq!(render_template(template, args), expected);
    }

    #[test]
    fn renders_params_in_script_notation() {
        let params = [Param::from(2), Param::from(2.5), Param::from(vec!["a", "b"])];
        assert_eq!(render_template("%s|%s|%s", &params), "2|2.5|a,b");
    }

    #[test]
    fn records_short_and_full_keys() {
        let mut store = ErrorStore::new();
        store.record("email", Some("user"), "Should be a valid email address");
        store.record("age", None, "Must be a number");

        assert_eq!(
            store.messages(false).keys().collect::<Vec<_>>(),
            ["email", "age"]
        );
        assert_eq!(
            store.messages(true).keys().collect::<Vec<_>>(),
            ["user[email]", "age"]
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn last_write_wins() {
        let mut store = ErrorStore::new();
        store.record("name", None, "Required");
        store.record("name", None, "Minimum 3 characters");
        assert_eq!(store.message("name"), Some("Minimum 3 characters"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn message_falls_back_to_full_key() {
        let mut store = ErrorStore::new();
        store.record("zip", Some("address"), "Invalid input");
        assert_eq!(store.message("zip"), Some("Invalid input"));
        assert_eq!(store.message("address[zip]"), Some("Invalid input"));
        assert_eq!(store.message("city"), None);
    }

    #[test]
    fn clear_empties_both_maps() {
        let mut store = ErrorStore::new();
        store.record("a", Some("p"), "x");
        store.clear();
        assert!(store.is_empty());
        assert!(store.messages(true).is_empty());
    }
}
