//! Field value resolution: combined fields first, then the source.

use crate::combine::CombinedField;
use crate::config::qualify;
use crate::rules::FieldResolver;
use crate::source::FieldSource;
use crate::value::Value;

/// Borrowed view over everything that can produce a field value.
#[derive(Clone, Copy)]
pub(crate) struct Resolver<'a> {
    pub(crate) source: &'a dyn FieldSource,
    pub(crate) combined: &'a [CombinedField],
    pub(crate) prefix: Option<&'a str>,
}

impl<'a> Resolver<'a> {
    /// The combined field registered under `name`, if any.
    pub(crate) fn combined(&self, name: &str) -> Option<&'a CombinedField> {
        self.combined.iter().find(|c| c.name() == Some(name))
    }

    /// Current value of `field`.
    ///
    /// A combined field reads its sources straight from the source (combined
    /// fields do not nest) and is rebuilt on every call.
    pub(crate) fn value(&self, field: &str) -> Option<Value> {
        if let Some(combined) = self.combined(field) {
            let values: Vec<Value> = combined
                .sources()
                .iter()
                .map(|source| self.lookup(source).unwrap_or(Value::Null))
                .collect();
            return combined.combine(&values);
        }

        self.lookup(field)
    }

    fn lookup(&self, field: &str) -> Option<Value> {
        self.source.value(&qualify(self.prefix, field))
    }
}

impl FieldResolver for Resolver<'_> {
    fn resolve(&self, field: &str) -> Option<Value> {
        self.value(field)
    }

    fn is_checked(&self, qualified: &str) -> bool {
        self.source.is_checked(qualified)
    }
}
