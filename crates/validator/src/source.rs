//! Where field values come from.
//!
//! The engine never owns form data. It asks a [`FieldSource`] for the value
//! behind a fully qualified name every time a rule runs, so a source may be
//! backed by anything: a DOM bridge, a request body, a test map.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::value::Value;

/// Opaque handle to the element behind a field, passed through to custom
/// rules untouched.
pub type FieldHandle = Arc<dyn Any + Send + Sync>;

/// Lookup interface for field values.
///
/// Names passed to [`value`](Self::value) and [`is_checked`](Self::is_checked)
/// are already qualified (`prefix[field]` when a prefix is configured).
pub trait FieldSource: Send + Sync {
    /// Current value of the field, `None` when no such field exists.
    fn value(&self, qualified: &str) -> Option<Value>;

    /// Whether the control is checked. Sources without checkable controls
    /// can keep the default.
    fn is_checked(&self, _qualified: &str) -> bool {
        false
    }

    /// Element handle handed to custom rules.
    fn handle(&self, _field: &str, _prefix: Option<&str>) -> Option<FieldHandle> {
        None
    }
}

impl<S: FieldSource + ?Sized> FieldSource for Arc<S> {
    fn value(&self, qualified: &str) -> Option<Value> {
        (**self).value(qualified)
    }

    fn is_checked(&self, qualified: &str) -> bool {
        (**self).is_checked(qualified)
    }

    fn handle(&self, field: &str, prefix: Option<&str>) -> Option<FieldHandle> {
        (**self).handle(field, prefix)
    }
}

// ============================================================================
// IN-MEMORY SOURCE
// ============================================================================

#[derive(Default)]
struct Fields {
    values: HashMap<String, Value>,
    checked: HashSet<String>,
}

/// In-memory [`FieldSource`] keyed by qualified name.
///
/// Values can be changed through a shared reference, which makes it usable
/// as the live backing store of an engine that is already running.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::source::{FieldSource, MapSource};
///
/// let source = MapSource::new()
///     .with("email", "user@example.com")
///     .with("age", "42");
/// source.set("age", "43");
///
/// assert_eq!(source.value("age").unwrap(), "43");
/// ```
#[derive(Default)]
pub struct MapSource {
    fields: RwLock<Fields>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    #[must_use = "builder methods must be chained or built"]
    pub fn with(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Stores `value` under `name`, replacing what was there.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.write().values.insert(name.into(), value.into());
    }

    /// Removes the field; it reads as absent afterwards.
    pub fn remove(&self, name: &str) -> Option<Value> {
        self.fields.write().values.remove(name)
    }

    /// Marks the control behind `name` as checked or unchecked.
    pub fn set_checked(&self, name: impl Into<String>, checked: bool) {
        let mut fields = self.fields.write();
        let name = name.into();
        if checked {
            fields.checked.insert(name);
        } else {
            fields.checked.remove(&name);
        }
    }
}

impl FieldSource for MapSource {
    fn value(&self, qualified: &str) -> Option<Value> {
        self.fields.read().values.get(qualified).cloned()
    }

    fn is_checked(&self, qualified: &str) -> bool {
        self.fields.read().checked.contains(qualified)
    }
}

impl fmt::Debug for MapSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields.read();
        f.debug_struct("MapSource")
            .field("values", &fields.values)
            .field("checked", &fields.checked)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_and_remove_clears() {
        let source = MapSource::new().with("name", "Ada");
        source.set("name", "Grace");
        assert_eq!(source.value("name"), Some(Value::from("Grace")));

        assert!(source.remove("name").is_some());
        assert_eq!(source.value("name"), None);
    }

    #[test]
    fn checked_state_toggles() {
        let source = MapSource::new();
        assert!(!source.is_checked("terms"));
        source.set_checked("terms", true);
        assert!(source.is_checked("terms"));
        source.set_checked("terms", false);
        assert!(!source.is_checked("terms"));
    }

    #[test]
    fn shared_source_delegates() {
        let source = Arc::new(MapSource::new().with("user[id]", 7));
        assert_eq!(source.value("user[id]"), Some(Value::from(7)));
        assert!(source.handle("id", Some("user")).is_none());
    }
}
