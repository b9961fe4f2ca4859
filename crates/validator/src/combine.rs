//! Virtual fields assembled from several real fields.

use crate::messages::render_template;
use crate::value::{Value, stringify};

/// A field whose value is derived from other fields.
///
/// Values are joined with a glue string, or substituted into a `%s` format
/// template. Glue wins when both are configured. The field is only
/// addressable by rules once it has a name.
///
/// # Examples
///
/// ```
/// use fieldcheck_validator::combine::CombinedField;
/// use fieldcheck_validator::value::Value;
///
/// let date = CombinedField::new(["year", "month", "day"])
///     .with_glue("-")
///     .with_name("date");
///
/// let values = [Value::from("2024"), Value::from("02"), Value::from("29")];
/// assert_eq!(date.combine(&values), Some(Value::from("2024-02-29")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedField {
    sources: Vec<String>,
    glue: Option<String>,
    format: Option<String>,
    name: Option<String>,
}

impl CombinedField {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Joins source values with `glue`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_glue(mut self, glue: impl Into<String>) -> Self {
        self.set_glue(glue);
        self
    }

    /// Substitutes source values into `format`, one `%s` each.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.set_format(format);
        self
    }

    /// Name rules use to target this field.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    pub fn set_glue(&mut self, glue: impl Into<String>) -> &mut Self {
        self.glue = Some(glue.into());
        self
    }

    pub fn set_format(&mut self, format: impl Into<String>) -> &mut Self {
        self.format = Some(format.into());
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Real fields feeding this one, in order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn glue(&self) -> Option<&str> {
        self.glue.as_deref()
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Builds the virtual value from the current source values.
    ///
    /// Null values render as empty text. Returns `None` when there are no
    /// values or neither glue nor format is configured.
    pub fn combine(&self, values: &[Value]) -> Option<Value> {
        if values.is_empty() {
            return None;
        }

        let parts: Vec<String> = values
            .iter()
            .map(|v| if v.is_null() { String::new() } else { stringify(v) })
            .collect();

        if let Some(glue) = &self.glue {
            Some(Value::String(parts.join(glue.as_str())))
        } else {
            self.format
                .as_deref()
                .map(|format| Value::String(render_template(format, &parts)))
        }
    }
}
