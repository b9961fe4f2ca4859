//! Field values, rule parameters and the loose coercions rules rely on.
//!
//! Field values arrive as [`serde_json::Value`]: sources normally hand back
//! `Value::String`, and `None` / `Value::Null` both mean "no value". Rule
//! parameters are a small tagged enum so a single rule instance can carry a
//! number, a string, a list and a compiled pattern side by side.
//!
//! The numeric helpers reproduce script-style coercion on purpose: `"12px"`
//! parses as `12` through [`parse_float`] but is `NaN` through [`to_number`].
//! Rules pick whichever one their contract names.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
pub use serde_json::Value;

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap()
});

static INT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-]?)(?:0[xX]([0-9a-fA-F]+)|(\d+))").unwrap());

// ============================================================================
// PARAMETERS
// ============================================================================

/// One positional parameter of a rule instance.
#[derive(Debug, Clone)]
pub enum Param {
    /// Text parameter.
    Str(String),
    /// Numeric parameter.
    Num(f64),
    /// Boolean flag, e.g. the strict switch of `equals`.
    Bool(bool),
    /// A list, used by `in` / `notin`.
    List(Vec<Param>),
    /// A precompiled pattern, used by `regex` / `contains`.
    Pattern(Regex),
}

impl Param {
    /// Script `Number(param)`.
    pub fn to_number(&self) -> f64 {
        match self {
            Param::Str(s) => to_number(s),
            Param::Num(n) => *n,
            Param::Bool(b) => f64::from(u8::from(*b)),
            Param::List(_) => to_number(&self.to_string()),
            Param::Pattern(_) => f64::NAN,
        }
    }

    /// Script `parseFloat(param)`.
    pub fn parse_float(&self) -> f64 {
        match self {
            Param::Num(n) => *n,
            other => parse_float(&other.to_string()),
        }
    }

    /// Script `parseInt(param)`.
    pub fn parse_int(&self) -> f64 {
        match self {
            Param::Num(n) if n.is_finite() => n.trunc(),
            other => parse_int(&other.to_string()),
        }
    }

    /// `true` only for `Param::Bool(true)`.
    pub fn is_true(&self) -> bool {
        matches!(self, Param::Bool(true))
    }

    /// Loose (`==`) comparison against a string value.
    pub fn loosely_equals(&self, text: &str) -> bool {
        match self {
            Param::Str(s) => s == text,
            Param::Num(_) | Param::Bool(_) => to_number(text) == self.to_number(),
            Param::List(_) | Param::Pattern(_) => self.to_string() == text,
        }
    }

    /// Strict (`===`) comparison against a string value.
    pub fn strictly_equals(&self, text: &str) -> bool {
        matches!(self, Param::Str(s) if s == text)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Str(s) => f.write_str(s),
            Param::Num(n) => f.write_str(&format_number(*n)),
            Param::Bool(b) => write!(f, "{b}"),
            Param::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Param::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Str(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Str(value)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl From<Regex> for Param {
    fn from(value: Regex) -> Self {
        Param::Pattern(value)
    }
}

macro_rules! param_from_number {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Param {
                fn from(value: $ty) -> Self {
                    Param::Num(value as f64)
                }
            }
        )+
    };
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Num(value)
    }
}

param_from_number!(f32, i32, i64, u32, u64, usize);

impl<T: Into<Param>> From<Vec<T>> for Param {
    fn from(value: Vec<T>) -> Self {
        Param::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Param> + Clone> From<&[T]> for Param {
    fn from(value: &[T]) -> Self {
        Param::List(value.iter().cloned().map(Into::into).collect())
    }
}

// ============================================================================
// VALUE HELPERS
// ============================================================================

/// The text of a value, if it is a string.
pub fn as_text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}

/// `true` for an absent value, `null`, or a string that is only whitespace.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Script `String(value)`.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), format_number),
        other => other.to_string(),
    }
}

// ============================================================================
// NUMERIC COERCION
// ============================================================================

/// Script `Number(text)`: the whole trimmed string must be numeric, the
/// empty string is `0`, anything else is `NaN`.
pub fn to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let (sign, body) = match trimmed.as_bytes()[0] {
        b'-' => (-1.0, &trimmed[1..]),
        b'+' => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    if body == "Infinity" {
        return sign * f64::INFINITY;
    }

    if sign > 0.0 && trimmed.len() > 2 {
        let radix = match trimmed.get(..2) {
            Some("0x" | "0X") => Some(16),
            Some("0o" | "0O") => Some(8),
            Some("0b" | "0B") => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            return u64::from_str_radix(&trimmed[2..], radix).map_or(f64::NAN, |n| n as f64);
        }
    }

    let decimal_shaped = body
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal_shaped
        || body.starts_with(['+', '-'])
        || !body.bytes().any(|b| b.is_ascii_digit())
    {
        return f64::NAN;
    }

    body.parse::<f64>().map_or(f64::NAN, |n| sign * n)
}

/// Script `parseFloat(text)`: the longest numeric prefix after leading
/// whitespace, `NaN` if there is none.
pub fn parse_float(text: &str) -> f64 {
    let Some(found) = FLOAT_PREFIX.find(text.trim_start()) else {
        return f64::NAN;
    };

    let literal = found.as_str();
    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => literal.parse().unwrap_or(f64::NAN),
    }
}

/// Script `parseInt(text)` with radix detection for `0x`.
pub fn parse_int(text: &str) -> f64 {
    let Some(caps) = INT_PREFIX.captures(text.trim_start()) else {
        return f64::NAN;
    };

    let sign = if &caps[1] == "-" { -1.0 } else { 1.0 };
    let magnitude = if let Some(hex) = caps.get(2) {
        u128::from_str_radix(hex.as_str(), 16).map_or(f64::INFINITY, |n| n as f64)
    } else {
        caps[3].parse::<f64>().unwrap_or(f64::NAN)
    };

    sign * magnitude
}

/// Renders a number the way a script runtime would: integral values carry
/// no fraction, infinities are spelled out.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{n}")
    }
}
