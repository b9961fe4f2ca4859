//! Chainable handles returned by `field`, `extend` and `set_message`.

use std::collections::HashMap;

use tracing::warn;

use crate::engine::instance::RuleInstance;
use crate::rules::{
    Accepted, After, Alpha, AlphaDash, AlphaNumeric, Before, Between, Contains, Different, Email,
    Equals, In, Ip, Ipv4, Ipv6, IsDate, IsInt, IsNumeric, Json, Length, LengthBetween, LengthMax,
    LengthMin, Max, MaxWords, Min, MinWords, NotContains, NotEquals, NotIn, Present, RegexMatch,
    RuleRegistry, Url, Words,
};
use crate::value::Param;

// ============================================================================
// FIELD RULES
// ============================================================================

/// Attaches built-in rules to one or more fields.
///
/// Every call adds one rule instance per field, in the order the fields were
/// named.
///
/// ```
/// use fieldcheck_validator::engine::ValidationEngine;
/// use fieldcheck_validator::source::MapSource;
///
/// let mut engine = ValidationEngine::new(MapSource::new());
/// engine
///     .field(["first_name", "last_name"])
///     .required(true)
///     .alpha()
///     .length_between(2, 40);
/// assert_eq!(engine.rule_count(), 4);
/// ```
pub struct FieldRules<'a> {
    pub(crate) instances: &'a mut Vec<RuleInstance>,
    pub(crate) required: &'a mut HashMap<String, bool>,
    pub(crate) fields: Vec<String>,
}

macro_rules! attach {
    ($(
        $(#[$meta:meta])*
        $method:ident => $rule:ident ( $($arg:ident),* );
    )+) => {
        $(
            $(#[$meta])*
            pub fn $method(&mut self $(, $arg: impl Into<Param>)*) -> &mut Self {
                self.attach($rule::NAME, vec![$($arg.into()),*])
            }
        )+
    };
}

impl FieldRules<'_> {
    /// Sets the required override for every named field.
    ///
    /// With `false`, built-in rules on a field whose value is blank are
    /// skipped and count as passed.
    pub fn required(&mut self, required: bool) -> &mut Self {
        for field in &self.fields {
            self.required.insert(field.clone(), required);
        }
        self
    }

    /// Shorthand for `required(true)`.
    pub fn require(&mut self) -> &mut Self {
        self.required(true)
    }

    /// Attaches the rule registered under `name`.
    ///
    /// The name is resolved when the pass runs; an unknown name fails
    /// [`exec`](super::ValidationEngine::exec) with
    /// [`RuleError::UnknownRule`](crate::error::RuleError::UnknownRule).
    pub fn rule(&mut self, name: &str, params: &[Param]) -> &mut Self {
        self.attach(name, params.to_vec())
    }

    fn attach(&mut self, name: &str, params: Vec<Param>) -> &mut Self {
        for field in &self.fields {
            self.instances
                .push(RuleInstance::builtin(field, name, params.clone()));
        }
        self
    }

    attach! {
        accepted => Accepted();
        /// `date` and the value are both read with `format`.
        after => After(date, format);
        alpha => Alpha();
        alpha_dash => AlphaDash();
        alpha_numeric => AlphaNumeric();
        before => Before(date, format);
        between => Between(min, max);
        /// `pattern` is a regex source string or a compiled [`regex::Regex`].
        contains => Contains(pattern);
        different => Different(other_field);
        email => Email();
        equals => Equals(expected);
        /// `values` is a list (exact membership) or a string (substring).
        one_of => In(values);
        ip => Ip();
        ipv4 => Ipv4();
        ipv6 => Ipv6();
        is_date => IsDate(format);
        is_int => IsInt();
        is_numeric => IsNumeric();
        json => Json();
        length => Length(chars);
        length_between => LengthBetween(min, max);
        length_max => LengthMax(max);
        length_min => LengthMin(min);
        max => Max(max);
        max_words => MaxWords(max);
        min => Min(min);
        min_words => MinWords(min);
        not_contains => NotContains(pattern);
        not_equals => NotEquals(expected);
        not_one_of => NotIn(values);
        present => Present();
        regex => RegexMatch(pattern);
        url => Url();
        words => Words(count);
    }

    /// `equals` with an exact string comparison.
    pub fn equals_strict(&mut self, expected: impl Into<Param>) -> &mut Self {
        self.attach(Equals::NAME, vec![expected.into(), Param::Bool(true)])
    }

    /// `notequals` with an exact string comparison.
    pub fn not_equals_strict(&mut self, expected: impl Into<Param>) -> &mut Self {
        self.attach(NotEquals::NAME, vec![expected.into(), Param::Bool(true)])
    }
}

// ============================================================================
// CUSTOM RULES
// ============================================================================

/// Handle to the custom rule instances created by one `extend` call.
pub struct CustomRules<'a> {
    pub(crate) instances: &'a mut [RuleInstance],
}

impl CustomRules<'_> {
    /// Message recorded when the rule fails. Without one, the failure is
    /// recorded with an empty message.
    pub fn with_message(&mut self, message: impl Into<String>) -> &mut Self {
        let message = message.into();
        for instance in self.instances.iter_mut() {
            instance.message = Some(message.clone());
        }
        self
    }
}

// ============================================================================
// MESSAGE OVERRIDES
// ============================================================================

/// Overrides messages of already attached built-in rules.
///
/// With no fields named, the override applies to every instance of the rule.
pub struct SetMessage<'a> {
    pub(crate) instances: &'a mut [RuleInstance],
    pub(crate) registry: &'a RuleRegistry,
    pub(crate) fields: Vec<String>,
}

macro_rules! override_message {
    ($($method:ident => $rule:ident;)+) => {
        $(
            pub fn $method(&mut self, message: impl Into<String>) -> &mut Self {
                self.rule($rule::NAME, message)
            }
        )+
    };
}

impl SetMessage<'_> {
    /// Sets `message` on matching instances of rule `name`. The message may
    /// use `%s` placeholders just like the defaults.
    pub fn rule(&mut self, name: &str, message: impl Into<String>) -> &mut Self {
        if !self.registry.contains(name) {
            warn!(rule = name, "message override for a rule that is not registered");
            return self;
        }

        let message = message.into();
        let fields = &self.fields;
        for instance in self.instances.iter_mut().filter(|instance| {
            instance.rule_name() == Some(name)
                && (fields.is_empty() || fields.contains(&instance.field))
        }) {
            instance.message = Some(message.clone());
        }
        self
    }

    override_message! {
        accepted => Accepted;
        after => After;
        alpha => Alpha;
        alpha_dash => AlphaDash;
        alpha_numeric => AlphaNumeric;
        before => Before;
        between => Between;
        contains => Contains;
        different => Different;
        email => Email;
        equals => Equals;
        one_of => In;
        ip => Ip;
        ipv4 => Ipv4;
        ipv6 => Ipv6;
        is_date => IsDate;
        is_int => IsInt;
        is_numeric => IsNumeric;
        json => Json;
        length => Length;
        length_between => LengthBetween;
        length_max => LengthMax;
        length_min => LengthMin;
        max => Max;
        max_words => MaxWords;
        min => Min;
        min_words => MinWords;
        not_contains => NotContains;
        not_equals => NotEquals;
        not_one_of => NotIn;
        present => Present;
        regex => RegexMatch;
        url => Url;
        words => Words;
    }
}
