//! Built-in rule catalog.
//!
//! Each rule is a zero-sized type implementing [`RuleDefinition`], declared
//! with the [`rule!`](crate::rule) macro. A [`RuleRegistry`] maps catalog
//! names to those types; the engine looks names up there when it runs.
//!
//! # Categories
//!
//! - **Text**: `alpha`, `alphadash`, `alphanumeric`, `contains`, `notcontains`,
//!   `regex`, `email`, `url`, `json`
//! - **Length**: `length`, `lengthbetween`, `lengthmax`, `lengthmin`,
//!   `words`, `maxwords`, `minwords`
//! - **Comparison**: `accepted`, `different`, `equals`, `notequals`, `in`,
//!   `notin`, `present`
//! - **Numeric**: `between`, `max`, `min`, `isint`, `isnumeric`
//! - **Network**: `ip`, `ipv4`, `ipv6`
//! - **Temporal**: `after`, `before`, `isdate`
//!
//! Content rules follow a conservative policy: a value that is absent or not
//! a string fails the rule instead of raising an error.

mod compare;
mod context;
mod network;
mod numeric;
mod temporal;
mod text;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub use compare::{Accepted, Different, Equals, In, NotEquals, NotIn, Present};
pub use context::{FieldResolver, NoFields, RuleContext};
pub use network::{Ip, Ipv4, Ipv6};
pub use numeric::{Between, IsInt, IsNumeric, Max, Min};
pub use temporal::{After, Before, IsDate};
pub use text::{
    Alpha, AlphaDash, AlphaNumeric, Contains, Email, Json, Length, LengthBetween, LengthMax,
    LengthMin, MaxWords, MinWords, NotContains, RegexMatch, Url, Words,
};

use crate::error::{RuleError, RuleResult};

// ============================================================================
// RULE DEFINITION
// ============================================================================

/// A named predicate with a default message template.
///
/// The template may contain `%s` placeholders; they are filled with the rule
/// instance's parameters, left to right, when an error is recorded.
pub trait RuleDefinition: Send + Sync + fmt::Debug {
    /// Catalog key, e.g. `"lengthmax"`.
    fn name(&self) -> &'static str;

    /// Default message template.
    fn message(&self) -> &'static str;

    /// Decides whether the field in `ctx` satisfies the rule.
    ///
    /// `Ok(false)` is an ordinary validation failure. `Err` means the rule
    /// itself is misconfigured and aborts the pass.
    fn check(&self, ctx: &RuleContext<'_>) -> RuleResult<bool>;
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Name → rule lookup table.
///
/// Built once and shared by reference count between engines; a registry is
/// never mutated while a pass is running.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: BTreeMap<&'static str, Arc<dyn RuleDefinition>>,
}

impl RuleRegistry {
    /// A registry with no rules.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The full built-in catalog.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry
            .register(Accepted)
            .register(After)
            .register(Alpha)
            .register(AlphaDash)
            .register(AlphaNumeric)
            .register(Before)
            .register(Between)
            .register(Contains)
            .register(Different)
            .register(Email)
            .register(Equals)
            .register(In)
            .register(Ip)
            .register(Ipv4)
            .register(Ipv6)
            .register(IsDate)
            .register(IsInt)
            .register(IsNumeric)
            .register(Json)
            .register(Length)
            .register(LengthBetween)
            .register(LengthMax)
            .register(LengthMin)
            .register(Max)
            .register(MaxWords)
            .register(Min)
            .register(MinWords)
            .register(NotContains)
            .register(NotEquals)
            .register(NotIn)
            .register(Present)
            .register(RegexMatch)
            .register(Url)
            .register(Words);
        registry
    }

    /// Adds `rule`, replacing any rule registered under the same name.
    pub fn register(&mut self, rule: impl RuleDefinition + 'static) -> &mut Self {
        self.rules.insert(rule.name(), Arc::new(rule));
        self
    }

    /// Looks a rule up by name.
    pub fn lookup(&self, name: &str) -> RuleResult<&dyn RuleDefinition> {
        self.rules
            .get(name)
            .map(|rule| &**rule)
            .ok_or_else(|| RuleError::unknown(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.rules.keys()).finish()
    }
}

// ============================================================================
// TEST SUPPORT
// ============================================================================
