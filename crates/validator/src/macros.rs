//! Macros for declaring built-in rules with minimal boilerplate.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldcheck_validator::rule;
//!
//! // Infallible rule: the body is a plain `bool`.
//! rule! {
//!     /// Passes for non-empty strings.
//!     pub Filled = "filled", "Must not be empty";
//!     rule(ctx) { ctx.text().is_some_and(|s| !s.is_empty()) }
//! }
//!
//! // Fallible rule: the body returns `RuleResult<bool>`.
//! rule! {
//!     pub Prefixed = "prefixed", "Must start with \"%s\"";
//!     check(ctx) {
//!         let prefix = ctx.require(Self::NAME, 0)?.to_string();
//!         Ok(ctx.text().is_some_and(|s| s.starts_with(&prefix)))
//!     }
//! }
//! ```

// ============================================================================
// RULE MACRO
// ============================================================================

/// Declares a unit struct implementing [`RuleDefinition`](crate::rules::RuleDefinition).
///
/// Every generated type carries a `NAME` constant holding its catalog key so
/// argument errors can name the rule without repeating the literal.
///
/// # Variants
///
/// **Infallible**: `rule(ctx) { <bool> }`
///
/// **Fallible**: `check(ctx) { <RuleResult<bool>> }`, for rules that raise
/// [`RuleError`](crate::error::RuleError) on missing or malformed parameters.
#[macro_export]
macro_rules! rule {
    // ── Variant 1: infallible body ───────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident = $key:literal, $message:literal;
        rule($ctx:ident) $body:block
    ) => {
        $crate::rule! {
            $(#[$meta])*
            $vis $name = $key, $message;
            check($ctx) { Ok($body) }
        }
    };

    // ── Variant 2: fallible body ─────────────────────────────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident = $key:literal, $message:literal;
        check($ctx:ident) $body:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $name {
            /// Catalog key of this rule.
            pub const NAME: &'static str = $key;
        }

        impl $crate::rules::RuleDefinition for $name {
            fn name(&self) -> &'static str {
                $key
            }

            fn message(&self) -> &'static str {
                $message
            }

            #[allow(unused_variables)]
            fn check(
                &self,
                $ctx: &$crate::rules::RuleContext<'_>,
            ) -> $crate::error::RuleResult<bool> $body
        }
    };
}
