//! # fieldcheck-validator
//!
//! Declarative field validation: attach named rules to form fields, run one
//! pass, read back per-field messages.
//!
//! ## Quick Start
//!
//! ```
//! use fieldcheck_validator::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let form = MapSource::new()
//!     .with("user[email]", "ada@example.com")
//!     .with("user[age]", "17");
//!
//! let config = ValidatorConfig::new().with_prefix("user");
//! let mut engine = ValidationEngine::with_config(form, config);
//! engine.field(["email"]).email();
//! engine.field(["age"]).min(18);
//!
//! assert_eq!(engine.exec().await?, PassState::Failed);
//! assert_eq!(engine.message("age"), Some("Must be greater than or equal to 18"));
//! assert!(engine.messages(true).contains_key("user[age]"));
//! # Ok::<(), RuleError>(())
//! # }).unwrap();
//! ```
//!
//! ## Pieces
//!
//! - [`rules`]: the built-in catalog behind [`RuleDefinition`](rules::RuleDefinition)
//!   and the [`RuleRegistry`](rules::RuleRegistry) that names it
//! - [`engine`]: the [`ValidationEngine`](engine::ValidationEngine), custom rules
//!   and lifecycle events
//! - [`combine`]: virtual fields built from several real ones
//! - [`date`]: the date format parser used by date rules
//! - [`source`]: where field values come from
//!
//! New rules are declared with the [`rule!`] macro and added with
//! [`RuleRegistry::register`](rules::RuleRegistry::register).

#[macro_use]
mod macros;

pub mod combine;
pub mod config;
pub mod date;
pub mod engine;
pub mod error;
pub mod messages;
pub mod prelude;
pub mod rules;
pub mod source;
pub mod value;
