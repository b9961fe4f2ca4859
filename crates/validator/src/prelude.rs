//! Prelude module for convenient imports.
//!
//! ```
//! use fieldcheck_validator::prelude::*;
//!
//! let mut engine = ValidationEngine::new(MapSource::new());
//! engine.field(["name"]).required(true).length_min(2);
//! ```

// ============================================================================
// ENGINE
// ============================================================================

pub use crate::engine::{
    Conclusion, CustomInput, EngineState, Event, Outcome, PassState, ValidationEngine, Verdict,
};

// ============================================================================
// RULES
// ============================================================================

pub use crate::rules::{RuleContext, RuleDefinition, RuleRegistry};

// ============================================================================
// SUPPORT
// ============================================================================

pub use crate::combine::CombinedField;
pub use crate::config::ValidatorConfig;
pub use crate::error::{RuleError, RuleResult};
pub use crate::source::{FieldSource, MapSource};
pub use crate::value::{Param, Value};
