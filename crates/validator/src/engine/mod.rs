//! The validation engine.
//!
//! A [`ValidationEngine`] holds the rule set of one form: built-in rule
//! instances attached with [`field`](ValidationEngine::field), custom rules
//! attached with [`extend`](ValidationEngine::extend), combined fields and
//! required overrides. [`exec`](ValidationEngine::exec) runs one pass over
//! the rule set and records failures in the engine's error store.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──exec──▶ Running ──all rules reported──▶ Completed(Passed | Failed)
//!                   │
//!                   └──configuration fault──▶ Idle
//! ```
//!
//! Built-in rules run synchronously in registration order. Custom rules may
//! answer later; the pass completes once every instance has reported,
//! whatever the order. A custom rule that never answers keeps the pass
//! pending for as long as its [`Verdict`] is alive.
//!
//! # Examples
//!
//! ```
//! use fieldcheck_validator::engine::{PassState, ValidationEngine};
//! use fieldcheck_validator::source::MapSource;
//!
//! # futures::executor::block_on(async {
//! let source = MapSource::new()
//!     .with("email", "not-an-email")
//!     .with("age", "42");
//!
//! let mut engine = ValidationEngine::new(source);
//! engine.field(["email"]).email();
//! engine.field(["age"]).is_int().between(18, 99);
//!
//! assert_eq!(engine.exec().await.unwrap(), PassState::Failed);
//! assert_eq!(engine.message("email"), Some("Should be a valid email address"));
//! # });
//! ```

mod attach;
mod custom;
mod events;
mod instance;
mod resolve;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::StreamExt;
use futures::channel::oneshot;
use futures::stream::FuturesUnordered;
use indexmap::IndexMap;
use tracing::{debug, trace, warn};

pub use attach::{CustomRules, FieldRules, SetMessage};
pub use custom::{CustomInput, Outcome, Verdict};
pub use events::{Conclusion, EngineState, Event, PassState, UnknownEvent};

use crate::combine::CombinedField;
use crate::config::ValidatorConfig;
use crate::error::RuleResult;
use crate::messages::{ErrorStore, render_template};
use crate::rules::{RuleContext, RuleRegistry};
use crate::source::FieldSource;
use crate::value::{Value, is_blank};
use custom::CustomRule;
use events::Listeners;
use instance::{RuleInstance, RuleKind};
use resolve::Resolver;

/// How a single rule instance reported during the synchronous walk.
enum Step {
    /// Answered; counts toward completion.
    Done,
    /// A custom rule that has not answered yet.
    Deferred(oneshot::Receiver<Outcome>),
    /// A custom rule that dropped its verdict unanswered.
    Dropped,
}

/// Declarative field validator over a [`FieldSource`].
pub struct ValidationEngine {
    config: ValidatorConfig,
    registry: Arc<RuleRegistry>,
    source: Arc<dyn FieldSource>,
    instances: Vec<RuleInstance>,
    required: HashMap<String, bool>,
    combined: Vec<CombinedField>,
    errors: ErrorStore,
    listeners: Listeners,
    state: EngineState,
}

impl ValidationEngine {
    /// Engine with the default configuration and the built-in rule catalog.
    pub fn new(source: impl FieldSource + 'static) -> Self {
        Self::with_config(source, ValidatorConfig::default())
    }

    pub fn with_config(source: impl FieldSource + 'static, config: ValidatorConfig) -> Self {
        Self {
            config,
            registry: Arc::new(RuleRegistry::builtin()),
            source: Arc::new(source),
            instances: Vec::new(),
            required: HashMap::new(),
            combined: Vec::new(),
            errors: ErrorStore::new(),
            listeners: Listeners::default(),
            state: EngineState::Idle,
        }
    }

    /// Replaces the rule registry, e.g. with one shared between engines.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_registry(mut self, registry: Arc<RuleRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    // ========================================================================
    // RULE SET
    // ========================================================================

    /// Starts attaching built-in rules to `fields`.
    pub fn field<I, S>(&mut self, fields: I) -> FieldRules<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldRules {
            instances: &mut self.instances,
            required: &mut self.required,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Attaches a custom rule to each of `fields`.
    ///
    /// The closure is called once per field and pass. It answers through the
    /// [`Verdict`], immediately or from a task it spawns.
    ///
    /// ```
    /// use fieldcheck_validator::engine::ValidationEngine;
    /// use fieldcheck_validator::source::MapSource;
    ///
    /// let mut engine = ValidationEngine::new(MapSource::new().with("username", "root"));
    /// engine
    ///     .extend(["username"], |input, verdict| {
    ///         verdict.decide(input.text() != Some("root"));
    ///     })
    ///     .with_message("Username is taken");
    /// ```
    pub fn extend<I, S, F>(&mut self, fields: I, closure: F) -> CustomRules<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(CustomInput, Verdict) + Send + Sync + 'static,
    {
        let rule = CustomRule::new(closure);
        let start = self.instances.len();
        for field in fields {
            let field: String = field.into();
            self.instances.push(RuleInstance::custom(&field, rule.clone()));
        }

        CustomRules {
            instances: &mut self.instances[start..],
        }
    }

    /// Registers a combined field over `fields` and returns it for
    /// configuration. Give it a name so rules can target it.
    pub fn combine<I, S>(&mut self, fields: I) -> &mut CombinedField
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.combined.push(CombinedField::new(fields));
        let last = self.combined.len() - 1;
        &mut self.combined[last]
    }

    /// Starts overriding messages for rules attached to `fields`; pass an
    /// empty list to target every field.
    pub fn set_message<I, S>(&mut self, fields: I) -> SetMessage<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SetMessage {
            instances: &mut self.instances,
            registry: &self.registry,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// [`set_message`](Self::set_message) for every field.
    pub fn set_message_all(&mut self) -> SetMessage<'_> {
        self.set_message(Vec::<String>::new())
    }

    /// Registers the listener for `event`, replacing any previous one.
    pub fn on(&mut self, event: Event, listener: impl FnMut() + Send + 'static) -> &mut Self {
        self.listeners.set(event, Box::new(listener));
        self
    }

    /// Number of rule instances in the rule set.
    pub fn rule_count(&self) -> usize {
        self.instances.len()
    }

    /// Current value of `field` as rules see it, combined fields included.
    pub fn value(&self, field: &str) -> Option<Value> {
        self.resolver().value(field)
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver {
            source: &*self.source,
            combined: &self.combined,
            prefix: self.config.prefix.as_deref(),
        }
    }

    // ========================================================================
    // EXECUTION
    // ========================================================================

    /// Runs one validation pass.
    ///
    /// Errors from the previous pass are cleared first. Returns `Err` on the
    /// first configuration fault (unknown rule, missing or malformed
    /// parameter); the pass is abandoned and no terminal event fires.
    pub async fn exec(&mut self) -> RuleResult<PassState> {
        self.errors.clear();
        self.state = EngineState::Running;

        let total = self.instances.len();
        debug!(rules = total, prefix = ?self.config.prefix, "validation pass started");
        self.listeners.fire(Event::Start);

        let mut completed = 0;
        let mut dropped = 0;
        let mut pending = FuturesUnordered::new();

        // 1. Walk the rule set; built-ins and immediate answers complete here.
        for index in 0..total {
            let step = match self.evaluate(index) {
                Ok(step) => step,
                Err(err) => {
                    self.state = EngineState::Idle;
                    debug!(error = %err, "validation pass aborted");
                    return Err(err);
                }
            };

            match step {
                Step::Done => {
                    completed += 1;
                    self.check_completion(completed, total);
                }
                Step::Deferred(receiver) => {
                    pending.push(receiver.map(move |answer| (index, answer)));
                }
                Step::Dropped => dropped += 1,
            }
        }

        if total == 0 {
            self.check_completion(0, 0);
        }

        // 2. Collect deferred answers in arrival order.
        while let Some((index, answer)) = pending.next().await {
            match answer {
                Ok(outcome) => {
                    self.apply_outcome(index, outcome);
                    completed += 1;
                    self.check_completion(completed, total);
                }
                Err(oneshot::Canceled) => dropped += 1,
            }
        }

        // 3. Report.
        let result = match self.state {
            EngineState::Completed(conclusion) => PassState::from(conclusion),
            _ => {
                warn!(
                    pending = dropped,
                    "custom rules dropped their verdict; pass left incomplete"
                );
                PassState::Incomplete { pending: dropped }
            }
        };

        debug!(
            errors = self.errors.len(),
            result = ?result,
            "validation pass finished"
        );
        Ok(result)
    }

    /// Evaluates the instance at `index`.
    fn evaluate(&mut self, index: usize) -> RuleResult<Step> {
        let resolver = Resolver {
            source: &*self.source,
            combined: &self.combined,
            prefix: self.config.prefix.as_deref(),
        };
        let instance = &self.instances[index];
        let value = resolver.value(&instance.field);

        let name = match &instance.kind {
            RuleKind::Builtin(name) => name,
            RuleKind::Custom(rule) => {
                let input = CustomInput {
                    field: instance.field.clone(),
                    prefix: self.config.prefix.clone(),
                    value,
                    handle: self
                        .source
                        .handle(&instance.field, self.config.prefix.as_deref()),
                };
                let (verdict, mut receiver) = Verdict::channel();
                rule.call(input, verdict);

                return Ok(match receiver.try_recv() {
                    Ok(Some(outcome)) => {
                        self.apply_outcome(index, outcome);
                        Step::Done
                    }
                    Ok(None) => Step::Deferred(receiver),
                    Err(oneshot::Canceled) => Step::Dropped,
                });
            }
        };

        let rule = self.registry.lookup(name)?;

        if self.required.get(&instance.field) == Some(&false) && is_blank(value.as_ref()) {
            trace!(field = %instance.field, rule = %name, "blank optional field, rule skipped");
            return Ok(Step::Done);
        }

        let ctx = RuleContext::new(&instance.field, value.as_ref(), &instance.params)
            .with_prefix(resolver.prefix)
            .with_message(instance.message.as_deref())
            .with_resolver(&resolver);
        let passed = rule.check(&ctx)?;
        trace!(field = %instance.field, rule = %name, passed, "rule evaluated");

        if !passed {
            let template = instance.message.as_deref().unwrap_or(rule.message());
            let message = render_template(template, &instance.params);

            self.errors
                .record(&instance.field, resolver.prefix, message.as_str());
            if let Some(combined) = resolver.combined(&instance.field) {
                for source in combined.sources() {
                    self.errors.record(source, resolver.prefix, message.as_str());
                }
            }
        }

        Ok(Step::Done)
    }

    /// Records the answer of the custom rule at `index`.
    fn apply_outcome(&mut self, index: usize, outcome: Outcome) {
        let instance = &self.instances[index];
        trace!(field = %instance.field, ?outcome, "custom rule answered");

        if outcome == Outcome::Fail {
            self.errors.record(
                &instance.field,
                self.config.prefix.as_deref(),
                instance.message.clone().unwrap_or_default(),
            );
        }
    }

    /// Fires the terminal events once every instance has reported.
    fn check_completion(&mut self, completed: usize, total: usize) {
        if completed != total {
            return;
        }

        let conclusion = if self.errors.is_empty() {
            Conclusion::Passed
        } else {
            Conclusion::Failed
        };
        self.state = EngineState::Completed(conclusion);

        self.listeners.fire(Event::End);
        self.listeners.fire(match conclusion {
            Conclusion::Passed => Event::Passes,
            Conclusion::Failed => Event::Fails,
        });
    }

    // ========================================================================
    // RESULTS
    // ========================================================================

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Failure messages of the last pass, by qualified name when `full`.
    pub fn messages(&self, full: bool) -> &IndexMap<String, String> {
        self.errors.messages(full)
    }

    /// Failure message for `field`: short key first, then qualified name.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.errors.message(field)
    }

    pub fn errors(&self) -> &ErrorStore {
        &self.errors
    }
}

impl fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("config", &self.config)
            .field("rules", &self.instances.len())
            .field("combined", &self.combined)
            .field("listeners", &self.listeners)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
