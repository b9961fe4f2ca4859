//! Custom rules and their deferred verdicts.
//!
//! A custom rule is a closure that receives the field's current input and a
//! [`Verdict`]. It must eventually call [`Verdict::pass`] or
//! [`Verdict::fail`], right away or later from another task. The engine keeps
//! going while verdicts are outstanding and collects them in whatever order
//! they arrive.

use std::fmt;
use std::sync::Arc;

use futures::channel::oneshot;

use crate::source::FieldHandle;
use crate::value::Value;

/// What a custom rule decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
}

/// Everything a custom rule gets to look at.
#[derive(Clone)]
pub struct CustomInput {
    /// Field name as registered, without prefix.
    pub field: String,
    /// Engine prefix, if any.
    pub prefix: Option<String>,
    /// Current value; `None` when the field is absent.
    pub value: Option<Value>,
    /// Element handle from the field source, when it provides one.
    pub handle: Option<FieldHandle>,
}

impl CustomInput {
    /// The value as text, `None` for absent and non-string values.
    pub fn text(&self) -> Option<&str> {
        self.value.as_ref().and_then(Value::as_str)
    }
}

impl fmt::Debug for CustomInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomInput")
            .field("field", &self.field)
            .field("prefix", &self.prefix)
            .field("value", &self.value)
            .field("handle", &self.handle.is_some())
            .finish()
    }
}

/// One-shot answer channel for a custom rule.
///
/// Consumed by answering. Dropping it unanswered leaves the pass incomplete.
#[derive(Debug)]
#[must_use = "a custom rule must answer with pass() or fail()"]
pub struct Verdict {
    sender: oneshot::Sender<Outcome>,
}

impl Verdict {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<Outcome>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    pub fn pass(self) {
        self.resolve(Outcome::Pass);
    }

    pub fn fail(self) {
        self.resolve(Outcome::Fail);
    }

    /// Answers with `Pass` when `passed`, otherwise `Fail`.
    pub fn decide(self, passed: bool) {
        self.resolve(if passed { Outcome::Pass } else { Outcome::Fail });
    }

    pub fn resolve(self, outcome: Outcome) {
        // The engine may have aborted the pass already.
        let _ = self.sender.send(outcome);
    }
}

pub(crate) type CustomFn = dyn Fn(CustomInput, Verdict) + Send + Sync;

/// A registered custom rule closure.
#[derive(Clone)]
pub(crate) struct CustomRule {
    closure: Arc<CustomFn>,
}

impl CustomRule {
    pub(crate) fn new<F>(closure: F) -> Self
    where
        F: Fn(CustomInput, Verdict) + Send + Sync + 'static,
    {
        Self {
            closure: Arc::new(closure),
        }
    }

    pub(crate) fn call(&self, input: CustomInput, verdict: Verdict) {
        (self.closure)(input, verdict);
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomRule")
    }
}
