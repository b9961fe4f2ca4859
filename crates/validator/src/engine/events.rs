//! Lifecycle events and pass states.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Lifecycle point a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// A pass begins, before any rule runs.
    Start,
    /// Every rule instance has reported.
    End,
    /// Fired after `End` when no rule failed.
    Passes,
    /// Fired after `End` when at least one rule failed.
    Fails,
}

impl Event {
    pub fn as_str(self) -> &'static str {
        match self {
            Event::Start => "start",
            Event::End => "end",
            Event::Passes => "passes",
            Event::Fails => "fails",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown event name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event \"{0}\", expected start, end, passes or fails")]
pub struct UnknownEvent(pub String);

impl FromStr for Event {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Event::Start),
            "end" => Ok(Event::End),
            "passes" => Ok(Event::Passes),
            "fails" => Ok(Event::Fails),
            other => Err(UnknownEvent(other.to_string())),
        }
    }
}

/// How a completed pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conclusion {
    Passed,
    Failed,
}

/// Where the engine is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    /// No pass has run, or the last one aborted on a configuration fault.
    #[default]
    Idle,
    /// A pass started and has not seen every rule report yet.
    Running,
    Completed(Conclusion),
}

/// Result of one call to [`exec`](super::ValidationEngine::exec).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    Passed,
    Failed,
    /// Custom rules dropped their verdict without answering. The pass never
    /// completed and no terminal event fired.
    Incomplete { pending: usize },
}

impl PassState {
    pub fn is_passed(self) -> bool {
        self == PassState::Passed
    }

    pub fn is_complete(self) -> bool {
        !matches!(self, PassState::Incomplete { .. })
    }
}

impl From<Conclusion> for PassState {
    fn from(conclusion: Conclusion) -> Self {
        match conclusion {
            Conclusion::Passed => PassState::Passed,
            Conclusion::Failed => PassState::Failed,
        }
    }
}

pub(crate) type Listener = Box<dyn FnMut() + Send>;

/// One listener per event; registering again replaces the previous one.
#[derive(Default)]
pub(crate) struct Listeners {
    by_event: HashMap<Event, Listener>,
}

impl Listeners {
    pub(crate) fn set(&mut self, event: Event, listener: Listener) {
        self.by_event.insert(event, listener);
    }

    pub(crate) fn fire(&mut self, event: Event) {
        tracing::trace!(%event, "lifecycle event");
        if let Some(listener) = self.by_event.get_mut(&event) {
            listener();
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.by_event.keys()).finish()
    }
}
