//! Transition descriptors and state references.

use crate::core::{Action, EventKind, Guard};

/// Reference to a named state, possibly carrying an initial marker.
///
/// The marker is a decoration, not part of the state's identity: `"*Idle"`
/// and `"Idle"` name the same state, the former additionally declaring it as
/// a region's starting point.
///
/// # Example
///
/// ```rust
/// use trellis::state;
///
/// let plain = state("Idle");
/// assert_eq!(plain.name(), "Idle");
/// assert!(!plain.is_initial());
///
/// let marked = state("*Idle");
/// assert_eq!(marked.name(), "Idle");
/// assert!(marked.is_initial());
///
/// assert_eq!(state("Idle").initial(), marked);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateName {
    name: String,
    initial: bool,
}

/// Create a state reference.
///
/// A leading `*` marks the state as a region's initial state and is stripped
/// from the name.
pub fn state(name: impl Into<String>) -> StateName {
    StateName::parse(name)
}

impl StateName {
    /// Parse a state name, honoring a leading `*` initial marker.
    pub fn parse(name: impl Into<String>) -> Self {
        let raw: String = name.into();
        match raw.strip_prefix('*') {
            Some(rest) => StateName {
                name: rest.to_string(),
                initial: true,
            },
            None => StateName {
                name: raw,
                initial: false,
            },
        }
    }

    /// Mark this state as a region's initial state.
    pub fn initial(mut self) -> Self {
        self.initial = true;
        self
    }

    /// The state's name, with any initial marker stripped.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this reference carries the initial marker.
    pub fn is_initial(&self) -> bool {
        self.initial
    }
}

impl From<&str> for StateName {
    fn from(name: &str) -> Self {
        StateName::parse(name)
    }
}

impl From<String> for StateName {
    fn from(name: String) -> Self {
        StateName::parse(name)
    }
}

/// One row of a transition table.
///
/// An immutable tuple of source state, event kind, guard, action, and an
/// optional destination. A row without a destination is an internal
/// transition: its action runs on match but the region stays put.
#[derive(Clone)]
pub struct Transition {
    pub(crate) source: StateName,
    pub(crate) event: EventKind,
    pub(crate) guard: Guard,
    pub(crate) action: Action,
    pub(crate) dest: Option<String>,
}

impl Transition {
    /// The source state this row matches against.
    pub fn source(&self) -> &StateName {
        &self.source
    }

    /// The event class this row matches against.
    pub fn event(&self) -> EventKind {
        self.event
    }

    /// The row's guard.
    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    /// The row's action.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// The destination state name, if any.
    pub fn dest(&self) -> Option<&str> {
        self.dest.as_deref()
    }

    /// Whether this row is an internal transition.
    pub fn is_internal(&self) -> bool {
        self.dest.is_none()
    }
}
