//! Fluent builders for transitions and transition tables.

use crate::core::{Action, Event, EventKind, Guard};
use crate::table::error::BuildError;
use crate::table::transition::{StateName, Transition};
use crate::table::TransitionTable;
use std::marker::PhantomData;

/// Start building a transition row from its source state.
///
/// A leading `*` on the source name marks it as a region's initial state.
///
/// # Example
///
/// ```rust
/// use trellis::{transition, Event, Transition};
///
/// #[derive(Debug)]
/// struct Connect;
/// impl Event for Connect {}
///
/// let row: Transition = transition("*Disconnected")
///     .on::<Connect>()
///     .to("Connecting")
///     .into();
///
/// assert_eq!(row.source().name(), "Disconnected");
/// assert!(row.source().is_initial());
/// assert_eq!(row.dest(), Some("Connecting"));
/// ```
pub fn transition(source: impl Into<StateName>) -> TransitionBuilder {
    TransitionBuilder {
        source: source.into(),
    }
}

/// Builder holding a transition's source state, before the event is chosen.
pub struct TransitionBuilder {
    source: StateName,
}

impl TransitionBuilder {
    /// Bind the row to an event class.
    ///
    /// Everything after this point is typed against `E`, so guards and
    /// actions receive the concrete payload.
    pub fn on<E: Event>(self) -> EventTransitionBuilder<E> {
        EventTransitionBuilder {
            source: self.source,
            guard: Guard::always(),
            action: Action::noop(),
            dest: None,
            _event: PhantomData,
        }
    }
}

/// Builder for a transition row bound to event type `E`.
///
/// Guard defaults to always-true, action to no-op, and omitting [`to`]
/// yields an internal transition.
///
/// [`to`]: EventTransitionBuilder::to
pub struct EventTransitionBuilder<E: Event> {
    source: StateName,
    guard: Guard,
    action: Action,
    dest: Option<String>,
    _event: PhantomData<E>,
}

impl<E: Event> EventTransitionBuilder<E> {
    /// Attach a guard over the event payload.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.guard = Guard::new(predicate);
        self
    }

    /// Attach a guard that ignores the payload.
    pub fn when_fn<F>(mut self, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.guard = Guard::from_fn(predicate);
        self
    }

    /// Attach an action over the event payload.
    pub fn then<F>(mut self, action: F) -> Self
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.action = Action::new(action);
        self
    }

    /// Attach an action that ignores the payload.
    pub fn run<F>(mut self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.action = Action::from_fn(action);
        self
    }

    /// Set the destination state.
    ///
    /// Without a destination the row is an internal transition.
    pub fn to(mut self, dest: impl Into<StateName>) -> Self {
        self.dest = Some(dest.into().name().to_string());
        self
    }

    /// Finalize the row.
    pub fn done(self) -> Transition {
        Transition {
            source: self.source,
            event: EventKind::of::<E>(),
            guard: self.guard,
            action: self.action,
            dest: self.dest,
        }
    }
}

impl<E: Event> From<EventTransitionBuilder<E>> for Transition {
    fn from(builder: EventTransitionBuilder<E>) -> Self {
        builder.done()
    }
}

/// Builder assembling an ordered transition table.
///
/// Row declaration order is preserved; it decides which transition wins when
/// several rows share a source state and event.
///
/// # Example
///
/// ```rust
/// use trellis::{transition, TransitionTable};
///
/// #[derive(Debug)]
/// struct Coin;
/// #[derive(Debug)]
/// struct Push;
/// impl trellis::Event for Coin {}
/// impl trellis::Event for Push {}
///
/// let table = TransitionTable::builder()
///     .row(transition("*Locked").on::<Coin>().to("Unlocked"))
///     .row(transition("Unlocked").on::<Push>().to("Locked"))
///     .build()
///     .unwrap();
///
/// assert_eq!(table.len(), 2);
/// ```
pub struct TableBuilder {
    rows: Vec<Transition>,
}

impl TableBuilder {
    /// Create an empty table builder.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Append one row.
    pub fn row(mut self, row: impl Into<Transition>) -> Self {
        self.rows.push(row.into());
        self
    }

    /// Append multiple pre-built rows.
    pub fn rows(mut self, rows: Vec<Transition>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Build the table.
    ///
    /// Fails if no rows were declared or any state name is empty.
    pub fn build(self) -> Result<TransitionTable, BuildError> {
        TransitionTable::from_rows(self.rows)
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Event;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Ping {
        valid: bool,
    }
    impl Event for Ping {}

    #[test]
    fn defaults_are_always_true_guard_and_noop_action() {
        let row: Transition = transition("a").on::<Ping>().to("b").into();

        assert!(row.guard().check(&Ping { valid: false }));
        row.action().run(&Ping { valid: false });
    }

    #[test]
    fn when_attaches_payload_guard() {
        let row: Transition = transition("a")
            .on::<Ping>()
            .when(|e: &Ping| e.valid)
            .to("b")
            .into();

        assert!(row.guard().check(&Ping { valid: true }));
        assert!(!row.guard().check(&Ping { valid: false }));
    }

    #[test]
    fn when_fn_attaches_zero_arg_guard() {
        let row: Transition = transition("a").on::<Ping>().when_fn(|| false).to("b").into();

        assert!(!row.guard().check(&Ping { valid: true }));
    }

    #[test]
    fn then_attaches_payload_action() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_ref = Arc::clone(&count);
        let row: Transition = transition("a")
            .on::<Ping>()
            .then(move |e: &Ping| {
                if e.valid {
                    count_ref.fetch_add(1, Ordering::SeqCst);
                }
            })
            .into();

        row.action().run(&Ping { valid: true });
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn run_attaches_zero_arg_action() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_ref = Arc::clone(&count);
        let row: Transition = transition("a")
            .on::<Ping>()
            .run(move || {
                count_ref.fetch_add(1, Ordering::SeqCst);
            })
            .into();

        row.action().run(&Ping { valid: false });
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn destination_sigil_is_stripped() {
        let row: Transition = transition("a").on::<Ping>().to("*b").into();
        assert_eq!(row.dest(), Some("b"));
    }

    #[test]
    fn empty_builder_fails() {
        let result = TableBuilder::new().build();
        assert!(matches!(result, Err(BuildError::NoTransitions)));
    }

    #[test]
    fn empty_source_name_fails_with_row_index() {
        let result = TransitionTable::builder()
            .row(transition("*a").on::<Ping>().to("b"))
            .row(transition("").on::<Ping>().to("b"))
            .build();

        assert!(matches!(result, Err(BuildError::EmptyStateName { row: 1 })));
    }

    #[test]
    fn bare_sigil_is_an_empty_name() {
        let result = TransitionTable::builder()
            .row(transition("*").on::<Ping>().to("b"))
            .build();

        assert!(matches!(result, Err(BuildError::EmptyStateName { row: 0 })));
    }

    #[test]
    fn empty_destination_name_fails() {
        let result = TransitionTable::builder()
            .row(transition("*a").on::<Ping>().to(""))
            .build();

        assert!(matches!(result, Err(BuildError::EmptyStateName { row: 0 })));
    }

    #[test]
    fn declaration_order_is_preserved() {
        let table = TransitionTable::builder()
            .row(transition("*a").on::<Ping>().to("b"))
            .row(transition("a").on::<Ping>().to("c"))
            .build()
            .unwrap();

        assert_eq!(table.transitions()[0].dest(), Some("b"));
        assert_eq!(table.transitions()[1].dest(), Some("c"));
    }
}
