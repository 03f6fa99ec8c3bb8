//! Transition tables: ordered, immutable collections of transition rows.
//!
//! A table is declared through the fluent [`builder`] API or the
//! [`transition_table!`](crate::transition_table) macro, validated once at
//! build time, and owned by the state machine for its whole lifetime.

pub mod builder;
pub mod error;
pub mod macros;
pub mod registry;
pub mod transition;

pub use builder::{transition, EventTransitionBuilder, TableBuilder, TransitionBuilder};
pub use error::BuildError;
pub use registry::{StateId, StateRegistry};
pub use transition::{state, StateName, Transition};

/// Ordered, immutable sequence of transition rows.
///
/// Row order is semantically significant: for a given source state and event
/// kind, rows are tried in declaration order and the first whose guard passes
/// wins.
#[derive(Clone)]
pub struct TransitionTable {
    transitions: Vec<Transition>,
}

impl TransitionTable {
    /// Start building a table.
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    pub(crate) fn from_rows(rows: Vec<Transition>) -> Result<Self, BuildError> {
        if rows.is_empty() {
            return Err(BuildError::NoTransitions);
        }
        for (row, transition) in rows.iter().enumerate() {
            if transition.source().name().is_empty() {
                return Err(BuildError::EmptyStateName { row });
            }
            if transition.dest() == Some("") {
                return Err(BuildError::EmptyStateName { row });
            }
        }
        Ok(Self { transitions: rows })
    }

    /// All rows, in declaration order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether the table has no rows. Always `false` for a built table.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

/// Construct a table from an ordered list of pre-built rows.
///
/// # Example
///
/// ```rust
/// use trellis::{build_table, transition, Event};
///
/// #[derive(Debug)]
/// struct Go;
/// impl Event for Go {}
///
/// let table = build_table(vec![
///     transition("*a").on::<Go>().to("b").into(),
///     transition("b").on::<Go>().to("a").into(),
/// ])
/// .unwrap();
///
/// assert_eq!(table.len(), 2);
/// ```
pub fn build_table(rows: Vec<Transition>) -> Result<TransitionTable, BuildError> {
    TransitionTable::from_rows(rows)
}
