//! Trellis: a table-driven hierarchical state machine
//!
//! Trellis dispatches typed events through an ordered transition table. A
//! machine can run several concurrent regions - independent state cursors
//! sharing one table and one `process_event` entry point - and resolves each
//! event to at most one transition per region, first matching row wins.
//!
//! # Core Concepts
//!
//! - **Transition table**: an ordered, immutable list of rows
//!   `(source, event, guard, action, destination)`; declaration order breaks
//!   ties
//! - **State registry**: state names discovered from the table and interned
//!   to dense ids; a leading `*` marks a region's initial state
//! - **Dispatcher**: routes an event to each region's first matching,
//!   guard-passing row; runs the action and moves the region (or stays, for
//!   an internal transition)
//!
//! # Example
//!
//! ```rust
//! use trellis::{transition_table, Event, StateMachine};
//!
//! #[derive(Debug)]
//! struct Connect;
//! #[derive(Debug)]
//! struct Established;
//! #[derive(Debug)]
//! struct Disconnect;
//!
//! impl Event for Connect {}
//! impl Event for Established {}
//! impl Event for Disconnect {}
//!
//! let table = transition_table! {
//!     "*Disconnected" + Connect => "Connecting",
//!     "Connecting" + Established => "Connected",
//!     "Connected" + Disconnect => "Disconnected",
//! }
//! .unwrap();
//!
//! let mut machine = StateMachine::new(table).unwrap();
//! machine.process_event(&Connect);
//! machine.process_event(&Established);
//! assert!(machine.is(&["Connected"]));
//! ```

pub mod analysis;
pub mod core;
pub mod machine;
pub mod table;

// Re-export commonly used types
pub use crate::core::{Action, DispatchLog, DispatchRecord, Event, EventKind, Guard};
pub use analysis::{audit, Finding, TableReport};
pub use machine::{Snapshot, SnapshotError, StateMachine, SNAPSHOT_VERSION};
pub use table::{
    build_table, state, transition, BuildError, StateName, Transition, TransitionTable,
};
