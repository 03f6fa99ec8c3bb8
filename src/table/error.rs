//! Build errors for transition tables and state machines.

use thiserror::Error;

/// Errors that can occur when building a transition table or a state machine.
///
/// All of these are construction-time failures: a machine that constructs
/// successfully never produces them during dispatch.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Transition table has no rows. Declare at least one transition")]
    NoTransitions,

    #[error("State name in row {row} is empty. State names must be non-empty")]
    EmptyStateName { row: usize },

    #[error("No initial state marked. Mark at least one source state with a leading '*'")]
    NoInitialState,
}
