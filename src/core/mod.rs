//! Core building blocks for the state machine engine.
//!
//! This module provides the fundamental pieces everything else is built on:
//!
//! - [`Event`] / [`EventKind`]: nominal event identity
//! - [`Guard`] / [`Action`]: type-erased callables attached to transitions
//! - [`DispatchLog`]: opt-in record of fired transitions

pub mod event;
pub mod guard;
pub mod log;

pub use event::{Event, EventKind};
pub use guard::{Action, Guard};
pub use log::{DispatchLog, DispatchRecord};
