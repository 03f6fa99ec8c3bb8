//! Event identity for dispatch.
//!
//! Events are nominal: two stimuli belong to the same event class when they
//! have the same concrete Rust type. The engine never inspects an event's
//! payload beyond its identity; payloads are only seen by the guards and
//! actions the caller supplies.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// Marker trait for event types.
///
/// Any `'static` type with a `Debug` impl can be an event. The payload is the
/// event value itself - guards and actions receive it by reference.
///
/// # Example
///
/// ```rust
/// use trellis::Event;
///
/// #[derive(Debug)]
/// struct Ping {
///     valid: bool,
/// }
///
/// impl Event for Ping {}
///
/// let ping = Ping { valid: true };
/// assert!(ping.valid);
/// ```
pub trait Event: Any + Debug + Send + Sync {
    /// Human-readable name for this event class, used in logs and reports.
    ///
    /// Defaults to the Rust type name.
    fn kind_name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}

/// Runtime identity token for an event class.
///
/// Wraps the event's `TypeId` together with its name for diagnostics.
/// Two `EventKind`s compare equal exactly when they identify the same
/// concrete event type.
///
/// # Example
///
/// ```rust
/// use trellis::{Event, EventKind};
///
/// #[derive(Debug)]
/// struct Connect;
/// #[derive(Debug)]
/// struct Disconnect;
///
/// impl Event for Connect {}
/// impl Event for Disconnect {}
///
/// assert_eq!(EventKind::of::<Connect>(), EventKind::of::<Connect>());
/// assert_ne!(EventKind::of::<Connect>(), EventKind::of::<Disconnect>());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EventKind {
    id: TypeId,
    name: &'static str,
}

impl EventKind {
    /// Get the identity token for an event type.
    pub fn of<E: Event>() -> Self {
        EventKind {
            id: TypeId::of::<E>(),
            name: E::kind_name(),
        }
    }

    /// The event class name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}
