//! Guard predicates and actions attached to transitions.
//!
//! Guards decide whether a transition may fire for a given event payload;
//! actions are the side effects run when it does. Both are stored type-erased
//! so a single transition table can mix many event payload types.

use super::event::Event;
use std::any::Any;
use std::sync::Arc;

/// Predicate over an event payload that decides whether a transition may fire.
///
/// A guard is bound to one concrete event type at construction. Checking it
/// against a payload of any other type returns `false`; the dispatcher never
/// does this (candidates are indexed by event kind), but the type-erased API
/// stays total.
///
/// # Example
///
/// ```rust
/// use trellis::{Event, Guard};
///
/// #[derive(Debug)]
/// struct Ping {
///     valid: bool,
/// }
///
/// impl Event for Ping {}
///
/// let is_valid = Guard::new(|e: &Ping| e.valid);
///
/// assert!(is_valid.check(&Ping { valid: true }));
/// assert!(!is_valid.check(&Ping { valid: false }));
/// ```
pub struct Guard {
    predicate: Arc<dyn Fn(&dyn Any) -> bool + Send + Sync>,
    always: bool,
}

impl Guard {
    /// Create a guard from a predicate over the event payload.
    pub fn new<E, F>(predicate: F) -> Self
    where
        E: Event,
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(move |payload: &dyn Any| {
                payload
                    .downcast_ref::<E>()
                    .map(|e| predicate(e))
                    .unwrap_or(false)
            }),
            always: false,
        }
    }

    /// Create a guard from a predicate that ignores the payload.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trellis::{Event, Guard};
    ///
    /// #[derive(Debug)]
    /// struct Tick;
    /// impl Event for Tick {}
    ///
    /// let armed = Guard::from_fn(|| true);
    /// assert!(armed.check(&Tick));
    /// ```
    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(move |_| predicate()),
            always: false,
        }
    }

    /// The default guard: accepts every event.
    pub fn always() -> Self {
        Guard {
            predicate: Arc::new(|_| true),
            always: true,
        }
    }

    /// Evaluate the guard against an event payload.
    pub fn check(&self, payload: &dyn Any) -> bool {
        (self.predicate)(payload)
    }

    /// Whether this is the default always-true guard.
    ///
    /// Used by the table audit to spot transitions shadowed by an earlier
    /// unconditional row.
    pub(crate) fn is_always(&self) -> bool {
        self.always
    }
}

impl Clone for Guard {
    fn clone(&self) -> Self {
        Guard {
            predicate: Arc::clone(&self.predicate),
            always: self.always,
        }
    }
}

impl Default for Guard {
    fn default() -> Self {
        Self::always()
    }
}

/// Side-effecting procedure run when a transition fires.
///
/// Like [`Guard`], an action is bound to one concrete event type and stored
/// type-erased. Running it against a payload of another type is a no-op.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use trellis::{Action, Event};
///
/// #[derive(Debug)]
/// struct Connect;
/// impl Event for Connect {}
///
/// let count = Arc::new(AtomicUsize::new(0));
/// let count_ref = Arc::clone(&count);
/// let establish = Action::new(move |_: &Connect| {
///     count_ref.fetch_add(1, Ordering::SeqCst);
/// });
///
/// establish.run(&Connect);
/// assert_eq!(count.load(Ordering::SeqCst), 1);
/// ```
pub struct Action {
    procedure: Arc<dyn Fn(&dyn Any) + Send + Sync>,
}

impl Action {
    /// Create an action from a procedure over the event payload.
    pub fn new<E, F>(procedure: F) -> Self
    where
        E: Event,
        F: Fn(&E) + Send + Sync + 'static,
    {
        Action {
            procedure: Arc::new(move |payload: &dyn Any| {
                if let Some(e) = payload.downcast_ref::<E>() {
                    procedure(e);
                }
            }),
        }
    }

    /// Create an action from a procedure that ignores the payload.
    pub fn from_fn<F>(procedure: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Action {
            procedure: Arc::new(move |_| procedure()),
        }
    }

    /// The default action: does nothing.
    pub fn noop() -> Self {
        Action {
            procedure: Arc::new(|_| {}),
        }
    }

    /// Run the action against an event payload.
    pub fn run(&self, payload: &dyn Any) {
        (self.procedure)(payload)
    }
}

impl Clone for Action {
    fn clone(&self) -> Self {
        Action {
            procedure: Arc::clone(&self.procedure),
        }
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::noop()
    }
}
