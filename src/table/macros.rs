//! Row-syntax macro for declaring transition tables.

/// Declare a transition table in row syntax.
///
/// Each row reads `source + Event [guard] / action => destination`, where
/// the guard, action, and destination are each optional:
///
/// - a leading `*` inside the source literal marks a region's initial state
/// - `[guard]` is a predicate over the event payload
/// - `/ action` is a procedure over the event payload
/// - omitting `=> destination` yields an internal transition
///
/// Event names must be plain identifiers in scope. Expands to a
/// `Result<TransitionTable, BuildError>`.
///
/// # Example
///
/// ```rust
/// use trellis::{transition_table, Event, StateMachine};
///
/// #[derive(Debug)]
/// struct Connect;
/// #[derive(Debug)]
/// struct Ping {
///     valid: bool,
/// }
/// impl Event for Connect {}
/// impl Event for Ping {}
///
/// let table = transition_table! {
///     "*Disconnected" + Connect => "Connected",
///     "Connected" + Ping [|e: &Ping| e.valid] / |_: &Ping| println!("pong"),
/// }
/// .unwrap();
///
/// let mut machine = StateMachine::new(table).unwrap();
/// machine.process_event(&Connect);
/// assert!(machine.is(&["Connected"]));
/// ```
#[macro_export]
macro_rules! transition_table {
    (
        $(
            $src:literal + $event:ident
            $( [ $guard:expr ] )?
            $( / $action:expr )?
            $( => $dst:literal )?
        ),+ $(,)?
    ) => {{
        let builder = $crate::TransitionTable::builder();
        $(
            let builder = builder.row({
                let row = $crate::transition($src).on::<$event>();
                $( let row = row.when($guard); )?
                $( let row = row.then($action); )?
                $( let row = row.to($dst); )?
                row
            });
        )+
        builder.build()
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::Event;
    use crate::machine::StateMachine;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Coin;
    #[derive(Debug)]
    struct Push;
    impl Event for Coin {}
    impl Event for Push {}

    #[test]
    fn macro_builds_an_ordered_table() {
        let table = transition_table! {
            "*Locked" + Coin => "Unlocked",
            "Unlocked" + Push => "Locked",
        }
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.transitions()[0].source().name(), "Locked");
        assert!(table.transitions()[0].source().is_initial());
    }

    #[test]
    fn macro_supports_guard_action_and_internal_rows() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_ref = Arc::clone(&count);

        let table = transition_table! {
            "*Locked" + Coin / move |_: &Coin| { count_ref.fetch_add(1, Ordering::SeqCst); } => "Unlocked",
            "Unlocked" + Push [|_: &Push| false] => "Locked",
            "Unlocked" + Coin,
        }
        .unwrap();

        let mut machine = StateMachine::new(table).unwrap();
        machine.process_event(&Coin);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(machine.is(&["Unlocked"]));

        // Guard rejects, internal row leaves state put
        machine.process_event(&Push);
        machine.process_event(&Coin);
        assert!(machine.is(&["Unlocked"]));
    }

    #[test]
    fn macro_rejects_unmarked_tables() {
        let result = transition_table! {
            "Locked" + Coin => "Unlocked",
        };

        assert!(result.is_err());
    }
}
