//! Static audit of transition tables.
//!
//! The dispatcher is deliberately forgiving at runtime: unmatched events are
//! absorbed, shadowed rows simply never fire. The audit surfaces those table
//! shapes ahead of time, accumulating every finding rather than stopping at
//! the first.

use crate::table::{BuildError, StateId, StateRegistry, TransitionTable};
use std::fmt;

/// One suspicious table shape found by [`audit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Finding {
    /// A row shares its source state and event with an earlier row whose
    /// guard is the always-true default; the later row can never fire.
    ShadowedTransition {
        /// Table index of the unconditional earlier row
        earlier: usize,
        /// Table index of the unreachable later row
        later: usize,
        /// The shared source state name
        source: String,
        /// The shared event class name
        event: String,
    },

    /// A state that appears only as a source: it is neither an initial state
    /// nor any row's destination, so no event sequence can ever reach it.
    UnreachableState {
        /// The unreachable state's name
        name: String,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::ShadowedTransition {
                earlier,
                later,
                source,
                event,
            } => write!(
                f,
                "row {later} (`{source}` + `{event}`) is shadowed by unconditional row {earlier}"
            ),
            Finding::UnreachableState { name } => {
                write!(f, "state `{name}` is never an initial state or a destination")
            }
        }
    }
}

/// Accumulated audit findings for one table.
#[derive(Clone, Debug, Default)]
pub struct TableReport {
    findings: Vec<Finding>,
}

impl TableReport {
    /// All findings, shadowing first, in table order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Whether the audit found nothing.
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Audit a table for rows that can never fire and states that can never be
/// reached.
///
/// Shares the table's own construction-time validation, so a table that
/// would not build reports the same [`BuildError`].
///
/// # Example
///
/// ```rust
/// use trellis::{audit, transition, Event, Finding, TransitionTable};
///
/// #[derive(Debug)]
/// struct Go;
/// impl Event for Go {}
///
/// let table = TransitionTable::builder()
///     .row(transition("*a").on::<Go>().to("b"))
///     .row(transition("a").on::<Go>().to("c"))
///     .build()
///     .unwrap();
///
/// let report = audit(&table).unwrap();
/// assert!(matches!(
///     report.findings()[0],
///     Finding::ShadowedTransition { earlier: 0, later: 1, .. }
/// ));
/// ```
pub fn audit(table: &TransitionTable) -> Result<TableReport, BuildError> {
    let registry = StateRegistry::from_table(table)?;
    let rows = table.transitions();
    let mut findings = Vec::new();

    for (i, earlier) in rows.iter().enumerate() {
        if !earlier.guard().is_always() {
            continue;
        }
        let src = registry.require(earlier.source().name());
        for (j, later) in rows.iter().enumerate().skip(i + 1) {
            if later.event() == earlier.event() && registry.require(later.source().name()) == src {
                findings.push(Finding::ShadowedTransition {
                    earlier: i,
                    later: j,
                    source: earlier.source().name().to_string(),
                    event: earlier.event().name().to_string(),
                });
            }
        }
    }

    for (idx, name) in registry.names().iter().enumerate() {
        let id = StateId(idx);
        let is_initial = registry.initial_states().contains(&id);
        let is_dest = rows.iter().any(|r| r.dest() == Some(name.as_str()));
        if !is_initial && !is_dest {
            findings.push(Finding::UnreachableState { name: name.clone() });
        }
    }

    Ok(TableReport { findings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Event;
    use crate::table::transition;

    #[derive(Debug)]
    struct Go;
    #[derive(Debug)]
    struct Stop;
    impl Event for Go {}
    impl Event for Stop {}

    #[test]
    fn clean_table_reports_nothing() {
        let table = TransitionTable::builder()
            .row(transition("*a").on::<Go>().to("b"))
            .row(transition("b").on::<Stop>().to("a"))
            .build()
            .unwrap();

        let report = audit(&table).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn unconditional_row_shadows_later_siblings() {
        let table = TransitionTable::builder()
            .row(transition("*a").on::<Go>().to("b"))
            .row(transition("a").on::<Go>().to("c"))
            .build()
            .unwrap();

        let report = audit(&table).unwrap();
        assert_eq!(
            report.findings(),
            &[Finding::ShadowedTransition {
                earlier: 0,
                later: 1,
                source: "a".to_string(),
                event: crate::core::EventKind::of::<Go>().name().to_string(),
            }]
        );
    }

    #[test]
    fn guarded_row_does_not_shadow() {
        let table = TransitionTable::builder()
            .row(transition("*a").on::<Go>().when(|_: &Go| false).to("b"))
            .row(transition("a").on::<Go>().to("c"))
            .build()
            .unwrap();

        let report = audit(&table).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn different_events_do_not_shadow() {
        let table = TransitionTable::builder()
            .row(transition("*a").on::<Go>().to("b"))
            .row(transition("a").on::<Stop>().to("b"))
            .build()
            .unwrap();

        let report = audit(&table).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn source_only_state_is_unreachable() {
        let table = TransitionTable::builder()
            .row(transition("*a").on::<Go>().to("b"))
            .row(transition("ghost").on::<Go>().to("b"))
            .build()
            .unwrap();

        let report = audit(&table).unwrap();
        assert_eq!(
            report.findings(),
            &[Finding::UnreachableState {
                name: "ghost".to_string()
            }]
        );
    }

    #[test]
    fn initial_states_are_reachable_by_definition() {
        let table = TransitionTable::builder()
            .row(transition("*a").on::<Go>().to("b"))
            .build()
            .unwrap();

        let report = audit(&table).unwrap();
        assert!(report.is_clean());
    }

    #[test]
    fn audit_surfaces_build_errors() {
        let table = TransitionTable::builder()
            .row(transition("a").on::<Go>().to("b"))
            .build()
            .unwrap();

        assert!(matches!(audit(&table), Err(BuildError::NoInitialState)));
    }

    #[test]
    fn findings_display_readably() {
        let finding = Finding::UnreachableState {
            name: "ghost".to_string(),
        };
        assert!(finding.to_string().contains("ghost"));
    }
}
