//! The state machine: region cursors and event dispatch.

pub mod snapshot;

pub use snapshot::{Snapshot, SnapshotError, SNAPSHOT_VERSION};

use crate::core::{DispatchLog, DispatchRecord, Event, EventKind};
use crate::table::{BuildError, StateId, StateRegistry, TransitionTable};
use chrono::Utc;
use std::collections::HashMap;

/// A hierarchical state machine over an immutable transition table.
///
/// Construction derives the state registry, builds a dispatch index from
/// `(event kind, source state)` to the ordered candidate rows, and starts
/// one region per initial marker. After that, [`process_event`] is the only
/// mutating entry point.
///
/// The machine is single-threaded and synchronous: `process_event` runs to
/// completion before returning, and concurrent use of one instance requires
/// external synchronization.
///
/// [`process_event`]: StateMachine::process_event
///
/// # Example
///
/// ```rust
/// use trellis::{transition, Event, StateMachine, TransitionTable};
///
/// #[derive(Debug)]
/// struct Connect;
/// #[derive(Debug)]
/// struct Disconnect;
/// impl Event for Connect {}
/// impl Event for Disconnect {}
///
/// let table = TransitionTable::builder()
///     .row(transition("*Disconnected").on::<Connect>().to("Connected"))
///     .row(transition("Connected").on::<Disconnect>().to("Disconnected"))
///     .build()
///     .unwrap();
///
/// let mut machine = StateMachine::new(table).unwrap();
/// assert!(machine.is(&["Disconnected"]));
///
/// machine.process_event(&Connect);
/// assert!(machine.is(&["Connected"]));
///
/// machine.process_event(&Disconnect);
/// assert!(machine.is(&["Disconnected"]));
/// ```
pub struct StateMachine {
    table: TransitionTable,
    registry: StateRegistry,
    index: HashMap<(EventKind, StateId), Vec<usize>>,
    regions: Vec<StateId>,
    log: Option<DispatchLog>,
}

impl StateMachine {
    /// Construct a machine over a transition table.
    ///
    /// Fails with [`BuildError::NoInitialState`] if the table marks no
    /// initial state.
    pub fn new(table: TransitionTable) -> Result<Self, BuildError> {
        let registry = StateRegistry::from_table(&table)?;

        let mut index: HashMap<(EventKind, StateId), Vec<usize>> = HashMap::new();
        for (i, row) in table.transitions().iter().enumerate() {
            let src = registry.require(row.source().name());
            index.entry((row.event(), src)).or_default().push(i);
        }

        let regions = registry.initial_states().to_vec();

        Ok(Self {
            table,
            registry,
            index,
            regions,
            log: None,
        })
    }

    /// Enable the dispatch log.
    ///
    /// Off by default; with it off, dispatch performs no allocation.
    pub fn with_log(mut self) -> Self {
        self.log = Some(DispatchLog::new());
        self
    }

    /// Dispatch one event to every region.
    ///
    /// For each region in declaration order, the candidate rows matching the
    /// region's current state and the event's kind are walked in table order;
    /// the first row whose guard passes runs its action and, if it declares a
    /// destination, moves the region. At most one transition fires per region
    /// per call. An event with no matching row is silently absorbed.
    ///
    /// Regions never observe each other's mutation within one call: each
    /// region's cursor is read once before any of its rows are tried, and a
    /// row only ever writes its own region's cursor.
    ///
    /// Panics raised by caller-supplied guards or actions propagate
    /// unmodified.
    pub fn process_event<E: Event>(&mut self, event: &E) {
        let kind = EventKind::of::<E>();
        let StateMachine {
            table,
            registry,
            index,
            regions,
            log,
        } = self;

        for (region, current) in regions.iter_mut().enumerate() {
            let Some(candidates) = index.get(&(kind, *current)) else {
                continue;
            };
            for &i in candidates {
                let row = &table.transitions()[i];
                if !row.guard().check(event) {
                    continue;
                }
                row.action().run(event);
                let from = *current;
                if let Some(dest) = row.dest() {
                    *current = registry.require(dest);
                }
                if let Some(log) = log {
                    let updated = log.record(DispatchRecord {
                        region,
                        from: registry.name(from).to_string(),
                        to: registry.name(*current).to_string(),
                        event: kind.name().to_string(),
                        internal: row.is_internal(),
                        timestamp: Utc::now(),
                    });
                    *log = updated;
                }
                break;
            }
        }
    }

    /// Positional region-state query.
    ///
    /// True iff each region's current state equals the corresponding name.
    /// Read-only.
    ///
    /// # Panics
    ///
    /// Panics if the number of names differs from the number of regions, or
    /// if any name is not part of the table's state set. Both are programmer
    /// errors, defined as fatal rather than silently wrong.
    pub fn is(&self, states: &[&str]) -> bool {
        assert_eq!(
            states.len(),
            self.regions.len(),
            "is() takes one state name per region ({} regions, {} names given)",
            self.regions.len(),
            states.len()
        );
        states
            .iter()
            .zip(&self.regions)
            .all(|(name, current)| self.registry.require(name) == *current)
    }

    /// Current state name of each region, in region order.
    pub fn current_states(&self) -> Vec<&str> {
        self.regions
            .iter()
            .map(|&id| self.registry.name(id))
            .collect()
    }

    /// Number of concurrent regions.
    pub fn num_regions(&self) -> usize {
        self.regions.len()
    }

    /// The transition table this machine dispatches over.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// The state registry derived from the table.
    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    /// The dispatch log, if enabled via [`with_log`](StateMachine::with_log).
    pub fn log(&self) -> Option<&DispatchLog> {
        self.log.as_ref()
    }
}
