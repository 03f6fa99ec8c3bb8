//! State identity resolution.
//!
//! States are discovered, never declared: the state set is exactly the union
//! of every row's source and non-empty destination names. Each name is
//! interned to a dense [`StateId`] in order of first appearance, giving a
//! stable, total mapping for the lifetime of the table.

use crate::table::error::BuildError;
use crate::table::TransitionTable;
use std::collections::HashMap;

/// Dense numeric identity of a state within one table.
///
/// Ids are assigned in order of first appearance and are only meaningful
/// relative to the registry that produced them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// The id's position in the registry's name list.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Interning table mapping state names to [`StateId`]s.
///
/// Built once per table. Also tracks which states carry the initial marker;
/// those define the machine's regions, in declaration order.
///
/// # Example
///
/// ```rust
/// use trellis::table::StateRegistry;
/// use trellis::{transition, Event, TransitionTable};
///
/// #[derive(Debug)]
/// struct Go;
/// impl Event for Go {}
///
/// let table = TransitionTable::builder()
///     .row(transition("*a").on::<Go>().to("b"))
///     .row(transition("b").on::<Go>().to("a"))
///     .build()
///     .unwrap();
///
/// let registry = StateRegistry::from_table(&table).unwrap();
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.num_regions(), 1);
/// assert_eq!(registry.name(registry.require("a")), "a");
/// ```
#[derive(Clone, Debug)]
pub struct StateRegistry {
    names: Vec<String>,
    ids: HashMap<String, StateId>,
    initials: Vec<StateId>,
}

impl StateRegistry {
    /// Discover and intern every state the table references.
    ///
    /// Fails with [`BuildError::NoInitialState`] if no source carries the
    /// initial marker. Repeated markers on the same state name count once.
    pub fn from_table(table: &TransitionTable) -> Result<Self, BuildError> {
        let mut registry = StateRegistry {
            names: Vec::new(),
            ids: HashMap::new(),
            initials: Vec::new(),
        };

        for row in table.transitions() {
            let src = registry.intern(row.source().name());
            if row.source().is_initial() && !registry.initials.contains(&src) {
                registry.initials.push(src);
            }
            if let Some(dest) = row.dest() {
                registry.intern(dest);
            }
        }

        if registry.initials.is_empty() {
            return Err(BuildError::NoInitialState);
        }

        Ok(registry)
    }

    fn intern(&mut self, name: &str) -> StateId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = StateId(self.names.len());
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    /// Look up a state's id.
    pub fn id(&self, name: &str) -> Option<StateId> {
        self.ids.get(name).copied()
    }

    /// Look up a state's id, panicking if the name is not part of the table.
    ///
    /// A miss here is a programmer error (a query naming a state the table
    /// never mentions), defined as fatal rather than silently wrong.
    ///
    /// # Panics
    ///
    /// Panics if `name` is absent from the table's discovered state set.
    pub fn require(&self, name: &str) -> StateId {
        match self.id(name) {
            Some(id) => id,
            None => panic!("state `{name}` is not part of this transition table"),
        }
    }

    /// The name interned under `id`.
    pub fn name(&self, id: StateId) -> &str {
        &self.names[id.0]
    }

    /// All interned names, in id order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of distinct states.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Initial state ids, in declaration order. Region `r` starts at
    /// `initial_states()[r]`.
    pub fn initial_states(&self) -> &[StateId] {
        &self.initials
    }

    /// Number of regions (= number of initial markers).
    pub fn num_regions(&self) -> usize {
        self.initials.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Event;
    use crate::table::builder::transition;

    #[derive(Debug)]
    struct Go;
    impl Event for Go {}

    fn registry(rows: Vec<crate::table::Transition>) -> Result<StateRegistry, BuildError> {
        let table = TransitionTable::builder().rows(rows).build()?;
        StateRegistry::from_table(&table)
    }

    #[test]
    fn states_are_discovered_from_sources_and_destinations() {
        let registry = registry(vec![
            transition("*a").on::<Go>().to("b").into(),
            transition("b").on::<Go>().to("c").into(),
        ])
        .unwrap();

        assert_eq!(registry.len(), 3);
        assert!(registry.id("a").is_some());
        assert!(registry.id("b").is_some());
        assert!(registry.id("c").is_some());
    }

    #[test]
    fn ids_are_dense_in_first_appearance_order() {
        let registry = registry(vec![
            transition("*a").on::<Go>().to("b").into(),
            transition("b").on::<Go>().to("a").into(),
        ])
        .unwrap();

        assert_eq!(registry.require("a").index(), 0);
        assert_eq!(registry.require("b").index(), 1);
        assert_eq!(registry.names(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn mapping_is_stable() {
        let registry = registry(vec![transition("*a").on::<Go>().to("b").into()]).unwrap();

        assert_eq!(registry.require("a"), registry.require("a"));
        assert_eq!(registry.name(registry.require("b")), "b");
    }

    #[test]
    fn marked_and_bare_spellings_intern_to_one_state() {
        let registry = registry(vec![
            transition("*a").on::<Go>().to("b").into(),
            transition("a").on::<Go>().to("c").into(),
        ])
        .unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.num_regions(), 1);
    }

    #[test]
    fn internal_rows_contribute_no_destination() {
        let registry = registry(vec![transition("*a").on::<Go>().into()]).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn zero_initial_markers_is_fatal() {
        let result = registry(vec![transition("a").on::<Go>().to("b").into()]);
        assert!(matches!(result, Err(BuildError::NoInitialState)));
    }

    #[test]
    fn regions_follow_marker_declaration_order() {
        let registry = registry(vec![
            transition("*a").on::<Go>().to("b").into(),
            transition("*x").on::<Go>().to("y").into(),
        ])
        .unwrap();

        assert_eq!(registry.num_regions(), 2);
        assert_eq!(registry.name(registry.initial_states()[0]), "a");
        assert_eq!(registry.name(registry.initial_states()[1]), "x");
    }

    #[test]
    fn repeated_marker_on_one_state_counts_once() {
        let registry = registry(vec![
            transition("*a").on::<Go>().to("b").into(),
            transition("*a").on::<Go>().to("c").into(),
        ])
        .unwrap();

        assert_eq!(registry.num_regions(), 1);
    }

    #[test]
    #[should_panic(expected = "not part of this transition table")]
    fn require_panics_on_unknown_name() {
        let registry = registry(vec![transition("*a").on::<Go>().to("b").into()]).unwrap();
        registry.require("nope");
    }
}
