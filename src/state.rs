//! A named control state with an accepting flag and an exact-match
//! transition table from read tuples to actions.

use std::collections::HashMap;

use crate::types::Action;

/// One state of a machine. The transition table is keyed by the full tuple
/// of symbols read across all tapes; lookups are exact, with no wildcards
/// or partial matches.
///
/// A state is *final* when its table is empty; it is *accepting* when the
/// flag is set, which only matters once the machine halts in it.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    name: String,
    accepting: bool,
    transitions: HashMap<Vec<char>, Action>,
}

impl State {
    /// Creates a state with an empty, per-instance transition table.
    pub fn new(name: impl Into<String>, accepting: bool) -> Self {
        Self {
            name: name.into(),
            accepting,
            transitions: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stores an action for a read tuple, overwriting any existing entry
    /// for the same tuple.
    pub fn add_transition(&mut self, read: Vec<char>, action: Action) {
        self.transitions.insert(read, action);
    }

    /// Looks up the action for a read tuple. `None` is the explicit
    /// "unmatched" result.
    pub fn actions(&self, read: &[char]) -> Option<&Action> {
        self.transitions.get(read)
    }

    /// A state with no outgoing transitions; computation halts here.
    pub fn is_final(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Iterates over the stored `(read tuple, action)` pairs.
    pub fn transitions(&self) -> impl Iterator<Item = (&Vec<char>, &Action)> {
        self.transitions.iter()
    }
}
