//! Post-parse validation of a built machine: configuration defects that
//! the grammar cannot express, caught before the first run.

use std::collections::HashSet;

use crate::machine::Machine;
use crate::types::{MachineError, Write, BLANK_SYMBOL};

/// Defects found while analyzing a built machine.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// States defined in `Q` that no chain of transitions can reach from
    /// the initial state.
    UnreachableStates(Vec<String>),
    /// Read or write symbols used in transitions that the configured tape
    /// alphabet does not contain (the reserved blank is always allowed).
    SymbolsOutsideAlphabet(Vec<char>),
}

impl From<AnalysisError> for MachineError {
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::UnreachableStates(states) => {
                MachineError::Config(format!("Unreachable states detected: {:?}", states))
            }
            AnalysisError::SymbolsOutsideAlphabet(symbols) => MachineError::Config(format!(
                "Transitions use symbols outside the alphabet: {:?}",
                symbols
            )),
        }
    }
}

/// Analyzes a built [`Machine`], returning the first defect found.
pub fn analyze(machine: &Machine) -> Result<(), MachineError> {
    [check_reachability, check_alphabet_use]
        .iter()
        .filter_map(|check| check(machine).err())
        .next()
        .map_or(Ok(()), |error| Err(error.into()))
}

/// Every state must be reachable from the initial state.
fn check_reachability(machine: &Machine) -> Result<(), AnalysisError> {
    let Some(initial) = machine.initial_state() else {
        return Ok(());
    };

    let mut visited: HashSet<&str> = HashSet::new();
    let mut pending = vec![initial];

    while let Some(name) = pending.pop() {
        if !visited.insert(name) {
            continue;
        }
        if let Some(state) = machine.states().get(name) {
            for (_, action) in state.transitions() {
                pending.push(action.next_state.as_str());
            }
        }
    }

    let mut unreachable: Vec<String> = machine
        .states()
        .keys()
        .filter(|name| !visited.contains(name.as_str()))
        .cloned()
        .collect();

    if unreachable.is_empty() {
        Ok(())
    } else {
        unreachable.sort();
        Err(AnalysisError::UnreachableStates(unreachable))
    }
}

/// Every read and write symbol must belong to the configured alphabet.
/// Skipped entirely when no alphabet was declared.
fn check_alphabet_use(machine: &Machine) -> Result<(), AnalysisError> {
    let Some(gamma) = machine.alphabet() else {
        return Ok(());
    };

    let mut offending: HashSet<char> = HashSet::new();

    for state in machine.states().values() {
        for (read, action) in state.transitions() {
            for &symbol in read {
                if symbol != BLANK_SYMBOL && !gamma.contains(&symbol) {
                    offending.insert(symbol);
                }
            }
            for write in &action.writes {
                if let Write::Symbol(symbol) = write {
                    if *symbol != BLANK_SYMBOL && !gamma.contains(symbol) {
                        offending.insert(*symbol);
                    }
                }
            }
        }
    }

    if offending.is_empty() {
        Ok(())
    } else {
        let mut symbols: Vec<char> = offending.into_iter().collect();
        symbols.sort_unstable();
        Err(AnalysisError::SymbolsOutsideAlphabet(symbols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_with_states(names: &[&str]) -> Machine {
        let mut machine = Machine::new();
        for (i, name) in names.iter().enumerate() {
            machine.add_state(name, i == names.len() - 1).unwrap();
        }
        machine
    }

    #[test]
    fn test_reachable_machine_passes() {
        let mut machine = machine_with_states(&["q0", "q1"]);
        machine
            .add_transition("q0", vec!['a'], "q1", vec![Write::Symbol('a')], &['R'])
            .unwrap();

        assert!(analyze(&machine).is_ok());
    }

    #[test]
    fn test_unreachable_state_is_reported() {
        let mut machine = machine_with_states(&["q0", "q1", "q2"]);
        machine
            .add_transition("q0", vec!['a'], "q1", vec![Write::Symbol('a')], &['R'])
            .unwrap();

        let error = check_reachability(&machine).unwrap_err();
        assert_eq!(error, AnalysisError::UnreachableStates(vec!["q2".to_string()]));
        assert!(analyze(&machine).is_err());
    }

    #[test]
    fn test_symbols_outside_alphabet_are_reported() {
        let mut machine = machine_with_states(&["q0", "q1"]);
        machine.set_alphabet(['a'].into_iter().collect()).unwrap();
        machine
            .add_transition("q0", vec!['a'], "q1", vec![Write::Symbol('z')], &['R'])
            .unwrap();

        let error = check_alphabet_use(&machine).unwrap_err();
        assert_eq!(error, AnalysisError::SymbolsOutsideAlphabet(vec!['z']));
    }

    #[test]
    fn test_blank_is_always_allowed() {
        let mut machine = machine_with_states(&["q0", "q1"]);
        machine.set_alphabet(['a'].into_iter().collect()).unwrap();
        machine
            .add_transition(
                "q0",
                vec![BLANK_SYMBOL],
                "q1",
                vec![Write::Symbol(BLANK_SYMBOL)],
                &['R'],
            )
            .unwrap();

        assert!(analyze(&machine).is_ok());
    }

    #[test]
    fn test_no_alphabet_skips_symbol_check() {
        let mut machine = machine_with_states(&["q0", "q1"]);
        machine
            .add_transition("q0", vec!['z'], "q1", vec![Write::Symbol('z')], &['R'])
            .unwrap();

        assert!(analyze(&machine).is_ok());
    }
}
