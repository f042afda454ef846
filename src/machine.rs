//! The control unit of a multi-tape Turing machine: a set of named states,
//! an ordered list of tapes, alphabet configuration, and the stepping and
//! halting logic.
//!
//! A machine is built once (by hand or by the description parser), then
//! reused across inputs via `set_tape`/`reset`. It is synchronous and must
//! be confined to a single logical thread of control; `run` performs no
//! internal bounding, so callers that need a budget alternate `step` with
//! their own counter.

use std::collections::{HashMap, HashSet};

use crate::state::State;
use crate::tape::Tape;
use crate::types::{Action, Direction, MachineError, Write, REJECT_STATE_NAME};

/// Outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A transition was applied and the machine continues.
    Continue,
    /// The machine is in a final state (or just moved to the implicit
    /// reject state); nothing more will happen.
    Halt,
}

/// The current control point. A missing transition is routed to the single
/// implicit terminal non-accepting point rather than a sentinel state name.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    Named(String),
    Rejected,
}

/// A multi-tape Turing machine.
///
/// The tape count is fixed when the first transition's arity is observed;
/// every tape advances exactly once per [`Machine::step`].
#[derive(Debug, Clone)]
pub struct Machine {
    states: HashMap<String, State>,
    initial_state: Option<String>,
    cursor: Cursor,
    tapes: Vec<Tape>,
    tape_count: Option<usize>,
    alphabet: Option<HashSet<char>>,
    input_alphabet: Option<HashSet<char>>,
    step_count: usize,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Creates an empty machine with a single blank tape. The first
    /// registered state becomes the initial state.
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            initial_state: None,
            cursor: Cursor::Rejected,
            tapes: vec![Tape::new()],
            tape_count: None,
            alphabet: None,
            input_alphabet: None,
            step_count: 0,
        }
    }

    /// Registers a state. Fails with [`MachineError::DuplicateState`] when
    /// the name is already taken.
    pub fn add_state(&mut self, name: &str, accepting: bool) -> Result<(), MachineError> {
        if self.states.contains_key(name) {
            return Err(MachineError::DuplicateState(name.to_string()));
        }

        if self.initial_state.is_none() {
            self.initial_state = Some(name.to_string());
            self.cursor = Cursor::Named(name.to_string());
        }

        self.states.insert(name.to_string(), State::new(name, accepting));
        Ok(())
    }

    /// Adds a transition from a registered state. Direction tokens go
    /// through the fixed lookup table (`L`/`R`/`S` and `<`/`>`/`-`).
    ///
    /// The first transition's read arity fixes the machine's tape count;
    /// any later transition with a different arity is a configuration
    /// error. An existing entry for the same `(state, read)` is
    /// overwritten.
    pub fn add_transition(
        &mut self,
        state: &str,
        read: Vec<char>,
        next_state: &str,
        writes: Vec<Write>,
        direction_tokens: &[char],
    ) -> Result<(), MachineError> {
        if !self.states.contains_key(state) {
            return Err(MachineError::Config(format!("Unknown state: {state}")));
        }
        if !self.states.contains_key(next_state) {
            return Err(MachineError::Config(format!(
                "Transition from {state} targets unknown state: {next_state}"
            )));
        }

        let arity = read.len();
        if arity == 0 {
            return Err(MachineError::Config(format!(
                "Transition from {state} reads no symbols"
            )));
        }
        if writes.len() != arity || direction_tokens.len() != arity {
            return Err(MachineError::Config(format!(
                "Transition from {state} mixes arities: {arity} reads, {} writes, {} directions",
                writes.len(),
                direction_tokens.len()
            )));
        }

        match self.tape_count {
            None => {
                self.tape_count = Some(arity);
                self.tapes = vec![Tape::new(); arity];
            }
            Some(count) if count != arity => {
                return Err(MachineError::Config(format!(
                    "Transition from {state} has arity {arity}, but the machine has {count} tapes"
                )));
            }
            Some(_) => {}
        }

        let directions = direction_tokens
            .iter()
            .map(|&token| Direction::from_token(token))
            .collect::<Result<Vec<_>, _>>()?;

        let action = Action {
            next_state: next_state.to_string(),
            writes,
            directions,
        };

        if let Some(entry) = self.states.get_mut(state) {
            entry.add_transition(read, action);
        }

        Ok(())
    }

    /// Configures the tape alphabet.
    pub fn set_alphabet(&mut self, alphabet: HashSet<char>) -> Result<(), MachineError> {
        if let Some(sigma) = &self.input_alphabet {
            if !sigma.is_subset(&alphabet) {
                return Err(MachineError::Config(
                    "input alphabet is not a subset of the alphabet".to_string(),
                ));
            }
        }

        self.alphabet = Some(alphabet);
        Ok(())
    }

    /// Configures the input alphabet, which must be a subset of the
    /// already-configured tape alphabet.
    pub fn set_input_alphabet(&mut self, input_alphabet: HashSet<char>) -> Result<(), MachineError> {
        match &self.alphabet {
            None => Err(MachineError::Config(
                "input alphabet declared without an alphabet".to_string(),
            )),
            Some(gamma) if !input_alphabet.is_subset(gamma) => Err(MachineError::Config(
                "input alphabet is not a subset of the alphabet".to_string(),
            )),
            Some(_) => {
                self.input_alphabet = Some(input_alphabet);
                Ok(())
            }
        }
    }

    /// Loads one input string onto tape 0, left-to-right from position 0
    /// with the head at 0. Other tapes are left as `reset` left them.
    ///
    /// Every character is validated against the input alphabet (when one
    /// is configured) before anything is written; on the first offending
    /// character this fails with [`MachineError::InvalidSymbol`] and the
    /// machine is left unmodified.
    pub fn set_tape(&mut self, input: &str) -> Result<(), MachineError> {
        if let Some(sigma) = &self.input_alphabet {
            if let Some(bad) = input.chars().find(|c| !sigma.contains(c)) {
                return Err(MachineError::InvalidSymbol(bad));
            }
        }

        self.tapes[0].load(input);
        Ok(())
    }

    /// Restores the initial state and reinitializes every tape to blank
    /// with the head at 0. Required before each independent run.
    pub fn reset(&mut self) {
        self.cursor = match &self.initial_state {
            Some(name) => Cursor::Named(name.clone()),
            None => Cursor::Rejected,
        };
        for tape in &mut self.tapes {
            tape.clear();
        }
        self.step_count = 0;
    }

    /// Executes exactly one transition.
    ///
    /// Reads the tuple of symbols under every head and looks up the action
    /// for the current state. Unmatched tuples move the machine to the
    /// implicit reject state. Matched actions apply every tape's write
    /// (skipping `Unchanged` entries) and movement within this one call,
    /// then switch to the target state. A finished machine is left
    /// untouched.
    pub fn step(&mut self) -> Step {
        if self.has_finished() {
            return Step::Halt;
        }

        let Cursor::Named(current) = &self.cursor else {
            return Step::Halt;
        };

        let read = self.symbols();
        let action = self
            .states
            .get(current)
            .and_then(|state| state.actions(&read))
            .cloned();

        self.step_count += 1;

        match action {
            Some(action) => {
                for (i, tape) in self.tapes.iter_mut().enumerate() {
                    tape.write_and_move(action.writes[i], action.directions[i]);
                }
                self.cursor = Cursor::Named(action.next_state);
                Step::Continue
            }
            None => {
                self.cursor = Cursor::Rejected;
                Step::Halt
            }
        }
    }

    /// Steps until the machine halts, then reports acceptance.
    ///
    /// Never returns on a machine that does not halt on this input; a
    /// caller that needs bounded execution alternates [`Machine::step`]
    /// with its own budget instead.
    pub fn run(&mut self) -> bool {
        while !self.has_finished() {
            self.step();
        }
        self.has_accepted()
    }

    /// True when the current state has no outgoing transitions, including
    /// the implicit reject state.
    pub fn has_finished(&self) -> bool {
        match &self.cursor {
            Cursor::Rejected => true,
            Cursor::Named(name) => self.states.get(name).is_none_or(State::is_final),
        }
    }

    /// True when the machine has finished in an accepting state.
    pub fn has_accepted(&self) -> bool {
        match &self.cursor {
            Cursor::Rejected => false,
            Cursor::Named(name) => self
                .states
                .get(name)
                .is_some_and(|state| state.is_final() && state.is_accepting()),
        }
    }

    /// The name of the current state, or a well-known marker for the
    /// implicit reject state.
    pub fn state(&self) -> &str {
        match &self.cursor {
            Cursor::Named(name) => name,
            Cursor::Rejected => REJECT_STATE_NAME,
        }
    }

    pub fn initial_state(&self) -> Option<&str> {
        self.initial_state.as_deref()
    }

    /// The tuple of symbols currently under each tape's head.
    pub fn symbols(&self) -> Vec<char> {
        self.tapes.iter().map(Tape::read_head).collect()
    }

    pub fn tapes(&self) -> &[Tape] {
        &self.tapes
    }

    pub fn tape_count(&self) -> usize {
        self.tapes.len()
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn states(&self) -> &HashMap<String, State> {
        &self.states
    }

    pub fn alphabet(&self) -> Option<&HashSet<char>> {
        self.alphabet.as_ref()
    }

    pub fn input_alphabet(&self) -> Option<&HashSet<char>> {
        self.input_alphabet.as_ref()
    }
}
