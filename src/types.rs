//! Core data types shared across the interpreter: directions, write
//! operations, transition actions, and the crate-wide error type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Rule;

/// The reserved blank symbol. Any unset tape cell reads as this character.
pub const BLANK_SYMBOL: char = '_';
/// The write token that leaves a tape cell untouched while the head still
/// moves.
pub const UNCHANGED_SYMBOL: char = '*';
/// The name reported for the implicit terminal non-accepting state that a
/// machine enters when no transition matches.
pub const REJECT_STATE_NAME: &str = "<rejected>";

/// A head movement. Offsets are Left = -1, Right = +1, Stay = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Stay,
}

impl Direction {
    /// The signed head displacement for this direction.
    pub fn offset(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Stay => 0,
        }
    }

    /// Converts a direction token through the fixed lookup table.
    ///
    /// Supports `L`/`<` for Left, `R`/`>` for Right, and `S`/`-` for Stay.
    pub fn from_token(token: char) -> Result<Self, MachineError> {
        match token {
            'L' | '<' => Ok(Direction::Left),
            'R' | '>' => Ok(Direction::Right),
            'S' | '-' => Ok(Direction::Stay),
            _ => Err(MachineError::Config(format!(
                "Unsupported direction token: {token}"
            ))),
        }
    }
}

/// One per-tape write entry of an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Write {
    /// Write this symbol at the head.
    Symbol(char),
    /// Leave the cell as it is; only the head movement applies.
    Unchanged,
}

/// The effect of a matched transition: the target state plus one write and
/// one movement per tape, applied in lockstep within a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub next_state: String,
    pub writes: Vec<Write>,
    pub directions: Vec<Direction>,
}

/// Errors raised while building, configuring, or loading a machine.
///
/// Configuration errors are fatal at load time; [`MachineError::InvalidSymbol`]
/// is recoverable per input. A missing transition at run time is not an
/// error at all — the machine moves to the implicit reject state instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// A state name was registered twice.
    #[error("Duplicate state: {0}")]
    DuplicateState(String),
    /// The machine definition is inconsistent (unknown states, alphabet
    /// violations, arity mismatches, ...).
    #[error("Configuration error: {0}")]
    Config(String),
    /// `set_tape` was given a character outside the input alphabet.
    #[error("Input symbol not in input alphabet: '{0}'")]
    InvalidSymbol(char),
    /// The description text is syntactically malformed.
    #[error("Description parsing error: {0}")]
    Parse(#[from] Box<pest::error::Error<Rule>>),
    /// A description file could not be read.
    #[error("File error: {0}")]
    File(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Left.offset(), -1);
        assert_eq!(Direction::Right.offset(), 1);
        assert_eq!(Direction::Stay.offset(), 0);
    }

    #[test]
    fn test_direction_token_table() {
        assert_eq!(Direction::from_token('L').unwrap(), Direction::Left);
        assert_eq!(Direction::from_token('<').unwrap(), Direction::Left);
        assert_eq!(Direction::from_token('R').unwrap(), Direction::Right);
        assert_eq!(Direction::from_token('>').unwrap(), Direction::Right);
        assert_eq!(Direction::from_token('S').unwrap(), Direction::Stay);
        assert_eq!(Direction::from_token('-').unwrap(), Direction::Stay);

        let err = Direction::from_token('X').unwrap_err();
        assert!(matches!(err, MachineError::Config(_)));
    }

    #[test]
    fn test_direction_serialization() {
        let left = Direction::Left;
        let right = Direction::Right;

        let left_json = serde_json::to_string(&left).unwrap();
        let right_json = serde_json::to_string(&right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left_deserialized: Direction = serde_json::from_str(&left_json).unwrap();
        let right_deserialized: Direction = serde_json::from_str(&right_json).unwrap();

        assert_eq!(left, left_deserialized);
        assert_eq!(right, right_deserialized);
    }

    #[test]
    fn test_action_creation() {
        let action = Action {
            next_state: "q1".to_string(),
            writes: vec![Write::Symbol('x'), Write::Unchanged],
            directions: vec![Direction::Right, Direction::Left],
        };

        assert_eq!(action.writes[1], Write::Unchanged);
        assert_eq!(action.directions, vec![Direction::Right, Direction::Left]);
        assert_eq!(action.next_state, "q1");
    }

    #[test]
    fn test_error_display() {
        let error = MachineError::InvalidSymbol('2');
        let msg = format!("{}", error);
        assert!(msg.contains("not in input alphabet"));
        assert!(msg.contains('2'));

        let error = MachineError::DuplicateState("q0".to_string());
        assert!(format!("{}", error).contains("q0"));
    }
}
