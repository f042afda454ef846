//! A single read/write track of the machine's storage: a sparse map from
//! signed cell position to symbol plus a movable head.
//!
//! The tape is two-way infinite. The head may go negative; unset cells on
//! either side read as the blank symbol. Growth is implicit insertion into
//! the sparse map, so no operation here can fail.

use std::collections::HashMap;

use crate::types::{Direction, Write, BLANK_SYMBOL};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tape {
    cells: HashMap<i64, char>,
    head: i64,
}

impl Tape {
    /// Creates an empty tape with the head at position 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol at `pos`, or the blank symbol if the cell was
    /// never written.
    pub fn read(&self, pos: i64) -> char {
        self.cells.get(&pos).copied().unwrap_or(BLANK_SYMBOL)
    }

    /// Returns the symbol under the head.
    pub fn read_head(&self) -> char {
        self.read(self.head)
    }

    /// Applies a write at the head, then advances the head by the
    /// direction's offset. A `Write::Unchanged` entry leaves the cell
    /// untouched while the movement still applies.
    pub fn write_and_move(&mut self, write: Write, direction: Direction) {
        if let Write::Symbol(symbol) = write {
            if symbol == BLANK_SYMBOL {
                // Writing blank erases the cell, keeping the map sparse.
                self.cells.remove(&self.head);
            } else {
                self.cells.insert(self.head, symbol);
            }
        }

        self.head += direction.offset();
    }

    /// Repositions the head directly.
    pub fn move_to(&mut self, pos: i64) {
        self.head = pos;
    }

    /// Returns the current head position.
    pub fn head(&self) -> i64 {
        self.head
    }

    /// Clears every cell and returns the head to position 0.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.head = 0;
    }

    /// Replaces the tape contents with `input`, written left-to-right from
    /// position 0, and returns the head to position 0.
    pub fn load(&mut self, input: &str) {
        self.clear();
        for (i, symbol) in input.chars().enumerate() {
            if symbol != BLANK_SYMBOL {
                self.cells.insert(i as i64, symbol);
            }
        }
    }

    /// The inclusive range of written cells, or `None` for a blank tape.
    pub fn extent(&self) -> Option<(i64, i64)> {
        let min = self.cells.keys().min()?;
        let max = self.cells.keys().max()?;
        Some((*min, *max))
    }

    /// Renders the written extent of the tape as a string, with unset
    /// interior cells shown as the blank symbol. A blank tape renders as
    /// the empty string.
    pub fn contents(&self) -> String {
        match self.extent() {
            Some((min, max)) => (min..=max).map(|pos| self.read(pos)).collect(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_cells_read_blank() {
        let tape = Tape::new();
        assert_eq!(tape.read(0), BLANK_SYMBOL);
        assert_eq!(tape.read(-42), BLANK_SYMBOL);
        assert_eq!(tape.read_head(), BLANK_SYMBOL);
    }

    #[test]
    fn test_write_and_move() {
        let mut tape = Tape::new();
        tape.write_and_move(Write::Symbol('a'), Direction::Right);

        assert_eq!(tape.read(0), 'a');
        assert_eq!(tape.head(), 1);

        tape.write_and_move(Write::Symbol('b'), Direction::Stay);
        assert_eq!(tape.read(1), 'b');
        assert_eq!(tape.head(), 1);
    }

    #[test]
    fn test_unchanged_moves_without_writing() {
        let mut tape = Tape::new();
        tape.load("ab");

        tape.write_and_move(Write::Unchanged, Direction::Right);
        assert_eq!(tape.read(0), 'a');
        assert_eq!(tape.head(), 1);
    }

    #[test]
    fn test_head_may_go_negative() {
        let mut tape = Tape::new();
        tape.write_and_move(Write::Unchanged, Direction::Left);
        assert_eq!(tape.head(), -1);

        tape.write_and_move(Write::Symbol('x'), Direction::Left);
        assert_eq!(tape.read(-1), 'x');
        assert_eq!(tape.head(), -2);
    }

    #[test]
    fn test_writing_blank_erases() {
        let mut tape = Tape::new();
        tape.load("abc");
        tape.write_and_move(Write::Symbol(BLANK_SYMBOL), Direction::Stay);

        assert_eq!(tape.read(0), BLANK_SYMBOL);
        assert_eq!(tape.extent(), Some((1, 2)));
    }

    #[test]
    fn test_load_and_contents() {
        let mut tape = Tape::new();
        tape.load("101");

        assert_eq!(tape.head(), 0);
        assert_eq!(tape.contents(), "101");
        assert_eq!(tape.extent(), Some((0, 2)));

        tape.load("");
        assert_eq!(tape.contents(), "");
        assert_eq!(tape.extent(), None);
    }

    #[test]
    fn test_contents_spans_negative_extent() {
        let mut tape = Tape::new();
        tape.move_to(-2);
        tape.write_and_move(Write::Symbol('a'), Direction::Right);
        tape.move_to(1);
        tape.write_and_move(Write::Symbol('b'), Direction::Stay);

        // Interior unset cells render as blank.
        assert_eq!(tape.contents(), "a__b");
    }

    #[test]
    fn test_clear_resets_head_and_cells() {
        let mut tape = Tape::new();
        tape.load("11");
        tape.move_to(7);
        tape.clear();

        assert_eq!(tape.head(), 0);
        assert_eq!(tape.contents(), "");
    }
}
