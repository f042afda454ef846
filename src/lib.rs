//! Core library for a generic multi-tape Turing machine interpreter.
//! It provides the execution engine (tapes, states, stepping, halting and
//! acceptance), the description parser that turns the compact textual
//! notation into a runnable machine, and helpers for loading descriptions
//! and bundled example machines.

pub mod analyzer;
pub mod catalog;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod state;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the `Catalog` registry of bundled machines.
pub use catalog::Catalog;
/// Re-exports the `DescriptionLoader` struct from the loader module.
pub use loader::DescriptionLoader;
/// Re-exports the `Machine` engine and its `Step` result.
pub use machine::{Machine, Step};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the `State` and `Tape` building blocks.
pub use state::State;
pub use tape::Tape;
/// Re-exports the definition types and the crate error.
pub use types::{
    Action, Direction, MachineError, Write, BLANK_SYMBOL, REJECT_STATE_NAME, UNCHANGED_SYMBOL,
};
