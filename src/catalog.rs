//! A registry of bundled example machines, embedded at compile time and
//! parsed on first use.

use crate::machine::Machine;
use crate::types::MachineError;

use std::sync::RwLock;

// Bundled machine descriptions.
const MACHINE_TEXTS: [(&str, &str); 3] = [
    (
        "equal-zeros-ones",
        include_str!("../machines/equal-zeros-ones.tm"),
    ),
    (
        "binary-increment",
        include_str!("../machines/binary-increment.tm"),
    ),
    ("two-tape-copy", include_str!("../machines/two-tape-copy.tm")),
];

lazy_static::lazy_static! {
    static ref MACHINES: RwLock<Vec<(String, Machine)>> = RwLock::new(Vec::new());
}

/// Access to the bundled example machines by name.
pub struct Catalog;

impl Catalog {
    /// Parses the embedded descriptions into the registry. Later calls are
    /// no-ops once the registry is populated.
    pub fn load() -> Result<(), MachineError> {
        let mut guard = MACHINES
            .write()
            .map_err(|_| MachineError::File("Failed to acquire write lock".to_string()))?;

        if !guard.is_empty() {
            return Ok(());
        }

        for (name, text) in MACHINE_TEXTS {
            guard.push((name.to_string(), crate::parser::parse(text)?));
        }

        Ok(())
    }

    /// Lists the names of the bundled machines.
    pub fn names() -> Vec<String> {
        let _ = Self::load();

        MACHINES
            .read()
            .map(|machines| machines.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns a fresh copy of a bundled machine by name.
    pub fn get(name: &str) -> Result<Machine, MachineError> {
        let _ = Self::load();

        MACHINES
            .read()
            .map_err(|_| MachineError::File("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, machine)| machine.clone())
            .ok_or_else(|| MachineError::Config(format!("Unknown example machine: {name}")))
    }
}
