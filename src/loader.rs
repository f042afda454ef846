//! Loading machine descriptions from files and in-memory strings.

use crate::machine::Machine;
use crate::parser::parse;
use crate::types::MachineError;
use std::fs;
use std::path::Path;

/// Utility for turning description sources into machines. The front ends
/// use it for `--file` loading and for text assembled from interactive
/// field-by-field entry.
pub struct DescriptionLoader;

impl DescriptionLoader {
    /// Loads a machine description from a file.
    ///
    /// # Returns
    ///
    /// * `Ok(Machine)` if the file is read and parsed successfully.
    /// * `Err(MachineError::File)` if the file cannot be read.
    /// * Any parse or configuration error from [`parse`] otherwise.
    pub fn load(path: &Path) -> Result<Machine, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::File(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Parses a machine description from in-memory text.
    pub fn load_str(content: &str) -> Result<Machine, MachineError> {
        parse(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_valid_description() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.tm");

        let content = "Gamma: 0,1\nSigma: 0,1\nQ: q0,q1\nsig: (q0,0)=(q1,1,R)";
        let mut file = File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let machine = DescriptionLoader::load(&file_path).unwrap();
        assert_eq!(machine.initial_state(), Some("q0"));
        assert_eq!(machine.tape_count(), 1);
    }

    #[test]
    fn test_load_invalid_description() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invalid.tm");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(b"This is not a machine description").unwrap();

        let result = DescriptionLoader::load(&file_path);
        assert!(matches!(result.unwrap_err(), MachineError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = DescriptionLoader::load(&dir.path().join("missing.tm"));
        assert!(matches!(result.unwrap_err(), MachineError::File(_)));
    }

    #[test]
    fn test_load_str() {
        let machine =
            DescriptionLoader::load_str("Q: a,b\nsig: (a,1)=(b,1,R)").unwrap();
        assert_eq!(machine.initial_state(), Some("a"));
    }
}
