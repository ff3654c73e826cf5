use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassNamesError {
    #[error("failed to read class names from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Class-id → display name table, one name per line of the source file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassNames {
    names: Vec<String>,
}

impl ClassNames {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn load(path: &Path) -> Result<Self, ClassNamesError> {
        let text = std::fs::read_to_string(path).map_err(|source| ClassNamesError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        Self::new(text.lines().map(|line| line.trim_end().to_string()).collect())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Display name for `class_id`; ids past the end of the list get a
    /// generic `class <id>` name.
    pub fn name(&self, class_id: usize) -> String {
        self.names
            .get(class_id)
            .cloned()
            .unwrap_or_else(|| format!("class {class_id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_one_name_per_line() {
        let names = ClassNames::parse("person\nbicycle\ncar\n");
        assert_eq!(names.len(), 3);
        assert_eq!(names.name(2), "car");
    }

    #[test]
    fn test_parse_strips_carriage_returns() {
        let names = ClassNames::parse("person\r\ntraffic light\r\n");
        assert_eq!(names.name(1), "traffic light");
    }

    #[test]
    fn test_out_of_range_id_gets_generic_name() {
        let names = ClassNames::parse("person\n");
        assert_eq!(names.name(7), "class 7");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coco.names");
        std::fs::write(&path, "person\ndog\n").unwrap();
        let names = ClassNames::load(&path).unwrap();
        assert_eq!(names.name(1), "dog");
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = ClassNames::load(Path::new("/nonexistent/coco.names")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/coco.names"));
    }
}
