//! JSON documents: stable saves, horse profiles and CLI output.

use crate::error::{IoError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(IoError::Encode)
}

pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(IoError::Encode)
}

/// Parses a document. Blank input is rejected before serde sees it.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    if json.trim().is_empty() {
        return Err(IoError::Empty("JSON document"));
    }
    Ok(serde_json::from_str(json)?)
}

pub fn write_json_file<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = to_json_pretty(value)?;
    std::fs::write(path, json).map_err(|e| IoError::file("write", path, e))
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path).map_err(|e| IoError::file("read", path, e))?;
    from_json(&json).map_err(|e| e.with_context(format!("parsing {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use studbook_data::{CareerGrade, Pedigree};
    use tempfile::tempdir;

    #[test]
    fn test_blank_document_is_empty() {
        let result: Result<Pedigree> = from_json("   ");
        assert!(matches!(result, Err(IoError::Empty(_))));
    }

    #[test]
    fn test_malformed_document_is_json_error() {
        let result: Result<Pedigree> = from_json("{ not json");
        assert!(matches!(result, Err(IoError::Json(_))));
        assert!(from_json::<CareerGrade>(r#""Z""#).is_err());
    }

    #[test]
    fn test_sparse_pedigree_uses_defaults() {
        let pedigree: Pedigree = from_json(r#"{"generations": 2, "lineage": "Old Line"}"#).unwrap();
        assert_eq!(pedigree.generations, 2);
        assert_eq!(pedigree.lineage, "Old Line");
        assert!(pedigree.sire.is_none());
        assert_eq!(pedigree.inbreeding_coefficient, 0.0);
    }

    #[test]
    fn test_file_errors_name_the_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("horse.json");
        let err = read_json_file::<Pedigree>(&missing).unwrap_err();
        assert!(matches!(err, IoError::NotFound(_)));

        std::fs::write(&missing, "[1, 2").unwrap();
        let err = read_json_file::<Pedigree>(&missing).unwrap_err();
        assert!(err.to_string().contains("horse.json"));
        assert!(matches!(err.root(), IoError::Json(_)));
    }
}
