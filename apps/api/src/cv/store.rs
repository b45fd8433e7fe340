//! The data store: one YAML document on disk, read and overwritten wholesale.
//!
//! No locking, no partial updates, no diffing — the behavior of the
//! underlying file write is the only concurrency protection the system
//! needs (single-user, request-per-call).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::models::cv::CvRecord;

#[derive(Debug, Clone)]
pub struct CvStore {
    path: PathBuf,
}

impl CvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CvStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The directory relative photo paths resolve against.
    pub fn base_dir(&self) -> PathBuf {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Reads the whole document as text.
    pub async fn load_raw(&self) -> Result<String, AppError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::NotFound(format!(
                "Data file {} does not exist",
                self.path.display()
            ))),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Overwrites the whole document. Callers validate the text first —
    /// nothing malformed must ever reach the disk through this path.
    pub async fn save_raw(&self, text: &str) -> Result<(), AppError> {
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}

/// Parses document text into a validated [`CvRecord`].
///
/// This is the validation boundary of the system: a failure here is the
/// "malformed input" error kind, reported with the parser's message, and
/// nothing downstream (store, renderer) ever sees the malformed data.
pub fn parse_record(text: &str) -> Result<CvRecord, AppError> {
    serde_yaml::from_str(text).map_err(|e| AppError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "header: { name: Jane, role: Engineer }\n";

    fn store_in(dir: &std::path::Path) -> CvStore {
        CvStore::new(dir.join("cv_data.yaml"))
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        store.save_raw(VALID).await.unwrap();
        let text = store.load_raw().await.unwrap();
        assert_eq!(text, VALID);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let err = store.load_raw().await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_save_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        store.save_raw("first: document\n").await.unwrap();
        store.save_raw(VALID).await.unwrap();
        let text = store.load_raw().await.unwrap();
        assert_eq!(text, VALID, "no partial updates, full overwrite");
    }

    #[test]
    fn test_parse_record_valid() {
        let record = parse_record(VALID).unwrap();
        assert_eq!(record.header.name, "Jane");
    }

    #[test]
    fn test_parse_record_malformed_yaml_is_validation_error() {
        let err = parse_record("header: [unclosed").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn test_parse_record_wrong_shape_is_validation_error() {
        // Syntactically valid YAML, structurally not a CvRecord.
        let err = parse_record("- just\n- a\n- list\n").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn test_base_dir_of_relative_file() {
        let store = CvStore::new("cv_data.yaml");
        assert_eq!(store.base_dir(), PathBuf::from("."));

        let store = CvStore::new("some/dir/cv_data.yaml");
        assert_eq!(store.base_dir(), PathBuf::from("some/dir"));
    }
}
