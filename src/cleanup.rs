//! Cleanup of intermediate files
//!
//! Every stage registers the files it is about to create with a
//! [`TempFiles`] tracker owned by the orchestrator. Cleanup runs
//! unconditionally at the end of the pipeline — success or failure — and
//! deletes whatever was registered. Deleting a file that was never created
//! (because an earlier stage failed first) is not an error.

use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, warn};

/// Accumulating list of intermediate files to delete when the pipeline ends
///
/// Paths are registered incrementally as the pipeline progresses, before
/// the file is created, so a run that fails midway still cleans up its
/// partial output. Deletion is best-effort: a missing file is silently
/// ignored and any other deletion error is logged but never escalated.
#[derive(Debug, Default)]
pub struct TempFiles {
    files: Vec<PathBuf>,
}

impl TempFiles {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a path for deletion at cleanup time
    pub fn register(&mut self, path: impl Into<PathBuf>) {
        self.files.push(path.into());
    }

    /// Number of registered paths
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing has been registered yet
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Registered paths, in registration order
    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }

    /// Delete every registered file, best-effort.
    ///
    /// Missing files are ignored; other errors are logged at warn level.
    /// The tracker is left empty afterwards, so calling this twice is safe.
    pub async fn remove_all(&mut self) {
        if self.files.is_empty() {
            debug!("no intermediate files to clean up");
            return;
        }

        let mut deleted = 0;
        for file in self.files.drain(..) {
            match fs::remove_file(&file).await {
                Ok(()) => {
                    debug!(?file, "deleted intermediate file");
                    deleted += 1;
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    // Stage failed before creating this file; nothing to do
                    debug!(?file, "intermediate file was never created");
                }
                Err(e) => {
                    warn!(?file, error = %e, "failed to delete intermediate file");
                }
            }
        }

        info!(deleted, "cleanup complete");
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn removes_every_registered_file() {
        let dir = TempDir::new().unwrap();
        let mut temp = TempFiles::new();

        for i in 0..3 {
            let path = dir.path().join(format!("seg_{i:05}.ts"));
            std::fs::write(&path, b"data").unwrap();
            temp.register(path);
        }

        temp.remove_all().await;

        assert!(temp.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn missing_files_are_silently_ignored() {
        let dir = TempDir::new().unwrap();
        let mut temp = TempFiles::new();

        // Registered but never created
        temp.register(dir.path().join("never_written.ts"));
        // Registered and created
        let real = dir.path().join("real.ts");
        std::fs::write(&real, b"data").unwrap();
        temp.register(real.clone());

        temp.remove_all().await;

        assert!(!real.exists());
        assert!(temp.is_empty());
    }

    #[tokio::test]
    async fn remove_all_twice_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let mut temp = TempFiles::new();
        let path = dir.path().join("once.ts");
        std::fs::write(&path, b"data").unwrap();
        temp.register(path);

        temp.remove_all().await;
        temp.remove_all().await;

        assert!(temp.is_empty());
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut temp = TempFiles::new();
        temp.register("a.ts");
        temp.register("b.ts");
        temp.register("lista.txt");

        let paths: Vec<_> = temp
            .paths()
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect();
        assert_eq!(paths, vec!["a.ts", "b.ts", "lista.txt"]);
        assert_eq!(temp.len(), 3);
    }
}
