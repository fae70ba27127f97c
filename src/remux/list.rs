//! Concat file-list writer
//!
//! The concat demuxer reads its inputs from a text file with one
//! `file '<name>'` line per segment. Relative names are resolved against
//! the directory containing the list, so the list is written next to the
//! segments and references them by bare filename.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Write the concat file-list for the given segment files.
///
/// Each line has the exact literal form `file '<filename>'`, newline
/// terminated, in the same order as `segments`. Filenames are taken as the
/// final path component and written without escaping; the generated
/// segment names contain no characters that would need it.
///
/// # Errors
///
/// Returns an error if the list file cannot be written.
pub async fn write_concat_list(segments: &[PathBuf], list_path: &Path) -> Result<()> {
    let mut contents = String::new();
    for segment in segments {
        let name = segment
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| segment.to_string_lossy());
        contents.push_str(&format!("file '{name}'\n"));
    }

    fs::write(list_path, contents).await?;
    debug!(?list_path, entries = segments.len(), "wrote concat file-list");
    Ok(())
}
