//! Core types and events for segrip

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Pipeline stage
///
/// Stages run strictly forward; any failure aborts the run at the stage
/// where it happened and jumps straight to cleanup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Fetching the manifest text
    FetchManifest,
    /// Extracting segment URLs from the manifest
    ParseManifest,
    /// Downloading segment files
    DownloadSegments,
    /// Writing the concat file-list
    WriteFileList,
    /// Joining segments into one container
    Concatenate,
    /// Deriving the audio-only file
    ExtractAudio,
}

/// Event emitted during a pipeline run
///
/// Consumers subscribe through [`Pipeline::subscribe`](crate::Pipeline::subscribe)
/// to observe progress, e.g. for console output. Events are best-effort:
/// the pipeline never blocks on (or fails because of) a missing subscriber.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The manifest request is about to be issued
    FetchingManifest {
        /// Manifest URL being fetched
        url: String,
    },

    /// The manifest was parsed into a non-empty segment list
    ManifestParsed {
        /// Number of segment URLs found
        segment_count: usize,
    },

    /// One segment finished downloading
    SegmentDownloaded {
        /// 1-based index of the finished segment
        index: usize,
        /// Total number of segments
        total: usize,
    },

    /// The concat file-list was written
    FileListWritten {
        /// Path of the file-list manifest
        path: PathBuf,
    },

    /// Segments are being joined into the container
    Concatenating,

    /// Audio is being extracted from the container
    ExtractingAudio,

    /// Intermediate files are being removed
    CleaningUp {
        /// Number of registered intermediate files
        file_count: usize,
    },

    /// The run finished; only the audio file remains
    Complete {
        /// Path of the final audio file
        path: PathBuf,
    },

    /// The run failed at a stage (cleanup still ran)
    Failed {
        /// Stage where the failure occurred
        stage: Stage,
        /// Human-readable error message
        error: String,
    },
}
