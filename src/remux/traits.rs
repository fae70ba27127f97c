//! Trait for media remuxing operations

use async_trait::async_trait;
use std::path::Path;

/// Trait for the two remuxing operations the pipeline needs
///
/// This trait defines the interface for joining segment files into a
/// single container and deriving an audio-only file from it.
/// Implementations can shell out to an external binary or provide scripted
/// behavior for testing.
///
/// Both operations are fire-and-wait: the call returns only after the
/// underlying work has finished, and a failure is reported as an error
/// rather than a panic.
#[async_trait]
pub trait Remuxer: Send + Sync {
    /// Losslessly join the segment files named by a concat file-list into
    /// one container file (stream copy, no re-encoding).
    ///
    /// # Arguments
    ///
    /// * `file_list` - Path to the file-list manifest (one `file '<name>'`
    ///   line per segment, relative names resolved against the list's
    ///   directory)
    /// * `output` - Path of the joined container to produce
    ///
    /// # Errors
    ///
    /// Returns an error if the tool exits non-zero or cannot be executed.
    async fn concat(&self, file_list: &Path, output: &Path) -> crate::Result<()>;

    /// Strip the video stream and produce an audio-only file at the
    /// highest variable-bitrate quality.
    ///
    /// # Arguments
    ///
    /// * `input` - Path of the joined container
    /// * `output` - Path of the audio file to produce
    ///
    /// # Errors
    ///
    /// Returns an error if the tool exits non-zero or cannot be executed.
    async fn extract_audio(&self, input: &Path, output: &Path) -> crate::Result<()>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
