//! CLI-based remuxer using the external ffmpeg binary

use super::traits::Remuxer;
use crate::config::ToolsConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Name of the external binary this remuxer drives
const FFMPEG: &str = "ffmpeg";

/// CLI-based remuxer using the external ffmpeg binary
///
/// Runs `ffmpeg` as a child process and waits for it to terminate. Stdout
/// of successful runs is discarded; stderr is captured and surfaced in the
/// error when the tool exits non-zero. A missing binary is reported as
/// [`Error::ToolMissing`] with install guidance.
///
/// # Examples
///
/// ```no_run
/// use segrip::remux::{CliRemuxer, Remuxer};
/// use std::path::Path;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Auto-discover ffmpeg from PATH
/// let remuxer = CliRemuxer::from_path().expect("ffmpeg not found in PATH");
///
/// remuxer
///     .concat(Path::new("lista.txt"), Path::new("video_completo.mp4"))
///     .await?;
/// remuxer
///     .extract_audio(Path::new("video_completo.mp4"), Path::new("audio_final.mp3"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CliRemuxer {
    binary_path: PathBuf,
}

impl CliRemuxer {
    /// Create a remuxer with an explicit binary path
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find ffmpeg in PATH
    ///
    /// Uses the `which` crate to search the system PATH.
    ///
    /// # Returns
    ///
    /// `Some(CliRemuxer)` if the binary is found, `None` otherwise.
    pub fn from_path() -> Option<Self> {
        which::which(FFMPEG).ok().map(Self::new)
    }

    /// Resolve the binary according to the tools configuration.
    ///
    /// An explicitly configured path wins; otherwise the PATH is searched
    /// when `search_path` is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolMissing`] when no binary can be resolved, so
    /// the failure surfaces before any network activity starts.
    pub fn from_config(tools: &ToolsConfig) -> Result<Self> {
        if let Some(path) = &tools.ffmpeg_path {
            return Ok(Self::new(path.clone()));
        }
        if tools.search_path
            && let Some(remuxer) = Self::from_path()
        {
            return Ok(remuxer);
        }
        Err(Error::ToolMissing {
            tool: FFMPEG.to_string(),
        })
    }

    /// Run the binary with the given arguments and wait for it to exit.
    ///
    /// Stdout is discarded; stderr is captured for error reporting.
    async fn run(&self, args: Vec<OsString>) -> Result<()> {
        debug!(binary = ?self.binary_path, ?args, "invoking ffmpeg");

        let output = Command::new(&self.binary_path)
            .args(&args)
            .stdout(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::ToolMissing {
                        tool: FFMPEG.to_string(),
                    }
                } else {
                    Error::ExternalTool(format!("failed to execute {FFMPEG}: {e}"))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ExternalTool(format!(
                "{FFMPEG} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Remuxer for CliRemuxer {
    async fn concat(&self, file_list: &Path, output: &Path) -> Result<()> {
        // concat demuxer, unrestricted file paths, stream copy (no re-encoding)
        let args = vec![
            OsString::from("-f"),
            OsString::from("concat"),
            OsString::from("-safe"),
            OsString::from("0"),
            OsString::from("-i"),
            file_list.into(),
            OsString::from("-c"),
            OsString::from("copy"),
            output.into(),
        ];
        self.run(args).await
    }

    async fn extract_audio(&self, input: &Path, output: &Path) -> Result<()> {
        // -vn drops the video stream, -q:a 0 selects highest VBR audio quality
        let args = vec![
            OsString::from("-i"),
            input.into(),
            OsString::from("-vn"),
            OsString::from("-q:a"),
            OsString::from("0"),
            output.into(),
        ];
        self.run(args).await
    }

    fn name(&self) -> &'static str {
        "cli-ffmpeg"
    }
}
