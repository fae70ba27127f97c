//! Configuration types for segrip

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// HTTP request configuration (fixed headers and timeout)
///
/// The origin server rejects requests that do not carry the expected
/// `Referer` and `User-Agent`, so both are sent with every request. Used
/// as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Referer header value sent with every request
    #[serde(default = "default_referer")]
    pub referer: String,

    /// User-Agent header value sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpConfig {
    /// Per-request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            referer: default_referer(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Manifest parsing configuration (section marker and URL scheme)
///
/// Used as a nested sub-config within [`Config`]. The defaults match the
/// production manifest dialect; tests point the scheme prefix at plain
/// `http://` servers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Literal marker that opens the segment-URL section (default: "files:")
    #[serde(default = "default_section_marker")]
    pub section_marker: String,

    /// Scheme prefix a trimmed line must start with to count as a segment
    /// URL (default: "https://")
    #[serde(default = "default_url_scheme_prefix")]
    pub url_scheme_prefix: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            section_marker: default_section_marker(),
            url_scheme_prefix: default_url_scheme_prefix(),
        }
    }
}

/// External tool configuration (ffmpeg path discovery)
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to ffmpeg executable (auto-detected if None)
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Whether to search PATH for ffmpeg if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            search_path: true,
        }
    }
}

/// Output artifact configuration (working directory and filenames)
///
/// Segment files are named `<segment_prefix><index><segment_extension>`
/// with the index zero-padded to [`segment_index_width`](Self::segment_index_width)
/// digits, so lexical sort order matches playback order. Used as a nested
/// sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Working directory for all artifacts (default: ".")
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// Filename prefix for downloaded segments (default: "seg_")
    #[serde(default = "default_segment_prefix")]
    pub segment_prefix: String,

    /// Filename extension for downloaded segments (default: "ts")
    #[serde(default = "default_segment_extension")]
    pub segment_extension: String,

    /// Zero-padding width for the segment index (default: 5)
    #[serde(default = "default_segment_index_width")]
    pub segment_index_width: usize,

    /// Filename of the concat file-list handed to ffmpeg (default: "lista.txt")
    #[serde(default = "default_file_list_name")]
    pub file_list_name: String,

    /// Filename of the intermediate joined container (default: "video_completo.mp4")
    #[serde(default = "default_container_name")]
    pub container_name: String,

    /// Filename of the final audio file, the only retained artifact
    /// (default: "audio_final.mp3")
    #[serde(default = "default_audio_name")]
    pub audio_name: String,
}

impl OutputConfig {
    /// Build the filename for the segment at `index`
    pub fn segment_name(&self, index: usize) -> String {
        format!(
            "{}{:0width$}.{}",
            self.segment_prefix,
            index,
            self.segment_extension,
            width = self.segment_index_width
        )
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            segment_prefix: default_segment_prefix(),
            segment_extension: default_segment_extension(),
            segment_index_width: default_segment_index_width(),
            file_list_name: default_file_list_name(),
            container_name: default_container_name(),
            audio_name: default_audio_name(),
        }
    }
}

/// Main configuration for the ripping pipeline
///
/// Fields are organized into logical sub-configs:
/// - [`http`](HttpConfig) — fixed request headers and timeout
/// - [`tools`](ToolsConfig) — ffmpeg path discovery
/// - [`output`](OutputConfig) — working directory and artifact filenames
///
/// All sub-config fields are flattened for serialization, so the JSON/TOML
/// format stays flat (no nesting). The config is an immutable value: it is
/// handed to the HTTP client and the pipeline at construction and never
/// mutated afterwards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP request settings (headers, timeout)
    #[serde(flatten)]
    pub http: HttpConfig,

    /// Manifest parsing settings (marker, URL scheme)
    #[serde(flatten)]
    pub manifest: ManifestConfig,

    /// External tool settings (ffmpeg)
    #[serde(flatten)]
    pub tools: ToolsConfig,

    /// Output artifact settings (working directory, filenames)
    #[serde(flatten)]
    pub output: OutputConfig,
}

fn default_referer() -> String {
    "https://sesiones.senado.cl/".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/100.0.0.0 Safari/537.36"
        .to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_section_marker() -> String {
    "files:".to_string()
}

fn default_url_scheme_prefix() -> String {
    "https://".to_string()
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_segment_prefix() -> String {
    "seg_".to_string()
}

fn default_segment_extension() -> String {
    "ts".to_string()
}

fn default_segment_index_width() -> usize {
    5
}

fn default_file_list_name() -> String {
    "lista.txt".to_string()
}

fn default_container_name() -> String {
    "video_completo.mp4".to_string()
}

fn default_audio_name() -> String {
    "audio_final.mp3".to_string()
}
