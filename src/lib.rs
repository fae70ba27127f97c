//! # segrip
//!
//! Sequential segmented-stream ripper: fetch a manifest, download the
//! media segments it lists, remux them into one container with an external
//! `ffmpeg` binary, and keep only the derived audio file.
//!
//! ## Design Philosophy
//!
//! segrip is designed to be:
//! - **Strictly sequential** - One linear pipeline, no concurrency, no
//!   retries, no persistent state between runs
//! - **Best-effort about cleanup** - Every intermediate file is removed
//!   when a run ends, whether it succeeded or failed
//! - **Library-first** - The binary is a thin wrapper; the pipeline is a
//!   plain Rust API with an event stream for progress reporting
//!
//! ## Quick Start
//!
//! ```no_run
//! use segrip::{Config, Event, Pipeline};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = Pipeline::new(Config::default())?;
//!
//!     // Subscribe to events for progress output
//!     let mut events = pipeline.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             if let Event::SegmentDownloaded { index, total } = event {
//!                 println!("segment {index}/{total}");
//!             }
//!         }
//!     });
//!
//!     let audio = pipeline.run("https://example.com/manifest?token=abc").await?;
//!     println!("wrote {}", audio.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Cleanup of intermediate files
pub mod cleanup;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// HTTP layer (manifest and segment fetching)
pub mod http;
/// Manifest parsing
pub mod manifest;
/// Pipeline orchestration
pub mod pipeline;
/// Media remuxing via an external tool
pub mod remux;
/// Segment downloading
pub mod segments;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use cleanup::TempFiles;
pub use config::{Config, HttpConfig, ManifestConfig, OutputConfig, ToolsConfig};
pub use error::{Error, Result};
pub use http::HttpClient;
pub use manifest::{collect_section_urls, parse_segment_urls};
pub use pipeline::Pipeline;
pub use remux::{CliRemuxer, Remuxer, write_concat_list};
pub use segments::download_segments;
pub use types::{Event, Stage};
