//! Media remuxing via an external tool
//!
//! This module provides a trait-based architecture for the two remuxing
//! operations the pipeline needs: joining ordered segment files into one
//! container (lossless stream copy) and deriving an audio-only file from
//! that container.
//!
//! ## Architecture
//!
//! The core abstraction is the [`Remuxer`] trait. The production
//! implementation is [`CliRemuxer`], which drives the external `ffmpeg`
//! binary; tests substitute scripted implementations to exercise the
//! pipeline without the real tool.
//!
//! ## Usage
//!
//! ```no_run
//! use segrip::remux::{CliRemuxer, Remuxer};
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let remuxer = CliRemuxer::from_path().expect("ffmpeg binary not found");
//!
//!     remuxer
//!         .concat(Path::new("lista.txt"), Path::new("video_completo.mp4"))
//!         .await?;
//!     remuxer
//!         .extract_audio(Path::new("video_completo.mp4"), Path::new("audio_final.mp3"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod cli;
mod list;
mod traits;

pub use cli::CliRemuxer;
pub use list::write_concat_list;
pub use traits::Remuxer;
