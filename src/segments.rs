//! Segment downloading
//!
//! Downloads every segment URL in playback order, strictly one at a time,
//! writing each response body verbatim to a zero-padded, sequentially
//! numbered file in the working directory. Each path is registered with
//! the cleanup tracker before its request goes out, so a failed run still
//! removes whatever it managed to download.

use crate::cleanup::TempFiles;
use crate::config::OutputConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::Event;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Download all segments sequentially into the working directory.
///
/// Returns the segment file paths in playback order. The zero-padded
/// naming (`seg_00000.ts`, `seg_00001.ts`, …) guarantees that lexical
/// sort order matches playback order.
///
/// # Errors
///
/// Aborts on the first failed request or write; already-downloaded
/// segments stay registered in `temp` for cleanup.
pub async fn download_segments(
    client: &HttpClient,
    urls: &[String],
    output: &OutputConfig,
    temp: &mut TempFiles,
    event_tx: &broadcast::Sender<Event>,
) -> Result<Vec<PathBuf>> {
    info!(count = urls.len(), "downloading segments");

    let mut segment_files = Vec::with_capacity(urls.len());

    for (index, url) in urls.iter().enumerate() {
        let path = output.work_dir.join(output.segment_name(index));

        // Register before the request so partial progress is cleaned up
        temp.register(path.clone());

        let body = client.get_bytes(url).await?;
        fs::write(&path, &body).await?;

        debug!(
            segment = index + 1,
            total = urls.len(),
            bytes = body.len(),
            ?path,
            "segment downloaded"
        );
        event_tx
            .send(Event::SegmentDownloaded {
                index: index + 1,
                total: urls.len(),
            })
            .ok();

        segment_files.push(path);
    }

    info!(count = segment_files.len(), "all segments downloaded");
    Ok(segment_files)
}
