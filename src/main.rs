//! Command-line entry point
//!
//! One positional argument: the manifest URL (quoted by the caller when it
//! carries query parameters). Every pipeline failure is caught here and
//! printed as a human-readable message; the process always exits normally
//! after cleanup has run.

use segrip::{Config, Event, Pipeline};
use std::io::Write;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let Some(manifest_url) = std::env::args().nth(1) else {
        print_usage();
        return;
    };

    let pipeline = match Pipeline::new(Config::default()) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            // Typically a missing ffmpeg; reported before any network activity
            println!("Error: {e}");
            return;
        }
    };

    let mut events = pipeline.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            print_event(&event);
        }
    });

    let result = pipeline.run(&manifest_url).await;

    // Dropping the pipeline closes the event channel and ends the printer
    drop(pipeline);
    printer.await.ok();

    match result {
        Ok(path) => println!("Done. '{}' written successfully.", path.display()),
        Err(e) => {
            println!("Error: {e}");
            println!("Check your connection or the URL (it may have expired).");
        }
    }
}

fn print_event(event: &Event) {
    match event {
        Event::FetchingManifest { url } => {
            let preview: String = url.chars().take(50).collect();
            println!("[1/5] Fetching manifest... ({preview}...)");
        }
        Event::ManifestParsed { segment_count } => {
            println!("Manifest parsed: {segment_count} segments found.");
            println!("[2/5] Downloading {segment_count} segments...");
        }
        Event::SegmentDownloaded { index, total } => {
            print!("Downloaded segment {index}/{total}\r");
            // Carriage-return progress line; stdout is line-buffered
            std::io::stdout().flush().ok();
        }
        Event::FileListWritten { path } => {
            println!("\n[3/5] Wrote file list '{}'.", path.display());
        }
        Event::Concatenating => {
            println!("[4/5] Joining segments...");
        }
        Event::ExtractingAudio => {
            println!("[5/5] Extracting audio...");
        }
        Event::CleaningUp { file_count } => {
            println!("Cleaning up {file_count} temporary files...");
        }
        // Final outcome is printed from the run result
        Event::Complete { .. } | Event::Failed { .. } => {}
    }
}

fn print_usage() {
    println!("Error: pass the full manifest URL as the only argument.");
    println!("Usage: segrip \"<MANIFEST_URL_WITH_PARAMETERS>\"");
    println!("(Remember to quote the URL.)");
}
