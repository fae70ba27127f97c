//! Pipeline orchestration
//!
//! Ties the stages together: fetch manifest → parse → download segments →
//! write file-list → concatenate → extract audio, with cleanup running
//! unconditionally at the end. Control flow is strictly sequential; each
//! stage's output feeds the next, and the first failure short-circuits
//! straight to cleanup.

use crate::cleanup::TempFiles;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::manifest::collect_section_urls;
use crate::remux::{CliRemuxer, Remuxer, write_concat_list};
use crate::segments::download_segments;
use crate::types::{Event, Stage};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info};

/// Capacity of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// The ripping pipeline
///
/// Owns the immutable configuration, the HTTP client built from it, and
/// the remuxer. One `run` per manifest URL; nothing persists between runs
/// except the configuration itself.
///
/// # Examples
///
/// ```no_run
/// use segrip::{Config, Pipeline};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pipeline = Pipeline::new(Config::default())?;
///     let audio = pipeline.run("https://example.com/manifest?token=abc").await?;
///     println!("wrote {}", audio.display());
///     Ok(())
/// }
/// ```
pub struct Pipeline {
    config: Config,
    client: HttpClient,
    remuxer: Arc<dyn Remuxer>,
    event_tx: broadcast::Sender<Event>,
}

impl Pipeline {
    /// Create a pipeline with the production remuxer (external ffmpeg).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolMissing`] when ffmpeg cannot be resolved, so a
    /// missing tool surfaces before any network activity, and
    /// [`Error::Config`] for unusable header values.
    pub fn new(config: Config) -> Result<Self> {
        let remuxer = Arc::new(CliRemuxer::from_config(&config.tools)?);
        Self::with_remuxer(config, remuxer)
    }

    /// Create a pipeline with a caller-supplied remuxer implementation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built from
    /// the configured header values.
    pub fn with_remuxer(config: Config, remuxer: Arc<dyn Remuxer>) -> Result<Self> {
        let client = HttpClient::new(&config.http)?;
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            config,
            client,
            remuxer,
            event_tx,
        })
    }

    /// Subscribe to pipeline events.
    ///
    /// Events are emitted best-effort during [`run`](Self::run); a slow or
    /// absent subscriber never blocks or fails the pipeline.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Run the whole pipeline for one manifest URL.
    ///
    /// On success returns the path of the final audio file, the only
    /// artifact left behind. On failure returns the stage error. Either
    /// way, every registered intermediate file has been removed by the
    /// time this returns.
    ///
    /// # Errors
    ///
    /// Any stage failure: network errors, an empty manifest, I/O errors,
    /// or external tool failures.
    pub async fn run(&self, manifest_url: &str) -> Result<PathBuf> {
        info!(remuxer = self.remuxer.name(), manifest_url, "starting pipeline");

        let mut temp = TempFiles::new();
        let result = self.run_stages(manifest_url, &mut temp).await;

        // Cleanup runs unconditionally, before the outcome is reported
        self.event_tx
            .send(Event::CleaningUp {
                file_count: temp.len(),
            })
            .ok();
        temp.remove_all().await;

        match result {
            Ok(audio_path) => {
                info!(path = ?audio_path, "pipeline complete");
                self.event_tx
                    .send(Event::Complete {
                        path: audio_path.clone(),
                    })
                    .ok();
                Ok(audio_path)
            }
            Err((stage, e)) => {
                error!(?stage, error = %e, "pipeline failed");
                self.event_tx
                    .send(Event::Failed {
                        stage,
                        error: e.to_string(),
                    })
                    .ok();
                Err(e)
            }
        }
    }

    /// Execute the stages strictly forward; the first failure returns the
    /// stage it happened in together with the error.
    async fn run_stages(
        &self,
        manifest_url: &str,
        temp: &mut TempFiles,
    ) -> std::result::Result<PathBuf, (Stage, Error)> {
        let output = &self.config.output;

        // FetchManifest
        self.event_tx
            .send(Event::FetchingManifest {
                url: manifest_url.to_string(),
            })
            .ok();
        url::Url::parse(manifest_url).map_err(|e| (Stage::FetchManifest, e.into()))?;
        let manifest_body = self
            .client
            .get_text(manifest_url)
            .await
            .map_err(|e| (Stage::FetchManifest, e))?;

        // ParseManifest
        let segment_urls = collect_section_urls(
            &manifest_body,
            &self.config.manifest.section_marker,
            &self.config.manifest.url_scheme_prefix,
        );
        if segment_urls.is_empty() {
            return Err((Stage::ParseManifest, Error::EmptyManifest));
        }
        info!(segment_count = segment_urls.len(), "manifest parsed");
        self.event_tx
            .send(Event::ManifestParsed {
                segment_count: segment_urls.len(),
            })
            .ok();

        // DownloadSegments
        let segment_files =
            download_segments(&self.client, &segment_urls, output, temp, &self.event_tx)
                .await
                .map_err(|e| (Stage::DownloadSegments, e))?;

        // WriteFileList
        let list_path = output.work_dir.join(&output.file_list_name);
        temp.register(list_path.clone());
        write_concat_list(&segment_files, &list_path)
            .await
            .map_err(|e| (Stage::WriteFileList, e))?;
        self.event_tx
            .send(Event::FileListWritten {
                path: list_path.clone(),
            })
            .ok();

        // Concatenate — the container is intermediate too; only the audio
        // file survives the run
        let container_path = output.work_dir.join(&output.container_name);
        temp.register(container_path.clone());
        self.event_tx.send(Event::Concatenating).ok();
        self.remuxer
            .concat(&list_path, &container_path)
            .await
            .map_err(|e| (Stage::Concatenate, e))?;

        // ExtractAudio
        let audio_path = output.work_dir.join(&output.audio_name);
        self.event_tx.send(Event::ExtractingAudio).ok();
        self.remuxer
            .extract_audio(&container_path, &audio_path)
            .await
            .map_err(|e| (Stage::ExtractAudio, e))?;

        Ok(audio_path)
    }
}
