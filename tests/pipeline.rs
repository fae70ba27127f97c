//! End-to-end pipeline tests
//!
//! Run the whole pipeline against a wiremock HTTP server and scripted
//! remuxer implementations, checking the filesystem contract: after any
//! run, no intermediate files remain; after a successful run, exactly the
//! audio file exists.

use async_trait::async_trait;
use segrip::{
    Config, Error, HttpConfig, ManifestConfig, OutputConfig, Pipeline, Remuxer, Stage, ToolsConfig,
};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Remuxer that performs both operations in-process: concat byte-joins the
/// files named in the list, extract copies the container with a marker
/// prefix. Lets the pipeline run end to end without ffmpeg.
struct FakeRemuxer;

#[async_trait]
impl Remuxer for FakeRemuxer {
    async fn concat(&self, file_list: &Path, output: &Path) -> segrip::Result<()> {
        let list_dir = file_list.parent().unwrap_or(Path::new("."));
        let mut joined = Vec::new();
        for line in std::fs::read_to_string(file_list)?.lines() {
            let name = line
                .strip_prefix("file '")
                .and_then(|rest| rest.strip_suffix('\''))
                .ok_or_else(|| Error::ExternalTool(format!("malformed list line: {line}")))?;
            joined.extend(std::fs::read(list_dir.join(name))?);
        }
        std::fs::write(output, joined)?;
        Ok(())
    }

    async fn extract_audio(&self, input: &Path, output: &Path) -> segrip::Result<()> {
        let mut audio = b"AUDIO:".to_vec();
        audio.extend(std::fs::read(input)?);
        std::fs::write(output, audio)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Remuxer whose concat always fails; records whether extract was invoked.
struct FailingConcatRemuxer {
    extract_invoked: Arc<AtomicBool>,
}

#[async_trait]
impl Remuxer for FailingConcatRemuxer {
    async fn concat(&self, _file_list: &Path, _output: &Path) -> segrip::Result<()> {
        Err(Error::ExternalTool("simulated concat failure".to_string()))
    }

    async fn extract_audio(&self, _input: &Path, _output: &Path) -> segrip::Result<()> {
        self.extract_invoked.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "failing-concat"
    }
}

fn config_for(dir: &TempDir) -> Config {
    // Test headers so the mocks can assert them; the mock server speaks
    // plain http, so the URL scheme prefix is relaxed accordingly
    Config {
        http: HttpConfig {
            referer: "https://origin.example/".to_string(),
            user_agent: "segrip-test/1.0".to_string(),
            timeout_secs: 5,
        },
        manifest: ManifestConfig {
            url_scheme_prefix: "http://".to_string(),
            ..ManifestConfig::default()
        },
        tools: ToolsConfig::default(),
        output: OutputConfig {
            work_dir: dir.path().to_path_buf(),
            ..OutputConfig::default()
        },
    }
}

async fn mount_manifest(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/manifest"))
        .and(header("Referer", "https://origin.example/"))
        .and(header("User-Agent", "segrip-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

async fn mount_segments(server: &MockServer, bodies: &[&[u8]]) -> String {
    let mut manifest = String::from("session metadata\nfiles:\n");
    for (i, body) in bodies.iter().enumerate() {
        Mock::given(method("GET"))
            .and(path(format!("/seg/{i}.ts")))
            .and(header("Referer", "https://origin.example/"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
            .mount(server)
            .await;
        manifest.push_str(&format!("{}/seg/{i}.ts\n", server.uri()));
    }
    manifest
}

fn remaining_files(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn successful_run_leaves_exactly_the_audio_file() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let manifest = mount_segments(&server, &[b"one", b"two", b"three"]).await;
    mount_manifest(&server, &manifest).await;

    let pipeline = Pipeline::with_remuxer(config_for(&dir), Arc::new(FakeRemuxer)).unwrap();
    let audio = pipeline
        .run(&format!("{}/manifest", server.uri()))
        .await
        .unwrap();

    // Only the audio file survives
    assert_eq!(remaining_files(&dir), vec!["audio_final.mp3".to_string()]);
    assert_eq!(audio, dir.path().join("audio_final.mp3"));

    // Segments were joined in playback order and then "extracted"
    assert_eq!(std::fs::read(&audio).unwrap(), b"AUDIO:onetwothree");
}

#[tokio::test]
async fn concat_failure_skips_extraction_and_still_cleans_up() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    let manifest = mount_segments(&server, &[b"a", b"b"]).await;
    mount_manifest(&server, &manifest).await;

    let extract_invoked = Arc::new(AtomicBool::new(false));
    let remuxer = Arc::new(FailingConcatRemuxer {
        extract_invoked: extract_invoked.clone(),
    });

    let pipeline = Pipeline::with_remuxer(config_for(&dir), remuxer).unwrap();
    let mut events = pipeline.subscribe();
    let result = pipeline.run(&format!("{}/manifest", server.uri())).await;

    assert!(matches!(result, Err(Error::ExternalTool(_))));
    assert!(
        !extract_invoked.load(Ordering::SeqCst),
        "extraction must never run after a failed concatenation"
    );
    // Everything created up to the failure was removed
    assert!(remaining_files(&dir).is_empty());

    // The failure event names the stage
    let mut failed_stage = None;
    while let Ok(event) = events.try_recv() {
        if let segrip::Event::Failed { stage, .. } = event {
            failed_stage = Some(stage);
        }
    }
    assert_eq!(failed_stage, Some(Stage::Concatenate));
}

#[tokio::test]
async fn manifest_without_marker_aborts_before_any_segment_request() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    // Manifest has URLs but no `files:` marker, so nothing qualifies.
    // No segment mocks are mounted; a stray segment request would 404 and
    // the error kind would differ from the one asserted here.
    mount_manifest(&server, "https://cdn.example/seg/0.ts\nno marker here\n").await;

    let pipeline = Pipeline::with_remuxer(config_for(&dir), Arc::new(FakeRemuxer)).unwrap();
    let result = pipeline.run(&format!("{}/manifest", server.uri())).await;

    assert!(matches!(result, Err(Error::EmptyManifest)));
    assert!(remaining_files(&dir).is_empty());
}

#[tokio::test]
async fn failed_manifest_request_aborts_with_status_error() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/manifest"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let pipeline = Pipeline::with_remuxer(config_for(&dir), Arc::new(FakeRemuxer)).unwrap();
    let result = pipeline.run(&format!("{}/manifest", server.uri())).await;

    assert!(matches!(result, Err(Error::HttpStatus { .. })));
    assert!(remaining_files(&dir).is_empty());
}

#[tokio::test]
async fn failed_segment_download_cleans_up_earlier_segments() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    // First segment succeeds, second is gone
    Mock::given(method("GET"))
        .and(path("/seg/0.ts"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/seg/1.ts"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let manifest = format!(
        "files:\n{uri}/seg/0.ts\n{uri}/seg/1.ts\n",
        uri = server.uri()
    );
    mount_manifest(&server, &manifest).await;

    let pipeline = Pipeline::with_remuxer(config_for(&dir), Arc::new(FakeRemuxer)).unwrap();
    let result = pipeline.run(&format!("{}/manifest", server.uri())).await;

    assert!(matches!(result, Err(Error::HttpStatus { .. })));
    assert!(remaining_files(&dir).is_empty());
}

#[tokio::test]
async fn unparseable_manifest_url_fails_without_network_activity() {
    let dir = TempDir::new().unwrap();

    let pipeline = Pipeline::with_remuxer(config_for(&dir), Arc::new(FakeRemuxer)).unwrap();
    let result = pipeline.run("not a url").await;

    assert!(matches!(result, Err(Error::InvalidUrl(_))));
    assert!(remaining_files(&dir).is_empty());
}
