//! In-memory collaborators for operation tests.

use crate::ops::Context;
use async_trait::async_trait;
use gdvm_core::io::{Archiver, DownloadError, ExtractError, Transport};
use gdvm_core::{
    ArtifactKind, Asset, CatalogError, Config, Environment, PlatformLocator, Release,
    ReleaseSource, Reporter,
};
use gdvm_schema::{ReleaseTag, Semver, Version};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// A release shipping an engine build for this platform (both flavours)
/// and export templates.
pub(crate) fn engine_release(version: Version) -> Release {
    release_with(version, ReleaseTag::stable())
}

pub(crate) fn release_with(version: Version, tag: ReleaseTag) -> Release {
    let mut assets = Vec::new();
    for mono in [false, true] {
        let semver = Semver::new(version, tag.clone(), mono);
        for kind in [ArtifactKind::Engine, ArtifactKind::Templates] {
            if let Some(name) = kind.asset_names(&semver).into_iter().next() {
                if assets.iter().any(|a: &Asset| a.name == name) {
                    continue;
                }
                assets.push(Asset {
                    download_url: format!("https://downloads.invalid/{name}"),
                    name,
                });
            }
        }
    }
    Release {
        version,
        tag,
        assets,
    }
}

/// Build an in-memory zip holding `files`.
pub(crate) fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in files {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

pub(crate) struct FakeSource {
    releases: Vec<Release>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReleaseSource for FakeSource {
    fn key(&self) -> String {
        "fake".to_string()
    }

    async fn fetch_releases(&self) -> Result<Vec<Release>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.releases.clone())
    }
}

#[derive(Default)]
pub(crate) struct FakeTransport {
    calls: AtomicUsize,
    not_found: AtomicBool,
    payload: Mutex<Vec<u8>>,
}

impl FakeTransport {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_with_not_found(&self) {
        self.not_found.store(true, Ordering::SeqCst);
    }

    pub(crate) fn set_payload(&self, bytes: Vec<u8>) {
        *self.payload.lock().unwrap() = bytes;
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn download(
        &self,
        url: &str,
        dest: &Path,
        _reporter: &dyn Reporter,
    ) -> Result<u64, DownloadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.not_found.load(Ordering::SeqCst) {
            return Err(DownloadError::NotFound {
                url: url.to_string(),
            });
        }
        let payload = self.payload.lock().unwrap().clone();
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, &payload)?;
        Ok(payload.len() as u64)
    }
}

#[derive(Default)]
pub(crate) struct FakeArchiver {
    calls: AtomicUsize,
}

impl FakeArchiver {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Archiver for FakeArchiver {
    fn extract(&self, _archive: &Path, dest: &Path) -> Result<usize, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        fs::create_dir_all(dest)?;
        fs::write(dest.join("extracted"), b"")?;
        Ok(1)
    }
}

/// Reporter that records every message it is given.
#[derive(Default)]
pub(crate) struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub(crate) fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }

    fn push(&self, msg: &str) {
        self.messages.lock().unwrap().push(msg.to_string());
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, msg: &str) {
        self.push(msg);
    }
    fn success(&self, msg: &str) {
        self.push(msg);
    }
    fn warning(&self, msg: &str) {
        self.push(msg);
    }
    fn error(&self, msg: &str) {
        self.push(msg);
    }
    fn downloading(&self, _: &str, _: u64, _: Option<u64>) {}
}

/// A [`Context`] over a temporary home and fake collaborators.
pub(crate) struct Harness {
    pub(crate) ctx: Context,
    pub(crate) source: Arc<FakeSource>,
    pub(crate) transport: Arc<FakeTransport>,
    pub(crate) archiver: Arc<FakeArchiver>,
    pub(crate) reporter: Arc<RecordingReporter>,
    home: TempDir,
}

impl Harness {
    pub(crate) fn new(releases: Vec<Release>) -> Self {
        let home = tempfile::tempdir().unwrap();
        let source = Arc::new(FakeSource {
            releases,
            calls: AtomicUsize::new(0),
        });
        let transport = Arc::new(FakeTransport::default());
        let archiver = Arc::new(FakeArchiver::default());
        let reporter = Arc::new(RecordingReporter::default());

        let ctx = Context {
            config: Config::with_home(home.path()),
            env: Arc::new(Environment::new(source.clone())),
            transport: transport.clone(),
            archiver: archiver.clone(),
            locator: Arc::new(PlatformLocator),
            reporter: reporter.clone(),
        };

        Self {
            ctx,
            source,
            transport,
            archiver,
            reporter,
            home,
        }
    }

    pub(crate) fn home(&self) -> PathBuf {
        self.home.path().to_path_buf()
    }
}
