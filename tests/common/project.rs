//! Isolated project directory builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use publisher::Publisher;

use super::fakes::{FakeBuild, FakeConnector, MarkingTransformer, RecordingSink};

/// Temporary project root holding a `.publisher` manifest and output files
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn with_manifest(manifest: &str) -> Self {
        let project = Self::new();
        project.write(".publisher", manifest);
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }
}

/// Fakes wired into a `Publisher`, kept around for assertions
pub struct Harness {
    pub build: FakeBuild,
    pub transformer: MarkingTransformer,
    pub connector: FakeConnector,
    pub events: RecordingSink,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(FakeBuild::succeeding(), FakeConnector::new())
    }

    pub fn with(build: FakeBuild, connector: FakeConnector) -> Self {
        Self {
            build,
            transformer: MarkingTransformer::new(),
            connector,
            events: RecordingSink::new(),
        }
    }

    pub fn publisher(&self) -> Publisher {
        Publisher::new(
            Arc::new(self.build.clone()),
            Arc::new(self.transformer.clone()),
            Arc::new(self.connector.clone()),
        )
        .with_events(Arc::new(self.events.clone()))
    }
}
