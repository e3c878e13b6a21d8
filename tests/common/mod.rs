// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides a recording fake client and scratch directories seeded with files

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;
use tokio::fs;

use sweeper::backend::error::Result;
use sweeper::backend::{BackendError, ObjectClient};

/// Fake client that records calls and tracks how many deletes overlap
pub struct RecordingClient {
    objects: Vec<String>,
    failing: HashSet<String>,
    delay: Duration,
    running: AtomicUsize,
    peak: AtomicUsize,
    deletes: Mutex<Vec<String>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            failing: HashSet::new(),
            delay: Duration::ZERO,
            running: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            deletes: Mutex::new(Vec::new()),
        }
    }

    pub fn with_objects(mut self, objects: &[&str]) -> Self {
        self.objects = objects.iter().map(|o| o.to_string()).collect();
        self
    }

    pub fn failing_on(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectClient for RecordingClient {
    async fn list_objects(&self, _root: &str) -> Result<Vec<String>> {
        Ok(self.objects.clone())
    }

    async fn delete_object(&self, path: &str) -> Result<()> {
        let current = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);
        self.deletes.lock().unwrap().push(path.to_string());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.running.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(path) {
            return Err(BackendError::NotFound {
                path: path.to_string(),
            });
        }
        Ok(())
    }

    async fn read_object(&self, path: &str) -> Result<Bytes> {
        Ok(Bytes::from(path.to_string()))
    }

    async fn write_object(&self, _path: &str, _data: Bytes) -> Result<()> {
        Ok(())
    }
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn dir(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// Create `relative` files under `dir`, each holding its own name
    pub async fn seed(&self, dir: &str, relative: &[&str]) -> PathBuf {
        let root = self.dir(dir);
        for file in relative {
            let path = root.join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .await
                    .expect("Failed to create directory");
            }
            fs::write(&path, file.as_bytes())
                .await
                .expect("Failed to write file");
        }
        root
    }

    pub fn reference(&self, dir: &str) -> String {
        format!("file://{}", self.dir(dir).display())
    }
}

/// Every regular file under `root`, relative to it and sorted
pub fn files_under(root: &Path) -> Vec<String> {
    let mut found = Vec::new();
    collect(root, root, &mut found);
    found.sort();
    found
}

fn collect(root: &Path, dir: &Path, found: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(root, &path, found);
        } else if let Ok(relative) = path.strip_prefix(root) {
            found.push(relative.to_string_lossy().into_owned());
        }
    }
}
