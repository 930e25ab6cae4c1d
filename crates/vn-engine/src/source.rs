//! Where story files come from.
//!
//! The engine only ever asks for text at a relative path. [`DirSource`] reads
//! from a directory on disk; [`MemorySource`] serves a fixed set of files and
//! counts fetches, which is handy for embedding and tests.

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors raised while fetching a story resource.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Nothing exists at the path.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The resource exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// A provider of story resources addressed by relative path.
pub trait StorySource {
    /// Fetch the text at `path`.
    fn fetch(&self, path: &str) -> impl Future<Output = SourceResult<String>> + Send;

    /// Returns true if something exists at `path`.
    fn exists(&self, path: &str) -> impl Future<Output = bool> + Send;
}

/// Reads story resources from a directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Serve files relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory files are served from.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl StorySource for DirSource {
    async fn fetch(&self, path: &str) -> SourceResult<String> {
        match tokio::fs::read_to_string(self.root.join(path)).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(path.to_string()))
            }
            Err(e) => Err(SourceError::Io {
                path: path.to_string(),
                source: e,
            }),
        }
    }

    async fn exists(&self, path: &str) -> bool {
        tokio::fs::try_exists(self.root.join(path))
            .await
            .unwrap_or(false)
    }
}

/// Serves story resources from memory.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
    fetches: AtomicUsize,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    /// Number of successful and failed fetches so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl StorySource for MemorySource {
    async fn fetch(&self, path: &str) -> SourceResult<String> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(path.to_string()))
    }

    async fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn memory_source_serves_and_counts() {
        let source = MemorySource::new().with_file("stories/index.json", "[]");

        assert_eq!(source.fetch("stories/index.json").await.unwrap(), "[]");
        assert!(matches!(
            source.fetch("missing.json").await,
            Err(SourceError::NotFound(p)) if p == "missing.json"
        ));
        assert_eq!(source.fetch_count(), 2);

        assert!(source.exists("stories/index.json").await);
        assert!(!source.exists("missing.json").await);
    }

    #[tokio::test]
    async fn dir_source_reads_relative_paths() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("stories")).unwrap();
        std::fs::write(dir.path().join("stories/index.json"), r#"["a"]"#).unwrap();

        let source = DirSource::new(dir.path());
        assert_eq!(source.fetch("stories/index.json").await.unwrap(), r#"["a"]"#);
        assert!(source.exists("stories/index.json").await);
        assert!(!source.exists("stories/nope.json").await);
        assert!(matches!(
            source.fetch("stories/nope.json").await,
            Err(SourceError::NotFound(_))
        ));
    }
}
