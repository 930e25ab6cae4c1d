//! Chapter fetching and caching.

use std::collections::HashMap;
use std::sync::Arc;

use vn_core::{Chapter, StoryManifest};

use crate::error::{EngineError, EngineResult};
use crate::layout::StoryLayout;
use crate::source::StorySource;

/// Fetches chapters on first use and keeps them for the rest of the session.
///
/// Cached chapters are shared as `Arc<Chapter>` and never mutated or evicted.
#[derive(Debug, Clone, Default)]
pub struct ChapterLoader {
    cache: HashMap<(String, String), Arc<Chapter>>,
}

impl ChapterLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a chapter of `manifest`'s story, fetching and caching it if needed.
    pub async fn get_chapter<S: StorySource>(
        &mut self,
        source: &S,
        layout: &StoryLayout,
        manifest: &StoryManifest,
        chapter_id: &str,
    ) -> EngineResult<Arc<Chapter>> {
        let key = (manifest.id.clone(), chapter_id.to_string());
        if let Some(chapter) = self.cache.get(&key) {
            log::debug!("chapter cache hit: {}/{chapter_id}", manifest.id);
            return Ok(Arc::clone(chapter));
        }

        let chapter_path =
            manifest
                .chapter_path(chapter_id)
                .ok_or_else(|| EngineError::ChapterNotFound {
                    story: manifest.id.clone(),
                    chapter: chapter_id.to_string(),
                })?;

        let path = layout.chapter(&manifest.id, chapter_path);
        let text = source.fetch(&path).await?;
        let chapter = Chapter::from_json(&text).map_err(|e| EngineError::Parse {
            path: path.clone(),
            source: e,
        })?;

        if chapter.id != chapter_id {
            log::warn!(
                "{path} declares chapter id \"{}\" but is listed as \"{chapter_id}\"",
                chapter.id
            );
        }

        log::debug!("loaded chapter {}/{chapter_id} from {path}", manifest.id);
        let chapter = Arc::new(chapter);
        self.cache.insert(key, Arc::clone(&chapter));
        Ok(chapter)
    }

    /// Returns true if the chapter is already cached.
    pub fn is_cached(&self, story_id: &str, chapter_id: &str) -> bool {
        self.cache
            .contains_key(&(story_id.to_string(), chapter_id.to_string()))
    }

    /// Number of cached chapters.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MemorySource, SourceError};

    fn manifest() -> StoryManifest {
        StoryManifest::from_json(
            r#"{"id": "tale", "metadata": {"title": "Tale"}, "entryChapter": "ch1",
                "chapters": {"ch1": "./ch1.json", "ch2": "./chapters/ch2.json", "lost": "./lost.json"}}"#,
        )
        .unwrap()
    }

    fn source() -> MemorySource {
        MemorySource::new()
            .with_file(
                "stories/tale/ch1.json",
                r#"{"id": "ch1", "metadata": {"chapter": "One"}, "gameData": {}}"#,
            )
            .with_file(
                "stories/tale/chapters/ch2.json",
                r#"{"id": "ch2", "metadata": {"chapter": "Two"}, "gameData": {}}"#,
            )
    }

    #[tokio::test]
    async fn fetches_once_then_serves_from_cache() {
        let source = source();
        let mut loader = ChapterLoader::new();
        let layout = StoryLayout::default();

        let first = loader
            .get_chapter(&source, &layout, &manifest(), "ch1")
            .await
            .unwrap();
        let second = loader
            .get_chapter(&source, &layout, &manifest(), "ch1")
            .await
            .unwrap();

        assert_eq!(source.fetch_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(loader.is_cached("tale", "ch1"));
        assert_eq!(loader.cached(), 1);
    }

    #[tokio::test]
    async fn resolves_nested_chapter_paths() {
        let mut loader = ChapterLoader::new();
        let chapter = loader
            .get_chapter(&source(), &StoryLayout::default(), &manifest(), "ch2")
            .await
            .unwrap();
        assert_eq!(chapter.metadata.title, "Two");
    }

    #[tokio::test]
    async fn unknown_chapter_id() {
        let mut loader = ChapterLoader::new();
        let err = loader
            .get_chapter(&source(), &StoryLayout::default(), &manifest(), "ch9")
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::ChapterNotFound { chapter, .. } if chapter == "ch9"));
    }

    #[tokio::test]
    async fn listed_but_missing_resource() {
        let mut loader = ChapterLoader::new();
        let err = loader
            .get_chapter(&source(), &StoryLayout::default(), &manifest(), "lost")
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Source(SourceError::NotFound(_))));
        assert!(!loader.is_cached("tale", "lost"));
    }

    #[tokio::test]
    async fn malformed_chapter_is_not_cached() {
        let source = MemorySource::new().with_file("stories/tale/ch1.json", "[]");
        let mut loader = ChapterLoader::new();
        let err = loader
            .get_chapter(&source, &StoryLayout::default(), &manifest(), "ch1")
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Parse { .. }));
        assert_eq!(loader.cached(), 0);
    }
}
