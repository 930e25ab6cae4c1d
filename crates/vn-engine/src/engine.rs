//! The engine context: one story catalog, chapter cache, and game state.

use std::sync::Arc;

use vn_core::{Chapter, GameState, StateMap, StoryManifest, StorySummary};

use crate::catalog::StoryCatalog;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::layout::StoryLayout;
use crate::loader::ChapterLoader;
use crate::source::StorySource;

/// Everything one playthrough needs, owned in one place.
///
/// An engine is created explicitly and handed to a
/// [`NarrativeController`](crate::NarrativeController); nothing lives in
/// process-wide statics, so several engines can coexist.
#[derive(Debug)]
pub struct StoryEngine<S> {
    pub(crate) source: S,
    pub(crate) layout: StoryLayout,
    pub(crate) config: EngineConfig,
    pub(crate) catalog: StoryCatalog,
    pub(crate) chapters: ChapterLoader,
    pub(crate) state: GameState,
    pub(crate) active_chapter: Option<Arc<Chapter>>,
}

impl<S: StorySource> StoryEngine<S> {
    /// Create an engine reading from `source`.
    pub fn new(source: S, config: EngineConfig) -> Self {
        Self {
            layout: config.layout(),
            source,
            config,
            catalog: StoryCatalog::new(),
            chapters: ChapterLoader::new(),
            state: GameState::new(),
            active_chapter: None,
        }
    }

    /// Load the story catalog. See [`StoryCatalog::initialize`].
    pub async fn initialize(&mut self) -> EngineResult<()> {
        self.catalog
            .initialize(&self.source, &self.layout, &self.config.default_story)
            .await
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the story source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get the story catalog.
    pub fn catalog(&self) -> &StoryCatalog {
        &self.catalog
    }

    /// Get the chapter loader.
    pub fn chapters(&self) -> &ChapterLoader {
        &self.chapters
    }

    /// Id and metadata of every loaded story.
    pub fn all_stories(&self) -> Vec<StorySummary> {
        self.catalog.all_stories()
    }

    /// Id of the active story.
    pub fn active_story_id(&self) -> Option<&str> {
        self.catalog.active_story_id()
    }

    /// Manifest of the active story.
    pub fn active_manifest(&self) -> EngineResult<&StoryManifest> {
        self.catalog.active_manifest()
    }

    /// The active chapter, if one has been loaded.
    pub fn active_chapter(&self) -> Option<&Chapter> {
        self.active_chapter.as_deref()
    }

    /// Switch to another story, load its entry chapter, and reset the game state.
    ///
    /// Nothing changes unless the entry chapter loads.
    pub async fn set_active_story(&mut self, story_id: &str) -> EngineResult<()> {
        if !self.catalog.is_initialized() {
            log::error!("cannot activate story \"{story_id}\" before the catalog is initialized");
            return Err(EngineError::Uninitialized);
        }
        let Some(manifest) = self.catalog.get(story_id) else {
            log::error!("attempted to activate unknown story \"{story_id}\"");
            return Err(EngineError::StoryNotFound(story_id.to_string()));
        };

        let entry = self
            .chapters
            .get_chapter(&self.source, &self.layout, manifest, &manifest.entry_chapter)
            .await?;

        self.catalog.select(story_id)?;
        self.active_chapter = Some(entry);
        self.state.reset();
        Ok(())
    }

    /// Get a chapter of a loaded story, fetching it on first use.
    pub async fn chapter(&mut self, story_id: &str, chapter_id: &str) -> EngineResult<Arc<Chapter>> {
        if !self.catalog.is_initialized() {
            return Err(EngineError::Uninitialized);
        }
        let manifest = self
            .catalog
            .get(story_id)
            .ok_or_else(|| EngineError::StoryNotFound(story_id.to_string()))?;
        self.chapters
            .get_chapter(&self.source, &self.layout, manifest, chapter_id)
            .await
    }

    /// Read-only view of the game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// A copy of the game state.
    pub fn game_state(&self) -> StateMap {
        self.state.snapshot()
    }

    /// Merge `partial` into the game state.
    pub fn update_game_state(&mut self, partial: &StateMap) {
        self.state.update(partial.clone());
    }

    /// Clear the game state.
    pub fn reset_game_state(&mut self) {
        self.state.reset();
    }

    /// Forget the playthrough: clear the game state and the active chapter.
    ///
    /// The catalog and chapter cache are kept.
    pub fn reset(&mut self) {
        self.state.reset();
        self.active_chapter = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{engine, ready_engine};
    use vn_core::{SceneRef, StateValue};

    #[tokio::test]
    async fn set_active_story_loads_entry_chapter_and_resets_state() {
        let mut engine = ready_engine().await;
        engine.update_game_state(&StateMap::from([(
            "rang_bell".to_string(),
            StateValue::Bool(true),
        )]));

        engine.set_active_story("other").await.unwrap();

        assert_eq!(engine.active_story_id(), Some("other"));
        assert_eq!(engine.active_chapter().unwrap().id, "prologue");
        assert!(engine.game_state().is_empty());
    }

    #[tokio::test]
    async fn unknown_story_changes_nothing() {
        let mut engine = ready_engine().await;
        engine.update_game_state(&StateMap::from([("k".to_string(), StateValue::Integer(1))]));

        let err = engine.set_active_story("missing").await.unwrap_err();

        assert!(matches!(err, EngineError::StoryNotFound(_)));
        assert_eq!(engine.active_story_id(), Some("tale"));
        assert_eq!(engine.game_state().len(), 1);
    }

    #[tokio::test]
    async fn uninitialized_engine_rejects_story_access() {
        let mut engine = engine();
        assert!(engine.all_stories().is_empty());
        assert!(matches!(
            engine.set_active_story("tale").await,
            Err(EngineError::Uninitialized)
        ));
        assert!(matches!(
            engine.chapter("tale", "chapter1").await,
            Err(EngineError::Uninitialized)
        ));
        assert!(matches!(
            engine.active_manifest(),
            Err(EngineError::Uninitialized)
        ));
    }

    #[tokio::test]
    async fn local_ref_without_active_chapter() {
        let mut engine = ready_engine().await;
        let err = engine
            .resolve_scene(&SceneRef::local("start"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NoActiveChapter(scene) if scene == "start"));
    }

    #[tokio::test]
    async fn qualified_ref_switches_and_caches_chapter() {
        let mut engine = ready_engine().await;
        engine.set_active_story("tale").await.unwrap();
        assert_eq!(engine.active_chapter().unwrap().id, "chapter1");
        assert!(!engine.chapters().is_cached("tale", "chapter2"));

        let scene = engine
            .resolve_scene(&SceneRef::qualified("chapter2", "intro"))
            .await
            .unwrap();

        assert_eq!(scene.id, "intro");
        assert_eq!(engine.active_chapter().unwrap().id, "chapter2");
        assert!(engine.chapters().is_cached("tale", "chapter2"));

        let fetches = engine.source().fetch_count();
        engine
            .resolve_scene(&SceneRef::qualified("chapter1", "start"))
            .await
            .unwrap();
        engine
            .resolve_scene(&SceneRef::qualified("chapter2", "finale"))
            .await
            .unwrap();
        assert_eq!(engine.source().fetch_count(), fetches);
    }

    #[tokio::test]
    async fn missing_scene_keeps_active_chapter() {
        let mut engine = ready_engine().await;
        engine.set_active_story("tale").await.unwrap();

        let err = engine
            .resolve_scene(&SceneRef::local("nowhere"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::SceneNotFound { ref scene, .. } if scene == "nowhere"));
        assert_eq!(engine.active_chapter().unwrap().id, "chapter1");

        let err = engine
            .resolve_scene(&SceneRef::qualified("chapter2", "nowhere"))
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::SceneNotFound { ref chapter, .. } if chapter == "chapter2"));
        assert_eq!(engine.active_chapter().unwrap().id, "chapter1");
    }

    #[tokio::test]
    async fn resolution_sees_current_state() {
        let mut engine = ready_engine().await;
        engine.set_active_story("tale").await.unwrap();

        let before = engine.resolve_scene(&SceneRef::local("start")).await.unwrap();
        engine.update_game_state(&StateMap::from([(
            "rang_bell".to_string(),
            StateValue::Bool(true),
        )]));
        let after = engine.resolve_scene(&SceneRef::local("start")).await.unwrap();

        assert_eq!(before.dialogue.len() + 1, after.dialogue.len());
        assert!(after.choices.iter().any(|c| c.id == "pray"));
        assert!(!before.choices.iter().any(|c| c.id == "pray"));
    }

    #[tokio::test]
    async fn reset_forgets_playthrough_but_keeps_cache() {
        let mut engine = ready_engine().await;
        engine.set_active_story("tale").await.unwrap();
        engine.update_game_state(&StateMap::from([("k".to_string(), StateValue::Integer(1))]));

        engine.reset();

        assert!(engine.active_chapter().is_none());
        assert!(engine.game_state().is_empty());
        assert!(engine.chapters().is_cached("tale", "chapter1"));
    }

    #[tokio::test]
    async fn engines_are_independent() {
        let mut first = ready_engine().await;
        let mut second = ready_engine().await;
        first.update_game_state(&StateMap::from([("k".to_string(), StateValue::Integer(1))]));
        second.set_active_story("other").await.unwrap();

        assert_eq!(first.active_story_id(), Some("tale"));
        assert!(second.game_state().is_empty());
        assert_eq!(first.game_state().len(), 1);
    }
}
