//! Scene resolution: locate a scene and keep only what the game state allows.

use std::sync::Arc;

use vn_core::{Chapter, Condition, GameState, Scene, SceneRef};

use crate::engine::StoryEngine;
use crate::error::{EngineError, EngineResult};
use crate::source::StorySource;

/// Copy `scene`, keeping only the dialogue lines and choices whose conditions hold.
///
/// Order is preserved. The source scene is left untouched.
pub fn filter_scene(scene: &Scene, state: &GameState) -> Scene {
    Scene {
        id: scene.id.clone(),
        background_key: scene.background_key.clone(),
        dialogue: scene
            .dialogue
            .iter()
            .filter(|line| Condition::check(line.condition.as_ref(), state))
            .cloned()
            .collect(),
        choices: scene
            .choices
            .iter()
            .filter(|choice| Condition::check(choice.condition.as_ref(), state))
            .cloned()
            .collect(),
    }
}

impl<S: StorySource> StoryEngine<S> {
    /// Resolve a scene reference against the current game state.
    ///
    /// A local reference is looked up in the active chapter. A qualified
    /// reference loads its chapter first and, once the scene is found, makes
    /// that chapter active. On failure the active chapter is unchanged.
    pub async fn resolve_scene(&mut self, scene_ref: &SceneRef) -> EngineResult<Scene> {
        let chapter: Arc<Chapter> = match scene_ref {
            SceneRef::Local(scene) => self
                .active_chapter
                .clone()
                .ok_or_else(|| EngineError::NoActiveChapter(scene.clone()))?,
            SceneRef::Qualified { chapter, .. } => {
                let story_id = self.catalog.active_manifest()?.id.clone();
                self.chapter(&story_id, chapter).await?
            }
        };

        let scene = chapter
            .scene(scene_ref.scene())
            .ok_or_else(|| EngineError::SceneNotFound {
                story: self.active_story_id().unwrap_or_default().to_string(),
                chapter: chapter.id.clone(),
                scene: scene_ref.scene().to_string(),
            })?;

        let resolved = filter_scene(scene, &self.state);
        self.active_chapter = Some(chapter);
        Ok(resolved)
    }
}
