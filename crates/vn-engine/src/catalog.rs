//! Registry of available stories and the active-story pointer.

use futures::future::join_all;
use vn_core::{StoryManifest, StorySummary};

use crate::error::{EngineError, EngineResult};
use crate::layout::StoryLayout;
use crate::source::StorySource;

/// The set of loaded story manifests, in story-index order.
#[derive(Debug, Clone, Default)]
pub struct StoryCatalog {
    manifests: Vec<StoryManifest>,
    active: Option<usize>,
    initialized: bool,
}

impl StoryCatalog {
    /// Create an empty, uninitialized catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the story index and every manifest it lists.
    ///
    /// Manifests are fetched concurrently. A manifest that fails to load is
    /// skipped with a warning. The story named `default_story` becomes
    /// active; if it did not load, the first loaded story does. Fails only
    /// when no story loaded at all. Calling this again once it has succeeded
    /// does nothing.
    pub async fn initialize<S: StorySource>(
        &mut self,
        source: &S,
        layout: &StoryLayout,
        default_story: &str,
    ) -> EngineResult<()> {
        if self.initialized {
            return Ok(());
        }

        let ids = match load_index(source, layout).await {
            Ok(ids) => ids,
            Err(e) => {
                log::error!("failed to load story index {}: {e}", layout.index());
                Vec::new()
            }
        };

        let results = join_all(ids.iter().map(|id| load_manifest(source, layout, id))).await;

        let mut manifests: Vec<StoryManifest> = Vec::with_capacity(ids.len());
        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(_) if manifests.iter().any(|m| &m.id == id) => {
                    log::warn!("story \"{id}\" is listed twice in the index; keeping the first");
                }
                Ok(mut manifest) => {
                    if &manifest.id != id {
                        log::warn!(
                            "manifest for story \"{id}\" declares id \"{}\"; using \"{id}\"",
                            manifest.id
                        );
                        manifest.id = id.clone();
                    }
                    manifests.push(manifest);
                }
                Err(e) => log::warn!("skipping story \"{id}\": {e}"),
            }
        }

        if manifests.is_empty() {
            return Err(EngineError::NoStoriesLoaded);
        }

        let active = match manifests.iter().position(|m| m.id == default_story) {
            Some(index) => index,
            None => {
                log::warn!(
                    "default story \"{default_story}\" not found; falling back to \"{}\"",
                    manifests[0].id
                );
                0
            }
        };

        self.manifests = manifests;
        self.active = Some(active);
        self.initialized = true;
        Ok(())
    }

    /// Returns true once [`initialize`](Self::initialize) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Id and metadata of every loaded story. Empty before initialization.
    pub fn all_stories(&self) -> Vec<StorySummary> {
        if !self.initialized {
            log::warn!("story list requested before the catalog was initialized");
        }
        self.manifests.iter().map(StoryManifest::summary).collect()
    }

    /// Look up a loaded manifest by story id.
    pub fn get(&self, story_id: &str) -> Option<&StoryManifest> {
        self.manifests.iter().find(|m| m.id == story_id)
    }

    /// Id of the active story, if any.
    pub fn active_story_id(&self) -> Option<&str> {
        self.active.map(|index| self.manifests[index].id.as_str())
    }

    /// Manifest of the active story.
    pub fn active_manifest(&self) -> EngineResult<&StoryManifest> {
        match self.active {
            Some(index) if self.initialized => Ok(&self.manifests[index]),
            _ => Err(EngineError::Uninitialized),
        }
    }

    /// Point the catalog at another loaded story.
    pub fn select(&mut self, story_id: &str) -> EngineResult<&StoryManifest> {
        if !self.initialized {
            return Err(EngineError::Uninitialized);
        }
        let Some(index) = self.manifests.iter().position(|m| m.id == story_id) else {
            log::error!("attempted to activate unknown story \"{story_id}\"");
            return Err(EngineError::StoryNotFound(story_id.to_string()));
        };
        self.active = Some(index);
        Ok(&self.manifests[index])
    }
}

async fn load_index<S: StorySource>(source: &S, layout: &StoryLayout) -> EngineResult<Vec<String>> {
    let path = layout.index();
    let text = source.fetch(&path).await?;
    serde_json::from_str(&text).map_err(|e| EngineError::Parse {
        path,
        source: e.into(),
    })
}

async fn load_manifest<S: StorySource>(
    source: &S,
    layout: &StoryLayout,
    story_id: &str,
) -> EngineResult<StoryManifest> {
    let path = layout.manifest(story_id);
    let text = source.fetch(&path).await?;
    StoryManifest::from_json(&text).map_err(|e| EngineError::Parse { path, source: e })
}
