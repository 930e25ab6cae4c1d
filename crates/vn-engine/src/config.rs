//! Static engine configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::layout::StoryLayout;
use crate::source::{SourceError, StorySource};

/// Name of the optional configuration file at the root of a game directory.
pub const CONFIG_FILE: &str = "vn.json";

/// Configuration for a narrative engine instance.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Story made active at initialization, if the catalog has it.
    pub default_story: String,
    /// Pause before each scene is presented.
    pub scene_load_delay: Duration,
    /// Delay between revealed characters when typing out dialogue.
    pub typing_speed: Duration,
    /// Scene a new game starts at, within the story's entry chapter.
    pub start_scene: String,
    /// Directory, relative to the source root, that holds the stories.
    pub stories_root: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_story: "the-princess".to_string(),
            scene_load_delay: Duration::from_millis(300),
            typing_speed: Duration::from_millis(20),
            start_scene: "start".to_string(),
            stories_root: "stories".to_string(),
        }
    }
}

/// On-disk shape of [`CONFIG_FILE`]. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    default_story: Option<String>,
    scene_load_delay_ms: Option<u64>,
    typing_speed_ms: Option<u64>,
    start_scene: Option<String>,
    stories_root: Option<String>,
}

impl EngineConfig {
    /// Set the default story id.
    pub fn with_default_story(mut self, id: impl Into<String>) -> Self {
        self.default_story = id.into();
        self
    }

    /// Set the scene-load pause.
    pub fn with_scene_load_delay(mut self, delay: Duration) -> Self {
        self.scene_load_delay = delay;
        self
    }

    /// Set the typing speed.
    pub fn with_typing_speed(mut self, speed: Duration) -> Self {
        self.typing_speed = speed;
        self
    }

    /// Set the start scene id.
    pub fn with_start_scene(mut self, scene: impl Into<String>) -> Self {
        self.start_scene = scene.into();
        self
    }

    /// The resource layout implied by `stories_root`.
    pub fn layout(&self) -> StoryLayout {
        StoryLayout::new(self.stories_root.clone())
    }

    /// Parse a configuration file, filling unset keys with defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let file: ConfigFile = serde_json::from_str(text)?;
        let defaults = Self::default();
        Ok(Self {
            default_story: file.default_story.unwrap_or(defaults.default_story),
            scene_load_delay: file
                .scene_load_delay_ms
                .map_or(defaults.scene_load_delay, Duration::from_millis),
            typing_speed: file
                .typing_speed_ms
                .map_or(defaults.typing_speed, Duration::from_millis),
            start_scene: file.start_scene.unwrap_or(defaults.start_scene),
            stories_root: file.stories_root.unwrap_or(defaults.stories_root),
        })
    }

    /// Load [`CONFIG_FILE`] from a source. A missing file yields the defaults.
    pub async fn load<S: StorySource>(source: &S) -> EngineResult<Self> {
        match source.fetch(CONFIG_FILE).await {
            Ok(text) => Self::from_json(&text).map_err(|e| EngineError::Parse {
                path: CONFIG_FILE.to_string(),
                source: e.into(),
            }),
            Err(SourceError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}
