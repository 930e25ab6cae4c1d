use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// Palette key used when a speaker or background has no entry of its own.
pub const DEFAULT_KEY: &str = "default";

/// Descriptive metadata about a story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryMetadata {
    /// Display title.
    pub title: String,
}

/// A two-stop colour pair used to draw a procedural background gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundColors {
    /// Inner colour.
    pub from: String,
    /// Outer colour.
    pub to: String,
}

/// A story's manifest: metadata, palettes, and the chapter index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryManifest {
    /// Story id, matching its entry in the story index.
    pub id: String,
    /// Descriptive metadata.
    pub metadata: StoryMetadata,
    /// Speaker name to style token.
    #[serde(default)]
    pub speaker_colors: BTreeMap<String, String>,
    /// Background key to gradient colours.
    #[serde(default)]
    pub backgrounds_map: BTreeMap<String, BackgroundColors>,
    /// Chapter the story starts in.
    pub entry_chapter: String,
    /// Chapter id to source path, relative to the story directory.
    pub chapters: BTreeMap<String, String>,
}

/// The id and metadata of a story, for listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySummary {
    /// Story id.
    pub id: String,
    /// Descriptive metadata.
    pub metadata: StoryMetadata,
}

impl StoryManifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Source path for a chapter, if the story has it.
    pub fn chapter_path(&self, chapter_id: &str) -> Option<&str> {
        self.chapters.get(chapter_id).map(String::as_str)
    }

    /// Style token for a speaker, falling back to the `default` entry.
    pub fn speaker_color(&self, speaker: &str) -> Option<&str> {
        self.speaker_colors
            .get(speaker)
            .or_else(|| self.speaker_colors.get(DEFAULT_KEY))
            .map(String::as_str)
    }

    /// Gradient colours for a background key, falling back to the `default` entry.
    pub fn background_colors(&self, key: &str) -> Option<&BackgroundColors> {
        self.backgrounds_map
            .get(key)
            .or_else(|| self.backgrounds_map.get(DEFAULT_KEY))
    }

    /// The id and metadata of this story.
    pub fn summary(&self) -> StorySummary {
        StorySummary {
            id: self.id.clone(),
            metadata: self.metadata.clone(),
        }
    }
}
