/// Where story resources live relative to a source root.
///
/// ```text
/// <root>/index.json                      story ids
/// <root>/<story>/story.json              manifest
/// <root>/<story>/<chapter path>          chapters, as named by the manifest
/// <root>/<story>/background/<key>.<ext>  background images
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryLayout {
    root: String,
}

impl Default for StoryLayout {
    fn default() -> Self {
        Self::new("stories")
    }
}

impl StoryLayout {
    /// Lay stories out under `root`.
    pub fn new(root: impl Into<String>) -> Self {
        let root: String = root.into();
        Self {
            root: root.trim_end_matches('/').to_string(),
        }
    }

    /// Path of the story index.
    pub fn index(&self) -> String {
        format!("{}/index.json", self.root)
    }

    /// Path of a story's manifest.
    pub fn manifest(&self, story_id: &str) -> String {
        format!("{}/{story_id}/story.json", self.root)
    }

    /// Path of a chapter, given the path the manifest lists for it.
    pub fn chapter(&self, story_id: &str, chapter_path: &str) -> String {
        let relative = chapter_path.trim_start_matches("./");
        format!("{}/{story_id}/{relative}", self.root)
    }

    /// Path of a background image candidate.
    pub fn background(&self, story_id: &str, key: &str, extension: &str) -> String {
        format!("{}/{story_id}/background/{key}.{extension}", self.root)
    }
}
