//! Error types for the narrative engine.

use thiserror::Error;

use crate::source::SourceError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while loading or navigating a story.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The catalog has not been initialized, or has no active story.
    #[error("story catalog is not initialized")]
    Uninitialized,

    /// Initialization finished without a single loadable story.
    #[error("no stories could be loaded")]
    NoStoriesLoaded,

    /// Unknown story id.
    #[error("story not found: {0}")]
    StoryNotFound(String),

    /// The story's manifest does not list the chapter.
    #[error("chapter \"{chapter}\" not found in story \"{story}\"")]
    ChapterNotFound {
        /// Story id.
        story: String,
        /// Chapter id.
        chapter: String,
    },

    /// The chapter does not contain the scene.
    #[error("scene \"{scene}\" not found in chapter \"{chapter}\" of story \"{story}\"")]
    SceneNotFound {
        /// Story id.
        story: String,
        /// Chapter id.
        chapter: String,
        /// Scene id.
        scene: String,
    },

    /// A local scene reference was given before any chapter was active.
    #[error("cannot resolve scene \"{0}\": no active chapter")]
    NoActiveChapter(String),

    /// Fetching a resource failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A fetched resource was not valid story data.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path of the resource.
        path: String,
        /// Underlying parse error.
        source: vn_core::CoreError,
    },
}

/// Broad classes of engine failure, used to decide how loudly to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Nothing could be loaded at startup. Fatal.
    Initialization,
    /// An unknown story, chapter, or scene. Recoverable.
    NotFound,
    /// A fetch or parse failure. Recoverable.
    Transport,
    /// The engine was used out of order. Recoverable.
    Misuse,
}

impl EngineError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoStoriesLoaded => ErrorKind::Initialization,
            Self::StoryNotFound(_)
            | Self::ChapterNotFound { .. }
            | Self::SceneNotFound { .. }
            | Self::NoActiveChapter(_)
            | Self::Source(SourceError::NotFound(_)) => ErrorKind::NotFound,
            Self::Source(SourceError::Io { .. }) | Self::Parse { .. } => ErrorKind::Transport,
            Self::Uninitialized => ErrorKind::Misuse,
        }
    }

    /// Returns true unless the error leaves the engine unusable.
    pub fn is_recoverable(&self) -> bool {
        self.kind() != ErrorKind::Initialization
    }
}
