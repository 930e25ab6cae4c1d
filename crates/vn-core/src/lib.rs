//! Core types for the visual novel engine: stories, chapters, scenes, and game state.
//!
//! This crate defines the data model that story JSON deserializes into. It is
//! independent of how story files are fetched: you can construct a
//! [`Chapter`] programmatically or parse one with [`Chapter::from_json`].

/// Chapters, scenes, dialogue lines, and choices.
pub mod chapter;
/// Flat key/value conditions gating dialogue and choices.
pub mod condition;
/// Error types used throughout the crate.
pub mod error;
/// Scene references, optionally qualified by chapter.
pub mod scene_ref;
/// The mutable game state store.
pub mod state;
/// Story manifests and palette lookups.
pub mod story;
/// Dynamically typed state values.
pub mod value;

/// Re-export chapter and scene types.
pub use chapter::{Chapter, ChapterMetadata, Choice, ChoiceKind, DialogueLine, Scene};
/// Re-export the condition type.
pub use condition::Condition;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the scene reference type.
pub use scene_ref::SceneRef;
/// Re-export the game state store.
pub use state::{GameState, StateMap};
/// Re-export story manifest types.
pub use story::{BackgroundColors, StoryManifest, StoryMetadata, StorySummary};
/// Re-export the state value type.
pub use value::StateValue;
