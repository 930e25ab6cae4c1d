//! Narrative state engine for branching visual novels.
//!
//! A [`StoryEngine`] owns the story catalog, the chapter cache, and the game
//! state for one playthrough. A [`NarrativeController`] drives it turn by
//! turn: it resolves scenes, applies choices, tracks explore and return
//! navigation, and projects the result as a [`SceneView`].
//!
//! ```no_run
//! use vn_engine::{DirSource, EngineConfig, NarrativeController, StoryEngine};
//!
//! # async fn run() -> vn_engine::EngineResult<()> {
//! let source = DirSource::new("game");
//! let config = EngineConfig::load(&source).await?;
//! let mut engine = StoryEngine::new(source, config);
//! engine.initialize().await?;
//!
//! let mut controller = NarrativeController::new(engine);
//! let _ = controller.begin().await;
//! controller.typing_finished();
//! let _ = controller.choose(0).await;
//! # Ok(())
//! # }
//! ```

/// Background resolution and cancellation.
pub mod background;
/// Story registry and active-story selection.
pub mod catalog;
/// Engine configuration.
pub mod config;
/// Turn-by-turn playthrough control.
pub mod controller;
/// The engine context.
pub mod engine;
/// Error types for the engine.
pub mod error;
/// Resource paths within a story source.
pub mod layout;
/// Chapter fetching and caching.
pub mod loader;
/// Scene lookup and condition filtering.
pub mod resolver;
/// Story resource providers.
pub mod source;
/// Presentation projection.
pub mod view;

#[cfg(test)]
mod testing;

pub use background::{Background, CancelHandle, CancelToken, IMAGE_EXTENSIONS, cancel_pair};
pub use catalog::StoryCatalog;
pub use config::{CONFIG_FILE, EngineConfig};
pub use controller::{Advance, NarrativeController, Phase, Presentation};
pub use engine::StoryEngine;
pub use error::{EngineError, EngineResult, ErrorKind};
pub use layout::StoryLayout;
pub use loader::ChapterLoader;
pub use resolver::filter_scene;
pub use source::{DirSource, MemorySource, SourceError, SourceResult, StorySource};
pub use view::{ChoiceView, SceneView};
