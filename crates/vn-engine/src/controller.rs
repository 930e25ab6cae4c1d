//! Turn-by-turn control of a playthrough.

use std::collections::BTreeSet;

use vn_core::{Choice, ChoiceKind, DialogueLine, Scene, SceneRef};

use crate::engine::StoryEngine;
use crate::error::EngineError;
use crate::source::StorySource;

/// What the controller is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing presented yet, or the game was restarted.
    Idle,
    /// A scene is being resolved. Choice selections are ignored.
    Loading,
    /// A scene is on screen.
    Presenting(Presentation),
}

/// Sub-state of a presented scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Dialogue is still being revealed.
    Typing,
    /// Dialogue is done and the scene's choices are offered.
    AwaitingChoice,
}

/// Outcome of a step that may present a new scene.
#[derive(Debug)]
#[must_use]
pub enum Advance {
    /// A new scene is on screen.
    Presented,
    /// The request was dropped without effect.
    Ignored,
    /// The scene could not be loaded. The previous scene stays on screen.
    Failed(EngineError),
}

impl Advance {
    /// Returns true if a new scene is on screen.
    pub fn is_presented(&self) -> bool {
        matches!(self, Self::Presented)
    }

    /// The load error, if any.
    pub fn error(&self) -> Option<&EngineError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    returning: bool,
    preserve_background: bool,
}

impl Transition {
    const FRESH: Self = Self {
        returning: false,
        preserve_background: false,
    };
}

/// Drives a playthrough over a [`StoryEngine`].
///
/// The controller holds the presented scene and the exploration bookkeeping
/// behind explore and return choices:
///
/// - an explore choice remembers the current scene's choices and marks the
///   choice as explored;
/// - a return choice goes back without replacing the displayed dialogue, and
///   offers the target scene's choices straight away;
/// - an action choice forgets all exploration.
#[derive(Debug)]
pub struct NarrativeController<S> {
    pub(crate) engine: StoryEngine<S>,
    pub(crate) phase: Phase,
    pub(crate) scene: Option<Scene>,
    pub(crate) dialogue: Vec<DialogueLine>,
    pub(crate) background_key: Option<String>,
    pub(crate) explored: BTreeSet<String>,
    pub(crate) previous_choices: Option<Vec<Choice>>,
    pub(crate) returning: bool,
}

impl<S: StorySource> NarrativeController<S> {
    /// Create an idle controller.
    pub fn new(engine: StoryEngine<S>) -> Self {
        Self {
            engine,
            phase: Phase::Idle,
            scene: None,
            dialogue: Vec::new(),
            background_key: None,
            explored: BTreeSet::new(),
            previous_choices: None,
            returning: false,
        }
    }

    /// Get the engine.
    pub fn engine(&self) -> &StoryEngine<S> {
        &self.engine
    }

    /// Give the engine back.
    pub fn into_engine(self) -> StoryEngine<S> {
        self.engine
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true while a scene is being resolved.
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// The presented scene, already filtered by the game state.
    pub fn current_scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// The dialogue on screen. After a return this is still the dialogue of
    /// the scene that was returned from.
    pub fn displayed_dialogue(&self) -> &[DialogueLine] {
        &self.dialogue
    }

    /// Ids of explore choices taken since the last action choice.
    pub fn explored_choices(&self) -> &BTreeSet<String> {
        &self.explored
    }

    /// Choices of the scene the last explore choice was taken from.
    pub fn previous_scene_choices(&self) -> Option<&[Choice]> {
        self.previous_choices.as_deref()
    }

    /// Returns true if the presented scene was reached by a return choice.
    pub fn is_returning(&self) -> bool {
        self.returning
    }

    /// Start the active story at its entry chapter's start scene.
    pub async fn begin(&mut self) -> Advance {
        let target = match self.engine.active_manifest() {
            Ok(manifest) => SceneRef::qualified(
                manifest.entry_chapter.clone(),
                self.engine.config().start_scene.clone(),
            ),
            Err(e) => {
                log::error!("cannot start a game: {e}");
                return Advance::Failed(e);
            }
        };
        self.start_game(&target).await
    }

    /// Reset the game state and exploration, then present `target`.
    ///
    /// Allowed from any phase, including a load that was abandoned.
    pub async fn start_game(&mut self, target: &SceneRef) -> Advance {
        log::info!("starting game at {target}");
        self.engine.reset_game_state();
        self.clear_exploration();
        self.load(target, Transition::FRESH).await
    }

    /// Apply a choice and present the scene it leads to.
    ///
    /// Ignored while a scene is loading. A choice's state changes are merged
    /// before its target is resolved.
    pub async fn select_choice(&mut self, choice: &Choice) -> Advance {
        if self.is_loading() {
            log::debug!("ignoring choice \"{}\" while loading", choice.id);
            return Advance::Ignored;
        }

        if let Some(changes) = &choice.set_state {
            self.engine.update_game_state(changes);
        }

        let transition = Transition {
            returning: choice.kind == ChoiceKind::Return,
            preserve_background: choice.preserve_background,
        };
        // Taken before the load replaces the scene, applied only if it succeeds.
        let origin_choices = self
            .scene
            .as_ref()
            .map(|scene| scene.choices.clone())
            .unwrap_or_default();

        let advance = self.load(&choice.next_scene_id, transition).await;
        if advance.is_presented() {
            match choice.kind {
                ChoiceKind::Explore => {
                    self.previous_choices = Some(origin_choices);
                    self.explored.insert(choice.id.clone());
                }
                ChoiceKind::Return => {}
                ChoiceKind::Action => self.clear_exploration(),
            }
        }
        advance
    }

    /// Select the choice at `index` in presentation order.
    ///
    /// Out-of-range and disabled choices are ignored.
    pub async fn choose(&mut self, index: usize) -> Advance {
        let picked = self
            .presented_choices()
            .get(index)
            .map(|view| (view.choice.clone(), view.disabled));
        match picked {
            Some((choice, false)) => self.select_choice(&choice).await,
            Some((choice, true)) => {
                log::debug!("choice \"{}\" is disabled", choice.id);
                Advance::Ignored
            }
            None => {
                log::debug!("no choice at position {index}");
                Advance::Ignored
            }
        }
    }

    /// Dialogue has been fully revealed; offer the scene's choices.
    ///
    /// Does nothing unless the scene is typing and has choices.
    pub fn typing_finished(&mut self) {
        if self.phase != Phase::Presenting(Presentation::Typing) {
            return;
        }
        if self.scene.as_ref().is_some_and(|s| !s.choices.is_empty()) {
            self.phase = Phase::Presenting(Presentation::AwaitingChoice);
        }
    }

    /// Clear the game state, exploration and the presented scene.
    pub fn restart_game(&mut self) {
        log::info!("restarting game");
        self.engine.reset_game_state();
        self.clear_exploration();
        self.scene = None;
        self.dialogue.clear();
        self.background_key = None;
        self.phase = Phase::Idle;
    }

    /// Make another story active and restart.
    pub async fn switch_story(&mut self, story_id: &str) -> Result<(), EngineError> {
        self.engine.set_active_story(story_id).await?;
        self.restart_game();
        Ok(())
    }

    fn clear_exploration(&mut self) {
        self.explored.clear();
        self.previous_choices = None;
        self.returning = false;
    }

    async fn load(&mut self, target: &SceneRef, transition: Transition) -> Advance {
        let prior = self.phase;
        self.phase = Phase::Loading;

        let delay = self.engine.config().scene_load_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let scene = match self.engine.resolve_scene(target).await {
            Ok(scene) => scene,
            Err(e) => {
                log::error!("failed to load scene {target}: {e}");
                self.phase = prior;
                if prior == Phase::Loading {
                    self.settle();
                }
                return Advance::Failed(e);
            }
        };

        log::debug!("presenting scene {target}");
        if !transition.returning {
            self.dialogue = scene.dialogue.clone();
        }
        if !transition.preserve_background || self.background_key.is_none() {
            self.background_key = Some(scene.background_key.clone());
        }
        self.returning = transition.returning;
        self.scene = Some(scene);

        self.phase = Phase::Presenting(Presentation::Typing);
        if transition.returning || self.dialogue.is_empty() {
            self.typing_finished();
        }
        Advance::Presented
    }

    /// Leave a stale loading phase for whatever the presented scene allows.
    fn settle(&mut self) {
        if self.scene.is_some() {
            self.phase = Phase::Presenting(Presentation::Typing);
            self.typing_finished();
        } else {
            self.phase = Phase::Idle;
        }
    }
}
