//! Read-only projection of a controller for presentation layers.

use std::collections::BTreeSet;

use vn_core::{Choice, ChoiceKind, DialogueLine, StateMap};

use crate::controller::{NarrativeController, Phase, Presentation};
use crate::source::StorySource;

/// Everything a front end needs to draw the current moment of play.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneView<'a> {
    /// Active story id.
    pub story_id: Option<&'a str>,
    /// Id of the chapter the presented scene belongs to.
    pub chapter_id: Option<&'a str>,
    /// Title of that chapter.
    pub chapter_title: Option<&'a str>,
    /// Id of the presented scene.
    pub scene_id: Option<&'a str>,
    /// Background to draw.
    pub background_key: Option<&'a str>,
    /// Dialogue to show.
    pub dialogue: &'a [DialogueLine],
    /// Choices in presentation order.
    pub choices: Vec<ChoiceView<'a>>,
    /// Current phase.
    pub phase: Phase,
    /// A scene is loading.
    pub is_loading: bool,
    /// Choices are being offered.
    pub is_choosing: bool,
    /// The scene was reached by a return choice.
    pub is_returning: bool,
    /// Copy of the game state.
    pub game_state: StateMap,
}

/// A choice as it should be offered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoiceView<'a> {
    /// The choice itself.
    pub choice: &'a Choice,
    /// An explore choice already taken.
    pub explored: bool,
    /// Not selectable right now.
    pub disabled: bool,
}

/// Explore choices first, then the rest, each group in scene order.
pub(crate) fn order_choices<'a>(
    choices: &'a [Choice],
    explored: &BTreeSet<String>,
    loading: bool,
) -> Vec<ChoiceView<'a>> {
    let (explore, other): (Vec<&Choice>, Vec<&Choice>) = choices
        .iter()
        .partition(|choice| choice.kind == ChoiceKind::Explore);

    explore
        .into_iter()
        .chain(other)
        .map(|choice| {
            let explored = choice.kind == ChoiceKind::Explore && explored.contains(&choice.id);
            ChoiceView {
                choice,
                explored,
                disabled: explored || loading,
            }
        })
        .collect()
}

impl<S: StorySource> NarrativeController<S> {
    /// Choices of the presented scene in presentation order.
    pub fn presented_choices(&self) -> Vec<ChoiceView<'_>> {
        let choices = self
            .scene
            .as_ref()
            .map_or(&[][..], |scene| scene.choices.as_slice());
        order_choices(choices, &self.explored, self.is_loading())
    }

    /// Snapshot of everything a front end draws.
    pub fn view(&self) -> SceneView<'_> {
        let chapter = self.engine.active_chapter().filter(|_| self.scene.is_some());
        SceneView {
            story_id: self.engine.active_story_id(),
            chapter_id: chapter.map(|c| c.id.as_str()),
            chapter_title: chapter.map(|c| c.metadata.title.as_str()),
            scene_id: self.scene.as_ref().map(|s| s.id.as_str()),
            background_key: self.background_key.as_deref(),
            dialogue: &self.dialogue,
            choices: self.presented_choices(),
            phase: self.phase,
            is_loading: self.is_loading(),
            is_choosing: self.phase == Phase::Presenting(Presentation::AwaitingChoice),
            is_returning: self.returning,
            game_state: self.engine.game_state(),
        }
    }
}
