use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::error::CoreResult;
use crate::scene_ref::SceneRef;
use crate::state::StateMap;

/// Descriptive metadata about a chapter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChapterMetadata {
    /// Chapter title.
    #[serde(rename = "chapter", alias = "chapterTitle")]
    pub title: String,
}

/// A chapter: an independently loadable partition of a story's scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Chapter id, unique within its story.
    pub id: String,
    /// Descriptive metadata.
    #[serde(default)]
    pub metadata: ChapterMetadata,
    /// Scene id to scene.
    pub game_data: HashMap<String, Scene>,
}

impl Chapter {
    /// Create an empty chapter.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: ChapterMetadata {
                title: title.into(),
            },
            game_data: HashMap::new(),
        }
    }

    /// Add a scene, keyed by its id.
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.game_data.insert(scene.id.clone(), scene);
        self
    }

    /// Parse a chapter from JSON text.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Look up a scene by id.
    pub fn scene(&self, scene_id: &str) -> Option<&Scene> {
        self.game_data.get(scene_id)
    }
}

/// A node in the narrative graph: dialogue to reveal and choices leading out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Scene id, unique within its chapter.
    pub id: String,
    /// Key into the story's background palette and image directory.
    #[serde(default)]
    pub background_key: String,
    /// Dialogue lines, revealed in order.
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,
    /// Outgoing choices, in display order.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(id: impl Into<String>, background_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            background_key: background_key.into(),
            dialogue: Vec::new(),
            choices: Vec::new(),
        }
    }

    /// Add a dialogue line.
    pub fn with_line(mut self, line: DialogueLine) -> Self {
        self.dialogue.push(line);
        self
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }
}

/// A single line of dialogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueLine {
    /// Speaker name. Empty for narration.
    #[serde(default)]
    pub speaker: String,
    /// The text of the line.
    pub line: String,
    /// Condition that must hold for the line to be shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl DialogueLine {
    /// Create an unconditional line.
    pub fn new(speaker: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            line: line.into(),
            condition: None,
        }
    }

    /// Gate the line on a condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// How selecting a choice moves through the story graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ChoiceKind {
    /// A hard branch. Discards any exploration context.
    #[default]
    Action,
    /// A soft branch the player can come back from.
    Explore,
    /// Pops back to a prior decision point without replaying dialogue.
    Return,
}

impl From<String> for ChoiceKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "explore" => Self::Explore,
            "return" => Self::Return,
            _ => Self::Action,
        }
    }
}

/// A player-selectable edge out of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Choice id, used to track explored branches.
    pub id: String,
    /// The text shown to the player.
    pub text: String,
    /// Where the choice leads.
    pub next_scene_id: SceneRef,
    /// Branch semantics.
    #[serde(rename = "type", default)]
    pub kind: ChoiceKind,
    /// State merged into the game state when the choice is selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_state: Option<StateMap>,
    /// Condition that must hold for the choice to be shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    /// Keep the current background when moving to the next scene.
    #[serde(default)]
    pub preserve_background: bool,
}

impl Choice {
    /// Create an action choice.
    pub fn new(id: impl Into<String>, text: impl Into<String>, next: SceneRef) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            next_scene_id: next,
            kind: ChoiceKind::Action,
            set_state: None,
            condition: None,
            preserve_background: false,
        }
    }

    /// Set the branch semantics.
    pub fn with_kind(mut self, kind: ChoiceKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set state that selecting this choice merges into the game state.
    pub fn with_state(mut self, set_state: StateMap) -> Self {
        self.set_state = Some(set_state);
        self
    }

    /// Gate the choice on a condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Keep the current background when this choice is taken.
    pub fn preserving_background(mut self) -> Self {
        self.preserve_background = true;
        self
    }
}
