//! A small two-story fixture shared by the engine's unit tests.

use std::time::Duration;

use crate::config::EngineConfig;
use crate::engine::StoryEngine;
use crate::source::MemorySource;

const INDEX: &str = r#"["tale", "other"]"#;

const TALE: &str = r##"{
  "id": "tale",
  "metadata": { "title": "A Tale" },
  "speakerColors": { "Narrator": "text-gray-300", "Guard": "text-red-400", "default": "text-white" },
  "backgroundsMap": {
    "forest": { "from": "#14532d", "to": "#052e16" },
    "default": { "from": "#111827", "to": "#000000" }
  },
  "entryChapter": "chapter1",
  "chapters": { "chapter1": "./chapter1.json", "chapter2": "./chapter2.json" }
}"##;

const CHAPTER_ONE: &str = r#"{
  "id": "chapter1",
  "metadata": { "chapter": "Chapter One: The Forest" },
  "gameData": {
    "start": {
      "id": "start",
      "backgroundKey": "forest",
      "dialogue": [
        { "speaker": "Narrator", "line": "You stand at a crossroads." },
        { "speaker": "Narrator", "line": "The bell still rings in your ears.", "condition": { "rang_bell": true } }
      ],
      "choices": [
        { "id": "road", "text": "Take the road", "nextSceneId": "road" },
        { "id": "shrine", "text": "Visit the shrine", "nextSceneId": "shrine", "type": "explore" },
        { "id": "shortcut", "text": "Cut through the brush", "nextSceneId": "road", "setState": { "took_shortcut": true } },
        { "id": "pray", "text": "Pray for guidance", "nextSceneId": "road", "condition": { "rang_bell": true } },
        { "id": "leave", "text": "Leave the forest", "nextSceneId": "chapter2:intro" }
      ]
    },
    "shrine": {
      "id": "shrine",
      "backgroundKey": "shrine",
      "dialogue": [ { "speaker": "Priest", "line": "Welcome, traveller." } ],
      "choices": [
        { "id": "back", "text": "Return to the crossroads", "nextSceneId": "start", "type": "return" },
        { "id": "bell", "text": "Ring the bell and go back", "nextSceneId": "start", "type": "return", "setState": { "rang_bell": true } },
        { "id": "follow", "text": "Follow the priest", "nextSceneId": "road", "preserveBackground": true }
      ]
    },
    "road": {
      "id": "road",
      "backgroundKey": "road",
      "dialogue": [
        { "speaker": "Narrator", "line": "The road stretches on." },
        { "speaker": "Narrator", "line": "You made good time.", "condition": { "took_shortcut": true } }
      ],
      "choices": [
        { "id": "onward", "text": "Onward", "nextSceneId": "chapter2:intro" },
        { "id": "fog", "text": "Into the fog", "nextSceneId": "nowhere" },
        { "id": "cave", "text": "Light a torch and enter the cave", "nextSceneId": "nowhere", "type": "explore", "setState": { "lit_torch": true } },
        { "id": "rest", "text": "Rest", "nextSceneId": "silent" }
      ]
    },
    "silent": {
      "id": "silent",
      "backgroundKey": "road",
      "dialogue": [],
      "choices": [ { "id": "wake", "text": "Wake up", "nextSceneId": "road" } ]
    }
  }
}"#;

const CHAPTER_TWO: &str = r#"{
  "id": "chapter2",
  "metadata": { "chapter": "Chapter Two: The City" },
  "gameData": {
    "intro": {
      "id": "intro",
      "backgroundKey": "city",
      "dialogue": [ { "speaker": "Guard", "line": "Papers, please." } ],
      "choices": [ { "id": "enter", "text": "Enter the city", "nextSceneId": "finale" } ]
    },
    "finale": {
      "id": "finale",
      "backgroundKey": "city",
      "dialogue": [ { "speaker": "Narrator", "line": "The end." } ],
      "choices": []
    }
  }
}"#;

const OTHER: &str = r#"{
  "id": "other",
  "metadata": { "title": "Another Story" },
  "entryChapter": "prologue",
  "chapters": { "prologue": "./prologue.json" }
}"#;

const PROLOGUE: &str = r#"{
  "id": "prologue",
  "metadata": { "chapter": "Prologue" },
  "gameData": {
    "start": {
      "id": "start",
      "backgroundKey": "void",
      "dialogue": [ { "speaker": "Narrator", "line": "Another story begins." } ],
      "choices": []
    }
  }
}"#;

/// The fixture's files, with a few background images.
pub(crate) fn story_source() -> MemorySource {
    MemorySource::new()
        .with_file("stories/index.json", INDEX)
        .with_file("stories/tale/story.json", TALE)
        .with_file("stories/tale/chapter1.json", CHAPTER_ONE)
        .with_file("stories/tale/chapter2.json", CHAPTER_TWO)
        .with_file("stories/tale/background/forest.png", "png")
        .with_file("stories/tale/background/forest.jpg", "jpg")
        .with_file("stories/tale/background/shrine.webp", "webp")
        .with_file("stories/other/story.json", OTHER)
        .with_file("stories/other/prologue.json", PROLOGUE)
}

/// Configuration with no artificial delays and `tale` as the default story.
pub(crate) fn config() -> EngineConfig {
    EngineConfig::default()
        .with_default_story("tale")
        .with_scene_load_delay(Duration::ZERO)
        .with_typing_speed(Duration::ZERO)
}

/// An engine over the fixture, not yet initialized.
pub(crate) fn engine() -> StoryEngine<MemorySource> {
    StoryEngine::new(story_source(), config())
}

/// An engine over the fixture with its catalog loaded.
pub(crate) async fn ready_engine() -> StoryEngine<MemorySource> {
    let mut engine = engine();
    engine
        .initialize()
        .await
        .expect("fixture catalog should load");
    engine
}
