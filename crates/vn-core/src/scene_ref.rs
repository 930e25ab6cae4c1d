use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A reference to a scene, either in the active chapter or in a named chapter.
///
/// On the wire this is a string: `"sceneId"` or `"chapterId:sceneId"`. The
/// string is split at the first `:`, so scene ids may themselves contain colons
/// only when the reference is chapter-qualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SceneRef {
    /// A scene in the currently active chapter.
    Local(String),
    /// A scene in a specific chapter, which becomes the active chapter.
    Qualified {
        /// Chapter id.
        chapter: String,
        /// Scene id within that chapter.
        scene: String,
    },
}

impl SceneRef {
    /// Reference a scene in the active chapter.
    pub fn local(scene: impl Into<String>) -> Self {
        Self::Local(scene.into())
    }

    /// Reference a scene in a named chapter.
    pub fn qualified(chapter: impl Into<String>, scene: impl Into<String>) -> Self {
        Self::Qualified {
            chapter: chapter.into(),
            scene: scene.into(),
        }
    }

    /// The scene id, regardless of qualification.
    pub fn scene(&self) -> &str {
        match self {
            Self::Local(scene) | Self::Qualified { scene, .. } => scene,
        }
    }

    /// The chapter id, if qualified.
    pub fn chapter(&self) -> Option<&str> {
        match self {
            Self::Local(_) => None,
            Self::Qualified { chapter, .. } => Some(chapter),
        }
    }
}

impl FromStr for SceneRef {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            None if !s.is_empty() => Ok(Self::local(s)),
            Some((chapter, scene)) if !chapter.is_empty() && !scene.is_empty() => {
                Ok(Self::qualified(chapter, scene))
            }
            _ => Err(CoreError::InvalidSceneRef(s.to_string())),
        }
    }
}

impl TryFrom<String> for SceneRef {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SceneRef> for String {
    fn from(value: SceneRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SceneRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(scene) => write!(f, "{scene}"),
            Self::Qualified { chapter, scene } => write!(f, "{chapter}:{scene}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_local() {
        let r: SceneRef = "start".parse().unwrap();
        assert_eq!(r, SceneRef::local("start"));
        assert_eq!(r.chapter(), None);
    }

    #[test]
    fn parse_qualified() {
        let r: SceneRef = "chapter2:introScene".parse().unwrap();
        assert_eq!(r, SceneRef::qualified("chapter2", "introScene"));
        assert_eq!(r.chapter(), Some("chapter2"));
        assert_eq!(r.scene(), "introScene");
    }

    #[test]
    fn splits_at_first_colon() {
        let r: SceneRef = "ch:scene:with:colons".parse().unwrap();
        assert_eq!(r, SceneRef::qualified("ch", "scene:with:colons"));
    }

    #[test]
    fn rejects_empty_parts() {
        assert!("".parse::<SceneRef>().is_err());
        assert!(":scene".parse::<SceneRef>().is_err());
        assert!("chapter:".parse::<SceneRef>().is_err());
    }

    #[test]
    fn json_uses_string_form() {
        let r: SceneRef = serde_json::from_str(r#""chapter1:start""#).unwrap();
        assert_eq!(r, SceneRef::qualified("chapter1", "start"));
        assert_eq!(serde_json::to_string(&r).unwrap(), r#""chapter1:start""#);

        let err = serde_json::from_str::<SceneRef>(r#"":oops""#).unwrap_err();
        assert!(err.to_string().contains("invalid scene reference"));
    }
}
