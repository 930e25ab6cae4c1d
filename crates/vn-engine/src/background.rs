//! Background resolution for a scene's background key.
//!
//! A key resolves to the first image found under the story's `background/`
//! directory, trying [`IMAGE_EXTENSIONS`] in order, then to the manifest's
//! gradient for the key (or its `default` gradient), then to nothing.

use std::sync::Arc;

use tokio::sync::watch;
use vn_core::BackgroundColors;

use crate::engine::StoryEngine;
use crate::source::StorySource;

/// Image extensions probed for a background, most preferred first.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["webp", "jpg", "png"];

/// What to draw behind a scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    /// An image resource, by path relative to the source root.
    Image {
        /// Resource path.
        path: String,
    },
    /// A two-colour gradient from the manifest.
    Gradient(BackgroundColors),
    /// Nothing configured.
    None,
}

impl Background {
    /// Short name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Image { .. } => "image",
            Self::Gradient(_) => "gradient",
            Self::None => "none",
        }
    }
}

/// Cancels every [`CancelToken`] made from it. Dropping the handle cancels too.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// Observes a [`CancelHandle`].
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
    _keep_alive: Option<Arc<watch::Sender<bool>>>,
}

/// Create a handle and one token observing it.
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let handle = CancelHandle {
        tx: watch::channel(false).0,
    };
    let token = handle.token();
    (handle, token)
}

impl CancelHandle {
    /// Cancel all tokens.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Another token observing this handle.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
            _keep_alive: None,
        }
    }
}

impl CancelToken {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            rx,
            _keep_alive: Some(Arc::new(tx)),
        }
    }

    /// Returns true once the handle has cancelled or been dropped.
    pub fn is_cancelled(&self) -> bool {
        let cancelled = *self.rx.borrow();
        cancelled || self.rx.has_changed().is_err()
    }

    /// Wait until the token is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        // An Err means the handle was dropped, which counts as cancellation.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl<S: StorySource> StoryEngine<S> {
    /// Resolve what to draw for `key` in the active story.
    ///
    /// Returns `None` if `cancel` fires first, in which case the caller
    /// should keep whatever it was showing.
    pub async fn resolve_background(&self, key: &str, cancel: &CancelToken) -> Option<Background> {
        let manifest = match self.active_manifest() {
            Ok(manifest) => manifest,
            Err(e) => {
                log::warn!("cannot resolve background \"{key}\": {e}");
                return Some(Background::None);
            }
        };

        for extension in IMAGE_EXTENSIONS {
            if cancel.is_cancelled() {
                return None;
            }
            let path = self.layout.background(&manifest.id, key, extension);
            let found = tokio::select! {
                biased;
                () = cancel.cancelled() => return None,
                found = self.source.exists(&path) => found,
            };
            if found {
                log::debug!("background \"{key}\" resolved to {path}");
                return Some(Background::Image { path });
            }
        }

        if cancel.is_cancelled() {
            return None;
        }
        Some(
            manifest
                .background_colors(key)
                .cloned()
                .map_or(Background::None, Background::Gradient),
        )
    }
}
