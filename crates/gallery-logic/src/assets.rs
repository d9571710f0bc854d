//! Asset load state for visual objects.
//!
//! Loads are fire-and-forget from the layout's point of view. Each visual
//! object that waits on an asset carries an [`AssetState`], which starts
//! `Pending` and is settled exactly once by a [`LoadOutcome`] event. There
//! is no timeout: a load that never settles leaves the placeholder up.

use serde::{Deserialize, Serialize};

/// Result of one asset load, delivered as an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoadOutcome<T> {
    Loaded(T),
    Failed(String),
}

/// What a visual object currently shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum AssetState<T> {
    /// Placeholder visible, load in flight.
    #[default]
    Pending,
    Ready(T),
    /// Load failed; the fallback is shown for good.
    Failed(String),
}

impl<T> AssetState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, AssetState::Pending)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            AssetState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Apply a load outcome. Only a pending state accepts one; returns
    /// whether the state changed.
    pub fn settle(&mut self, outcome: LoadOutcome<T>) -> bool {
        if self.is_settled() {
            return false;
        }
        *self = match outcome {
            LoadOutcome::Loaded(value) => AssetState::Ready(value),
            LoadOutcome::Failed(reason) => AssetState::Failed(reason),
        };
        true
    }
}

/// Join an image base URL and an artwork file name.
pub fn image_url(base: &str, file: &str) -> String {
    format!("{base}{file}")
}

/// Join a statue asset's base path and a file within it.
pub fn asset_path(base_path: &str, file: &str) -> String {
    if base_path.is_empty() || base_path.ends_with('/') {
        format!("{base_path}{file}")
    } else {
        format!("{base_path}/{file}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_settles_once() {
        let mut state: AssetState<u32> = AssetState::default();
        assert!(state.is_pending());
        assert!(state.settle(LoadOutcome::Loaded(7)));
        assert_eq!(state.ready(), Some(&7));
        assert!(!state.settle(LoadOutcome::Failed("late".into())));
        assert_eq!(state, AssetState::Ready(7));
    }

    #[test]
    fn test_failure_is_final() {
        let mut state: AssetState<u32> = AssetState::Pending;
        assert!(state.settle(LoadOutcome::Failed("404".into())));
        assert!(!state.settle(LoadOutcome::Loaded(1)));
        assert_eq!(state, AssetState::Failed("404".into()));
        assert!(state.ready().is_none());
    }

    #[test]
    fn test_urls() {
        assert_eq!(image_url("images/", "a.jpg"), "images/a.jpg");
        assert_eq!(asset_path("models/venus", "venus.glb"), "models/venus/venus.glb");
        assert_eq!(asset_path("models/", "venus.glb"), "models/venus.glb");
        assert_eq!(asset_path("", "venus.glb"), "venus.glb");
    }
}
