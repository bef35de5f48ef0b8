//! Editor configuration.
//!
//! [`EditorConfig`] can be built in code, or loaded from a RON file:
//!
//! ```ron
//! (
//!     history_limit: 20,
//!     threads: 0,
//!     ordering: LatestWins,
//!     preserve_luminance: true,
//! )
//! ```
//!
//! Missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EditError, EditResult};
use crate::history::MAX_HISTORY;

/// How the controller treats results that arrive after a newer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResultOrdering {
    /// Only the newest dispatched request may install its result; older
    /// results are dropped when they arrive.
    #[default]
    LatestWins,
    /// Every result is installed in arrival order (last writer wins).
    Arrival,
}

/// Configuration for an [`EditController`](crate::EditController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Bound on each of the undo and redo stacks.
    pub history_limit: usize,
    /// Worker pool threads (0 = Rayon default).
    pub threads: usize,
    /// Stale result policy.
    pub ordering: ResultOrdering,
    /// Grayscale mode for the `vintage` and `noir` presets (true = luma).
    pub preserve_luminance: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: MAX_HISTORY,
            threads: 0,
            ordering: ResultOrdering::LatestWins,
            preserve_luminance: true,
        }
    }
}

impl EditorConfig {
    /// Parses a config from RON text.
    pub fn from_ron_str(text: &str) -> EditResult<Self> {
        ron::from_str(text).map_err(|e| EditError::Config(e.to_string()))
    }

    /// Loads a config from a RON file.
    pub fn from_ron_file(path: impl AsRef<Path>) -> EditResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| EditError::Config(format!("{}: {e}", path.display())))?;
        Self::from_ron_str(&text)
    }

    /// Serializes to pretty RON.
    pub fn to_ron_string(&self) -> EditResult<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| EditError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.threads, 0);
        assert_eq!(config.ordering, ResultOrdering::LatestWins);
        assert!(config.preserve_luminance);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config = EditorConfig::from_ron_str("(threads: 2, ordering: Arrival)").unwrap();
        assert_eq!(config.threads, 2);
        assert_eq!(config.ordering, ResultOrdering::Arrival);
        assert_eq!(config.history_limit, 20);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.ron");
        let config = EditorConfig { history_limit: 5, preserve_luminance: false, ..Default::default() };
        std::fs::write(&path, config.to_ron_string().unwrap()).unwrap();
        assert_eq!(EditorConfig::from_ron_file(&path).unwrap(), config);
    }

    #[test]
    fn test_bad_ron() {
        assert!(matches!(
            EditorConfig::from_ron_str("(history_limit: \"lots\")"),
            Err(EditError::Config(_))
        ));
        assert!(matches!(
            EditorConfig::from_ron_file("/nonexistent/editor.ron"),
            Err(EditError::Config(_))
        ));
    }
}
