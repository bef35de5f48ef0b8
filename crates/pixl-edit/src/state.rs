//! Edit controller state.

use pixl_core::PixelBuffer;

/// Controller state machine: `Empty` until an image is loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    /// No image loaded.
    #[default]
    Empty,
    /// Image loaded.
    Ready {
        /// Baseline every transform request is computed from.
        original: PixelBuffer,
        /// What is currently shown.
        displayed: PixelBuffer,
    },
}

impl EditState {
    /// True once an image is loaded.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// The baseline buffer.
    pub fn original(&self) -> Option<&PixelBuffer> {
        match self {
            Self::Ready { original, .. } => Some(original),
            Self::Empty => None,
        }
    }

    /// The displayed buffer.
    pub fn displayed(&self) -> Option<&PixelBuffer> {
        match self {
            Self::Ready { displayed, .. } => Some(displayed),
            Self::Empty => None,
        }
    }

    /// Short label for logs.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Ready { .. } => "Ready",
        }
    }
}
