//! Input model: persistent UI state and the gesture state machine.
//!
//! `InputState` is the gesture tracked between pointer-down and pointer-up.
//! Each active variant carries what the engine needs to turn later pointer
//! positions into element geometry.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::ElementId;

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// The id of the currently selected element, if any.
    pub selected_id: Option<ElementId>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an element across the canvas.
    Dragging {
        id: ElementId,
        /// Pointer position minus the element's origin at pointer-down.
        grab_offset: Point,
    },
    /// The user is resizing an element by its bottom-right handle.
    Resizing {
        id: ElementId,
        /// Pointer position at pointer-down.
        start: Point,
        orig_w: f64,
        orig_h: f64,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Element the active gesture operates on.
    #[must_use]
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(*id),
        }
    }
}
