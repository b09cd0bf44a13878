//! Page chrome around the canvas: palette, control buttons and info panel.
//!
//! DESIGN
//! ======
//! The DOM wiring lives in `web`; this module holds the parts that decide
//! what the chrome shows, so they test without a browser. The chrome reads
//! engine state only after an event whose actions say it went stale.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

use crate::doc::{ElementId, ElementKind};
use crate::engine::{Action, EngineCore};

/// `DataTransfer` format carrying the element kind during a palette drag.
pub const DRAG_FORMAT: &str = "text/plain";

/// Info panel text when nothing is selected.
pub const HINT_TEXT: &str =
    "Drag elements from the sidebar onto the canvas. Click to select. Drag the bottom-right corner to resize.";

#[derive(Clone, Copy)]
pub struct PaletteDef {
    pub kind: ElementKind,
    /// Text written into the drag payload.
    pub payload: &'static str,
}

pub const PALETTE: &[PaletteDef] = &[
    PaletteDef { kind: ElementKind::Table, payload: "Table" },
    PaletteDef { kind: ElementKind::Chair, payload: "Chair" },
    PaletteDef { kind: ElementKind::Door, payload: "Door" },
];

/// Control buttons, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Rotate,
    Save,
    Load,
}

impl Control {
    pub const ALL: [Self; 3] = [Self::Rotate, Self::Save, Self::Load];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Rotate => "Rotate",
            Self::Save => "Save Layout",
            Self::Load => "Load Layout",
        }
    }
}

/// What the chrome should display for the current engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub rotate_enabled: bool,
    pub info: String,
}

impl ControlState {
    #[must_use]
    pub fn from_core(core: &EngineCore) -> Self {
        Self {
            rotate_enabled: core.can_rotate(),
            info: core.selection_summary().unwrap_or_else(|| HINT_TEXT.to_owned()),
        }
    }
}

/// Whether `actions` change anything the chrome shows.
///
/// Selection changes toggle the rotate button; edits to the selected element
/// change the info panel. Creations never touch either, since a drop leaves
/// the selection alone.
#[must_use]
pub fn controls_stale(actions: &[Action], selected: Option<ElementId>) -> bool {
    actions.iter().any(|action| match action {
        Action::SelectionChanged(_) => true,
        Action::ElementUpdated { id, .. } => selected == Some(*id),
        Action::ElementCreated(_) | Action::RenderNeeded => false,
    })
}
