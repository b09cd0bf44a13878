//! Shared numeric and color constants for the canvas crate.

pub use layout::{FULL_TURN_DEG, MIN_ELEMENT_SIZE, ROTATION_STEP_DEG};

// ── Surface ─────────────────────────────────────────────────────

/// Backing-store width of the editor canvas in pixels.
pub const CANVAS_WIDTH: u32 = 800;

/// Backing-store height of the editor canvas in pixels.
pub const CANVAS_HEIGHT: u32 = 600;

pub const BACKGROUND_COLOR: &str = "#f5f5f5";

// ── Elements ────────────────────────────────────────────────────

/// Width and height of a freshly dropped element.
pub const DEFAULT_ELEMENT_SIZE: f64 = 50.0;

/// Line width for outlined element kinds.
pub const OUTLINE_WIDTH: f64 = 2.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Side length of the square resize handle, centered on the bottom-right corner.
pub const HANDLE_SIZE_PX: f64 = 8.0;

pub const HANDLE_COLOR: &str = "#3498db";
