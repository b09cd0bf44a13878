use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point};
use crate::consts::{DEFAULT_ELEMENT_SIZE, FULL_TURN_DEG, MIN_ELEMENT_SIZE, ROTATION_STEP_DEG};
use crate::doc::{DocStore, ElementId, ElementKind, Layout, PartialElement, PlacedElement};
use crate::hit::{self, HitPart};
use crate::input::{InputState, UiState};
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ElementCreated(PlacedElement),
    ElementUpdated { id: ElementId, fields: PartialElement },
    SelectionChanged(Option<ElementId>),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Pointer positions passed in are client coordinates; `camera` maps them
/// onto the canvas.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub doc: DocStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Replace the document with a loaded layout.
    ///
    /// The selection survives only if its element is still present. Any
    /// gesture in progress is dropped.
    pub fn load_snapshot(&mut self, layout: Layout) -> Vec<Action> {
        self.doc.load_snapshot(layout);
        self.input = InputState::Idle;

        let mut actions = Vec::new();
        if let Some(id) = self.ui.selected_id {
            if !self.doc.contains(id) {
                self.ui.selected_id = None;
                actions.push(Action::SelectionChanged(None));
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Elements in order, ready to be saved.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PlacedElement> {
        self.doc.snapshot()
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, client_pt: Point) -> Vec<Action> {
        let pt = self.camera.client_to_canvas(client_pt);

        match hit::hit_test(pt, &self.doc, self.ui.selected_id) {
            Some(hit) if hit.part == HitPart::ResizeHandle => {
                let Some(el) = self.doc.get(hit.element_id) else {
                    return Vec::new();
                };
                self.input = InputState::Resizing {
                    id: el.id,
                    start: pt,
                    orig_w: el.width,
                    orig_h: el.height,
                };
                Vec::new()
            }
            Some(hit) => {
                let Some(el) = self.doc.get(hit.element_id) else {
                    return Vec::new();
                };
                self.input = InputState::Dragging {
                    id: el.id,
                    grab_offset: Point::new(pt.x - el.x, pt.y - el.y),
                };
                self.select(Some(hit.element_id))
            }
            None => {
                self.input = InputState::Idle;
                self.select(None)
            }
        }
    }

    pub fn on_pointer_move(&mut self, client_pt: Point) -> Vec<Action> {
        let pt = self.camera.client_to_canvas(client_pt);

        let (id, fields) = match self.input {
            InputState::Idle => return Vec::new(),
            InputState::Dragging { id, grab_offset } => (
                id,
                PartialElement { x: Some(pt.x - grab_offset.x), y: Some(pt.y - grab_offset.y), ..Default::default() },
            ),
            InputState::Resizing { id, start, orig_w, orig_h } => (
                id,
                PartialElement {
                    width: Some((orig_w + pt.x - start.x).max(MIN_ELEMENT_SIZE)),
                    height: Some((orig_h + pt.y - start.y).max(MIN_ELEMENT_SIZE)),
                    ..Default::default()
                },
            ),
        };

        if !self.doc.apply_partial(id, &fields) {
            self.input = InputState::Idle;
            return Vec::new();
        }
        vec![Action::ElementUpdated { id, fields }, Action::RenderNeeded]
    }

    pub fn on_pointer_up(&mut self, _client_pt: Point) -> Vec<Action> {
        self.input = InputState::Idle;
        Vec::new()
    }

    // --- Palette / controls ---

    /// Create an element from a palette drag payload, centered on the drop point.
    ///
    /// Payloads that don't name a known element kind are ignored. The
    /// selection is left unchanged.
    pub fn on_drop(&mut self, payload: &str, client_pt: Point, now_ms: u64) -> Vec<Action> {
        let Some(kind) = ElementKind::from_label(payload) else {
            log::debug!("ignoring drop with unknown payload {payload:?}");
            return Vec::new();
        };

        let pt = self.camera.client_to_canvas(client_pt);
        let half = DEFAULT_ELEMENT_SIZE / 2.0;
        let element = PlacedElement {
            id: self.doc.next_id(now_ms),
            kind,
            x: pt.x - half,
            y: pt.y - half,
            width: DEFAULT_ELEMENT_SIZE,
            height: DEFAULT_ELEMENT_SIZE,
            rotation: 0,
        };
        self.doc.insert(element.clone());
        vec![Action::ElementCreated(element), Action::RenderNeeded]
    }

    /// Advance the selected element's rotation by one step. No-op without a selection.
    pub fn rotate_selected(&mut self) -> Vec<Action> {
        let Some(el) = self.selected_element() else {
            return Vec::new();
        };
        let id = el.id;
        let fields = PartialElement {
            rotation: Some((el.rotation + ROTATION_STEP_DEG) % FULL_TURN_DEG),
            ..Default::default()
        };
        self.doc.apply_partial(id, &fields);
        vec![Action::ElementUpdated { id, fields }, Action::RenderNeeded]
    }

    /// Whether the rotate control should be enabled.
    #[must_use]
    pub fn can_rotate(&self) -> bool {
        self.selected_element().is_some()
    }

    // --- Queries ---

    /// The currently selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn selected_element(&self) -> Option<&PlacedElement> {
        self.ui.selected_id.and_then(|id| self.doc.get(id))
    }

    /// One-line description of the selected element for the info panel.
    #[must_use]
    pub fn selection_summary(&self) -> Option<String> {
        self.selected_element().map(|el| {
            format!(
                "Selected: {} | Position: ({}, {}) | Size: {}x{} | Rotation: {}\u{b0}",
                el.kind, el.x, el.y, el.width, el.height, el.rotation
            )
        })
    }

    /// Look up an element by ID.
    #[must_use]
    pub fn object(&self, id: ElementId) -> Option<&PlacedElement> {
        self.doc.get(id)
    }

    fn select(&mut self, id: Option<ElementId>) -> Vec<Action> {
        if self.ui.selected_id == id {
            return vec![Action::RenderNeeded];
        }
        self.ui.selected_id = id;
        vec![Action::SelectionChanged(id), Action::RenderNeeded]
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    /// Refresh the client-to-canvas mapping from the element's current layout box.
    fn sync_camera(&mut self) {
        let rect = self.canvas.get_bounding_client_rect();
        self.core.camera = Camera::from_client_rect(
            rect.left(),
            rect.top(),
            rect.width(),
            rect.height(),
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    // --- Delegated inputs ---

    pub fn load_snapshot(&mut self, layout: Layout) -> Vec<Action> {
        self.core.load_snapshot(layout)
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<PlacedElement> {
        self.core.snapshot()
    }

    pub fn on_pointer_down(&mut self, client_pt: Point) -> Vec<Action> {
        self.sync_camera();
        self.core.on_pointer_down(client_pt)
    }

    pub fn on_pointer_move(&mut self, client_pt: Point) -> Vec<Action> {
        if self.core.input.is_idle() {
            return Vec::new();
        }
        self.sync_camera();
        self.core.on_pointer_move(client_pt)
    }

    pub fn on_pointer_up(&mut self, client_pt: Point) -> Vec<Action> {
        self.core.on_pointer_up(client_pt)
    }

    pub fn on_drop(&mut self, payload: &str, client_pt: Point, now_ms: u64) -> Vec<Action> {
        self.sync_camera();
        self.core.on_drop(payload, client_pt, now_ms)
    }

    pub fn rotate_selected(&mut self) -> Vec<Action> {
        self.core.rotate_selected()
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        render::draw(
            &ctx,
            &self.core.doc,
            &self.core.ui,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        )
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.core.selection()
    }

    #[must_use]
    pub fn can_rotate(&self) -> bool {
        self.core.can_rotate()
    }

    #[must_use]
    pub fn selection_summary(&self) -> Option<String> {
        self.core.selection_summary()
    }

    #[must_use]
    pub fn object(&self, id: ElementId) -> Option<&PlacedElement> {
        self.core.object(id)
    }
}
