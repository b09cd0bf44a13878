//! Hit-testing against placed elements.
//!
//! Boxes are the elements' un-rotated bounds. Overlaps resolve to the
//! earliest element in document order, which is the one drawn underneath.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::consts::HANDLE_SIZE_PX;
use crate::doc::{DocStore, ElementId, PlacedElement};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Axis-aligned square centered on a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleRect {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl HandleRect {
    /// Inclusive containment.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.size && pt.y >= self.y && pt.y <= self.y + self.size
    }
}

/// The resize handle of an element, centered on its bottom-right corner.
#[must_use]
pub fn handle_rect(el: &PlacedElement) -> HandleRect {
    let half = HANDLE_SIZE_PX / 2.0;
    HandleRect { x: el.x + el.width - half, y: el.y + el.height - half, size: HANDLE_SIZE_PX }
}

/// Strict-interior containment in the element's un-rotated box.
#[must_use]
pub fn body_contains(el: &PlacedElement, pt: Point) -> bool {
    pt.x > el.x && pt.x < el.x + el.width && pt.y > el.y && pt.y < el.y + el.height
}

/// Test which element (if any) is under `pt`, in canvas coordinates.
///
/// The selected element's resize handle is checked first; after that the
/// first element whose body contains the point wins.
#[must_use]
pub fn hit_test(pt: Point, doc: &DocStore, selected: Option<ElementId>) -> Option<Hit> {
    if let Some(sel) = selected.and_then(|id| doc.get(id)) {
        if handle_rect(sel).contains(pt) {
            return Some(Hit { element_id: sel.id, part: HitPart::ResizeHandle });
        }
    }

    doc.elements()
        .iter()
        .find(|el| body_contains(el, pt))
        .map(|el| Hit { element_id: el.id, part: HitPart::Body })
}
