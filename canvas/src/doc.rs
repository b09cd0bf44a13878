//! Document model: the editor's local copy of the floor plan.
//!
//! The element types themselves live in the shared `layout` crate so the
//! editor and the store agree on the wire shape. This module adds a sparse
//! update type for incremental edits (`PartialElement`) and the runtime store
//! that owns all live elements (`DocStore`).
//!
//! Element order is significant: it is both draw order (later on top) and
//! hit-test order (earlier wins). The store never reorders.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

pub use layout::{ElementId, ElementKind, Layout, PlacedElement};

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialElement {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<u16>,
}

/// Ordered in-memory store of placed elements.
#[derive(Debug, Default)]
pub struct DocStore {
    elements: Vec<PlacedElement>,
    /// Highest id handed out by [`DocStore::next_id`] this session.
    last_issued: Option<u64>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element on top of the stack. An element with the same `id`
    /// is replaced in place instead, keeping its stacking position.
    pub fn insert(&mut self, element: PlacedElement) {
        match self.index_of(element.id) {
            Some(idx) => self.elements[idx] = element,
            None => self.elements.push(element),
        }
    }

    /// Return a reference to an element by id.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&PlacedElement> {
        self.elements.iter().find(|el| el.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Stacking position of an element, 0 = bottom.
    #[must_use]
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }

    /// Apply a partial update to an existing element. Returns false if the element doesn't exist.
    pub fn apply_partial(&mut self, id: ElementId, partial: &PartialElement) -> bool {
        let Some(el) = self.elements.iter_mut().find(|el| el.id == id) else {
            return false;
        };
        if let Some(x) = partial.x {
            el.x = x;
        }
        if let Some(y) = partial.y {
            el.y = y;
        }
        if let Some(w) = partial.width {
            el.width = w;
        }
        if let Some(h) = partial.height {
            el.height = h;
        }
        if let Some(r) = partial.rotation {
            el.rotation = r;
        }
        true
    }

    /// Replace all elements with a loaded layout.
    pub fn load_snapshot(&mut self, layout: Layout) {
        self.elements = layout.into_elements();
    }

    /// Copy of the current elements, in order, for saving.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PlacedElement> {
        self.elements.clone()
    }

    /// Elements in draw order (bottom first).
    #[must_use]
    pub fn elements(&self) -> &[PlacedElement] {
        &self.elements
    }

    /// Pick an id for a new element from a creation timestamp in milliseconds.
    ///
    /// The timestamp is used as-is unless it was already handed out or is
    /// taken by a loaded element; then the next value above every known id
    /// is used. When that would pass `u64::MAX`, the first free id at or
    /// above the timestamp is used instead, then the lowest free id overall.
    pub fn next_id(&mut self, now_ms: u64) -> ElementId {
        let floor = self.last_issued.and_then(|last| last.checked_add(1)).unwrap_or(0);
        let candidate = now_ms.max(floor);
        let id = if self.contains(ElementId(candidate)) {
            self.highest_id()
                .and_then(|highest| highest.checked_add(1))
                .map(|above| above.max(candidate))
                .or_else(|| self.first_free_from(candidate))
                .or_else(|| self.first_free_from(0))
                .unwrap_or(candidate)
        } else {
            candidate
        };
        self.last_issued = Some(id);
        ElementId(id)
    }

    fn highest_id(&self) -> Option<u64> {
        self.elements.iter().map(|el| el.id.0).max()
    }

    /// Smallest id `>= start` not held by any element, if one exists below `u64::MAX`.
    fn first_free_from(&self, start: u64) -> Option<u64> {
        let mut taken: Vec<u64> = self.elements.iter().map(|el| el.id.0).filter(|&id| id >= start).collect();
        taken.sort_unstable();
        taken.dedup();

        let mut free = start;
        for id in taken {
            if id != free {
                break;
            }
            free = free.checked_add(1)?;
        }
        Some(free)
    }

    /// Number of elements currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
