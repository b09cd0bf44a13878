//! Shared floor-plan model and JSON boundary validation.
//!
//! This crate owns the wire representation used by both the layout store
//! (`floorplan`) and the editor (`canvas`). A layout travels as a bare JSON
//! array of placed elements; [`Layout::from_value`] is the single entry point
//! that turns untrusted JSON into a typed, invariant-checked [`Layout`].

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Smallest width or height an element may have, in canvas pixels.
pub const MIN_ELEMENT_SIZE: f64 = 10.0;

/// Rotation increment in degrees.
pub const ROTATION_STEP_DEG: u16 = 45;

/// One full turn in degrees; rotations are kept in `[0, FULL_TURN_DEG)`.
pub const FULL_TURN_DEG: u16 = 360;

/// Error returned when a JSON document cannot become a [`Layout`].
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// The raw bytes are not JSON at all.
    #[error("layout is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    /// The document parsed, but its top level is not an array.
    #[error("layout must be a JSON array of elements")]
    NotAnArray,
    /// An array entry does not have the shape of a placed element.
    #[error("element {index} is malformed: {source}")]
    Malformed {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    /// An array entry has the right shape but breaks an element invariant.
    #[error("element {index} is invalid: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: ElementError,
    },
    /// Two entries share the same id.
    #[error("duplicate element id {0}")]
    DuplicateId(ElementId),
}

/// Invariant violations on a single [`PlacedElement`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ElementError {
    #[error("field `{0}` must be a finite number")]
    NonFinite(&'static str),
    #[error("size {width}x{height} is below the {min} minimum", min = MIN_ELEMENT_SIZE)]
    TooSmall { width: f64, height: f64 },
    #[error("rotation {0} is not a multiple of {step} in [0, {turn})", step = ROTATION_STEP_DEG, turn = FULL_TURN_DEG)]
    Rotation(u16),
}

/// Creation-time token identifying an element (epoch milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The closed set of furniture symbols.
///
/// The wire labels are the English names. The labels used by the first
/// version of the editor are still accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    #[serde(alias = "Meja")]
    Table,
    #[serde(alias = "Kursi")]
    Chair,
    #[serde(alias = "Pintu")]
    Door,
}

impl ElementKind {
    /// Every kind, in palette order.
    pub const ALL: [Self; 3] = [Self::Table, Self::Chair, Self::Door];

    /// Wire label for this kind.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Table => "Table",
            Self::Chair => "Chair",
            Self::Door => "Door",
        }
    }

    /// Parse a palette drag payload or wire label. Accepts legacy labels.
    #[must_use]
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Table" | "Meja" => Some(Self::Table),
            "Chair" | "Kursi" => Some(Self::Chair),
            "Door" | "Pintu" => Some(Self::Door),
            _ => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One furniture instance placed on the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Left edge of the un-rotated bounding box.
    pub x: f64,
    /// Top edge of the un-rotated bounding box.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees around the box center.
    pub rotation: u16,
}

impl PlacedElement {
    /// Check the per-element invariants: finite geometry, minimum size, and
    /// a rotation on the 45° grid.
    ///
    /// # Errors
    ///
    /// Returns the first [`ElementError`] found.
    pub fn validate(&self) -> Result<(), ElementError> {
        for (field, value) in [("x", self.x), ("y", self.y), ("width", self.width), ("height", self.height)] {
            if !value.is_finite() {
                return Err(ElementError::NonFinite(field));
            }
        }
        if self.width < MIN_ELEMENT_SIZE || self.height < MIN_ELEMENT_SIZE {
            return Err(ElementError::TooSmall { width: self.width, height: self.height });
        }
        if self.rotation >= FULL_TURN_DEG || self.rotation % ROTATION_STEP_DEG != 0 {
            return Err(ElementError::Rotation(self.rotation));
        }
        Ok(())
    }

    /// Center of the un-rotated bounding box.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A validated, ordered floor plan. Order is z-order: later elements draw on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Layout {
    elements: Vec<PlacedElement>,
}

impl Layout {
    /// An empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layout from already-typed elements, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Invalid`] or [`LayoutError::DuplicateId`].
    pub fn from_elements(elements: Vec<PlacedElement>) -> Result<Self, LayoutError> {
        let mut seen = HashSet::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            element
                .validate()
                .map_err(|source| LayoutError::Invalid { index, source })?;
            if !seen.insert(element.id) {
                return Err(LayoutError::DuplicateId(element.id));
            }
        }
        Ok(Self { elements })
    }

    /// Parse untrusted JSON into a layout.
    ///
    /// Unknown fields on an element are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NotAnArray`] when the top level is not an
    /// array, [`LayoutError::Malformed`] for entries that do not deserialize,
    /// and the [`Layout::from_elements`] errors for invariant violations.
    pub fn from_value(value: Value) -> Result<Self, LayoutError> {
        let Value::Array(items) = value else {
            return Err(LayoutError::NotAnArray);
        };

        let elements = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<PlacedElement>(item).map_err(|source| LayoutError::Malformed { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_elements(elements)
    }

    /// Parse raw JSON bytes into a layout.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Json`] for non-JSON input, otherwise the
    /// [`Layout::from_value`] errors.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, LayoutError> {
        let value: Value = serde_json::from_slice(bytes).map_err(LayoutError::Json)?;
        Self::from_value(value)
    }

    /// Elements in z-order.
    #[must_use]
    pub fn elements(&self) -> &[PlacedElement] {
        &self.elements
    }

    /// Consume the layout, returning its elements.
    #[must_use]
    pub fn into_elements(self) -> Vec<PlacedElement> {
        self.elements
    }

    /// Look up an element by id.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&PlacedElement> {
        self.elements.iter().find(|el| el.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
