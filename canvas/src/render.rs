//! Rendering: draws the full floor plan to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads document and UI state and never mutates it.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{BACKGROUND_COLOR, HANDLE_COLOR, OUTLINE_WIDTH};
use crate::doc::{DocStore, ElementKind, PlacedElement};
use crate::hit;
use crate::input::UiState;

/// Outline of an element kind, drawn centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rect,
    /// Circle of radius `width / 2`.
    Circle,
}

/// Fixed appearance of an element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindStyle {
    pub shape: Shape,
    pub fill: &'static str,
    pub stroke: Option<&'static str>,
}

#[must_use]
pub fn kind_style(kind: ElementKind) -> KindStyle {
    match kind {
        ElementKind::Table => KindStyle { shape: Shape::Rect, fill: "#6b4f4f", stroke: None },
        ElementKind::Chair => KindStyle { shape: Shape::Circle, fill: "#8d6e63", stroke: None },
        ElementKind::Door => KindStyle { shape: Shape::Rect, fill: "#c4a79d", stroke: Some("#5c4033") },
    }
}

/// Draw the full scene: background, elements in order, then the handle of
/// the selected element on top of it.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    doc: &DocStore,
    ui: &UiState,
    width: f64,
    height: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, width, height);
    ctx.set_fill_style_str(BACKGROUND_COLOR);
    ctx.fill_rect(0.0, 0.0, width, height);

    for el in doc.elements() {
        draw_element(ctx, el)?;
        if ui.selected_id == Some(el.id) {
            draw_handle(ctx, el);
        }
    }
    Ok(())
}

fn draw_element(ctx: &CanvasRenderingContext2d, el: &PlacedElement) -> Result<(), JsValue> {
    let style = kind_style(el.kind);
    let (cx, cy) = el.center();
    let (hw, hh) = (el.width / 2.0, el.height / 2.0);

    ctx.save();
    ctx.translate(cx, cy)?;
    ctx.rotate(f64::from(el.rotation).to_radians())?;
    ctx.set_fill_style_str(style.fill);

    match style.shape {
        Shape::Rect => ctx.fill_rect(-hw, -hh, el.width, el.height),
        Shape::Circle => {
            ctx.begin_path();
            ctx.arc(0.0, 0.0, hw, 0.0, 2.0 * PI)?;
            ctx.fill();
        }
    }

    if let Some(stroke) = style.stroke {
        ctx.set_stroke_style_str(stroke);
        ctx.set_line_width(OUTLINE_WIDTH);
        ctx.stroke_rect(-hw, -hh, el.width, el.height);
    }

    ctx.restore();
    Ok(())
}

fn draw_handle(ctx: &CanvasRenderingContext2d, el: &PlacedElement) {
    let rect = hit::handle_rect(el);
    ctx.set_fill_style_str(HANDLE_COLOR);
    ctx.fill_rect(rect.x, rect.y, rect.size, rect.size);
}
