#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

/// A point in either client (page) or canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Mapping from client coordinates (DOM pointer events) to canvas coordinates.
///
/// `origin_x` / `origin_y` are the canvas element's top-left corner in client
/// pixels. `scale_x` / `scale_y` convert CSS pixels to backing-store pixels;
/// they are 1.0 when the element is displayed at its intrinsic size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub origin_x: f64,
    pub origin_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { origin_x: 0.0, origin_y: 0.0, scale_x: 1.0, scale_y: 1.0 }
    }
}

impl Camera {
    /// Build a camera from the element's client rectangle and its backing size.
    ///
    /// A zero-sized client rectangle (element not laid out yet) keeps a unit scale.
    #[must_use]
    pub fn from_client_rect(
        left: f64,
        top: f64,
        css_width: f64,
        css_height: f64,
        canvas_width: f64,
        canvas_height: f64,
    ) -> Self {
        Self {
            origin_x: left,
            origin_y: top,
            scale_x: ratio(canvas_width, css_width),
            scale_y: ratio(canvas_height, css_height),
        }
    }

    /// Convert a client-space point to canvas coordinates.
    #[must_use]
    pub fn client_to_canvas(&self, client: Point) -> Point {
        Point {
            x: (client.x - self.origin_x) * self.scale_x,
            y: (client.y - self.origin_y) * self.scale_y,
        }
    }

    /// Convert a canvas-space point back to client coordinates.
    #[must_use]
    pub fn canvas_to_client(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x / self.scale_x + self.origin_x,
            y: canvas.y / self.scale_y + self.origin_y,
        }
    }
}

fn ratio(backing: f64, css: f64) -> f64 {
    if css > 0.0 && backing > 0.0 { backing / css } else { 1.0 }
}
