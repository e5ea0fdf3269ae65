//! Coordinate transforms between document, image and viewport space.
//!
//! Document space is the page at its native size. Image space is the
//! rasterized page at `zoom * scale`. Viewport space is image space shifted
//! by the pan/centering offset.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Default render zoom applied on top of the user scale.
pub const DEFAULT_ZOOM: f64 = 2.0;
/// Default user scale (100%).
pub const DEFAULT_SCALE: f64 = 1.0;
/// Default multiplicative step for [`CoordinateTransformer::zoom_in`] and
/// [`CoordinateTransformer::zoom_out`].
pub const ZOOM_STEP: f64 = 1.1;

/// Return `rect` with `x0 <= x1` and `y0 <= y1`.
///
/// The extreme values are preserved, only their assignment changes.
pub fn normalize_rect(rect: Rect) -> Rect {
    Rect::new(
        rect.x0.min(rect.x1),
        rect.y0.min(rect.y1),
        rect.x0.max(rect.x1),
        rect.y0.max(rect.y1),
    )
}

/// Parameters of the document -> viewport mapping.
///
/// Written by the render layer whenever the page is re-rasterized or panned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    /// Base render zoom.
    pub zoom: f64,
    /// User scale on top of `zoom`.
    pub scale: f64,
    /// Offset of the image origin inside the viewport.
    pub offset: Vec2,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            scale: DEFAULT_SCALE,
            offset: Vec2::ZERO,
        }
    }
}

impl TransformState {
    /// Create a transform state.
    pub fn new(zoom: f64, scale: f64, offset: Vec2) -> Self {
        Self { zoom, scale, offset }
    }

    /// Combined document -> image factor.
    pub fn factor(&self) -> f64 {
        self.zoom * self.scale
    }
}

/// Converts points between the three coordinate spaces.
///
/// Every conversion is a pure function of the current [`TransformState`],
/// cheap enough to run on each pointer-move event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinateTransformer {
    state: TransformState,
    #[serde(default = "default_zoom_step")]
    zoom_step: f64,
}

fn default_zoom_step() -> f64 {
    ZOOM_STEP
}

impl Default for CoordinateTransformer {
    fn default() -> Self {
        Self::with_state(TransformState::default())
    }
}

impl CoordinateTransformer {
    /// Create a transformer with the default zoom and scale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transformer from an explicit state.
    pub fn with_state(state: TransformState) -> Self {
        Self {
            state,
            zoom_step: ZOOM_STEP,
        }
    }

    /// Use `step` for [`zoom_in`](Self::zoom_in) and [`zoom_out`](Self::zoom_out).
    /// Steps that are not above 1 keep the default.
    pub fn with_zoom_step(mut self, step: f64) -> Self {
        self.zoom_step = if step > 1.0 { step } else { ZOOM_STEP };
        self
    }

    pub fn zoom_step(&self) -> f64 {
        self.zoom_step
    }

    /// Current transform state.
    pub fn state(&self) -> TransformState {
        self.state
    }

    /// Replace the transform state.
    pub fn set_state(&mut self, state: TransformState) {
        self.state = state;
    }

    /// Replace all transform parameters at once.
    pub fn set_transform(&mut self, zoom: f64, scale: f64, offset: Vec2) {
        self.state = TransformState::new(zoom, scale, offset);
    }

    /// Factor the host must rasterize the page with.
    pub fn render_factor(&self) -> f64 {
        self.state.factor()
    }

    /// Increase the user scale by one step.
    pub fn zoom_in(&mut self) {
        self.zoom_by(self.zoom_step);
    }

    /// Decrease the user scale by one step.
    pub fn zoom_out(&mut self) {
        self.zoom_by(1.0 / self.zoom_step);
    }

    /// Multiply the user scale by `factor`. Non-positive factors are ignored.
    pub fn zoom_by(&mut self, factor: f64) {
        if factor > 0.0 {
            self.state.scale *= factor;
        }
    }

    /// Center a rendered image of `image_size` inside a viewport of `viewport_size`.
    pub fn center_in_viewport(&mut self, image_size: Size, viewport_size: Size) {
        let center_x = (viewport_size.width / 2.0).floor();
        let center_y = (viewport_size.height / 2.0).floor();
        self.state.offset = Vec2::new(
            center_x - (image_size.width / 2.0).floor(),
            center_y - (image_size.height / 2.0).floor(),
        );
    }

    /// Document space -> image space.
    pub fn document_to_image(&self, point: Point) -> Point {
        let factor = self.state.factor();
        Point::new(point.x * factor, point.y * factor)
    }

    /// Image space -> document space.
    ///
    /// A degenerate transform (`zoom * scale == 0`) maps everything to the origin.
    pub fn image_to_document(&self, point: Point) -> Point {
        let factor = self.state.factor();
        if factor == 0.0 {
            return Point::ZERO;
        }
        Point::new(point.x / factor, point.y / factor)
    }

    /// Image space -> viewport space.
    pub fn image_to_viewport(&self, point: Point) -> Point {
        point + self.state.offset
    }

    /// Viewport space -> image space.
    pub fn viewport_to_image(&self, point: Point) -> Point {
        point - self.state.offset
    }

    /// Document space -> viewport space, through image space.
    pub fn document_to_viewport(&self, point: Point) -> Point {
        self.image_to_viewport(self.document_to_image(point))
    }

    /// Viewport space -> document space, through image space.
    pub fn viewport_to_document(&self, point: Point) -> Point {
        self.image_to_document(self.viewport_to_image(point))
    }

    /// Convert a drag delta measured in the viewport to document units.
    ///
    /// Divides by `scale` only: drag deltas are relative to the already
    /// zoomed rendering.
    pub fn viewport_delta_to_document_delta(&self, delta: Vec2) -> Vec2 {
        if self.state.scale == 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(delta.x / self.state.scale, delta.y / self.state.scale)
    }

    /// Map both corners of a document rect into the viewport.
    pub fn document_rect_to_viewport(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.document_to_viewport(Point::new(rect.x0, rect.y0)),
            self.document_to_viewport(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Map both corners of a viewport rect into document space.
    pub fn viewport_rect_to_document(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.viewport_to_document(Point::new(rect.x0, rect.y0)),
            self.viewport_to_document(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Map both corners of an image rect into document space.
    pub fn image_rect_to_document(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.image_to_document(Point::new(rect.x0, rect.y0)),
            self.image_to_document(Point::new(rect.x1, rect.y1)),
        )
    }
}
