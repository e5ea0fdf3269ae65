//! Corner handles for resizing regions.

use crate::surface::CursorShape;
use crate::transform::normalize_rect;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Per-axis distance, in viewport pixels, within which a corner is grabbed.
pub const CORNER_THRESHOLD: f64 = 20.0;
/// Half the side of a corner indicator square, in viewport pixels.
pub const INDICATOR_HALF_SIZE: f64 = 6.0;

/// Corner positions, in hit-test priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Where this corner sits on `rect`.
    pub fn position(self, rect: Rect) -> Point {
        match self {
            Corner::TopLeft => Point::new(rect.x0, rect.y0),
            Corner::TopRight => Point::new(rect.x1, rect.y0),
            Corner::BottomLeft => Point::new(rect.x0, rect.y1),
            Corner::BottomRight => Point::new(rect.x1, rect.y1),
        }
    }

    /// Resize cursor shown while hovering or dragging this corner.
    pub fn cursor(self) -> CursorShape {
        match self {
            Corner::TopLeft | Corner::BottomRight => CursorShape::ResizeNwSe,
            Corner::TopRight | Corner::BottomLeft => CursorShape::ResizeNeSw,
        }
    }

    /// Drag this corner of `original` to `pointer`.
    ///
    /// The opposite corner stays fixed. The result is normalized, so dragging
    /// past the opposite edge flips the box.
    pub fn resize(self, original: Rect, pointer: Point) -> Rect {
        let o = original;
        let (px, py) = (pointer.x, pointer.y);
        let raw = match self {
            Corner::TopLeft => Rect::new(px, py, o.x1, o.y1),
            Corner::TopRight => Rect::new(o.x0, py, px, o.y1),
            Corner::BottomLeft => Rect::new(px, o.y0, o.x1, py),
            Corner::BottomRight => Rect::new(o.x0, o.y0, px, py),
        };
        normalize_rect(raw)
    }
}

/// First corner of `rect` within `threshold` of `point` on both axes.
pub fn corner_at(rect: Rect, point: Point, threshold: f64) -> Option<Corner> {
    Corner::ALL.into_iter().find(|corner| {
        let c = corner.position(rect);
        (point.x - c.x).abs() <= threshold && (point.y - c.y).abs() <= threshold
    })
}

/// Indicator squares centred on each corner of `rect`.
pub fn indicator_rects(rect: Rect, half_size: f64) -> [Rect; 4] {
    Corner::ALL.map(|corner| {
        let c = corner.position(rect);
        Rect::new(c.x - half_size, c.y - half_size, c.x + half_size, c.y + half_size)
    })
}
