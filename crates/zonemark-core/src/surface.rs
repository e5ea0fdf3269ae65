//! Drawing surface capability consumed by the region store and the
//! interaction controller.
//!
//! The core never renders anything itself. It asks a [`Surface`] to create,
//! move, restyle and delete rectangles, and refers to them afterwards only
//! through opaque [`ShapeHandle`]s.

use kurbo::Rect;
use peniko::Color;
use std::collections::HashMap;

/// Opaque reference to a rectangle living on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeHandle(u64);

impl ShapeHandle {
    /// Wrap a surface-specific identifier.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The surface-specific identifier.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Visual state a rectangle is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegionStyle {
    /// Committed region, not selected.
    #[default]
    Normal,
    /// The selected region.
    Selected,
    /// Region being moved or resized.
    Active,
    /// Uncommitted box while it is being drawn.
    Preview,
    /// Small square marking a resizable corner.
    CornerIndicator,
}

/// Stroke parameters a surface should use for a [`RegionStyle`].
#[derive(Debug, Clone, Copy)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// Dash pattern (on, off) in pixels; `None` for a solid line.
    pub dash: Option<[f64; 2]>,
    /// Whether the rectangle is filled with `color`.
    pub filled: bool,
}

impl RegionStyle {
    /// Stroke used to paint this style.
    pub fn stroke(self) -> Stroke {
        let red = Color::from_rgba8(220, 38, 38, 255);
        let blue = Color::from_rgba8(37, 99, 235, 255);
        let green = Color::from_rgba8(22, 163, 74, 255);
        let (color, width, dash, filled) = match self {
            RegionStyle::Normal => (red, 2.0, None, false),
            RegionStyle::Selected => (blue, 2.0, None, false),
            RegionStyle::Active => (green, 2.0, None, false),
            RegionStyle::Preview => (red, 1.0, Some([3.0, 2.0]), false),
            RegionStyle::CornerIndicator => (green, 1.0, None, true),
        };
        Stroke {
            color,
            width,
            dash,
            filled,
        }
    }
}

/// Pointer cursor the surface should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    #[default]
    Default,
    /// Diagonal resize, top-left <-> bottom-right.
    ResizeNwSe,
    /// Diagonal resize, top-right <-> bottom-left.
    ResizeNeSw,
    /// Whole-region move.
    Move,
}

/// Drawing capability provided by the host.
///
/// All rectangles are given in **viewport** space, not document space: the
/// store converts region coordinates through its [`CoordinateTransformer`]
/// before every call and redraws after [`RegionStore::set_transform`].
/// Hosts paint them as-is and never apply zoom or offset themselves.
///
/// [`CoordinateTransformer`]: crate::transform::CoordinateTransformer
/// [`RegionStore::set_transform`]: crate::store::RegionStore::set_transform
pub trait Surface {
    /// Draw a new rectangle and return its handle.
    fn draw_rect(&mut self, rect: Rect, style: RegionStyle) -> ShapeHandle;

    /// Reposition an existing rectangle without changing its stacking order.
    fn move_rect(&mut self, handle: ShapeHandle, rect: Rect);

    /// Change how an existing rectangle is painted.
    fn set_rect_style(&mut self, handle: ShapeHandle, style: RegionStyle);

    /// Delete a rectangle. Deleting an absent handle is a no-op.
    fn delete_rect(&mut self, handle: ShapeHandle);

    /// Change the pointer cursor.
    fn set_cursor(&mut self, _cursor: CursorShape) {}
}

/// Surface that draws nothing, for headless use.
#[derive(Debug, Default)]
pub struct NullSurface {
    next: u64,
}

impl NullSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for NullSurface {
    fn draw_rect(&mut self, _rect: Rect, _style: RegionStyle) -> ShapeHandle {
        self.next += 1;
        ShapeHandle::new(self.next)
    }

    fn move_rect(&mut self, _handle: ShapeHandle, _rect: Rect) {}

    fn set_rect_style(&mut self, _handle: ShapeHandle, _style: RegionStyle) {}

    fn delete_rect(&mut self, _handle: ShapeHandle) {}
}

/// A rectangle kept by a [`RecordingSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedRect {
    pub rect: Rect,
    pub style: RegionStyle,
}

/// In-memory surface that remembers every live rectangle.
///
/// Useful for tests and for hosts that repaint from a retained list.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next: u64,
    shapes: HashMap<ShapeHandle, RecordedRect>,
    /// Handles in creation order, back to front.
    stack: Vec<ShapeHandle>,
    cursor: CursorShape,
    deletes: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a live rectangle.
    pub fn get(&self, handle: ShapeHandle) -> Option<&RecordedRect> {
        self.shapes.get(&handle)
    }

    /// Whether `handle` is still on the surface.
    pub fn contains(&self, handle: ShapeHandle) -> bool {
        self.shapes.contains_key(&handle)
    }

    /// Number of live rectangles.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Live rectangles in stacking order, back to front.
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeHandle, &RecordedRect)> {
        self.stack
            .iter()
            .filter_map(|h| self.shapes.get(h).map(|r| (*h, r)))
    }

    /// Live rectangles drawn with `style`.
    pub fn count_style(&self, style: RegionStyle) -> usize {
        self.shapes.values().filter(|r| r.style == style).count()
    }

    /// Cursor last requested by the core.
    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    /// Number of effective deletions so far.
    pub fn delete_count(&self) -> usize {
        self.deletes
    }
}

impl Surface for RecordingSurface {
    fn draw_rect(&mut self, rect: Rect, style: RegionStyle) -> ShapeHandle {
        self.next += 1;
        let handle = ShapeHandle::new(self.next);
        self.shapes.insert(handle, RecordedRect { rect, style });
        self.stack.push(handle);
        handle
    }

    fn move_rect(&mut self, handle: ShapeHandle, rect: Rect) {
        if let Some(shape) = self.shapes.get_mut(&handle) {
            shape.rect = rect;
        }
    }

    fn set_rect_style(&mut self, handle: ShapeHandle, style: RegionStyle) {
        if let Some(shape) = self.shapes.get_mut(&handle) {
            shape.style = style;
        }
    }

    fn delete_rect(&mut self, handle: ShapeHandle) {
        if self.shapes.remove(&handle).is_some() {
            self.stack.retain(|&h| h != handle);
            self.deletes += 1;
        }
    }

    fn set_cursor(&mut self, cursor: CursorShape) {
        self.cursor = cursor;
    }
}
