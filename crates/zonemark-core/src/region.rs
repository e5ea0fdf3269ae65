//! Named extraction regions and label validation.

use crate::surface::ShapeHandle;
use crate::transform::normalize_rect;
use kurbo::{Point, Rect};
use thiserror::Error;

/// Maximum label length, in characters.
pub const MAX_LABEL_LEN: usize = 100;

/// Why a region operation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("Label cannot be empty")]
    EmptyLabel,
    #[error("Label cannot be only whitespace")]
    WhitespaceLabel,
    #[error("Label too long (max 100 characters)")]
    LabelTooLong,
    #[error("This label already exists: {0}")]
    DuplicateLabel(String),
    #[error("Region not found: {0}")]
    NotFound(String),
}

/// Result type for region operations.
pub type RegionResult<T> = Result<T, RegionError>;

/// Check the shape of a label, without looking at existing labels.
pub fn validate_label(label: &str) -> RegionResult<()> {
    if label.is_empty() {
        return Err(RegionError::EmptyLabel);
    }
    if label.trim().is_empty() {
        return Err(RegionError::WhitespaceLabel);
    }
    if label.chars().count() > MAX_LABEL_LEN {
        return Err(RegionError::LabelTooLong);
    }
    Ok(())
}

/// A labelled rectangle in document space.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub(crate) label: String,
    /// Normalized document-space box.
    pub(crate) coords: Rect,
    /// Surface rectangle showing this region.
    pub(crate) handle: Option<ShapeHandle>,
}

impl Region {
    pub(crate) fn new(label: String, coords: Rect) -> Self {
        Self {
            label,
            coords: normalize_rect(coords),
            handle: None,
        }
    }

    /// The region's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Document-space box, always normalized.
    pub fn coords(&self) -> Rect {
        self.coords
    }

    /// Surface handle, if the region is currently drawn.
    pub fn handle(&self) -> Option<ShapeHandle> {
        self.handle
    }

    /// Inclusive containment test in document space.
    pub fn contains(&self, point: Point) -> bool {
        let r = self.coords;
        r.x0 <= point.x && point.x <= r.x1 && r.y0 <= point.y && point.y <= r.y1
    }
}
