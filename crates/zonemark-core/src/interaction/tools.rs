//! Selection tools: word picking and box drawing.

use crate::region::RegionResult;
use crate::store::RegionStore;
use crate::surface::{ShapeHandle, Surface};
use crate::transform::normalize_rect;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Tool that handles presses not claimed by resize/move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SelectionTool {
    /// Click a word to propose its bounding box.
    #[default]
    Word,
    /// Drag out a rectangle.
    Box,
}

/// Editing mode chosen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mode {
    #[default]
    Word,
    Box,
    /// Corners resize and interiors move; other presses fall through to the
    /// last selection tool.
    Resize,
}

impl Mode {
    /// Selection tool this mode switches to, if any.
    pub fn tool(self) -> Option<SelectionTool> {
        match self {
            Mode::Word => Some(SelectionTool::Word),
            Mode::Box => Some(SelectionTool::Box),
            Mode::Resize => None,
        }
    }
}

/// A word on the rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Bounding box in image space.
    pub bbox: Rect,
    pub text: String,
}

impl Word {
    pub fn new(bbox: Rect, text: impl Into<String>) -> Self {
        Self {
            bbox: normalize_rect(bbox),
            text: text.into(),
        }
    }

    /// Inclusive containment test in image space.
    pub fn contains(&self, point: Point) -> bool {
        let b = self.bbox;
        b.x0 <= point.x && point.x <= b.x1 && b.y0 <= point.y && point.y <= b.y1
    }
}

/// Words of the current page, recomputed by the host on re-render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordList {
    words: Vec<Word>,
}

impl WordList {
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    pub fn set(&mut self, words: Vec<Word>) {
        self.words = words;
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }

    /// First word whose box contains an image-space point.
    pub fn word_at(&self, point: Point) -> Option<&Word> {
        self.words.iter().find(|w| w.contains(point))
    }
}

/// A finished gesture waiting for a label.
///
/// Nothing is stored until [`PendingRegion::commit`] is called with a label.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRegion {
    /// Normalized document-space box.
    pub coords: Rect,
    /// Text of the picked word, for word picks.
    pub source_text: Option<String>,
}

impl PendingRegion {
    pub fn new(coords: Rect, source_text: Option<String>) -> Self {
        Self {
            coords: normalize_rect(coords),
            source_text,
        }
    }

    /// Store the region under `label`.
    ///
    /// `None` means the label prompt was dismissed: nothing is created and
    /// `Ok(false)` is returned.
    pub fn commit<S: Surface>(
        &self,
        store: &mut RegionStore<S>,
        label: Option<&str>,
    ) -> RegionResult<bool> {
        let Some(label) = label else {
            log::debug!("Pending region discarded");
            return Ok(false);
        };
        store.add_region(label, self.coords)?;
        Ok(true)
    }
}

/// An uncommitted rectangle being dragged out by the box tool.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxDraft {
    /// Press point in image space.
    pub anchor: Point,
    /// Latest pointer position in image space.
    pub current: Point,
    /// Dashed preview on the surface.
    pub preview: Option<ShapeHandle>,
}

impl BoxDraft {
    pub fn new(anchor: Point) -> Self {
        Self {
            anchor,
            current: anchor,
            preview: None,
        }
    }

    /// Normalized image-space box between anchor and pointer.
    pub fn image_rect(&self) -> Rect {
        normalize_rect(Rect::from_points(self.anchor, self.current))
    }
}
