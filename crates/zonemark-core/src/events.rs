//! Notifications emitted by the region store.

use kurbo::Rect;

/// Something observable changed in a [`RegionStore`](crate::store::RegionStore).
///
/// The host drains these with `poll_events` to refresh listings and trigger
/// exports.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionEvent {
    /// A region was created.
    Added { label: String, coords: Rect },
    /// A region was deleted.
    Removed { label: String },
    /// A region changed its label, keeping its position.
    Renamed { old: String, new: String },
    /// A region's coordinates changed.
    Changed { label: String, coords: Rect },
    /// The display/export order changed.
    Reordered { from: usize, to: usize },
    /// The selected region changed.
    SelectionChanged { selected: Option<String> },
    /// Every region was removed at once.
    Cleared,
    /// A configuration was loaded.
    Loaded { count: usize },
}
