//! Region store: ordered, uniquely labelled regions and their visuals.

use crate::events::RegionEvent;
use crate::region::{Region, RegionError, RegionResult, validate_label};
use crate::storage::{LoadReport, RegionConfig, RegionEntry, StorageError, parse_config};
use crate::surface::{RegionStyle, Surface};
use crate::transform::{CoordinateTransformer, TransformState, normalize_rect};
use crate::validator::{Domain, DuplicateValidator};
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// Owns every region, their display/export order and the selection.
///
/// Invariants kept by every operation:
/// - `order` is a permutation of the keys of `regions`;
/// - `selected`, when set, names a live region;
/// - each live region has exactly one surface handle.
pub struct RegionStore<S: Surface> {
    regions: HashMap<String, Region>,
    order: Vec<String>,
    selected: Option<String>,
    validator: DuplicateValidator,
    transformer: CoordinateTransformer,
    surface: S,
    events: Vec<RegionEvent>,
}

impl<S: Surface> RegionStore<S> {
    /// Create an empty store drawing on `surface`.
    pub fn new(surface: S) -> Self {
        Self::with_transformer(surface, CoordinateTransformer::new())
    }

    /// Create an empty store with an explicit transformer.
    pub fn with_transformer(surface: S, transformer: CoordinateTransformer) -> Self {
        Self {
            regions: HashMap::new(),
            order: Vec::new(),
            selected: None,
            validator: DuplicateValidator::new(),
            transformer,
            surface,
            events: Vec::new(),
        }
    }

    pub fn transformer(&self) -> &CoordinateTransformer {
        &self.transformer
    }

    /// Update the transform and redraw every region at its new position.
    pub fn set_transform(&mut self, state: TransformState) {
        self.transformer.set_state(state);
        self.redraw_all();
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Look up a region by label.
    pub fn region(&self, label: &str) -> Option<&Region> {
        self.regions.get(label)
    }

    /// Labels in display/export order.
    pub fn labels(&self) -> &[String] {
        &self.order
    }

    /// Position of `label` in the order.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.order.iter().position(|l| l == label)
    }

    /// Regions in display/export order.
    pub fn regions_ordered(&self) -> impl Iterator<Item = &Region> {
        self.order.iter().filter_map(|label| self.regions.get(label))
    }

    /// `(label, coords)` pairs in export order.
    pub fn ordered_regions(&self) -> Vec<(String, Rect)> {
        self.regions_ordered()
            .map(|r| (r.label.clone(), r.coords))
            .collect()
    }

    /// Currently selected label.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Drain pending notifications.
    pub fn poll_events(&mut self) -> Vec<RegionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add a region. `coords` may be given in any corner order.
    pub fn add_region(&mut self, label: &str, coords: Rect) -> RegionResult<()> {
        validate_label(label)?;
        if !self.validator.add(Domain::Label, label) {
            return Err(RegionError::DuplicateLabel(label.to_string()));
        }

        let mut region = Region::new(label.to_string(), coords);
        let viewport = self.transformer.document_rect_to_viewport(region.coords);
        region.handle = Some(self.surface.draw_rect(viewport, RegionStyle::Normal));

        let coords = region.coords;
        self.regions.insert(label.to_string(), region);
        self.order.push(label.to_string());
        log::debug!("Added region {label:?} at {coords:?}");
        self.events.push(RegionEvent::Added {
            label: label.to_string(),
            coords,
        });
        Ok(())
    }

    /// Rename a region in place. The store is unchanged on failure.
    pub fn rename_region(&mut self, old: &str, new: &str) -> RegionResult<()> {
        if !self.regions.contains_key(old) {
            return Err(RegionError::NotFound(old.to_string()));
        }
        validate_label(new)?;
        if new == old {
            return Ok(());
        }
        if !self.validator.rename(Domain::Label, old, new) {
            return Err(RegionError::DuplicateLabel(new.to_string()));
        }

        if let Some(mut region) = self.regions.remove(old) {
            region.label = new.to_string();
            self.regions.insert(new.to_string(), region);
        }
        if let Some(slot) = self.order.iter_mut().find(|l| l.as_str() == old) {
            *slot = new.to_string();
        }
        if self.selected.as_deref() == Some(old) {
            self.selected = Some(new.to_string());
        }

        log::debug!("Renamed region {old:?} -> {new:?}");
        self.events.push(RegionEvent::Renamed {
            old: old.to_string(),
            new: new.to_string(),
        });
        Ok(())
    }

    /// Replace a region's coordinates and reposition its shape.
    ///
    /// Consecutive updates of the same region collapse into one
    /// [`RegionEvent::Changed`]. Returns false if `label` does not exist.
    pub fn update_coords(&mut self, label: &str, coords: Rect) -> bool {
        let Some(region) = self.regions.get_mut(label) else {
            log::warn!("Cannot update coords of unknown region {label:?}");
            return false;
        };
        region.coords = normalize_rect(coords);
        let coords = region.coords;
        if let Some(handle) = region.handle {
            let viewport = self.transformer.document_rect_to_viewport(coords);
            self.surface.move_rect(handle, viewport);
        }
        // A drag updates at pointer rate; keep one pending change per label
        match self.events.last_mut() {
            Some(RegionEvent::Changed {
                label: last,
                coords: last_coords,
            }) if last.as_str() == label => *last_coords = coords,
            _ => self.events.push(RegionEvent::Changed {
                label: label.to_string(),
                coords,
            }),
        }
        true
    }

    /// Delete a region and release its shape.
    pub fn remove_region(&mut self, label: &str) -> bool {
        let Some(region) = self.regions.remove(label) else {
            return false;
        };
        if let Some(handle) = region.handle {
            self.surface.delete_rect(handle);
        }
        self.order.retain(|l| l != label);
        self.validator.remove(Domain::Label, label);
        if self.selected.as_deref() == Some(label) {
            self.selected = None;
            self.events.push(RegionEvent::SelectionChanged { selected: None });
        }

        log::debug!("Removed region {label:?}");
        self.events.push(RegionEvent::Removed {
            label: label.to_string(),
        });
        true
    }

    /// Delete every region, releasing each shape once.
    pub fn clear_all(&mut self) {
        for label in &self.order {
            if let Some(handle) = self.regions.get(label).and_then(|r| r.handle) {
                self.surface.delete_rect(handle);
            }
        }
        let had_selection = self.selected.take().is_some();
        self.regions.clear();
        self.order.clear();
        self.validator.clear(Domain::Label);

        if had_selection {
            self.events.push(RegionEvent::SelectionChanged { selected: None });
        }
        self.events.push(RegionEvent::Cleared);
    }

    /// Move the label at `from` so it ends up at index `to`.
    ///
    /// Both indices must be in `0..len`; nothing is clamped or wrapped.
    pub fn move_in_order(&mut self, from: usize, to: usize) -> bool {
        let len = self.order.len();
        if from >= len || to >= len {
            return false;
        }
        let label = self.order.remove(from);
        self.order.insert(to, label);
        self.events.push(RegionEvent::Reordered { from, to });
        true
    }

    /// Topmost region containing a document-space point (boundary inclusive).
    pub fn hit_test(&self, point: Point) -> Option<&str> {
        self.order
            .iter()
            .rev()
            .find(|label| self.regions.get(*label).is_some_and(|r| r.contains(point)))
            .map(String::as_str)
    }

    /// Topmost region under a viewport-space point.
    pub fn hit_test_viewport(&self, point: Point) -> Option<&str> {
        self.hit_test(self.transformer.viewport_to_document(point))
    }

    /// Select a region. Returns false if it does not exist.
    pub fn select(&mut self, label: &str) -> bool {
        if !self.regions.contains_key(label) {
            return false;
        }
        if let Some(previous) = self.selected.take() {
            self.apply_style(&previous, RegionStyle::Normal);
        }
        self.apply_style(label, RegionStyle::Selected);
        self.selected = Some(label.to_string());
        self.events.push(RegionEvent::SelectionChanged {
            selected: Some(label.to_string()),
        });
        true
    }

    /// Drop the selection, restoring the default look.
    pub fn clear_selection(&mut self) {
        if let Some(previous) = self.selected.take() {
            self.apply_style(&previous, RegionStyle::Normal);
            self.events.push(RegionEvent::SelectionChanged { selected: None });
        }
    }

    /// Style a region's shape directly. Returns false if it does not exist.
    pub fn set_region_style(&mut self, label: &str, style: RegionStyle) -> bool {
        if !self.regions.contains_key(label) {
            return false;
        }
        self.apply_style(label, style);
        true
    }

    /// The style a region shows when no interaction is in progress.
    pub fn resting_style(&self, label: &str) -> RegionStyle {
        if self.selected.as_deref() == Some(label) {
            RegionStyle::Selected
        } else {
            RegionStyle::Normal
        }
    }

    fn apply_style(&mut self, label: &str, style: RegionStyle) {
        if let Some(handle) = self.regions.get(label).and_then(|r| r.handle) {
            self.surface.set_rect_style(handle, style);
        }
    }

    /// Recreate every shape, e.g. after the page was re-rendered.
    pub fn redraw_all(&mut self) {
        for label in &self.order {
            let Some(region) = self.regions.get_mut(label) else {
                continue;
            };
            if let Some(handle) = region.handle.take() {
                self.surface.delete_rect(handle);
            }
            let style = if self.selected.as_deref() == Some(label.as_str()) {
                RegionStyle::Selected
            } else {
                RegionStyle::Normal
            };
            let viewport = self.transformer.document_rect_to_viewport(region.coords);
            region.handle = Some(self.surface.draw_rect(viewport, style));
        }
    }

    /// Snapshot of the persisted state.
    pub fn serialize(&self) -> RegionConfig {
        RegionConfig {
            regions: self
                .regions
                .iter()
                .map(|(label, r)| (label.clone(), RegionEntry::from_rect(r.coords)))
                .collect(),
            order: self.order.clone(),
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, StorageError> {
        self.serialize()
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Replace the store's contents with `config`.
    ///
    /// Regions are re-added one by one in `order` through [`Self::add_region`],
    /// so duplicates and invalid labels are dropped rather than loaded.
    pub fn load_config(&mut self, config: &RegionConfig) -> LoadReport {
        self.clear_all();

        let mut report = LoadReport::default();
        for label in &config.order {
            let Some(entry) = config.regions.get(label) else {
                report.skipped.push(format!("{label}: no region entry"));
                continue;
            };
            match self.add_region(label, entry.rect()) {
                Ok(()) => report.loaded += 1,
                Err(e) => report.skipped.push(format!("{label}: {e}")),
            }
        }

        for skipped in &report.skipped {
            log::warn!("Skipped region while loading: {skipped}");
        }
        self.events.push(RegionEvent::Loaded {
            count: report.loaded,
        });
        report
    }

    /// Parse and load a configuration document.
    ///
    /// Malformed entries are skipped; only text that is not a JSON object is
    /// an error, in which case the store is left untouched.
    pub fn load_json(&mut self, json: &str) -> Result<LoadReport, StorageError> {
        let (config, mut skipped) = parse_config(json)?;
        let mut report = self.load_config(&config);
        skipped.append(&mut report.skipped);
        report.skipped = skipped;
        log::info!("Loaded {} regions", report.loaded);
        Ok(report)
    }

    /// Check the structural invariants. Used by tests.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.order.len(), self.regions.len());
        let mut seen = std::collections::HashSet::new();
        for label in &self.order {
            assert!(seen.insert(label), "duplicate label {label:?} in order");
            assert!(self.regions.contains_key(label));
            assert!(self.validator.is_duplicate(Domain::Label, label));
        }
        assert_eq!(self.validator.len(Domain::Label), self.regions.len());
        if let Some(selected) = &self.selected {
            assert!(self.regions.contains_key(selected));
        }
    }
}
