//! Pointer state machine for drawing, resizing and moving regions.
//!
//! The controller does not own the store. Every entry point borrows the
//! [`RegionStore`] it acts on, so the host keeps a single owner of region
//! data and the controller only holds gesture state.

mod handles;
mod tools;

pub use handles::{CORNER_THRESHOLD, Corner, INDICATOR_HALF_SIZE, corner_at, indicator_rects};
pub use tools::{BoxDraft, Mode, PendingRegion, SelectionTool, Word, WordList};

use crate::input::{InputState, MouseButton, PointerEvent};
use crate::settings::EditorSettings;
use crate::store::RegionStore;
use crate::surface::{CursorShape, RegionStyle, ShapeHandle, Surface};
use crate::transform::CoordinateTransformer;
use kurbo::{Point, Rect};

/// Gesture in progress.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// The box tool is dragging out a new rectangle.
    DrawingBox(BoxDraft),
    /// A corner of `label` is being dragged.
    Resizing {
        label: String,
        corner: Corner,
        /// Document-space box at press time.
        original: Rect,
    },
    /// `label` is being dragged as a whole.
    Moving {
        label: String,
        /// Viewport press point.
        anchor: Point,
        /// Document-space box at press time.
        original: Rect,
        /// The same box in viewport space, captured once.
        original_viewport: Rect,
    },
}

/// What a pointer event led to.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The event had no effect.
    Ignored,
    /// The event was consumed.
    Handled,
    /// A word was clicked; the host should prompt for a label.
    WordPicked(PendingRegion),
    /// A box was drawn; the host should prompt for a label.
    BoxCompleted(PendingRegion),
}

/// Turns viewport pointer events into region edits.
#[derive(Debug, Clone)]
pub struct InteractionController {
    mode: Mode,
    tool: SelectionTool,
    state: InteractionState,
    input: InputState,
    words: WordList,
    corner_threshold: f64,
    indicator_size: f64,
    indicators: Vec<ShapeHandle>,
    hover: Option<(String, Corner)>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::with_settings(&EditorSettings::default())
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: &EditorSettings) -> Self {
        Self {
            mode: Mode::default(),
            tool: SelectionTool::default(),
            state: InteractionState::Idle,
            input: InputState::new(settings.drag_threshold),
            words: WordList::default(),
            corner_threshold: settings.corner_threshold,
            indicator_size: settings.indicator_size,
            indicators: Vec::new(),
            hover: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Tool used for presses that do not hit a region in resize mode.
    pub fn tool(&self) -> SelectionTool {
        self.tool
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == InteractionState::Idle
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    /// Replace the page's word list after a re-render.
    pub fn set_words(&mut self, words: Vec<Word>) {
        self.words.set(words);
    }

    /// Word under a viewport point, for hover feedback in word mode.
    pub fn word_at(&self, transformer: &CoordinateTransformer, point: Point) -> Option<&Word> {
        self.words.word_at(transformer.viewport_to_image(point))
    }

    /// Switch mode. Any gesture in progress is cancelled.
    pub fn set_mode<S: Surface>(&mut self, store: &mut RegionStore<S>, mode: Mode) {
        if mode == self.mode {
            return;
        }
        self.cancel(store);
        self.clear_indicators(store);
        self.hover = None;
        store.surface_mut().set_cursor(CursorShape::Default);

        if let Some(tool) = mode.tool() {
            self.tool = tool;
        }
        log::debug!("Interaction mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
    }

    /// Feed one pointer event.
    pub fn handle_pointer_event<S: Surface>(
        &mut self,
        store: &mut RegionStore<S>,
        event: &PointerEvent,
    ) -> Outcome {
        self.input.handle_pointer_event(event);

        match *event {
            PointerEvent::Down { position, button } => {
                if button != MouseButton::Left {
                    return Outcome::Ignored;
                }
                self.on_press(store, position)
            }
            PointerEvent::Move { position } => {
                if self.input.is_button_pressed(MouseButton::Left) {
                    self.on_drag(store, position)
                } else {
                    self.on_hover(store, position)
                }
            }
            PointerEvent::Up { position, button } => {
                if button != MouseButton::Left {
                    return Outcome::Ignored;
                }
                self.on_release(store, position)
            }
            PointerEvent::Cancel => {
                if self.cancel(store) {
                    Outcome::Handled
                } else {
                    Outcome::Ignored
                }
            }
        }
    }

    /// Abort the current gesture without committing.
    ///
    /// A resize or move puts the region back where it was; a box being drawn
    /// is discarded. Returns false when there was nothing to cancel.
    pub fn cancel<S: Surface>(&mut self, store: &mut RegionStore<S>) -> bool {
        self.input.reset();
        let cancelled = self.abort_gesture(store);
        if cancelled {
            log::debug!("Gesture cancelled");
        }
        cancelled
    }

    /// Draw the four corner indicators of `label`, e.g. after it was picked
    /// from a listing. Returns false if the region does not exist.
    pub fn show_corner_indicators<S: Surface>(
        &mut self,
        store: &mut RegionStore<S>,
        label: &str,
    ) -> bool {
        if store.region(label).is_none() {
            return false;
        }
        self.clear_indicators(store);
        self.draw_indicators(store, label);
        self.hover = None;
        true
    }

    fn abort_gesture<S: Surface>(&mut self, store: &mut RegionStore<S>) -> bool {
        match std::mem::take(&mut self.state) {
            InteractionState::Idle => false,
            InteractionState::DrawingBox(draft) => {
                if let Some(handle) = draft.preview {
                    store.surface_mut().delete_rect(handle);
                }
                true
            }
            InteractionState::Resizing { label, original, .. }
            | InteractionState::Moving { label, original, .. } => {
                store.update_coords(&label, original);
                Self::finish_edit(store, &label);
                true
            }
        }
    }

    /// End a resize or move, keeping the coordinates it reached.
    fn finish_edit<S: Surface>(store: &mut RegionStore<S>, label: &str) {
        let style = store.resting_style(label);
        store.set_region_style(label, style);
        store.surface_mut().set_cursor(CursorShape::Default);
    }

    fn on_press<S: Surface>(&mut self, store: &mut RegionStore<S>, point: Point) -> Outcome {
        // A press while a gesture is live means the release was lost
        match std::mem::take(&mut self.state) {
            InteractionState::Idle => {}
            InteractionState::DrawingBox(draft) => {
                if let Some(handle) = draft.preview {
                    store.surface_mut().delete_rect(handle);
                }
                log::warn!("Discarded a box with no release");
            }
            InteractionState::Resizing { label, .. } | InteractionState::Moving { label, .. } => {
                Self::finish_edit(store, &label);
                log::warn!("Finished editing {label:?} with no release");
            }
        }
        self.clear_indicators(store);
        self.hover = None;

        if self.mode == Mode::Resize {
            if let Some((label, corner)) = self.corner_target(store, point) {
                return self.begin_resize(store, label, corner);
            }
            if let Some(label) = self.region_containing(store, point) {
                return self.begin_move(store, label, point);
            }
        }

        let transformer = store.transformer().clone();
        match self.tool {
            SelectionTool::Word => {
                let Some(word) = self.word_at(&transformer, point) else {
                    return Outcome::Ignored;
                };
                let coords = transformer.image_rect_to_document(word.bbox);
                log::debug!("Picked word {:?}", word.text);
                Outcome::WordPicked(PendingRegion::new(coords, Some(word.text.clone())))
            }
            SelectionTool::Box => {
                let anchor = transformer.viewport_to_image(point);
                self.state = InteractionState::DrawingBox(BoxDraft::new(anchor));
                Outcome::Handled
            }
        }
    }

    fn begin_resize<S: Surface>(
        &mut self,
        store: &mut RegionStore<S>,
        label: String,
        corner: Corner,
    ) -> Outcome {
        let Some(original) = store.region(&label).map(|r| r.coords()) else {
            return Outcome::Ignored;
        };
        store.set_region_style(&label, RegionStyle::Active);
        store.surface_mut().set_cursor(corner.cursor());
        log::debug!("Resizing {label:?} from {corner:?}");
        self.state = InteractionState::Resizing {
            label,
            corner,
            original,
        };
        Outcome::Handled
    }

    fn begin_move<S: Surface>(
        &mut self,
        store: &mut RegionStore<S>,
        label: String,
        anchor: Point,
    ) -> Outcome {
        let Some(original) = store.region(&label).map(|r| r.coords()) else {
            return Outcome::Ignored;
        };
        let original_viewport = store.transformer().document_rect_to_viewport(original);
        store.set_region_style(&label, RegionStyle::Active);
        store.surface_mut().set_cursor(CursorShape::Move);
        log::debug!("Moving {label:?}");
        self.state = InteractionState::Moving {
            label,
            anchor,
            original,
            original_viewport,
        };
        Outcome::Handled
    }

    fn on_drag<S: Surface>(&mut self, store: &mut RegionStore<S>, point: Point) -> Outcome {
        let transformer = store.transformer().clone();
        match &mut self.state {
            InteractionState::Idle => Outcome::Ignored,
            InteractionState::DrawingBox(draft) => {
                draft.current = transformer.viewport_to_image(point);
                let rect = Rect::from_points(
                    transformer.image_to_viewport(draft.anchor),
                    transformer.image_to_viewport(draft.current),
                );
                match draft.preview {
                    Some(handle) => store.surface_mut().move_rect(handle, rect),
                    None => {
                        draft.preview =
                            Some(store.surface_mut().draw_rect(rect, RegionStyle::Preview));
                    }
                }
                Outcome::Handled
            }
            InteractionState::Resizing {
                label,
                corner,
                original,
            } => {
                let pointer = transformer.viewport_to_document(point);
                store.update_coords(label.as_str(), corner.resize(*original, pointer));
                Outcome::Handled
            }
            InteractionState::Moving {
                label,
                anchor,
                original_viewport,
                ..
            } => {
                let moved = *original_viewport + (point - *anchor);
                store.update_coords(label.as_str(), transformer.viewport_rect_to_document(moved));
                Outcome::Handled
            }
        }
    }

    fn on_release<S: Surface>(&mut self, store: &mut RegionStore<S>, point: Point) -> Outcome {
        match std::mem::take(&mut self.state) {
            InteractionState::Idle => Outcome::Ignored,
            InteractionState::DrawingBox(mut draft) => {
                if let Some(handle) = draft.preview {
                    store.surface_mut().delete_rect(handle);
                }
                if !self.input.is_dragging {
                    log::debug!("Box discarded, pointer did not leave the drag threshold");
                    return Outcome::Handled;
                }
                let transformer = store.transformer();
                draft.current = transformer.viewport_to_image(point);
                let coords = transformer.image_rect_to_document(draft.image_rect());
                Outcome::BoxCompleted(PendingRegion::new(coords, None))
            }
            InteractionState::Resizing { label, .. } | InteractionState::Moving { label, .. } => {
                Self::finish_edit(store, &label);
                Outcome::Handled
            }
        }
    }

    /// Cursor and corner indicators. Redraws only when the hovered
    /// (region, corner) pair changes.
    fn on_hover<S: Surface>(&mut self, store: &mut RegionStore<S>, point: Point) -> Outcome {
        if self.mode != Mode::Resize {
            return Outcome::Ignored;
        }
        let target = self.corner_target(store, point);
        let outcome = if target.is_some() {
            Outcome::Handled
        } else {
            Outcome::Ignored
        };
        if target == self.hover && (target.is_some() || self.indicators.is_empty()) {
            return outcome;
        }

        self.clear_indicators(store);
        match &target {
            Some((label, corner)) => {
                self.draw_indicators(store, label);
                store.surface_mut().set_cursor(corner.cursor());
            }
            None => store.surface_mut().set_cursor(CursorShape::Default),
        }
        self.hover = target;
        outcome
    }

    /// First region, in order, with a corner near a viewport point.
    fn corner_target<S: Surface>(
        &self,
        store: &RegionStore<S>,
        point: Point,
    ) -> Option<(String, Corner)> {
        let transformer = store.transformer();
        store.regions_ordered().find_map(|region| {
            let rect = transformer.document_rect_to_viewport(region.coords());
            corner_at(rect, point, self.corner_threshold).map(|c| (region.label().to_string(), c))
        })
    }

    /// First region, in order, whose viewport box contains a point.
    fn region_containing<S: Surface>(&self, store: &RegionStore<S>, point: Point) -> Option<String> {
        let transformer = store.transformer();
        store
            .regions_ordered()
            .find(|region| {
                let r = transformer.document_rect_to_viewport(region.coords());
                r.x0 <= point.x && point.x <= r.x1 && r.y0 <= point.y && point.y <= r.y1
            })
            .map(|region| region.label().to_string())
    }

    fn draw_indicators<S: Surface>(&mut self, store: &mut RegionStore<S>, label: &str) {
        let Some(coords) = store.region(label).map(|r| r.coords()) else {
            return;
        };
        let rect = store.transformer().document_rect_to_viewport(coords);
        for square in indicator_rects(rect, self.indicator_size) {
            let handle = store.surface_mut().draw_rect(square, RegionStyle::CornerIndicator);
            self.indicators.push(handle);
        }
    }

    fn clear_indicators<S: Surface>(&mut self, store: &mut RegionStore<S>) {
        for handle in self.indicators.drain(..) {
            store.surface_mut().delete_rect(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use crate::transform::TransformState;
    use kurbo::Vec2;

    /// Store where one document unit is ten viewport pixels.
    fn store_x10() -> RegionStore<RecordingSurface> {
        let mut store = RegionStore::new(RecordingSurface::new());
        store.set_transform(TransformState::new(10.0, 1.0, Vec2::ZERO));
        store
    }

    fn resize_controller(store: &mut RegionStore<RecordingSurface>) -> InteractionController {
        let mut controller = InteractionController::new();
        controller.set_mode(store, Mode::Resize);
        controller
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn to(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    fn style_of(store: &RegionStore<RecordingSurface>, label: &str) -> RegionStyle {
        let handle = store.region(label).unwrap().handle().unwrap();
        store.surface().get(handle).unwrap().style
    }

    #[test]
    fn test_resize_bottom_right_and_flip() {
        let mut store = store_x10();
        store.add_region("a", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut c = resize_controller(&mut store);

        assert_eq!(c.handle_pointer_event(&mut store, &down(100.0, 100.0)), Outcome::Handled);
        assert!(matches!(
            c.state(),
            InteractionState::Resizing { corner: Corner::BottomRight, .. }
        ));
        assert_eq!(style_of(&store, "a"), RegionStyle::Active);
        assert_eq!(store.surface().cursor(), CursorShape::ResizeNwSe);

        c.handle_pointer_event(&mut store, &to(150.0, 200.0));
        assert_eq!(store.region("a").unwrap().coords(), Rect::new(0.0, 0.0, 15.0, 20.0));

        c.handle_pointer_event(&mut store, &to(-50.0, -50.0));
        assert_eq!(store.region("a").unwrap().coords(), Rect::new(-5.0, -5.0, 0.0, 0.0));

        assert_eq!(c.handle_pointer_event(&mut store, &up(-50.0, -50.0)), Outcome::Handled);
        assert!(c.is_idle());
        assert_eq!(style_of(&store, "a"), RegionStyle::Normal);
        assert_eq!(store.surface().cursor(), CursorShape::Default);
    }

    #[test]
    fn test_resize_restores_selected_style() {
        let mut store = store_x10();
        store.add_region("a", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        store.select("a");
        let mut c = resize_controller(&mut store);

        c.handle_pointer_event(&mut store, &down(0.0, 0.0));
        c.handle_pointer_event(&mut store, &to(20.0, 20.0));
        c.handle_pointer_event(&mut store, &up(20.0, 20.0));
        assert_eq!(store.region("a").unwrap().coords(), Rect::new(2.0, 2.0, 10.0, 10.0));
        assert_eq!(style_of(&store, "a"), RegionStyle::Selected);
    }

    #[test]
    fn test_move_uses_captured_viewport_box() {
        let mut store = store_x10();
        store.add_region("a", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut c = resize_controller(&mut store);

        c.handle_pointer_event(&mut store, &down(50.0, 50.0));
        assert!(matches!(c.state(), InteractionState::Moving { .. }));
        assert_eq!(store.surface().cursor(), CursorShape::Move);
        assert_eq!(style_of(&store, "a"), RegionStyle::Active);

        c.handle_pointer_event(&mut store, &to(70.0, 80.0));
        assert_eq!(store.region("a").unwrap().coords(), Rect::new(2.0, 3.0, 12.0, 13.0));

        // Returning to the anchor lands exactly on the original box
        c.handle_pointer_event(&mut store, &to(50.0, 50.0));
        assert_eq!(store.region("a").unwrap().coords(), Rect::new(0.0, 0.0, 10.0, 10.0));

        c.handle_pointer_event(&mut store, &up(50.0, 50.0));
        assert!(c.is_idle());
        assert_eq!(style_of(&store, "a"), RegionStyle::Normal);
        assert_eq!(store.surface().cursor(), CursorShape::Default);
    }

    #[test]
    fn test_corner_beats_containment() {
        let mut store = RegionStore::new(RecordingSurface::new());
        store.set_transform(TransformState::new(1.0, 1.0, Vec2::ZERO));
        store.add_region("big", Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        store.add_region("small", Rect::new(30.0, 30.0, 60.0, 60.0)).unwrap();
        let mut c = resize_controller(&mut store);

        c.handle_pointer_event(&mut store, &down(60.0, 60.0));
        match c.state() {
            InteractionState::Resizing { label, corner, .. } => {
                assert_eq!(label, "small");
                assert_eq!(*corner, Corner::BottomRight);
            }
            other => panic!("expected resize, got {other:?}"),
        }
    }

    #[test]
    fn test_cancel_resize_restores_original() {
        let mut store = store_x10();
        store.add_region("a", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut c = resize_controller(&mut store);

        c.handle_pointer_event(&mut store, &down(100.0, 100.0));
        c.handle_pointer_event(&mut store, &to(300.0, 300.0));
        assert_eq!(c.handle_pointer_event(&mut store, &PointerEvent::Cancel), Outcome::Handled);

        assert!(c.is_idle());
        assert_eq!(store.region("a").unwrap().coords(), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(style_of(&store, "a"), RegionStyle::Normal);

        // Further moves are hovers, not drags
        c.handle_pointer_event(&mut store, &to(400.0, 400.0));
        assert_eq!(store.region("a").unwrap().coords(), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(!c.cancel(&mut store));
    }

    #[test]
    fn test_cancel_move_restores_original() {
        let mut store = store_x10();
        store.add_region("a", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut c = resize_controller(&mut store);

        c.handle_pointer_event(&mut store, &down(50.0, 50.0));
        c.handle_pointer_event(&mut store, &to(90.0, 90.0));
        assert!(c.cancel(&mut store));
        assert_eq!(store.region("a").unwrap().coords(), Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_box_draw_completes_pending_region() {
        let mut store = RegionStore::new(RecordingSurface::new());
        let mut c = InteractionController::new();
        c.set_mode(&mut store, Mode::Box);

        assert_eq!(c.handle_pointer_event(&mut store, &down(50.0, 30.0)), Outcome::Handled);
        c.handle_pointer_event(&mut store, &to(10.0, 10.0));
        assert_eq!(store.surface().count_style(RegionStyle::Preview), 1);
        c.handle_pointer_event(&mut store, &to(12.0, 10.0));
        assert_eq!(store.surface().count_style(RegionStyle::Preview), 1);

        let outcome = c.handle_pointer_event(&mut store, &up(10.0, 10.0));
        let Outcome::BoxCompleted(pending) = outcome else {
            panic!("expected a completed box, got {outcome:?}");
        };
        // Default zoom 2: viewport (10,10)-(50,30) is document (5,5)-(25,15)
        assert_eq!(pending.coords, Rect::new(5.0, 5.0, 25.0, 15.0));
        assert_eq!(pending.source_text, None);
        assert!(store.is_empty());
        assert!(store.surface().is_empty());

        assert_eq!(pending.commit(&mut store, None), Ok(false));
        assert!(store.is_empty());
        assert_eq!(pending.commit(&mut store, Some("Total")), Ok(true));
        assert_eq!(store.labels(), ["Total"]);
    }

    #[test]
    fn test_box_click_without_drag_is_discarded() {
        let mut store = RegionStore::new(RecordingSurface::new());
        let mut c = InteractionController::new();
        c.set_mode(&mut store, Mode::Box);

        c.handle_pointer_event(&mut store, &down(10.0, 10.0));
        c.handle_pointer_event(&mut store, &to(12.0, 11.0));
        assert_eq!(c.handle_pointer_event(&mut store, &up(12.0, 11.0)), Outcome::Handled);
        assert!(c.is_idle());
        assert!(store.surface().is_empty());
    }

    #[test]
    fn test_box_release_without_moves_completes() {
        let mut store = RegionStore::new(RecordingSurface::new());
        let mut c = InteractionController::new();
        c.set_mode(&mut store, Mode::Box);

        c.handle_pointer_event(&mut store, &down(10.0, 10.0));
        let outcome = c.handle_pointer_event(&mut store, &up(200.0, 150.0));
        let Outcome::BoxCompleted(pending) = outcome else {
            panic!("expected a completed box, got {outcome:?}");
        };
        assert_eq!(pending.coords, Rect::new(5.0, 5.0, 100.0, 75.0));
        assert!(store.surface().is_empty());
    }

    #[test]
    fn test_press_after_lost_release_keeps_resize() {
        let mut store = store_x10();
        store.add_region("a", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut c = resize_controller(&mut store);

        c.handle_pointer_event(&mut store, &down(100.0, 100.0));
        c.handle_pointer_event(&mut store, &to(150.0, 200.0));
        assert_eq!(store.region("a").unwrap().coords(), Rect::new(0.0, 0.0, 15.0, 20.0));

        // Next press arrives without an Up in between
        c.handle_pointer_event(&mut store, &down(900.0, 900.0));
        assert_eq!(store.region("a").unwrap().coords(), Rect::new(0.0, 0.0, 15.0, 20.0));
        assert_eq!(style_of(&store, "a"), RegionStyle::Normal);
        assert!(c.is_idle());
    }

    #[test]
    fn test_press_after_lost_release_keeps_move() {
        let mut store = store_x10();
        store.add_region("a", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut c = resize_controller(&mut store);

        c.handle_pointer_event(&mut store, &down(50.0, 50.0));
        c.handle_pointer_event(&mut store, &to(70.0, 80.0));
        c.handle_pointer_event(&mut store, &down(900.0, 900.0));
        assert_eq!(store.region("a").unwrap().coords(), Rect::new(2.0, 3.0, 12.0, 13.0));
        assert_eq!(store.surface().cursor(), CursorShape::Default);

        // Only an explicit cancel reverts
        c.handle_pointer_event(&mut store, &down(70.0, 80.0));
        assert!(matches!(c.state(), InteractionState::Moving { .. }));
        c.handle_pointer_event(&mut store, &to(110.0, 120.0));
        assert!(c.cancel(&mut store));
        assert_eq!(store.region("a").unwrap().coords(), Rect::new(2.0, 3.0, 12.0, 13.0));
    }

    #[test]
    fn test_switching_tool_discards_box() {
        let mut store = RegionStore::new(RecordingSurface::new());
        let mut c = InteractionController::new();
        c.set_mode(&mut store, Mode::Box);

        c.handle_pointer_event(&mut store, &down(10.0, 10.0));
        c.handle_pointer_event(&mut store, &to(80.0, 80.0));
        assert_eq!(store.surface().len(), 1);

        c.set_mode(&mut store, Mode::Word);
        assert!(c.is_idle());
        assert_eq!(c.tool(), SelectionTool::Word);
        assert!(store.surface().is_empty());
        assert!(store.is_empty());

        // The release that follows does nothing
        assert_eq!(c.handle_pointer_event(&mut store, &up(80.0, 80.0)), Outcome::Ignored);
    }

    #[test]
    fn test_word_pick() {
        let mut store = RegionStore::new(RecordingSurface::new());
        let mut c = InteractionController::new();
        c.set_words(vec![Word::new(Rect::new(0.0, 0.0, 20.0, 10.0), "Total")]);

        let outcome = c.handle_pointer_event(&mut store, &down(5.0, 5.0));
        assert_eq!(
            outcome,
            Outcome::WordPicked(PendingRegion::new(
                Rect::new(0.0, 0.0, 10.0, 5.0),
                Some("Total".into())
            ))
        );
        assert!(c.is_idle());

        assert_eq!(c.handle_pointer_event(&mut store, &down(100.0, 100.0)), Outcome::Ignored);
        assert_eq!(c.word_at(store.transformer(), Point::new(20.0, 10.0)).unwrap().text, "Total");
    }

    #[test]
    fn test_resize_mode_falls_through_to_last_tool() {
        let mut store = store_x10();
        store.add_region("a", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut c = InteractionController::new();
        c.set_mode(&mut store, Mode::Box);
        c.set_mode(&mut store, Mode::Resize);
        assert_eq!(c.tool(), SelectionTool::Box);

        c.handle_pointer_event(&mut store, &down(500.0, 500.0));
        assert!(matches!(c.state(), InteractionState::DrawingBox(_)));
    }

    #[test]
    fn test_box_mode_ignores_regions() {
        let mut store = store_x10();
        store.add_region("a", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut c = InteractionController::new();
        c.set_mode(&mut store, Mode::Box);

        c.handle_pointer_event(&mut store, &down(100.0, 100.0));
        assert!(matches!(c.state(), InteractionState::DrawingBox(_)));
    }

    #[test]
    fn test_hover_indicators_are_idempotent() {
        let mut store = store_x10();
        store.add_region("a", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut c = resize_controller(&mut store);

        assert_eq!(c.handle_pointer_event(&mut store, &to(98.0, 99.0)), Outcome::Handled);
        assert_eq!(store.surface().count_style(RegionStyle::CornerIndicator), 4);
        assert_eq!(store.surface().cursor(), CursorShape::ResizeNwSe);
        let deletes = store.surface().delete_count();

        c.handle_pointer_event(&mut store, &to(97.0, 99.0));
        assert_eq!(store.surface().delete_count(), deletes);
        assert_eq!(store.surface().count_style(RegionStyle::CornerIndicator), 4);

        c.handle_pointer_event(&mut store, &to(105.0, 0.0));
        assert_eq!(store.surface().cursor(), CursorShape::ResizeNeSw);
        assert_eq!(store.surface().count_style(RegionStyle::CornerIndicator), 4);

        assert_eq!(c.handle_pointer_event(&mut store, &to(50.0, 50.0)), Outcome::Ignored);
        assert_eq!(store.surface().count_style(RegionStyle::CornerIndicator), 0);
        assert_eq!(store.surface().cursor(), CursorShape::Default);

        let deletes = store.surface().delete_count();
        c.handle_pointer_event(&mut store, &to(55.0, 50.0));
        assert_eq!(store.surface().delete_count(), deletes);
    }

    #[test]
    fn test_hover_outside_resize_mode_is_ignored() {
        let mut store = store_x10();
        store.add_region("a", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut c = InteractionController::new();
        assert_eq!(c.handle_pointer_event(&mut store, &to(100.0, 100.0)), Outcome::Ignored);
        assert_eq!(store.surface().count_style(RegionStyle::CornerIndicator), 0);
    }

    #[test]
    fn test_show_corner_indicators() {
        let mut store = store_x10();
        store.add_region("a", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut c = resize_controller(&mut store);

        assert!(c.show_corner_indicators(&mut store, "a"));
        assert!(!c.show_corner_indicators(&mut store, "missing"));
        assert_eq!(store.surface().count_style(RegionStyle::CornerIndicator), 4);

        // Hovering empty space clears them
        c.handle_pointer_event(&mut store, &to(500.0, 500.0));
        assert_eq!(store.surface().count_style(RegionStyle::CornerIndicator), 0);
    }

    #[test]
    fn test_secondary_buttons_ignored() {
        let mut store = store_x10();
        store.add_region("a", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let mut c = resize_controller(&mut store);

        let right = PointerEvent::Down {
            position: Point::new(50.0, 50.0),
            button: MouseButton::Right,
        };
        assert_eq!(c.handle_pointer_event(&mut store, &right), Outcome::Ignored);
        assert!(c.is_idle());
    }

    #[test]
    fn test_with_settings_threshold() {
        let mut store = store_x10();
        store.add_region("a", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let settings = EditorSettings {
            corner_threshold: 2.0,
            ..EditorSettings::default()
        };
        let mut c = InteractionController::with_settings(&settings);
        c.set_mode(&mut store, Mode::Resize);

        // Inside the box but beyond the narrow corner threshold: a move
        c.handle_pointer_event(&mut store, &down(95.0, 95.0));
        assert!(matches!(c.state(), InteractionState::Moving { .. }));
    }
}
