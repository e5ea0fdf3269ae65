//! Pointer input normalization.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default distance, in viewport pixels, before a press counts as a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 5.0;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event in viewport coordinates.
///
/// The host converts raw window events into these before handing them to
/// the interaction controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// Abort whatever gesture is in progress (Escape, focus loss).
    Cancel,
}

impl PointerEvent {
    /// Viewport position carried by the event.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position } => Some(*position),
            PointerEvent::Cancel => None,
        }
    }
}

/// Tracks button state and the current drag gesture.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Current pointer position in viewport coordinates.
    pub pointer_position: Point,
    pressed_buttons: HashSet<MouseButton>,
    /// Start position of the current primary-button gesture.
    pub drag_start: Option<Point>,
    /// Whether the pointer has travelled past the drag threshold.
    pub is_dragging: bool,
    drag_threshold: f64,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl InputState {
    /// Create an input state with the given drag threshold.
    pub fn new(drag_threshold: f64) -> Self {
        Self {
            pointer_position: Point::ZERO,
            pressed_buttons: HashSet::new(),
            drag_start: None,
            is_dragging: false,
            drag_threshold,
        }
    }

    pub fn drag_threshold(&self) -> f64 {
        self.drag_threshold
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        if let Some(position) = event.position() {
            self.pointer_position = position;
        }

        match event {
            PointerEvent::Down { position, button } => {
                self.pressed_buttons.insert(*button);
                if *button == MouseButton::Left {
                    self.drag_start = Some(*position);
                    self.is_dragging = false;
                }
            }
            PointerEvent::Up { button, .. } => {
                self.pressed_buttons.remove(button);
                if *button == MouseButton::Left {
                    // Hosts may coalesce motion, so the release can be the first far point
                    self.update_dragging();
                    self.drag_start = None;
                }
            }
            PointerEvent::Move { .. } => self.update_dragging(),
            PointerEvent::Cancel => self.reset(),
        }
    }

    fn update_dragging(&mut self) {
        if let Some(delta) = self.drag_delta() {
            if delta.x.abs() > self.drag_threshold || delta.y.abs() > self.drag_threshold {
                self.is_dragging = true;
            }
        }
    }

    /// Forget the current gesture and every held button.
    pub fn reset(&mut self) {
        self.pressed_buttons.clear();
        self.drag_start = None;
        self.is_dragging = false;
    }

    /// Check if a button is currently pressed.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Get the drag delta from start position, if a gesture is active.
    pub fn drag_delta(&self) -> Option<Vec2> {
        self.drag_start.map(|start| self.pointer_position - start)
    }
}
