//! Drag gesture state machine
//!
//! Turns raw pointer input into drag-card motion. Mouse presses drag at once;
//! touches must be held still for a long press first so ordinary scrolling
//! and taps keep working.

use crate::{Config, DragCard};
use glam::Vec2;

/// Pointer identity: the mouse, or a touch by its identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pointer {
    Mouse,
    Touch(i32),
}

/// Gesture states
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    /// Touch is down, waiting out the long press
    Arming {
        touch_id: i32,
        start: Vec2,
        since_ms: f64,
    },
    /// Card follows the pointer
    Dragging {
        pointer: Pointer,
        start: Vec2,
        origin: Vec2,
    },
}

/// What the host must do with the event that was just handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputEffect {
    pub prevent_default: bool,
    pub schedule_long_press: bool,
    pub cancel_long_press: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickVerdict {
    Allow,
    Suppress,
}

/// Per-card gesture tracker
#[derive(Debug, Clone)]
pub struct Gesture {
    state: GestureState,
    press_at: Vec2,
    moved: bool,
    suppress_click: bool,
}

impl Gesture {
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
            press_at: Vec2::ZERO,
            moved: false,
            suppress_click: false,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    pub fn is_arming(&self) -> bool {
        matches!(self.state, GestureState::Arming { .. })
    }

    /// Mouse press starts a drag immediately. A press during a mouse drag
    /// means its mouseup was lost outside the window, so the drag restarts.
    pub fn mouse_down(&mut self, card: &mut DragCard, pos: Vec2) -> InputEffect {
        let mouse_drag = matches!(
            self.state,
            GestureState::Dragging {
                pointer: Pointer::Mouse,
                ..
            }
        );
        if self.state != GestureState::Idle && !mouse_drag {
            return InputEffect::default();
        }
        self.reset_press(pos);
        self.begin_drag(card, Pointer::Mouse, pos);
        InputEffect {
            prevent_default: true,
            ..Default::default()
        }
    }

    /// Touch press arms a long press; other touches are ignored while one is tracked
    pub fn touch_start(&mut self, touch_id: i32, pos: Vec2, now_ms: f64) -> InputEffect {
        if self.state != GestureState::Idle {
            return InputEffect::default();
        }
        self.reset_press(pos);
        self.state = GestureState::Arming {
            touch_id,
            start: pos,
            since_ms: now_ms,
        };
        InputEffect {
            schedule_long_press: true,
            ..Default::default()
        }
    }

    /// Long-press timer fired. Returns true when the drag actually started.
    pub fn long_press_elapsed(&mut self, card: &mut DragCard, now_ms: f64, config: &Config) -> bool {
        match self.state {
            GestureState::Arming {
                touch_id,
                start,
                since_ms,
            } if now_ms - since_ms >= config.long_press_ms => {
                self.begin_drag(card, Pointer::Touch(touch_id), start);
                true
            }
            _ => false,
        }
    }

    pub fn pointer_move(
        &mut self,
        card: &mut DragCard,
        pointer: Pointer,
        pos: Vec2,
        config: &Config,
    ) -> InputEffect {
        match self.state {
            GestureState::Arming {
                touch_id, start, ..
            } if pointer == Pointer::Touch(touch_id) => {
                if pos.distance(start) > config.arm_cancel_distance {
                    // Looks like a scroll; give the page back
                    self.state = GestureState::Idle;
                    return InputEffect {
                        cancel_long_press: true,
                        ..Default::default()
                    };
                }
                InputEffect::default()
            }
            GestureState::Dragging {
                pointer: tracked,
                start,
                origin,
            } if pointer == tracked => {
                let delta = pos - start;
                let offset = origin + delta;
                card.velocity = (offset - card.offset) * config.velocity_sample;
                card.offset = offset;
                card.rotation = Vec2::new(
                    -delta.y * config.drag_rotation_factor,
                    delta.x * config.drag_rotation_factor,
                );
                if pos.distance(self.press_at) > config.click_suppress_distance {
                    self.moved = true;
                }
                InputEffect {
                    prevent_default: matches!(pointer, Pointer::Touch(_)),
                    ..Default::default()
                }
            }
            _ => InputEffect::default(),
        }
    }

    pub fn pointer_up(&mut self, card: &mut DragCard, pointer: Pointer) -> InputEffect {
        self.release(card, pointer, true)
    }

    /// Touch cancelled by the platform; no click will follow
    pub fn pointer_cancel(&mut self, card: &mut DragCard, pointer: Pointer) -> InputEffect {
        self.release(card, pointer, false)
    }

    /// Consume the click that follows a press
    pub fn click(&mut self) -> ClickVerdict {
        if std::mem::take(&mut self.suppress_click) {
            ClickVerdict::Suppress
        } else {
            ClickVerdict::Allow
        }
    }

    /// Frame boundary. The click that follows a release is dispatched in the
    /// same task, so a flag still set here has no click coming to consume it.
    pub fn expire_click(&mut self) {
        self.suppress_click = false;
    }

    fn reset_press(&mut self, pos: Vec2) {
        self.press_at = pos;
        self.moved = false;
        self.suppress_click = false;
    }

    fn begin_drag(&mut self, card: &mut DragCard, pointer: Pointer, start: Vec2) {
        self.state = GestureState::Dragging {
            pointer,
            start,
            origin: card.offset,
        };
        card.dragging = true;
        card.velocity = Vec2::ZERO;
    }

    fn release(&mut self, card: &mut DragCard, pointer: Pointer, may_click: bool) -> InputEffect {
        match self.state {
            GestureState::Arming { touch_id, .. } if pointer == Pointer::Touch(touch_id) => {
                self.state = GestureState::Idle;
                InputEffect {
                    cancel_long_press: true,
                    ..Default::default()
                }
            }
            GestureState::Dragging {
                pointer: tracked, ..
            } if pointer == tracked => {
                self.state = GestureState::Idle;
                card.dragging = false;
                self.suppress_click = may_click && self.moved;
                InputEffect::default()
            }
            _ => InputEffect::default(),
        }
    }
}

impl Default for Gesture {
    fn default() -> Self {
        Self::new()
    }
}
