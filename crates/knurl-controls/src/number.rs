//! Numeric widget: clamped, snapped, slider/keyboard/wheel/touch driven
//!
//! The number box accepts free typing (clamped, never snapped, so typed
//! values keep sub-step precision), arrow-key and wheel increments
//! (clamped and snapped), and - once both bounds are known - a slider
//! with pointer and touch gestures. Touch needs arbitration: a touch
//! that lands on the slider inside a scrollable panel might be a page
//! scroll, so the first move decides.

use knurl::{map_range, ControlEvent, Key, Surface, Value};

use crate::controller::Action;

/// How many wheel or implicit-step units span the whole range.
const RANGE_STEPS: f64 = 1000.0;

/// Gesture the slider is currently engaged in.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragPhase {
    Idle,
    /// Pointer drag; every move commits a value.
    SliderDrag,
    /// Touch seen over a scrollable panel; waiting on the first move to
    /// tell a horizontal drag from a page scroll. Holds the start point.
    TouchPending { x: f64, y: f64 },
    /// Touch drag committed as horizontal; behaves like `SliderDrag`.
    TouchDrag,
}

#[derive(Debug)]
pub(crate) struct NumberWidget {
    min: Option<f64>,
    max: Option<f64>,
    step: f64,
    step_explicit: bool,
    has_slider: bool,
    input_focused: bool,
    /// Text currently shown in the number box.
    input_text: String,
    /// Filled fraction of the slider track.
    fill: f64,
    drag: DragPhase,
}

impl NumberWidget {
    pub(crate) fn new(min: Option<f64>, max: Option<f64>, step: Option<f64>) -> Self {
        let mut widget = Self {
            min: None,
            max: None,
            step: 1.0,
            step_explicit: false,
            has_slider: false,
            input_focused: false,
            input_text: String::new(),
            fill: 0.0,
            drag: DragPhase::Idle,
        };
        if let Some(min) = min {
            widget.set_min(min);
        }
        if let Some(max) = max {
            widget.set_max(max);
        }
        match step {
            Some(step) => {
                widget.set_step(step);
            }
            None => widget.step = widget.implicit_step(),
        }
        widget
    }

    /// Returns true when the bound change grew a slider and the display
    /// needs a refresh.
    pub(crate) fn set_min(&mut self, min: f64) -> bool {
        self.min = Some(min);
        self.on_update_min_max()
    }

    pub(crate) fn set_max(&mut self, max: f64) -> bool {
        self.max = Some(max);
        self.on_update_min_max()
    }

    pub(crate) fn set_step(&mut self, step: f64) -> bool {
        self.step = step;
        self.step_explicit = true;
        false
    }

    pub(crate) fn has_slider(&self) -> bool {
        self.has_slider
    }

    pub(crate) fn input_text(&self) -> &str {
        &self.input_text
    }

    pub(crate) fn fill(&self) -> f64 {
        self.fill
    }

    fn implicit_step(&self) -> f64 {
        match (self.min, self.max) {
            (Some(min), Some(max)) => (max - min) / RANGE_STEPS,
            _ => 1.0,
        }
    }

    fn on_update_min_max(&mut self) -> bool {
        if self.has_slider || self.min.is_none() || self.max.is_none() {
            return false;
        }
        // First time both bounds are known: adopt the implicit step
        // unless the caller pinned one, then grow the slider.
        if !self.step_explicit {
            self.step = self.implicit_step();
        }
        self.has_slider = true;
        true
    }

    pub(crate) fn clamp(&self, value: f64) -> f64 {
        let min = self.min.unwrap_or(f64::NEG_INFINITY);
        let max = self.max.unwrap_or(f64::INFINITY);
        min.max(max.min(value))
    }

    pub(crate) fn snap(&self, value: f64) -> f64 {
        // Snapping through the reciprocal step avoids most float error.
        let inverse_step = 1.0 / self.step;
        (value * inverse_step).round() / inverse_step
    }

    pub(crate) fn refresh(&mut self, value: &Value) {
        let Value::Number(value) = value else { return };

        if self.has_slider {
            if let (Some(min), Some(max)) = (self.min, self.max) {
                self.fill = (value - min) / (max - min);
            }
        }
        if !self.input_focused {
            self.input_text = format_number(*value);
        }
    }

    pub(crate) fn handle(
        &mut self,
        value: &Value,
        event: &ControlEvent,
        surface: &dyn Surface,
    ) -> Vec<Action> {
        let Value::Number(current) = value else {
            return Vec::new();
        };

        match event {
            ControlEvent::InputFocus => {
                self.input_focused = true;
                Vec::new()
            }
            ControlEvent::InputChanged(text) => {
                self.input_text = text.clone();
                match text.trim().parse::<f64>() {
                    // Typed values clamp but never snap: the box is the
                    // one channel with sub-step precision.
                    Ok(typed) => vec![set_number(self.clamp(typed), false)],
                    Err(_) => Vec::new(),
                }
            }
            ControlEvent::InputBlur => {
                self.input_focused = false;
                vec![Action::Finish, Action::Refresh]
            }
            ControlEvent::KeyDown { key: Key::Enter, .. } => {
                // Enter commits like a blur; the host drops its native
                // focus when it sees the refresh.
                self.input_focused = false;
                vec![Action::Finish, Action::Refresh]
            }
            ControlEvent::KeyDown {
                key: Key::ArrowUp,
                shift,
            } => self.increment_from_text(self.step * if *shift { 10.0 } else { 1.0 }),
            ControlEvent::KeyDown {
                key: Key::ArrowDown,
                shift,
            } => self.increment_from_text(-self.step * if *shift { 10.0 } else { 1.0 }),
            ControlEvent::Wheel { dx, dy } => self.increment_from_text((dx - dy) * self.step),
            ControlEvent::SliderWheel { dx, dy } => {
                let (Some(min), Some(max)) = (self.min, self.max) else {
                    return Vec::new();
                };
                if !self.has_slider {
                    return Vec::new();
                }
                let value = self.snap(self.clamp(*current + (dx - dy) * (max - min) / RANGE_STEPS));
                vec![set_number(value, false)]
            }
            ControlEvent::SliderPointerDown { x } => {
                if !self.has_slider {
                    return Vec::new();
                }
                self.drag = DragPhase::SliderDrag;
                self.slider_value(*x, surface)
            }
            ControlEvent::PointerMove { x } => {
                if self.drag != DragPhase::SliderDrag {
                    return Vec::new();
                }
                self.slider_value(*x, surface)
            }
            ControlEvent::PointerUp => {
                if self.drag != DragPhase::SliderDrag {
                    return Vec::new();
                }
                self.drag = DragPhase::Idle;
                vec![Action::Finish]
            }
            ControlEvent::SliderTouchStart { x, y, touches } => {
                if !self.has_slider || *touches > 1 {
                    return Vec::new();
                }
                if surface.scrollbar_visible() {
                    // Might be a page scroll; hold off until the first
                    // move shows a direction.
                    self.drag = DragPhase::TouchPending { x: *x, y: *y };
                    Vec::new()
                } else {
                    self.drag = DragPhase::TouchDrag;
                    self.slider_value(*x, surface)
                }
            }
            ControlEvent::TouchMove { x, y } => match self.drag {
                DragPhase::TouchDrag => self.slider_value(*x, surface),
                DragPhase::TouchPending { x: x0, y: y0 } => {
                    if (x - x0).abs() > (y - y0).abs() {
                        // Moved horizontally: commit and stop checking.
                        self.drag = DragPhase::TouchDrag;
                        self.slider_value(*x, surface)
                    } else {
                        // An attempt to scroll the panel. Abort without
                        // ever touching the bound value.
                        self.drag = DragPhase::Idle;
                        Vec::new()
                    }
                }
                _ => Vec::new(),
            },
            ControlEvent::TouchEnd => match self.drag {
                DragPhase::TouchDrag | DragPhase::TouchPending { .. } => {
                    self.drag = DragPhase::Idle;
                    vec![Action::Finish]
                }
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Arrow-key and wheel increments start from the text currently in
    /// the box, not the bound value, so repeated taps while focused
    /// build on what the user sees.
    fn increment_from_text(&mut self, delta: f64) -> Vec<Action> {
        let Ok(base) = self.input_text.trim().parse::<f64>() else {
            return Vec::new();
        };
        let value = self.snap(self.clamp(base + delta));
        // The box may keep focus, so write the shown text here; the
        // display refresh skips a focused box.
        self.input_text = format_number(value);
        vec![set_number(value, false)]
    }

    fn slider_value(&mut self, x: f64, surface: &dyn Surface) -> Vec<Action> {
        let (Some(min), Some(max)) = (self.min, self.max) else {
            return Vec::new();
        };
        // Poll the track every event; simpler than caching geometry.
        let rect = surface.slider_rect();
        let value = map_range(x, rect.left(), rect.right(), min, max);
        let value = self.snap(self.clamp(value));
        vec![set_number(value, false)]
    }
}

fn set_number(value: f64, finished: bool) -> Action {
    Action::Set {
        value: Value::Number(value),
        finished,
    }
}

fn format_number(value: f64) -> String {
    format!("{value}")
}
