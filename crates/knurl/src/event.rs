//! Backend-agnostic input vocabulary for controllers
//!
//! The host owns the real input technology and translates whatever it
//! receives (DOM listeners, winit events, test scripts) into
//! [`ControlEvent`] values, already targeted at a single controller.
//! Widgets match the variants they understand and ignore the rest.

/// Named keys the controllers react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Tab,
    ArrowUp,
    ArrowDown,
}

/// One input event, pre-targeted at a controller.
///
/// Slider-prefixed variants address the slider track of a numeric
/// controller; the pointer/touch continuation events (`PointerMove`,
/// `TouchMove`, ...) address whatever gesture is in flight and are
/// ignored outside one.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// Primary activation: a checkbox toggle or a button press.
    Click,
    /// The text box content changed; carries the full current text.
    InputChanged(String),
    /// The text box gained focus.
    InputFocus,
    /// The text box lost focus.
    InputBlur,
    /// Key press while the text box is focused.
    KeyDown { key: Key, shift: bool },
    /// Wheel over the text box.
    Wheel { dx: f64, dy: f64 },
    /// Wheel over the slider track.
    SliderWheel { dx: f64, dy: f64 },
    /// Pointer press on the slider track, in window coordinates.
    SliderPointerDown { x: f64 },
    /// Pointer motion during a slider drag.
    PointerMove { x: f64 },
    /// Pointer release ending a slider drag.
    PointerUp,
    /// Touch landing on the slider track; `touches` counts the active
    /// touch points of the gesture.
    SliderTouchStart { x: f64, y: f64, touches: usize },
    /// Touch motion during a touch gesture.
    TouchMove { x: f64, y: f64 },
    /// Touch lift ending a touch gesture.
    TouchEnd,
    /// Dropdown selection by entry index.
    Select(usize),
    /// The host color input produced a hex string.
    ColorPicked(String),
}
