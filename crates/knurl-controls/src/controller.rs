//! The shared controller contract
//!
//! A [`Controller`] is a cheap-to-clone handle over one bound widget.
//! Every input modality funnels its writes through [`Controller::set_value`],
//! which guarantees the framework's central ordering contract: value
//! mutation, then the change callback, then (for finished edits) the
//! finish callback, then a display refresh - in that order, every time,
//! no matter which gesture produced the write.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use knurl::{rgb_from_hex, Binding, BindingError, ControlEvent, Surface, Value};

use crate::boolean::CheckboxWidget;
use crate::function::ButtonWidget;
use crate::number::NumberWidget;
use crate::option::{DropdownWidget, Options};
use crate::panel::{Panel, PanelState};
use crate::string::TextWidget;
use crate::swatch::SwatchWidget;

/// The closed set of widget variants a controller can carry, selected
/// once at add time from the bound value's shape.
#[derive(Debug)]
pub(crate) enum Widget {
    Checkbox(CheckboxWidget),
    TextBox(TextWidget),
    Number(NumberWidget),
    Dropdown(DropdownWidget),
    Button(ButtonWidget),
    Swatch(SwatchWidget),
}

impl Widget {
    fn refresh(&mut self, value: &Value) {
        match self {
            Widget::Checkbox(widget) => widget.refresh(value),
            Widget::TextBox(widget) => widget.refresh(value),
            Widget::Number(widget) => widget.refresh(value),
            Widget::Dropdown(widget) => widget.refresh(value),
            Widget::Button(_) => {}
            Widget::Swatch(widget) => widget.refresh(value),
        }
    }

    fn handle(&mut self, value: &Value, event: &ControlEvent, surface: &dyn Surface) -> Vec<Action> {
        match self {
            Widget::Checkbox(widget) => widget.handle(value, event),
            Widget::TextBox(widget) => widget.handle(event),
            Widget::Number(widget) => widget.handle(value, event, surface),
            Widget::Dropdown(widget) => widget.handle(event),
            Widget::Button(widget) => widget.handle(event),
            Widget::Swatch(widget) => widget.handle(event),
        }
    }
}

/// What a widget asks its controller to do after reducing an event.
#[derive(Debug)]
pub(crate) enum Action {
    /// Route a new value through the single mutation entry point.
    Set { value: Value, finished: bool },
    /// Decode the hex into the bound color object in place, then fire
    /// the full change/finish/refresh sequence.
    WriteColor(String),
    /// Fire the finish callback only.
    Finish,
    /// Re-project the bound value into the widget display.
    Refresh,
    /// Invoke the bound function.
    Invoke,
}

type Callback = Box<dyn FnMut(&Value)>;

pub(crate) struct ControllerState {
    pub(crate) binding: Binding,
    pub(crate) label: String,
    pub(crate) disabled: bool,
    pub(crate) on_change: Option<Callback>,
    pub(crate) on_finish_change: Option<Callback>,
    pub(crate) widget: Widget,
    pub(crate) parent: Weak<RefCell<PanelState>>,
}

/// Which callback slot to fire.
#[derive(Clone, Copy)]
enum Slot {
    Change,
    Finish,
}

/// A bound, interactive control synchronizing one store property with a
/// visible input.
///
/// Cloning is cheap and clones refer to the same control. Configuration
/// methods return a handle so calls chain:
///
/// ```ignore
/// panel.add(&store, "speed")?
///     .name("Speed")
///     .min(0.0)
///     .max(10.0)
///     .on_change(|value| log::info!("speed: {value}"));
/// ```
#[derive(Clone)]
pub struct Controller {
    inner: Rc<RefCell<ControllerState>>,
}

impl Controller {
    pub(crate) fn attach(
        binding: Binding,
        widget: Widget,
        parent: Weak<RefCell<PanelState>>,
    ) -> Self {
        let label = binding.property().to_string();
        let controller = Self {
            inner: Rc::new(RefCell::new(ControllerState {
                binding,
                label,
                disabled: false,
                on_change: None,
                on_finish_change: None,
                widget,
                parent,
            })),
        };
        controller.update_display();
        controller
    }

    pub(crate) fn state(&self) -> &Rc<RefCell<ControllerState>> {
        &self.inner
    }

    /// Read the bound value.
    pub fn value(&self) -> Value {
        self.inner.borrow().binding.get()
    }

    /// The bound property name.
    pub fn property(&self) -> String {
        self.inner.borrow().binding.property().to_string()
    }

    /// The display label.
    pub fn label(&self) -> String {
        self.inner.borrow().label.clone()
    }

    pub fn is_disabled(&self) -> bool {
        self.inner.borrow().disabled
    }

    /// Write the bound value. The change callback always fires; the
    /// finish callback fires only for finished edits; the display is
    /// refreshed last. Every concrete input path routes through here.
    pub fn set_value(&self, value: Value, finished: bool) {
        self.inner.borrow().binding.set(value);
        self.after_set(finished);
    }

    /// Write the bound value as a finished edit.
    pub fn set(&self, value: impl Into<Value>) {
        self.set_value(value.into(), true);
    }

    /// Re-project the bound value into the widget display. Idempotent
    /// and safe to call at any time, including right after construction
    /// and after external store writes.
    pub fn update_display(&self) {
        let mut state = self.inner.borrow_mut();
        let value = state.binding.get();
        state.widget.refresh(&value);
    }

    /// Route one host input event through the widget. Disabled
    /// controllers ignore everything.
    pub fn handle_event(&self, event: &ControlEvent, surface: &dyn Surface) {
        let actions = {
            let mut state = self.inner.borrow_mut();
            if state.disabled {
                return;
            }
            let value = state.binding.get();
            state.widget.handle(&value, event, surface)
        };
        for action in actions {
            match action {
                Action::Set { value, finished } => self.set_value(value, finished),
                Action::WriteColor(hex) => self.write_color(&hex),
                Action::Finish => self.fire(Slot::Finish),
                Action::Refresh => self.update_display(),
                Action::Invoke => self.invoke(),
            }
        }
    }

    /// Set the display label.
    pub fn name(&self, name: impl Into<String>) -> Self {
        self.inner.borrow_mut().label = name.into();
        self.clone()
    }

    /// Register the change callback, replacing any previous one.
    pub fn on_change(&self, callback: impl FnMut(&Value) + 'static) -> Self {
        self.inner.borrow_mut().on_change = Some(Box::new(callback));
        self.clone()
    }

    /// Register the finish callback, replacing any previous one.
    pub fn on_finish_change(&self, callback: impl FnMut(&Value) + 'static) -> Self {
        self.inner.borrow_mut().on_finish_change = Some(Box::new(callback));
        self.clone()
    }

    /// Enable or disable interaction. The bound value is untouched.
    pub fn enable(&self, enabled: bool) -> Self {
        self.inner.borrow_mut().disabled = !enabled;
        self.clone()
    }

    pub fn disable(&self) -> Self {
        self.enable(false)
    }

    /// Lower bound for a numeric controller; ignored otherwise.
    pub fn min(&self, min: f64) -> Self {
        self.with_number(|widget| widget.set_min(min));
        self.clone()
    }

    /// Upper bound for a numeric controller; ignored otherwise.
    pub fn max(&self, max: f64) -> Self {
        self.with_number(|widget| widget.set_max(max));
        self.clone()
    }

    /// Snap increment for a numeric controller; ignored otherwise.
    pub fn step(&self, step: f64) -> Self {
        self.with_number(|widget| widget.set_step(step));
        self.clone()
    }

    /// Destroy this controller and replace it with a dropdown bound to
    /// the same property, keeping the display label.
    pub fn options(&self, spec: impl Into<Options>) -> Result<Controller, BindingError> {
        let (store, property, label, parent) = {
            let state = self.inner.borrow();
            (
                state.binding.store().clone(),
                state.binding.property().to_string(),
                state.label.clone(),
                state.parent.clone(),
            )
        };
        let parent = parent.upgrade().ok_or(BindingError::Detached {
            property: property.clone(),
        })?;

        let replacement = Panel::from_state(parent).add_options(&store, &property, spec)?;
        replacement.name(label);
        self.destroy();
        Ok(replacement)
    }

    /// Detach from the parent panel. Irreversible.
    pub fn destroy(&self) {
        let parent = self.inner.borrow().parent.upgrade();
        if let Some(parent) = parent {
            parent.borrow_mut().remove_controller(&self.inner);
        }
        self.inner.borrow_mut().parent = Weak::new();
        log::debug!("destroyed controller \"{}\"", self.label());
    }

    // Display projections, per widget kind. Each returns `None` when the
    // controller carries a different widget.

    /// Checkbox state.
    pub fn checked(&self) -> Option<bool> {
        match &self.inner.borrow().widget {
            Widget::Checkbox(widget) => Some(widget.checked()),
            _ => None,
        }
    }

    /// Text currently shown in a text or number box.
    pub fn text(&self) -> Option<String> {
        match &self.inner.borrow().widget {
            Widget::TextBox(widget) => Some(widget.text().to_string()),
            Widget::Number(widget) => Some(widget.input_text().to_string()),
            _ => None,
        }
    }

    /// Filled fraction of a slider track, once the slider exists.
    pub fn fill(&self) -> Option<f64> {
        match &self.inner.borrow().widget {
            Widget::Number(widget) if widget.has_slider() => Some(widget.fill()),
            _ => None,
        }
    }

    /// Selected dropdown index, `None` on a lookup miss.
    pub fn selected(&self) -> Option<usize> {
        match &self.inner.borrow().widget {
            Widget::Dropdown(widget) => widget.selected(),
            _ => None,
        }
    }

    /// Entry labels of a dropdown, in order.
    pub fn option_names(&self) -> Option<Vec<String>> {
        match &self.inner.borrow().widget {
            Widget::Dropdown(widget) => Some(widget.names().to_vec()),
            _ => None,
        }
    }

    /// Label a dropdown currently shows.
    pub fn selection_label(&self) -> Option<String> {
        match &self.inner.borrow().widget {
            Widget::Dropdown(widget) => Some(widget.display().to_string()),
            _ => None,
        }
    }

    /// Canonical hex form a color swatch currently shows.
    pub fn hex(&self) -> Option<String> {
        match &self.inner.borrow().widget {
            Widget::Swatch(widget) => Some(widget.hex().to_string()),
            _ => None,
        }
    }

    fn after_set(&self, finished: bool) {
        self.fire(Slot::Change);
        if finished {
            self.fire(Slot::Finish);
        }
        self.update_display();
    }

    /// Fire one callback slot with the current value. The slot is taken
    /// out for the duration of the call so the callback may re-enter the
    /// controller; a replacement registered from inside wins over the
    /// old callback being restored.
    fn fire(&self, slot: Slot) {
        let taken = {
            let mut state = self.inner.borrow_mut();
            match slot {
                Slot::Change => state.on_change.take(),
                Slot::Finish => state.on_finish_change.take(),
            }
        };
        let Some(mut callback) = taken else {
            return;
        };

        let value = self.inner.borrow().binding.get();
        callback(&value);

        let mut state = self.inner.borrow_mut();
        let slot = match slot {
            Slot::Change => &mut state.on_change,
            Slot::Finish => &mut state.on_finish_change,
        };
        if slot.is_none() {
            *slot = Some(callback);
        }
    }

    fn with_number(&self, f: impl FnOnce(&mut NumberWidget) -> bool) {
        let refresh = {
            let mut state = self.inner.borrow_mut();
            match &mut state.widget {
                Widget::Number(widget) => f(widget),
                _ => {
                    log::debug!(
                        "numeric bound ignored for non-number controller \"{}\"",
                        state.label
                    );
                    false
                }
            }
        };
        if refresh {
            self.update_display();
        }
    }

    fn write_color(&self, hex: &str) {
        let wrote = self.inner.borrow().binding.update(|value| match value {
            Value::Rgb(rgb) => rgb_from_hex(hex, rgb),
            _ => false,
        });
        if !wrote {
            return;
        }
        self.after_set(true);
    }

    fn invoke(&self) {
        let value = self.inner.borrow().binding.get();
        if let Value::Func(function) = value {
            (*function)();
        }
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("Controller")
            .field("property", &state.binding.property())
            .field("label", &state.label)
            .field("disabled", &state.disabled)
            .finish()
    }
}
