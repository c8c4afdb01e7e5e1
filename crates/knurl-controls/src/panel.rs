//! Panels, folders and headers
//!
//! A [`Panel`] owns an ordered list of children - controllers, nested
//! folder panels and headers - and performs the add-time controller
//! selection. It manages membership and lifecycle only; value flow stays
//! between each controller and its binding.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use knurl::{detect_format, Binding, BindingError, SharedStore, Value};

use crate::boolean::CheckboxWidget;
use crate::controller::{Controller, ControllerState, Widget};
use crate::function::ButtonWidget;
use crate::number::NumberWidget;
use crate::option::{DropdownWidget, Options};
use crate::string::TextWidget;
use crate::swatch::SwatchWidget;

/// Construction-time configuration for a root panel.
#[derive(Debug, Clone)]
pub struct PanelOptions {
    pub name: String,
    /// Fixed width in logical pixels; `None` sizes to content.
    pub width: Option<f64>,
    /// Pin the panel to the window edge and let it scroll with the
    /// window height the host reports.
    pub auto_place: bool,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            name: "Controls".to_string(),
            width: Some(250.0),
            auto_place: true,
        }
    }
}

/// One entry in a panel's ordered child list.
#[derive(Clone)]
pub enum Child {
    Controller(Controller),
    Folder(Panel),
    Header(Header),
}

pub(crate) struct PanelState {
    name: String,
    closed: bool,
    width: Option<f64>,
    auto_place: bool,
    window_height: Option<f64>,
    children: Vec<Child>,
    parent: Weak<RefCell<PanelState>>,
}

impl PanelState {
    pub(crate) fn remove_controller(&mut self, target: &Rc<RefCell<ControllerState>>) {
        self.children.retain(|child| {
            !matches!(child, Child::Controller(controller) if Rc::ptr_eq(controller.state(), target))
        });
    }

    fn remove_folder(&mut self, target: &Rc<RefCell<PanelState>>) {
        self.children
            .retain(|child| !matches!(child, Child::Folder(panel) if Rc::ptr_eq(&panel.inner, target)));
    }

    fn remove_header(&mut self, target: &Rc<RefCell<HeaderState>>) {
        self.children
            .retain(|child| !matches!(child, Child::Header(header) if Rc::ptr_eq(&header.inner, target)));
    }
}

/// An ordered grouping of controllers and nested panels.
///
/// Cloning is cheap and clones refer to the same panel.
#[derive(Clone)]
pub struct Panel {
    inner: Rc<RefCell<PanelState>>,
}

/// Add-time controller selection over the initial value's shape. An
/// explicit options spec wins; otherwise the first matching shape in a
/// fixed order decides.
fn classify(value: Option<&Value>, property: &str, has_options: bool) -> Result<Kind, BindingError> {
    if value.is_none() {
        return Err(BindingError::Undefined {
            property: property.to_string(),
        });
    }
    if has_options {
        return Ok(Kind::Option);
    }
    match value {
        Some(Value::Bool(_)) => Ok(Kind::Boolean),
        Some(Value::Str(_)) => Ok(Kind::String),
        Some(Value::Func(_)) => Ok(Kind::Function),
        Some(Value::Number(_)) => Ok(Kind::Number),
        _ => Err(BindingError::Unsupported {
            property: property.to_string(),
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Option,
    Boolean,
    String,
    Function,
    Number,
}

impl Panel {
    /// Create a root panel.
    pub fn root(options: PanelOptions) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PanelState {
                name: options.name,
                closed: false,
                width: options.width,
                auto_place: options.auto_place,
                window_height: None,
                children: Vec::new(),
                parent: Weak::new(),
            })),
        }
    }

    pub(crate) fn from_state(inner: Rc<RefCell<PanelState>>) -> Self {
        Self { inner }
    }

    /// Bind a controller to a store property, selecting the widget from
    /// the property's current shape.
    pub fn add(&self, store: &SharedStore, property: &str) -> Result<Controller, BindingError> {
        self.add_inner(store, property, None, None, None)
    }

    /// Bind a numeric controller with both bounds known up front, which
    /// gives it a slider immediately.
    pub fn add_slider(
        &self,
        store: &SharedStore,
        property: &str,
        min: f64,
        max: f64,
    ) -> Result<Controller, BindingError> {
        self.add_inner(store, property, Some(min), Some(max), None)
    }

    /// Bind a dropdown controller over an explicit option set.
    pub fn add_options(
        &self,
        store: &SharedStore,
        property: &str,
        options: impl Into<Options>,
    ) -> Result<Controller, BindingError> {
        self.add_inner(store, property, None, None, Some(options.into()))
    }

    /// Bind a color controller, detecting the value's color format.
    pub fn add_color(&self, store: &SharedStore, property: &str) -> Result<Controller, BindingError> {
        let binding = Binding::bind(store, property)?;
        let initial = binding.get();
        let format = detect_format(&initial).ok_or(BindingError::Unsupported {
            property: property.to_string(),
        })?;

        let controller = Controller::attach(
            binding,
            Widget::Swatch(SwatchWidget::new(format)),
            Rc::downgrade(&self.inner),
        );
        self.adopt(controller.clone());
        Ok(controller)
    }

    /// Add a nested folder panel.
    pub fn add_folder(&self, name: impl Into<String>) -> Panel {
        let folder = Panel {
            inner: Rc::new(RefCell::new(PanelState {
                name: name.into(),
                closed: false,
                width: None,
                auto_place: false,
                window_height: None,
                children: Vec::new(),
                parent: Rc::downgrade(&self.inner),
            })),
        };
        self.inner
            .borrow_mut()
            .children
            .push(Child::Folder(folder.clone()));
        folder
    }

    /// Add a named, widgetless header row.
    pub fn add_header(&self, name: impl Into<String>) -> Header {
        let header = Header {
            inner: Rc::new(RefCell::new(HeaderState {
                name: name.into(),
                parent: Rc::downgrade(&self.inner),
            })),
        };
        self.inner
            .borrow_mut()
            .children
            .push(Child::Header(header.clone()));
        header
    }

    /// Set the title.
    pub fn name(&self, name: impl Into<String>) -> Self {
        self.inner.borrow_mut().name = name.into();
        self.clone()
    }

    /// The current title.
    pub fn label(&self) -> String {
        self.inner.borrow().name.clone()
    }

    /// Expand the child list.
    pub fn open(&self) -> Self {
        self.inner.borrow_mut().closed = false;
        self.clone()
    }

    /// Collapse the child list. Children stay alive, only hidden.
    pub fn close(&self) -> Self {
        self.inner.borrow_mut().closed = true;
        self.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.borrow().closed
    }

    /// Toggle between open and closed, as a title click does.
    pub fn toggle(&self) -> Self {
        if self.is_closed() {
            self.open()
        } else {
            self.close()
        }
    }

    /// Set the fixed width; `None` sizes to content.
    pub fn width(&self, width: Option<f64>) -> Self {
        self.inner.borrow_mut().width = width;
        self.clone()
    }

    pub fn current_width(&self) -> Option<f64> {
        self.inner.borrow().width
    }

    pub fn auto_place(&self) -> bool {
        self.inner.borrow().auto_place
    }

    /// Resize notification from the host; auto-placed panels cap their
    /// scroll height to this.
    pub fn set_window_height(&self, height: f64) {
        self.inner.borrow_mut().window_height = Some(height);
    }

    pub fn window_height(&self) -> Option<f64> {
        self.inner.borrow().window_height
    }

    pub fn is_root(&self) -> bool {
        self.inner.borrow().parent.upgrade().is_none()
    }

    /// Snapshot of the child list, in order.
    pub fn children(&self) -> Vec<Child> {
        self.inner.borrow().children.clone()
    }

    /// Destroy this panel: children first, depth first, then detach from
    /// the parent. Irreversible.
    pub fn destroy(&self) {
        let children: Vec<Child> = self.inner.borrow_mut().children.drain(..).collect();
        for child in children {
            match child {
                Child::Controller(controller) => controller.destroy(),
                Child::Folder(folder) => folder.destroy(),
                Child::Header(header) => header.destroy(),
            }
        }

        let parent = self.inner.borrow().parent.upgrade();
        if let Some(parent) = parent {
            parent.borrow_mut().remove_folder(&self.inner);
        }
        self.inner.borrow_mut().parent = Weak::new();
        log::debug!("destroyed panel \"{}\"", self.label());
    }

    fn adopt(&self, controller: Controller) {
        self.inner
            .borrow_mut()
            .children
            .push(Child::Controller(controller));
    }

    fn add_inner(
        &self,
        store: &SharedStore,
        property: &str,
        min: Option<f64>,
        max: Option<f64>,
        options: Option<Options>,
    ) -> Result<Controller, BindingError> {
        let initial = store.borrow().get(property);
        let kind = classify(initial.as_ref(), property, options.is_some())?;
        let binding = Binding::bind(store, property)?;

        let widget = match kind {
            Kind::Option => Widget::Dropdown(DropdownWidget::new(options.unwrap_or_default())),
            Kind::Boolean => Widget::Checkbox(CheckboxWidget::default()),
            Kind::String => Widget::TextBox(TextWidget::default()),
            Kind::Function => Widget::Button(ButtonWidget),
            Kind::Number => Widget::Number(NumberWidget::new(min, max, None)),
        };

        let controller = Controller::attach(binding, widget, Rc::downgrade(&self.inner));
        self.adopt(controller.clone());
        Ok(controller)
    }
}

impl std::fmt::Debug for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("Panel")
            .field("name", &state.name)
            .field("closed", &state.closed)
            .field("children", &state.children.len())
            .finish()
    }
}

struct HeaderState {
    name: String,
    parent: Weak<RefCell<PanelState>>,
}

/// A named, widgetless row separating groups of controllers.
#[derive(Clone)]
pub struct Header {
    inner: Rc<RefCell<HeaderState>>,
}

impl Header {
    pub fn name(&self, name: impl Into<String>) -> Self {
        self.inner.borrow_mut().name = name.into();
        self.clone()
    }

    pub fn label(&self) -> String {
        self.inner.borrow().name.clone()
    }

    /// Detach from the parent panel. Irreversible.
    pub fn destroy(&self) {
        let parent = self.inner.borrow().parent.upgrade();
        if let Some(parent) = parent {
            parent.borrow_mut().remove_header(&self.inner);
        }
        self.inner.borrow_mut().parent = Weak::new();
    }
}

impl std::fmt::Debug for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Header")
            .field("name", &self.inner.borrow().name)
            .finish()
    }
}
