//! End-to-end flows through panel, controller and store.

use std::cell::Cell;
use std::rc::Rc;

use knurl::{ControlEvent, Key, Rect, Rgb, Store, Surface, SurfaceError, Theme, Value};
use knurl_controls::{Panel, PanelOptions};

struct TestSurface {
    rect: Rect,
    scrollbar: bool,
}

impl TestSurface {
    fn new() -> Self {
        Self {
            rect: Rect::from_min_size([0.0, 0.0], [100.0, 20.0]),
            scrollbar: false,
        }
    }

    fn scrollable() -> Self {
        Self {
            scrollbar: true,
            ..Self::new()
        }
    }
}

impl Surface for TestSurface {
    fn slider_rect(&self) -> Rect {
        self.rect
    }

    fn scrollbar_visible(&self) -> bool {
        self.scrollbar
    }

    fn inject_theme(&self, _theme: &Theme) -> Result<(), SurfaceError> {
        Ok(())
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Default)]
struct Counters {
    changed: Rc<Cell<u32>>,
    finished: Rc<Cell<u32>>,
}

impl Counters {
    fn wire(&self, controller: &knurl_controls::Controller) {
        let changed = self.changed.clone();
        let finished = self.finished.clone();
        controller
            .on_change(move |_| changed.set(changed.get() + 1))
            .on_finish_change(move |_| finished.set(finished.get() + 1));
    }

    fn counts(&self) -> (u32, u32) {
        (self.changed.get(), self.finished.get())
    }
}

#[test]
fn set_value_fires_change_once_and_finish_iff_finished() {
    init_logging();
    let store = Store::new().with("speed", 1.0).shared();
    let panel = Panel::root(PanelOptions::default());
    let controller = panel.add(&store, "speed").unwrap();

    let counters = Counters::default();
    counters.wire(&controller);

    controller.set_value(Value::Number(2.0), false);
    assert_eq!(counters.counts(), (1, 0));

    controller.set_value(Value::Number(3.0), true);
    assert_eq!(counters.counts(), (2, 1));
    assert_eq!(store.borrow().get("speed"), Some(Value::Number(3.0)));
}

#[test]
fn callbacks_receive_the_written_value() {
    init_logging();
    let store = Store::new().with("speed", 1.0).shared();
    let panel = Panel::root(PanelOptions::default());
    let controller = panel.add(&store, "speed").unwrap();

    let seen = Rc::new(Cell::new(0.0));
    {
        let seen = seen.clone();
        controller.on_change(move |value| seen.set(value.as_number().unwrap_or(f64::NAN)));
    }

    controller.set_value(Value::Number(4.25), true);
    assert_eq!(seen.get(), 4.25);
}

#[test]
fn callback_registration_replaces_not_accumulates() {
    init_logging();
    let store = Store::new().with("speed", 1.0).shared();
    let panel = Panel::root(PanelOptions::default());
    let controller = panel.add(&store, "speed").unwrap();

    let first = Rc::new(Cell::new(0u32));
    let second = Rc::new(Cell::new(0u32));
    {
        let first = first.clone();
        controller.on_change(move |_| first.set(first.get() + 1));
    }
    {
        let second = second.clone();
        controller.on_change(move |_| second.set(second.get() + 1));
    }

    controller.set_value(Value::Number(2.0), true);
    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
}

#[test]
fn callback_reregistration_from_inside_wins() {
    init_logging();
    let store = Store::new().with("speed", 1.0).shared();
    let panel = Panel::root(PanelOptions::default());
    let controller = panel.add(&store, "speed").unwrap();

    let outer = Rc::new(Cell::new(0u32));
    let inner = Rc::new(Cell::new(0u32));
    {
        let outer = outer.clone();
        let inner = inner.clone();
        let handle = controller.clone();
        controller.on_change(move |_| {
            outer.set(outer.get() + 1);
            let inner = inner.clone();
            handle.on_change(move |_| inner.set(inner.get() + 1));
        });
    }

    controller.set(2.0);
    assert_eq!((outer.get(), inner.get()), (1, 0));

    // The replacement registered mid-fire sticks; the framework must not
    // restore the old callback over it.
    controller.set(3.0);
    assert_eq!((outer.get(), inner.get()), (1, 1));
}

#[test]
fn option_flow_selects_and_writes() {
    init_logging();
    let store = Store::new().with("size", 2.0).shared();
    let panel = Panel::root(PanelOptions::default());
    let surface = TestSurface::new();

    let controller = panel
        .add_options(&store, "size", [("Small", 1.0), ("Medium", 2.0), ("Large", 3.0)])
        .unwrap();
    assert_eq!(controller.selection_label().as_deref(), Some("Medium"));
    assert_eq!(controller.selected(), Some(1));

    let counters = Counters::default();
    counters.wire(&controller);

    controller.handle_event(&ControlEvent::Select(2), &surface);
    assert_eq!(store.borrow().get("size"), Some(Value::Number(3.0)));
    assert_eq!(counters.counts(), (1, 1));
    assert_eq!(controller.selection_label().as_deref(), Some("Large"));
}

#[test]
fn option_display_falls_back_on_foreign_value() {
    init_logging();
    let store = Store::new().with("size", 9.0).shared();
    let panel = Panel::root(PanelOptions::default());

    let controller = panel
        .add_options(&store, "size", [("Small", 1.0), ("Large", 3.0)])
        .unwrap();
    assert_eq!(controller.selected(), None);
    assert_eq!(controller.selection_label().as_deref(), Some("9"));
}

#[test]
fn number_typing_clamps_without_snapping() {
    init_logging();
    let store = Store::new().with("speed", 1.0).shared();
    let panel = Panel::root(PanelOptions::default());
    let surface = TestSurface::new();

    let controller = panel.add_slider(&store, "speed", 0.0, 10.0).unwrap();
    let counters = Counters::default();
    counters.wire(&controller);

    controller.handle_event(&ControlEvent::InputFocus, &surface);
    controller.handle_event(&ControlEvent::InputChanged("7.5".to_string()), &surface);

    // Typed values clamp but keep sub-step precision; only the change
    // callback fires.
    assert_eq!(store.borrow().get("speed"), Some(Value::Number(7.5)));
    assert_eq!(counters.counts(), (1, 0));

    // The increment key then snaps onto the implicit 0.01 grid.
    controller.handle_event(
        &ControlEvent::KeyDown {
            key: Key::ArrowUp,
            shift: false,
        },
        &surface,
    );
    assert_eq!(store.borrow().get("speed"), Some(Value::Number(7.51)));
    assert_eq!(counters.counts(), (2, 0));

    // Enter commits: finish fires and the shown text normalizes.
    controller.handle_event(
        &ControlEvent::KeyDown {
            key: Key::Enter,
            shift: false,
        },
        &surface,
    );
    assert_eq!(counters.counts(), (2, 1));
    assert_eq!(controller.text().as_deref(), Some("7.51"));
}

#[test]
fn number_out_of_range_typing_clamps() {
    init_logging();
    let store = Store::new().with("speed", 1.0).shared();
    let panel = Panel::root(PanelOptions::default());
    let surface = TestSurface::new();

    let controller = panel.add_slider(&store, "speed", 0.0, 10.0).unwrap();
    controller.handle_event(&ControlEvent::InputChanged("99".to_string()), &surface);
    assert_eq!(store.borrow().get("speed"), Some(Value::Number(10.0)));

    controller.handle_event(&ControlEvent::InputChanged("junk".to_string()), &surface);
    // Parse failures leave the last good value alone.
    assert_eq!(store.borrow().get("speed"), Some(Value::Number(10.0)));
}

#[test]
fn slider_drag_maps_commits_and_finishes() {
    init_logging();
    let store = Store::new().with("speed", 0.0).shared();
    let panel = Panel::root(PanelOptions::default());
    let surface = TestSurface::new();

    let controller = panel.add_slider(&store, "speed", 0.0, 10.0).unwrap();
    let counters = Counters::default();
    counters.wire(&controller);

    controller.handle_event(&ControlEvent::SliderPointerDown { x: 50.0 }, &surface);
    assert_eq!(store.borrow().get("speed"), Some(Value::Number(5.0)));
    assert_eq!(controller.fill(), Some(0.5));

    controller.handle_event(&ControlEvent::PointerMove { x: 75.0 }, &surface);
    assert_eq!(store.borrow().get("speed"), Some(Value::Number(7.5)));

    controller.handle_event(&ControlEvent::PointerUp, &surface);
    assert_eq!(counters.counts(), (2, 1));
}

#[test]
fn touch_gesture_commits_or_aborts_by_direction() {
    init_logging();
    let store = Store::new().with("speed", 0.0).shared();
    let panel = Panel::root(PanelOptions::default());
    let surface = TestSurface::scrollable();

    let controller = panel.add_slider(&store, "speed", 0.0, 10.0).unwrap();
    let counters = Counters::default();
    counters.wire(&controller);

    // Mostly-horizontal first move commits and keeps dragging.
    controller.handle_event(
        &ControlEvent::SliderTouchStart {
            x: 10.0,
            y: 5.0,
            touches: 1,
        },
        &surface,
    );
    controller.handle_event(&ControlEvent::TouchMove { x: 30.0, y: 7.0 }, &surface);
    assert_eq!(store.borrow().get("speed"), Some(Value::Number(3.0)));
    controller.handle_event(&ControlEvent::TouchEnd, &surface);
    assert_eq!(counters.counts(), (1, 1));

    // Mostly-vertical first move is a page scroll: no write, no finish.
    let before = store.borrow().get("speed");
    controller.handle_event(
        &ControlEvent::SliderTouchStart {
            x: 12.0,
            y: 5.0,
            touches: 1,
        },
        &surface,
    );
    controller.handle_event(&ControlEvent::TouchMove { x: 14.0, y: 25.0 }, &surface);
    controller.handle_event(&ControlEvent::TouchEnd, &surface);
    assert_eq!(store.borrow().get("speed"), before);
    assert_eq!(counters.counts(), (1, 1));
}

#[test]
fn function_controller_invokes_bound_function() {
    init_logging();
    let fired = Rc::new(Cell::new(0u32));
    let store = {
        let fired = fired.clone();
        Store::new()
            .with("fire", Value::func(move || fired.set(fired.get() + 1)))
            .shared()
    };
    let panel = Panel::root(PanelOptions::default());
    let surface = TestSurface::new();

    let controller = panel.add(&store, "fire").unwrap();
    controller.handle_event(&ControlEvent::Click, &surface);
    controller.handle_event(&ControlEvent::Click, &surface);
    assert_eq!(fired.get(), 2);
}

#[test]
fn boolean_controller_toggles_with_finish() {
    init_logging();
    let store = Store::new().with("enabled", false).shared();
    let panel = Panel::root(PanelOptions::default());
    let surface = TestSurface::new();

    let controller = panel.add(&store, "enabled").unwrap();
    let counters = Counters::default();
    counters.wire(&controller);

    controller.handle_event(&ControlEvent::Click, &surface);
    assert_eq!(store.borrow().get("enabled"), Some(Value::Bool(true)));
    assert_eq!(controller.checked(), Some(true));
    assert_eq!(counters.counts(), (1, 1));
}

#[test]
fn string_controller_live_edits_and_finishes_on_blur() {
    init_logging();
    let store = Store::new().with("label", "hi").shared();
    let panel = Panel::root(PanelOptions::default());
    let surface = TestSurface::new();

    let controller = panel.add(&store, "label").unwrap();
    let counters = Counters::default();
    counters.wire(&controller);

    controller.handle_event(&ControlEvent::InputChanged("hiya".to_string()), &surface);
    assert_eq!(store.borrow().get("label"), Some(Value::from("hiya")));
    assert_eq!(counters.counts(), (1, 0));

    controller.handle_event(&ControlEvent::InputBlur, &surface);
    assert_eq!(counters.counts(), (1, 1));
}

#[test]
fn color_object_format_mutates_in_place() {
    init_logging();
    let store = Store::new().with("tint", Rgb::new(1.0, 0.0, 0.0)).shared();
    let panel = Panel::root(PanelOptions::default());
    let surface = TestSurface::new();

    let controller = panel.add_color(&store, "tint").unwrap();
    assert_eq!(controller.hex().as_deref(), Some("#ff0000"));

    let counters = Counters::default();
    counters.wire(&controller);

    controller.handle_event(&ControlEvent::ColorPicked("#0080ff".to_string()), &surface);
    let tint = store.borrow().get("tint").and_then(|v| v.as_rgb()).unwrap();
    assert_eq!(tint.r, 0.0);
    assert_eq!(tint.g, 128.0 / 255.0);
    assert_eq!(tint.b, 1.0);
    assert_eq!(counters.counts(), (1, 1));
    assert_eq!(controller.hex().as_deref(), Some("#0080ff"));
}

#[test]
fn color_int_format_replaces_value() {
    init_logging();
    let store = Store::new().with("tint", 0x112233).shared();
    let panel = Panel::root(PanelOptions::default());
    let surface = TestSurface::new();

    let controller = panel.add_color(&store, "tint").unwrap();
    controller.handle_event(&ControlEvent::ColorPicked("#abcdef".to_string()), &surface);
    assert_eq!(
        store.borrow().get("tint"),
        Some(Value::Number(0xabcdef as f64))
    );
}

#[test]
fn options_replacement_preserves_display_name() {
    init_logging();
    let store = Store::new().with("size", 2.0).shared();
    let panel = Panel::root(PanelOptions::default());

    let number = panel.add(&store, "size").unwrap().name("Shirt size");
    assert_eq!(panel.children().len(), 1);

    let dropdown = number
        .options([("Small", 1.0), ("Medium", 2.0), ("Large", 3.0)])
        .unwrap();
    assert_eq!(dropdown.label(), "Shirt size");
    assert_eq!(dropdown.selection_label().as_deref(), Some("Medium"));
    // The number controller is gone; only the dropdown remains.
    assert_eq!(panel.children().len(), 1);
}

#[test]
fn disabled_controller_ignores_events() {
    init_logging();
    let store = Store::new().with("speed", 1.0).shared();
    let panel = Panel::root(PanelOptions::default());
    let surface = TestSurface::new();

    let controller = panel.add_slider(&store, "speed", 0.0, 10.0).unwrap();
    controller.disable();

    controller.handle_event(&ControlEvent::SliderPointerDown { x: 50.0 }, &surface);
    assert_eq!(store.borrow().get("speed"), Some(Value::Number(1.0)));

    controller.enable(true);
    controller.handle_event(&ControlEvent::SliderPointerDown { x: 50.0 }, &surface);
    assert_eq!(store.borrow().get("speed"), Some(Value::Number(5.0)));
}

#[test]
fn external_store_writes_show_on_refresh() {
    init_logging();
    let store = Store::new().with("speed", 1.0).shared();
    let panel = Panel::root(PanelOptions::default());

    let controller = panel.add(&store, "speed").unwrap();
    assert_eq!(controller.text().as_deref(), Some("1"));

    // The host wrote behind the controller's back; the next refresh
    // simply reflects it.
    store.borrow_mut().set("speed", Value::Number(8.0));
    assert_eq!(controller.text().as_deref(), Some("1"));
    controller.update_display();
    assert_eq!(controller.text().as_deref(), Some("8"));
}

#[test]
fn lazy_slider_appears_through_fluent_bounds() {
    init_logging();
    let store = Store::new().with("speed", 1.0).shared();
    let panel = Panel::root(PanelOptions::default());
    let surface = TestSurface::new();

    let controller = panel.add(&store, "speed").unwrap();
    assert_eq!(controller.fill(), None);

    controller.min(0.0);
    assert_eq!(controller.fill(), None);
    controller.max(10.0);
    // Both bounds known: the slider exists and reflects the value.
    assert_eq!(controller.fill(), Some(0.1));

    controller.handle_event(&ControlEvent::SliderPointerDown { x: 30.0 }, &surface);
    assert_eq!(store.borrow().get("speed"), Some(Value::Number(3.0)));
}
