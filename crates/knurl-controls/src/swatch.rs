//! Color swatch widget
//!
//! The host renders a swatch plus its native color input; the widget
//! keeps the canonical hex form of the bound value and routes picks
//! through the format detected at bind time.

use knurl::{ColorFormat, ControlEvent, Value};

use crate::controller::Action;

pub(crate) struct SwatchWidget {
    format: &'static ColorFormat,
    hex: String,
}

impl SwatchWidget {
    pub(crate) fn new(format: &'static ColorFormat) -> Self {
        Self {
            format,
            hex: String::new(),
        }
    }

    pub(crate) fn hex(&self) -> &str {
        &self.hex
    }

    pub(crate) fn refresh(&mut self, value: &Value) {
        self.hex = (self.format.to_hex)(value);
    }

    pub(crate) fn handle(&mut self, event: &ControlEvent) -> Vec<Action> {
        match event {
            ControlEvent::ColorPicked(hex) => {
                if self.format.is_primitive {
                    match (self.format.from_hex)(hex) {
                        Some(value) => vec![Action::Set {
                            value,
                            finished: true,
                        }],
                        // Malformed hex from the host: ignore the pick.
                        None => Vec::new(),
                    }
                } else {
                    // Object formats mutate the bound value in place.
                    vec![Action::WriteColor(hex.clone())]
                }
            }
            _ => Vec::new(),
        }
    }
}

impl std::fmt::Debug for SwatchWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwatchWidget")
            .field("format", &self.format.name)
            .field("hex", &self.hex)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use knurl::{detect_format, Rgb};

    use super::*;

    #[test]
    fn test_primitive_pick_replaces_value() {
        let value = Value::Number(0x112233 as f64);
        let format = detect_format(&value).unwrap();
        let mut widget = SwatchWidget::new(format);

        widget.refresh(&value);
        assert_eq!(widget.hex(), "#112233");

        let actions = widget.handle(&ControlEvent::ColorPicked("#abcdef".to_string()));
        match &actions[..] {
            [Action::Set { value, finished }] => {
                assert_eq!(value.as_number(), Some(0xabcdef as f64));
                assert!(finished);
            }
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn test_object_pick_mutates_in_place() {
        let value = Value::Rgb(Rgb::new(1.0, 0.0, 0.0));
        let format = detect_format(&value).unwrap();
        let mut widget = SwatchWidget::new(format);

        widget.refresh(&value);
        assert_eq!(widget.hex(), "#ff0000");

        let actions = widget.handle(&ControlEvent::ColorPicked("#00ff00".to_string()));
        assert!(matches!(&actions[..], [Action::WriteColor(hex)] if hex == "#00ff00"));
    }

    #[test]
    fn test_malformed_pick_ignored() {
        let value = Value::from("#ffffff");
        let format = detect_format(&value).unwrap();
        let mut widget = SwatchWidget::new(format);

        // The string format accepts any text, so use the int format for
        // the rejection path.
        let int_value = Value::Number(0.0);
        let mut int_widget = SwatchWidget::new(detect_format(&int_value).unwrap());
        assert!(int_widget
            .handle(&ControlEvent::ColorPicked("nope".to_string()))
            .is_empty());

        widget.refresh(&value);
        assert_eq!(widget.hex(), "#ffffff");
    }
}
