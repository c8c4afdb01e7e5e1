//! Checkbox widget for boolean properties

use knurl::{ControlEvent, Value};

use crate::controller::Action;

#[derive(Debug, Default)]
pub(crate) struct CheckboxWidget {
    checked: bool,
}

impl CheckboxWidget {
    pub(crate) fn checked(&self) -> bool {
        self.checked
    }

    pub(crate) fn refresh(&mut self, value: &Value) {
        if let Value::Bool(checked) = value {
            self.checked = *checked;
        }
    }

    pub(crate) fn handle(&mut self, value: &Value, event: &ControlEvent) -> Vec<Action> {
        match (value, event) {
            // Toggles are atomic edits; the finish callback always fires.
            (Value::Bool(checked), ControlEvent::Click) => vec![Action::Set {
                value: Value::Bool(!checked),
                finished: true,
            }],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_toggles() {
        let mut widget = CheckboxWidget::default();

        let actions = widget.handle(&Value::Bool(false), &ControlEvent::Click);
        match &actions[..] {
            [Action::Set { value, finished }] => {
                assert_eq!(value.as_bool(), Some(true));
                assert!(finished);
            }
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn test_refresh_mirrors_value() {
        let mut widget = CheckboxWidget::default();
        widget.refresh(&Value::Bool(true));
        assert!(widget.checked());
        widget.refresh(&Value::Bool(false));
        assert!(!widget.checked());
    }
}
