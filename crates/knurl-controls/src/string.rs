//! Text box widget for string properties

use knurl::{ControlEvent, Key, Value};

use crate::controller::Action;

#[derive(Debug, Default)]
pub(crate) struct TextWidget {
    text: String,
}

impl TextWidget {
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn refresh(&mut self, value: &Value) {
        if let Value::Str(text) = value {
            self.text = text.clone();
        }
    }

    pub(crate) fn handle(&mut self, event: &ControlEvent) -> Vec<Action> {
        match event {
            // Every keystroke writes; the edit only counts as finished
            // on blur or Enter.
            ControlEvent::InputChanged(text) => {
                self.text = text.clone();
                vec![Action::Set {
                    value: Value::Str(text.clone()),
                    finished: false,
                }]
            }
            ControlEvent::InputBlur => vec![Action::Finish],
            ControlEvent::KeyDown { key: Key::Enter, .. } => vec![Action::Finish],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edits_write_unfinished() {
        let mut widget = TextWidget::default();

        let actions = widget.handle(&ControlEvent::InputChanged("he".to_string()));
        match &actions[..] {
            [Action::Set { value, finished }] => {
                assert_eq!(value.as_str(), Some("he"));
                assert!(!finished);
            }
            other => panic!("unexpected actions: {other:?}"),
        }
        assert_eq!(widget.text(), "he");
    }

    #[test]
    fn test_blur_and_enter_finish() {
        let mut widget = TextWidget::default();
        assert!(matches!(
            &widget.handle(&ControlEvent::InputBlur)[..],
            [Action::Finish]
        ));
        assert!(matches!(
            &widget.handle(&ControlEvent::KeyDown {
                key: Key::Enter,
                shift: false
            })[..],
            [Action::Finish]
        ));
    }
}
