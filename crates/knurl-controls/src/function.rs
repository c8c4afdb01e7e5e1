//! Button widget for function properties

use knurl::ControlEvent;

use crate::controller::Action;

/// The button has no display state of its own; the controller label is
/// the visible text and activation goes straight to the bound function.
#[derive(Debug, Default)]
pub(crate) struct ButtonWidget;

impl ButtonWidget {
    pub(crate) fn handle(&mut self, event: &ControlEvent) -> Vec<Action> {
        match event {
            ControlEvent::Click => vec![Action::Invoke],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_invokes() {
        let mut widget = ButtonWidget;
        assert!(matches!(
            &widget.handle(&ControlEvent::Click)[..],
            [Action::Invoke]
        ));
        assert!(widget.handle(&ControlEvent::InputBlur).is_empty());
    }
}
