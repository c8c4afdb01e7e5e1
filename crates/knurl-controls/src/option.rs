//! Dropdown widget backed by parallel name/value sequences

use knurl::{ControlEvent, Value};

use crate::controller::Action;

/// An option set for a dropdown controller.
///
/// A map spec contributes its keys as display names and its values as
/// the written values; a list spec serves as both, with the values'
/// textual form as the names. Order is preserved either way.
#[derive(Debug, Clone, Default)]
pub struct Options {
    names: Vec<String>,
    values: Vec<Value>,
}

impl Options {
    /// Build from a plain list; entries display as their textual form.
    pub fn list<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let names = values.iter().map(|value| value.to_string()).collect();
        Self { names, values }
    }

    /// Build from name/value pairs.
    pub fn map<K: Into<String>, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        let (names, values) = entries
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .unzip();
        Self { names, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> From<Vec<(K, V)>> for Options {
    fn from(entries: Vec<(K, V)>) -> Self {
        Self::map(entries)
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Options {
    fn from(entries: [(K, V); N]) -> Self {
        Self::map(entries)
    }
}

#[derive(Debug)]
pub(crate) struct DropdownWidget {
    names: Vec<String>,
    values: Vec<Value>,
    selected: Option<usize>,
    display: String,
}

impl DropdownWidget {
    pub(crate) fn new(options: Options) -> Self {
        Self {
            names: options.names,
            values: options.values,
            selected: None,
            display: String::new(),
        }
    }

    pub(crate) fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub(crate) fn display(&self) -> &str {
        &self.display
    }

    pub(crate) fn refresh(&mut self, value: &Value) {
        let index = self.values.iter().position(|candidate| candidate == value);
        self.selected = index;
        self.display = match index {
            Some(index) => self.names[index].clone(),
            // Value not in the option set: show its raw form instead of
            // failing.
            None => value.to_string(),
        };
    }

    pub(crate) fn handle(&mut self, event: &ControlEvent) -> Vec<Action> {
        match event {
            ControlEvent::Select(index) if *index < self.values.len() => vec![Action::Set {
                value: self.values[*index].clone(),
                finished: true,
            }],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes() -> DropdownWidget {
        DropdownWidget::new(Options::map([("Small", 1.0), ("Medium", 2.0), ("Large", 3.0)]))
    }

    #[test]
    fn test_display_resolves_current_value() {
        let mut widget = sizes();
        widget.refresh(&Value::Number(2.0));
        assert_eq!(widget.selected(), Some(1));
        assert_eq!(widget.display(), "Medium");
    }

    #[test]
    fn test_display_falls_back_on_unknown_value() {
        let mut widget = sizes();
        widget.refresh(&Value::Number(7.0));
        assert_eq!(widget.selected(), None);
        assert_eq!(widget.display(), "7");
    }

    #[test]
    fn test_select_writes_matching_value() {
        let mut widget = sizes();
        let actions = widget.handle(&ControlEvent::Select(2));
        match &actions[..] {
            [Action::Set { value, finished }] => {
                assert_eq!(value.as_number(), Some(3.0));
                assert!(finished);
            }
            other => panic!("unexpected actions: {other:?}"),
        }

        assert!(widget.handle(&ControlEvent::Select(9)).is_empty());
    }

    #[test]
    fn test_list_spec_serves_as_names_and_values() {
        let options = Options::list(["low", "high"]);
        assert_eq!(options.len(), 2);

        let mut widget = DropdownWidget::new(options);
        widget.refresh(&Value::from("high"));
        assert_eq!(widget.selected(), Some(1));
        assert_eq!(widget.display(), "high");
        assert_eq!(widget.names(), ["low", "high"]);
    }
}
