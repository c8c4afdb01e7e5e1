//! Dynamic value model shared between controllers and their host
//!
//! Controllers bind into a [`Store`] of named values rather than into a
//! typed struct, because the controller type is selected at runtime from
//! the value's shape. The recognized shapes form the closed [`Value`]
//! enum; anything else is rejected at bind time.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::color::Rgb;

/// A value a controller can bind to.
///
/// Function values are reference counted so that reading the value never
/// has to borrow the store for longer than a clone, and equality on them
/// is pointer identity.
#[derive(Clone)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Str(String),
    Func(Rc<dyn Fn()>),
    Rgb(Rgb),
}

impl Value {
    /// Wrap a no-argument callable.
    pub fn func(f: impl Fn() + 'static) -> Self {
        Value::Func(Rc::new(f))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_rgb(&self) -> Option<Rgb> {
        match self {
            Value::Rgb(rgb) => Some(*rgb),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Rgb(a), Value::Rgb(b)) => a == b,
            (Value::Func(a), Value::Func(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Func(_) => f.write_str("Func(..)"),
            Value::Rgb(rgb) => f.debug_tuple("Rgb").field(rgb).finish(),
        }
    }
}

/// Textual form used by displays that fall back to showing the raw value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Func(_) => f.write_str("function"),
            Value::Rgb(rgb) => write!(f, "{rgb}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Rgb> for Value {
    fn from(rgb: Rgb) -> Self {
        Value::Rgb(rgb)
    }
}

/// An insertion-ordered bag of named values.
///
/// This is the "plain object" of the binding layer. Hosts populate it,
/// share it as a [`SharedStore`], and hand it to a panel's `add` calls;
/// controllers then read and write individual properties through their
/// bindings.
#[derive(Debug, Default)]
pub struct Store {
    entries: HashMap<String, Value>,
    order: Vec<String>,
}

/// A store shared between the host and any number of controllers.
pub type SharedStore = Rc<RefCell<Store>>;

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert for literal store construction.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a property.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        if !self.entries.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.entries.insert(name, value.into());
    }

    /// Read a property by name.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.entries.get(name).cloned()
    }

    /// Replace a property's value. Inserting through here keeps the
    /// insertion order bookkeeping consistent.
    pub fn set(&mut self, name: &str, value: Value) {
        if !self.entries.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.entries.insert(name.to_string(), value);
    }

    /// Mutate a property's value in place.
    pub fn update<R>(&mut self, name: &str, f: impl FnOnce(&mut Value) -> R) -> Option<R> {
        self.entries.get_mut(name).map(f)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Property names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move the store behind a shared handle.
    pub fn shared(self) -> SharedStore {
        Rc::new(RefCell::new(self))
    }
}
