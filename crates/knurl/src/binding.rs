//! The (store, property) pair a controller reads and writes

use std::rc::Rc;

use crate::error::BindingError;
use crate::value::{SharedStore, Value};

/// A controller's handle onto one store property.
///
/// The binding shares the store but never manages it; it is only used
/// for read and write. Two invariants hold for its whole life: the
/// property exists (checked at [`Binding::bind`] time), and its value
/// keeps the shape it had then. A host that swaps the shape out from
/// under a live controller gets undefined display behavior.
#[derive(Clone)]
pub struct Binding {
    store: SharedStore,
    property: String,
}

impl Binding {
    /// Attach to a property, rejecting absent ones up front so no
    /// partially-working controller can be built.
    pub fn bind(store: &SharedStore, property: &str) -> Result<Self, BindingError> {
        if !store.borrow().contains(property) {
            return Err(BindingError::Undefined {
                property: property.to_string(),
            });
        }
        Ok(Self {
            store: Rc::clone(store),
            property: property.to_string(),
        })
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Read the bound value.
    pub fn get(&self) -> Value {
        self.store
            .borrow()
            .get(&self.property)
            .expect("bound property vanished from its store")
    }

    /// Replace the bound value.
    pub fn set(&self, value: Value) {
        self.store.borrow_mut().set(&self.property, value);
    }

    /// Mutate the bound value in place. Used by the object color format,
    /// which edits a long-lived channel object instead of replacing it.
    pub fn update<R>(&self, f: impl FnOnce(&mut Value) -> R) -> R {
        self.store
            .borrow_mut()
            .update(&self.property, f)
            .expect("bound property vanished from its store")
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("property", &self.property)
            .finish()
    }
}
