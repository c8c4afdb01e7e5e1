//! Binding error types

use thiserror::Error;

/// Errors raised when attaching a controller to a store property.
///
/// These are the framework's only hard failures: they fire synchronously
/// at add time and no partial controller is created. Everything that can
/// go wrong during interaction is absorbed silently instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The property is absent from the store.
    #[error("property \"{property}\" of the store is undefined")]
    Undefined { property: String },

    /// The property's value matches no recognized controller shape.
    #[error("no suitable controller type for property \"{property}\"")]
    Unsupported { property: String },

    /// The controller was already detached from its panel.
    #[error("controller for \"{property}\" is detached from its panel")]
    Detached { property: String },
}
