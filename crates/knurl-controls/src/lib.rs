//! # knurl-controls
//!
//! Bound interactive controllers and panels for knurl.
//!
//! A [`Panel`] inspects a store property's shape and binds the matching
//! controller: checkbox, text box, number box with optional slider,
//! dropdown, button or color swatch. Each [`Controller`] keeps the store
//! and its widget display synchronized in both directions; the host
//! feeds it input through `handle_event` and renders from its display
//! projections.

mod boolean;
mod controller;
mod function;
mod number;
mod option;
mod panel;
mod string;
mod swatch;

pub use controller::Controller;
pub use option::Options;
pub use panel::{Child, Header, Panel, PanelOptions};
