//! Rendering boundary between the controllers and the host
//!
//! The core never touches a concrete rendering technology. Everything it
//! needs from the outside world is collected in the [`Surface`] trait:
//! geometry for the slider track, scroll-container state for touch
//! gesture arbitration, and a one-time style installation hook. The host
//! implements it once per panel technology (DOM, retained scene graph,
//! test stub) and passes it into `handle_event` calls.

use thiserror::Error;

use crate::geometry::Rect;
use crate::theme::Theme;

/// Errors surfaced by a host's rendering side.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// Stylesheet/theme installation failed.
    #[error("style injection failed: {0}")]
    Inject(String),
}

/// Host-implemented platform queries.
///
/// Query methods must not call back into the controller they were handed
/// to; they run while the controller's state is borrowed.
pub trait Surface {
    /// Current bounding box of the receiving controller's slider track,
    /// in window coordinates. Polled on every gesture event rather than
    /// cached, so hosts can relayout freely mid-drag.
    fn slider_rect(&self) -> Rect;

    /// Whether the panel's scroll container currently shows a
    /// scrollbar. Drives the touch-drag vs. page-scroll arbitration.
    fn scrollbar_visible(&self) -> bool;

    /// Install the panel stylesheet for the given theme.
    fn inject_theme(&self, theme: &Theme) -> Result<(), SurfaceError>;
}
