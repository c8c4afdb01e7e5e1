//! Stock panel palettes and the one-time style installation hook

use std::sync::Once;

use crate::color::Rgb;
use crate::surface::Surface;

/// Role-named colors for panel chrome and widgets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub background: Rgb,
    pub foreground: Rgb,
    pub widget_background: Rgb,
    pub widget_foreground: Rgb,
    pub focus_background: Rgb,
    pub focus_foreground: Rgb,
    /// Accent for numeric widget text and slider fill.
    pub number_accent: Rgb,
    /// Accent for string widget text.
    pub string_accent: Rgb,
    pub title_background: Rgb,
}

/// Default dark palette.
pub const DARK: Theme = Theme {
    background: Rgb::from_bytes(0x1a, 0x1a, 0x1a),
    foreground: Rgb::from_bytes(0xee, 0xee, 0xee),
    widget_background: Rgb::from_bytes(0x3c, 0x3c, 0x3c),
    widget_foreground: Rgb::from_bytes(0xee, 0xee, 0xee),
    focus_background: Rgb::from_bytes(0x4d, 0x4d, 0x4d),
    focus_foreground: Rgb::from_bytes(0xff, 0xff, 0xff),
    number_accent: Rgb::from_bytes(0x00, 0xad, 0xff),
    string_accent: Rgb::from_bytes(0x1e, 0xd3, 0x6f),
    title_background: Rgb::from_bytes(0x11, 0x11, 0x11),
};

/// Light palette after the solarized scheme.
pub const SOLARIZED: Theme = Theme {
    background: Rgb::from_bytes(0xfd, 0xf6, 0xe3),
    foreground: Rgb::from_bytes(0x65, 0x7b, 0x83),
    widget_background: Rgb::from_bytes(0xee, 0xe8, 0xd5),
    widget_foreground: Rgb::from_bytes(0x65, 0x7b, 0x83),
    focus_background: Rgb::from_bytes(0x65, 0x7b, 0x83),
    focus_foreground: Rgb::from_bytes(0xee, 0xe8, 0xd5),
    number_accent: Rgb::from_bytes(0x26, 0x8b, 0xd2),
    string_accent: Rgb::from_bytes(0x85, 0x99, 0x00),
    title_background: Rgb::from_bytes(0xee, 0xe8, 0xd5),
};

impl Default for Theme {
    fn default() -> Self {
        DARK
    }
}

static INSTALL: Once = Once::new();

/// Install the theme on the surface, once per process.
///
/// Repeat calls are no-ops. Failure is reported through the log and
/// otherwise ignored; the panel keeps working with the host's fallback
/// styling.
pub fn install(surface: &dyn Surface, theme: &Theme) {
    INSTALL.call_once(|| {
        if let Err(err) = surface.inject_theme(theme) {
            log::warn!("failed to install panel theme: {err}");
        }
    });
}
