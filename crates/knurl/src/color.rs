//! Color value formats and hex conversion
//!
//! A color controller accepts three value shapes: a `#rrggbb` string, a
//! packed 24-bit integer, and an object of normalized channels. Each
//! shape is described by a [`ColorFormat`] that converts to and from the
//! canonical hex-string form. Detection scans [`FORMATS`] front to back,
//! so the object format sits last: it is the least specific match.

use crate::value::Value;

/// Normalized RGB color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Convert 8-bit channels to normalized form.
    pub const fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// One recognized color value shape and its hex conversions.
///
/// Detection runs once when a color controller binds; a bound value that
/// later changes shape is unsupported.
pub struct ColorFormat {
    pub name: &'static str,
    /// Primitive formats are written by replacing the bound value;
    /// non-primitive formats mutate the existing value object in place.
    pub is_primitive: bool,
    /// Shape predicate for detection.
    pub matches: fn(&Value) -> bool,
    /// Decode `#rrggbb` into a fresh value of this shape. `None` when
    /// the text is not valid hex.
    pub from_hex: fn(&str) -> Option<Value>,
    /// Encode a value of this shape as `#rrggbb`.
    pub to_hex: fn(&Value) -> String,
}

/// Hex-string colors, e.g. `"#00adff"`.
pub static STRING: ColorFormat = ColorFormat {
    name: "string",
    is_primitive: true,
    matches: |value| matches!(value, Value::Str(_)),
    from_hex: |text| Some(Value::Str(text.to_string())),
    to_hex: |value| match value {
        Value::Str(s) => s.clone(),
        _ => String::new(),
    },
};

/// Packed integer colors, e.g. `0x00adff`.
pub static INT: ColorFormat = ColorFormat {
    name: "int",
    is_primitive: true,
    matches: |value| matches!(value, Value::Number(_)),
    from_hex: |text| parse_hex(text).map(|int| Value::Number(int as f64)),
    to_hex: |value| match value {
        Value::Number(n) => int_to_hex(*n as u32),
        _ => String::new(),
    },
};

/// Normalized channel-object colors.
///
/// Channels are packed without clamping: a channel outside `[0, 1]`
/// overflows into the neighboring bit fields through the shift/XOR
/// combine. Callers own keeping channels in range.
pub static RGB: ColorFormat = ColorFormat {
    name: "rgb",
    is_primitive: false,
    matches: |value| matches!(value, Value::Rgb(_)),
    from_hex: |text| {
        let mut rgb = Rgb::default();
        rgb_from_hex(text, &mut rgb).then_some(Value::Rgb(rgb))
    },
    to_hex: |value| match value {
        Value::Rgb(rgb) => int_to_hex(pack_rgb(rgb)),
        _ => String::new(),
    },
};

/// Recognized formats in detection order. The object format must stay
/// last: its predicate is the least specific.
pub static FORMATS: [&ColorFormat; 3] = [&STRING, &INT, &RGB];

/// First format whose predicate matches the value's shape.
pub fn detect_format(value: &Value) -> Option<&'static ColorFormat> {
    FORMATS.iter().copied().find(|format| (format.matches)(value))
}

/// Decode `#rrggbb` into an existing channel object. The target is
/// mutated in place because bound color objects are long-lived; returns
/// false and leaves the target untouched on malformed input.
pub fn rgb_from_hex(text: &str, target: &mut Rgb) -> bool {
    let Some(int) = parse_hex(text) else {
        return false;
    };
    target.r = ((int >> 16) & 255) as f64 / 255.0;
    target.g = ((int >> 8) & 255) as f64 / 255.0;
    target.b = (int & 255) as f64 / 255.0;
    true
}

fn parse_hex(text: &str) -> Option<u32> {
    let digits = text.strip_prefix('#')?;
    u32::from_str_radix(digits, 16).ok()
}

fn int_to_hex(value: u32) -> String {
    format!("#{value:06x}")
}

fn pack_rgb(rgb: &Rgb) -> u32 {
    let r = (rgb.r * 255.0) as i64 as u32;
    let g = (rgb.g * 255.0) as i64 as u32;
    let b = (rgb.b * 255.0) as i64 as u32;
    r.wrapping_shl(16) ^ g.wrapping_shl(8) ^ b
}
