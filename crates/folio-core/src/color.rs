//! Color values and parsing.

use std::fmt;

use ratatui::style::Color;
use thiserror::Error;

/// Accent used when a palette has no usable entries.
pub const ACCENT: Rgb = Rgb::new(0xff, 0x6a, 0x00);

/// Errors produced while parsing a hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("empty color value")]
    Empty,
    #[error("invalid hex digit in color {0:?}")]
    InvalidDigit(String),
}

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS-style hex color.
    ///
    /// Accepts an optional leading `#`. Three-digit values expand each digit
    /// (`#f80` is `#ff8800`); anything else is right-padded with `0` and
    /// truncated to six digits, so `#ff6` reads as `#ffff66` but `#ff66`
    /// reads as `#ff6600`.
    pub fn parse_hex(value: &str) -> Result<Self, ColorError> {
        let digits = value.trim().trim_start_matches('#');
        if digits.is_empty() {
            return Err(ColorError::Empty);
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(value.to_string()));
        }

        let full: String = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            format!("{digits:0<6}").chars().take(6).collect()
        };

        let num = u32::from_str_radix(&full, 16)
            .map_err(|_| ColorError::InvalidDigit(value.to_string()))?;
        Ok(Self::new(
            ((num >> 16) & 0xff) as u8,
            ((num >> 8) & 0xff) as u8,
            (num & 0xff) as u8,
        ))
    }

    /// Channels as floats in `0.0..=1.0`.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Build from unit floats, clamping each channel.
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(q(r), q(g), q(b))
    }

    /// Linear blend towards `other` by `t` in `0.0..=1.0`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let a = self.to_unit();
        let b = other.to_unit();
        let t = t.clamp(0.0, 1.0);
        Rgb::from_unit(
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
        )
    }

    /// Convert to a ratatui terminal color.
    pub fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Convert HSL (hue in degrees, saturation and lightness in `0.0..=1.0`) to RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    if s == 0.0 {
        return Rgb::from_unit(l, l, l);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    Rgb::from_unit(
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_hex() {
        assert_eq!(Rgb::parse_hex("#ff6a00"), Ok(Rgb::new(255, 106, 0)));
        assert_eq!(Rgb::parse_hex("ffb45c"), Ok(Rgb::new(255, 180, 92)));
    }

    #[test]
    fn test_parse_shorthand_and_padding() {
        assert_eq!(Rgb::parse_hex("#fff"), Ok(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::parse_hex("#f80"), Ok(Rgb::new(255, 136, 0)));
        assert_eq!(Rgb::parse_hex("#ff66"), Ok(Rgb::new(255, 102, 0)));
        assert_eq!(Rgb::parse_hex("#ff6a00aa"), Ok(Rgb::new(255, 106, 0)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Rgb::parse_hex(""), Err(ColorError::Empty));
        assert_eq!(Rgb::parse_hex("#"), Err(ColorError::Empty));
        assert!(matches!(
            Rgb::parse_hex("orange"),
            Err(ColorError::InvalidDigit(_))
        ));
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(ACCENT.to_string(), "#ff6a00");
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Rgb::new(0, 255, 0));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }
}
