// SPDX-License-Identifier: MIT
//
// cf-variant color — plain RGBA floats, exactly what the cosine formula emits.
//
// Palette samples are produced per channel as `a + b * cos(...)`, which can
// land anywhere on the real line. The Color type therefore stores raw,
// unclamped f32 channels. Clamping happens only at the output boundary
// (`to_rgb8`, `to_hex`), where a host decides how to render the value.
//
// Interpolation is a straight per-channel lerp, matching how a gradient
// resource blends two neighbouring stops.

use std::fmt;

use serde::Deserialize;

// ─── Color ───────────────────────────────────────────────────────────────────

/// An RGBA color with unclamped floating-point channels.
///
/// # Examples
///
/// ```
/// use cf_variant::color::Color;
///
/// let orange = Color::rgb(1.0, 0.5, 0.0);
/// assert_eq!(orange.to_hex(), "#ff8000");
///
/// let midway = Color::BLACK.lerp(&Color::WHITE, 0.5);
/// assert!((midway.r - 0.5).abs() < 1e-6);
/// ```
#[derive(Clone, Copy, PartialEq, Deserialize)]
pub struct Color {
    /// Red channel. Nominally 0.0–1.0.
    pub r: f32,
    /// Green channel. Nominally 0.0–1.0.
    pub g: f32,
    /// Blue channel. Nominally 0.0–1.0.
    pub b: f32,
    /// Alpha (opacity): 0.0 (transparent) to 1.0 (opaque).
    #[serde(default = "opaque")]
    pub a: f32,
}

const fn opaque() -> f32 {
    1.0
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create an opaque color from float channels.
    #[inline]
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from float channels with alpha.
    #[inline]
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels.
    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Create a color from 8-bit channels with alpha.
    #[must_use]
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Create a color from a hex string.
    ///
    /// Supports: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (with or without `#`).
    /// Returns `None` if the string is not a valid hex color.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    /// Pure black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Whether this color is fully opaque (alpha >= 1.0).
    #[inline]
    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    /// Whether every channel lies inside 0.0–1.0.
    ///
    /// Cosine samples routinely overshoot; hosts use this to decide whether
    /// to clamp, wrap, or flag a swatch.
    #[must_use]
    pub fn in_unit_range(self) -> bool {
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }

    /// Channel-wise comparison within `epsilon`.
    #[must_use]
    pub fn approx_eq(self, other: &Self, epsilon: f32) -> bool {
        (self.r - other.r).abs() <= epsilon
            && (self.g - other.g).abs() <= epsilon
            && (self.b - other.b).abs() <= epsilon
            && (self.a - other.a).abs() <= epsilon
    }

    // ─── Operations ──────────────────────────────────────────────────────

    /// Linear interpolation toward `other`.
    ///
    /// `t` = 0.0 returns `self`, `t` = 1.0 returns `other`. `t` is not
    /// clamped; callers sampling a gradient clamp the offset first.
    #[must_use]
    pub fn lerp(self, other: &Self, t: f32) -> Self {
        Self {
            r: (other.r - self.r).mul_add(t, self.r),
            g: (other.g - self.g).mul_add(t, self.g),
            b: (other.b - self.b).mul_add(t, self.b),
            a: (other.a - self.a).mul_add(t, self.a),
        }
    }

    /// Return a copy clamped into 0.0–1.0 on every channel.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    // ─── Conversions ─────────────────────────────────────────────────────

    /// Convert to 8-bit RGB, clamping out-of-range channels.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Convert to 8-bit RGBA, clamping out-of-range channels.
    #[must_use]
    pub fn to_rgba8(self) -> (u8, u8, u8, u8) {
        let (r, g, b) = self.to_rgb8();
        (r, g, b, to_u8(self.a))
    }

    /// Convert to hex string (`#RRGGBB` or `#RRGGBBAA` if alpha < 1.0).
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        if self.is_opaque() {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "Color::rgb({:.4}, {:.4}, {:.4})", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "Color::rgba({:.4}, {:.4}, {:.4}, {:.2})",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for Color {
    /// Default is fully opaque black.
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Color::rgb8(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RGBA
        4 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            let a = parse_hex_digit(bytes[3])?;
            Some(Color::rgba8(r << 4 | r, g << 4 | g, b << 4 | b, a << 4 | a))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Color::rgb8(r, g, b))
        }
        // #RRGGBBAA
        8 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            let a = parse_hex_byte(&bytes[6..8])?;
            Some(Color::rgba8(r, g, b, a))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f32) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
