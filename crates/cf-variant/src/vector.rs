// SPDX-License-Identifier: MIT
//
// Small plain-data vectors used as property values.
//
// Vector3 carries the four cosine palette components (one channel per
// axis: x = red, y = green, z = blue). The remaining shapes exist so that
// the type-mapping table can describe the full range of values a host
// editor knows how to show.

use std::fmt;
use std::ops::{Add, Mul};

use serde::Deserialize;

// ─── Float vectors ───────────────────────────────────────────────────────────

/// A 2-component float vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A 3-component float vector.
///
/// ```
/// use cf_variant::vector::Vector3;
///
/// let v = Vector3::splat(0.5) + Vector3::new(0.0, 0.25, 0.5);
/// assert_eq!(v, Vector3::new(0.5, 0.75, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// All components zero.
    pub const ZERO: Self = Self::splat(0.0);

    /// All components one.
    pub const ONE: Self = Self::splat(1.0);

    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A vector with every component set to `v`.
    #[inline]
    #[must_use]
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Components as an array, in x, y, z order.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Build from an array in x, y, z order.
    #[inline]
    #[must_use]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A 4-component float vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

// ─── Integer vectors ─────────────────────────────────────────────────────────

/// A 2-component integer vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub struct Vector2i {
    pub x: i32,
    pub y: i32,
}

impl Vector2i {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A 3-component integer vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub struct Vector3i {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vector3i {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

// ─── Lossy conversions between float and integer shapes ──────────────────────
//
// Hosts frequently send whole-number vectors for float properties and vice
// versa. Float → integer truncates toward zero, the same rule `as` applies.

impl From<Vector2i> for Vector2 {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: Vector2i) -> Self {
        Self::new(v.x as f32, v.y as f32)
    }
}

impl From<Vector3i> for Vector3 {
    #[allow(clippy::cast_precision_loss)]
    fn from(v: Vector3i) -> Self {
        Self::new(v.x as f32, v.y as f32, v.z as f32)
    }
}

impl From<Vector2> for Vector2i {
    #[allow(clippy::cast_possible_truncation)]
    fn from(v: Vector2) -> Self {
        Self::new(v.x as i32, v.y as i32)
    }
}

impl From<Vector3> for Vector3i {
    #[allow(clippy::cast_possible_truncation)]
    fn from(v: Vector3) -> Self {
        Self::new(v.x as i32, v.y as i32, v.z as i32)
    }
}
