// SPDX-License-Identifier: MIT
//
// Gradient — an ordered list of color stops at normalized offsets.
//
// This is the shape a generated palette takes when handed to a host: N
// colors paired one-to-one with N offsets in [0, 1]. Sampling between stops
// is piecewise-linear; sampling outside the first/last stop clamps to that
// stop, the way host gradient resources behave.

use crate::color::Color;

/// Color stops with matching offsets.
///
/// Invariant: `colors.len() == offsets.len()`, and offsets are
/// non-decreasing. Both are established by the constructors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gradient {
    colors: Vec<Color>,
    offsets: Vec<f32>,
}

impl Gradient {
    /// An empty gradient.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            colors: Vec::new(),
            offsets: Vec::new(),
        }
    }

    /// Build a gradient from parallel color and offset lists.
    ///
    /// Returns `None` when the lengths differ or the offsets go backwards.
    #[must_use]
    pub fn from_stops(colors: Vec<Color>, offsets: Vec<f32>) -> Option<Self> {
        if colors.len() != offsets.len() || offsets.windows(2).any(|w| w[1] < w[0]) {
            return None;
        }
        Some(Self { colors, offsets })
    }

    /// Spread `colors` evenly: stop `i` sits at `i / (n - 1)`.
    ///
    /// A single color sits at offset 0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn evenly_spaced(colors: Vec<Color>) -> Self {
        let n = colors.len();
        let offsets = (0..n)
            .map(|i| if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 })
            .collect();
        Self { colors, offsets }
    }

    /// Number of stops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the gradient has no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The stop colors, in offset order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// The stop offsets.
    #[must_use]
    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    /// The color of stop `index`, with the index clamped into range.
    ///
    /// Returns `None` only for an empty gradient.
    #[must_use]
    pub fn color(&self, index: i64) -> Option<Color> {
        let last = self.colors.len().checked_sub(1)?;
        let idx = usize::try_from(index.max(0)).map_or(last, |i| i.min(last));
        Some(self.colors[idx])
    }

    /// Sample the gradient at `offset` by linear interpolation between the
    /// two bracketing stops.
    ///
    /// Offsets before the first stop or after the last clamp to that stop,
    /// and NaN samples the first stop. An empty gradient samples as opaque
    /// black.
    #[must_use]
    pub fn sample(&self, offset: f32) -> Color {
        let (Some(&first), Some(&last)) = (self.offsets.first(), self.offsets.last()) else {
            return Color::BLACK;
        };

        if offset.is_nan() || offset <= first {
            return self.colors[0];
        }
        if offset >= last {
            return self.colors[self.colors.len() - 1];
        }

        // First stop strictly beyond `offset`; its predecessor brackets from below.
        let hi = self.offsets.partition_point(|&o| o <= offset);
        let lo = hi - 1;

        let span = self.offsets[hi] - self.offsets[lo];
        if span <= 0.0 {
            return self.colors[hi];
        }
        let t = (offset - self.offsets[lo]) / span;
        self.colors[lo].lerp(&self.colors[hi], t)
    }
}
