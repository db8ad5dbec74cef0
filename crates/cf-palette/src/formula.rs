//! The cosine palette formula.
//!
//! Per channel, for a phase `t` in [0, 1]:
//!
//! ```text
//! value = brightness + contrast * cos(2π · (frequency · t + range))
//! ```
//!
//! Samples are spread evenly from `t = 0` to `t = 1`. A single-sample
//! palette is evaluated at `t = 1`, not at the midpoint; existing
//! single-color palettes depend on that. Output is not clamped, so hosts
//! decide how to show values outside [0, 1].

use std::f32::consts::TAU;

use cf_variant::{Color, Gradient, Vector3};

use crate::params::GenerationParameters;

/// Largest palette ever generated. Larger counts generate this many colors.
pub const MAX_COLOR_COUNT: i64 = 1 << 16;

/// Evaluate the formula at phase `t`. Alpha is always 1.
#[must_use]
pub fn sample(params: &GenerationParameters, t: f32) -> Color {
    let channel = |b: f32, c: f32, f: f32, r: f32| c.mul_add((TAU * f.mul_add(t, r)).cos(), b);
    let GenerationParameters {
        brightness: Vector3 { x: bx, y: by, z: bz },
        contrast: Vector3 { x: cx, y: cy, z: cz },
        frequency: Vector3 { x: fx, y: fy, z: fz },
        range: Vector3 { x: rx, y: ry, z: rz },
    } = *params;
    Color::rgb(
        channel(bx, cx, fx, rx),
        channel(by, cy, fy, ry),
        channel(bz, cz, fz, rz),
    )
}

/// Phase of sample `i` in a palette of `count` samples.
#[allow(clippy::cast_precision_loss)]
fn phase(i: usize, count: usize) -> f32 {
    if count <= 1 {
        1.0
    } else {
        i as f32 / (count - 1) as f32
    }
}

/// Sample count as a length. Negative counts mean an empty palette.
fn len_of(count: i64) -> usize {
    usize::try_from(count.min(MAX_COLOR_COUNT)).unwrap_or(0)
}

/// `count` evenly spaced samples of the formula. Empty when `count <= 0`.
#[must_use]
pub fn generate(params: &GenerationParameters, count: i64) -> Vec<Color> {
    let n = len_of(count);
    (0..n).map(|i| sample(params, phase(i, n))).collect()
}

/// Gradient offsets matching [`generate`]: `i / (count - 1)`, with the
/// single-sample palette at offset 0.
#[must_use]
pub fn offsets(count: i64) -> Vec<f32> {
    let n = len_of(count);
    if n == 1 {
        return vec![0.0];
    }
    (0..n).map(|i| phase(i, n)).collect()
}

/// [`generate`] and [`offsets`] bundled as a gradient.
#[must_use]
pub fn generate_gradient(params: &GenerationParameters, count: i64) -> Gradient {
    Gradient::evenly_spaced(generate(params, count))
}
