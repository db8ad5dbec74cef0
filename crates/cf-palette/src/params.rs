//! Generation parameters — the four vectors of the cosine formula.

use cf_variant::Vector3;
use rand::Rng;
use serde::Deserialize;

/// One complete input to the palette formula.
///
/// Each channel (x = red, y = green, z = blue) is evaluated independently.
/// Components are intended to stay in [0, 1] but nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    /// Midpoint each channel oscillates around.
    pub brightness: Vector3,
    /// Amplitude of the oscillation.
    pub contrast: Vector3,
    /// Oscillations across the palette.
    pub frequency: Vector3,
    /// Phase offset, in turns.
    #[serde(alias = "range_offset")]
    pub range: Vector3,
}

impl GenerationParameters {
    #[must_use]
    pub const fn new(brightness: Vector3, contrast: Vector3, frequency: Vector3, range: Vector3) -> Self {
        Self {
            brightness,
            contrast,
            frequency,
            range,
        }
    }

    /// Draw every component from `rng`, in the fixed order brightness,
    /// contrast, frequency, range, each as x, y, z. Twelve draws in [0, 1).
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut draw = || Vector3::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0));
        let brightness = draw();
        let contrast = draw();
        let frequency = draw();
        let range = draw();
        Self::new(brightness, contrast, frequency, range)
    }
}

impl Default for GenerationParameters {
    /// The classic rainbow: full swing around mid-grey, one period, thirds
    /// of a turn apart.
    fn default() -> Self {
        Self {
            brightness: Vector3::splat(0.5),
            contrast: Vector3::splat(0.5),
            frequency: Vector3::ONE,
            range: Vector3::new(0.0, 0.33, 0.67),
        }
    }
}
