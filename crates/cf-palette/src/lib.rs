//! # cf-palette — Cosine palette generation for cosineful
//!
//! - **[`formula`]** — the pure cosine formula: parameters + count → colors
//! - **[`params`]** — `GenerationParameters`, the formula's four vectors
//! - **[`history`]** — `SeedHistory`, back/forward over seeds
//! - **[`resource`]** — `Palette` and `PaletteResource`: caching, seeds,
//!   change notification, and the exported properties
//! - **[`config`]** — `PaletteConfig`, construction settings from TOML
//!
//! ```
//! use cf_palette::{PaletteConfig, PaletteResource};
//!
//! let palette = PaletteResource::new(&PaletteConfig::default())?;
//! palette.randomize(1234);
//! let colors = palette.colors_array();
//! assert_eq!(colors.len(), 100);
//! # Ok::<(), cf_inspect::PropertyError>(())
//! ```

pub mod config;
pub mod formula;
pub mod history;
pub mod params;
pub mod resource;

pub use config::{ConfigError, PaletteConfig};
pub use formula::MAX_COLOR_COUNT;
pub use history::{NO_SEED, SeedHistory};
pub use params::GenerationParameters;
pub use resource::{ObserverId, Palette, PaletteResource, WeakPalette};
