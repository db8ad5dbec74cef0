//! Editing hints — how a host should present a property.
//!
//! A hint is a kind plus a free-form payload string whose grammar depends on
//! the kind. Hosts parse the payload themselves, so the encodings here are
//! part of the wire contract and must be reproduced byte for byte.
//!
//! # Range payload
//!
//! ```text
//! "<min>, <max>[, <step>][, exp][, or_greater][, or_less][, radians_as_degrees][, degrees][, hide_slider][, suffix:<suffix>]"
//! ```
//!
//! Segments appear in exactly that order, each only when it differs from
//! its default.

use std::fmt;

// ---------------------------------------------------------------------------
// Usage flags
// ---------------------------------------------------------------------------

bitflags::bitflags! {
    /// How a property participates in storage and editing.
    ///
    /// Bit positions follow the host's numbering.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Usage: u32 {
        /// Saved with the owning resource.
        const STORAGE   = 1 << 1;
        /// Shown in the inspector.
        const EDITOR    = 1 << 2;
        /// Shown, but not editable.
        const READ_ONLY = 1 << 27;
        /// The usual combination for an exported property.
        const DEFAULT   = Self::STORAGE.bits() | Self::EDITOR.bits();
    }
}

impl Default for Usage {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// Hint kind
// ---------------------------------------------------------------------------

/// The kind of editing affordance attached to a descriptor.
///
/// Discriminants follow the host's numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum PropertyHint {
    #[default]
    None = 0,
    /// Numeric or per-component range. Payload: see the module docs.
    Range = 1,
    /// Vector components edited together. No payload.
    Link = 5,
    /// Reference to a resource-like type. Payload: the class name.
    ResourceType = 17,
    /// Multi-line text box. No payload.
    MultilineText = 18,
    /// Placeholder text shown in an empty field. Payload: the text.
    PlaceholderText = 20,
    /// Color picker without an alpha slider. No payload.
    ColorNoAlpha = 21,
    /// Array whose elements are of one type. Payload: the element type.
    ArrayType = 31,
    /// Masked text input. No payload.
    Password = 36,
    /// Button that invokes a callable. Payload: `label` or `label,icon`.
    ToolButton = 39,
}

impl PropertyHint {
    /// Numeric hint as the host expects it.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// Step used when none is given. The payload omits the step segment when
/// it equals this value.
pub const DEFAULT_STEP: f32 = 0.01;

/// A range hint under construction.
///
/// ```
/// use cf_inspect::hint::RangeHint;
///
/// let hint = RangeHint::new(0.0, 1.0).step(0.001).or_greater().or_less();
/// assert_eq!(hint.to_string(), "0, 1, 0.001, or_greater, or_less");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RangeHint {
    min: f32,
    max: f32,
    step: f32,
    exponential: bool,
    or_greater: bool,
    or_less: bool,
    radians_as_degrees: bool,
    degrees: bool,
    hide_slider: bool,
    suffix: String,
}

impl RangeHint {
    /// A range from `min` to `max` with every option at its default.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            step: DEFAULT_STEP,
            exponential: false,
            or_greater: false,
            or_less: false,
            radians_as_degrees: false,
            degrees: false,
            hide_slider: false,
            suffix: String::new(),
        }
    }

    #[must_use]
    pub fn step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Edit on an exponential scale.
    #[must_use]
    pub fn exponential(mut self) -> Self {
        self.exponential = true;
        self
    }

    /// Allow values above `max`.
    #[must_use]
    pub fn or_greater(mut self) -> Self {
        self.or_greater = true;
        self
    }

    /// Allow values below `min`.
    #[must_use]
    pub fn or_less(mut self) -> Self {
        self.or_less = true;
        self
    }

    /// Stored in radians, edited in degrees.
    #[must_use]
    pub fn radians_as_degrees(mut self) -> Self {
        self.radians_as_degrees = true;
        self
    }

    /// Stored and edited in degrees.
    #[must_use]
    pub fn degrees(mut self) -> Self {
        self.degrees = true;
        self
    }

    #[must_use]
    pub fn hide_slider(mut self) -> Self {
        self.hide_slider = true;
        self
    }

    /// Unit label shown after the value.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

impl fmt::Display for RangeHint {
    #[allow(clippy::float_cmp)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.min, self.max)?;
        if self.step != DEFAULT_STEP {
            write!(f, ", {}", self.step)?;
        }
        if self.exponential {
            f.write_str(", exp")?;
        }
        if self.or_greater {
            f.write_str(", or_greater")?;
        }
        if self.or_less {
            f.write_str(", or_less")?;
        }
        if self.radians_as_degrees {
            f.write_str(", radians_as_degrees")?;
        }
        if self.degrees {
            f.write_str(", degrees")?;
        }
        if self.hide_slider {
            f.write_str(", hide_slider")?;
        }
        if !self.suffix.is_empty() {
            write!(f, ", suffix:{}", self.suffix)?;
        }
        Ok(())
    }
}

/// Payload for a [`PropertyHint::ToolButton`].
#[must_use]
pub fn button_payload(label: &str, icon: &str) -> String {
    if icon.is_empty() {
        label.to_string()
    } else {
        format!("{label},{icon}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
