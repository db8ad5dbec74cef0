//! Property descriptors — the metadata record a host renders from.

use std::fmt;

use cf_variant::VariantType;

use crate::hint::{PropertyHint, Usage};

/// Everything a host needs to present one property.
///
/// Descriptors are snapshots: the registry builds fresh ones on every
/// listing, so holding on to one does not track later changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Unique key within the owning registry.
    pub name: String,
    /// Value type tag.
    pub variant_type: VariantType,
    /// Editing affordance.
    pub hint: PropertyHint,
    /// Hint payload; grammar depends on `hint`.
    pub hint_string: String,
    /// Storage/editor flags, including the read-only bit.
    pub usage: Usage,
}

impl PropertyDescriptor {
    /// Whether the host should render this property as non-editable.
    #[inline]
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.usage.contains(Usage::READ_ONLY)
    }

    /// Whether this property is a button.
    #[inline]
    #[must_use]
    pub fn is_button(&self) -> bool {
        self.hint == PropertyHint::ToolButton
    }
}

impl fmt::Display for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.variant_type)?;
        if self.hint != PropertyHint::None {
            write!(f, " [{:?} \"{}\"]", self.hint, self.hint_string)?;
        }
        if self.is_read_only() {
            f.write_str(" (read-only)")?;
        }
        Ok(())
    }
}
