//! Registration errors.
//!
//! Both variants are programmer errors surfaced at construction time: a
//! component that declares its properties incorrectly fails immediately
//! rather than misbehaving the first time a host looks at it.

use cf_variant::UnsupportedType;
use thiserror::Error;

/// A property could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The name is already taken on this registry.
    #[error("configuration error: property `{0}` is already registered")]
    Duplicate(String),

    /// The property's value type has no entry in the type-mapping table.
    #[error("configuration error: {0}")]
    UnsupportedType(#[from] UnsupportedType),
}

pub type Result<T> = std::result::Result<T, PropertyError>;
