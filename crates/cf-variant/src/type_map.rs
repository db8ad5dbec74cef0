// SPDX-License-Identifier: MIT
//
// Type mapping — which Rust types a host can edit, and under which tag.
//
// The table is consulted once per property, at registration time. A type
// that implements `Variant` but has no row here (and is not a resource-like
// class) is rejected immediately instead of failing later when a host
// first asks for it.
//
// Tag codes follow the host editor's own numbering so a descriptor's
// `type` field can be forwarded verbatim.

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use crate::color::Color;
use crate::value::{Callable, Variant};
use crate::vector::{Vector2, Vector2i, Vector3, Vector3i, Vector4};

/// Descriptor type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VariantType {
    Nil = 0,
    Bool = 1,
    Int = 2,
    Float = 3,
    String = 4,
    Vector2 = 5,
    Vector2i = 6,
    Rect2 = 7,
    Rect2i = 8,
    Vector3 = 9,
    Vector3i = 10,
    Transform2D = 11,
    Vector4 = 12,
    Vector4i = 13,
    Plane = 14,
    Quaternion = 15,
    Aabb = 16,
    Basis = 17,
    Transform3D = 18,
    Projection = 19,
    Color = 20,
    StringName = 21,
    NodePath = 22,
    Rid = 23,
    /// Generic reference tag for resource-like types. The concrete class
    /// name travels in the descriptor's hint string.
    Object = 24,
    Callable = 25,
    Signal = 26,
    Dictionary = 27,
    Array = 28,
    PackedByteArray = 29,
    PackedInt32Array = 30,
    PackedInt64Array = 31,
    PackedFloat32Array = 32,
    PackedFloat64Array = 33,
    PackedStringArray = 34,
    PackedVector2Array = 35,
    PackedVector3Array = 36,
    PackedColorArray = 37,
    PackedVector4Array = 38,
}

impl VariantType {
    /// Numeric tag as the host expects it.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How a registered type is presented to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMapping {
    /// A plain value type with a fixed tag.
    Value(VariantType),
    /// A resource-like type: tag [`VariantType::Object`], with its class name.
    Object(&'static str),
}

impl TypeMapping {
    /// The descriptor tag for this mapping.
    #[must_use]
    pub const fn variant_type(self) -> VariantType {
        match self {
            Self::Value(t) => t,
            Self::Object(_) => VariantType::Object,
        }
    }
}

/// Returned when a type has no row in the mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedType(pub &'static str);

impl fmt::Display for UnsupportedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported property type `{}`", self.0)
    }
}

impl std::error::Error for UnsupportedType {}

static TABLE: LazyLock<HashMap<TypeId, VariantType>> = LazyLock::new(|| {
    HashMap::from([
        (TypeId::of::<bool>(), VariantType::Bool),
        (TypeId::of::<i32>(), VariantType::Int),
        (TypeId::of::<i64>(), VariantType::Int),
        (TypeId::of::<f32>(), VariantType::Float),
        (TypeId::of::<f64>(), VariantType::Float),
        (TypeId::of::<String>(), VariantType::String),
        (TypeId::of::<Vector2>(), VariantType::Vector2),
        (TypeId::of::<Vector2i>(), VariantType::Vector2i),
        (TypeId::of::<Vector3>(), VariantType::Vector3),
        (TypeId::of::<Vector3i>(), VariantType::Vector3i),
        (TypeId::of::<Vector4>(), VariantType::Vector4),
        (TypeId::of::<Color>(), VariantType::Color),
        (TypeId::of::<Callable>(), VariantType::Callable),
        (TypeId::of::<Vec<u8>>(), VariantType::PackedByteArray),
        (TypeId::of::<Vec<i32>>(), VariantType::PackedInt32Array),
        (TypeId::of::<Vec<i64>>(), VariantType::PackedInt64Array),
        (TypeId::of::<Vec<f32>>(), VariantType::PackedFloat32Array),
        (TypeId::of::<Vec<f64>>(), VariantType::PackedFloat64Array),
        (TypeId::of::<Vec<String>>(), VariantType::PackedStringArray),
        (TypeId::of::<Vec<Vector2>>(), VariantType::PackedVector2Array),
        (TypeId::of::<Vec<Vector3>>(), VariantType::PackedVector3Array),
        (TypeId::of::<Vec<Color>>(), VariantType::PackedColorArray),
        (TypeId::of::<Vec<Vector4>>(), VariantType::PackedVector4Array),
    ])
});

/// Look up how `T` is presented to the host.
///
/// Resource-like types (those declaring [`Variant::CLASS_NAME`]) always map
/// to [`TypeMapping::Object`]; everything else must appear in the table.
///
/// # Errors
///
/// Returns [`UnsupportedType`] naming `T` when there is no mapping.
pub fn mapping_of<T: Variant>() -> Result<TypeMapping, UnsupportedType> {
    if let Some(class) = T::CLASS_NAME {
        return Ok(TypeMapping::Object(class));
    }
    TABLE
        .get(&TypeId::of::<T>())
        .map(|&t| TypeMapping::Value(t))
        .ok_or(UnsupportedType(type_name::<T>()))
}
