// SPDX-License-Identifier: MIT
//
// cf-variant — the value model shared by every cosineful crate.
//
// Everything a property can hold lives here: raw RGBA colors as the cosine
// formula produces them, small vectors, gradients, callables, and the
// type-erased `Value` that carries them across the host boundary. The
// type-mapping table decides which of these a host is allowed to edit.
//
// Layering:
//
//   color / vector / gradient   → concrete data
//   value                       → Value + Variant conversions + Callable
//   type_map                    → Rust type → host tag, checked at registration

pub mod color;
pub mod gradient;
pub mod type_map;
pub mod value;
pub mod vector;

pub use color::Color;
pub use gradient::Gradient;
pub use type_map::{TypeMapping, UnsupportedType, VariantType};
pub use value::{Callable, Object, Value, Variant};
pub use vector::{Vector2, Vector2i, Vector3, Vector3i, Vector4};
