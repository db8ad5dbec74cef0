// SPDX-License-Identifier: MIT
//
// Value — the closed, type-erased container that crosses the host boundary.
//
// A host never sees a property's concrete Rust type. Getters produce a
// `Value`, setters consume one, and the `Variant` trait converts between the
// two. Conversions are deliberately lenient where a host is likely to be
// sloppy (an integer typed into a float field, a whole-number vector for a
// float vector) and strict everywhere else.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::color::Color;
use crate::gradient::Gradient;
use crate::type_map::VariantType;
use crate::vector::{Vector2, Vector2i, Vector3, Vector3i, Vector4};

// ─── Callable ────────────────────────────────────────────────────────────────

/// A zero-argument action with no return value.
///
/// Cloning shares the same underlying closure. Button properties hand these
/// to the host, which invokes them when the button is pressed.
#[derive(Clone)]
pub struct Callable(Rc<dyn Fn()>);

impl Callable {
    /// Wrap a closure.
    pub fn from_fn(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the action.
    pub fn call(&self) {
        (self.0)();
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(..)")
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// ─── Object ──────────────────────────────────────────────────────────────────

/// A shared, resource-like payload tagged with its class name.
#[derive(Clone)]
pub struct Object {
    class: &'static str,
    inner: Rc<dyn Any>,
}

impl Object {
    /// Wrap `value` under `class`.
    pub fn new<T: Any>(class: &'static str, value: T) -> Self {
        Self {
            class,
            inner: Rc::new(value),
        }
    }

    /// The class name this object was created with.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        self.class
    }

    /// Borrow the payload as `T`, if that is what it holds.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.class)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && Rc::ptr_eq(&self.inner, &other.inner)
    }
}

// ─── Value ───────────────────────────────────────────────────────────────────

/// A value of any host-editable type.
///
/// [`Value::Nil`] is the neutral empty value returned for misses.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Vector2(Vector2),
    Vector2i(Vector2i),
    Vector3(Vector3),
    Vector3i(Vector3i),
    Vector4(Vector4),
    Color(Color),
    Object(Object),
    Callable(Callable),
    PackedByteArray(Vec<u8>),
    PackedInt32Array(Vec<i32>),
    PackedInt64Array(Vec<i64>),
    PackedFloat32Array(Vec<f32>),
    PackedFloat64Array(Vec<f64>),
    PackedStringArray(Vec<String>),
    PackedVector2Array(Vec<Vector2>),
    PackedVector3Array(Vec<Vector3>),
    PackedColorArray(Vec<Color>),
    PackedVector4Array(Vec<Vector4>),
}

impl Value {
    /// The descriptor tag matching this value's shape.
    #[must_use]
    pub const fn variant_type(&self) -> VariantType {
        match self {
            Self::Nil => VariantType::Nil,
            Self::Bool(_) => VariantType::Bool,
            Self::Int(_) => VariantType::Int,
            Self::Float(_) => VariantType::Float,
            Self::String(_) => VariantType::String,
            Self::Vector2(_) => VariantType::Vector2,
            Self::Vector2i(_) => VariantType::Vector2i,
            Self::Vector3(_) => VariantType::Vector3,
            Self::Vector3i(_) => VariantType::Vector3i,
            Self::Vector4(_) => VariantType::Vector4,
            Self::Color(_) => VariantType::Color,
            Self::Object(_) => VariantType::Object,
            Self::Callable(_) => VariantType::Callable,
            Self::PackedByteArray(_) => VariantType::PackedByteArray,
            Self::PackedInt32Array(_) => VariantType::PackedInt32Array,
            Self::PackedInt64Array(_) => VariantType::PackedInt64Array,
            Self::PackedFloat32Array(_) => VariantType::PackedFloat32Array,
            Self::PackedFloat64Array(_) => VariantType::PackedFloat64Array,
            Self::PackedStringArray(_) => VariantType::PackedStringArray,
            Self::PackedVector2Array(_) => VariantType::PackedVector2Array,
            Self::PackedVector3Array(_) => VariantType::PackedVector3Array,
            Self::PackedColorArray(_) => VariantType::PackedColorArray,
            Self::PackedVector4Array(_) => VariantType::PackedVector4Array,
        }
    }

    /// Whether this is the empty value.
    #[inline]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Convert into a concrete type, if the shapes are compatible.
    #[must_use]
    pub fn to<T: Variant>(&self) -> Option<T> {
        T::from_value(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("<nil>"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Vector2(v) => write!(f, "({}, {})", v.x, v.y),
            Self::Vector2i(v) => write!(f, "({}, {})", v.x, v.y),
            Self::Vector3(v) => write!(f, "{v}"),
            Self::Vector3i(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            Self::Vector4(v) => write!(f, "({}, {}, {}, {})", v.x, v.y, v.z, v.w),
            Self::Color(c) => write!(f, "{c}"),
            Self::Object(o) => write!(f, "<{}>", o.class()),
            Self::Callable(_) => f.write_str("<callable>"),
            Self::PackedByteArray(a) => write!(f, "{a:?}"),
            Self::PackedInt32Array(a) => write!(f, "{a:?}"),
            Self::PackedInt64Array(a) => write!(f, "{a:?}"),
            Self::PackedFloat32Array(a) => write!(f, "{a:?}"),
            Self::PackedFloat64Array(a) => write!(f, "{a:?}"),
            Self::PackedStringArray(a) => write!(f, "{a:?}"),
            Self::PackedVector2Array(a) => write!(f, "{a:?}"),
            Self::PackedVector3Array(a) => write!(f, "{a:?}"),
            Self::PackedColorArray(a) => write!(f, "{a:?}"),
            Self::PackedVector4Array(a) => write!(f, "{a:?}"),
        }
    }
}

// ─── Variant ─────────────────────────────────────────────────────────────────

/// Conversion between a concrete type and [`Value`].
///
/// Implementing this trait makes a type *convertible*; whether it can be
/// *registered* as a property is decided by the type-mapping table (see
/// [`crate::type_map::mapping_of`]).
pub trait Variant: Sized + 'static {
    /// Class name for resource-like types. Such types are presented to the
    /// host under the generic [`VariantType::Object`] tag.
    const CLASS_NAME: Option<&'static str> = None;

    /// Wrap `self` in a [`Value`].
    fn to_value(&self) -> Value;

    /// Extract `Self` from a [`Value`], or `None` if the shapes don't match.
    fn from_value(value: &Value) -> Option<Self>;
}

impl Variant for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Int(i) => Some(*i != 0),
            _ => None,
        }
    }
}

impl Variant for i64 {
    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            Value::Float(x) if x.is_finite() => Some(x.trunc() as Self),
            Value::Bool(b) => Some(Self::from(*b)),
            _ => None,
        }
    }
}

impl Variant for i32 {
    fn to_value(&self) -> Value {
        Value::Int(i64::from(*self))
    }

    fn from_value(value: &Value) -> Option<Self> {
        i64::from_value(value).and_then(|i| Self::try_from(i).ok())
    }
}

impl Variant for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as Self),
            _ => None,
        }
    }
}

impl Variant for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: &Value) -> Option<Self> {
        f64::from_value(value).map(|x| x as Self)
    }
}

impl Variant for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl Variant for Vector2 {
    fn to_value(&self) -> Value {
        Value::Vector2(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vector2(v) => Some(*v),
            Value::Vector2i(v) => Some((*v).into()),
            _ => None,
        }
    }
}

impl Variant for Vector2i {
    fn to_value(&self) -> Value {
        Value::Vector2i(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vector2i(v) => Some(*v),
            Value::Vector2(v) => Some((*v).into()),
            _ => None,
        }
    }
}

impl Variant for Vector3 {
    fn to_value(&self) -> Value {
        Value::Vector3(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vector3(v) => Some(*v),
            Value::Vector3i(v) => Some((*v).into()),
            _ => None,
        }
    }
}

impl Variant for Vector3i {
    fn to_value(&self) -> Value {
        Value::Vector3i(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vector3i(v) => Some(*v),
            Value::Vector3(v) => Some((*v).into()),
            _ => None,
        }
    }
}

impl Variant for Vector4 {
    fn to_value(&self) -> Value {
        Value::Vector4(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vector4(v) => Some(*v),
            _ => None,
        }
    }
}

impl Variant for Color {
    fn to_value(&self) -> Value {
        Value::Color(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Color(c) => Some(*c),
            Value::String(s) => Self::hex(s),
            _ => None,
        }
    }
}

impl Variant for Callable {
    fn to_value(&self) -> Value {
        Value::Callable(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Callable(c) => Some(c.clone()),
            _ => None,
        }
    }
}

impl Variant for Gradient {
    const CLASS_NAME: Option<&'static str> = Some("Gradient");

    fn to_value(&self) -> Value {
        Value::Object(Object::new("Gradient", self.clone()))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(o) => o.downcast_ref::<Self>().cloned(),
            _ => None,
        }
    }
}

/// Packed arrays convert only from their exact counterpart.
macro_rules! packed_variant {
    ($($elem:ty => $variant:ident),* $(,)?) => {
        $(
            impl Variant for Vec<$elem> {
                fn to_value(&self) -> Value {
                    Value::$variant(self.clone())
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(a) => Some(a.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

packed_variant! {
    u8 => PackedByteArray,
    i32 => PackedInt32Array,
    i64 => PackedInt64Array,
    f32 => PackedFloat32Array,
    f64 => PackedFloat64Array,
    String => PackedStringArray,
    Vector2 => PackedVector2Array,
    Vector3 => PackedVector3Array,
    Color => PackedColorArray,
    Vector4 => PackedVector4Array,
}
