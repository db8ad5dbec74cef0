//! Property registry — named, typed accessors behind a uniform interface.
//!
//! A component declares each property once, at construction, with a chained
//! builder:
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use cf_inspect::hint::RangeHint;
//! use cf_inspect::PropertyRegistry;
//! use cf_variant::Value;
//!
//! let count = Rc::new(Cell::new(8_i64));
//! let mut registry = PropertyRegistry::new();
//!
//! let (get, set) = (Rc::clone(&count), Rc::clone(&count));
//! registry
//!     .register::<i64>("color_count")?
//!     .getter(move || get.get())
//!     .setter(move |n| set.set(n))
//!     .range(RangeHint::new(1.0, 256.0).step(1.0).or_greater());
//!
//! assert!(registry.set("color_count", &Value::Int(32)));
//! assert_eq!(registry.get("color_count"), Value::Int(32));
//! # Ok::<(), cf_inspect::PropertyError>(())
//! ```
//!
//! The host then works purely by name: [`PropertyRegistry::list_descriptors`]
//! to discover, [`PropertyRegistry::get`] and [`PropertyRegistry::set`] to
//! read and write. Typed closures are erased into [`Value`]-producing and
//! [`Value`]-consuming boxes when they are bound, so dispatch never needs to
//! know `T`.
//!
//! # Lifetime
//!
//! Registries are add-only. Entries keep their registration order, which is
//! also the listing order.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use cf_variant::type_map::mapping_of;
use cf_variant::{Callable, TypeMapping, Value, Variant};
use log::{debug, warn};

use crate::descriptor::PropertyDescriptor;
use crate::error::{PropertyError, Result};
use crate::hint::{PropertyHint, RangeHint, Usage, button_payload};

type Getter = Box<dyn Fn() -> Value>;
type Setter = Box<dyn Fn(&Value) -> bool>;
type Predicate = Box<dyn Fn() -> bool>;

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// One registered property: descriptor state plus erased accessors.
struct Entry {
    name: String,
    mapping: TypeMapping,
    hint: PropertyHint,
    hint_string: String,
    usage: Usage,
    getter: Option<Getter>,
    setter: Option<Setter>,
    visible: Option<Predicate>,
}

impl Entry {
    fn new(name: String, mapping: TypeMapping) -> Self {
        // Resource-like types always advertise their class.
        let (hint, hint_string) = match mapping {
            TypeMapping::Object(class) => (PropertyHint::ResourceType, class.to_string()),
            TypeMapping::Value(_) => (PropertyHint::None, String::new()),
        };
        Self {
            name,
            mapping,
            hint,
            hint_string,
            usage: Usage::DEFAULT,
            getter: None,
            setter: None,
            visible: None,
        }
    }

    fn is_visible(&self) -> bool {
        self.visible.as_ref().is_none_or(|pred| pred())
    }

    fn descriptor(&self) -> PropertyDescriptor {
        PropertyDescriptor {
            name: self.name.clone(),
            variant_type: self.mapping.variant_type(),
            hint: self.hint,
            hint_string: self.hint_string.clone(),
            usage: self.usage,
        }
    }
}

// ---------------------------------------------------------------------------
// PropertyRegistry
// ---------------------------------------------------------------------------

/// An insertion-ordered table of named properties.
#[derive(Default)]
pub struct PropertyRegistry {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl PropertyRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin declaring a property of type `T` under `name`.
    ///
    /// The entry exists as soon as this returns; the builder only refines
    /// it. A property with neither getter nor setter is listed but reads as
    /// [`Value::Nil`] and rejects writes.
    ///
    /// # Errors
    ///
    /// - [`PropertyError::Duplicate`] if `name` is already registered.
    /// - [`PropertyError::UnsupportedType`] if `T` has no type mapping.
    ///
    /// Nothing is registered when either error is returned.
    pub fn register<T: Variant>(&mut self, name: impl Into<String>) -> Result<PropertyBuilder<'_, T>> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(PropertyError::Duplicate(name));
        }
        let mapping = mapping_of::<T>()?;

        let slot = self.entries.len();
        self.index.insert(name.clone(), slot);
        self.entries.push(Entry::new(name, mapping));

        Ok(PropertyBuilder {
            entry: &mut self.entries[slot],
            _type: PhantomData,
        })
    }

    /// Descriptors for every currently visible property, in registration
    /// order.
    ///
    /// Visibility predicates run on every call, so the result reflects the
    /// component's state at the moment of listing.
    #[must_use]
    pub fn list_descriptors(&self) -> Vec<PropertyDescriptor> {
        self.entries
            .iter()
            .filter(|e| e.is_visible())
            .map(Entry::descriptor)
            .collect()
    }

    /// Descriptor for `name`, whether or not it is currently visible.
    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<PropertyDescriptor> {
        self.lookup(name).map(Entry::descriptor)
    }

    /// Read a property. Unknown names and write-only properties read as
    /// [`Value::Nil`].
    #[must_use]
    pub fn get(&self, name: &str) -> Value {
        let Some(entry) = self.lookup(name) else {
            debug!("get `{name}`: no such property");
            return Value::Nil;
        };
        match &entry.getter {
            Some(get) => get(),
            None => {
                debug!("get `{name}`: property has no getter");
                Value::Nil
            }
        }
    }

    /// Write a property.
    ///
    /// Returns `false` when the name is unknown, the property has no
    /// setter, or `value` cannot be converted into the property's type.
    /// Only the last of these indicates a host bug, so only it warns.
    pub fn set(&self, name: &str, value: &Value) -> bool {
        let Some(entry) = self.lookup(name) else {
            debug!("set `{name}`: no such property");
            return false;
        };
        let Some(set) = &entry.setter else {
            debug!("set `{name}`: property has no setter");
            return false;
        };
        let accepted = set(value);
        if !accepted {
            warn!(
                "set `{name}`: cannot convert {} into {}",
                value.variant_type(),
                entry.mapping.variant_type()
            );
        }
        accepted
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered properties, visible or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    fn lookup(&self, name: &str) -> Option<&Entry> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }
}

impl fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// ---------------------------------------------------------------------------
// PropertyBuilder
// ---------------------------------------------------------------------------

/// Refines a freshly registered property of type `T`.
///
/// Every method returns `&mut Self` so declarations read as one chain.
/// Later calls override earlier ones where they touch the same field (the
/// last hint wins).
pub struct PropertyBuilder<'r, T> {
    entry: &'r mut Entry,
    _type: PhantomData<fn() -> T>,
}

impl<T: Variant> PropertyBuilder<'_, T> {
    /// Bind the read accessor.
    pub fn getter(&mut self, get: impl Fn() -> T + 'static) -> &mut Self {
        self.entry.getter = Some(Box::new(move || get().to_value()));
        self
    }

    /// Bind the write accessor. Values that do not convert into `T` are
    /// rejected before `set` runs.
    pub fn setter(&mut self, set: impl Fn(T) + 'static) -> &mut Self {
        self.entry.setter = Some(Box::new(move |value| match T::from_value(value) {
            Some(v) => {
                set(v);
                true
            }
            None => false,
        }));
        self
    }

    /// Mark as non-editable in the host, regardless of any setter.
    pub fn read_only(&mut self) -> &mut Self {
        self.entry.usage |= Usage::READ_ONLY;
        self
    }

    /// Attach a numeric range.
    pub fn range(&mut self, range: RangeHint) -> &mut Self {
        self.hint(PropertyHint::Range, range.to_string())
    }

    /// Only list this property while `pred` returns `true`.
    pub fn visible_when(&mut self, pred: impl Fn() -> bool + 'static) -> &mut Self {
        self.entry.visible = Some(Box::new(pred));
        self
    }

    /// Edit vector components together.
    pub fn link_components(&mut self) -> &mut Self {
        self.hint(PropertyHint::Link, String::new())
    }

    pub fn multiline(&mut self) -> &mut Self {
        self.hint(PropertyHint::MultilineText, String::new())
    }

    /// Show `text` while the field is empty.
    pub fn placeholder(&mut self, text: &str) -> &mut Self {
        self.hint(PropertyHint::PlaceholderText, text.to_string())
    }

    /// Color picker without an alpha channel.
    pub fn no_alpha(&mut self) -> &mut Self {
        self.hint(PropertyHint::ColorNoAlpha, String::new())
    }

    pub fn password(&mut self) -> &mut Self {
        self.hint(PropertyHint::Password, String::new())
    }

    /// Declare the element type of an array property.
    ///
    /// The payload is the element's class name for resource-like types and
    /// its type tag otherwise.
    ///
    /// # Errors
    ///
    /// [`PropertyError::UnsupportedType`] if `E` has no type mapping. The
    /// property stays registered with its previous hint.
    pub fn array_of<E: Variant>(&mut self) -> Result<&mut Self> {
        let payload = match mapping_of::<E>()? {
            TypeMapping::Object(class) => class.to_string(),
            TypeMapping::Value(tag) => tag.to_string(),
        };
        Ok(self.hint(PropertyHint::ArrayType, payload))
    }

    fn hint(&mut self, hint: PropertyHint, payload: String) -> &mut Self {
        self.entry.hint = hint;
        self.entry.hint_string = payload;
        self
    }
}

impl PropertyBuilder<'_, Callable> {
    /// Present as a button that invokes the property's callable.
    ///
    /// `icon` may be empty.
    pub fn as_button(&mut self, label: &str, icon: &str) -> &mut Self {
        self.hint(PropertyHint::ToolButton, button_payload(label, icon))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use cf_variant::{Color, Gradient, Vector3, VariantType};
    use pretty_assertions::assert_eq;

    use super::*;

    fn int_cell(registry: &mut PropertyRegistry, name: &str, initial: i64) -> Rc<Cell<i64>> {
        let cell = Rc::new(Cell::new(initial));
        let (get, set) = (Rc::clone(&cell), Rc::clone(&cell));
        registry
            .register::<i64>(name)
            .unwrap()
            .getter(move || get.get())
            .setter(move |n| set.set(n));
        cell
    }

    fn listed(registry: &PropertyRegistry) -> Vec<String> {
        registry.list_descriptors().into_iter().map(|d| d.name).collect()
    }

    // ── Registration ─────────────────────────────────────────────────────

    #[test]
    fn duplicate_name_is_rejected() {
        let mut r = PropertyRegistry::new();
        r.register::<i64>("seed").unwrap();
        let err = r.register::<f32>("seed").err();
        assert_eq!(err, Some(PropertyError::Duplicate("seed".into())));
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn unsupported_type_is_rejected() {
        struct Handle;
        impl Variant for Handle {
            fn to_value(&self) -> Value {
                Value::Nil
            }
            fn from_value(_: &Value) -> Option<Self> {
                None
            }
        }

        let mut r = PropertyRegistry::new();
        let err = r.register::<Handle>("handle").err();
        assert!(matches!(err, Some(PropertyError::UnsupportedType(_))));
        assert!(!r.contains("handle"));
        assert!(r.is_empty());
    }

    #[test]
    fn listing_keeps_registration_order() {
        let mut r = PropertyRegistry::new();
        for name in ["palette_preview_like", "b", "a", "components/z"] {
            r.register::<bool>(name).unwrap();
        }
        assert_eq!(listed(&r), ["palette_preview_like", "b", "a", "components/z"]);
        assert_eq!(r.names().collect::<Vec<_>>(), listed(&r));
    }

    #[test]
    fn default_descriptor() {
        let mut r = PropertyRegistry::new();
        r.register::<Vector3>("components/brightness").unwrap();
        let d = r.descriptor("components/brightness").unwrap();
        assert_eq!(d.variant_type, VariantType::Vector3);
        assert_eq!(d.hint, PropertyHint::None);
        assert_eq!(d.hint_string, "");
        assert_eq!(d.usage, Usage::DEFAULT);
    }

    #[test]
    fn resource_like_type_gets_object_tag_and_class() {
        let mut r = PropertyRegistry::new();
        r.register::<Gradient>("palette_preview").unwrap().read_only();
        let d = r.descriptor("palette_preview").unwrap();
        assert_eq!(d.variant_type, VariantType::Object);
        assert_eq!(d.hint, PropertyHint::ResourceType);
        assert_eq!(d.hint_string, "Gradient");
        assert!(d.is_read_only());
    }

    // ── Hints ────────────────────────────────────────────────────────────

    #[test]
    fn range_hint_string() {
        let mut r = PropertyRegistry::new();
        r.register::<f32>("mix")
            .unwrap()
            .range(RangeHint::new(0.0, 1.0).step(0.001).or_greater().or_less());
        let d = r.descriptor("mix").unwrap();
        assert_eq!(d.hint, PropertyHint::Range);
        assert_eq!(d.hint_string, "0, 1, 0.001, or_greater, or_less");
    }

    #[test]
    fn button_hint() {
        let mut r = PropertyRegistry::new();
        r.register::<Callable>("components/randomize")
            .unwrap()
            .as_button("Randomize", "RandomNumberGenerator");
        let d = r.descriptor("components/randomize").unwrap();
        assert_eq!(d.variant_type, VariantType::Callable);
        assert!(d.is_button());
        assert_eq!(d.hint_string, "Randomize,RandomNumberGenerator");
    }

    #[test]
    fn simple_hints() {
        let mut r = PropertyRegistry::new();
        r.register::<Vector3>("v").unwrap().link_components();
        r.register::<String>("notes").unwrap().multiline();
        r.register::<String>("label").unwrap().placeholder("untitled");
        r.register::<Color>("tint").unwrap().no_alpha();
        r.register::<String>("token").unwrap().password();

        let hints: Vec<_> = r
            .list_descriptors()
            .into_iter()
            .map(|d| (d.hint, d.hint_string))
            .collect();
        assert_eq!(
            hints,
            [
                (PropertyHint::Link, String::new()),
                (PropertyHint::MultilineText, String::new()),
                (PropertyHint::PlaceholderText, "untitled".to_string()),
                (PropertyHint::ColorNoAlpha, String::new()),
                (PropertyHint::Password, String::new()),
            ]
        );
    }

    #[test]
    fn array_element_hint() {
        let mut r = PropertyRegistry::new();
        r.register::<Vec<Color>>("stops").unwrap().array_of::<Color>().unwrap();
        let d = r.descriptor("stops").unwrap();
        assert_eq!(d.variant_type, VariantType::PackedColorArray);
        assert_eq!(d.hint, PropertyHint::ArrayType);
        assert_eq!(d.hint_string, "Color");
    }

    #[test]
    fn last_hint_wins() {
        let mut r = PropertyRegistry::new();
        r.register::<String>("s").unwrap().multiline().placeholder("x");
        assert_eq!(r.descriptor("s").unwrap().hint, PropertyHint::PlaceholderText);
    }

    // ── Dispatch ─────────────────────────────────────────────────────────

    #[test]
    fn get_and_set_round_trip_through_closures() {
        let mut r = PropertyRegistry::new();
        let cell = int_cell(&mut r, "color_count", 8);
        assert_eq!(r.get("color_count"), Value::Int(8));
        assert!(r.set("color_count", &Value::Int(64)));
        assert_eq!(cell.get(), 64);
    }

    #[test]
    fn set_coerces_compatible_values() {
        let mut r = PropertyRegistry::new();
        let cell = int_cell(&mut r, "n", 0);
        assert!(r.set("n", &Value::Float(3.9)));
        assert_eq!(cell.get(), 3);
    }

    #[test]
    fn set_rejects_incompatible_values() {
        let mut r = PropertyRegistry::new();
        let cell = int_cell(&mut r, "n", 5);
        assert!(!r.set("n", &Value::String("five".into())));
        assert_eq!(cell.get(), 5);
    }

    #[test]
    fn unknown_name_dispatch() {
        let mut r = PropertyRegistry::new();
        int_cell(&mut r, "known", 1);
        assert_eq!(r.get("unknown"), Value::Nil);
        assert!(!r.set("unknown", &Value::Int(1)));
        assert!(r.descriptor("unknown").is_none());
    }

    #[test]
    fn read_only_without_setter_rejects_writes() {
        let mut r = PropertyRegistry::new();
        r.register::<i64>("seed").unwrap().getter(|| 42).read_only();
        assert_eq!(r.get("seed"), Value::Int(42));
        assert!(!r.set("seed", &Value::Int(7)));
    }

    #[test]
    fn missing_getter_reads_nil() {
        let mut r = PropertyRegistry::new();
        r.register::<bool>("write_only").unwrap().setter(|_| {});
        assert_eq!(r.get("write_only"), Value::Nil);
        assert!(r.set("write_only", &Value::Bool(true)));
    }

    #[test]
    fn button_getter_hands_out_a_working_callable() {
        let pressed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pressed);
        let press = Callable::from_fn(move || counter.set(counter.get() + 1));

        let mut r = PropertyRegistry::new();
        r.register::<Callable>("refresh")
            .unwrap()
            .getter(move || press.clone())
            .as_button("Refresh", "");

        let Value::Callable(c) = r.get("refresh") else {
            panic!("expected a callable");
        };
        c.call();
        c.call();
        assert_eq!(pressed.get(), 2);
    }

    // ── Visibility ───────────────────────────────────────────────────────

    #[test]
    fn visibility_is_reevaluated_on_every_listing() {
        let history = Rc::new(RefCell::new(Vec::<i64>::new()));
        let mut r = PropertyRegistry::new();
        r.register::<bool>("always").unwrap();
        let watched = Rc::clone(&history);
        r.register::<Callable>("history/go_back")
            .unwrap()
            .as_button("Go Back", "Back")
            .visible_when(move || !watched.borrow().is_empty());

        assert_eq!(listed(&r), ["always"]);
        history.borrow_mut().push(7);
        assert_eq!(listed(&r), ["always", "history/go_back"]);
        history.borrow_mut().clear();
        assert_eq!(listed(&r), ["always"]);
    }

    #[test]
    fn hidden_properties_still_dispatch() {
        let mut r = PropertyRegistry::new();
        r.register::<i64>("hidden")
            .unwrap()
            .getter(|| 3)
            .visible_when(|| false);
        assert!(listed(&r).is_empty());
        assert_eq!(r.get("hidden"), Value::Int(3));
        assert!(r.contains("hidden"));
    }
}
