//! Palette resource — the generator a host edits.
//!
//! [`Palette`] owns the generation state: parameters, seed history, color
//! count, and the cached gradient. [`PaletteResource`] pairs a palette with
//! the [`PropertyRegistry`] that exposes it to a host by name.
//!
//! # Regeneration
//!
//! The cache is keyed by (parameters, seed, color count). Any query finds
//! it stale when that key has moved, or when a mutation dropped it, and
//! regenerates on the spot. Every mutation drops the cache, even one that
//! leaves the key unchanged. In interactive mode every mutation also
//! regenerates right away, so a live preview never lags. Either way, each completed regeneration notifies
//! the subscribed observers, synchronously and after every internal borrow
//! has been released: observers may read the palette freely.
//!
//! # Seeds
//!
//! A seed expands into a full parameter set through a seeded RNG (twelve
//! draws in [0, 1)). Editing a parameter by hand switches the seed to
//! [`NO_SEED`]; going back then returns to the last seeded palette.
//!
//! # Ownership
//!
//! Registry closures hold strong references to the palette. Observers are
//! stored inside it, so an observer that needs to read the palette should
//! capture a [`WeakPalette`] from [`PaletteResource::downgrade`].

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use cf_inspect::hint::RangeHint;
use cf_inspect::{PropertyBuilder, PropertyDescriptor, PropertyError, PropertyRegistry};
use cf_variant::{Callable, Color, Gradient, Value, Vector3};
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::PaletteConfig;
use crate::formula;
use crate::history::{NO_SEED, SeedHistory};
use crate::params::GenerationParameters;

// ---------------------------------------------------------------------------
// Observers
// ---------------------------------------------------------------------------

/// Handle returned by [`Palette::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Rc<dyn Fn()>;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Everything that determines a generated palette.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CacheKey {
    parameters: GenerationParameters,
    seed: i64,
    count: i64,
}

#[derive(Debug)]
struct State {
    parameters: GenerationParameters,
    history: SeedHistory,
    color_count: i64,
    /// Seed the current parameters were derived from, if any.
    derived_from: Option<i64>,
    cache: Option<(CacheKey, Gradient)>,
}

impl State {
    const fn key(&self) -> CacheKey {
        CacheKey {
            parameters: self.parameters,
            seed: self.history.current(),
            count: self.color_count,
        }
    }

    /// Cached gradient if fresh, else a regenerated one. The flag reports
    /// whether a regeneration happened.
    fn fresh(&mut self) -> (Gradient, bool) {
        let key = self.key();
        if let Some((cached, gradient)) = &self.cache {
            if *cached == key {
                return (gradient.clone(), false);
            }
        }
        (self.regenerate(), true)
    }

    fn invalidate(&mut self) {
        self.cache = None;
    }

    fn regenerate(&mut self) -> Gradient {
        let key = self.key();
        let gradient = formula::generate_gradient(&key.parameters, key.count);
        debug!("regenerated {} colors (seed {})", gradient.len(), key.seed);
        self.cache = Some((key, gradient.clone()));
        gradient
    }

    /// Expand the current seed into parameters, unless it already was.
    #[allow(clippy::cast_sign_loss)]
    fn derive_parameters(&mut self) {
        let seed = self.history.current();
        if seed == NO_SEED || self.derived_from == Some(seed) {
            return;
        }
        let mut rng = StdRng::seed_from_u64(seed as u64);
        self.parameters = GenerationParameters::from_rng(&mut rng);
        self.derived_from = Some(seed);
        debug!("derived parameters from seed {seed}");
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// A cosine palette generator with seed history and change notification.
///
/// All methods take `&self`; state lives behind a `RefCell`, which keeps
/// the type `!Send` and confines it to one thread.
pub struct Palette {
    interactive: bool,
    state: RefCell<State>,
    observers: RefCell<Vec<(ObserverId, Observer)>>,
    next_observer: Cell<u64>,
}

impl Palette {
    fn from_config(config: &PaletteConfig) -> Self {
        let mut state = State {
            parameters: config.parameters,
            history: SeedHistory::new(),
            color_count: config.color_count,
            derived_from: None,
            cache: None,
        };
        if let Some(seed) = config.seed {
            state.history.set_seed(seed);
            state.derive_parameters();
        }
        Self {
            interactive: config.interactive,
            state: RefCell::new(state),
            observers: RefCell::new(Vec::new()),
            next_observer: Cell::new(0),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Whether mutations regenerate immediately.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.interactive
    }

    #[must_use]
    pub fn parameters(&self) -> GenerationParameters {
        self.state.borrow().parameters
    }

    #[must_use]
    pub fn color_count(&self) -> i64 {
        self.state.borrow().color_count
    }

    /// The active seed, or [`NO_SEED`] after a manual edit.
    #[must_use]
    pub fn seed(&self) -> i64 {
        self.state.borrow().history.current()
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.state.borrow().history.can_go_back()
    }

    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.state.borrow().history.can_go_forward()
    }

    /// The palette as a gradient, regenerated first if stale.
    #[must_use]
    pub fn colors_gradient(&self) -> Gradient {
        let (gradient, regenerated) = self.state.borrow_mut().fresh();
        if regenerated {
            self.notify();
        }
        gradient
    }

    /// The palette's colors, regenerated first if stale.
    #[must_use]
    pub fn colors_array(&self) -> Vec<Color> {
        self.colors_gradient().colors().to_vec()
    }

    /// Interpolated color at `offset` in [0, 1]. Black for an empty
    /// palette.
    #[must_use]
    pub fn color_at_offset(&self, offset: f32) -> Color {
        self.colors_gradient().sample(offset)
    }

    /// Color at `index`, clamped into [0, count - 1]. `None` for an empty
    /// palette.
    #[must_use]
    pub fn color_at_index(&self, index: i64) -> Option<Color> {
        self.colors_gradient().color(index)
    }

    // ── Mutations ────────────────────────────────────────────────────────

    pub fn set_color_count(&self, count: i64) {
        {
            let mut state = self.state.borrow_mut();
            state.color_count = count;
            state.invalidate();
        }
        self.after_mutation();
    }

    /// Adopt `seed`, or a freshly drawn one when `seed` is [`NO_SEED`], and
    /// derive parameters from it. Returns the adopted seed.
    pub fn randomize(&self, seed: i64) -> i64 {
        let adopted = {
            let mut state = self.state.borrow_mut();
            if seed == NO_SEED {
                state.history.randomize();
            } else {
                state.history.set_seed(seed);
            }
            state.derive_parameters();
            state.invalidate();
            state.history.current()
        };
        self.after_mutation();
        adopted
    }

    /// Return to the previous seed. Returns `false` when there is none.
    pub fn go_back(&self) -> bool {
        self.navigate(SeedHistory::go_back)
    }

    /// Return to the next seed. Returns `false` when there is none.
    pub fn go_forward(&self) -> bool {
        self.navigate(SeedHistory::go_forward)
    }

    fn navigate(&self, step: fn(&mut SeedHistory) -> bool) -> bool {
        let moved = {
            let mut state = self.state.borrow_mut();
            let moved = step(&mut state.history);
            if moved {
                state.derive_parameters();
                state.invalidate();
            }
            moved
        };
        if moved {
            self.after_mutation();
        }
        moved
    }

    /// Replace every parameter by hand. The seed becomes [`NO_SEED`].
    pub fn set_parameters(&self, parameters: GenerationParameters) {
        {
            let mut state = self.state.borrow_mut();
            state.history.set_seed(NO_SEED);
            state.derived_from = None;
            state.parameters = parameters;
            state.invalidate();
        }
        self.after_mutation();
    }

    pub fn set_brightness(&self, brightness: Vector3) {
        self.set_parameters(GenerationParameters {
            brightness,
            ..self.parameters()
        });
    }

    pub fn set_contrast(&self, contrast: Vector3) {
        self.set_parameters(GenerationParameters {
            contrast,
            ..self.parameters()
        });
    }

    pub fn set_frequency(&self, frequency: Vector3) {
        self.set_parameters(GenerationParameters {
            frequency,
            ..self.parameters()
        });
    }

    pub fn set_range(&self, range: Vector3) {
        self.set_parameters(GenerationParameters {
            range,
            ..self.parameters()
        });
    }

    /// Regenerate now, stale or not, and notify.
    pub fn refresh(&self) {
        self.state.borrow_mut().regenerate();
        self.notify();
    }

    fn after_mutation(&self) {
        if self.interactive {
            let _ = self.colors_gradient();
        }
    }

    // ── Observers ────────────────────────────────────────────────────────

    /// Call `observer` after every regeneration.
    pub fn subscribe(&self, observer: impl Fn() + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer.get());
        self.next_observer.set(id.0 + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    /// Stop notifying `id`. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(other, _)| *other != id);
        observers.len() != before
    }

    fn notify(&self) {
        // Snapshot so observers may subscribe or unsubscribe while running.
        let observers: Vec<Observer> = self.observers.borrow().iter().map(|(_, o)| Rc::clone(o)).collect();
        for observer in observers {
            observer();
        }
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette")
            .field("interactive", &self.interactive)
            .field("state", &self.state)
            .field("observers", &self.observers.borrow().len())
            .finish()
    }
}

/// A non-owning handle to a [`Palette`], for observers.
#[derive(Debug, Clone)]
pub struct WeakPalette(Weak<Palette>);

impl WeakPalette {
    /// The palette, if its resource is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Rc<Palette>> {
        self.0.upgrade()
    }
}

// ---------------------------------------------------------------------------
// PaletteResource
// ---------------------------------------------------------------------------

/// A [`Palette`] plus the properties that expose it to a host.
///
/// Dereferences to the palette for the typed API; [`Self::list_descriptors`],
/// [`Self::get`] and [`Self::set`] are the generic, by-name API.
#[derive(Debug)]
pub struct PaletteResource {
    palette: Rc<Palette>,
    registry: PropertyRegistry,
}

impl PaletteResource {
    /// Build a resource from `config`, generating the first palette right
    /// away in interactive mode.
    ///
    /// # Errors
    ///
    /// [`PropertyError`] if property registration fails.
    pub fn new(config: &PaletteConfig) -> Result<Self, PropertyError> {
        let palette = Rc::new(Palette::from_config(config));
        let registry = register_properties(&palette)?;
        let resource = Self { palette, registry };
        resource.after_mutation();
        Ok(resource)
    }

    /// Build a resource with explicit starting parameters. Any seed in
    /// `config` is ignored.
    ///
    /// # Errors
    ///
    /// As [`Self::new`].
    pub fn create(parameters: GenerationParameters, config: &PaletteConfig) -> Result<Self, PropertyError> {
        Self::new(&PaletteConfig {
            parameters,
            seed: None,
            ..config.clone()
        })
    }

    /// Visible property descriptors, in registration order.
    #[must_use]
    pub fn list_descriptors(&self) -> Vec<PropertyDescriptor> {
        self.registry.list_descriptors()
    }

    /// Read a property by name. [`Value::Nil`] for unknown names.
    #[must_use]
    pub fn get(&self, name: &str) -> Value {
        self.registry.get(name)
    }

    /// Write a property by name. `false` when the name is unknown,
    /// read-only, or the value does not fit.
    pub fn set(&self, name: &str, value: &Value) -> bool {
        self.registry.set(name, value)
    }

    #[must_use]
    pub const fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    /// A handle that does not keep the palette alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakPalette {
        WeakPalette(Rc::downgrade(&self.palette))
    }
}

impl Deref for PaletteResource {
    type Target = Palette;

    fn deref(&self) -> &Palette {
        &self.palette
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

type Component = (&'static str, fn(&GenerationParameters) -> Vector3, fn(&Palette, Vector3));

const COMPONENTS: [Component; 4] = [
    ("components/brightness", |p| p.brightness, Palette::set_brightness),
    ("components/contrast", |p| p.contrast, Palette::set_contrast),
    ("components/frequency", |p| p.frequency, Palette::set_frequency),
    ("components/range", |p| p.range, Palette::set_range),
];

fn register_properties(palette: &Rc<Palette>) -> Result<PropertyRegistry, PropertyError> {
    let mut registry = PropertyRegistry::new();

    // Output
    let p = Rc::clone(palette);
    registry
        .register::<Gradient>("palette_preview")?
        .getter(move || p.colors_gradient())
        .read_only();

    let (get, set) = (Rc::clone(palette), Rc::clone(palette));
    registry
        .register::<i64>("color_count")?
        .getter(move || get.color_count())
        .setter(move |n| set.set_color_count(n))
        .range(RangeHint::new(1.0, 256.0).step(1.0).or_greater());

    let p = Rc::clone(palette);
    registry.register::<i64>("seed")?.getter(move || p.seed()).read_only();

    button(&mut registry, "refresh_palette", ("Refresh Palette", "Color"), palette, Palette::refresh)?;

    // Components
    for (name, read, write) in COMPONENTS {
        let (get, set) = (Rc::clone(palette), Rc::clone(palette));
        registry
            .register::<Vector3>(name)?
            .getter(move || read(&get.parameters()))
            .setter(move |v| write(&set, v))
            .range(RangeHint::new(0.0, 1.0).step(0.001));
    }

    button(&mut registry, "components/randomize", ("Randomize", "RandomNumberGenerator"), palette, |p| {
        p.randomize(NO_SEED);
    })?;

    // History
    let watched = Rc::clone(palette);
    button(&mut registry, "history/go_back", ("Go Back", "Back"), palette, |p| {
        p.go_back();
    })?
    .visible_when(move || watched.can_go_back());

    let watched = Rc::clone(palette);
    button(&mut registry, "history/go_forward", ("Go Forward", "Forward"), palette, |p| {
        p.go_forward();
    })?
    .visible_when(move || watched.can_go_forward());

    Ok(registry)
}

/// Register a button that runs `action` on the palette.
fn button<'r>(
    registry: &'r mut PropertyRegistry,
    name: &str,
    (label, icon): (&str, &str),
    palette: &Rc<Palette>,
    action: fn(&Palette),
) -> Result<PropertyBuilder<'r, Callable>, PropertyError> {
    let target = Rc::clone(palette);
    let press = Callable::from_fn(move || action(&target));
    let mut builder = registry.register::<Callable>(name)?;
    builder.getter(move || press.clone()).as_button(label, icon);
    Ok(builder)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use cf_inspect::PropertyHint;
    use cf_variant::{VariantType, Vector3i};
    use pretty_assertions::assert_eq;

    use super::*;

    const EPS: f32 = 1e-3;

    fn config(interactive: bool, color_count: i64) -> PaletteConfig {
        PaletteConfig {
            interactive,
            color_count,
            ..PaletteConfig::default()
        }
    }

    fn resource(interactive: bool, color_count: i64) -> PaletteResource {
        PaletteResource::new(&config(interactive, color_count)).unwrap()
    }

    /// Subscribe a counter and return it.
    fn counter(palette: &Palette) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        palette.subscribe(move || c.set(c.get() + 1));
        count
    }

    fn derived(seed: u64) -> GenerationParameters {
        GenerationParameters::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    fn press(res: &PaletteResource, name: &str) {
        match res.get(name) {
            Value::Callable(c) => c.call(),
            other => panic!("`{name}` is not a button: {other:?}"),
        }
    }

    fn listed(res: &PaletteResource) -> Vec<String> {
        res.list_descriptors().into_iter().map(|d| d.name).collect()
    }

    // ── Construction ─────────────────────────────────────────────────────

    #[test]
    fn default_resource() {
        let res = resource(true, 100);
        assert_eq!(res.seed(), NO_SEED);
        assert_eq!(res.color_count(), 100);
        assert_eq!(res.parameters(), GenerationParameters::default());
        assert_eq!(res.colors_array().len(), 100);
    }

    #[test]
    fn create_uses_explicit_parameters() {
        let params = GenerationParameters::new(Vector3::splat(0.2), Vector3::splat(0.1), Vector3::ONE, Vector3::ZERO);
        let cfg = PaletteConfig {
            seed: Some(5),
            ..config(false, 4)
        };
        let res = PaletteResource::create(params, &cfg).unwrap();
        assert_eq!(res.parameters(), params);
        assert_eq!(res.seed(), NO_SEED);
    }

    #[test]
    fn configured_seed_derives_parameters() {
        let cfg = PaletteConfig {
            seed: Some(9),
            ..config(false, 4)
        };
        let res = PaletteResource::new(&cfg).unwrap();
        assert_eq!(res.seed(), 9);
        assert_eq!(res.parameters(), derived(9));
        assert!(!res.can_go_back());
    }

    #[test]
    fn end_to_end_rainbow() {
        let res = PaletteResource::create(GenerationParameters::default(), &config(false, 3)).unwrap();
        let first = res.color_at_index(0).unwrap();
        assert!((first.r - 1.0).abs() < EPS);
        assert!((first.g - 0.2591).abs() < EPS);
        assert!((first.b - 0.2591).abs() < EPS);
        let last = res.color_at_index(2).unwrap();
        assert!(first.approx_eq(&last, EPS));
    }

    // ── Properties ───────────────────────────────────────────────────────

    #[test]
    fn registration_order() {
        let res = resource(false, 8);
        assert_eq!(
            res.registry().names().collect::<Vec<_>>(),
            [
                "palette_preview",
                "color_count",
                "seed",
                "refresh_palette",
                "components/brightness",
                "components/contrast",
                "components/frequency",
                "components/range",
                "components/randomize",
                "history/go_back",
                "history/go_forward",
            ]
        );
    }

    #[test]
    fn history_buttons_start_hidden() {
        let res = resource(false, 8);
        let names = listed(&res);
        assert_eq!(names.len(), 9);
        assert!(!names.iter().any(|n| n.starts_with("history/")));
    }

    #[test]
    fn descriptors() {
        let res = resource(false, 8);
        let d = |name: &str| res.registry().descriptor(name).unwrap();

        let preview = d("palette_preview");
        assert_eq!(preview.variant_type, VariantType::Object);
        assert_eq!(preview.hint, PropertyHint::ResourceType);
        assert_eq!(preview.hint_string, "Gradient");
        assert!(preview.is_read_only());

        let count = d("color_count");
        assert_eq!(count.variant_type, VariantType::Int);
        assert_eq!(count.hint_string, "1, 256, 1, or_greater");
        assert!(!count.is_read_only());

        assert!(d("seed").is_read_only());
        assert_eq!(d("seed").hint, PropertyHint::None);

        let brightness = d("components/brightness");
        assert_eq!(brightness.variant_type, VariantType::Vector3);
        assert_eq!(brightness.hint, PropertyHint::Range);
        assert_eq!(brightness.hint_string, "0, 1, 0.001");

        assert_eq!(d("refresh_palette").hint_string, "Refresh Palette,Color");
        assert_eq!(d("components/randomize").hint_string, "Randomize,RandomNumberGenerator");
        assert_eq!(d("history/go_back").hint_string, "Go Back,Back");
        assert_eq!(d("history/go_forward").hint_string, "Go Forward,Forward");
    }

    #[test]
    fn generic_get_and_set() {
        let res = resource(false, 8);
        assert!(res.set("color_count", &Value::Int(5)));
        assert_eq!(res.get("color_count"), Value::Int(5));
        assert_eq!(res.colors_array().len(), 5);

        assert_eq!(res.get("seed"), Value::Int(NO_SEED));
        assert!(!res.set("seed", &Value::Int(3)));
        assert!(!res.set("palette_preview", &Value::Nil));
    }

    #[test]
    fn unknown_names() {
        let res = resource(false, 8);
        assert_eq!(res.get("components/hue"), Value::Nil);
        assert!(!res.set("components/hue", &Value::Float(0.5)));
    }

    #[test]
    fn component_setter_coerces_and_clears_seed() {
        let res = resource(false, 8);
        res.randomize(21);
        assert!(res.set("components/frequency", &Value::Vector3i(Vector3i::new(2, 2, 2))));
        assert_eq!(res.parameters().frequency, Vector3::splat(2.0));
        assert_eq!(res.seed(), NO_SEED);
        assert_eq!(res.get("components/frequency"), Value::Vector3(Vector3::splat(2.0)));
    }

    #[test]
    fn component_setter_rejects_wrong_shape() {
        let res = resource(false, 8);
        let before = res.parameters();
        assert!(!res.set("components/range", &Value::String("wide".into())));
        assert_eq!(res.parameters(), before);
    }

    #[test]
    fn preview_property_holds_the_gradient() {
        let res = resource(false, 6);
        let Value::Object(o) = res.get("palette_preview") else {
            panic!("expected an object");
        };
        let gradient = o.downcast_ref::<Gradient>().unwrap();
        assert_eq!(gradient.len(), 6);
        assert_eq!(gradient.colors(), res.colors_array().as_slice());
    }

    // ── Seeds and history ────────────────────────────────────────────────

    #[test]
    fn same_seed_same_parameters() {
        let a = resource(false, 8);
        let b = resource(false, 8);
        a.randomize(42);
        b.randomize(42);
        assert_eq!(a.parameters(), b.parameters());
        assert_eq!(a.parameters(), derived(42));
        assert_eq!(a.colors_array(), b.colors_array());
    }

    #[test]
    fn unseeded_randomize_adopts_a_real_seed() {
        let res = resource(false, 8);
        let seed = res.randomize(NO_SEED);
        assert!(seed >= 0);
        assert_eq!(res.seed(), seed);
        assert_eq!(res.parameters(), derived(u64::try_from(seed).unwrap()));
    }

    #[test]
    fn back_and_forward_restore_parameters() {
        let res = resource(false, 8);
        res.randomize(1);
        res.randomize(2);
        assert!(res.go_back());
        assert_eq!(res.seed(), 1);
        assert_eq!(res.parameters(), derived(1));
        assert!(res.go_forward());
        assert_eq!(res.seed(), 2);
        assert_eq!(res.parameters(), derived(2));
        assert!(!res.go_forward());
    }

    #[test]
    fn back_from_manual_edit_returns_to_last_seed() {
        let res = resource(false, 8);
        res.randomize(42);
        res.set_brightness(Vector3::splat(0.9));
        assert_eq!(res.seed(), NO_SEED);
        assert!(res.go_back());
        assert_eq!(res.seed(), 42);
        assert_eq!(res.parameters(), derived(42));
    }

    #[test]
    fn history_buttons_follow_the_stacks() {
        let res = resource(false, 8);
        res.randomize(1);
        res.randomize(2);
        assert!(listed(&res).contains(&"history/go_back".to_string()));
        assert!(!listed(&res).contains(&"history/go_forward".to_string()));

        press(&res, "history/go_back");
        assert_eq!(res.seed(), 1);
        let names = listed(&res);
        assert!(!names.contains(&"history/go_back".to_string()));
        assert!(names.contains(&"history/go_forward".to_string()));

        press(&res, "history/go_forward");
        assert_eq!(res.seed(), 2);
    }

    #[test]
    fn randomize_button_draws_a_new_seed() {
        let res = resource(false, 8);
        press(&res, "components/randomize");
        assert!(res.seed() >= 0);
        assert_eq!(res.parameters(), derived(u64::try_from(res.seed()).unwrap()));
    }

    // ── Queries ──────────────────────────────────────────────────────────

    #[test]
    fn index_is_clamped() {
        let res = resource(false, 3);
        let colors = res.colors_array();
        assert_eq!(res.color_at_index(-5), Some(colors[0]));
        assert_eq!(res.color_at_index(1), Some(colors[1]));
        assert_eq!(res.color_at_index(99), Some(colors[2]));
    }

    #[test]
    fn empty_palette_queries() {
        let res = resource(false, 0);
        assert!(res.colors_array().is_empty());
        assert_eq!(res.color_at_index(0), None);
        assert_eq!(res.color_at_offset(0.5), Color::BLACK);

        res.set_color_count(-3);
        assert!(res.colors_gradient().is_empty());
    }

    #[test]
    fn offset_sampling_hits_stops() {
        let res = resource(false, 5);
        let colors = res.colors_array();
        assert!(res.color_at_offset(0.0).approx_eq(&colors[0], 1e-6));
        assert!(res.color_at_offset(0.5).approx_eq(&colors[2], 1e-6));
        assert!(res.color_at_offset(1.0).approx_eq(&colors[4], 1e-6));
    }

    // ── Notification ─────────────────────────────────────────────────────

    #[test]
    fn interactive_mutations_notify_immediately() {
        let res = resource(true, 8);
        let hits = counter(&res);

        res.set_color_count(16);
        assert_eq!(hits.get(), 1);
        res.randomize(3);
        assert_eq!(hits.get(), 2);

        // Queries on a fresh cache do not regenerate.
        let before = hits.get();
        let _ = res.colors_array();
        let _ = res.color_at_offset(0.3);
        assert_eq!(hits.get(), before);
    }

    #[test]
    fn lazy_mutations_defer_until_queried() {
        let res = resource(false, 8);
        let hits = counter(&res);

        res.set_color_count(16);
        res.randomize(4);
        assert_eq!(hits.get(), 0);

        assert_eq!(res.colors_array().len(), 16);
        assert_eq!(hits.get(), 1);
        let _ = res.colors_gradient();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn unchanged_count_still_regenerates_when_interactive() {
        let res = resource(true, 8);
        let hits = counter(&res);
        res.set_color_count(8);
        assert_eq!(hits.get(), 1);
        assert_eq!(res.colors_array().len(), 8);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn same_seed_randomize_still_regenerates_when_interactive() {
        let res = resource(true, 8);
        res.randomize(42);
        let before = res.colors_array();
        let hits = counter(&res);

        assert_eq!(res.randomize(42), 42);
        assert_eq!(hits.get(), 1);
        assert_eq!(res.colors_array(), before);
    }

    #[test]
    fn unchanged_count_regenerates_on_next_query_when_lazy() {
        let res = resource(false, 8);
        let _ = res.colors_array();
        let hits = counter(&res);

        res.set_color_count(8);
        assert_eq!(hits.get(), 0);
        let _ = res.colors_array();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn refresh_always_regenerates() {
        let res = resource(false, 8);
        let hits = counter(&res);
        res.refresh();
        press(&res, "refresh_palette");
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn history_navigation_notifies_in_interactive_mode() {
        let res = resource(true, 8);
        res.randomize(1);
        res.randomize(2);
        let hits = counter(&res);
        assert!(res.go_back());
        assert!(res.go_forward());
        assert_eq!(hits.get(), 2);
        assert!(!res.go_forward());
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let res = resource(false, 8);
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let id = res.subscribe(move || c.set(c.get() + 1));

        res.refresh();
        assert!(res.unsubscribe(id));
        res.refresh();
        assert_eq!(count.get(), 1);
        assert!(!res.unsubscribe(id));
    }

    #[test]
    fn observers_can_read_the_palette() {
        let res = resource(true, 8);
        let weak = res.downgrade();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        res.subscribe(move || {
            if let Some(palette) = weak.upgrade() {
                sink.borrow_mut().push(palette.colors_array().len());
            }
        });

        res.set_color_count(12);
        res.set_color_count(3);
        assert_eq!(*seen.borrow(), vec![12, 3]);
    }

    #[test]
    fn weak_handle_does_not_keep_the_palette_alive() {
        let res = resource(false, 8);
        let weak = res.downgrade();
        assert!(weak.upgrade().is_some());
        drop(res);
        assert!(weak.upgrade().is_none());
    }
}
