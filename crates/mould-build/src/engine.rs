//! The `Engine`: generator resolution, overrides, skips, and persistence.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use mould_core::{
    BeanRef, EngineConfig, MouldError, MouldResult, PropertyDef, PropertyReference, Schema,
    SharedRng, TypeName, Value,
};
use mould_generate::generators::{ConstantValueGenerator, NullaryConstructGenerator};
use mould_generate::{GenerationContext, Supportable, TypeRegistry, ValueGenerator};
use tracing::{debug, trace};

use crate::{
    BeanConstructor, BeanConverter, BeanSaver, BuildCommand, ConstructorStrategy,
    ConventionInterface, ConventionProxy, NoOperationSaver, UnsupportedConverter,
};

#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = std::collections::HashMap<K, V>;

#[cfg(feature = "fx-hash")]
type Set<T> = rustc_hash::FxHashSet<T>;
#[cfg(not(feature = "fx-hash"))]
type Set<T> = std::collections::HashSet<T>;

/// Generates fully populated beans.
///
/// # Property resolution
///
/// When a build command resolves a scheduled property, the first match wins:
///
/// 1. A property override registered with [`register_property`][Self::register_property]
///    for the bean's runtime type, then for the property's declaring type.
/// 2. The first [`register_if`][Self::register_if] predicate accepting the
///    property definition (field-backed properties only).
/// 3. The type table, if it handles the property type.
/// 4. The engine itself: a nested bean is constructed, filled, and
///    resolved with auto-save.
///
/// Failures are wrapped in `MouldError::Generation` naming the bean type
/// and property.
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = Engine::new(schema);
/// engine.register_property_value("Person", "name", "Jan").skip("Person", "id");
/// let person = engine.start("Person")?.fill().construct()?;
/// ```
pub struct Engine {
    schema:      Rc<Schema>,
    config:      EngineConfig,
    rng:         SharedRng,
    types:       TypeRegistry,
    properties:  Map<PropertyReference, Rc<dyn ValueGenerator>>,
    supported:   Vec<(Rc<dyn Supportable>, Rc<dyn ValueGenerator>)>,
    skipped:     Set<PropertyReference>,
    constructor: Rc<RefCell<BeanConstructor>>,
    saver:       Rc<dyn BeanSaver>,
    converter:   Rc<dyn BeanConverter>,
    depth:       Cell<usize>,
}

impl Engine {
    /// Engine with the default configuration.
    pub fn new(schema: Schema) -> Self {
        Self::build(schema, EngineConfig::default())
    }

    pub fn with_config(schema: Schema, config: EngineConfig) -> MouldResult<Self> {
        config.validate()?;
        Ok(Self::build(schema, config))
    }

    fn build(schema: Schema, config: EngineConfig) -> Self {
        let mut types = TypeRegistry::with_defaults();
        types.set_fallback(Some(Rc::new(NullaryConstructGenerator)));
        Self {
            schema:      Rc::new(schema),
            rng:         config.make_rng().shared(),
            types,
            properties:  Map::default(),
            supported:   Vec::new(),
            skipped:     Set::default(),
            constructor: Rc::new(RefCell::new(BeanConstructor::new(config.abstract_strategy))),
            saver:       Rc::new(NoOperationSaver),
            converter:   Rc::new(UnsupportedConverter),
            depth:       Cell::new(0),
            config,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The engine's random source, for building randomised generators.
    pub fn rng(&self) -> SharedRng {
        Rc::clone(&self.rng)
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Use `generator` for every value of type `ty` (and, unless a more
    /// exact entry exists, of its subtypes).
    pub fn register_type(
        &mut self,
        ty: impl Into<TypeName>,
        generator: impl ValueGenerator + 'static,
    ) -> &mut Self {
        self.types.register(ty, generator);
        self
    }

    pub fn register_type_value(
        &mut self,
        ty: impl Into<TypeName>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.types.register_value(ty, value);
        self
    }

    /// Use `generator` for one property.  Wins over every other rule.
    pub fn register_property(
        &mut self,
        declaring: impl Into<TypeName>,
        property: &str,
        generator: impl ValueGenerator + 'static,
    ) -> &mut Self {
        self.properties
            .insert(PropertyReference::new(declaring, property), Rc::new(generator));
        self
    }

    pub fn register_property_value(
        &mut self,
        declaring: impl Into<TypeName>,
        property: &str,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.register_property(declaring, property, ConstantValueGenerator::new(value))
    }

    /// Use `generator` for every field-backed property `predicate` accepts.
    /// Predicates are tried in registration order.
    pub fn register_if(
        &mut self,
        predicate: impl Supportable + 'static,
        generator: impl ValueGenerator + 'static,
    ) -> &mut Self {
        self.supported.push((Rc::new(predicate), Rc::new(generator)));
        self
    }

    /// Never auto-generate this property.  Explicit values still apply.
    pub fn skip(&mut self, declaring: impl Into<TypeName>, property: &str) -> &mut Self {
        self.skipped.insert(PropertyReference::new(declaring, property));
        self
    }

    pub fn set_saver(&mut self, saver: impl BeanSaver + 'static) -> &mut Self {
        self.saver = Rc::new(saver);
        self
    }

    pub fn set_converter(&mut self, converter: impl BeanConverter + 'static) -> &mut Self {
        self.converter = Rc::new(converter);
        self
    }

    /// Replace how concrete types pick their constructor.  Shared with
    /// engines cloned from this one.
    pub fn set_constructor_strategy(
        &mut self,
        strategy: impl ConstructorStrategy + 'static,
    ) -> &mut Self {
        self.constructor.borrow_mut().set_strategy(strategy);
        self
    }

    /// Replace how abstract types are materialised.  Shared with engines
    /// cloned from this one.
    pub fn set_abstract_generator(
        &mut self,
        generator: impl ValueGenerator + 'static,
    ) -> &mut Self {
        self.constructor.borrow_mut().set_abstract_generator(generator);
        self
    }

    /// Replace how interfaces are materialised.  Shared with engines cloned
    /// from this one.
    pub fn set_interface_generator(
        &mut self,
        generator: impl ValueGenerator + 'static,
    ) -> &mut Self {
        self.constructor.borrow_mut().set_interface_generator(generator);
        self
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// `true` if `property` of a `bean_type` instance is excluded from
    /// auto-generation, keyed by runtime type or by declaring type.
    pub fn is_skipped(&self, bean_type: &TypeName, property: &PropertyDef) -> bool {
        self.skipped
            .contains(&PropertyReference::new(bean_type.clone(), &property.name))
            || self.skipped.contains(&PropertyReference::from(property))
    }

    fn find_generator(
        &self,
        bean_type: &TypeName,
        property: &PropertyDef,
    ) -> Option<Rc<dyn ValueGenerator>> {
        let runtime = PropertyReference::new(bean_type.clone(), &property.name);
        if let Some(generator) = self
            .properties
            .get(&runtime)
            .or_else(|| self.properties.get(&PropertyReference::from(property)))
        {
            trace!(%runtime, "property override");
            return Some(Rc::clone(generator));
        }
        if property.field {
            if let Some((_, generator)) =
                self.supported.iter().find(|(predicate, _)| predicate.supports(property))
            {
                trace!(%runtime, "predicate override");
                return Some(Rc::clone(generator));
            }
        }
        self.types.find(&property.ty, &self.schema).cloned()
    }

    // ── Generation ────────────────────────────────────────────────────────

    /// A value of type `ty`: from the type table when it handles `ty`,
    /// otherwise a new bean, filled and resolved with nested values
    /// auto-saved.  The bean itself is not saved.
    ///
    /// Each call is one nesting level, whichever branch serves it.
    pub fn generate(&self, ty: &TypeName) -> MouldResult<Value> {
        self.nested(ty, || {
            if let Some(generator) = self.types.find(ty, &self.schema) {
                return generator.generate(ty, self);
            }
            debug!(%ty, "generating bean");
            let bean = self.command(ty.clone(), self.construct(ty)?)?;
            Ok(Value::Bean(bean.fill().construct_with(true)?))
        })
    }

    /// Value for `property` of a `bean_type` instance, following the
    /// property resolution order.
    pub fn generate_property(
        &self,
        bean_type: &TypeName,
        property: &PropertyDef,
    ) -> MouldResult<Value> {
        let reference = PropertyReference::new(bean_type.clone(), &property.name);
        let result = match self.find_generator(bean_type, property) {
            Some(generator) => generator.generate_property(&reference, &property.ty, self),
            None => self.generate(&property.ty),
        };
        result.map_err(|source| source.in_property(bean_type, &property.name))
    }

    /// Fresh, unfilled instance of `ty` from the bean constructor.
    pub fn instantiate(&self, ty: &TypeName) -> MouldResult<Value> {
        self.nested(ty, || self.construct(ty))
    }

    /// Bean constructor call at the current nesting level.
    fn construct(&self, ty: &TypeName) -> MouldResult<Value> {
        let constructor = self.constructor.borrow();
        constructor.construct(ty, self)
    }

    /// Runs `f` one nesting level deeper, failing once `max_depth` is
    /// exceeded.
    fn nested<R>(&self, ty: &TypeName, f: impl FnOnce() -> MouldResult<R>) -> MouldResult<R> {
        let depth = self.depth.get() + 1;
        if depth > self.config.max_depth {
            return Err(MouldError::Construction {
                ty: ty.clone(),
                reason: format!(
                    "nesting exceeds max_depth {}; is the type graph cyclic?",
                    self.config.max_depth
                ),
            });
        }
        self.depth.set(depth);
        let result = f();
        self.depth.set(depth - 1);
        result
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Build command over a new instance of `ty`.
    pub fn start(&self, ty: impl Into<TypeName>) -> MouldResult<BuildCommand<'_>> {
        let ty = ty.into();
        let instance = self.instantiate(&ty)?;
        self.command(ty, instance)
    }

    fn command(&self, ty: TypeName, instance: Value) -> MouldResult<BuildCommand<'_>> {
        match instance {
            Value::Bean(bean) => Ok(BuildCommand::new(self, bean)),
            other => Err(MouldError::Construction {
                ty,
                reason: format!("bean constructor produced a {}", other.kind_name()),
            }),
        }
    }

    /// Build command over an existing instance.  Every readable property
    /// that is not `Null` starts out touched.
    pub fn start_from(&self, bean: BeanRef) -> MouldResult<BuildCommand<'_>> {
        BuildCommand::from_existing(self, bean)
    }

    /// Convention proxy over a new instance of the interface's bean type.
    ///
    /// The interface is validated before anything is instantiated.
    pub fn start_as(&self, interface: &ConventionInterface) -> MouldResult<ConventionProxy<'_>> {
        let dispatch = interface.dispatch(&self.config.prefix)?;
        let command = self.start(interface.bean_type().clone())?;
        Ok(ConventionProxy::new(command, dispatch))
    }

    pub fn start_as_from(
        &self,
        interface: &ConventionInterface,
        bean: BeanRef,
    ) -> MouldResult<ConventionProxy<'_>> {
        let dispatch = interface.dispatch(&self.config.prefix)?;
        let command = self.start_from(bean)?;
        Ok(ConventionProxy::new(command, dispatch))
    }

    // ── Collaborators ─────────────────────────────────────────────────────

    /// Persist `value`.  `Null` is returned as is without reaching the
    /// saver.
    pub fn save(&self, value: Value) -> MouldResult<Value> {
        if value.is_null() {
            return Ok(value);
        }
        self.saver.save(value)
    }

    pub fn delete(&self, value: &Value) -> MouldResult<()> {
        self.saver.delete(value)
    }

    pub fn delete_all<'v>(&self, values: impl IntoIterator<Item = &'v Value>) -> MouldResult<()> {
        values.into_iter().try_for_each(|value| self.saver.delete(value))
    }

    pub fn convert(&self, bean: &BeanRef, target: &TypeName) -> MouldResult<BeanRef> {
        self.converter.convert(bean, target, self)
    }

    /// Shallow copy for seeding engine variants.
    ///
    /// Property overrides, predicates, skips and the type table are copied,
    /// so registrations on either engine stay private to it.  The schema,
    /// generator instances, bean constructor, saver, converter and random
    /// source are shared.
    pub fn clone_settings(&self) -> Engine {
        Engine {
            schema:      Rc::clone(&self.schema),
            config:      self.config.clone(),
            rng:         Rc::clone(&self.rng),
            types:       self.types.clone(),
            properties:  self.properties.clone(),
            supported:   self.supported.clone(),
            skipped:     self.skipped.clone(),
            constructor: Rc::clone(&self.constructor),
            saver:       Rc::clone(&self.saver),
            converter:   Rc::clone(&self.converter),
            depth:       Cell::new(0),
        }
    }
}

impl GenerationContext for Engine {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn generate(&self, ty: &TypeName) -> MouldResult<Value> {
        Engine::generate(self, ty)
    }

    fn instantiate(&self, ty: &TypeName) -> MouldResult<Value> {
        Engine::instantiate(self, ty)
    }

    fn save(&self, value: Value) -> MouldResult<Value> {
        Engine::save(self, value)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("types", &self.types)
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}
