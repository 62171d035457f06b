//! `BuildCommand`: the touched/scheduled state machine over one bean.
//!
//! ```text
//! fresh ──with_value / load / generate_value / fill──▶ mutating
//!   ▲                                                   │
//!   └──────────────── construct / save ◀────────────────┘
//! ```
//!
//! * **touched**: set explicitly, loaded, scheduled, or already resolved.
//!   `fill` never schedules a touched property.
//! * **scheduled**: waiting for a generated value at the next `construct`.
//!
//! Every scheduled property is also touched.  `construct` drains the
//! scheduled set and may run any number of times.

use std::collections::BTreeSet;

use mould_core::{
    BeanRef, BeanWrapper, FieldAccessor, MouldError, MouldResult, PropertyAccessor, PropertyDef,
    PropertyReference, TypeName, Value, types,
};
use mould_generate::ValueGenerator;
use tracing::trace;

use crate::{ConventionInterface, ConventionProxy, Engine};

type CustomSaver<'e> = Box<dyn Fn(Value) -> MouldResult<Value> + 'e>;

/// Mutable build state over one live bean instance.
///
/// Mutators take the command by value and hand it back, so calls chain:
///
/// ```rust,ignore
/// let bean = engine
///     .start("SimpleBean")?
///     .with_value("id", 42i64)?
///     .with_value("hobbies", "coding")?
///     .generate_value_with("name", &constant("success"))?
///     .fill()
///     .construct()?;
/// ```
pub struct BuildCommand<'e> {
    engine:    &'e Engine,
    bean:      BeanRef,
    touched:   BTreeSet<String>,
    scheduled: BTreeSet<String>,
    saver:     Option<CustomSaver<'e>>,
}

impl<'e> BuildCommand<'e> {
    pub(crate) fn new(engine: &'e Engine, bean: BeanRef) -> Self {
        Self {
            engine,
            bean,
            touched: BTreeSet::new(),
            scheduled: BTreeSet::new(),
            saver: None,
        }
    }

    pub(crate) fn from_existing(engine: &'e Engine, bean: BeanRef) -> MouldResult<Self> {
        let mut command = Self::new(engine, bean);
        let wrapper = command.wrapper();
        for property in wrapper.descriptors() {
            if wrapper.is_readable(&property.name) && !wrapper.get_value(&property.name)?.is_null() {
                command.touched.insert(property.name.clone());
            }
        }
        Ok(command)
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn engine(&self) -> &'e Engine {
        self.engine
    }

    /// The live instance, as it stands; nothing is resolved.
    pub fn bean(&self) -> &BeanRef {
        &self.bean
    }

    pub fn bean_type(&self) -> TypeName {
        self.bean.type_name()
    }

    pub fn touched(&self) -> impl Iterator<Item = &str> + '_ {
        self.touched.iter().map(String::as_str)
    }

    pub fn scheduled(&self) -> impl Iterator<Item = &str> + '_ {
        self.scheduled.iter().map(String::as_str)
    }

    pub fn is_touched(&self, property: &str) -> bool {
        self.touched.contains(property)
    }

    pub fn is_scheduled(&self, property: &str) -> bool {
        self.scheduled.contains(property)
    }

    fn wrapper(&self) -> BeanWrapper<'e> {
        BeanWrapper::new(self.engine.schema(), self.bean.clone())
    }

    fn descriptor(&self, property: &str) -> MouldResult<&'e PropertyDef> {
        let ty = self.bean.type_name();
        self.engine
            .schema()
            .property(&ty, property)
            .ok_or_else(|| MouldError::UnknownProperty { ty, property: property.to_string() })
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Set `property` and mark it touched.
    ///
    /// Writes go through the setter when there is one, otherwise straight to
    /// the field.  A single value given for a collection property is added
    /// to the collection instead of replacing it; `Null` leaves an existing
    /// collection as it is.
    pub fn with_value(mut self, property: &str, value: impl Into<Value>) -> MouldResult<Self> {
        self.apply(property, value.into())?;
        Ok(self)
    }

    fn apply(&mut self, property: &str, value: Value) -> MouldResult<()> {
        let def = self.descriptor(property)?;
        let schema = self.engine.schema();
        let wrapper = self.wrapper();
        let fields = FieldAccessor::new(schema, self.bean.clone());
        let accessor: &dyn PropertyAccessor = if wrapper.is_writable(property) {
            &wrapper
        } else {
            &fields
        };

        if schema.is_assignable(&types::COLLECTION, &def.ty) && !value.is_collection() {
            self.add_to_collection(accessor, def, value)?;
        } else {
            accessor.set_value(property, value)?;
        }
        self.touch(property);
        Ok(())
    }

    fn add_to_collection(
        &self,
        accessor: &dyn PropertyAccessor,
        def: &PropertyDef,
        value: Value,
    ) -> MouldResult<()> {
        if value.is_null() {
            return Ok(());
        }
        let current = if accessor.is_readable(&def.name) {
            accessor.get_value(&def.name)?
        } else {
            Value::Null
        };
        let mut collection = if current.is_null() {
            self.engine.generate(&def.ty)?
        } else {
            current
        };
        if !collection.insert(value) {
            return Err(MouldError::IncompatibleCollection {
                ty: self.bean.type_name(),
                property: def.name.clone(),
            });
        }
        accessor.set_value(&def.name, collection)
    }

    fn touch(&mut self, property: &str) {
        self.touched.insert(property.to_string());
        self.scheduled.remove(property);
    }

    /// Copy every property readable on `source` and writable here, except
    /// `exclusions` and engine-skipped properties.
    pub fn load(mut self, source: &BeanRef, exclusions: &[&str]) -> MouldResult<Self> {
        let schema = self.engine.schema();
        let source = BeanWrapper::new(schema, source.clone());
        let target = self.wrapper();
        let ty = self.bean.type_name();
        for property in source.descriptors() {
            let name = property.name.as_str();
            if !source.is_readable(name) || !target.is_writable(name) || exclusions.contains(&name) {
                continue;
            }
            if target.descriptor(name).is_some_and(|def| self.engine.is_skipped(&ty, def)) {
                continue;
            }
            self.apply(name, source.get_value(name)?)?;
        }
        Ok(self)
    }

    /// Schedule `property` for generation at the next `construct`.
    pub fn generate_value(mut self, property: &str) -> MouldResult<Self> {
        self.descriptor(property)?;
        self.schedule(property);
        Ok(self)
    }

    pub fn generate_values(mut self, properties: &[&str]) -> MouldResult<Self> {
        for property in properties {
            self.descriptor(property)?;
            self.schedule(property);
        }
        Ok(self)
    }

    fn schedule(&mut self, property: &str) {
        self.touched.insert(property.to_string());
        self.scheduled.insert(property.to_string());
    }

    /// Generate a value for `property` with `generator` now and set it.
    pub fn generate_value_with(
        mut self,
        property: &str,
        generator: &dyn ValueGenerator,
    ) -> MouldResult<Self> {
        let def = self.descriptor(property)?;
        let ty = self.bean.type_name();
        let reference = PropertyReference::new(ty.clone(), property);
        let value = generator
            .generate_property(&reference, &def.ty, self.engine)
            .map_err(|source| source.in_property(&ty, property))?;
        self.apply(property, value)?;
        Ok(self)
    }

    /// Schedule every writable property that is neither touched nor skipped.
    pub fn fill(mut self) -> Self {
        let wrapper = self.wrapper();
        let ty = self.bean.type_name();
        for property in wrapper.descriptors() {
            if wrapper.is_writable(&property.name)
                && !self.touched.contains(&property.name)
                && !self.engine.is_skipped(&ty, property)
            {
                self.schedule(&property.name);
            }
        }
        self
    }

    /// Per-command saver used by [`save`](Self::save) for the top-level bean
    /// instead of the engine's.  Nested auto-saves still use the engine.
    pub fn with_saver(mut self, saver: impl Fn(Value) -> MouldResult<Value> + 'e) -> Self {
        self.saver = Some(Box::new(saver));
        self
    }

    // ── Resolution ────────────────────────────────────────────────────────

    /// Resolve every scheduled property and return the instance.
    pub fn construct(&mut self) -> MouldResult<BeanRef> {
        self.construct_with(false)
    }

    /// Like [`construct`](Self::construct); with `auto_save` every generated
    /// value passes through the engine's saver before it is set.
    ///
    /// Placeholder instances are returned untouched: there is nothing on
    /// them to resolve.
    pub fn construct_with(&mut self, auto_save: bool) -> MouldResult<BeanRef> {
        if self.bean.is_placeholder() {
            return Ok(self.bean.clone());
        }
        let ty = self.bean.type_name();
        let pending: Vec<String> = self.scheduled.iter().cloned().collect();
        for property in pending {
            let def = self.descriptor(&property)?;
            trace!(%ty, %property, "resolving");
            let mut value = self.engine.generate_property(&ty, def)?;
            if auto_save {
                value = self.engine.save(value)?;
            }
            self.apply(&property, value)?;
        }
        Ok(self.bean.clone())
    }

    /// Resolve with auto-save, then persist the bean itself.
    pub fn save(&mut self) -> MouldResult<BeanRef> {
        let bean = Value::Bean(self.construct_with(true)?);
        let saved = match &self.saver {
            Some(saver) => saver(bean)?,
            None => self.engine.save(bean)?,
        };
        match saved {
            Value::Bean(saved) => Ok(saved),
            other => Err(MouldError::Construction {
                ty: self.bean.type_name(),
                reason: format!("saver returned a {}", other.kind_name()),
            }),
        }
    }

    // ── Pivots ────────────────────────────────────────────────────────────

    /// Resolve, let `f` replace the instance, and keep building on the
    /// result.  Touched and scheduled state carry over.
    pub fn map(mut self, f: impl FnOnce(BeanRef) -> MouldResult<BeanRef>) -> MouldResult<Self> {
        let bean = self.construct()?;
        self.bean = f(bean)?;
        Ok(self)
    }

    /// Resolve, convert to `target` through the engine's converter, and
    /// start a new command on the converted bean.
    pub fn map_into(mut self, target: impl Into<TypeName>) -> MouldResult<BuildCommand<'e>> {
        let bean = self.construct()?;
        let mapped = self.engine.convert(&bean, &target.into())?;
        self.engine.start_from(mapped)
    }

    /// [`map_into`](Self::map_into), exposed through a convention interface.
    pub fn map_as(
        mut self,
        interface: &ConventionInterface,
        target: impl Into<TypeName>,
    ) -> MouldResult<ConventionProxy<'e>> {
        let bean = self.construct()?;
        let mapped = self.engine.convert(&bean, &target.into())?;
        self.engine.start_as_from(interface, mapped)
    }

    /// Resolve and run `f` on the instance, then keep building.
    pub fn do_with(mut self, f: impl FnOnce(&BeanRef) -> MouldResult<()>) -> MouldResult<Self> {
        let bean = self.construct()?;
        f(&bean)?;
        Ok(self)
    }

    /// Expose this command, state intact, through a convention interface.
    pub fn as_convention(self, interface: &ConventionInterface) -> MouldResult<ConventionProxy<'e>> {
        let dispatch = interface.dispatch(&self.engine.config().prefix)?;
        let ty = self.bean.type_name();
        if !self.engine.schema().is_assignable(interface.bean_type(), &ty) {
            return Err(MouldError::Unsupported(format!(
                "interface '{}' builds {}, not {ty}",
                interface.name(),
                interface.bean_type()
            )));
        }
        Ok(ConventionProxy::new(self, dispatch))
    }
}

impl std::fmt::Debug for BuildCommand<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildCommand")
            .field("bean", &self.bean)
            .field("touched", &self.touched)
            .field("scheduled", &self.scheduled)
            .finish_non_exhaustive()
    }
}
