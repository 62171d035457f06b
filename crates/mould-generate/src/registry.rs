//! Type-keyed generator table with ordered supertype matching.
//!
//! # Lookup
//!
//! 1. Exact type match.
//! 2. First registered entry whose key type the requested type is
//!    assignable to, **in registration order**.
//! 3. The fallback generator, if any.
//! 4. Otherwise `MouldError::UnresolvedType`.
//!
//! Because step 2 is ordered, an early broad registration shadows later,
//! narrower-looking ones for every type it accepts.  The built-in defaults
//! are registered before any caller override, so callers replace them by
//! exact type rather than by adding broader entries.

use std::fmt;
use std::rc::Rc;

use mould_core::{MouldError, MouldResult, Schema, TypeName, Value, types};
use tracing::trace;

use crate::generators::{
    ConstantValueGenerator, CurrentTimeGenerator, EmptyArrayValueGenerator,
    FirstEnumValueGenerator,
};
use crate::{GenerationContext, ValueGenerator};

/// Ordered `(type → generator)` table with an optional fallback.
///
/// `Clone` copies the table but shares the generator instances, so a clone
/// can be re-registered independently while stateful generators keep
/// their state.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    entries: Vec<(TypeName, Rc<dyn ValueGenerator>)>,
    fallback: Option<Rc<dyn ValueGenerator>>,
}

impl TypeRegistry {
    /// An empty table without fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table pre-loaded with the built-in defaults:
    ///
    /// | Types                                    | Value                     |
    /// |------------------------------------------|---------------------------|
    /// | `bool`                                   | `false`                   |
    /// | `i8` `i16` `i32` `i64`                   | `0`                       |
    /// | `f32` `f64`                              | `0.0`                     |
    /// | `char`                                   | `'a'`                     |
    /// | `string`                                 | `"value"`                 |
    /// | `date` `datetime` `time` `timestamp`     | current time              |
    /// | `uuid`                                   | nil UUID                  |
    /// | `type`                                   | `object`                  |
    /// | `list` `set` `collection` `map`          | empty, mutable            |
    /// | `array` (every `[elem]`)                 | empty array               |
    /// | `enum` (every enumeration)               | first variant             |
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register_value(types::BOOL, false)
            .register_value(types::I8, 0i8)
            .register_value(types::I16, 0i16)
            .register_value(types::I32, 0i32)
            .register_value(types::I64, 0i64)
            .register_value(types::F32, 0.0f32)
            .register_value(types::F64, 0.0f64)
            .register_value(types::CHAR, 'a')
            .register_value(types::STRING, "value")
            .register(types::DATE, CurrentTimeGenerator)
            .register(types::DATETIME, CurrentTimeGenerator)
            .register(types::TIME, CurrentTimeGenerator)
            .register(types::TIMESTAMP, CurrentTimeGenerator)
            .register_value(types::UUID, uuid::Uuid::nil())
            .register_value(types::TYPE, types::OBJECT)
            .register_value(types::LIST, Value::List(Vec::new()))
            .register_value(types::SET, Value::Set(Vec::new()))
            .register_value(types::COLLECTION, Value::List(Vec::new()))
            .register_value(types::MAP, Value::Map(Vec::new()))
            .register(types::ARRAY, EmptyArrayValueGenerator)
            .register(types::ENUM, FirstEnumValueGenerator);
        registry
    }

    pub fn with_fallback(mut self, fallback: impl ValueGenerator + 'static) -> Self {
        self.fallback = Some(Rc::new(fallback));
        self
    }

    pub fn set_fallback(&mut self, fallback: Option<Rc<dyn ValueGenerator>>) {
        self.fallback = fallback;
    }

    pub fn register(
        &mut self,
        ty: impl Into<TypeName>,
        generator: impl ValueGenerator + 'static,
    ) -> &mut Self {
        self.register_shared(ty, Rc::new(generator))
    }

    /// Register an already shared generator.  Re-registering an exact type
    /// replaces its generator but keeps its original position.
    pub fn register_shared(
        &mut self,
        ty: impl Into<TypeName>,
        generator: Rc<dyn ValueGenerator>,
    ) -> &mut Self {
        let ty = ty.into();
        match self.entries.iter_mut().find(|(key, _)| *key == ty) {
            Some(entry) => entry.1 = generator,
            None => self.entries.push((ty, generator)),
        }
        self
    }

    pub fn register_value(&mut self, ty: impl Into<TypeName>, value: impl Into<Value>) -> &mut Self {
        self.register(ty, ConstantValueGenerator::new(value))
    }

    /// Generator for `ty` from steps 1 and 2 of the lookup; never the
    /// fallback.
    pub fn find(&self, ty: &TypeName, schema: &Schema) -> Option<&Rc<dyn ValueGenerator>> {
        self.entries
            .iter()
            .find(|(key, _)| key == ty)
            .or_else(|| self.entries.iter().find(|(key, _)| schema.is_assignable(key, ty)))
            .map(|(_, generator)| generator)
    }

    /// `true` if a registered entry (not the fallback) handles `ty`.
    pub fn contains(&self, ty: &TypeName, schema: &Schema) -> bool {
        self.find(ty, schema).is_some()
    }

    /// Registered key types, in registration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeName> + '_ {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ValueGenerator for TypeRegistry {
    fn generate(&self, ty: &TypeName, cx: &dyn GenerationContext) -> MouldResult<Value> {
        if let Some(generator) = self.find(ty, cx.schema()) {
            return generator.generate(ty, cx);
        }
        match &self.fallback {
            Some(fallback) => {
                trace!(%ty, "no registered generator, using fallback");
                fallback.generate(ty, cx)
            }
            None => Err(MouldError::UnresolvedType(ty.clone())),
        }
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.types().collect::<Vec<_>>())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
