//! Deterministic generators: constants, type-derived defaults, and
//! delegating wrappers.

use chrono::{Local, Utc};

use mould_core::{MouldError, MouldResult, PropertyReference, TypeKind, TypeName, Value, types};

use crate::{GenerationContext, ValueGenerator};

/// Always returns a clone of the same value.
#[derive(Clone, Debug)]
pub struct ConstantValueGenerator {
    value: Value,
}

impl ConstantValueGenerator {
    pub fn new(value: impl Into<Value>) -> Self {
        Self { value: value.into() }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl ValueGenerator for ConstantValueGenerator {
    fn generate(&self, _ty: &TypeName, _cx: &dyn GenerationContext) -> MouldResult<Value> {
        Ok(self.value.clone())
    }
}

/// Shorthand for [`ConstantValueGenerator::new`].
pub fn constant(value: impl Into<Value>) -> ConstantValueGenerator {
    ConstantValueGenerator::new(value)
}

/// First declared variant of the requested enum type; `Null` when the enum
/// has no variants.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstEnumValueGenerator;

impl ValueGenerator for FirstEnumValueGenerator {
    fn generate(&self, ty: &TypeName, cx: &dyn GenerationContext) -> MouldResult<Value> {
        match cx.schema().kind(ty) {
            Some(TypeKind::Enum { variants }) => Ok(variants
                .into_iter()
                .next()
                .map_or(Value::Null, |variant| Value::Enum { ty: ty.clone(), variant })),
            Some(_) => Err(MouldError::Unsupported(format!("`{ty}` is not an enum type"))),
            None => Err(MouldError::UnresolvedType(ty.clone())),
        }
    }
}

/// Empty array, whatever the element type.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyArrayValueGenerator;

impl ValueGenerator for EmptyArrayValueGenerator {
    fn generate(&self, _ty: &TypeName, _cx: &dyn GenerationContext) -> MouldResult<Value> {
        Ok(Value::Array(Vec::new()))
    }
}

/// Current local date for `date`, current local date-time for `datetime`,
/// current local time of day for `time`, current UTC instant otherwise.
///
/// Not deterministic: every call reads the clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentTimeGenerator;

impl ValueGenerator for CurrentTimeGenerator {
    fn generate(&self, ty: &TypeName, _cx: &dyn GenerationContext) -> MouldResult<Value> {
        let value = if *ty == types::DATE {
            Value::Date(Local::now().date_naive())
        } else if *ty == types::DATETIME {
            Value::DateTime(Local::now().naive_local())
        } else if *ty == types::TIME {
            Value::Time(Local::now().time())
        } else {
            Value::Timestamp(Utc::now())
        };
        Ok(value)
    }
}

/// Always fails with `Unsupported`.  Useful as a registry fallback that
/// makes unhandled types loud.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedValueGenerator;

impl ValueGenerator for UnsupportedValueGenerator {
    fn generate(&self, ty: &TypeName, _cx: &dyn GenerationContext) -> MouldResult<Value> {
        Err(MouldError::Unsupported(format!("could not generate a value of type `{ty}`")))
    }
}

/// Instantiates the requested type through the bean constructor, without
/// filling any property.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullaryConstructGenerator;

impl ValueGenerator for NullaryConstructGenerator {
    fn generate(&self, ty: &TypeName, cx: &dyn GenerationContext) -> MouldResult<Value> {
        cx.instantiate(ty)
    }
}

/// Delegates to an inner generator, then persists the result through the
/// engine's saver.
///
/// Wrapping [`EngineGenerator`] gives "build a nested entity and save it".
pub struct SavingValueGenerator<G> {
    inner: G,
}

impl<G: ValueGenerator> SavingValueGenerator<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

impl<G: ValueGenerator> ValueGenerator for SavingValueGenerator<G> {
    fn generate(&self, ty: &TypeName, cx: &dyn GenerationContext) -> MouldResult<Value> {
        let value = self.inner.generate(ty, cx)?;
        cx.save(value)
    }

    fn generate_property(
        &self,
        property: &PropertyReference,
        ty: &TypeName,
        cx: &dyn GenerationContext,
    ) -> MouldResult<Value> {
        let value = self.inner.generate_property(property, ty, cx)?;
        cx.save(value)
    }
}

/// Full engine resolution for the requested type, or for a fixed type when
/// built with [`EngineGenerator::of`].
#[derive(Clone, Debug, Default)]
pub struct EngineGenerator {
    target: Option<TypeName>,
}

impl EngineGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always generate `target`, whatever type is requested.  Handy for
    /// properties typed as an interface but filled with a concrete bean.
    pub fn of(target: impl Into<TypeName>) -> Self {
        Self { target: Some(target.into()) }
    }
}

impl ValueGenerator for EngineGenerator {
    fn generate(&self, ty: &TypeName, cx: &dyn GenerationContext) -> MouldResult<Value> {
        cx.generate(self.target.as_ref().unwrap_or(ty))
    }
}
