//! The `ValueGenerator` trait: the main extension point for user code.

use std::rc::Rc;

use mould_core::{MouldResult, PropertyReference, Schema, TypeName, Value};

/// What a generator may ask of the engine while producing a value.
///
/// The engine implements this; generators never hold a reference to the
/// engine themselves, so recursive generation needs no shared ownership.
pub trait GenerationContext {
    fn schema(&self) -> &Schema;

    /// Full engine resolution for `ty`: type table first, otherwise a
    /// filled and constructed bean.
    fn generate(&self, ty: &TypeName) -> MouldResult<Value>;

    /// Constructor-only instance of `ty`, no properties filled.
    fn instantiate(&self, ty: &TypeName) -> MouldResult<Value>;

    /// Pass `value` through the persistence collaborator.
    fn save(&self, value: Value) -> MouldResult<Value>;
}

/// Produces a value of a requested type, or fails.
///
/// Only [`generate`][Self::generate] is required.  Generators that care
/// which property they fill override
/// [`generate_property`][Self::generate_property].
///
/// # Example
///
/// ```rust
/// use mould_core::{MouldResult, TypeName, Value};
/// use mould_generate::{GenerationContext, ValueGenerator};
///
/// struct Answer;
///
/// impl ValueGenerator for Answer {
///     fn generate(&self, _ty: &TypeName, _cx: &dyn GenerationContext) -> MouldResult<Value> {
///         Ok(Value::Int(42))
///     }
/// }
/// ```
pub trait ValueGenerator {
    fn generate(&self, ty: &TypeName, cx: &dyn GenerationContext) -> MouldResult<Value>;

    /// Called instead of `generate` when the value fills a property.
    ///
    /// Default: ignores the property and delegates to `generate`.
    fn generate_property(
        &self,
        _property: &PropertyReference,
        ty: &TypeName,
        cx: &dyn GenerationContext,
    ) -> MouldResult<Value> {
        self.generate(ty, cx)
    }
}

impl<G: ValueGenerator + ?Sized> ValueGenerator for Rc<G> {
    fn generate(&self, ty: &TypeName, cx: &dyn GenerationContext) -> MouldResult<Value> {
        (**self).generate(ty, cx)
    }

    fn generate_property(
        &self,
        property: &PropertyReference,
        ty: &TypeName,
        cx: &dyn GenerationContext,
    ) -> MouldResult<Value> {
        (**self).generate_property(property, ty, cx)
    }
}

impl<G: ValueGenerator + ?Sized> ValueGenerator for Box<G> {
    fn generate(&self, ty: &TypeName, cx: &dyn GenerationContext) -> MouldResult<Value> {
        (**self).generate(ty, cx)
    }

    fn generate_property(
        &self,
        property: &PropertyReference,
        ty: &TypeName,
        cx: &dyn GenerationContext,
    ) -> MouldResult<Value> {
        (**self).generate_property(property, ty, cx)
    }
}

/// A generator backed by a closure.  Build with [`from_fn`].
pub struct FnGenerator<F>(F);

/// Wrap a closure as a [`ValueGenerator`].
///
/// ```rust
/// use mould_core::Value;
/// use mould_generate::from_fn;
///
/// let shouty = from_fn(|ty, _cx| Ok(Value::text(ty.as_str().to_uppercase())));
/// # let _ = shouty;
/// ```
pub fn from_fn<F>(f: F) -> FnGenerator<F>
where
    F: Fn(&TypeName, &dyn GenerationContext) -> MouldResult<Value>,
{
    FnGenerator(f)
}

impl<F> ValueGenerator for FnGenerator<F>
where
    F: Fn(&TypeName, &dyn GenerationContext) -> MouldResult<Value>,
{
    fn generate(&self, ty: &TypeName, cx: &dyn GenerationContext) -> MouldResult<Value> {
        (self.0)(ty, cx)
    }
}
