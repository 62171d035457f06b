//! Creating empty bean instances.
//!
//! [`BeanConstructor`] turns a bean type into a fresh instance without
//! filling any property:
//!
//! | Kind        | Path                                                      |
//! |-------------|-----------------------------------------------------------|
//! | interface   | interface generator (default: [`PlaceholderGenerator`])   |
//! | abstract    | abstract generator (default: placeholder, or [`FirstImplementationGenerator`]) |
//! | class       | constructor picked by the [`ConstructorStrategy`], every argument generated through the engine |
//!
//! Constructor arguments come from full engine resolution, never from
//! property overrides: a parameter has no property identity.

use std::rc::Rc;

use mould_core::{
    AbstractStrategy, Constructor, MouldError, MouldResult, TypeDef, TypeKind, TypeName, Value,
};
use mould_generate::{GenerationContext, ValueGenerator};
use tracing::trace;

// ── Constructor strategies ────────────────────────────────────────────────────

/// Picks the constructor used to instantiate a concrete type.
///
/// Returning `None` falls back to argument-less instantiation.
pub trait ConstructorStrategy {
    fn find_constructor<'d>(&self, def: &'d TypeDef) -> Option<&'d Constructor>;
}

/// Fewest parameters wins; ties go to the first declared.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShortestConstructorStrategy;

impl ConstructorStrategy for ShortestConstructorStrategy {
    fn find_constructor<'d>(&self, def: &'d TypeDef) -> Option<&'d Constructor> {
        let mut shortest: Option<&Constructor> = None;
        for constructor in &def.constructors {
            if shortest.is_none_or(|best| constructor.arity() < best.arity()) {
                shortest = Some(constructor);
            }
        }
        shortest
    }
}

// ── Abstract and interface generators ─────────────────────────────────────────

/// Behaviour-less placeholder of the requested type.
///
/// Build commands skip property resolution on placeholders.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderGenerator;

impl ValueGenerator for PlaceholderGenerator {
    fn generate(&self, ty: &TypeName, cx: &dyn GenerationContext) -> MouldResult<Value> {
        Ok(Value::Bean(cx.schema().placeholder(ty)))
    }
}

/// Instantiates the first concrete subtype, in schema registration order.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstImplementationGenerator;

impl ValueGenerator for FirstImplementationGenerator {
    fn generate(&self, ty: &TypeName, cx: &dyn GenerationContext) -> MouldResult<Value> {
        let implementation = cx
            .schema()
            .concrete_subtypes(ty)
            .first()
            .map(|name| (*name).clone())
            .ok_or_else(|| MouldError::Construction {
                ty: ty.clone(),
                reason: "no concrete implementation is defined".into(),
            })?;
        trace!(%ty, %implementation, "using first implementation");
        cx.instantiate(&implementation)
    }
}

// ── BeanConstructor ───────────────────────────────────────────────────────────

pub struct BeanConstructor {
    strategy:   Box<dyn ConstructorStrategy>,
    abstracts:  Rc<dyn ValueGenerator>,
    interfaces: Rc<dyn ValueGenerator>,
}

impl Default for BeanConstructor {
    fn default() -> Self {
        Self::new(AbstractStrategy::Placeholder)
    }
}

impl BeanConstructor {
    pub fn new(strategy: AbstractStrategy) -> Self {
        let abstracts: Rc<dyn ValueGenerator> = match strategy {
            AbstractStrategy::Placeholder => Rc::new(PlaceholderGenerator),
            AbstractStrategy::FirstImplementation => Rc::new(FirstImplementationGenerator),
        };
        Self {
            strategy: Box::new(ShortestConstructorStrategy),
            abstracts,
            interfaces: Rc::new(PlaceholderGenerator),
        }
    }

    pub fn set_strategy(&mut self, strategy: impl ConstructorStrategy + 'static) {
        self.strategy = Box::new(strategy);
    }

    pub fn set_abstract_generator(&mut self, generator: impl ValueGenerator + 'static) {
        self.abstracts = Rc::new(generator);
    }

    pub fn set_interface_generator(&mut self, generator: impl ValueGenerator + 'static) {
        self.interfaces = Rc::new(generator);
    }

    /// Fresh, unfilled instance of `ty`.
    pub fn construct(&self, ty: &TypeName, cx: &dyn GenerationContext) -> MouldResult<Value> {
        let def = cx.schema().require(ty)?;
        match &def.kind {
            TypeKind::Interface => self.interfaces.generate(ty, cx),
            TypeKind::Abstract => self.abstracts.generate(ty, cx),
            TypeKind::Class => self.instantiate(def, cx),
            other => Err(MouldError::Construction {
                ty: ty.clone(),
                reason: format!("{other:?} is not a bean kind"),
            }),
        }
    }

    fn instantiate(&self, def: &TypeDef, cx: &dyn GenerationContext) -> MouldResult<Value> {
        let constructor = self.strategy.find_constructor(def);
        let args = match constructor {
            Some(constructor) => constructor
                .params
                .iter()
                .map(|param| cx.generate(&param.ty))
                .collect::<MouldResult<Vec<_>>>()?,
            None => Vec::new(),
        };
        trace!(ty = %def.name, arity = args.len(), "instantiating");
        cx.schema()
            .instantiate(&def.name, constructor, args)
            .map(Value::Bean)
    }
}

impl ValueGenerator for BeanConstructor {
    fn generate(&self, ty: &TypeName, cx: &dyn GenerationContext) -> MouldResult<Value> {
        self.construct(ty, cx)
    }
}
