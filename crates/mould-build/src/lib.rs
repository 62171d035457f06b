//! `mould-build`: the engine and its build pipeline.
//!
//! # Pipeline
//!
//! ```text
//! engine.start(ty)
//!   ① Instantiate   BeanConstructor picks interface / abstract / class path;
//!                   constructor arguments are generated through the engine.
//!   ② Mutate        with_value / load / generate_value / fill update the
//!                   command's touched and scheduled sets.
//!   ③ Resolve       construct() generates every scheduled property:
//!                     property override → predicate → type table → engine
//!   ④ Persist       save() resolves with auto-save, then saves the bean.
//! ```
//!
//! Convention interfaces ([`ConventionInterface`]) put named builder methods
//! such as `withName` in front of the same command.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the override and skip tables. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mould_build::Engine;
//! use mould_core::{types, PropertyDef, Schema, TypeDef};
//!
//! let mut schema = Schema::new();
//! schema.define(
//!     TypeDef::class("Person")
//!         .property(PropertyDef::new("name", types::STRING))
//!         .property(PropertyDef::new("age", types::I32)),
//! );
//! let mut engine = Engine::new(schema);
//! engine.register_property_value("Person", "age", 30);
//! let person = engine.start("Person")?.fill().construct()?;
//! ```

pub mod command;
pub mod constructor;
pub mod convention;
pub mod convert;
pub mod engine;
pub mod save;

#[cfg(test)]
mod tests;

pub use command::BuildCommand;
pub use constructor::{
    BeanConstructor, ConstructorStrategy, FirstImplementationGenerator, PlaceholderGenerator,
    ShortestConstructorStrategy,
};
pub use convention::{Arg, ConventionInterface, ConventionProxy, DefaultMethod};
pub use convert::{BeanConverter, PropertyCopyConverter, UnsupportedConverter};
pub use engine::Engine;
pub use save::{BeanSaver, MemorySaver, NoOperationSaver, UnsupportedSaver};
