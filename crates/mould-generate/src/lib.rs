//! `mould-generate`: value generators for the `mould` fixture engine.
//!
//! A generator produces a [`Value`](mould_core::Value) for a requested type.
//! Generators that need the engine (nested beans, persistence) reach it
//! through the [`GenerationContext`] passed to every call.
//!
//! | Module            | Contents                                                  |
//! |-------------------|-----------------------------------------------------------|
//! | [`generator`]     | `ValueGenerator`, `GenerationContext`, `from_fn`          |
//! | [`registry`]      | `TypeRegistry`, the ordered type table with defaults      |
//! | [`generators`]    | built-in generators                                       |
//! | [`supportable`]   | property predicates for attribute-driven overrides        |

pub mod generator;
pub mod generators;
pub mod registry;
pub mod supportable;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use generator::{FnGenerator, GenerationContext, ValueGenerator, from_fn};
pub use generators::constant;
pub use registry::TypeRegistry;
pub use supportable::{HasAttribute, Supportable};
