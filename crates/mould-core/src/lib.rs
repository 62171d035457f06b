//! `mould-core`: foundational types for the `mould` fixture engine.
//!
//! This crate is a dependency of every other `mould-*` crate.  It has no
//! `mould-*` dependencies and few external ones (`rand`, `thiserror`,
//! `chrono`, `uuid`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`types`]       | `TypeName` and the built-in type constants                |
//! | [`schema`]      | `Schema`, `TypeDef`, `TypeKind`, `PropertyDef`, `Constructor` |
//! | [`value`]       | `Value`, the dynamic value model                          |
//! | [`bean`]        | `Bean`, `BeanRef` (shared live instances)                 |
//! | [`accessor`]    | `PropertyAccessor`, `BeanWrapper`, `FieldAccessor`        |
//! | [`reference`]   | `PropertyReference`                                       |
//! | [`rng`]         | `GenRng`, `SharedRng`                                     |
//! | [`config`]      | `EngineConfig`, `AbstractStrategy`                        |
//! | [`error`]       | `MouldError`, `MouldResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the configuration types. |

pub mod accessor;
pub mod bean;
pub mod config;
pub mod error;
pub mod reference;
pub mod rng;
pub mod schema;
pub mod types;
pub mod value;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use accessor::{BeanWrapper, FieldAccessor, PropertyAccessor};
pub use bean::{Bean, BeanRef};
pub use config::{AbstractStrategy, DEFAULT_PREFIX, EngineConfig};
pub use error::{MouldError, MouldResult};
pub use reference::PropertyReference;
pub use rng::{GenRng, SharedRng};
pub use schema::{Constructor, Getter, Param, PropertyDef, Schema, Setter, TypeDef, TypeKind};
pub use types::TypeName;
pub use value::Value;
