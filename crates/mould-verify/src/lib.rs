//! `mould-verify`: accessor verification on top of the `mould` engine.
//!
//! [`BeanTester`] builds instances through an [`Engine`](mould_build::Engine)
//! and checks that each writable, readable property returns what was
//! written to it.
//!
//! | Module        | Contents                                      |
//! |---------------|-----------------------------------------------|
//! | [`tester`]    | `BeanTester`                                  |
//! | [`equalizer`] | `ObjectEqualizer`, `SimpleObjectEqualizer`    |
//! | [`error`]     | `VerifyError`, `VerifyResult`                 |

pub mod equalizer;
pub mod error;
pub mod tester;


pub use equalizer::{ObjectEqualizer, SimpleObjectEqualizer};
pub use error::{VerifyError, VerifyResult};
pub use tester::BeanTester;
