use mould_core::{MouldError, TypeName};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    /// The value read back differs from the value just written.
    #[error("property '{property}' of {ty} returned a different value than was set (set: {expected}, read: {actual})")]
    InconsistentAccessor {
        ty:       TypeName,
        property: String,
        expected: String,
        actual:   String,
    },

    /// Writing or reading the property failed outright.
    #[error("property '{property}' of {ty} has an unusable getter and/or setter")]
    UnusableAccessor {
        ty:       TypeName,
        property: String,
        #[source]
        source:   MouldError,
    },

    #[error("could not verify bean {ty}")]
    Bean {
        ty:     TypeName,
        #[source]
        source: Box<VerifyError>,
    },

    #[error("engine error: {0}")]
    Engine(#[from] MouldError),
}

pub type VerifyResult<T> = Result<T, VerifyError>;
