//! Engine error type.
//!
//! Every crate in the workspace reports failures through [`MouldError`];
//! `mould-verify` keeps its own enum and wraps this one as a variant.
//! No failure is retried: an error aborts the build it occurred in.

use thiserror::Error;

use crate::TypeName;

/// The top-level error type for `mould-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum MouldError {
    /// No generator is registered for the type and no fallback is configured,
    /// or the type is missing from the schema altogether.
    #[error("no generator or definition found for type '{0}'")]
    UnresolvedType(TypeName),

    /// A generator failed while producing a value for a property.
    #[error("could not generate property '{property}' for: {declaring}")]
    Generation {
        declaring: TypeName,
        property:  String,
        #[source]
        source:    Box<MouldError>,
    },

    #[error("unknown property '{property}' in {ty}")]
    UnknownProperty { ty: TypeName, property: String },

    #[error("collection property '{property}' of {ty} is null and could not be initialised")]
    IncompatibleCollection { ty: TypeName, property: String },

    /// Raised when a convention interface is created, never at call time.
    #[error("method '{method}' of interface '{interface}' should start with '{prefix}' or be a default method")]
    ProxyConfiguration {
        interface: String,
        method:    String,
        prefix:    String,
    },

    #[error("cannot invoke '{method}' on '{interface}': {reason}")]
    InvalidInvocation {
        interface: String,
        method:    String,
        reason:    String,
    },

    /// A stub collaborator (saver, converter) was asked to do real work.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error("could not construct {ty}: {reason}")]
    Construction { ty: TypeName, reason: String },

    /// A custom getter or setter hook rejected the access.
    #[error("accessor for '{property}' of {ty} failed: {reason}")]
    Accessor {
        ty:       TypeName,
        property: String,
        reason:   String,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl MouldError {
    /// Wrap `self` with the property context it was raised under.
    pub fn in_property(self, declaring: &TypeName, property: &str) -> MouldError {
        MouldError::Generation {
            declaring: declaring.clone(),
            property:  property.to_string(),
            source:    Box::new(self),
        }
    }

    /// The innermost error, skipping any `Generation` wrappers.
    pub fn root_cause(&self) -> &MouldError {
        match self {
            MouldError::Generation { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Shorthand result type for all `mould-*` crates.
pub type MouldResult<T> = Result<T, MouldError>;
