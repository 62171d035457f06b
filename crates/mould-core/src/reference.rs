//! Identity of a property, used to key overrides and skip sets.

use std::fmt;

use crate::{PropertyDef, TypeName};

/// `(declaring type, property name)`.
///
/// Equality and hashing use only these two fields, so a reference built from
/// a [`PropertyDef`] and one built from explicit arguments are
/// interchangeable.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct PropertyReference {
    declaring: TypeName,
    name: String,
}

impl PropertyReference {
    pub fn new(declaring: impl Into<TypeName>, name: impl Into<String>) -> Self {
        Self {
            declaring: declaring.into(),
            name: name.into(),
        }
    }

    #[inline]
    pub fn declaring_type(&self) -> &TypeName {
        &self.declaring
    }

    #[inline]
    pub fn property_name(&self) -> &str {
        &self.name
    }
}

impl From<&PropertyDef> for PropertyReference {
    fn from(property: &PropertyDef) -> Self {
        PropertyReference::new(property.declaring.clone(), property.name.clone())
    }
}

impl fmt::Display for PropertyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring, self.name)
    }
}
