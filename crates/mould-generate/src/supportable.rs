//! Predicates that select a generator by inspecting a property definition.

use mould_core::PropertyDef;

/// Decides whether a property is handled by the generator paired with this
/// predicate.
pub trait Supportable {
    fn supports(&self, property: &PropertyDef) -> bool;
}

impl<F> Supportable for F
where
    F: Fn(&PropertyDef) -> bool,
{
    fn supports(&self, property: &PropertyDef) -> bool {
        self(property)
    }
}

/// Matches properties carrying an attribute tag.
#[derive(Clone, Debug)]
pub struct HasAttribute(pub String);

impl HasAttribute {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }
}

impl Supportable for HasAttribute {
    fn supports(&self, property: &PropertyDef) -> bool {
        property.has_attribute(&self.0)
    }
}
