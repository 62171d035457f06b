//! Type names and the built-in type vocabulary.
//!
//! A [`TypeName`] is the identity of a type in a [`Schema`](crate::Schema).
//! Built-in names are `const`s so they can be used in patterns and
//! registrations without allocation.  Array types are not registered; the
//! name `[elem]` is recognised structurally by [`TypeName::element_type`].

use std::borrow::Cow;
use std::fmt;

/// Name of a type known to a schema.
///
/// `Clone + Ord + Hash` so it can key maps and sets without ceremony.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName(Cow<'static, str>);

impl TypeName {
    /// Build a name from a string literal without allocating.
    pub const fn from_static(name: &'static str) -> Self {
        TypeName(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        TypeName(Cow::Owned(name.into()))
    }

    /// The array type whose elements are `element`, e.g. `[i32]`.
    pub fn array_of(element: &TypeName) -> Self {
        TypeName(Cow::Owned(format!("[{}]", element.as_str())))
    }

    /// Element type if `self` names an array type.
    pub fn element_type(&self) -> Option<TypeName> {
        let inner = self.0.strip_prefix('[')?.strip_suffix(']')?;
        if inner.is_empty() {
            return None;
        }
        Some(TypeName::new(inner))
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.element_type().is_some()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeName({})", self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        TypeName::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        TypeName::new(name)
    }
}

impl From<&TypeName> for TypeName {
    fn from(name: &TypeName) -> Self {
        name.clone()
    }
}

/// Declare a block of built-in type name constants.
macro_rules! builtin_types {
    ($($(#[$attr:meta])* $name:ident = $lit:literal;)*) => {
        $(
            $(#[$attr])*
            pub const $name: TypeName = TypeName::from_static($lit);
        )*
    };
}

builtin_types! {
    /// Root of the hierarchy; every type is assignable to it.
    OBJECT = "object";
    BOOL = "bool";
    I8 = "i8";
    I16 = "i16";
    I32 = "i32";
    I64 = "i64";
    F32 = "f32";
    F64 = "f64";
    CHAR = "char";
    STRING = "string";
    /// Calendar date without time zone.
    DATE = "date";
    /// Date and wall-clock time without time zone.
    DATETIME = "datetime";
    /// Wall-clock time of day without date or time zone.
    TIME = "time";
    /// UTC instant.
    TIMESTAMP = "timestamp";
    UUID = "uuid";
    /// Supertype of `list` and `set`.
    COLLECTION = "collection";
    LIST = "list";
    SET = "set";
    MAP = "map";
    /// A value that names another type.
    TYPE = "type";
    /// Supertype of every enumeration.
    ENUM = "enum";
    /// Supertype of every `[elem]` array type.
    ARRAY = "array";
}
