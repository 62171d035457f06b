//! Explicit type catalog: the introspection layer the engine runs on.
//!
//! # Design
//!
//! Instead of runtime reflection every bean type is described once by a
//! [`TypeDef`] and registered in a [`Schema`].  The engine only ever asks
//! the schema structural questions (kind, supertypes, effective properties,
//! constructors), so the generation algorithm is independent of how the
//! definitions were produced: by hand, by a derive macro, or from a file.
//!
//! ```rust
//! use mould_core::{types, PropertyDef, Schema, TypeDef};
//!
//! let mut schema = Schema::new();
//! schema.define(
//!     TypeDef::class("Person")
//!         .property(PropertyDef::new("id", types::I64).read_only())
//!         .property(PropertyDef::new("name", types::STRING)),
//! );
//! assert_eq!(schema.properties(&"Person".into()).len(), 2);
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use crate::types::{self, TypeName};
use crate::{Bean, BeanRef, MouldError, MouldResult, Value};

/// Custom read hook; the error string becomes a [`MouldError::Accessor`].
pub type Getter = Rc<dyn Fn(&Bean) -> Result<Value, String>>;

/// Custom write hook; the error string becomes a [`MouldError::Accessor`].
pub type Setter = Rc<dyn Fn(&mut Bean, Value) -> Result<(), String>>;

// ── TypeKind ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeKind {
    /// Scalar value types (numbers, text, temporal, uuid, type names).
    Primitive,
    /// `collection`, `list`, `set` and `map`.
    Collection,
    /// Enumeration; the first variant is the default value.
    Enum { variants: Vec<String> },
    /// `[elem]` array types, recognised structurally.
    Array { element: TypeName },
    /// Concrete, instantiable bean type.
    Class,
    Abstract,
    Interface,
}

impl TypeKind {
    /// `true` for bean kinds that can be instantiated directly.
    #[inline]
    pub fn is_concrete(&self) -> bool {
        matches!(self, TypeKind::Class)
    }

    #[inline]
    pub fn is_bean(&self) -> bool {
        matches!(self, TypeKind::Class | TypeKind::Abstract | TypeKind::Interface)
    }
}

// ── PropertyDef ───────────────────────────────────────────────────────────────

/// One named, typed property of a bean type.
///
/// Defaults: readable, writable, field-backed, nullable, no initial value.
#[derive(Clone)]
pub struct PropertyDef {
    pub name: String,
    pub ty: TypeName,
    /// Filled in by [`TypeDef::property`].
    pub declaring: TypeName,
    pub readable: bool,
    pub writable: bool,
    /// Backed by a real field, so the direct-field path can write it.
    pub field: bool,
    pub nullable: bool,
    /// Value every new instance starts with, e.g. an empty set.
    pub initial: Option<Value>,
    /// Free-form tags consulted by property predicates.
    pub attributes: Vec<String>,
    pub getter: Option<Getter>,
    pub setter: Option<Setter>,
}

impl PropertyDef {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            declaring: types::OBJECT,
            readable: true,
            writable: true,
            field: true,
            nullable: true,
            initial: None,
            attributes: Vec::new(),
            getter: None,
            setter: None,
        }
    }

    /// Getter only; still writable through the direct-field path.
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    /// Read-only and not backed by a field: its value comes from `getter`.
    pub fn computed(mut self, getter: impl Fn(&Bean) -> Result<Value, String> + 'static) -> Self {
        self.writable = false;
        self.field = false;
        self.getter = Some(Rc::new(getter));
        self
    }

    /// Not nullable; the accessor verifier never writes `Null` to it.
    pub fn required(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn initial(mut self, value: impl Into<Value>) -> Self {
        self.initial = Some(value.into());
        self
    }

    pub fn attribute(mut self, tag: impl Into<String>) -> Self {
        self.attributes.push(tag.into());
        self
    }

    pub fn getter(mut self, getter: impl Fn(&Bean) -> Result<Value, String> + 'static) -> Self {
        self.getter = Some(Rc::new(getter));
        self
    }

    pub fn setter(
        mut self,
        setter: impl Fn(&mut Bean, Value) -> Result<(), String> + 'static,
    ) -> Self {
        self.setter = Some(Rc::new(setter));
        self
    }

    pub fn has_attribute(&self, tag: &str) -> bool {
        self.attributes.iter().any(|a| a == tag)
    }
}

impl fmt::Debug for PropertyDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDef")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("declaring", &self.declaring)
            .field("readable", &self.readable)
            .field("writable", &self.writable)
            .field("field", &self.field)
            .field("nullable", &self.nullable)
            .field("initial", &self.initial)
            .field("attributes", &self.attributes)
            .field("getter", &self.getter.is_some())
            .field("setter", &self.setter.is_some())
            .finish()
    }
}

// ── Constructor ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Param {
    pub ty: TypeName,
    /// Property the argument is stored in, if any.
    pub binds: Option<String>,
}

/// A constructor signature.  Arguments bound to a property are written to
/// that property's field when the constructor runs.
#[derive(Clone, Debug, Default)]
pub struct Constructor {
    pub params: Vec<Param>,
}

impl Constructor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unbound parameter: generated and passed, but not stored.
    pub fn arg(mut self, ty: impl Into<TypeName>) -> Self {
        self.params.push(Param { ty: ty.into(), binds: None });
        self
    }

    pub fn bound_arg(mut self, ty: impl Into<TypeName>, property: impl Into<String>) -> Self {
        self.params.push(Param {
            ty: ty.into(),
            binds: Some(property.into()),
        });
        self
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

// ── TypeDef ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct TypeDef {
    pub name: TypeName,
    pub kind: TypeKind,
    /// Direct supertypes in declaration order.
    pub supertypes: Vec<TypeName>,
    pub properties: Vec<PropertyDef>,
    pub constructors: Vec<Constructor>,
}

impl TypeDef {
    pub fn new(name: impl Into<TypeName>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            supertypes: Vec::new(),
            properties: Vec::new(),
            constructors: Vec::new(),
        }
    }

    pub fn class(name: impl Into<TypeName>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn abstract_class(name: impl Into<TypeName>) -> Self {
        Self::new(name, TypeKind::Abstract)
    }

    pub fn interface(name: impl Into<TypeName>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    pub fn enumeration<I, S>(name: impl Into<TypeName>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            TypeKind::Enum {
                variants: variants.into_iter().map(Into::into).collect(),
            },
        )
        .extends(types::ENUM)
    }

    pub fn extends(mut self, supertype: impl Into<TypeName>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    pub fn property(mut self, mut property: PropertyDef) -> Self {
        property.declaring = self.name.clone();
        self.properties.push(property);
        self
    }

    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructors.push(constructor);
        self
    }
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// Registry of type definitions, in registration order.
///
/// A fresh schema already contains every built-in type in [`types`] and the
/// built-in hierarchy (`list`/`set` → `collection`, enums → `enum`,
/// arrays → `array`, everything → `object`).
#[derive(Clone, Debug)]
pub struct Schema {
    types: Vec<TypeDef>,
    index: HashMap<TypeName, usize>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    pub fn new() -> Self {
        let mut schema = Self {
            types: Vec::new(),
            index: HashMap::new(),
        };
        schema.define(TypeDef::class(types::OBJECT));
        for name in [
            types::BOOL,
            types::I8,
            types::I16,
            types::I32,
            types::I64,
            types::F32,
            types::F64,
            types::CHAR,
            types::STRING,
            types::DATE,
            types::DATETIME,
            types::TIME,
            types::TIMESTAMP,
            types::UUID,
            types::TYPE,
        ] {
            schema.define(TypeDef::new(name, TypeKind::Primitive));
        }
        schema.define(TypeDef::new(types::COLLECTION, TypeKind::Collection));
        schema.define(TypeDef::new(types::LIST, TypeKind::Collection).extends(types::COLLECTION));
        schema.define(TypeDef::new(types::SET, TypeKind::Collection).extends(types::COLLECTION));
        schema.define(TypeDef::new(types::MAP, TypeKind::Collection));
        schema.define(TypeDef::new(types::ENUM, TypeKind::Enum { variants: Vec::new() }));
        schema.define(TypeDef::new(
            types::ARRAY,
            TypeKind::Array {
                element: types::OBJECT,
            },
        ));
        schema
    }

    /// Register `def`, replacing (in place) any earlier definition of the
    /// same name.
    pub fn define(&mut self, def: TypeDef) -> &mut Self {
        match self.index.get(&def.name) {
            Some(&i) => self.types[i] = def,
            None => {
                self.index.insert(def.name.clone(), self.types.len());
                self.types.push(def);
            }
        }
        self
    }

    pub fn get(&self, ty: &TypeName) -> Option<&TypeDef> {
        self.index.get(ty).map(|&i| &self.types[i])
    }

    /// `true` if `ty` is defined, or is an array of a defined type.
    pub fn contains(&self, ty: &TypeName) -> bool {
        match ty.element_type() {
            Some(element) => self.contains(&element),
            None => self.index.contains_key(ty),
        }
    }

    pub fn kind(&self, ty: &TypeName) -> Option<TypeKind> {
        match ty.element_type() {
            Some(element) => Some(TypeKind::Array { element }),
            None => self.get(ty).map(|def| def.kind.clone()),
        }
    }

    /// Definition of `ty`, or `UnresolvedType`.
    pub fn require(&self, ty: &TypeName) -> MouldResult<&TypeDef> {
        self.get(ty).ok_or_else(|| MouldError::UnresolvedType(ty.clone()))
    }

    /// Direct supertypes of `ty`.  Arrays report `array`.
    pub fn supertypes(&self, ty: &TypeName) -> Vec<TypeName> {
        if ty.is_array() {
            return vec![types::ARRAY];
        }
        self.get(ty).map(|def| def.supertypes.clone()).unwrap_or_default()
    }

    /// `true` if a value of type `candidate` may be used where `target` is
    /// expected: reflexive, transitive over supertypes, and `object`
    /// accepts everything.
    pub fn is_assignable(&self, target: &TypeName, candidate: &TypeName) -> bool {
        if target == candidate || *target == types::OBJECT {
            return true;
        }
        let mut seen = HashSet::new();
        let mut pending = self.supertypes(candidate);
        while let Some(next) = pending.pop() {
            if next == *target {
                return true;
            }
            if seen.insert(next.clone()) {
                pending.extend(self.supertypes(&next));
            }
        }
        false
    }

    /// Effective properties of `ty`: inherited ones first, with own
    /// declarations replacing same-named inherited ones in place.
    pub fn properties(&self, ty: &TypeName) -> Vec<&PropertyDef> {
        let mut out: Vec<&PropertyDef> = Vec::new();
        let mut seen = HashSet::new();
        self.collect_properties(ty, &mut out, &mut seen);
        out
    }

    fn collect_properties<'a>(
        &'a self,
        ty: &TypeName,
        out: &mut Vec<&'a PropertyDef>,
        seen: &mut HashSet<TypeName>,
    ) {
        if !seen.insert(ty.clone()) {
            return;
        }
        let Some(def) = self.get(ty) else { return };
        for supertype in &def.supertypes {
            self.collect_properties(supertype, out, seen);
        }
        for property in &def.properties {
            match out.iter().position(|p| p.name == property.name) {
                Some(i) => out[i] = property,
                None => out.push(property),
            }
        }
    }

    pub fn property(&self, ty: &TypeName, name: &str) -> Option<&PropertyDef> {
        self.properties(ty).into_iter().find(|p| p.name == name)
    }

    /// Concrete bean types assignable to `ty`, in registration order.
    pub fn concrete_subtypes(&self, ty: &TypeName) -> Vec<&TypeName> {
        self.types
            .iter()
            .filter(|def| def.kind.is_concrete() && def.name != *ty && def.name != types::OBJECT)
            .filter(|def| self.is_assignable(ty, &def.name))
            .map(|def| &def.name)
            .collect()
    }

    /// All user-defined bean types (class, abstract, interface), in
    /// registration order.
    pub fn bean_types(&self) -> impl Iterator<Item = &TypeDef> + '_ {
        self.types
            .iter()
            .filter(|def| def.kind.is_bean() && def.name != types::OBJECT)
    }

    // ── Instantiation ─────────────────────────────────────────────────────

    /// Create a fresh instance of `ty`: initial values applied, then every
    /// bound constructor argument written to its field.
    pub fn instantiate(
        &self,
        ty: &TypeName,
        constructor: Option<&Constructor>,
        args: Vec<Value>,
    ) -> MouldResult<BeanRef> {
        let mut bean = Bean::new(ty.clone());
        for property in self.properties(ty) {
            if let Some(initial) = &property.initial {
                bean.set_field(property.name.clone(), initial.clone());
            }
        }
        if let Some(constructor) = constructor {
            if constructor.arity() != args.len() {
                return Err(MouldError::Construction {
                    ty: ty.clone(),
                    reason: format!(
                        "constructor takes {} arguments, got {}",
                        constructor.arity(),
                        args.len()
                    ),
                });
            }
            for (param, arg) in constructor.params.iter().zip(args) {
                if let Some(property) = &param.binds {
                    bean.set_field(property.clone(), arg);
                }
            }
        }
        Ok(BeanRef::new(bean))
    }

    /// Behaviour-less instance of an interface or abstract type.
    pub fn placeholder(&self, ty: &TypeName) -> BeanRef {
        BeanRef::new(Bean::placeholder(ty.clone()))
    }
}
