//! Live bean instances.
//!
//! A bean is a runtime type name plus a map of field values, shared through
//! [`BeanRef`] so that a build command, its caller and any parent bean all
//! observe the same instance.  Instances are single-threaded (`Rc`), which
//! matches the engine's concurrency model.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::{TypeName, Value};

/// Field storage of one bean instance.
#[derive(Clone, Debug)]
pub struct Bean {
    ty: TypeName,
    fields: BTreeMap<String, Value>,
    placeholder: bool,
}

impl Bean {
    pub fn new(ty: TypeName) -> Self {
        Self {
            ty,
            fields: BTreeMap::new(),
            placeholder: false,
        }
    }

    /// A behaviour-less stand-in for an interface or abstract type.
    pub fn placeholder(ty: TypeName) -> Self {
        Self {
            ty,
            fields: BTreeMap::new(),
            placeholder: true,
        }
    }

    #[inline]
    pub fn type_name(&self) -> &TypeName {
        &self.ty
    }

    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    /// Raw field value; absent fields read as `Null`.
    pub fn field(&self, name: &str) -> Value {
        self.fields.get(name).cloned().unwrap_or(Value::Null)
    }

    /// Mutable access to a field, if it has been written before.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Raw field write.  Placeholders ignore writes.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        if !self.placeholder {
            self.fields.insert(name.into(), value);
        }
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}

/// Shared handle to a [`Bean`].
///
/// Cloning the handle does not copy the bean.  Equality is identity.
#[derive(Clone)]
pub struct BeanRef(Rc<RefCell<Bean>>);

impl BeanRef {
    pub fn new(bean: Bean) -> Self {
        BeanRef(Rc::new(RefCell::new(bean)))
    }

    pub fn type_name(&self) -> TypeName {
        self.0.borrow().ty.clone()
    }

    pub fn is_placeholder(&self) -> bool {
        self.0.borrow().placeholder
    }

    /// Raw field read, bypassing any accessor hooks.
    pub fn get(&self, name: &str) -> Value {
        self.0.borrow().field(name)
    }

    /// Raw field write, bypassing any accessor hooks.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.borrow_mut().set_field(name, value.into());
    }

    /// Run `f` with mutable access to the instance.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Bean) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }

    pub fn borrow(&self) -> Ref<'_, Bean> {
        self.0.borrow()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &BeanRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for BeanRef {
    fn eq(&self, other: &BeanRef) -> bool {
        self.ptr_eq(other)
    }
}

// Fields are not printed: bean graphs may be cyclic.
impl fmt::Debug for BeanRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(bean) => write!(f, "{}@{:p}", bean.ty, Rc::as_ptr(&self.0)),
            Err(_) => write!(f, "<borrowed>@{:p}", Rc::as_ptr(&self.0)),
        }
    }
}
