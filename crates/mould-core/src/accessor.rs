//! Property access over bean instances.
//!
//! [`BeanWrapper`] is the conventional path: it honours the readable and
//! writable flags and runs custom getter/setter hooks.  [`FieldAccessor`] is
//! the fallback used for properties that have a field but no setter.

use crate::{BeanRef, MouldError, MouldResult, PropertyDef, Schema, TypeName, Value};

/// Read/write access to the properties of one bean instance.
pub trait PropertyAccessor {
    fn type_name(&self) -> TypeName;

    /// Every effective property of the instance's type.
    fn descriptors(&self) -> Vec<&PropertyDef>;

    fn descriptor(&self, name: &str) -> Option<&PropertyDef> {
        self.descriptors().into_iter().find(|p| p.name == name)
    }

    fn is_readable(&self, name: &str) -> bool;

    fn is_writable(&self, name: &str) -> bool;

    fn property_type(&self, name: &str) -> Option<TypeName> {
        self.descriptor(name).map(|p| p.ty.clone())
    }

    fn get_value(&self, name: &str) -> MouldResult<Value>;

    fn set_value(&self, name: &str, value: Value) -> MouldResult<()>;
}

fn unknown(ty: TypeName, name: &str) -> MouldError {
    MouldError::UnknownProperty {
        ty,
        property: name.to_string(),
    }
}

fn denied(ty: TypeName, name: &str, reason: &str) -> MouldError {
    MouldError::Accessor {
        ty,
        property: name.to_string(),
        reason: reason.to_string(),
    }
}

// ── BeanWrapper ───────────────────────────────────────────────────────────────

/// Accessor-pair view of a bean.
pub struct BeanWrapper<'s> {
    schema: &'s Schema,
    bean: BeanRef,
}

impl<'s> BeanWrapper<'s> {
    pub fn new(schema: &'s Schema, bean: BeanRef) -> Self {
        Self { schema, bean }
    }

    pub fn bean(&self) -> &BeanRef {
        &self.bean
    }

    fn lookup(&self, name: &str) -> MouldResult<&'s PropertyDef> {
        let ty = self.bean.type_name();
        self.schema.property(&ty, name).ok_or_else(|| unknown(ty, name))
    }
}

impl PropertyAccessor for BeanWrapper<'_> {
    fn type_name(&self) -> TypeName {
        self.bean.type_name()
    }

    fn descriptors(&self) -> Vec<&PropertyDef> {
        self.schema.properties(&self.bean.type_name())
    }

    fn is_readable(&self, name: &str) -> bool {
        self.lookup(name).is_ok_and(|p| p.readable)
    }

    fn is_writable(&self, name: &str) -> bool {
        self.lookup(name).is_ok_and(|p| p.writable)
    }

    fn get_value(&self, name: &str) -> MouldResult<Value> {
        let property = self.lookup(name)?;
        if !property.readable {
            return Err(denied(self.type_name(), name, "property has no getter"));
        }
        if self.bean.is_placeholder() {
            return Ok(Value::Null);
        }
        match &property.getter {
            Some(getter) => getter(&*self.bean.borrow())
                .map_err(|reason| denied(self.type_name(), name, &reason)),
            None if property.field => Ok(self.bean.get(name)),
            None => Ok(Value::Null),
        }
    }

    fn set_value(&self, name: &str, value: Value) -> MouldResult<()> {
        let property = self.lookup(name)?;
        if !property.writable {
            return Err(denied(self.type_name(), name, "property has no setter"));
        }
        if self.bean.is_placeholder() {
            return Ok(());
        }
        match &property.setter {
            Some(setter) => self
                .bean
                .with_mut(|bean| setter(bean, value))
                .map_err(|reason| denied(self.type_name(), name, &reason)),
            None => {
                self.bean.set(name, value);
                Ok(())
            }
        }
    }
}

// ── FieldAccessor ─────────────────────────────────────────────────────────────

/// Direct field view of a bean; ignores accessor flags and hooks.
pub struct FieldAccessor<'s> {
    schema: &'s Schema,
    bean: BeanRef,
}

impl<'s> FieldAccessor<'s> {
    pub fn new(schema: &'s Schema, bean: BeanRef) -> Self {
        Self { schema, bean }
    }

    fn field(&self, name: &str) -> MouldResult<&'s PropertyDef> {
        let ty = self.bean.type_name();
        match self.schema.property(&ty, name) {
            Some(p) if p.field => Ok(p),
            _ => Err(unknown(ty, name)),
        }
    }
}

impl PropertyAccessor for FieldAccessor<'_> {
    fn type_name(&self) -> TypeName {
        self.bean.type_name()
    }

    fn descriptors(&self) -> Vec<&PropertyDef> {
        self.schema
            .properties(&self.bean.type_name())
            .into_iter()
            .filter(|p| p.field)
            .collect()
    }

    fn is_readable(&self, name: &str) -> bool {
        self.field(name).is_ok()
    }

    fn is_writable(&self, name: &str) -> bool {
        self.field(name).is_ok()
    }

    fn get_value(&self, name: &str) -> MouldResult<Value> {
        self.field(name)?;
        Ok(self.bean.get(name))
    }

    fn set_value(&self, name: &str, value: Value) -> MouldResult<()> {
        self.field(name)?;
        self.bean.set(name, value);
        Ok(())
    }
}
