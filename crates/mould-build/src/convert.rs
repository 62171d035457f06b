//! Type-conversion collaborators, used by `BuildCommand::map_into`.

use std::rc::Rc;

use mould_core::{
    BeanRef, BeanWrapper, FieldAccessor, MouldError, MouldResult, PropertyAccessor, TypeName, Value,
};
use mould_generate::GenerationContext;

/// Converts a bean into an instance of another type.
pub trait BeanConverter {
    fn convert(
        &self,
        bean: &BeanRef,
        target: &TypeName,
        cx: &dyn GenerationContext,
    ) -> MouldResult<BeanRef>;
}

impl<C: BeanConverter + ?Sized> BeanConverter for Rc<C> {
    fn convert(
        &self,
        bean: &BeanRef,
        target: &TypeName,
        cx: &dyn GenerationContext,
    ) -> MouldResult<BeanRef> {
        (**self).convert(bean, target, cx)
    }
}

/// Fails every conversion with `Unsupported`.  The engine default.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedConverter;

impl BeanConverter for UnsupportedConverter {
    fn convert(
        &self,
        bean: &BeanRef,
        target: &TypeName,
        _cx: &dyn GenerationContext,
    ) -> MouldResult<BeanRef> {
        Err(MouldError::Unsupported(format!(
            "no converter configured to map {} into {target}",
            bean.type_name()
        )))
    }
}

/// Instantiates the target through the bean constructor, then copies every
/// same-named property that is readable on the source and writable on the
/// target (through its setter, or directly on its field).
#[derive(Clone, Copy, Debug, Default)]
pub struct PropertyCopyConverter;

impl BeanConverter for PropertyCopyConverter {
    fn convert(
        &self,
        bean: &BeanRef,
        target: &TypeName,
        cx: &dyn GenerationContext,
    ) -> MouldResult<BeanRef> {
        let schema = cx.schema();
        let converted = match cx.instantiate(target)? {
            Value::Bean(converted) => converted,
            other => {
                return Err(MouldError::Construction {
                    ty: target.clone(),
                    reason: format!("bean constructor produced a {}", other.kind_name()),
                });
            }
        };

        let source = BeanWrapper::new(schema, bean.clone());
        let setters = BeanWrapper::new(schema, converted.clone());
        let fields = FieldAccessor::new(schema, converted.clone());
        for property in source.descriptors() {
            let name = property.name.as_str();
            if !source.is_readable(name) {
                continue;
            }
            if setters.is_writable(name) {
                setters.set_value(name, source.get_value(name)?)?;
            } else if fields.is_writable(name) {
                fields.set_value(name, source.get_value(name)?)?;
            }
        }
        Ok(converted)
    }
}
