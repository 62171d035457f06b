//! `BeanTester`: checks that every property reads back what was written.

use std::collections::HashSet;

use mould_build::Engine;
use mould_core::{
    BeanRef, BeanWrapper, MouldError, PropertyAccessor, PropertyDef, PropertyReference, TypeName,
    Value,
};
use tracing::debug;

use crate::{ObjectEqualizer, SimpleObjectEqualizer, VerifyError, VerifyResult};

/// Verifies the accessors of bean types in a schema.
///
/// For each verified property of a freshly generated instance the tester
/// writes `Null` (nullable properties only), then an engine-generated value
/// of the property type, reading the property back after each write.
///
/// ```rust,ignore
/// let mut tester = BeanTester::new(Engine::new(schema));
/// tester.exclude_property("Person", "age");
/// let verified = tester.verify_schema()?;
/// ```
pub struct BeanTester {
    engine:    Engine,
    equalizer: Box<dyn ObjectEqualizer>,
    excluded:  HashSet<PropertyReference>,
    types:     HashSet<TypeName>,
    inherit:   bool,
}

impl BeanTester {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            equalizer: Box::new(SimpleObjectEqualizer),
            excluded:  HashSet::new(),
            types:     HashSet::new(),
            inherit:   true,
        }
    }

    pub fn with_equalizer(mut self, equalizer: impl ObjectEqualizer + 'static) -> Self {
        self.equalizer = Box::new(equalizer);
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Never verify this property, nor generate it while building the
    /// instances under test.
    pub fn exclude_property(&mut self, declaring: impl Into<TypeName>, property: &str) -> &mut Self {
        let declaring = declaring.into();
        self.engine.skip(declaring.clone(), property);
        self.excluded.insert(PropertyReference::new(declaring, property));
        self
    }

    /// Leave a bean type out of [`verify_beans`](Self::verify_beans) and
    /// [`verify_schema`](Self::verify_schema).
    pub fn exclude_type(&mut self, ty: impl Into<TypeName>) -> &mut Self {
        self.types.insert(ty.into());
        self
    }

    /// With `false`, only properties declared by the bean type itself are
    /// verified.  Default: `true`.
    pub fn inherit(&mut self, inherit: bool) -> &mut Self {
        self.inherit = inherit;
        self
    }

    // ── Verification ──────────────────────────────────────────────────────

    /// Verify every registered concrete bean type that is not excluded.
    /// Returns the number of types verified.
    pub fn verify_schema(&self) -> VerifyResult<usize> {
        let types: Vec<TypeName> = self
            .engine
            .schema()
            .bean_types()
            .filter(|def| def.kind.is_concrete())
            .map(|def| def.name.clone())
            .collect();
        self.verify_beans(&types)
    }

    /// Verify each of `types` that is not excluded.  Returns the number of
    /// types verified.
    pub fn verify_beans(&self, types: &[TypeName]) -> VerifyResult<usize> {
        let mut verified = 0;
        for ty in types.iter().filter(|ty| !self.types.contains(*ty)) {
            self.verify_bean(ty.clone())?;
            verified += 1;
        }
        Ok(verified)
    }

    /// Verify every eligible property of `ty`.  Returns the number of
    /// properties verified.
    pub fn verify_bean(&self, ty: impl Into<TypeName>) -> VerifyResult<usize> {
        let ty = ty.into();
        debug!(%ty, "verifying bean");
        self.verify_all(&ty).map_err(|source| VerifyError::Bean {
            ty,
            source: Box::new(source),
        })
    }

    fn verify_all(&self, ty: &TypeName) -> VerifyResult<usize> {
        let bean = self.instance(ty)?;
        let wrapper = BeanWrapper::new(self.engine.schema(), bean);
        let properties: Vec<&PropertyDef> = wrapper
            .descriptors()
            .into_iter()
            .filter(|property| self.should_verify(ty, property))
            .collect();
        for property in &properties {
            self.verify(&wrapper, property)?;
        }
        Ok(properties.len())
    }

    /// Verify one property of `ty`, whether or not it is excluded.
    pub fn verify_property(&self, ty: impl Into<TypeName>, property: &str) -> VerifyResult<()> {
        let ty = ty.into();
        let def = self.engine.schema().property(&ty, property).ok_or_else(|| {
            MouldError::UnknownProperty { ty: ty.clone(), property: property.to_string() }
        })?;
        let wrapper = BeanWrapper::new(self.engine.schema(), self.instance(&ty)?);
        self.verify(&wrapper, def)
    }

    fn should_verify(&self, ty: &TypeName, property: &PropertyDef) -> bool {
        property.readable
            && property.writable
            && (self.inherit || property.declaring == *ty)
            && !self.excluded.contains(&PropertyReference::from(property))
            && !self.excluded.contains(&PropertyReference::new(ty.clone(), &property.name))
    }

    fn instance(&self, ty: &TypeName) -> VerifyResult<BeanRef> {
        match self.engine.generate(ty)? {
            Value::Bean(bean) => Ok(bean),
            other => Err(MouldError::Construction {
                ty: ty.clone(),
                reason: format!("generated a {} instead of a bean", other.kind_name()),
            }
            .into()),
        }
    }

    fn verify(&self, wrapper: &BeanWrapper<'_>, property: &PropertyDef) -> VerifyResult<()> {
        debug!(ty = %wrapper.type_name(), property = %property.name, "verifying property");
        if property.nullable {
            self.round_trip(wrapper, property, Value::Null)?;
        }
        let value = self.engine.generate(&property.ty)?;
        self.round_trip(wrapper, property, value)
    }

    fn round_trip(
        &self,
        wrapper: &BeanWrapper<'_>,
        property: &PropertyDef,
        value: Value,
    ) -> VerifyResult<()> {
        let name = property.name.as_str();
        let unusable = |source| VerifyError::UnusableAccessor {
            ty: wrapper.type_name(),
            property: name.to_string(),
            source,
        };
        wrapper.set_value(name, value.clone()).map_err(unusable)?;
        let actual = wrapper.get_value(name).map_err(unusable)?;
        if !self.equalizer.is_equal(&value, &actual) {
            return Err(VerifyError::InconsistentAccessor {
                ty: wrapper.type_name(),
                property: name.to_string(),
                expected: value.to_string(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }
}
