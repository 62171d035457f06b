//! UUID generators.

use mould_core::{MouldResult, SharedRng, TypeName, Value, types};

use crate::{GenerationContext, ValueGenerator};

/// Random version-4 UUID drawn from the injected RNG.
///
/// Yields `Value::Uuid` when the `uuid` type is requested and its
/// hyphenated text form for anything else, so it can fill both kinds of
/// identifier property.
pub struct UuidStringGenerator {
    rng: SharedRng,
}

impl UuidStringGenerator {
    pub fn new(rng: SharedRng) -> Self {
        Self { rng }
    }

    pub fn next_uuid(&self) -> uuid::Uuid {
        let bits: u128 = self.rng.borrow_mut().random();
        uuid::Builder::from_random_bytes(bits.to_be_bytes()).into_uuid()
    }
}

impl ValueGenerator for UuidStringGenerator {
    fn generate(&self, ty: &TypeName, _cx: &dyn GenerationContext) -> MouldResult<Value> {
        let id = self.next_uuid();
        if *ty == types::UUID {
            Ok(Value::Uuid(id))
        } else {
            Ok(Value::Text(id.hyphenated().to_string()))
        }
    }
}
