//! Stateful generators that advance on every call.

use std::cell::{Cell, RefCell};

use mould_core::{MouldResult, TypeName, Value};

use crate::{GenerationContext, ValueGenerator};

/// Returns the current value, then replaces it with `step(current)`.
///
/// ```rust
/// use mould_generate::generators::IncrementingValueGenerator;
///
/// let letters = IncrementingValueGenerator::new('a', |c| char::from(*c as u8 + 1));
/// # let _ = letters;
/// ```
pub struct IncrementingValueGenerator<T> {
    current: RefCell<T>,
    step: Box<dyn Fn(&T) -> T>,
}

impl<T> IncrementingValueGenerator<T> {
    pub fn new(initial: T, step: impl Fn(&T) -> T + 'static) -> Self {
        Self {
            current: RefCell::new(initial),
            step: Box::new(step),
        }
    }
}

impl<T: Into<Value>> ValueGenerator for IncrementingValueGenerator<T> {
    fn generate(&self, _ty: &TypeName, _cx: &dyn GenerationContext) -> MouldResult<Value> {
        let mut current = self.current.borrow_mut();
        let next = (self.step)(&*current);
        let result = std::mem::replace(&mut *current, next);
        Ok(result.into())
    }
}

/// Integer counter: `initial`, `initial + 1`, …
#[derive(Debug)]
pub struct IncrementingIntegerGenerator {
    next: Cell<i64>,
}

impl IncrementingIntegerGenerator {
    pub fn new(initial: i64) -> Self {
        Self { next: Cell::new(initial) }
    }

    /// Value the next call will return.
    pub fn peek(&self) -> i64 {
        self.next.get()
    }
}

impl Default for IncrementingIntegerGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ValueGenerator for IncrementingIntegerGenerator {
    fn generate(&self, _ty: &TypeName, _cx: &dyn GenerationContext) -> MouldResult<Value> {
        let current = self.next.get();
        self.next.set(current.wrapping_add(1));
        Ok(Value::Int(current))
    }
}
