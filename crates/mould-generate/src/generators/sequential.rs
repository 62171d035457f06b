//! Generator that walks a fixed list of values.

use std::cell::Cell;

use mould_core::{MouldResult, TypeName, Value};

use crate::{GenerationContext, ValueGenerator};

/// Returns the given values in order.
///
/// Once every value has been returned it yields `Null`, or starts over when
/// built [`repeatable`](Self::repeatable).  An empty sequence always yields
/// `Null`.
#[derive(Debug)]
pub struct SequentialValueGenerator {
    values: Vec<Value>,
    repeatable: bool,
    position: Cell<usize>,
}

impl SequentialValueGenerator {
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            repeatable: false,
            position: Cell::new(0),
        }
    }

    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// Restart from the first value.
    pub fn reset(&self) {
        self.position.set(0);
    }
}

impl ValueGenerator for SequentialValueGenerator {
    fn generate(&self, _ty: &TypeName, _cx: &dyn GenerationContext) -> MouldResult<Value> {
        let mut position = self.position.get();
        if position >= self.values.len() && self.repeatable {
            position = 0;
        }
        let value = self.values.get(position).cloned().unwrap_or(Value::Null);
        self.position.set((position + 1).min(self.values.len()));
        Ok(value)
    }
}
