//! Persistence collaborators.
//!
//! The engine calls its [`BeanSaver`] once per top-level `save()` and once
//! per generated nested value while auto-saving.  Real backends live outside
//! this crate; the stock savers here cover tests and setups without one.

use std::cell::RefCell;
use std::rc::Rc;

use mould_core::{MouldError, MouldResult, Value};

/// Persists and deletes generated values.
pub trait BeanSaver {
    /// Persist `value` and return the stored form (which may differ, e.g.
    /// with an assigned identifier).
    fn save(&self, value: Value) -> MouldResult<Value>;

    fn delete(&self, value: &Value) -> MouldResult<()>;
}

impl<S: BeanSaver + ?Sized> BeanSaver for Rc<S> {
    fn save(&self, value: Value) -> MouldResult<Value> {
        (**self).save(value)
    }

    fn delete(&self, value: &Value) -> MouldResult<()> {
        (**self).delete(value)
    }
}

/// Returns every value unchanged.  The engine default.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOperationSaver;

impl BeanSaver for NoOperationSaver {
    fn save(&self, value: Value) -> MouldResult<Value> {
        Ok(value)
    }

    fn delete(&self, _value: &Value) -> MouldResult<()> {
        Ok(())
    }
}

/// Fails every call with `Unsupported`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedSaver;

impl BeanSaver for UnsupportedSaver {
    fn save(&self, value: Value) -> MouldResult<Value> {
        Err(MouldError::Unsupported(format!("cannot save {}", value.kind_name())))
    }

    fn delete(&self, value: &Value) -> MouldResult<()> {
        Err(MouldError::Unsupported(format!("cannot delete {}", value.kind_name())))
    }
}

/// Records saved and deleted values in memory.
#[derive(Debug, Default)]
pub struct MemorySaver {
    saved:   RefCell<Vec<Value>>,
    deleted: RefCell<Vec<Value>>,
}

impl MemorySaver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Vec<Value> {
        self.saved.borrow().clone()
    }

    pub fn deleted(&self) -> Vec<Value> {
        self.deleted.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saved.borrow().len()
    }

    pub fn clear(&self) {
        self.saved.borrow_mut().clear();
        self.deleted.borrow_mut().clear();
    }
}

impl BeanSaver for MemorySaver {
    fn save(&self, value: Value) -> MouldResult<Value> {
        self.saved.borrow_mut().push(value.clone());
        Ok(value)
    }

    fn delete(&self, value: &Value) -> MouldResult<()> {
        self.deleted.borrow_mut().push(value.clone());
        Ok(())
    }
}
