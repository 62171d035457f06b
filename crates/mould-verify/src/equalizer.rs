//! Read-back comparison used by the verifier.

use mould_core::Value;

/// Decides whether a value read back from a property matches the value
/// written to it.
pub trait ObjectEqualizer {
    fn is_equal(&self, expected: &Value, actual: &Value) -> bool;
}

impl<F> ObjectEqualizer for F
where
    F: Fn(&Value, &Value) -> bool,
{
    fn is_equal(&self, expected: &Value, actual: &Value) -> bool {
        self(expected, actual)
    }
}

/// Same variant and structurally equal.
///
/// Floats compare exactly, sets ignore order, and beans compare by
/// identity.  An `Int` never equals a `Float`, whatever the numbers.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleObjectEqualizer;

impl ObjectEqualizer for SimpleObjectEqualizer {
    fn is_equal(&self, expected: &Value, actual: &Value) -> bool {
        expected.kind_name() == actual.kind_name() && expected == actual
    }
}
