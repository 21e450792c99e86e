//! StatValue - A current/maximum pair for one attribute

use serde::{Deserialize, Serialize};

/// Current and maximum value of a single attribute
///
/// The maximum only moves through equipment and class changes. Combat
/// damage lowers the current value of health and shield and never touches
/// the maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValue {
    pub current: i32,
    pub maximum: i32,
}

impl StatValue {
    /// Create a StatValue whose current value starts at its maximum
    pub fn full(value: i32) -> Self {
        StatValue {
            current: value,
            maximum: value,
        }
    }

    /// Shift both current and maximum by `delta` (may be negative),
    /// saturating at the `i32` bounds
    pub fn shift(&mut self, delta: i32) {
        self.current = self.current.saturating_add(delta);
        self.maximum = self.maximum.saturating_add(delta);
    }

    /// Reset both values to `value`
    pub fn reset(&mut self, value: i32) {
        *self = StatValue::full(value);
    }

    /// Whether the current value has reached its maximum
    pub fn is_full(&self) -> bool {
        self.current >= self.maximum
    }
}
