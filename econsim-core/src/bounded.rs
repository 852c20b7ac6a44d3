use crate::defines::infrastructure;
use serde::{Deserialize, Serialize};

/// A value clamped to an integer range (for discrete values).
/// Used for: infrastructure level (0 to 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundedInt {
    value: i32,
    min: i32,
    max: i32,
}

impl BoundedInt {
    pub const fn new(value: i32, min: i32, max: i32) -> Self {
        let value = if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        };
        Self { value, min, max }
    }

    pub fn get(&self) -> i32 {
        self.value
    }

    pub fn add(&mut self, delta: i32) {
        self.value = self.value.saturating_add(delta).clamp(self.min, self.max);
    }
}

pub type Infrastructure = BoundedInt;

/// Infrastructure level clamped to `[0, 10]`.
pub const fn new_infrastructure(level: i32) -> Infrastructure {
    BoundedInt::new(level, infrastructure::MIN, infrastructure::MAX)
}
