use serde::{Deserialize, Serialize};
use std::fmt;

/// An access tier controlling which fields are visible and fetched.
///
/// Levels are plain ordered integers. The engine only compares them; the
/// `BASIC < SHORT < DETAIL` constants are a naming convention for callers.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(pub u32);

impl Level {
    pub const BASIC: Level = Level(10);
    pub const SHORT: Level = Level(20);
    pub const DETAIL: Level = Level(30);
}

impl From<u32> for Level {
    fn from(value: u32) -> Self {
        Level(value)
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "Level({})", self.0)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, fmt)
    }
}
