//! Domain primitives for identifier chains.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary key of a chain row.
///
/// Keeps storage-assigned ids from being confused with the external catalog
/// ids, which are all strings.
///
/// # Examples
///
/// ```rust
/// use animechains::domain::ChainId;
///
/// let id = ChainId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(i32);

impl ChainId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ChainId> for i32 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl From<i32> for ChainId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}
