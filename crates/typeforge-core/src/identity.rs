//! Per-build type identity tokens.

use serde::{Deserialize, Serialize};

/// Stable identity of a type discovered during a single schema build.
///
/// Identifiers are only meaningful within the build that allocated them;
/// independent builds each own a [`TypeIdGen`] and share no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeId(u32);

impl TypeId {
    /// Creates an identity token from a raw index.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw index backing this token.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic [`TypeId`] allocator owned by one schema build.
#[derive(Debug, Default)]
pub struct TypeIdGen {
    next: u32,
}

impl TypeIdGen {
    /// Creates a generator starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next identity token.
    pub fn next_id(&mut self) -> TypeId {
        let id = TypeId(self.next);
        self.next += 1;
        id
    }
}
