//! Native backing types and their declared conformance sets.
//!
//! Schema types can be bound to a concrete host-language type, and the
//! pipeline infers implicit interface membership from that type's ancestry.
//! Rather than depending on a reflection subsystem, every concrete native
//! type registers the native interfaces it conforms to when it is declared;
//! the catalog then answers transitive ancestry queries over those
//! declarations.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::CoreError;

/// Handle to a concrete native type registered in a [`NativeTypeCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeType(u32);

impl NativeType {
    /// The universal "any object" sentinel.
    ///
    /// Definitions backed by the sentinel never participate in interface
    /// inference and the sentinel is never indexed.
    pub const ANY: NativeType = NativeType(0);

    /// Returns false only for the [`NativeType::ANY`] sentinel.
    pub fn is_concrete(self) -> bool {
        self != Self::ANY
    }
}

#[derive(Debug, Clone)]
struct NativeTypeEntry {
    name: String,
    /// Directly declared conformances, in declaration order.
    conforms: Vec<NativeType>,
}

/// Catalog of native types and the conformance edges between them.
///
/// One catalog belongs to one schema build; there is no global registry.
#[derive(Debug)]
pub struct NativeTypeCatalog {
    entries: HashMap<NativeType, NativeTypeEntry>,
    next: u32,
}

impl NativeTypeCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            // 0 is reserved for the ANY sentinel.
            next: 1,
        }
    }

    /// Declares a concrete native type and returns its handle.
    pub fn register(&mut self, name: impl Into<String>) -> NativeType {
        let name = name.into();
        let ty = NativeType(self.next);
        self.next += 1;
        trace!(native_type = %name, "registered native type");
        self.entries.insert(
            ty,
            NativeTypeEntry {
                name,
                conforms: Vec::new(),
            },
        );
        ty
    }

    /// Records that `ty` directly conforms to the native interface
    /// `implements`. Duplicate declarations are ignored.
    pub fn add_conformance(
        &mut self,
        ty: NativeType,
        implements: NativeType,
    ) -> Result<(), CoreError> {
        if !implements.is_concrete() {
            // Conforming to the sentinel carries no information.
            return Ok(());
        }
        let entry = self
            .entries
            .get_mut(&ty)
            .ok_or_else(|| CoreError::unknown_native_type(format!("{}", ty.0)))?;
        if !entry.conforms.contains(&implements) {
            entry.conforms.push(implements);
        }
        Ok(())
    }

    /// Returns the declared name of a native type, if registered.
    pub fn name(&self, ty: NativeType) -> Option<&str> {
        self.entries.get(&ty).map(|e| e.name.as_str())
    }

    /// Returns the full transitive conformance set of `ty`, breadth-first
    /// and deduplicated. The sentinel has an empty ancestry, and `ty` is
    /// never part of its own ancestry even when the declared conformance
    /// graph cycles back to it.
    pub fn ancestry(&self, ty: NativeType) -> Vec<NativeType> {
        if !ty.is_concrete() {
            return Vec::new();
        }

        let mut seen: HashSet<NativeType> = HashSet::new();
        seen.insert(ty);
        let mut out = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(ty);

        while let Some(current) = queue.pop_front() {
            let Some(entry) = self.entries.get(&current) else {
                continue;
            };
            for &parent in &entry.conforms {
                if seen.insert(parent) {
                    out.push(parent);
                    queue.push_back(parent);
                }
            }
        }

        out
    }

    /// Number of registered native types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no native types have been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NativeTypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}
