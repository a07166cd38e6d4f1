//! Native-type index: backing type to interface definition.
//!
//! Built exactly once, after discovery of all types finishes and before
//! interface inference runs. Read-only thereafter.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, trace};
use typeforge_core::{NativeType, TypeDefinition, TypeId};

use crate::registry::TypeRegistry;

/// Maps each interface's concrete backing type to the interface's identity.
///
/// When two interfaces declare the same backing type, the first registrant
/// wins and later candidates are dropped. This is documented deterministic
/// behavior, not a failure.
#[derive(Debug, Default)]
pub struct NativeTypeIndex {
    map: HashMap<NativeType, TypeId>,
}

impl NativeTypeIndex {
    /// Builds the index over all discovered interface definitions that
    /// carry a concrete backing type.
    pub fn build(registry: &TypeRegistry) -> Self {
        let mut map = HashMap::new();

        for context in registry.iter() {
            let TypeDefinition::Interface(iface) = &context.definition else {
                continue;
            };
            if !iface.backing_type.is_concrete() {
                continue;
            }
            match map.entry(iface.backing_type) {
                Entry::Vacant(slot) => {
                    slot.insert(context.id());
                }
                Entry::Occupied(_) => {
                    trace!(
                        interface = %iface.name,
                        "backing type already indexed, keeping first registrant"
                    );
                }
            }
        }

        debug!(interfaces = map.len(), "native type index built");
        Self { map }
    }

    /// Looks up the interface bound to a backing type.
    pub fn get(&self, ty: NativeType) -> Option<TypeId> {
        self.map.get(&ty).copied()
    }

    pub fn contains(&self, ty: NativeType) -> bool {
        self.map.contains_key(&ty)
    }

    /// Iterates all indexed (backing type, interface) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NativeType, TypeId)> + '_ {
        self.map.iter().map(|(&ty, &id)| (ty, id))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DiscoveryContext;
    use typeforge_core::{
        InterfaceDefinition, NativeTypeCatalog, ObjectDefinition, TypeIdGen,
    };

    #[test]
    fn test_index_maps_concrete_interfaces_only() {
        let mut catalog = NativeTypeCatalog::new();
        let n_node = catalog.register("INode");
        let n_person = catalog.register("Person");

        let mut ids = TypeIdGen::new();
        let mut registry = TypeRegistry::new();

        let node_id = ids.next_id();
        registry
            .register(DiscoveryContext::new(
                node_id,
                TypeDefinition::Interface(
                    InterfaceDefinition::new("Node").with_backing_type(n_node),
                ),
            ))
            .unwrap();

        // Sentinel-backed interfaces and object types are never indexed.
        registry
            .register(DiscoveryContext::new(
                ids.next_id(),
                TypeDefinition::Interface(InterfaceDefinition::new("Named")),
            ))
            .unwrap();
        registry
            .register(DiscoveryContext::new(
                ids.next_id(),
                TypeDefinition::Object(
                    ObjectDefinition::new("Person").with_backing_type(n_person),
                ),
            ))
            .unwrap();

        let index = NativeTypeIndex::build(&registry);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(n_node), Some(node_id));
        assert!(!index.contains(n_person));
    }

    #[test]
    fn test_first_registrant_wins_on_collision() {
        let mut catalog = NativeTypeCatalog::new();
        let shared = catalog.register("IShared");

        let mut ids = TypeIdGen::new();
        let mut registry = TypeRegistry::new();

        let first_id = ids.next_id();
        registry
            .register(DiscoveryContext::new(
                first_id,
                TypeDefinition::Interface(
                    InterfaceDefinition::new("First").with_backing_type(shared),
                ),
            ))
            .unwrap();
        registry
            .register(DiscoveryContext::new(
                ids.next_id(),
                TypeDefinition::Interface(
                    InterfaceDefinition::new("Second").with_backing_type(shared),
                ),
            ))
            .unwrap();

        let index = NativeTypeIndex::build(&registry);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(shared), Some(first_id));
    }
}
