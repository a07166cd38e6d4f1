//! The finished, immutable type graph.

use std::collections::HashMap;

use typeforge_core::{InterfaceDefinition, NativeType, TypeDefinition};

/// A completed schema: every type's final name, field set, and
/// implemented-interface set, queryable by name or by native backing type.
///
/// Immutable once built; downstream consumers (query execution,
/// validation) only ever read it.
#[derive(Debug)]
pub struct Schema {
    /// Completed definitions, in completion order.
    types: Vec<TypeDefinition>,
    by_name: HashMap<String, usize>,
    interface_by_native: HashMap<NativeType, usize>,
}

impl Schema {
    pub(crate) fn new(
        types: Vec<TypeDefinition>,
        interface_by_native: HashMap<NativeType, usize>,
    ) -> Self {
        let by_name = types
            .iter()
            .enumerate()
            .map(|(slot, def)| (def.name().to_string(), slot))
            .collect();
        Self {
            types,
            by_name,
            interface_by_native,
        }
    }

    /// Looks up a completed type by name.
    pub fn type_by_name(&self, name: &str) -> Option<&TypeDefinition> {
        self.by_name.get(name).map(|&slot| &self.types[slot])
    }

    /// Looks up the interface bound to a native backing type.
    pub fn interface_by_native(&self, ty: NativeType) -> Option<&InterfaceDefinition> {
        self.interface_by_native
            .get(&ty)
            .and_then(|&slot| self.types[slot].as_interface())
    }

    /// Completed types, in completion order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeforge_core::{FieldDefinition, ObjectDefinition};

    #[test]
    fn test_lookups() {
        let mut node = InterfaceDefinition::new("Node");
        node.add_field(FieldDefinition::new("id", "ID")).unwrap();
        let person = ObjectDefinition::new("Person");

        let schema = Schema::new(
            vec![
                TypeDefinition::Interface(node),
                TypeDefinition::Object(person),
            ],
            HashMap::new(),
        );

        assert_eq!(schema.len(), 2);
        assert!(schema.type_by_name("Node").unwrap().is_interface());
        assert!(schema.type_by_name("Person").is_some());
        assert!(schema.type_by_name("Ghost").is_none());
    }

    #[test]
    fn test_types_iterate_in_completion_order() {
        let schema = Schema::new(
            vec![
                TypeDefinition::Interface(InterfaceDefinition::new("A")),
                TypeDefinition::Interface(InterfaceDefinition::new("B")),
            ],
            HashMap::new(),
        );
        let names: Vec<&str> = schema.types().map(TypeDefinition::name).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
