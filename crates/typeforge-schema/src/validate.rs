//! Post-build schema validation.
//!
//! The closure engine guarantees interface field sets are complete and
//! that object types carry references to every interface they implement,
//! but object types are expected to declare (or receive via extension
//! merge) the fields their interfaces require. This validator reports the
//! first violation after the graph is frozen.

use typeforge_core::TypeDefinition;

use crate::error::SchemaError;
use crate::schema::Schema;

/// Checks that every object type declares every field of every interface
/// it implements.
pub fn validate_object_fields(schema: &Schema) -> Result<(), SchemaError> {
    for definition in schema.types() {
        let TypeDefinition::Object(object) = definition else {
            continue;
        };
        for interface_name in &object.implements {
            let Some(TypeDefinition::Interface(interface)) = schema.type_by_name(interface_name)
            else {
                // Closure guarantees implemented interfaces exist in the
                // finished graph; nothing further to check here.
                continue;
            };
            for field in interface.fields.keys() {
                if !object.fields.contains_key(field) {
                    return Err(SchemaError::missing_interface_field(
                        &object.name,
                        interface_name,
                        field,
                    ));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use typeforge_core::{FieldDefinition, InterfaceDefinition, ObjectDefinition};

    fn schema_with(object_fields: &[&str]) -> Schema {
        let mut node = InterfaceDefinition::new("Node");
        node.add_field(FieldDefinition::new("id", "ID")).unwrap();

        let mut person = ObjectDefinition::new("Person").with_implements("Node");
        for field in object_fields {
            person
                .add_field(FieldDefinition::new(*field, "String"))
                .unwrap();
        }

        Schema::new(
            vec![
                TypeDefinition::Interface(node),
                TypeDefinition::Object(person),
            ],
            HashMap::new(),
        )
    }

    #[test]
    fn test_complete_object_passes() {
        let schema = schema_with(&["id", "name"]);
        assert!(validate_object_fields(&schema).is_ok());
    }

    #[test]
    fn test_missing_interface_field_is_reported() {
        let schema = schema_with(&["name"]);
        let err = validate_object_fields(&schema).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Object type Person implements Node but does not declare field id"
        );
    }
}
