//! Breadth-first interface/field closure.
//!
//! During the completion phase every composite type that declares one or
//! more interfaces is closed against the interface implementation graph:
//! every transitively reachable interface is recorded exactly once, and —
//! for interface types only — every inherited field is merged in unless a
//! field with the same name is already present. The traversal visits each
//! reachable interface once, so diamonds never duplicate members and
//! cycles never loop.

use std::collections::{HashSet, VecDeque};

use tracing::trace;
use typeforge_core::{FieldDefinition, InterfaceDefinition, TypeDefinition, TypeId};

use crate::error::SchemaError;
use crate::registry::TypeRegistry;

/// Working state for one completion pass.
///
/// Scoped to a single type's completion: the state must be fresh (or
/// [`reset`](TraversalContext::reset)) before each call, otherwise visited
/// names leak between unrelated types and break the traversal guarantees.
#[derive(Debug, Default)]
pub struct TraversalContext {
    /// Names of interfaces already recorded for the current type.
    completed: HashSet<String>,
    /// Field names already present on the current type.
    completed_fields: HashSet<String>,
    /// Interfaces queued for breadth-first processing.
    backlog: VecDeque<TypeId>,
}

impl TraversalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all working state for reuse on the next type.
    pub fn reset(&mut self) {
        self.completed.clear();
        self.completed_fields.clear();
        self.backlog.clear();
    }
}

/// Closes the interface and field sets of the type identified by `id`
/// against every interface transitively reachable from its declared
/// interface list.
///
/// A type with no declared interfaces is left untouched. An interface
/// reference that cannot be resolved is fatal: the scheduler promises all
/// dependencies were completed first, so an unresolved reference at this
/// point is a pipeline defect.
pub fn complete_type(
    registry: &mut TypeRegistry,
    id: TypeId,
    traversal: &mut TraversalContext,
) -> Result<(), SchemaError> {
    traversal.reset();

    let definition = &registry.lookup(id)?.definition;
    if definition.implements().is_empty() {
        return Ok(());
    }

    let type_name = definition.name().to_string();
    let is_interface = definition.is_interface();

    // Seed with the type's own field names and its direct interfaces.
    for field_name in definition.fields().keys() {
        traversal.completed_fields.insert(field_name.clone());
    }
    for reference in definition.implements() {
        let (interface_id, interface) = resolve_interface(registry, &type_name, reference)?;
        if traversal.completed.insert(interface.name.clone()) {
            traversal.backlog.push_back(interface_id);
        }
    }

    let mut implements_closed: Vec<String> = Vec::new();
    let mut inherited_fields: Vec<FieldDefinition> = Vec::new();

    // Drain breadth-first. Every interface enters the backlog at most
    // once, guarded by the completed set, so shared ancestors are merged
    // a single time and cyclic parent lists terminate.
    while let Some(current_id) = traversal.backlog.pop_front() {
        let current_def = &registry.lookup(current_id)?.definition;
        let current = current_def
            .as_interface()
            .ok_or_else(|| SchemaError::not_an_interface(&type_name, current_def.name()))?;

        implements_closed.push(current.name.clone());

        if is_interface {
            for field in current.fields.values() {
                if traversal.completed_fields.insert(field.name.clone()) {
                    inherited_fields.push(field.clone());
                }
            }
        }

        for parent in &current.implements {
            if traversal.completed.contains(parent) {
                continue;
            }
            let (parent_id, parent_def) = resolve_interface(registry, &type_name, parent)?;
            traversal.completed.insert(parent_def.name.clone());
            traversal.backlog.push_back(parent_id);
        }
    }

    let interfaces = implements_closed.len();
    let fields = inherited_fields.len();

    let context = registry.lookup_mut(id)?;
    *context.definition.implements_mut() = implements_closed;
    if let TypeDefinition::Interface(interface) = &mut context.definition {
        for field in inherited_fields {
            interface.fields.insert(field.name.clone(), field);
        }
    }

    trace!(
        type_name = %type_name,
        interfaces,
        inherited_fields = fields,
        "completed type"
    );
    Ok(())
}

fn resolve_interface<'a>(
    registry: &'a TypeRegistry,
    type_name: &str,
    reference: &str,
) -> Result<(TypeId, &'a InterfaceDefinition), SchemaError> {
    let id = registry
        .resolve_name(reference)
        .ok_or_else(|| SchemaError::unresolved_interface(type_name, reference))?;
    let definition = &registry.lookup(id)?.definition;
    let interface = definition
        .as_interface()
        .ok_or_else(|| SchemaError::not_an_interface(type_name, reference))?;
    Ok((id, interface))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DiscoveryContext;
    use typeforge_core::{InterfaceDefinition, ObjectDefinition, TypeIdGen};

    struct Fixture {
        registry: TypeRegistry,
        ids: TypeIdGen,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                registry: TypeRegistry::new(),
                ids: TypeIdGen::new(),
            }
        }

        fn interface(&mut self, name: &str, fields: &[&str], implements: &[&str]) -> TypeId {
            let mut def = InterfaceDefinition::new(name);
            for field in fields {
                def.add_field(FieldDefinition::new(*field, "String")).unwrap();
            }
            for parent in implements {
                def = def.with_implements(*parent);
            }
            let id = self.ids.next_id();
            self.registry
                .register(DiscoveryContext::new(id, TypeDefinition::Interface(def)))
                .unwrap();
            id
        }

        fn object(&mut self, name: &str, fields: &[&str], implements: &[&str]) -> TypeId {
            let mut def = ObjectDefinition::new(name);
            for field in fields {
                def.add_field(FieldDefinition::new(*field, "String")).unwrap();
            }
            for parent in implements {
                def = def.with_implements(*parent);
            }
            let id = self.ids.next_id();
            self.registry
                .register(DiscoveryContext::new(id, TypeDefinition::Object(def)))
                .unwrap();
            id
        }

        fn complete(&mut self, id: TypeId) -> Result<(), SchemaError> {
            let mut traversal = TraversalContext::new();
            complete_type(&mut self.registry, id, &mut traversal)
        }

        fn definition(&self, id: TypeId) -> &TypeDefinition {
            &self.registry.lookup(id).unwrap().definition
        }
    }

    #[test]
    fn test_interface_inherits_fields_transitively() {
        let mut fx = Fixture::new();
        fx.interface("A", &["a"], &[]);
        fx.interface("B", &["b"], &["A"]);
        let c = fx.interface("C", &["c"], &["B"]);

        fx.complete(c).unwrap();

        let def = fx.definition(c);
        assert_eq!(def.implements(), ["B", "A"]);
        let fields: Vec<&str> = def.fields().keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_own_field_wins_over_inherited() {
        let mut fx = Fixture::new();
        let a = fx.ids.next_id();
        let mut def = InterfaceDefinition::new("A");
        def.add_field(FieldDefinition::new("name", "String")).unwrap();
        fx.registry
            .register(DiscoveryContext::new(a, TypeDefinition::Interface(def)))
            .unwrap();

        let t = fx.ids.next_id();
        let mut def = InterfaceDefinition::new("T");
        def.add_field(FieldDefinition::new("name", "ID")).unwrap();
        let def = def.with_implements("A");
        fx.registry
            .register(DiscoveryContext::new(t, TypeDefinition::Interface(def)))
            .unwrap();

        fx.complete(t).unwrap();

        let fields = fx.definition(t).fields();
        assert_eq!(fields.len(), 1);
        // The declaration on T survives, never overwritten by A's field.
        assert_eq!(fields["name"].ty, "ID");
    }

    #[test]
    fn test_diamond_merges_shared_ancestor_once() {
        let mut fx = Fixture::new();
        fx.interface("C", &["c"], &[]);
        fx.interface("A", &["a"], &["C"]);
        fx.interface("B", &["b"], &["C"]);
        let t = fx.interface("T", &[], &["A", "B"]);

        fx.complete(t).unwrap();

        let def = fx.definition(t);
        assert_eq!(def.implements(), ["A", "B", "C"]);
        let fields: Vec<&str> = def.fields().keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_cyclic_interfaces_terminate() {
        let mut fx = Fixture::new();
        // A and B implement each other; closure must terminate and record
        // each reachable interface exactly once.
        fx.interface("A", &["a"], &["B"]);
        let b = fx.interface("B", &["b"], &["A"]);

        fx.complete(b).unwrap();

        let def = fx.definition(b);
        assert_eq!(def.implements(), ["A", "B"]);
        let fields: Vec<&str> = def.fields().keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["b", "a"]);
    }

    #[test]
    fn test_object_gets_references_but_not_fields() {
        let mut fx = Fixture::new();
        fx.interface("Node", &["id"], &[]);
        let person = fx.object("Person", &["name"], &["Node"]);

        fx.complete(person).unwrap();

        let def = fx.definition(person);
        assert_eq!(def.implements(), ["Node"]);
        let fields: Vec<&str> = def.fields().keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["name"]);
    }

    #[test]
    fn test_type_without_interfaces_is_untouched() {
        let mut fx = Fixture::new();
        let person = fx.object("Person", &["name"], &[]);
        fx.complete(person).unwrap();
        assert!(fx.definition(person).implements().is_empty());
    }

    #[test]
    fn test_unresolved_reference_is_fatal() {
        let mut fx = Fixture::new();
        let person = fx.object("Person", &[], &["Ghost"]);
        let err = fx.complete(person).unwrap_err();
        assert!(matches!(err, SchemaError::UnresolvedInterface { .. }));
        assert!(err.is_scheduling_defect());
    }

    #[test]
    fn test_object_reference_is_not_an_interface() {
        let mut fx = Fixture::new();
        fx.object("Other", &["x"], &[]);
        let person = fx.object("Person", &[], &["Other"]);
        let err = fx.complete(person).unwrap_err();
        assert!(matches!(err, SchemaError::NotAnInterface { .. }));
    }

    #[test]
    fn test_traversal_context_reuse_requires_no_leakage() {
        let mut fx = Fixture::new();
        fx.interface("Node", &["id"], &[]);
        let a = fx.object("A", &[], &["Node"]);
        let b = fx.object("B", &[], &["Node"]);

        // Completing two types through one context must produce the same
        // result as two fresh contexts.
        let mut traversal = TraversalContext::new();
        complete_type(&mut fx.registry, a, &mut traversal).unwrap();
        complete_type(&mut fx.registry, b, &mut traversal).unwrap();

        assert_eq!(fx.definition(a).implements(), ["Node"]);
        assert_eq!(fx.definition(b).implements(), ["Node"]);
    }

    #[test]
    fn test_completion_is_idempotent() {
        let mut fx = Fixture::new();
        fx.interface("A", &["a"], &[]);
        let t = fx.interface("T", &["t"], &["A"]);

        fx.complete(t).unwrap();
        fx.complete(t).unwrap();

        let def = fx.definition(t);
        assert_eq!(def.implements(), ["A"]);
        let fields: Vec<&str> = def.fields().keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["t", "a"]);
    }
}
