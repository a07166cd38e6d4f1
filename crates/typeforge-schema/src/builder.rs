//! Schema builder: drives the ordered build phases.
//!
//! The builder owns the native-type catalog, the type registry, and the
//! pending type extensions, and sequences the strictly ordered phases of
//! a schema build:
//!
//! 1. Discovery — callers declare native types and insert definitions.
//! 2. After discovery — the native-type index is built, interface
//!    inference runs over every context, and extensions merge into their
//!    base definitions.
//! 3. Completion — types are completed in dependency order and closed
//!    against their interface graphs, then frozen into a [`Schema`].
//! 4. Validation — object types are checked against the field sets of the
//!    interfaces they implement.
//!
//! A build either finishes all phases or fails fatally; no partial schema
//! is ever returned. Each builder owns all of its state, so independent
//! builds can run concurrently.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, trace, warn};
use typeforge_core::{
    InterfaceDefinition, NativeType, NativeTypeCatalog, ObjectDefinition, TypeDefinition, TypeId,
    TypeIdGen, is_valid_type_name,
};

use crate::closure::{TraversalContext, complete_type};
use crate::config::SchemaConfig;
use crate::error::SchemaError;
use crate::index::NativeTypeIndex;
use crate::inference::infer_interfaces;
use crate::registry::{DependencyKind, DiscoveryContext, TypeRegistry};
use crate::schema::Schema;
use crate::validate::validate_object_fields;

/// Builds a completed [`Schema`] from type definitions.
///
/// # Example
///
/// ```
/// use typeforge_core::{FieldDefinition, InterfaceDefinition, ObjectDefinition};
/// use typeforge_schema::SchemaBuilder;
///
/// # fn main() -> Result<(), typeforge_schema::SchemaError> {
/// let mut builder = SchemaBuilder::new();
///
/// let mut node = InterfaceDefinition::new("Node");
/// node.add_field(FieldDefinition::new("id", "ID"))?;
/// builder.insert_interface(node)?;
///
/// let mut person = ObjectDefinition::new("Person").with_implements("Node");
/// person.add_field(FieldDefinition::new("id", "ID"))?;
/// person.add_field(FieldDefinition::new("name", "String"))?;
/// builder.insert_object(person)?;
///
/// let schema = builder.build()?;
/// assert_eq!(schema.type_by_name("Person").unwrap().implements(), ["Node"]);
/// # Ok(())
/// # }
/// ```
pub struct SchemaBuilder {
    catalog: NativeTypeCatalog,
    registry: TypeRegistry,
    extensions: Vec<DiscoveryContext>,
    ids: TypeIdGen,
    config: SchemaConfig,
}

impl SchemaBuilder {
    /// Creates a builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SchemaConfig::default())
    }

    /// Creates a builder with explicit configuration.
    #[must_use]
    pub fn with_config(config: SchemaConfig) -> Self {
        Self {
            catalog: NativeTypeCatalog::new(),
            registry: TypeRegistry::new(),
            extensions: Vec::new(),
            ids: TypeIdGen::new(),
            config,
        }
    }

    /// Declares a concrete native type in the build's catalog.
    pub fn native_type(&mut self, name: impl Into<String>) -> NativeType {
        self.catalog.register(name)
    }

    /// Records that native type `ty` directly conforms to the native
    /// interface `implements`.
    pub fn native_conforms(
        &mut self,
        ty: NativeType,
        implements: NativeType,
    ) -> Result<(), SchemaError> {
        self.catalog.add_conformance(ty, implements)?;
        Ok(())
    }

    /// Inserts an interface definition, failing on duplicate discovery.
    pub fn insert_interface(
        &mut self,
        definition: InterfaceDefinition,
    ) -> Result<TypeId, SchemaError> {
        self.insert(TypeDefinition::Interface(definition))
    }

    /// Inserts an object definition or a type extension, failing on
    /// duplicate discovery.
    pub fn insert_object(&mut self, definition: ObjectDefinition) -> Result<TypeId, SchemaError> {
        self.insert(TypeDefinition::Object(definition))
    }

    /// Registers an explicit "must complete before me" edge for a
    /// previously inserted type.
    pub fn register_dependency(
        &mut self,
        id: TypeId,
        target: impl Into<String>,
    ) -> Result<(), SchemaError> {
        if let Ok(context) = self.registry.lookup_mut(id) {
            context.register_dependency(target, DependencyKind::Completed);
            return Ok(());
        }
        if let Some(extension) = self.extensions.iter_mut().find(|ext| ext.id() == id) {
            extension.register_dependency(target, DependencyKind::Completed);
            return Ok(());
        }
        Err(SchemaError::type_not_found(id.to_string()))
    }

    fn insert(&mut self, definition: TypeDefinition) -> Result<TypeId, SchemaError> {
        if !is_valid_type_name(definition.name()) {
            return Err(typeforge_core::CoreError::invalid_type_name(definition.name()).into());
        }

        let id = self.ids.next_id();
        let mut context = DiscoveryContext::new(id, definition);

        // Declared interfaces are explicit completion dependencies.
        let declared: Vec<String> = context.definition.implements().to_vec();
        for target in declared {
            context.register_dependency(target, DependencyKind::Completed);
        }

        if context.definition.is_extension() {
            trace!(type_name = %context.definition.name(), "discovered type extension");
            self.extensions.push(context);
        } else {
            self.registry.register(context)?;
        }
        Ok(id)
    }

    /// Runs all build phases and returns the finished schema.
    pub fn build(mut self) -> Result<Schema, SchemaError> {
        debug!(
            types = self.registry.len(),
            extensions = self.extensions.len(),
            "starting schema build"
        );

        // Discovery is closed. Index the interface backing types, then run
        // inference over every context — including pending extensions —
        // before any completion-order decision is made.
        let index = NativeTypeIndex::build(&self.registry);
        infer_interfaces(
            &mut self.registry,
            &mut self.extensions,
            &self.catalog,
            &index,
        );

        self.merge_extensions()?;

        let order = self.completion_order()?;
        debug!(types = order.len(), "completion order resolved");

        let mut traversal = TraversalContext::new();
        for &id in &order {
            complete_type(&mut self.registry, id, &mut traversal)?;
        }

        let schema = self.freeze(&order, &index)?;

        if self.config.validate_object_fields {
            validate_object_fields(&schema)?;
        }

        debug!(types = schema.len(), "schema build complete");
        Ok(schema)
    }

    /// Merges every pending type extension into the base object definition
    /// with the same name. Runs after inference so the interfaces and
    /// dependency edges inferred from the extension's target type carry
    /// over to the base.
    fn merge_extensions(&mut self) -> Result<(), SchemaError> {
        let extensions = std::mem::take(&mut self.extensions);
        for extension in extensions {
            let dependencies = extension.dependencies().to_vec();
            let TypeDefinition::Object(ext) = extension.definition else {
                continue;
            };

            let base_id = self.registry.resolve_name(&ext.name);
            let base_id = match base_id {
                Some(id) if self.base_is_object(id) => id,
                _ => {
                    if self.config.strict_extensions {
                        return Err(SchemaError::unresolved_extension(&ext.name));
                    }
                    warn!(extension = %ext.name, "extension targets no object definition, skipping");
                    continue;
                }
            };

            let context = self.registry.lookup_mut(base_id)?;
            let TypeDefinition::Object(base) = &mut context.definition else {
                return Err(SchemaError::unresolved_extension(&ext.name));
            };

            for (name, field) in ext.fields {
                if base.fields.contains_key(&name) {
                    return Err(SchemaError::extension_field_conflict(&base.name, &name));
                }
                base.fields.insert(name, field);
            }
            for interface in ext.implements {
                if !base.implements.contains(&interface) {
                    base.implements.push(interface);
                }
            }
            for edge in dependencies {
                context.register_dependency(edge.target, edge.kind);
            }
            trace!(type_name = %ext.name, "merged type extension");
        }
        Ok(())
    }

    fn base_is_object(&self, id: TypeId) -> bool {
        self.registry
            .lookup(id)
            .map(|context| matches!(context.definition, TypeDefinition::Object(_)))
            .unwrap_or(false)
    }

    /// Topological completion order over `Completed` dependency edges
    /// (Kahn's algorithm), deterministic by registration order. An edge to
    /// a never-discovered type is fatal. A genuine dependency cycle does
    /// not deadlock the build: the remaining members are completed in
    /// registration order, which the cycle-safe closure engine tolerates.
    fn completion_order(&self) -> Result<Vec<TypeId>, SchemaError> {
        let ids: Vec<TypeId> = self.registry.ids().collect();
        let mut indegree: HashMap<TypeId, usize> = ids.iter().map(|&id| (id, 0)).collect();
        let mut dependents: HashMap<TypeId, Vec<TypeId>> = HashMap::new();

        for &id in &ids {
            let context = self.registry.lookup(id)?;
            for edge in context.dependencies() {
                let target = self.registry.resolve_name(&edge.target).ok_or_else(|| {
                    SchemaError::unknown_dependency(context.definition.name(), &edge.target)
                })?;
                if target == id {
                    continue;
                }
                if let Some(count) = indegree.get_mut(&id) {
                    *count += 1;
                }
                dependents.entry(target).or_default().push(id);
            }
        }

        let mut ready: VecDeque<TypeId> = ids
            .iter()
            .copied()
            .filter(|id| indegree.get(id) == Some(&0))
            .collect();
        let mut order: Vec<TypeId> = Vec::with_capacity(ids.len());
        let mut done: HashSet<TypeId> = HashSet::new();

        while let Some(id) = ready.pop_front() {
            order.push(id);
            done.insert(id);
            if let Some(children) = dependents.get(&id) {
                for &dependent in children {
                    if let Some(count) = indegree.get_mut(&dependent) {
                        *count -= 1;
                        if *count == 0 {
                            ready.push_back(dependent);
                        }
                    }
                }
            }
        }

        if order.len() < ids.len() {
            warn!(
                remaining = ids.len() - order.len(),
                "dependency cycle detected, completing remaining types in registration order"
            );
            for id in ids {
                if !done.contains(&id) {
                    order.push(id);
                }
            }
        }

        Ok(order)
    }

    /// Clones the completed definitions out of the registry into the
    /// immutable schema, carrying the native-type bindings along.
    fn freeze(&self, order: &[TypeId], index: &NativeTypeIndex) -> Result<Schema, SchemaError> {
        let mut position: HashMap<TypeId, usize> = HashMap::new();
        let mut types = Vec::with_capacity(order.len());
        for (slot, &id) in order.iter().enumerate() {
            position.insert(id, slot);
            types.push(self.registry.lookup(id)?.definition.clone());
        }

        let mut interface_by_native = HashMap::new();
        for (native, id) in index.iter() {
            if let Some(&slot) = position.get(&id) {
                interface_by_native.insert(native, slot);
            }
        }

        Ok(Schema::new(types, interface_by_native))
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
