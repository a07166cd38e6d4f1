//! Type registry and per-type discovery contexts.
//!
//! The registry holds every type definition encountered during discovery,
//! keyed by its identity token. It is a data holder with lookup only: no
//! removal, and its lifetime equals the schema-build lifetime.

use std::collections::HashMap;

use tracing::trace;
use typeforge_core::{TypeDefinition, TypeId};

use crate::error::SchemaError;

/// Kind of a dependency edge between two types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    /// The source cannot finish completion until the target is fully
    /// completed.
    Completed,
}

/// A "must complete before me" edge from one type to another, referenced
/// by target name.
#[derive(Debug, Clone)]
pub struct DependencyEdge {
    pub source: TypeId,
    pub target: String,
    pub kind: DependencyKind,
}

/// Discovery-time context owned by a single type.
///
/// Created when the type is first discovered; lives until the schema build
/// finishes. Owns the type's identity, its definition, and its outgoing
/// dependency list.
#[derive(Debug)]
pub struct DiscoveryContext {
    id: TypeId,
    pub definition: TypeDefinition,
    dependencies: Vec<DependencyEdge>,
}

impl DiscoveryContext {
    pub fn new(id: TypeId, definition: TypeDefinition) -> Self {
        Self {
            id,
            definition,
            dependencies: Vec::new(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Registers a "must complete before me" edge. Re-registering an edge
    /// with the same target and kind is a no-op, so dependency
    /// registration is idempotent.
    pub fn register_dependency(&mut self, target: impl Into<String>, kind: DependencyKind) {
        let target = target.into();
        if self
            .dependencies
            .iter()
            .any(|edge| edge.target == target && edge.kind == kind)
        {
            return;
        }
        self.dependencies.push(DependencyEdge {
            source: self.id,
            target,
            kind,
        });
    }

    pub fn dependencies(&self) -> &[DependencyEdge] {
        &self.dependencies
    }
}

/// Registry of every discovered type, keyed by identity token.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    contexts: HashMap<TypeId, DiscoveryContext>,
    /// Identity tokens in registration order; all phase iteration follows
    /// this order so builds are deterministic.
    order: Vec<TypeId>,
    by_name: HashMap<String, TypeId>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a discovery context. Fails if the identity or the
    /// definition's name is already registered — discovery happens only
    /// once per type.
    pub fn register(&mut self, context: DiscoveryContext) -> Result<(), SchemaError> {
        let id = context.id();
        if self.contexts.contains_key(&id) {
            return Err(SchemaError::duplicate_type(context.definition.name()));
        }

        let name = context.definition.name().to_string();
        if self.by_name.contains_key(&name) {
            return Err(SchemaError::duplicate_type(name));
        }

        trace!(type_name = %name, id = %id, "registered type");
        self.by_name.insert(name, id);
        self.order.push(id);
        self.contexts.insert(id, context);
        Ok(())
    }

    /// Looks up a discovery context, failing if the identity was never
    /// discovered.
    pub fn lookup(&self, id: TypeId) -> Result<&DiscoveryContext, SchemaError> {
        self.contexts
            .get(&id)
            .ok_or_else(|| SchemaError::type_not_found(id.to_string()))
    }

    /// Mutable variant of [`TypeRegistry::lookup`].
    pub fn lookup_mut(&mut self, id: TypeId) -> Result<&mut DiscoveryContext, SchemaError> {
        self.contexts
            .get_mut(&id)
            .ok_or_else(|| SchemaError::type_not_found(id.to_string()))
    }

    /// Resolves a type name to its identity token.
    pub fn resolve_name(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Identity tokens in registration order.
    pub fn ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.order.iter().copied()
    }

    /// Discovery contexts in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DiscoveryContext> {
        self.order.iter().map(|id| &self.contexts[id])
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}
