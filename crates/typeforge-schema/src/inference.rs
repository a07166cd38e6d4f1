//! Interface inference from native backing types.
//!
//! After discovery, every type bound to a concrete native type is checked
//! against the native-type index: each native interface in its ancestry
//! that is indexed maps to a schema interface the type implicitly
//! implements. Inference registers those as completion dependencies and
//! appends them to the type's declared-interface list, so the scheduler
//! completes the interfaces first. This is the sole place implicit
//! interface membership is discovered; explicit declarations are never
//! removed or overridden.

use std::collections::HashSet;

use tracing::trace;
use typeforge_core::{NativeType, NativeTypeCatalog, TypeDefinition, TypeId};

use crate::index::NativeTypeIndex;
use crate::registry::{DependencyKind, DiscoveryContext, TypeRegistry};

/// Runs interface inference over every discovered type and every pending
/// type extension. Must run to completion before any type enters the
/// completion phase, because it mutates the dependency lists the
/// scheduler reads.
///
/// Running inference more than once adds no further edges or references.
pub fn infer_interfaces(
    registry: &mut TypeRegistry,
    extensions: &mut [DiscoveryContext],
    catalog: &NativeTypeCatalog,
    index: &NativeTypeIndex,
) {
    let ids: Vec<TypeId> = registry.ids().collect();
    for id in ids {
        let Ok(context) = registry.lookup(id) else {
            continue;
        };
        let inferred = inferred_interfaces(&context.definition, Some(id), catalog, index, registry);
        if inferred.is_empty() {
            continue;
        }
        let Ok(context) = registry.lookup_mut(id) else {
            continue;
        };
        apply_inferred(context, inferred);
    }

    for extension in extensions.iter_mut() {
        let inferred = inferred_interfaces(&extension.definition, None, catalog, index, registry);
        apply_inferred(extension, inferred);
    }
}

/// The backing type inference walks: the extension target for type
/// extensions, the declared backing type otherwise. `None` when only the
/// sentinel is available — such a type can never implicitly implement
/// anything and is skipped entirely.
fn effective_backing_type(definition: &TypeDefinition) -> Option<NativeType> {
    let ty = match definition {
        TypeDefinition::Object(obj) if obj.is_extension => obj.extension_target,
        other => other.backing_type(),
    };
    ty.is_concrete().then_some(ty)
}

/// Interfaces the definition implicitly implements, in ancestry order,
/// deduplicated. An ancestry with no index hits contributes nothing.
fn inferred_interfaces(
    definition: &TypeDefinition,
    self_id: Option<TypeId>,
    catalog: &NativeTypeCatalog,
    index: &NativeTypeIndex,
    registry: &TypeRegistry,
) -> Vec<String> {
    let Some(backing) = effective_backing_type(definition) else {
        return Vec::new();
    };

    let mut seen: HashSet<TypeId> = HashSet::new();
    let mut names = Vec::new();
    for ancestor in catalog.ancestry(backing) {
        let Some(interface_id) = index.get(ancestor) else {
            continue;
        };
        if self_id == Some(interface_id) || !seen.insert(interface_id) {
            continue;
        }
        let Ok(interface) = registry.lookup(interface_id) else {
            continue;
        };
        names.push(interface.definition.name().to_string());
    }
    names
}

fn apply_inferred(context: &mut DiscoveryContext, inferred: Vec<String>) {
    for name in inferred {
        trace!(
            type_name = %context.definition.name(),
            interface = %name,
            "inferred interface implementation"
        );
        context.register_dependency(name.clone(), DependencyKind::Completed);
        let implements = context.definition.implements_mut();
        if !implements.contains(&name) {
            implements.push(name);
        }
    }
}
