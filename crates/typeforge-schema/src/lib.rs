//! # typeforge-schema
//!
//! The type-system completion pipeline: builds and closes an in-memory
//! graph describing the shape of an API schema — named types, the
//! interfaces they implement, and the fields each type exposes — so that
//! a query engine can validate and execute requests against it.
//!
//! ## Overview
//!
//! A build runs four strictly ordered phases over definitions inserted
//! into a [`SchemaBuilder`]:
//!
//! 1. **Discovery** registers every type and its dependency list.
//! 2. **Inference** indexes the native backing types of all interfaces,
//!    then walks each type's native ancestry to find interfaces the type
//!    implicitly implements, registering them as completion dependencies.
//! 3. **Completion** closes each type's interface and field sets against
//!    its transitively implemented interfaces, breadth-first, immune to
//!    diamond inheritance and cycles.
//! 4. **Validation** checks object types against the field sets of the
//!    interfaces they implement.
//!
//! The result is an immutable [`Schema`]. Builds are all-or-nothing: any
//! failure aborts the build and no partial schema is returned.
//!
//! ## Modules
//!
//! - [`config`] - Build configuration
//! - [`registry`] - Type registry and discovery contexts
//! - [`index`] - Native-type index
//! - [`inference`] - Interface inference from native ancestry
//! - [`closure`] - Breadth-first interface/field closure
//! - [`builder`] - Phase driver and completion scheduling
//! - [`schema`] - The finished type graph
//! - [`validate`] - Post-build object-field validation
//! - [`error`] - Error types for the build pipeline

pub mod builder;
pub mod closure;
pub mod config;
pub mod error;
pub mod index;
pub mod inference;
pub mod registry;
pub mod schema;
pub mod validate;

// Re-export main types
pub use builder::SchemaBuilder;
pub use closure::{TraversalContext, complete_type};
pub use config::SchemaConfig;
pub use error::SchemaError;
pub use index::NativeTypeIndex;
pub use inference::infer_interfaces;
pub use registry::{DependencyEdge, DependencyKind, DiscoveryContext, TypeRegistry};
pub use schema::Schema;
pub use validate::validate_object_fields;

/// Result type for schema-build operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
