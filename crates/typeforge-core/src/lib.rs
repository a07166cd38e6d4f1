//! # typeforge-core
//!
//! Core data model for the typeforge schema pipeline: type identities,
//! the native-type catalog, and the declarative type definitions that the
//! completion pipeline in `typeforge-schema` discovers, infers over, and
//! closes.
//!
//! ## Modules
//!
//! - [`identity`] - Per-build type identity tokens
//! - [`native`] - Native backing types and conformance ancestry
//! - [`types`] - Object/interface/field definitions
//! - [`error`] - Core error types

pub mod error;
pub mod identity;
pub mod native;
pub mod types;

pub use error::{CoreError, ErrorCategory, Result};
pub use identity::{TypeId, TypeIdGen};
pub use native::{NativeType, NativeTypeCatalog};
pub use types::{
    ArgumentDefinition, FieldDefinition, InterfaceDefinition, ObjectDefinition, TypeDefinition,
    is_valid_type_name,
};
