//! Error types for the schema build pipeline.
//!
//! Every failure in this crate is a build-time failure and fatal to the
//! whole schema build; no partial or degraded schema is ever returned.
//! The build is deterministic, so retrying with unchanged definitions
//! reproduces the same failure.

use thiserror::Error;
use typeforge_core::CoreError;

/// Errors that can occur while building a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The same type identity or name was discovered twice.
    #[error("Type {0} is already registered")]
    DuplicateType(String),

    /// A registry lookup preceded discovery of the requested type.
    #[error("Type not found: {0}")]
    TypeNotFound(String),

    /// A directly declared interface reference could not be resolved when
    /// seeding completion. The scheduler promises dependencies complete
    /// first, so this indicates a pipeline defect rather than bad input.
    #[error("Type {type_name} references interface {interface}, which was never discovered")]
    UnresolvedInterface {
        type_name: String,
        interface: String,
    },

    /// A declared interface reference resolved to a non-interface type.
    #[error("Type {type_name} declares {reference} as an interface, but it is an object type")]
    NotAnInterface { type_name: String, reference: String },

    /// A dependency edge names a type that was never discovered.
    #[error("Type {type_name} depends on {dependency}, which was never discovered")]
    UnknownDependency {
        type_name: String,
        dependency: String,
    },

    /// A type extension matched no base object definition.
    #[error("Extension {0} targets no object definition")]
    UnresolvedExtension(String),

    /// A type extension redeclares a field already present on its base.
    #[error("Extension of {type_name} redeclares field {field}")]
    ExtensionFieldConflict { type_name: String, field: String },

    /// An object type fails to declare a field required by an interface it
    /// implements. Reported by post-build validation.
    #[error("Object type {type_name} implements {interface} but does not declare field {field}")]
    MissingInterfaceField {
        type_name: String,
        interface: String,
        field: String,
    },

    /// Definition-level error from the core data model.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SchemaError {
    /// Create a new DuplicateType error
    pub fn duplicate_type(name: impl Into<String>) -> Self {
        Self::DuplicateType(name.into())
    }

    /// Create a new TypeNotFound error
    pub fn type_not_found(name: impl Into<String>) -> Self {
        Self::TypeNotFound(name.into())
    }

    /// Create a new UnresolvedInterface error
    pub fn unresolved_interface(
        type_name: impl Into<String>,
        interface: impl Into<String>,
    ) -> Self {
        Self::UnresolvedInterface {
            type_name: type_name.into(),
            interface: interface.into(),
        }
    }

    /// Create a new NotAnInterface error
    pub fn not_an_interface(type_name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::NotAnInterface {
            type_name: type_name.into(),
            reference: reference.into(),
        }
    }

    /// Create a new UnknownDependency error
    pub fn unknown_dependency(
        type_name: impl Into<String>,
        dependency: impl Into<String>,
    ) -> Self {
        Self::UnknownDependency {
            type_name: type_name.into(),
            dependency: dependency.into(),
        }
    }

    /// Create a new UnresolvedExtension error
    pub fn unresolved_extension(name: impl Into<String>) -> Self {
        Self::UnresolvedExtension(name.into())
    }

    /// Create a new ExtensionFieldConflict error
    pub fn extension_field_conflict(
        type_name: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self::ExtensionFieldConflict {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Create a new MissingInterfaceField error
    pub fn missing_interface_field(
        type_name: impl Into<String>,
        interface: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self::MissingInterfaceField {
            type_name: type_name.into(),
            interface: interface.into(),
            field: field.into(),
        }
    }

    /// Returns a stable machine-readable code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateType(_) => "DUPLICATE_TYPE",
            Self::TypeNotFound(_) => "TYPE_NOT_FOUND",
            Self::UnresolvedInterface { .. } => "UNRESOLVED_INTERFACE",
            Self::NotAnInterface { .. } => "NOT_AN_INTERFACE",
            Self::UnknownDependency { .. } => "UNKNOWN_DEPENDENCY",
            Self::UnresolvedExtension(_) => "UNRESOLVED_EXTENSION",
            Self::ExtensionFieldConflict { .. } => "EXTENSION_FIELD_CONFLICT",
            Self::MissingInterfaceField { .. } => "MISSING_INTERFACE_FIELD",
            Self::Core(_) => "CORE_ERROR",
        }
    }

    /// True for errors that indicate a defect in the pipeline itself
    /// rather than in the supplied definitions.
    #[must_use]
    pub fn is_scheduling_defect(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedInterface { .. } | Self::TypeNotFound(_)
        )
    }
}
