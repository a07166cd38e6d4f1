//! Declarative type definitions for the schema graph.
//!
//! A [`TypeDefinition`] describes a named composite type — object or
//! interface — before and after graph closure. Field sets are ordered and
//! unique by name; interface references are plain type names resolved
//! against the registry during the build.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::native::NativeType;

/// Argument accepted by a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDefinition {
    pub name: String,
    /// Name of the argument's declared type.
    #[serde(rename = "type")]
    pub ty: String,
}

/// A single field exposed by a composite type.
///
/// Immutable once merged into a type's field set; a field inherited from
/// an interface is copied into the implementing type at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    /// Name of the declared result type.
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub arguments: Vec<ArgumentDefinition>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.arguments.push(ArgumentDefinition {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }
}

/// An interface type declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceDefinition {
    pub name: String,
    /// Ordered field set, unique by name.
    pub fields: IndexMap<String, FieldDefinition>,
    /// Directly declared parent interfaces. Completion replaces this with
    /// the full transitively implemented set.
    pub implements: Vec<String>,
    /// Concrete native type this interface is bound to, or the sentinel.
    pub backing_type: NativeType,
}

impl InterfaceDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            implements: Vec::new(),
            backing_type: NativeType::ANY,
        }
    }

    pub fn with_backing_type(mut self, ty: NativeType) -> Self {
        self.backing_type = ty;
        self
    }

    pub fn with_implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    /// Adds a field, failing if a field with the same name already exists.
    pub fn add_field(&mut self, field: FieldDefinition) -> Result<(), CoreError> {
        if self.fields.contains_key(&field.name) {
            return Err(CoreError::duplicate_field(&self.name, &field.name));
        }
        self.fields.insert(field.name.clone(), field);
        Ok(())
    }
}

/// An object type declaration, or a partial declaration extending one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDefinition {
    pub name: String,
    /// Ordered field set, unique by name.
    pub fields: IndexMap<String, FieldDefinition>,
    /// Directly declared interfaces. Completion replaces this with the
    /// full transitively implemented set.
    pub implements: Vec<String>,
    /// Concrete native type this object is bound to, or the sentinel.
    pub backing_type: NativeType,
    /// True for a partial definition merged into a base definition before
    /// completion.
    pub is_extension: bool,
    /// For extensions, the native type whose schema counterpart the
    /// extension targets; the sentinel otherwise.
    pub extension_target: NativeType,
}

impl ObjectDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            implements: Vec::new(),
            backing_type: NativeType::ANY,
            is_extension: false,
            extension_target: NativeType::ANY,
        }
    }

    /// Declares a type extension. The name selects the base object
    /// definition the extension merges into; `target` is the native type
    /// used for interface inference in place of a declared backing type.
    pub fn extension(name: impl Into<String>, target: NativeType) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            implements: Vec::new(),
            backing_type: NativeType::ANY,
            is_extension: true,
            extension_target: target,
        }
    }

    pub fn with_backing_type(mut self, ty: NativeType) -> Self {
        self.backing_type = ty;
        self
    }

    pub fn with_implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    /// Adds a field, failing if a field with the same name already exists.
    pub fn add_field(&mut self, field: FieldDefinition) -> Result<(), CoreError> {
        if self.fields.contains_key(&field.name) {
            return Err(CoreError::duplicate_field(&self.name, &field.name));
        }
        self.fields.insert(field.name.clone(), field);
        Ok(())
    }
}

/// A named schema type — object or interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TypeDefinition {
    Interface(InterfaceDefinition),
    Object(ObjectDefinition),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            Self::Interface(def) => &def.name,
            Self::Object(def) => &def.name,
        }
    }

    pub fn fields(&self) -> &IndexMap<String, FieldDefinition> {
        match self {
            Self::Interface(def) => &def.fields,
            Self::Object(def) => &def.fields,
        }
    }

    pub fn implements(&self) -> &[String] {
        match self {
            Self::Interface(def) => &def.implements,
            Self::Object(def) => &def.implements,
        }
    }

    pub fn implements_mut(&mut self) -> &mut Vec<String> {
        match self {
            Self::Interface(def) => &mut def.implements,
            Self::Object(def) => &mut def.implements,
        }
    }

    /// The declared backing type; the sentinel when the type is not bound
    /// to a concrete native type.
    pub fn backing_type(&self) -> NativeType {
        match self {
            Self::Interface(def) => def.backing_type,
            Self::Object(def) => def.backing_type,
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, Self::Interface(_))
    }

    pub fn is_extension(&self) -> bool {
        matches!(self, Self::Object(def) if def.is_extension)
    }

    pub fn as_interface(&self) -> Option<&InterfaceDefinition> {
        match self {
            Self::Interface(def) => Some(def),
            Self::Object(_) => None,
        }
    }
}

/// Checks whether a name is valid for a schema type or field.
///
/// Names must match `[_a-zA-Z][_a-zA-Z0-9]*`: start with an underscore or
/// letter, and contain only underscores, letters, and digits.
pub fn is_valid_type_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }

    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
