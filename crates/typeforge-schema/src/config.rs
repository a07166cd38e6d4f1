//! Schema build configuration.
//!
//! Options can be specified in a host configuration file under a
//! `[schema]` section.
//!
//! # Example Configuration
//!
//! ```toml
//! [schema]
//! validate_object_fields = true
//! strict_extensions = true
//! ```

use serde::{Deserialize, Serialize};

/// Schema build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// After completion, verify that every object type declares every
    /// field required by the interfaces it implements.
    /// Default: true
    #[serde(default = "default_validate_object_fields")]
    pub validate_object_fields: bool,

    /// Fail the build when a type extension matches no base object
    /// definition. When false the extension is skipped with a warning.
    /// Default: true
    #[serde(default = "default_strict_extensions")]
    pub strict_extensions: bool,
}

fn default_validate_object_fields() -> bool {
    true
}

fn default_strict_extensions() -> bool {
    true
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            validate_object_fields: default_validate_object_fields(),
            strict_extensions: default_strict_extensions(),
        }
    }
}

impl SchemaConfig {
    /// Validates the configuration.
    ///
    /// All current option combinations are valid; the check exists so
    /// callers wire validation in before new constrained options appear.
    pub fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchemaConfig::default();
        assert!(config.validate_object_fields);
        assert!(config.strict_extensions);
    }

    #[test]
    fn test_valid_config() {
        let config = SchemaConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            validate_object_fields = false
            strict_extensions = false
        "#;

        let config: SchemaConfig = toml::from_str(toml).unwrap();
        assert!(!config.validate_object_fields);
        assert!(!config.strict_extensions);
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: SchemaConfig = toml::from_str("").unwrap();
        assert!(config.validate_object_fields);
        assert!(config.strict_extensions);
    }
}
