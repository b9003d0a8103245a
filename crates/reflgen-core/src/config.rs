//! Generation vocabulary and hierarchy roots.
//!
//! Everything the scanner and resolver would otherwise hard-code lives in a
//! [`ReflectionConfig`]: marker names, the annotation key vocabulary, the two
//! root classes, and the identity property injected into each root. The
//! `Default` impl reproduces the engine's built-in vocabulary; TOML files can
//! override any subset of it.
//!
//! ```toml
//! lookahead = 256
//!
//! [vocabulary]
//! eligibility_marker = "GENERATED_BODY"
//!
//! [spawnable_root]
//! name = "AGameActor"
//! identity = { name = "Label", declared_type = "FString", category = "Actor", tooltip = "Label" }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Classification, ConfigError, Property};

/// Marker names and annotation keys. All matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Annotation preceding a reflected field.
    pub property_marker: String,
    /// Annotation preceding a reflected method.
    pub function_marker: String,
    /// Annotation preceding the class header.
    pub class_marker: String,
    /// Marker whose presence makes a unit eligible at all.
    pub eligibility_marker: String,

    /// `Category = "..."`
    pub category_key: String,
    /// Bare flag making a property editable.
    pub editable_flag: String,
    /// `Range = "min, max"`
    pub range_key: String,
    /// `Tooltip = "..."`
    pub tooltip_key: String,
    /// `DisplayName = "..."` on functions and classes.
    pub display_name_key: String,
    /// `Description = "..."` on classes.
    pub description_key: String,
    /// Bare flag exposing a function to scripting.
    pub script_bind_flag: String,
    /// Bare flag marking a class abstract.
    pub abstract_flag: String,

    /// Return type emitted as a procedure binding.
    pub void_type: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            property_marker: "UPROPERTY".to_string(),
            function_marker: "UFUNCTION".to_string(),
            class_marker: "UCLASS".to_string(),
            eligibility_marker: "GENERATED_REFLECTION_BODY".to_string(),
            category_key: "Category".to_string(),
            editable_flag: "EditAnywhere".to_string(),
            range_key: "Range".to_string(),
            tooltip_key: "Tooltip".to_string(),
            display_name_key: "DisplayName".to_string(),
            description_key: "Description".to_string(),
            script_bind_flag: "LuaBind".to_string(),
            abstract_flag: "Abstract".to_string(),
            void_type: "void".to_string(),
        }
    }
}

/// The property synthesized at the front of a root class's property list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProperty {
    pub name: String,
    pub declared_type: String,
    pub category: String,
    pub tooltip: String,
}

impl IdentityProperty {
    /// Materialize as an editable [`Property`].
    pub fn to_property(&self) -> Property {
        let mut property = Property::new(self.name.clone(), self.declared_type.clone());
        property.category = self.category.clone();
        property.editable = true;
        property.tooltip = Some(self.tooltip.clone());
        property
    }
}

/// One of the two designated hierarchy roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootClass {
    /// Class name that terminates an ancestry walk.
    pub name: String,
    /// Identity property prepended when this root itself is scanned.
    pub identity: IdentityProperty,
}

fn default_spawnable_root() -> RootClass {
    RootClass {
        name: "AActor".to_string(),
        identity: IdentityProperty {
            name: "ObjectName".to_string(),
            declared_type: "FName".to_string(),
            category: "[Actor]".to_string(),
            tooltip: "The name of this actor".to_string(),
        },
    }
}

fn default_component_root() -> RootClass {
    RootClass {
        name: "UActorComponent".to_string(),
        identity: IdentityProperty {
            name: "ObjectName".to_string(),
            declared_type: "FName".to_string(),
            category: "[Component]".to_string(),
            tooltip: "The name of this component".to_string(),
        },
    }
}

fn default_lookahead() -> usize {
    200
}

/// Complete configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionConfig {
    #[serde(default)]
    pub vocabulary: Vocabulary,

    /// Descendants classify as `Spawnable`.
    #[serde(default = "default_spawnable_root")]
    pub spawnable_root: RootClass,

    /// Descendants classify as `Component`.
    #[serde(default = "default_component_root")]
    pub component_root: RootClass,

    /// Bytes after an annotation's argument list searched for its declaration.
    #[serde(default = "default_lookahead")]
    pub lookahead: usize,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            spawnable_root: default_spawnable_root(),
            component_root: default_component_root(),
            lookahead: default_lookahead(),
        }
    }
}

impl ReflectionConfig {
    /// Parse a config from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ReflectionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject configs the scanner or resolver cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let vocab = &self.vocabulary;
        let markers = [
            ("property_marker", &vocab.property_marker),
            ("function_marker", &vocab.function_marker),
            ("class_marker", &vocab.class_marker),
            ("eligibility_marker", &vocab.eligibility_marker),
        ];
        for (field, value) in markers {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} must not be empty")));
            }
        }
        if self.spawnable_root.name.is_empty() || self.component_root.name.is_empty() {
            return Err(ConfigError::Invalid("root class names must not be empty".into()));
        }
        if self.spawnable_root.name == self.component_root.name {
            return Err(ConfigError::Invalid(format!(
                "spawnable and component roots are both '{}'",
                self.spawnable_root.name
            )));
        }
        if self.lookahead == 0 {
            return Err(ConfigError::Invalid("lookahead must be positive".into()));
        }
        Ok(())
    }

    /// The root a class name designates, if any.
    pub fn root_for(&self, class_name: &str) -> Option<&RootClass> {
        if class_name == self.spawnable_root.name {
            Some(&self.spawnable_root)
        } else if class_name == self.component_root.name {
            Some(&self.component_root)
        } else {
            None
        }
    }

    /// The classification a walk ending at `class_name` yields, if it is a root.
    pub fn root_classification(&self, class_name: &str) -> Option<Classification> {
        if class_name == self.spawnable_root.name {
            Some(Classification::Spawnable)
        } else if class_name == self.component_root.name {
            Some(Classification::Component)
        } else {
            None
        }
    }

    /// Whether `class_name` is one of the two roots.
    pub fn is_root(&self, class_name: &str) -> bool {
        self.root_for(class_name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vocabulary() {
        let config = ReflectionConfig::default();
        assert_eq!(config.vocabulary.property_marker, "UPROPERTY");
        assert_eq!(config.vocabulary.eligibility_marker, "GENERATED_REFLECTION_BODY");
        assert_eq!(config.spawnable_root.name, "AActor");
        assert_eq!(config.component_root.name, "UActorComponent");
        assert_eq!(config.lookahead, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = ReflectionConfig::from_toml_str(
            r#"
            lookahead = 64

            [vocabulary]
            eligibility_marker = "GENERATED_BODY"
            "#,
        )
        .unwrap();

        assert_eq!(config.lookahead, 64);
        assert_eq!(config.vocabulary.eligibility_marker, "GENERATED_BODY");
        assert_eq!(config.vocabulary.property_marker, "UPROPERTY");
        assert_eq!(config.spawnable_root.name, "AActor");
    }

    #[test]
    fn toml_overrides_root() {
        let config = ReflectionConfig::from_toml_str(
            r#"
            [spawnable_root]
            name = "AGameActor"

            [spawnable_root.identity]
            name = "Label"
            declared_type = "FString"
            category = "Actor"
            tooltip = "Label"
            "#,
        )
        .unwrap();

        assert_eq!(config.spawnable_root.name, "AGameActor");
        assert_eq!(config.root_classification("AGameActor"), Some(Classification::Spawnable));
        assert_eq!(config.root_classification("AActor"), None);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = ReflectionConfig::from_toml_str("lookahead = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn identical_roots_rejected() {
        let mut config = ReflectionConfig::default();
        config.component_root.name = "AActor".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn empty_marker_rejected() {
        let mut config = ReflectionConfig::default();
        config.vocabulary.function_marker = " ".into();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid config: function_marker must not be empty");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ReflectionConfig::from_path("/nonexistent/reflgen.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn identity_property_is_editable() {
        let config = ReflectionConfig::default();
        let prop = config.spawnable_root.identity.to_property();
        assert_eq!(prop.name, "ObjectName");
        assert_eq!(prop.declared_type, "FName");
        assert!(prop.editable);
        assert_eq!(prop.tooltip.as_deref(), Some("The name of this actor"));
    }
}
