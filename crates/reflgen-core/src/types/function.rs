//! Reflected methods.

use std::collections::BTreeMap;

/// A single method parameter, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    pub name: String,
    /// Type text including qualifiers and references (`const FString&`).
    pub declared_type: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }
}

/// A reflected method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function {
    pub name: String,
    /// Name exposed to scripting; the method name unless overridden.
    pub display_name: String,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub is_const: bool,
    /// Only bindable functions appear in the binding block.
    pub script_bindable: bool,
    /// Every `Key = "value"` pair from the annotation, in key order.
    pub metadata: BTreeMap<String, String>,
}

impl Function {
    /// A non-bindable function whose display name is its own name.
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            return_type: return_type.into(),
            parameters: Vec::new(),
            is_const: false,
            script_bindable: false,
            metadata: BTreeMap::new(),
        }
    }

    /// Parameter types in declaration order.
    pub fn parameter_types(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.declared_type.as_str())
    }
}
