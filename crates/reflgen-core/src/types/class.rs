//! Class records and hierarchy classification.

use std::fmt;

use crate::{Function, Property, SourceLocation};

/// Hierarchy-derived category of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Classification {
    /// Not exposed as spawnable or attachable (roots, abstract classes,
    /// unrelated hierarchies, cycles).
    #[default]
    None,
    /// Transitively derives from the spawnable root.
    Spawnable,
    /// Transitively derives from the component root.
    Component,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::None => f.write_str("none"),
            Classification::Spawnable => f.write_str("spawnable"),
            Classification::Component => f.write_str("component"),
        }
    }
}

/// Everything extracted from one eligible declaration unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub name: String,
    /// Name of the single declared base. A name reference only: the parent
    /// may be an engine class that was never scanned.
    pub parent_name: String,
    pub is_abstract: bool,
    /// Declaration order, with any synthesized identity property first.
    pub properties: Vec<Property>,
    /// Declaration order.
    pub functions: Vec<Function>,
    /// Empty when the class annotation gave none.
    pub display_name: String,
    /// Empty when the class annotation gave none.
    pub description: String,
    pub location: SourceLocation,
}

impl ClassRecord {
    pub fn new(
        name: impl Into<String>,
        parent_name: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            name: name.into(),
            parent_name: parent_name.into(),
            is_abstract: false,
            properties: Vec::new(),
            functions: Vec::new(),
            display_name: String::new(),
            description: String::new(),
            location,
        }
    }

    /// Display name, falling back to the class name.
    pub fn display_name_or_default(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    /// Description, falling back to a generated placeholder.
    pub fn description_or_default(&self) -> String {
        if self.description.is_empty() {
            format!("Auto-generated {}", self.name)
        } else {
            self.description.clone()
        }
    }

    /// Functions flagged for scripting, in declaration order.
    pub fn bindable_functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.iter().filter(|f| f.script_bindable)
    }
}
