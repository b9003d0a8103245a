//! Script binding blocks.
//!
//! Every property is bound; functions only when flagged bindable.
//!
//! ```text
//! LUA_BIND_BEGIN(AWeapon)
//! {
//!     AddProperty<AWeapon, float>(
//!         T, "Damage", &AWeapon::Damage);
//!     AddAlias<AWeapon>(
//!         T, "Fire", &AWeapon::FireOnce);
//! }
//! LUA_BIND_END()
//! ```

use std::fmt;

use regex::Regex;

use reflgen_core::{ClassRecord, ConfigError, Function, Property, Vocabulary};

/// `TArray<Inner*>` with optional inner whitespace.
const ARRAY_OF_POINTER: &str = r"TArray<\s*(\w+)\s*\*\s*>";

/// Renders binding blocks.
#[derive(Debug, Clone)]
pub struct BindingEmitter {
    void_type: String,
    array_of_pointer: Regex,
}

/// The four property binding buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PropertyBinding<'a> {
    ArrayOfPointer { inner: &'a str },
    Pointer,
    Editable,
    ReadOnly,
}

impl BindingEmitter {
    pub fn new(vocab: &Vocabulary) -> Result<Self, ConfigError> {
        let array_of_pointer = Regex::new(ARRAY_OF_POINTER)
            .map_err(|e| ConfigError::Invalid(format!("pattern '{ARRAY_OF_POINTER}': {e}")))?;
        Ok(Self {
            void_type: vocab.void_type.clone(),
            array_of_pointer,
        })
    }

    /// Render the binding block for a class.
    pub fn emit(&self, record: &ClassRecord) -> String {
        BindingBlock {
            emitter: self,
            record,
        }
        .to_string()
    }

    fn classify<'a>(&self, property: &'a Property) -> PropertyBinding<'a> {
        let ty = property.declared_type.as_str();
        if let Some(inner) = self.array_of_pointer.captures(ty).and_then(|c| c.get(1)) {
            PropertyBinding::ArrayOfPointer {
                inner: inner.as_str(),
            }
        } else if ty.contains('*') {
            PropertyBinding::Pointer
        } else if property.editable {
            PropertyBinding::Editable
        } else {
            PropertyBinding::ReadOnly
        }
    }

    fn is_procedure(&self, function: &Function) -> bool {
        function.return_type == self.void_type
    }
}

struct BindingBlock<'a> {
    emitter: &'a BindingEmitter,
    record: &'a ClassRecord,
}

impl fmt::Display for BindingBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = self.record.name.as_str();
        writeln!(f, "LUA_BIND_BEGIN({class})")?;
        writeln!(f, "{{")?;

        let mut functions = self.record.bindable_functions().peekable();
        if self.record.properties.is_empty() && functions.peek().is_none() {
            writeln!(f, "    // No properties or functions to bind")?;
        }

        for property in &self.record.properties {
            let ty = property.declared_type.as_str();
            match self.emitter.classify(property) {
                PropertyBinding::ArrayOfPointer { inner } => {
                    write!(f, "    AddPropertyArrayPtr<{class}, {inner}>(")?
                }
                PropertyBinding::Pointer => {
                    let base = ty.replace('*', "");
                    write!(f, "    AddPropertyPtr<{class}, {}>(", base.trim())?
                }
                PropertyBinding::Editable => write!(f, "    AddProperty<{class}, {ty}>(")?,
                PropertyBinding::ReadOnly => write!(f, "    AddReadOnlyProperty<{class}, {ty}>(")?,
            }
            write_target(f, class, &property.name, &property.name)?;
        }

        for function in functions {
            let params = ParameterTypes(function);
            if self.emitter.is_procedure(function) {
                write!(f, "    AddAlias<{class}{params}>(")?;
            } else {
                write!(f, "    AddMethodR<{}, {class}{params}>(", function.return_type)?;
            }
            write_target(f, class, &function.display_name, &function.name)?;
        }

        writeln!(f, "}}")?;
        writeln!(f, "LUA_BIND_END()")
    }
}

/// Second line of every binding: `T, "<exposed>", &Class::member);`
fn write_target(f: &mut fmt::Formatter<'_>, class: &str, exposed: &str, member: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "        T, \"{exposed}\", &{class}::{member});")
}

/// `, A, B` for a function's parameter types; empty without parameters.
struct ParameterTypes<'a>(&'a Function);

impl fmt::Display for ParameterTypes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ty in self.0.parameter_types() {
            write!(f, ", {ty}")?;
        }
        Ok(())
    }
}
