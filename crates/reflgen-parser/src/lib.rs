//! Reflection annotation parser.
//!
//! This crate turns annotated class headers into [`ClassRecord`]s. It is not a
//! C++ parser: it only recognizes annotation sites, balanced delimiter groups
//! and the simple `type identifier` declarations that follow them.
//!
//! It includes:
//! - A byte-offset [`Cursor`] over unit text
//! - Delimiter-balanced span extraction
//! - The annotation site scanner
//! - The metadata interpreter for properties and functions
//! - The per-unit [`ClassRecordBuilder`]
//!
//! # Example
//!
//! ```
//! use reflgen_core::{ReflectionConfig, UnitId};
//! use reflgen_parser::ClassRecordBuilder;
//!
//! let builder = ClassRecordBuilder::new(&ReflectionConfig::default()).unwrap();
//! let source = r#"
//!     class AWeapon : public AActor
//!     {
//!         GENERATED_REFLECTION_BODY()
//!
//!         UPROPERTY(Category="Combat", EditAnywhere, Range="0,100")
//!         float Damage;
//!     };
//! "#;
//!
//! let record = builder.build(&UnitId::new("Weapon.h"), source).unwrap().unwrap();
//! assert_eq!(record.name, "AWeapon");
//! assert_eq!(record.properties[0].name, "Damage");
//! ```
//!
//! [`ClassRecord`]: reflgen_core::ClassRecord

mod args;
mod balance;
mod builder;
mod cursor;
mod interpret;
mod scanner;

pub use args::AnnotationArgs;
pub use balance::{BalancedSpan, extract_balanced, find_top_level, split_top_level};
pub use builder::ClassRecordBuilder;
pub use cursor::Cursor;
pub use interpret::{interpret_function, interpret_property, parse_parameters};
pub use scanner::{AnnotationScanner, AnnotationSite, AnnotationSites, DeclarationShape, MethodTail};
