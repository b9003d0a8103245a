//! Reflection metadata extraction and registration code generation.
//!
//! Scans annotated class headers (`UPROPERTY`, `UFUNCTION`, `UCLASS`,
//! `GENERATED_REFLECTION_BODY()`), resolves the class hierarchy across all
//! of them, and renders a property registration block and a script binding
//! block per class.
//!
//! # Example
//!
//! ```
//! use reflgen::{DeclarationUnit, Generator, ReflectionConfig};
//!
//! let generator = Generator::new(&ReflectionConfig::default()).unwrap();
//! let units = vec![DeclarationUnit::new(
//!     "Weapon.h",
//!     r#"
//!     class AWeapon : public AActor
//!     {
//!         GENERATED_REFLECTION_BODY()
//!
//!         UPROPERTY(Category="Combat", EditAnywhere, Range="0,100")
//!         float Damage;
//!     };
//!     "#,
//! )];
//!
//! let report = generator.run(&units);
//! let weapon = report.class("AWeapon").unwrap();
//! assert!(weapon.properties_block.contains("MARK_AS_SPAWNABLE"));
//! ```

mod pipeline;

pub use pipeline::{DeclarationUnit, GeneratedClass, GenerationReport, Generator, UnitFailure};

pub use reflgen_codegen::{BindingEmitter, emit_properties};
pub use reflgen_core::{
    ClassRecord, Classification, ConfigError, HierarchyDiagnostic, OutputKind, Property,
    ReflectionConfig, ReflgenError, ScanError, Severity, UnitId, Vocabulary,
};
pub use reflgen_parser::ClassRecordBuilder;
pub use reflgen_registry::{Ancestry, ClassHierarchy};
