//! Reflection generator core types.
//!
//! Shared by every stage of the pipeline:
//! - [`ClassRecord`], [`Property`], [`Function`]: extracted metadata
//! - [`OutputKind`]: the per-property emission decision table
//! - [`ReflectionConfig`]: marker/key vocabulary and hierarchy roots
//! - [`ScanError`], [`HierarchyDiagnostic`], [`ConfigError`]: fault types
//! - [`Span`], [`UnitId`], [`SourceLocation`]: positions for diagnostics

mod config;
mod error;
mod span;
pub mod types;

pub use config::{IdentityProperty, ReflectionConfig, RootClass, Vocabulary};
pub use error::{ConfigError, HierarchyDiagnostic, ReflgenError, ScanError, Severity};
pub use span::{SourceLocation, Span, UnitId};
pub use types::{
    AssetKind, ClassRecord, Classification, Function, OutputKind, Parameter, Property,
    PropertyRange,
};
