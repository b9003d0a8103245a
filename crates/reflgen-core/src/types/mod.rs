//! Data model shared by the scanner, resolver and emitters.

mod class;
mod function;
mod property;

pub use class::{ClassRecord, Classification};
pub use function::{Function, Parameter};
pub use property::{AssetKind, OutputKind, Property, PropertyRange};
