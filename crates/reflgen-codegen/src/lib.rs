//! Registration code emitters.
//!
//! Pure renderers from a resolved [`ClassRecord`](reflgen_core::ClassRecord)
//! to text. Two independent block kinds are produced per class:
//! - the property registration block ([`emit_properties`])
//! - the script binding block ([`BindingEmitter`])
//!
//! Both always emit their open/close markers, even for an empty class.

mod bindings;
mod properties;

pub use bindings::BindingEmitter;
pub use properties::{PropertyBlock, emit_properties};
