//! Reflection class registry.
//!
//! This crate provides [`ClassHierarchy`], the run-wide view over every
//! scanned [`ClassRecord`](reflgen_core::ClassRecord). It is the
//! synchronization point of a generation run: classification needs the
//! records of all units, since any class may be the ancestor of any other.

mod hierarchy;

pub use hierarchy::{Ancestry, ClassHierarchy};
