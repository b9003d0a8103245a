//! Error and diagnostic types for reflection generation.
//!
//! ## Fault Hierarchy
//!
//! ```text
//! ReflgenError (top-level wrapper)
//! ├── ScanError           - per-unit failures; the unit produces no record
//! ├── HierarchyDiagnostic - resolution anomalies; classification falls back to None
//! └── ConfigError         - vocabulary/config loading failures
//! ```
//!
//! Expected skips (no eligibility marker, no class header, an annotation with
//! no recoverable declaration) are not errors and have no type here.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::Span;

// ============================================================================
// Scan Errors
// ============================================================================

/// Faults raised while scanning a single declaration unit.
///
/// Any of these excludes the unit from the run; sibling units are unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    /// End of text reached before a delimiter group was closed.
    #[error("unbalanced '{open}' at {span}: no matching '{close}' before end of text")]
    UnbalancedDelimiter { open: char, close: char, span: Span },

    /// A two-part `Range` value whose bounds are not floating-point numbers.
    #[error("invalid range bound '{text}' on property '{property}' at {span}")]
    InvalidRangeBound {
        property: String,
        text: String,
        span: Span,
    },
}

impl ScanError {
    /// Get the span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            ScanError::UnbalancedDelimiter { span, .. } => *span,
            ScanError::InvalidRangeBound { span, .. } => *span,
        }
    }
}

// ============================================================================
// Hierarchy Diagnostics
// ============================================================================

/// How loudly a diagnostic should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Informational; expected in normal runs.
    Note,
    /// Something is likely wrong in the scanned headers.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Note => f.write_str("note"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// Anomalies found while resolving the class hierarchy.
///
/// None of these are fatal: the affected class is classified `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum HierarchyDiagnostic {
    /// Walking parent links revisited a class already on the walk.
    #[error("circular inheritance involving '{class}': {}", .chain.join(" -> "))]
    CircularInheritance { class: String, chain: Vec<String> },

    /// The ancestor chain ends at a class that was not scanned.
    #[error("'{class}' derives from unresolved class '{ancestor}'")]
    UnresolvedAncestor { class: String, ancestor: String },

    /// Two units declared the same class name.
    #[error("duplicate class '{class}': keeping {kept}, ignoring {ignored}")]
    DuplicateClass {
        class: String,
        kept: String,
        ignored: String,
    },
}

impl HierarchyDiagnostic {
    /// Reporting level for this diagnostic.
    pub fn severity(&self) -> Severity {
        match self {
            HierarchyDiagnostic::CircularInheritance { .. } => Severity::Warning,
            HierarchyDiagnostic::UnresolvedAncestor { .. } => Severity::Note,
            HierarchyDiagnostic::DuplicateClass { .. } => Severity::Warning,
        }
    }

    /// The class the diagnostic is attached to.
    pub fn class(&self) -> &str {
        match self {
            HierarchyDiagnostic::CircularInheritance { class, .. } => class,
            HierarchyDiagnostic::UnresolvedAncestor { class, .. } => class,
            HierarchyDiagnostic::DuplicateClass { class, .. } => class,
        }
    }
}

// ============================================================================
// Config Errors
// ============================================================================

/// Errors raised while loading or validating a [`ReflectionConfig`](crate::ReflectionConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid TOML for the config schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but is not usable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// Top-level
// ============================================================================

/// Unified error type for callers that do not care which phase failed.
#[derive(Debug, Error)]
pub enum ReflgenError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyDiagnostic),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
