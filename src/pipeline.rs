//! Run-level generation pipeline.
//!
//! ## Phases
//!
//! ```text
//! units ──par──> ClassRecordBuilder ──> records (sorted) ──> ClassHierarchy
//!                                                               │ barrier
//!                          GeneratedClass <──par── emitters <───┘
//! ```
//!
//! Scanning and emission run on the rayon pool. Records are sorted by
//! (unit id, class name) before resolution, and every list in the report
//! keeps that order, so output never depends on scheduling.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info, warn};
use xxhash_rust::xxh64::xxh64;

use reflgen_codegen::{BindingEmitter, emit_properties};
use reflgen_core::{
    ClassRecord, Classification, ConfigError, HierarchyDiagnostic, ReflectionConfig, ReflgenError,
    ScanError, Severity, UnitId,
};
use reflgen_parser::ClassRecordBuilder;
use reflgen_registry::ClassHierarchy;

/// Header placed above the generated blocks in [`GeneratedClass::combined`].
const GENERATED_HEADER: &str = "// Auto-generated by reflgen. Do not edit.\n";

// ============================================================================
// Inputs & Outputs
// ============================================================================

/// One already-decoded declaration unit (usually a header file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationUnit {
    pub id: UnitId,
    pub text: String,
}

impl DeclarationUnit {
    pub fn new(id: impl Into<UnitId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A unit excluded from the run by a scan fault.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitFailure {
    pub unit: UnitId,
    pub error: ScanError,
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.unit, self.error)
    }
}

/// Generated output for one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedClass {
    pub name: String,
    pub unit: UnitId,
    pub classification: Classification,
    /// `BEGIN_PROPERTIES` .. `END_PROPERTIES()`
    pub properties_block: String,
    /// `LUA_BIND_BEGIN` .. `LUA_BIND_END()`
    pub bindings_block: String,
    /// xxh64 of [`combined`](Self::combined).
    pub fingerprint: u64,
}

impl GeneratedClass {
    fn new(record: &ClassRecord, hierarchy: &ClassHierarchy<'_>, bindings: &BindingEmitter) -> Self {
        let classification = hierarchy.classification(&record.name);
        let record = match hierarchy.injected_identity(record) {
            Some(identity) => {
                let mut resolved = record.clone();
                resolved.properties.insert(0, identity.to_property());
                Cow::Owned(resolved)
            }
            None => Cow::Borrowed(record),
        };

        let mut class = Self {
            name: record.name.clone(),
            unit: record.location.unit.clone(),
            classification,
            properties_block: emit_properties(&record, classification),
            bindings_block: bindings.emit(&record),
            fingerprint: 0,
        };
        class.fingerprint = xxh64(class.combined().as_bytes(), 0);
        class
    }

    /// Both blocks under a do-not-edit header, ready to be written out.
    pub fn combined(&self) -> String {
        format!(
            "{GENERATED_HEADER}\n{}\n{}",
            self.properties_block, self.bindings_block
        )
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Sorted by unit id, then class name.
    pub classes: Vec<GeneratedClass>,
    /// Sorted by unit id.
    pub failures: Vec<UnitFailure>,
    /// Units without the eligibility marker or a class header, sorted.
    pub skipped: Vec<UnitId>,
    pub diagnostics: Vec<HierarchyDiagnostic>,
}

impl GenerationReport {
    /// Look up a generated class by name.
    pub fn class(&self, name: &str) -> Option<&GeneratedClass> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// No unit failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// The generated classes, or the first fault of the run.
    ///
    /// Unit failures come first, then warning-level diagnostics. Notes (such as
    /// bases outside the scanned set) are tolerated.
    pub fn into_strict(self) -> Result<Vec<GeneratedClass>, ReflgenError> {
        if let Some(failure) = self.failures.into_iter().next() {
            return Err(failure.error.into());
        }
        if let Some(diagnostic) = self
            .diagnostics
            .into_iter()
            .find(|d| d.severity() == Severity::Warning)
        {
            return Err(diagnostic.into());
        }
        Ok(self.classes)
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Runs the full scan → resolve → emit pipeline over a set of units.
#[derive(Debug, Clone)]
pub struct Generator {
    builder: ClassRecordBuilder,
    bindings: BindingEmitter,
}

impl Generator {
    pub fn new(config: &ReflectionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            builder: ClassRecordBuilder::new(config)?,
            bindings: BindingEmitter::new(&config.vocabulary)?,
        })
    }

    /// Load a TOML config file and build a generator from it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReflgenError> {
        let config = ReflectionConfig::from_path(path)?;
        Ok(Self::new(&config)?)
    }

    pub fn config(&self) -> &ReflectionConfig {
        self.builder.config()
    }

    /// Scan every unit in parallel and split the outcomes.
    ///
    /// Returns `(records, failures, skipped)`, each sorted.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn scan(&self, units: &[DeclarationUnit]) -> (Vec<ClassRecord>, Vec<UnitFailure>, Vec<UnitId>) {
        let outcomes: Vec<_> = units
            .par_iter()
            .map(|unit| (unit, self.builder.build(&unit.id, &unit.text)))
            .collect();

        let mut records = Vec::new();
        let mut failures = Vec::new();
        let mut skipped = Vec::new();

        for (unit, outcome) in outcomes {
            match outcome {
                Ok(Some(record)) => {
                    debug!(
                        class = %record.name,
                        parent = %record.parent_name,
                        unit = %unit.id,
                        properties = record.properties.len(),
                        functions = record.functions.len(),
                        "discovered class"
                    );
                    records.push(record);
                }
                Ok(None) => {
                    debug!(unit = %unit.id, "skipped unit");
                    skipped.push(unit.id.clone());
                }
                Err(error) => {
                    warn!(unit = %unit.id, %error, "failed to scan unit");
                    failures.push(UnitFailure {
                        unit: unit.id.clone(),
                        error,
                    });
                }
            }
        }

        records.sort_by(|a, b| {
            (&a.location.unit, &a.name).cmp(&(&b.location.unit, &b.name))
        });
        failures.sort_by(|a, b| a.unit.cmp(&b.unit));
        skipped.sort();

        (records, failures, skipped)
    }

    /// Generate output for every eligible unit.
    ///
    /// A failing unit never affects any other unit's output.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(&self, units: &[DeclarationUnit]) -> GenerationReport {
        let (records, failures, skipped) = self.scan(units);

        let hierarchy = ClassHierarchy::build(&records, self.config());

        let classes: Vec<GeneratedClass> = records
            .par_iter()
            .map(|record| GeneratedClass::new(record, &hierarchy, &self.bindings))
            .collect();

        info!(
            units = units.len(),
            classes = classes.len(),
            skipped = skipped.len(),
            failures = failures.len(),
            diagnostics = hierarchy.diagnostics().len(),
            "generation finished"
        );

        GenerationReport {
            classes,
            failures,
            skipped,
            diagnostics: hierarchy.diagnostics().to_vec(),
        }
    }
}
