//! Cross-unit class hierarchy resolution.
//!
//! Built once per run, after every unit has been scanned. Each class's
//! ancestry is walked along `parent_name` links until it reaches a root, a
//! class that was never scanned, or a cycle. Outcomes are memoized per class,
//! so a deep chain shared by many classes is walked once.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use reflgen_core::{
    ClassRecord, Classification, HierarchyDiagnostic, IdentityProperty, ReflectionConfig,
};

/// Where a class's ancestor chain ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ancestry {
    /// Reached a root; carries the root's classification.
    Root(Classification),
    /// Reached a class with no record in this run.
    Unresolved,
    /// Walked into a cycle.
    Cycle,
}

/// Read-only hierarchy view over a run's class records.
#[derive(Debug)]
pub struct ClassHierarchy<'a> {
    config: &'a ReflectionConfig,
    classes: FxHashMap<&'a str, &'a ClassRecord>,
    ancestry: FxHashMap<&'a str, Ancestry>,
    diagnostics: Vec<HierarchyDiagnostic>,
}

impl<'a> ClassHierarchy<'a> {
    /// Index `records` and resolve every class.
    ///
    /// On duplicate names the earlier record wins. Diagnostics follow the
    /// order of `records`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn build(records: &'a [ClassRecord], config: &'a ReflectionConfig) -> Self {
        let mut hierarchy = Self {
            config,
            classes: FxHashMap::default(),
            ancestry: FxHashMap::default(),
            diagnostics: Vec::new(),
        };

        for record in records {
            if let Some(kept) = hierarchy.classes.get(record.name.as_str()) {
                warn!(
                    class = %record.name,
                    kept = %kept.location,
                    ignored = %record.location,
                    "duplicate class declaration"
                );
                hierarchy.diagnostics.push(HierarchyDiagnostic::DuplicateClass {
                    class: record.name.clone(),
                    kept: kept.location.to_string(),
                    ignored: record.location.to_string(),
                });
                continue;
            }
            hierarchy.classes.insert(record.name.as_str(), record);
        }

        for record in records {
            let name = record.name.as_str();
            let outcome = hierarchy.resolve(name);
            // Roots stop the walk before being recorded on the path.
            hierarchy.ancestry.entry(name).or_insert(outcome);
        }

        hierarchy
    }

    /// Walk from `start` to the end of its chain, memoizing every class passed.
    fn resolve(&mut self, start: &'a str) -> Ancestry {
        let mut path: Vec<&'a str> = Vec::new();
        let mut on_path: FxHashSet<&'a str> = FxHashSet::default();
        let mut current = start;

        let outcome = loop {
            if let Some(&known) = self.ancestry.get(current) {
                break known;
            }
            if let Some(classification) = self.config.root_classification(current) {
                break Ancestry::Root(classification);
            }
            if !on_path.insert(current) {
                let entry = path.iter().position(|&name| name == current).unwrap_or(0);
                let mut chain: Vec<String> = path[entry..].iter().map(|n| n.to_string()).collect();
                chain.push(current.to_string());
                warn!(class = current, chain = %chain.join(" -> "), "circular inheritance");
                self.diagnostics.push(HierarchyDiagnostic::CircularInheritance {
                    class: current.to_string(),
                    chain,
                });
                break Ancestry::Cycle;
            }

            match self.classes.get(current) {
                Some(&record) => {
                    path.push(current);
                    current = record.parent_name.as_str();
                }
                None => {
                    if let Some(&child) = path.last() {
                        debug!(class = child, ancestor = current, "unresolved ancestor");
                        self.diagnostics.push(HierarchyDiagnostic::UnresolvedAncestor {
                            class: child.to_string(),
                            ancestor: current.to_string(),
                        });
                    }
                    break Ancestry::Unresolved;
                }
            }
        };

        for name in path {
            self.ancestry.insert(name, outcome);
        }
        outcome
    }

    /// The record indexed under `name`.
    pub fn get(&self, name: &str) -> Option<&'a ClassRecord> {
        self.classes.get(name).copied()
    }

    /// Number of distinct classes indexed.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Where the chain of a scanned class ends, or `None` for unknown names.
    ///
    /// A root's own chain ends at itself.
    pub fn ancestry(&self, name: &str) -> Option<Ancestry> {
        self.ancestry.get(name).copied()
    }

    /// Resolved classification of `name`.
    ///
    /// Roots, abstract classes, unknown names and classes whose chain does not
    /// reach a root are all `None`.
    pub fn classification(&self, name: &str) -> Classification {
        let Some(record) = self.get(name) else {
            return Classification::None;
        };
        if record.is_abstract || self.config.is_root(name) {
            return Classification::None;
        }
        match self.ancestry(name) {
            Some(Ancestry::Root(classification)) => classification,
            _ => Classification::None,
        }
    }

    /// Whether `ancestor` appears anywhere above `class` in the parent chain.
    ///
    /// `ancestor` need not have a record; the walk stops at the first class
    /// that was not scanned, and at cycles.
    pub fn is_derived_from(&self, class: &str, ancestor: &str) -> bool {
        let mut seen = FxHashSet::default();
        let mut current = class;
        while seen.insert(current) {
            let Some(record) = self.get(current) else {
                return false;
            };
            if record.parent_name == ancestor {
                return true;
            }
            current = record.parent_name.as_str();
        }
        false
    }

    /// Identity property to inject ahead of `record`'s own properties.
    ///
    /// A scanned root already carries its identity property. When the root is
    /// not part of the run, its direct children carry it instead, so every
    /// chain below a root holds it exactly once.
    ///
    /// Like [`classification`](Self::classification), this follows the record
    /// indexed under `record.name`, so an ignored duplicate is treated exactly
    /// like the declaration that was kept.
    pub fn injected_identity(&self, record: &ClassRecord) -> Option<&'a IdentityProperty> {
        let config: &'a ReflectionConfig = self.config;
        if config.is_root(&record.name) {
            return None;
        }
        let parent = self
            .get(&record.name)
            .map_or(record.parent_name.as_str(), |kept| kept.parent_name.as_str());
        let root = config.root_for(parent)?;
        if self.classes.contains_key(root.name.as_str()) {
            return None;
        }
        Some(&root.identity)
    }

    /// Anomalies found while building, in discovery order.
    pub fn diagnostics(&self) -> &[HierarchyDiagnostic] {
        &self.diagnostics
    }
}
