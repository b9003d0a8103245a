//! Building one [`ClassRecord`] per declaration unit.
//!
//! A unit contributes a record only if it carries the eligibility marker and a
//! `class Name : public Parent` header. Every property and function site in the
//! unit is attributed to that first header, in encounter order.

use regex::Regex;

use reflgen_core::{
    ClassRecord, ConfigError, ReflectionConfig, ScanError, SourceLocation, Span, UnitId,
};

use crate::args::AnnotationArgs;
use crate::balance::extract_balanced;
use crate::interpret::{interpret_function, interpret_property};
use crate::scanner::{AnnotationScanner, DeclarationShape};

/// `class [EXPORT_API] Name [final] : public Parent`
const CLASS_HEADER: &str = r"\bclass\s+(?:\w+_API\s+)?(\w+)(?:\s+final)?\s*:\s*public\s+(\w+)";

/// Scans declaration units into class records.
///
/// Compiles its patterns once; share one builder across threads.
#[derive(Debug, Clone)]
pub struct ClassRecordBuilder {
    config: ReflectionConfig,
    eligibility: Regex,
    class_header: Regex,
    class_marker: Regex,
    properties: AnnotationScanner,
    functions: AnnotationScanner,
}

impl ClassRecordBuilder {
    pub fn new(config: &ReflectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let vocab = &config.vocabulary;

        let eligibility = compile(&format!(
            r"\b{}\s*\(\s*\)",
            regex::escape(&vocab.eligibility_marker)
        ))?;
        let class_marker = compile(&format!(r"\b{}\s*\(", regex::escape(&vocab.class_marker)))?;

        Ok(Self {
            eligibility,
            class_header: compile(CLASS_HEADER)?,
            class_marker,
            properties: AnnotationScanner::new(
                &vocab.property_marker,
                DeclarationShape::Field,
                config.lookahead,
            )?,
            functions: AnnotationScanner::new(
                &vocab.function_marker,
                DeclarationShape::Method,
                config.lookahead,
            )?,
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &ReflectionConfig {
        &self.config
    }

    /// Whether the unit carries the eligibility marker at all.
    pub fn is_eligible(&self, text: &str) -> bool {
        self.eligibility.is_match(text)
    }

    /// Build the record for one unit.
    ///
    /// `Ok(None)` means the unit is not a participant: no eligibility marker or
    /// no class header. Errors exclude the unit from the run.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn build(&self, unit: &UnitId, text: &str) -> Result<Option<ClassRecord>, ScanError> {
        if !self.is_eligible(text) {
            return Ok(None);
        }
        let Some(header) = self.class_header.captures(text) else {
            return Ok(None);
        };
        let (Some(name), Some(parent)) = (header.get(1), header.get(2)) else {
            return Ok(None);
        };

        let span = Span::from_offset(text, name.start(), name.len());
        let mut record = ClassRecord::new(
            name.as_str(),
            parent.as_str(),
            SourceLocation::new(unit.clone(), span),
        );

        let header_start = header.get(0).map_or(name.start(), |m| m.start());
        self.apply_class_annotation(&mut record, text, header_start)?;

        if let Some(root) = self.config.root_for(&record.name) {
            record.properties.push(root.identity.to_property());
        }

        let vocab = &self.config.vocabulary;
        for site in self.properties.sites(text) {
            record.properties.push(interpret_property(&site?, vocab, text)?);
        }
        for site in self.functions.sites(text) {
            record.functions.push(interpret_function(&site?, vocab));
        }

        Ok(Some(record))
    }

    /// Read `DisplayName`, `Description` and `Abstract` from the class marker
    /// nearest before the header, if there is one.
    fn apply_class_annotation(
        &self,
        record: &mut ClassRecord,
        text: &str,
        header_start: usize,
    ) -> Result<(), ScanError> {
        let Some(marker) = self
            .class_marker
            .find_iter(&text[..header_start])
            .last()
        else {
            return Ok(());
        };

        let args = extract_balanced(text, marker.end(), '(', ')')?;
        let args = AnnotationArgs::parse(args.inner);
        let vocab = &self.config.vocabulary;

        if let Some(display_name) = args.get_non_empty(&vocab.display_name_key) {
            record.display_name = display_name.to_string();
        }
        if let Some(description) = args.get_non_empty(&vocab.description_key) {
            record.description = description.to_string();
        }
        record.is_abstract = args.has_flag(&vocab.abstract_flag);
        Ok(())
    }
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::Invalid(format!("pattern '{pattern}': {e}")))
}
