//! Turning raw annotation sites into [`Property`] and [`Function`] records.

use reflgen_core::{
    Function, Parameter, Property, PropertyRange, ScanError, Span, Vocabulary,
};

use crate::args::AnnotationArgs;
use crate::balance::{find_top_level, split_top_level};
use crate::scanner::AnnotationSite;

/// Storage/linkage specifiers that are not part of a method's return type.
const RETURN_TYPE_SPECIFIERS: [&str; 5] = ["virtual", "static", "inline", "FORCEINLINE", "explicit"];

/// Build a property from a field site.
///
/// `source` is the full unit text, used only to position errors.
pub fn interpret_property(
    site: &AnnotationSite<'_>,
    vocab: &Vocabulary,
    source: &str,
) -> Result<Property, ScanError> {
    let args = AnnotationArgs::parse(site.arguments);
    let mut property = Property::new(site.name, site.declared_type);

    if let Some(category) = args.get_non_empty(&vocab.category_key) {
        property.category = category.to_string();
    }
    property.editable = args.has_flag(&vocab.editable_flag);
    property.tooltip = args.get_non_empty(&vocab.tooltip_key).map(str::to_string);

    if let Some(range) = args.get(&vocab.range_key) {
        property.range = parse_range(range).map_err(|text| ScanError::InvalidRangeBound {
            property: site.name.to_string(),
            text,
            span: Span::from_offset(source, site.offset, site.arguments.len()),
        })?;
    }

    property.metadata = args.to_metadata();
    Ok(property)
}

/// `"min, max"` → bounds. Any other part count is no range; a non-numeric
/// bound in a two-part value is an error carrying the offending text.
fn parse_range(text: &str) -> Result<Option<PropertyRange>, String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let [min, max] = parts.as_slice() else {
        return Ok(None);
    };
    Ok(Some(PropertyRange::new(parse_bound(min)?, parse_bound(max)?)))
}

/// A finite `f64`; `inf` and `NaN` have no float literal to emit.
fn parse_bound(text: &str) -> Result<f64, String> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| text.to_string())
}

/// Build a function from a method site.
pub fn interpret_function(site: &AnnotationSite<'_>, vocab: &Vocabulary) -> Function {
    let args = AnnotationArgs::parse(site.arguments);
    let mut function = Function::new(site.name, strip_specifiers(site.declared_type));

    if let Some(display_name) = args.get_non_empty(&vocab.display_name_key) {
        function.display_name = display_name.to_string();
    }
    function.script_bindable = args.has_flag(&vocab.script_bind_flag);

    if let Some(tail) = site.method {
        function.is_const = tail.is_const;
        function.parameters = parse_parameters(tail.parameters);
    }

    function.metadata = args.to_metadata();
    function
}

/// Drop leading `virtual`/`static`/... keywords from a return type.
fn strip_specifiers(return_type: &str) -> &str {
    let mut rest = return_type.trim();
    loop {
        let Some((word, tail)) = rest.split_once(char::is_whitespace) else {
            return rest;
        };
        if !RETURN_TYPE_SPECIFIERS.contains(&word) {
            return rest;
        }
        rest = tail.trim_start();
    }
}

/// Split a raw parameter list into typed parameters.
///
/// Commas inside nested delimiters do not split, so `TMap<K, V> Map` stays one
/// parameter. A top-level default value (`int Count = 3`) is dropped. Segments
/// without a separate name (`void`, unnamed parameters) are skipped.
pub fn parse_parameters(text: &str) -> Vec<Parameter> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    split_top_level(text, ',')
        .into_iter()
        .filter_map(|segment| {
            let segment = match find_top_level(segment, '=') {
                Some(eq) => &segment[..eq],
                None => segment,
            }
            .trim();

            let (ty, name) = segment.rsplit_once(char::is_whitespace)?;
            let glued = name.len() - name.trim_start_matches(['*', '&']).len();
            let (sigils, name) = name.split_at(glued);
            if name.is_empty() {
                return None;
            }
            Some(Parameter::new(name, format!("{}{}", ty.trim(), sigils)))
        })
        .collect()
}
