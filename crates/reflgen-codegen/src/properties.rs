//! Property registration blocks.
//!
//! ```text
//! BEGIN_PROPERTIES(AWeapon)
//!     MARK_AS_SPAWNABLE("AWeapon", "Auto-generated AWeapon")
//!     ADD_PROPERTY(FName, ObjectName, "[Actor]", true, "The name of this actor")
//!     ADD_PROPERTY_RANGE(float, Damage, "Combat", 0.0f, 100.0f, true)
//! END_PROPERTIES()
//! ```

use std::fmt;

use reflgen_core::{AssetKind, ClassRecord, Classification, OutputKind, Property};

/// Render the property block for a resolved class.
pub fn emit_properties(record: &ClassRecord, classification: Classification) -> String {
    PropertyBlock::new(record, classification).to_string()
}

/// `Display` adaptor rendering one property block.
#[derive(Debug, Clone, Copy)]
pub struct PropertyBlock<'a> {
    record: &'a ClassRecord,
    classification: Classification,
}

impl<'a> PropertyBlock<'a> {
    pub fn new(record: &'a ClassRecord, classification: Classification) -> Self {
        Self {
            record,
            classification,
        }
    }
}

impl fmt::Display for PropertyBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record;
        writeln!(f, "BEGIN_PROPERTIES({})", record.name)?;

        let mark = match self.classification {
            Classification::Spawnable => Some("MARK_AS_SPAWNABLE"),
            Classification::Component => Some("MARK_AS_COMPONENT"),
            Classification::None => None,
        };
        if let Some(mark) = mark {
            writeln!(
                f,
                "    {mark}(\"{}\", \"{}\")",
                record.display_name_or_default(),
                record.description_or_default()
            )?;
        }

        for property in &record.properties {
            write!(f, "    ")?;
            write_property(f, property)?;
            writeln!(f)?;
        }

        writeln!(f, "END_PROPERTIES()")
    }
}

fn write_property(f: &mut fmt::Formatter<'_>, property: &Property) -> fmt::Result {
    let kind = property.output_kind();
    match (kind, property.range) {
        (OutputKind::Range, Some(range)) => write!(
            f,
            "ADD_PROPERTY_RANGE({}, {}, \"{}\", {}f, {}f, {}",
            property.declared_type,
            property.name,
            property.category,
            float_literal(range.min.0),
            float_literal(range.max.0),
            property.editable
        )?,
        (OutputKind::Array(element), _) => write!(
            f,
            "ADD_PROPERTY_ARRAY(EPropertyType::{}, {}, \"{}\", {}",
            element_type(element),
            property.name,
            property.category,
            property.editable
        )?,
        _ => write!(
            f,
            "{}({}, {}, \"{}\", {}",
            property_macro(kind),
            property.declared_type,
            property.name,
            property.category,
            property.editable
        )?,
    }

    if let Some(tooltip) = &property.tooltip {
        write!(f, ", \"{tooltip}\"")?;
    }
    write!(f, ")")
}

/// Macro for every kind that takes the plain `(type, name, ...)` argument list.
fn property_macro(kind: OutputKind) -> &'static str {
    match kind {
        OutputKind::Curve => "ADD_PROPERTY_CURVE",
        OutputKind::ShaderResourceView => "ADD_PROPERTY_SRV",
        OutputKind::Pointer(Some(AssetKind::Texture)) => "ADD_PROPERTY_TEXTURE",
        OutputKind::Pointer(Some(AssetKind::StaticMesh)) => "ADD_PROPERTY_STATICMESH",
        OutputKind::Pointer(Some(AssetKind::Material)) => "ADD_PROPERTY_MATERIAL",
        OutputKind::Pointer(Some(AssetKind::Sound)) => "ADD_PROPERTY_AUDIO",
        OutputKind::Range => "ADD_PROPERTY_RANGE",
        OutputKind::Array(_) => "ADD_PROPERTY_ARRAY",
        OutputKind::Pointer(None) | OutputKind::Scalar => "ADD_PROPERTY",
    }
}

fn element_type(element: Option<AssetKind>) -> &'static str {
    match element {
        Some(AssetKind::Material) => "Material",
        Some(AssetKind::Texture) => "Texture",
        Some(AssetKind::Sound) => "Sound",
        Some(AssetKind::StaticMesh) => "StaticMesh",
        None => "ObjectPtr",
    }
}

/// A float that always carries a decimal point: `0` → `0.0`, `2.5` → `2.5`,
/// `1e20` → `1.0e20`.
fn float_literal(value: f64) -> String {
    if value.abs() >= 1e16 {
        let text = format!("{value:e}");
        match text.split_once('e') {
            Some((mantissa, exponent)) if !mantissa.contains('.') => {
                format!("{mantissa}.0e{exponent}")
            }
            _ => text,
        }
    } else if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflgen_core::{PropertyRange, SourceLocation, Span, UnitId};

    fn record(name: &str) -> ClassRecord {
        ClassRecord::new(
            name,
            "AActor",
            SourceLocation::new(UnitId::new("Test.h"), Span::default()),
        )
    }

    fn property(name: &str, ty: &str, category: &str, editable: bool) -> Property {
        let mut property = Property::new(name, ty);
        property.category = category.into();
        property.editable = editable;
        property
    }

    fn line(property: Property) -> String {
        let mut record = record("AFoo");
        record.properties.push(property);
        let block = emit_properties(&record, Classification::None);
        block.lines().nth(1).unwrap_or_default().trim().to_string()
    }

    #[test]
    fn spawnable_block() {
        let mut record = record("AWeapon");
        let mut damage = property("Damage", "float", "Combat", true);
        damage.range = Some(PropertyRange::new(0.0, 100.0));
        record.properties.push(damage);

        assert_eq!(
            emit_properties(&record, Classification::Spawnable),
            "BEGIN_PROPERTIES(AWeapon)\n\
             \x20   MARK_AS_SPAWNABLE(\"AWeapon\", \"Auto-generated AWeapon\")\n\
             \x20   ADD_PROPERTY_RANGE(float, Damage, \"Combat\", 0.0f, 100.0f, true)\n\
             END_PROPERTIES()\n"
        );
    }

    #[test]
    fn component_mark_uses_display_and_description() {
        let mut record = record("UHealthComponent");
        record.display_name = "Health".into();
        record.description = "Tracks hit points".into();
        let block = emit_properties(&record, Classification::Component);
        assert!(block.contains("    MARK_AS_COMPONENT(\"Health\", \"Tracks hit points\")\n"));
    }

    #[test]
    fn empty_class_still_has_markers() {
        let record = record("AEmpty");
        assert_eq!(
            emit_properties(&record, Classification::None),
            "BEGIN_PROPERTIES(AEmpty)\nEND_PROPERTIES()\n"
        );
        let spawnable = emit_properties(&record, Classification::Spawnable);
        assert_eq!(spawnable.lines().count(), 3);
    }

    #[test]
    fn scalar_with_tooltip() {
        let mut prop = property("Health", "int32", "Stats", false);
        prop.tooltip = Some("Current health".into());
        assert_eq!(
            line(prop),
            "ADD_PROPERTY(int32, Health, \"Stats\", false, \"Current health\")"
        );
    }

    #[test]
    fn pointer_macros() {
        let cases = [
            ("UTexture*", "ADD_PROPERTY_TEXTURE"),
            ("UStaticMesh*", "ADD_PROPERTY_STATICMESH"),
            ("UMaterialInterface*", "ADD_PROPERTY_MATERIAL"),
            ("USound*", "ADD_PROPERTY_AUDIO"),
            ("UObject*", "ADD_PROPERTY"),
        ];
        for (ty, expected) in cases {
            let emitted = line(property("Asset", ty, "Rendering", true));
            assert_eq!(emitted, format!("{expected}({ty}, Asset, \"Rendering\", true)"));
        }
    }

    #[test]
    fn curve_and_srv() {
        assert!(line(property("Fade", "UCurveFloat*", "FX", true)).starts_with("ADD_PROPERTY_CURVE("));
        assert!(line(property("View", "ID3D11ShaderResourceView*", "FX", true)).starts_with("ADD_PROPERTY_SRV("));
    }

    #[test]
    fn array_element_types() {
        assert_eq!(
            line(property("Textures", "TArray<UTexture*>", "Rendering", true)),
            "ADD_PROPERTY_ARRAY(EPropertyType::Texture, Textures, \"Rendering\", true)"
        );
        assert_eq!(
            line(property("Targets", "TArray<AActor*>", "AI", false)),
            "ADD_PROPERTY_ARRAY(EPropertyType::ObjectPtr, Targets, \"AI\", false)"
        );
    }

    #[test]
    fn range_bounds_keep_fractions() {
        let mut prop = property("Volume", "float", "Audio", true);
        prop.range = Some(PropertyRange::new(-0.5, 2.25));
        prop.tooltip = Some("Gain".into());
        assert_eq!(
            line(prop),
            "ADD_PROPERTY_RANGE(float, Volume, \"Audio\", -0.5f, 2.25f, true, \"Gain\")"
        );
    }

    #[test]
    fn pointer_with_range_stays_pointer() {
        let mut prop = property("Icon", "UTexture*", "UI", true);
        prop.range = Some(PropertyRange::new(0.0, 1.0));
        assert!(line(prop).starts_with("ADD_PROPERTY_TEXTURE("));
    }

    #[test]
    fn float_literals() {
        assert_eq!(float_literal(0.0), "0.0");
        assert_eq!(float_literal(100.0), "100.0");
        assert_eq!(float_literal(-3.0), "-3.0");
        assert_eq!(float_literal(0.125), "0.125");
        assert_eq!(float_literal(1e20), "1.0e20");
        assert_eq!(float_literal(-2.5e17), "-2.5e17");
        assert_eq!(float_literal(1e16), "1.0e16");
    }

    #[test]
    fn huge_range_bounds_keep_a_decimal_point() {
        let mut prop = property("Big", "float", "", true);
        prop.range = Some(PropertyRange::new(0.0, 1e20));
        assert_eq!(
            line(prop),
            "ADD_PROPERTY_RANGE(float, Big, \"\", 0.0f, 1.0e20f, true)"
        );
    }
}
