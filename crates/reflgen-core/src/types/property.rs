//! Reflected properties and their output-kind decision table.

use std::collections::BTreeMap;
use std::fmt;

use ordered_float::OrderedFloat;

/// Asset family recognized inside a pointer or array element type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Texture,
    StaticMesh,
    Material,
    Sound,
}

impl AssetKind {
    /// Match a lower-cased type name against asset substrings, in the given order.
    fn detect(lowered: &str, order: &[AssetKind]) -> Option<AssetKind> {
        order
            .iter()
            .copied()
            .find(|kind| lowered.contains(kind.type_substring()))
    }

    /// Lower-cased substring identifying this asset family in a type name.
    pub fn type_substring(self) -> &'static str {
        match self {
            AssetKind::Texture => "utexture",
            AssetKind::StaticMesh => "ustaticmesh",
            AssetKind::Material => "umaterial",
            AssetKind::Sound => "usound",
        }
    }
}

/// Order used for array element types.
const ARRAY_ELEMENT_ORDER: [AssetKind; 4] = [
    AssetKind::Material,
    AssetKind::Texture,
    AssetKind::Sound,
    AssetKind::StaticMesh,
];

/// Order used for plain pointer types.
const POINTER_ORDER: [AssetKind; 4] = [
    AssetKind::Texture,
    AssetKind::StaticMesh,
    AssetKind::Material,
    AssetKind::Sound,
];

/// Emission bucket for a property.
///
/// `None` inside `Array`/`Pointer` means the generic object pointer kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Scalar,
    Range,
    Array(Option<AssetKind>),
    Curve,
    ShaderResourceView,
    Pointer(Option<AssetKind>),
}

impl OutputKind {
    /// Classify a declared type. First matching rule wins:
    ///
    /// 1. container (`TArray`) → `Array`, element kind from the first template argument
    /// 2. curve type → `Curve`
    /// 3. shader resource view → `ShaderResourceView`
    /// 4. pointer → `Pointer`, asset kind from the type name
    /// 5. range present → `Range`
    /// 6. otherwise `Scalar`
    ///
    /// Containers are checked before pointers so `TArray<UTexture*>` is an
    /// array of textures, not a texture pointer.
    pub fn classify(declared_type: &str, has_range: bool) -> OutputKind {
        let lowered = declared_type.to_lowercase();

        if lowered.contains("tarray") {
            let element = container_element(&lowered)
                .and_then(|inner| AssetKind::detect(inner, &ARRAY_ELEMENT_ORDER));
            return OutputKind::Array(element);
        }

        if lowered.contains("ucurve") || lowered.contains("fcurve") {
            return OutputKind::Curve;
        }

        if lowered.contains("srv") || lowered.contains("shaderresourceview") {
            return OutputKind::ShaderResourceView;
        }

        if lowered.contains('*') {
            return OutputKind::Pointer(AssetKind::detect(&lowered, &POINTER_ORDER));
        }

        if has_range {
            OutputKind::Range
        } else {
            OutputKind::Scalar
        }
    }
}

/// First identifier inside `tarray<...>` of an already lower-cased type.
fn container_element(lowered: &str) -> Option<&str> {
    let after = &lowered[lowered.find("tarray")? + "tarray".len()..];
    let after = after.trim_start().strip_prefix('<')?.trim_start();
    let end = after
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(after.len());
    (end > 0).then(|| &after[..end])
}

/// Inclusive `(min, max)` bounds from a `Range` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyRange {
    pub min: OrderedFloat<f64>,
    pub max: OrderedFloat<f64>,
}

impl PropertyRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: OrderedFloat(min),
            max: OrderedFloat(max),
        }
    }
}

impl fmt::Display for PropertyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.min, self.max)
    }
}

/// A reflected field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    /// Field identifier.
    pub name: String,
    /// Declared type text, trimmed (may include pointer/container syntax).
    pub declared_type: String,
    /// Free-text grouping label.
    pub category: String,
    /// Whether the editable flag was present.
    pub editable: bool,
    pub tooltip: Option<String>,
    /// Present iff the argument text held a two-part range value.
    pub range: Option<PropertyRange>,
    /// Every `Key = "value"` pair from the annotation, in key order.
    pub metadata: BTreeMap<String, String>,
}

impl Property {
    /// A read-only, uncategorized property.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            category: String::new(),
            editable: false,
            tooltip: None,
            range: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Output bucket, recomputed from the declared type and range on every call.
    #[inline]
    pub fn output_kind(&self) -> OutputKind {
        OutputKind::classify(&self.declared_type, self.range.is_some())
    }
}
