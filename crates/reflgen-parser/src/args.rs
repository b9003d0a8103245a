//! Annotation argument lists.
//!
//! Arguments are a comma-separated mix of `Key = "value"` pairs and bare
//! flag tokens:
//!
//! ```text
//! UPROPERTY(EditAnywhere, Category="Combat", Range="0, 100", Tooltip="Hit points")
//!           ^flag         ^pair              ^pair           ^pair
//! ```
//!
//! Commas inside quotes or nested delimiters do not split. Values may be
//! quoted or bare; surrounding quotes are removed.

use std::collections::BTreeMap;

use crate::balance::{find_top_level, split_top_level};

/// Parsed annotation arguments, borrowing from the unit text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationArgs<'src> {
    pairs: Vec<(&'src str, &'src str)>,
    flags: Vec<&'src str>,
}

impl<'src> AnnotationArgs<'src> {
    /// Parse raw argument text (without the surrounding parentheses).
    pub fn parse(text: &'src str) -> Self {
        let mut args = Self::default();

        for segment in split_top_level(text, ',') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            match find_top_level(segment, '=') {
                Some(eq) => {
                    let key = segment[..eq].trim();
                    let value = unquote(segment[eq + 1..].trim());
                    if !key.is_empty() {
                        args.pairs.push((key, value));
                    }
                }
                None => args.flags.push(segment),
            }
        }

        args
    }

    /// Value of the first pair with this key.
    pub fn get(&self, key: &str) -> Option<&'src str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// Value of the first pair with this key, ignoring empty values.
    pub fn get_non_empty(&self, key: &str) -> Option<&'src str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Whether a bare flag token is present. Matches whole tokens only.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| *f == flag)
    }

    /// Bare flags in order of appearance.
    pub fn flags(&self) -> &[&'src str] {
        &self.flags
    }

    /// All pairs as an owned, key-ordered map. The first occurrence of a key wins.
    pub fn to_metadata(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for (key, value) in &self.pairs {
            map.entry(key.to_string()).or_insert_with(|| value.to_string());
        }
        map
    }
}

/// Strip one pair of surrounding double quotes.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
