//! Skill header extraction from SKILL.md documents.
//!
//! Every skill document begins with a `---` delimited YAML header. This
//! module extracts that region and parses it into a generic property bag,
//! keeping two failure modes apart: a document with no header at all
//! ([`HeaderError::Missing`]) and a header whose YAML does not parse
//! ([`HeaderError::Malformed`]). The loader records these as distinct
//! per-skill error messages.
//!
//! # Example
//!
//! ```rust
//! use skillgraph::markdown::frontmatter::HeaderParser;
//!
//! let parser = HeaderParser::new();
//! let content = "---\nname: my-skill\ndepends_on:\n  - other-skill\n---\n\n# Body\n";
//!
//! let bag = parser.extract(content).unwrap();
//! assert!(bag.contains_key("name"));
//! ```

use gray_matter::{
    Matter, Pod,
    engine::Engine,
};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Custom gray_matter engine that returns raw frontmatter text without parsing.
///
/// This engine implements the gray_matter Engine trait but simply returns the
/// raw frontmatter content as a string without any YAML parsing. This allows
/// us to extract the header text even when the YAML is malformed, so absence
/// and malformation stay distinguishable.
struct RawFrontmatter;

impl Engine for RawFrontmatter {
    fn parse(content: &str) -> Result<Pod, gray_matter::Error> {
        // Just return the raw content as a string without any parsing
        Ok(Pod::String(content.to_string()))
    }
}

/// Reasons a skill header cannot be extracted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// No `---` delimited header region at the start of the document.
    ///
    /// An empty header region (`---` immediately followed by `---`) counts
    /// as missing.
    #[error("Missing frontmatter header")]
    Missing,

    /// A header region exists but cannot be parsed as a YAML key/value
    /// mapping.
    #[error("Malformed frontmatter header: {reason}")]
    Malformed {
        /// Parser message or shape description
        reason: String,
    },
}

/// Parsed header contents: an ordered YAML mapping.
///
/// Values keep their YAML shapes; typed field resolution happens at the
/// call site via [`string_field`] and [`string_list_field`].
pub type PropertyBag = Mapping;

/// Extracts the `---` delimited YAML header from skill documents.
pub struct HeaderParser {
    raw_matter: Matter<RawFrontmatter>,
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderParser {
    /// Create a new header parser.
    pub fn new() -> Self {
        Self {
            raw_matter: Matter::new(),
        }
    }

    /// Extract just the raw header text, if present.
    ///
    /// Returns `None` when the document has no header markers at its start,
    /// or when the delimited region is empty.
    pub fn extract_raw(&self, content: &str) -> Option<String> {
        match self.raw_matter.parse::<String>(content) {
            Ok(result) => result.data.filter(|header_text| !header_text.is_empty()),
            Err(_) => None,
        }
    }

    /// Extract and parse the header into a [`PropertyBag`].
    ///
    /// Fails with [`HeaderError::Missing`] when no header region is found
    /// and [`HeaderError::Malformed`] when the region does not parse as a
    /// key/value mapping.
    pub fn extract(&self, content: &str) -> Result<PropertyBag, HeaderError> {
        let raw = self.extract_raw(content).ok_or(HeaderError::Missing)?;

        let value: Value = serde_yaml::from_str(&raw).map_err(|e| HeaderError::Malformed {
            reason: e.to_string(),
        })?;

        match value {
            Value::Mapping(map) => Ok(map),
            other => Err(HeaderError::Malformed {
                reason: format!("expected a key/value mapping, found {}", yaml_kind(&other)),
            }),
        }
    }
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Resolve a scalar string field from the bag.
///
/// YAML scalars that are not strings (numbers, booleans) are coerced to
/// their display form, so `version: 1.0` resolves to `"1.0"`. List and
/// mapping values resolve to `None`.
pub fn string_field(bag: &PropertyBag, key: &str) -> Option<String> {
    match bag.get(Value::String(key.to_string()))? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Resolve a list-of-strings field from the bag.
///
/// A scalar value is treated as a single-element list. Scalar list items
/// are coerced like [`string_field`]; nested lists and mappings inside the
/// list are skipped. An absent key, a null value, or an empty list all
/// resolve to an empty vector.
pub fn string_list_field(bag: &PropertyBag, key: &str) -> Vec<String> {
    match bag.get(Value::String(key.to_string())) {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(scalar) => scalar_to_string(scalar).into_iter().collect(),
    }
}

/// Whether a key is present in the bag, regardless of its value.
///
/// Used for platform detection, where presence alone marks a declaration.
pub fn has_key(bag: &PropertyBag, key: &str) -> bool {
    bag.contains_key(Value::String(key.to_string()))
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
